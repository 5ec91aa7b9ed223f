#![allow(dead_code)]

use std::collections::BTreeMap;
use std::path::PathBuf;

use pulldag::config::{CommandConfig, ProjectConfig, RawProjectConfig, ScriptSpec};

/// Builder for `ProjectConfig` to simplify test setup.
pub struct ProjectConfigBuilder {
    config: RawProjectConfig,
}

impl ProjectConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: RawProjectConfig {
                remotes: BTreeMap::new(),
                command: Vec::new(),
            },
        }
    }

    pub fn with_remote(mut self, name: &str, address: &str) -> Self {
        self.config
            .remotes
            .insert(name.to_string(), address.to_string());
        self
    }

    pub fn with_command(mut self, cmd: CommandConfig) -> Self {
        self.config.command.push(cmd);
        self
    }

    pub fn build(self) -> ProjectConfig {
        ProjectConfig::try_from(self.config).expect("Failed to build valid config from builder")
    }
}

impl Default for ProjectConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for `CommandConfig`.
pub struct CommandConfigBuilder {
    cmd: CommandConfig,
}

impl CommandConfigBuilder {
    pub fn new(name: &str, script: &str) -> Self {
        Self {
            cmd: CommandConfig {
                name: name.to_string(),
                deps: Vec::new(),
                outputs: Vec::new(),
                script: ScriptSpec::Line(script.to_string()),
            },
        }
    }

    pub fn dep(mut self, path: &str) -> Self {
        self.cmd.deps.push(PathBuf::from(path));
        self
    }

    pub fn output(mut self, path: &str) -> Self {
        self.cmd.outputs.push(PathBuf::from(path));
        self
    }

    pub fn script_lines(mut self, lines: &[&str]) -> Self {
        self.cmd.script = ScriptSpec::Lines(lines.iter().map(|s| s.to_string()).collect());
        self
    }

    pub fn build(self) -> CommandConfig {
        self.cmd
    }
}
