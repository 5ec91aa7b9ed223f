// src/config/validate.rs

use std::collections::BTreeSet;

use crate::config::model::{ProjectConfig, RawProjectConfig};
use crate::errors::{PulldagError, Result};

impl TryFrom<RawProjectConfig> for ProjectConfig {
    type Error = crate::errors::PulldagError;

    fn try_from(raw: RawProjectConfig) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(ProjectConfig::new_unchecked(raw.remotes, raw.command))
    }
}

fn validate_raw_config(cfg: &RawProjectConfig) -> Result<()> {
    validate_command_names(cfg)?;
    validate_command_paths(cfg)?;
    validate_remotes(cfg)?;
    Ok(())
}

fn validate_command_names(cfg: &RawProjectConfig) -> Result<()> {
    let mut seen = BTreeSet::new();
    for cmd in cfg.command.iter() {
        if cmd.name.trim().is_empty() {
            return Err(PulldagError::ConfigError(
                "[[command]] entry with an empty name".to_string(),
            ));
        }
        if !seen.insert(cmd.name.as_str()) {
            return Err(PulldagError::ConfigError(format!(
                "duplicate command name '{}' in [[command]]",
                cmd.name
            )));
        }
    }
    Ok(())
}

// Deps and outputs are plain file paths, not references to other commands,
// so there is no graph to validate here. A dep nothing produces simply never
// materializes and the command is skipped at pull time.
fn validate_command_paths(cfg: &RawProjectConfig) -> Result<()> {
    for cmd in cfg.command.iter() {
        for path in cmd.deps.iter().chain(cmd.outputs.iter()) {
            if path.as_os_str().is_empty() {
                return Err(PulldagError::ConfigError(format!(
                    "command '{}' declares an empty path",
                    cmd.name
                )));
            }
            if path.is_absolute() {
                return Err(PulldagError::ConfigError(format!(
                    "command '{}' declares absolute path {:?}; deps and outputs \
                     must be relative to the project directory",
                    cmd.name, path
                )));
            }
        }
    }
    Ok(())
}

fn validate_remotes(cfg: &RawProjectConfig) -> Result<()> {
    for (name, address) in cfg.remotes.iter() {
        if address.trim().is_empty() {
            return Err(PulldagError::ConfigError(format!(
                "remote '{name}' has an empty address"
            )));
        }
    }
    Ok(())
}
