// src/config/model.rs

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Deserialize;

/// Top-level project configuration as read from `Pulldag.toml`, before
/// validation.
///
/// This is a direct mapping of the file format:
///
/// ```toml
/// [remotes]
/// default = "file:///mnt/cache/pulldag"
/// scratch = "../shared-cache"
///
/// [[command]]
/// name = "preprocess"
/// deps = ["assets/raw.csv"]
/// outputs = ["corpus/train.bin"]
/// script = "python scripts/preprocess.py"
/// ```
///
/// Commands are an array of tables, so the order they are declared in
/// survives loading. The pull scheduler relies on that order when it retries
/// commands whose dependencies are not available yet.
#[derive(Debug, Clone, Deserialize)]
pub struct RawProjectConfig {
    /// Remote aliases from `[remotes]`: name -> storage address.
    #[serde(default)]
    pub remotes: BTreeMap<String, String>,

    /// All commands from `[[command]]`, in declared order.
    #[serde(default)]
    pub command: Vec<CommandConfig>,
}

/// Validated project configuration.
///
/// Constructed via `TryFrom<RawProjectConfig>`, which checks command names
/// and paths (see `config::validate`).
#[derive(Debug, Clone)]
pub struct ProjectConfig {
    /// Remote aliases: name -> storage address.
    pub remotes: BTreeMap<String, String>,

    /// All commands, in declared order.
    pub command: Vec<CommandConfig>,
}

impl ProjectConfig {
    pub(crate) fn new_unchecked(
        remotes: BTreeMap<String, String>,
        command: Vec<CommandConfig>,
    ) -> Self {
        Self { remotes, command }
    }

    /// Resolve a remote name against `[remotes]`.
    ///
    /// A name that does not appear in the mapping is treated as a literal
    /// storage address, so `pulldag pull ../some-cache` works without any
    /// `[remotes]` section at all.
    pub fn resolve_remote(&self, remote: &str) -> String {
        match self.remotes.get(remote) {
            Some(address) => address.clone(),
            None => remote.to_string(),
        }
    }
}

/// A single `[[command]]` entry.
#[derive(Debug, Clone, Deserialize)]
pub struct CommandConfig {
    /// Command name, unique within the project.
    pub name: String,

    /// Paths this command reads, relative to the project directory.
    #[serde(default)]
    pub deps: Vec<PathBuf>,

    /// Paths this command produces, relative to the project directory.
    #[serde(default)]
    pub outputs: Vec<PathBuf>,

    /// The shell script that would produce the outputs.
    ///
    /// Never executed here; it only feeds the command hash.
    pub script: ScriptSpec,
}

/// `script` accepts either a single string or an array of strings.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum ScriptSpec {
    Line(String),
    Lines(Vec<String>),
}

impl ScriptSpec {
    /// View the script as a slice of lines regardless of which TOML form
    /// it was written in.
    pub fn lines(&self) -> &[String] {
        match self {
            ScriptSpec::Line(line) => std::slice::from_ref(line),
            ScriptSpec::Lines(lines) => lines.as_slice(),
        }
    }
}
