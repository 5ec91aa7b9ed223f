// src/lockfile.rs

//! Persisted record of commands whose declared outputs are known-built.
//!
//! The file is TOML with one `[command.<name>]` table per recorded command:
//!
//! ```toml
//! [command.preprocess]
//! script = ["python scripts/preprocess.py"]
//! deps = ["assets/raw.csv"]
//! outputs = ["corpus/train.bin"]
//! command_hash = "9f86d08..."
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::model::CommandConfig;
use crate::errors::Result;

/// Name of the lockfile inside a project directory.
pub const LOCK_FILE: &str = "Pulldag.lock";

/// One recorded command.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LockedCommand {
    pub script: Vec<String>,
    pub deps: Vec<PathBuf>,
    pub outputs: Vec<PathBuf>,
    pub command_hash: String,
}

/// On-disk lockfile payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Lockfile {
    #[serde(default)]
    pub command: BTreeMap<String, LockedCommand>,
}

/// Path of the lockfile for a given project directory.
pub fn lockfile_path(project_dir: &Path) -> PathBuf {
    project_dir.join(LOCK_FILE)
}

/// Load the lockfile, or an empty one if the file does not yet exist.
pub fn load_lockfile(project_dir: &Path) -> Result<Lockfile> {
    let path = lockfile_path(project_dir);
    if !path.is_file() {
        return Ok(Lockfile::default());
    }
    let contents = fs::read_to_string(&path)?;
    let lockfile = toml::from_str(&contents)?;
    Ok(lockfile)
}

/// Record `cmd` as known-built under `command_hash`.
///
/// Read-modify-write with a `.tmp` + rename, so an interrupted run never
/// leaves a truncated lockfile behind. Entries sort by command name, so
/// re-recording an unchanged command rewrites the same bytes.
pub fn update_lockfile(project_dir: &Path, cmd: &CommandConfig, command_hash: &str) -> Result<()> {
    let mut lockfile = load_lockfile(project_dir)?;
    lockfile.command.insert(
        cmd.name.clone(),
        LockedCommand {
            script: cmd.script.lines().to_vec(),
            deps: cmd.deps.clone(),
            outputs: cmd.outputs.clone(),
            command_hash: command_hash.to_string(),
        },
    );

    let rendered = toml::to_string_pretty(&lockfile)?;
    let path = lockfile_path(project_dir);
    let tmp = path.with_extension("lock.tmp");
    fs::write(&tmp, &rendered)?;
    fs::rename(&tmp, &path)?;

    debug!(command = %cmd.name, hash = %command_hash, "lockfile updated");
    Ok(())
}
