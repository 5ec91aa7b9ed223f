// src/config/loader.rs

use std::fs;
use std::path::Path;

use crate::config::model::{ProjectConfig, RawProjectConfig};
use crate::errors::{PulldagError, Result};

/// Name of the project configuration file inside a project directory.
pub const PROJECT_FILE: &str = "Pulldag.toml";

/// Load `Pulldag.toml` from a project directory and return the raw
/// `RawProjectConfig`.
///
/// This only performs TOML deserialization; it does **not** perform semantic
/// validation (command names, path shapes). Use [`load_project_config`] for
/// that.
pub fn load_from_dir(project_dir: impl AsRef<Path>) -> Result<RawProjectConfig> {
    let project_dir = project_dir.as_ref();
    let path = project_dir.join(PROJECT_FILE);

    if !path.is_file() {
        return Err(PulldagError::ConfigError(format!(
            "no {PROJECT_FILE} found in {project_dir:?}"
        )));
    }

    let contents = fs::read_to_string(&path)?;
    let config: RawProjectConfig = toml::from_str(&contents)?;

    Ok(config)
}

/// Load the project configuration from a directory and run basic validation.
///
/// This is the recommended entry point for the rest of the application:
///
/// - Reads TOML.
/// - Applies defaults (handled by `serde` + `Default` impls).
/// - Checks for:
///   - empty or duplicate command names,
///   - absolute or empty dep/output paths,
///   - empty remote addresses.
pub fn load_project_config(project_dir: impl AsRef<Path>) -> Result<ProjectConfig> {
    let raw = load_from_dir(&project_dir)?;
    let config = ProjectConfig::try_from(raw)?;
    Ok(config)
}
