// src/config/mod.rs

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{PROJECT_FILE, load_from_dir, load_project_config};
pub use model::{CommandConfig, ProjectConfig, RawProjectConfig, ScriptSpec};
