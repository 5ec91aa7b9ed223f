// src/storage/local.rs

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use tracing::debug;

use crate::storage::RemoteStorage;

/// Directory-backed remote storage.
///
/// The address is a filesystem path, optionally prefixed with `file://`.
/// Relative addresses resolve against the project directory, so a team can
/// point `[remotes]` at a shared checkout-relative cache. Objects live at
/// `<root>/<command_hash>/<output path>`.
#[derive(Debug, Clone)]
pub struct DirStorage {
    project_dir: PathBuf,
    root: PathBuf,
}

impl DirStorage {
    pub fn new(project_dir: &Path, address: &str) -> Result<Self> {
        let raw = address.strip_prefix("file://").unwrap_or(address);
        if raw.trim().is_empty() {
            bail!("empty storage address");
        }
        let path = Path::new(raw);
        let root = if path.is_absolute() {
            path.to_path_buf()
        } else {
            project_dir.join(path)
        };
        Ok(Self {
            project_dir: project_dir.to_path_buf(),
            root,
        })
    }

    fn object_path(&self, output: &Path, command_hash: &str) -> PathBuf {
        self.root.join(command_hash).join(output)
    }
}

impl RemoteStorage for DirStorage {
    fn pull(&self, output: &Path, command_hash: &str) -> Result<Option<String>> {
        let object = self.object_path(output, command_hash);
        if !object.is_file() {
            debug!(output = ?output, hash = %command_hash, "no matching object in store");
            return Ok(None);
        }

        let dest = self.project_dir.join(output);
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating dir {:?}", parent))?;
        }
        fs::copy(&object, &dest)
            .with_context(|| format!("copying {:?} to {:?}", object, dest))?;

        Ok(Some(object.display().to_string()))
    }

    fn push(&self, output: &Path, command_hash: &str) -> Result<Option<String>> {
        let src = self.project_dir.join(output);
        if !src.is_file() {
            debug!(output = ?output, "output missing locally; nothing to push");
            return Ok(None);
        }

        let object = self.object_path(output, command_hash);
        if let Some(parent) = object.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating dir {:?}", parent))?;
        }

        // Copy to a sibling tmp file and rename, so a concurrent pull never
        // sees a half-written object.
        let tmp = PathBuf::from(format!("{}.tmp", object.display()));
        fs::copy(&src, &tmp)
            .with_context(|| format!("copying {:?} to {:?}", src, tmp))?;
        fs::rename(&tmp, &object)
            .with_context(|| format!("renaming {:?} to {:?}", tmp, object))?;

        Ok(Some(object.display().to_string()))
    }
}
