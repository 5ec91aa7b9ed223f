// src/storage/mod.rs

//! Remote storage: an addressable key-object store used as a build-output
//! cache. One object per (output path, command hash) pair.

use std::fmt::Debug;
use std::path::Path;

use anyhow::Result;

pub mod hash;
pub mod local;
pub mod mock;

pub use hash::command_hash;
pub use local::DirStorage;

/// Abstract remote storage interface.
///
/// `pull` materializes the matching object at the local output path and
/// returns its source url; `Ok(None)` means the store has no object under
/// that key. `push` uploads the local output under the key and returns its
/// destination url; `Ok(None)` means the local output does not exist, so
/// there was nothing to upload. Transport failures are errors in both
/// directions.
pub trait RemoteStorage: Debug {
    fn pull(&self, output: &Path, command_hash: &str) -> Result<Option<String>>;
    fn push(&self, output: &Path, command_hash: &str) -> Result<Option<String>>;
}
