// src/storage/mock.rs

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::Result;

use super::RemoteStorage;

/// In-memory storage backend for tests.
///
/// Objects are seeded with [`add_object`](MockStorage::add_object); every
/// pull/push is recorded so tests can assert call counts and ordering. Pulled
/// objects are written under the project directory, exactly like a real
/// backend would materialize them.
#[derive(Debug, Clone)]
pub struct MockStorage {
    project_dir: PathBuf,
    objects: Arc<Mutex<HashMap<(PathBuf, String), Vec<u8>>>>,
    pulls: Arc<Mutex<Vec<(PathBuf, String)>>>,
    pushes: Arc<Mutex<Vec<(PathBuf, String)>>>,
}

impl MockStorage {
    pub fn new(project_dir: impl AsRef<Path>) -> Self {
        Self {
            project_dir: project_dir.as_ref().to_path_buf(),
            objects: Arc::new(Mutex::new(HashMap::new())),
            pulls: Arc::new(Mutex::new(Vec::new())),
            pushes: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Seed an object under `(output, command_hash)`.
    pub fn add_object(
        &self,
        output: impl AsRef<Path>,
        command_hash: &str,
        content: impl Into<Vec<u8>>,
    ) {
        let key = (output.as_ref().to_path_buf(), command_hash.to_string());
        self.objects.lock().unwrap().insert(key, content.into());
    }

    /// Stored bytes for `(output, command_hash)`, if any.
    pub fn object(&self, output: impl AsRef<Path>, command_hash: &str) -> Option<Vec<u8>> {
        let key = (output.as_ref().to_path_buf(), command_hash.to_string());
        self.objects.lock().unwrap().get(&key).cloned()
    }

    /// Every `(output, command_hash)` pull attempted so far, in order.
    pub fn pull_calls(&self) -> Vec<(PathBuf, String)> {
        self.pulls.lock().unwrap().clone()
    }

    /// Every `(output, command_hash)` push attempted so far, in order.
    pub fn push_calls(&self) -> Vec<(PathBuf, String)> {
        self.pushes.lock().unwrap().clone()
    }

    fn url_for(output: &Path, command_hash: &str) -> String {
        format!("mock://{}/{}", command_hash, output.display())
    }
}

impl RemoteStorage for MockStorage {
    fn pull(&self, output: &Path, command_hash: &str) -> Result<Option<String>> {
        self.pulls
            .lock()
            .unwrap()
            .push((output.to_path_buf(), command_hash.to_string()));

        let key = (output.to_path_buf(), command_hash.to_string());
        let content = match self.objects.lock().unwrap().get(&key) {
            Some(content) => content.clone(),
            None => return Ok(None),
        };

        let dest = self.project_dir.join(output);
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&dest, &content)?;

        Ok(Some(Self::url_for(output, command_hash)))
    }

    fn push(&self, output: &Path, command_hash: &str) -> Result<Option<String>> {
        self.pushes
            .lock()
            .unwrap()
            .push((output.to_path_buf(), command_hash.to_string()));

        let src = self.project_dir.join(output);
        if !src.is_file() {
            return Ok(None);
        }
        let content = fs::read(&src)?;
        let key = (output.to_path_buf(), command_hash.to_string());
        self.objects.lock().unwrap().insert(key, content);

        Ok(Some(Self::url_for(output, command_hash)))
    }
}
