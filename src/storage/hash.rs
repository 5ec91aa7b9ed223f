// src/storage/hash.rs

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use blake3::Hasher;
use tracing::debug;

/// Compute the content hash used as a command's cache key in remote storage.
///
/// The digest covers, in order: the two extra context strings, the contents
/// of every dependency file (paths sorted first, so the hash is stable
/// independent of declaration order), and the script lines. The command
/// *name* is not an input, so renaming a command keeps its cache entries
/// valid.
///
/// Order of `deps` does not matter; paths that are not regular files are
/// skipped.
pub fn command_hash<I, P>(
    extra_a: &str,
    extra_b: &str,
    deps: I,
    script: &[String],
) -> Result<String>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    let mut hasher = Hasher::new();
    hasher.update(extra_a.as_bytes());
    hasher.update(extra_b.as_bytes());

    let mut deps_vec: Vec<PathBuf> =
        deps.into_iter().map(|p| p.as_ref().to_path_buf()).collect();
    deps_vec.sort();

    for dep in deps_vec {
        if dep.is_file() {
            debug!("hashing dependency {:?}", dep);
            let mut file = File::open(&dep)
                .with_context(|| format!("opening dependency for hashing: {:?}", dep))?;
            let mut buf = [0u8; 8192];
            loop {
                let n = file.read(&mut buf)?;
                if n == 0 {
                    break;
                }
                hasher.update(&buf[..n]);
            }
        }
    }

    for line in script {
        hasher.update(line.as_bytes());
    }

    let hash = hasher.finalize().to_hex().to_string();
    debug!(hash = %hash, "computed command hash");
    Ok(hash)
}
