// src/sched/push.rs

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::model::{CommandConfig, ProjectConfig};
use crate::errors::Result;
use crate::lockfile::update_lockfile;
use crate::storage::{RemoteStorage, command_hash};

/// Outcome of one push attempt for a single declared output.
///
/// `url` is `None` when the output does not exist locally, so there was
/// nothing to upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushResult {
    pub url: Option<String>,
    pub output: PathBuf,
}

/// The command currently having its outputs pushed.
#[derive(Debug)]
struct InFlight {
    cmd: CommandConfig,
    hash: String,
    next_output: usize,
}

/// Lazy single-pass push over a project's commands, in declared order.
///
/// A command participates when all of its dependencies exist on disk, since
/// its content hash cannot be computed otherwise. Unlike pulling there is no
/// worklist: pushing never creates local files, so rescanning could not make
/// progress a single pass cannot.
///
/// A command whose deps and outputs all exist is also recorded in the
/// lockfile, once the iterator is driven past its last output.
#[derive(Debug)]
pub struct PushScheduler<S: RemoteStorage> {
    project_dir: PathBuf,
    storage: S,
    queue: std::vec::IntoIter<CommandConfig>,
    in_flight: Option<InFlight>,
}

impl<S: RemoteStorage> PushScheduler<S> {
    pub fn new(project_dir: &Path, config: &ProjectConfig, storage: S) -> Self {
        Self {
            project_dir: project_dir.to_path_buf(),
            storage,
            queue: config.command.clone().into_iter(),
            in_flight: None,
        }
    }

    /// Move the next pushable command in flight; `Ok(false)` once the queue
    /// is exhausted.
    fn select_next(&mut self) -> Result<bool> {
        while let Some(cmd) = self.queue.next() {
            let deps: Vec<PathBuf> = cmd
                .deps
                .iter()
                .map(|dep| self.project_dir.join(dep))
                .collect();
            if !deps.iter().all(|dep| dep.exists()) {
                debug!(command = %cmd.name, "dependency missing; not pushing outputs");
                continue;
            }

            let hash = command_hash("", "", &deps, cmd.script.lines())?;
            debug!(command = %cmd.name, hash = %hash, "pushing outputs");
            self.in_flight = Some(InFlight {
                cmd,
                hash,
                next_output: 0,
            });
            return Ok(true);
        }
        Ok(false)
    }

    fn finalize_in_flight(&mut self) -> Result<()> {
        let Some(flight) = self.in_flight.take() else {
            return Ok(());
        };
        let all_present = flight
            .cmd
            .outputs
            .iter()
            .all(|out| self.project_dir.join(out).exists());
        if all_present {
            update_lockfile(&self.project_dir, &flight.cmd, &flight.hash)?;
        }
        Ok(())
    }
}

impl<S: RemoteStorage> Iterator for PushScheduler<S> {
    type Item = Result<PushResult>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.in_flight.is_none() {
                match self.select_next() {
                    Ok(true) => {}
                    Ok(false) => return None,
                    Err(err) => return Some(Err(err)),
                }
            }

            let next_push = {
                let Some(flight) = self.in_flight.as_mut() else {
                    continue;
                };
                if flight.next_output < flight.cmd.outputs.len() {
                    let output = flight.cmd.outputs[flight.next_output].clone();
                    flight.next_output += 1;
                    Some((output, flight.hash.clone()))
                } else {
                    None
                }
            };

            match next_push {
                Some((output, hash)) => {
                    let url = match self.storage.push(&output, &hash) {
                        Ok(url) => url,
                        Err(err) => return Some(Err(err.into())),
                    };
                    debug!(url = ?url, output = ?output, hash = %hash, "push attempted");
                    return Some(Ok(PushResult { url, output }));
                }
                None => {
                    if let Err(err) = self.finalize_in_flight() {
                        return Some(Err(err));
                    }
                }
            }
        }
    }
}
