// src/sched/scheduler.rs

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::model::{CommandConfig, ProjectConfig};
use crate::errors::Result;
use crate::lockfile::update_lockfile;
use crate::storage::{RemoteStorage, command_hash};

/// Outcome of one pull attempt for a single declared output.
///
/// `url` is `None` when the store had no object matching the output and its
/// command hash. That is not an error: the output is reported and skipped,
/// never retried within the same run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullResult {
    pub url: Option<String>,
    pub output: PathBuf,
}

/// The command currently having its outputs pulled.
#[derive(Debug)]
struct InFlight {
    cmd: CommandConfig,
    hash: String,
    next_output: usize,
}

/// Lazy pull scheduler over a project's commands.
///
/// Scans the remaining commands front-to-back and takes the *first* one whose
/// dependencies all exist on disk, pulls each of its declared outputs from
/// the store under the command's content hash, then restarts the scan from
/// the front of the (now shorter) list. First-fit over declared order, not a
/// topological sort: the list may be in any order, so a command whose inputs
/// arrive via a later command is simply retried on the next scan.
///
/// The run ends when a full scan finds nothing processable. Whatever remains
/// at that point can never resolve in this run: commands are not executed
/// here, so nothing else will materialize their inputs. Those commands are
/// skipped silently and produce no results.
///
/// Results are yielded one output at a time, so a caller can print or act on
/// each pull as it happens rather than after a whole pass. A command is
/// recorded in the lockfile once all its outputs exist locally; that happens
/// as the iterator is driven past the command's last output, so a consumer
/// that stops early leaves the lockfile untouched for it.
#[derive(Debug)]
pub struct PullScheduler<S: RemoteStorage> {
    project_dir: PathBuf,
    storage: S,
    remaining: Vec<CommandConfig>,
    in_flight: Option<InFlight>,
}

impl<S: RemoteStorage> PullScheduler<S> {
    pub fn new(project_dir: &Path, config: &ProjectConfig, storage: S) -> Self {
        Self {
            project_dir: project_dir.to_path_buf(),
            storage,
            remaining: config.command.clone(),
            in_flight: None,
        }
    }

    /// Move the first processable remaining command in flight.
    ///
    /// Returns `Ok(false)` when a full scan found no command with all
    /// dependencies present on disk.
    fn select_next(&mut self) -> Result<bool> {
        for i in 0..self.remaining.len() {
            let cmd = &self.remaining[i];
            debug!(command = %cmd.name, "scanning command");

            let deps: Vec<PathBuf> = cmd
                .deps
                .iter()
                .map(|dep| self.project_dir.join(dep))
                .collect();
            if !deps.iter().all(|dep| dep.exists()) {
                debug!(command = %cmd.name, "dependency missing; skipping outputs for now");
                continue;
            }

            let cmd = self.remaining.remove(i);
            let hash = command_hash("", "", &deps, cmd.script.lines())?;
            debug!(command = %cmd.name, hash = %hash, "dependencies satisfied");
            self.in_flight = Some(InFlight {
                cmd,
                hash,
                next_output: 0,
            });
            return Ok(true);
        }
        Ok(false)
    }

    /// Record the in-flight command in the lockfile if every declared output
    /// now exists locally, then clear it.
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
        } else {
            debug!(command = %flight.cmd.name, "outputs incomplete; lockfile left untouched");
        }
        Ok(())
    }
}

impl<S: RemoteStorage> Iterator for PullScheduler<S> {
    type Item = Result<PullResult>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.in_flight.is_none() {
                match self.select_next() {
                    Ok(true) => {}
                    Ok(false) => return None,
                    Err(err) => return Some(Err(err)),
                }
            }

            let next_pull = {
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

            match next_pull {
                Some((output, hash)) => {
                    let url = match self.storage.pull(&output, &hash) {
                        Ok(url) => url,
                        Err(err) => return Some(Err(err.into())),
                    };
                    debug!(url = ?url, output = ?output, hash = %hash, "pull attempted");
                    return Some(Ok(PullResult { url, output }));
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
