// src/lib.rs

pub mod cli;
pub mod config;
pub mod errors;
pub mod lockfile;
pub mod logging;
pub mod sched;
pub mod storage;

use std::path::Path;

use anyhow::{Result, bail};
use tracing::{debug, info};

use crate::cli::{CliArgs, CliCommand};
use crate::config::load_project_config;
use crate::sched::{PullScheduler, PushScheduler};
use crate::storage::DirStorage;

/// Build a pull scheduler for the project at `project_dir`.
///
/// `remote` is resolved against the project's `[remotes]` table; a name
/// without a mapping is treated as a literal storage address. The returned
/// scheduler yields one result per declared output as it is driven.
pub fn pull(project_dir: &Path, remote: &str) -> errors::Result<PullScheduler<DirStorage>> {
    let config = load_project_config(project_dir)?;
    let address = config.resolve_remote(remote);
    debug!(remote = %remote, address = %address, "resolved remote storage address");
    let storage = DirStorage::new(project_dir, &address)?;
    Ok(PullScheduler::new(project_dir, &config, storage))
}

/// Build a push scheduler for the project at `project_dir`.
///
/// Remote resolution works as in [`pull`].
pub fn push(project_dir: &Path, remote: &str) -> errors::Result<PushScheduler<DirStorage>> {
    let config = load_project_config(project_dir)?;
    let address = config.resolve_remote(remote);
    debug!(remote = %remote, address = %address, "resolved remote storage address");
    let storage = DirStorage::new(project_dir, &address)?;
    Ok(PushScheduler::new(project_dir, &config, storage))
}

/// High-level entry point used by `main.rs`.
pub fn run(args: CliArgs) -> Result<()> {
    match args.command {
        CliCommand::Pull {
            remote,
            project_dir,
        } => pull_cmd(&project_dir, &remote),
        CliCommand::Push {
            remote,
            project_dir,
        } => push_cmd(&project_dir, &remote),
    }
}

fn pull_cmd(project_dir: &Path, remote: &str) -> Result<()> {
    check_project_dir(project_dir)?;
    info!(remote = %remote, project_dir = %project_dir.display(), "pulling outputs");

    let mut pulled = 0usize;
    for result in pull(project_dir, remote)? {
        let result = result?;
        match result.url {
            Some(url) => {
                pulled += 1;
                println!("Pulled {} from {}", result.output.display(), url);
            }
            None => println!("Skipping {}", result.output.display()),
        }
    }

    info!(pulled, "pull finished");
    Ok(())
}

fn push_cmd(project_dir: &Path, remote: &str) -> Result<()> {
    check_project_dir(project_dir)?;
    info!(remote = %remote, project_dir = %project_dir.display(), "pushing outputs");

    let mut pushed = 0usize;
    for result in push(project_dir, remote)? {
        let result = result?;
        match result.url {
            Some(url) => {
                pushed += 1;
                println!("Pushed {} to {}", result.output.display(), url);
            }
            None => println!("Skipping {}", result.output.display()),
        }
    }

    info!(pushed, "push finished");
    Ok(())
}

fn check_project_dir(project_dir: &Path) -> Result<()> {
    if !project_dir.is_dir() {
        bail!("project directory not found: {}", project_dir.display());
    }
    Ok(())
}
