use std::error::Error;

use tempfile::tempdir;

use pulldag::lockfile::load_lockfile;
use pulldag::sched::PullScheduler;
use pulldag::storage::mock::MockStorage;
use pulldag_test_utils::builders::{CommandConfigBuilder, ProjectConfigBuilder};
use pulldag_test_utils::init_tracing;

type TestResult = Result<(), Box<dyn Error>>;

// Mutually dependent commands can never become processable, so a run over
// them terminates with no results and no storage traffic.
#[test]
fn mutually_dependent_commands_stall_silently() -> TestResult {
    init_tracing();
    let dir = tempdir()?;

    let a = CommandConfigBuilder::new("a", "python a.py")
        .dep("b.out")
        .output("a.out")
        .build();
    let b = CommandConfigBuilder::new("b", "python b.py")
        .dep("a.out")
        .output("b.out")
        .build();
    let config = ProjectConfigBuilder::new()
        .with_command(a)
        .with_command(b)
        .build();

    let storage = MockStorage::new(dir.path());
    let results: Vec<_> = PullScheduler::new(dir.path(), &config, storage.clone())
        .collect::<Result<Vec<_>, _>>()?;

    assert!(results.is_empty());
    assert!(storage.pull_calls().is_empty());
    assert!(load_lockfile(dir.path())?.command.is_empty());

    Ok(())
}

// A cycle whose inputs already exist on disk is processable like any other
// command; only a cycle with no satisfied entry point stalls.
#[test]
fn cycle_with_preexisting_inputs_still_pulls() -> TestResult {
    init_tracing();
    let dir = tempdir()?;
    std::fs::write(dir.path().join("b.out"), b"seed")?;

    let a = CommandConfigBuilder::new("a", "python a.py")
        .dep("b.out")
        .output("a.out")
        .build();
    let b = CommandConfigBuilder::new("b", "python b.py")
        .dep("a.out")
        .output("b.out")
        .build();
    let config = ProjectConfigBuilder::new()
        .with_command(a)
        .with_command(b)
        .build();

    let storage = MockStorage::new(dir.path());
    let results: Vec<_> = PullScheduler::new(dir.path(), &config, storage.clone())
        .collect::<Result<Vec<_>, _>>()?;

    // "a" runs (store miss, url None); "a.out" never materializes, so "b"
    // stays blocked.
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].output, std::path::PathBuf::from("a.out"));
    assert!(results[0].url.is_none());
    assert_eq!(storage.pull_calls().len(), 1);

    Ok(())
}
