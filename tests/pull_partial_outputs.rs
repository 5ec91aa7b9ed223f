use std::error::Error;
use std::path::PathBuf;

use tempfile::tempdir;

use pulldag::lockfile::load_lockfile;
use pulldag::sched::PullScheduler;
use pulldag::storage::command_hash;
use pulldag::storage::mock::MockStorage;
use pulldag_test_utils::builders::{CommandConfigBuilder, ProjectConfigBuilder};
use pulldag_test_utils::init_tracing;

type TestResult = Result<(), Box<dyn Error>>;

// A store miss for one output is reported, not raised, and the command is
// not recorded in the lockfile while any declared output is still missing.
#[test]
fn missing_object_yields_none_and_leaves_lockfile_untouched() -> TestResult {
    init_tracing();
    let dir = tempdir()?;

    let cmd = CommandConfigBuilder::new("featurize", "python featurize.py")
        .output("feats.bin")
        .output("stats.json")
        .build();
    let config = ProjectConfigBuilder::new().with_command(cmd).build();

    let script = vec!["python featurize.py".to_string()];
    let hash = command_hash("", "", Vec::<PathBuf>::new(), &script)?;

    let storage = MockStorage::new(dir.path());
    storage.add_object("feats.bin", &hash, b"feats".to_vec());
    // stats.json deliberately not seeded.

    let results: Vec<_> = PullScheduler::new(dir.path(), &config, storage.clone())
        .collect::<Result<Vec<_>, _>>()?;

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].output, PathBuf::from("feats.bin"));
    assert!(results[0].url.is_some());
    assert_eq!(results[1].output, PathBuf::from("stats.json"));
    assert!(results[1].url.is_none());

    assert!(dir.path().join("feats.bin").is_file());
    assert!(!dir.path().join("stats.json").exists());

    // Both pulls were attempted; the miss was not retried.
    assert_eq!(storage.pull_calls().len(), 2);

    let lockfile = load_lockfile(dir.path())?;
    assert!(lockfile.command.is_empty());

    Ok(())
}

// An early-stopping consumer must not see lockfile updates for a command it
// never drove past the last output of.
#[test]
fn stopping_before_last_output_skips_lockfile_update() -> TestResult {
    init_tracing();
    let dir = tempdir()?;

    let cmd = CommandConfigBuilder::new("featurize", "python featurize.py")
        .output("feats.bin")
        .output("stats.json")
        .build();
    let config = ProjectConfigBuilder::new().with_command(cmd).build();

    let script = vec!["python featurize.py".to_string()];
    let hash = command_hash("", "", Vec::<PathBuf>::new(), &script)?;

    let storage = MockStorage::new(dir.path());
    storage.add_object("feats.bin", &hash, b"feats".to_vec());
    storage.add_object("stats.json", &hash, b"{}".to_vec());

    let mut scheduler = PullScheduler::new(dir.path(), &config, storage);
    let first = scheduler.next().expect("first result expected")?;
    assert_eq!(first.output, PathBuf::from("feats.bin"));
    let second = scheduler.next().expect("second result expected")?;
    assert_eq!(second.output, PathBuf::from("stats.json"));

    // Both outputs exist locally, but the consumer stopped on the last
    // result, so the command was never recorded.
    drop(scheduler);
    let lockfile = load_lockfile(dir.path())?;
    assert!(lockfile.command.is_empty());

    Ok(())
}
