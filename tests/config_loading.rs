use std::error::Error;
use std::fs;
use std::path::PathBuf;

use tempfile::tempdir;

use pulldag::config::{PROJECT_FILE, ProjectConfig, RawProjectConfig, load_project_config};
use pulldag::errors::PulldagError;

type TestResult = Result<(), Box<dyn Error>>;

#[test]
fn missing_project_file_is_a_config_error() -> TestResult {
    let dir = tempdir()?;
    let err = load_project_config(dir.path()).unwrap_err();
    assert!(matches!(err, PulldagError::ConfigError(_)));

    Ok(())
}

#[test]
fn invalid_toml_is_a_parse_error() -> TestResult {
    let dir = tempdir()?;
    fs::write(dir.path().join(PROJECT_FILE), "[[command]\nname = oops")?;
    let err = load_project_config(dir.path()).unwrap_err();
    assert!(matches!(err, PulldagError::TomlError(_)));

    Ok(())
}

#[test]
fn loads_both_script_forms_in_declared_order() -> TestResult {
    let dir = tempdir()?;
    fs::write(
        dir.path().join(PROJECT_FILE),
        r#"
[remotes]
default = "/mnt/cache"

[[command]]
name = "preprocess"
deps = ["assets/raw.csv"]
outputs = ["corpus.bin"]
script = "python preprocess.py"

[[command]]
name = "train"
deps = ["corpus.bin"]
outputs = ["model.bin", "metrics.json"]
script = ["python train.py", "python evaluate.py"]
"#,
    )?;

    let config = load_project_config(dir.path())?;
    assert_eq!(config.command.len(), 2);

    let preprocess = &config.command[0];
    assert_eq!(preprocess.name, "preprocess");
    assert_eq!(preprocess.deps, vec![PathBuf::from("assets/raw.csv")]);
    assert_eq!(preprocess.script.lines(), ["python preprocess.py"]);

    let train = &config.command[1];
    assert_eq!(train.name, "train");
    assert_eq!(
        train.outputs,
        vec![PathBuf::from("model.bin"), PathBuf::from("metrics.json")]
    );
    assert_eq!(
        train.script.lines(),
        ["python train.py", "python evaluate.py"]
    );

    assert_eq!(config.resolve_remote("default"), "/mnt/cache");

    Ok(())
}

#[test]
fn empty_sections_default_cleanly() -> TestResult {
    let dir = tempdir()?;
    fs::write(dir.path().join(PROJECT_FILE), "")?;

    let config = load_project_config(dir.path())?;
    assert!(config.command.is_empty());
    assert!(config.remotes.is_empty());
    assert_eq!(config.resolve_remote("../cache"), "../cache");

    Ok(())
}

#[test]
fn duplicate_command_names_are_rejected() -> TestResult {
    let dir = tempdir()?;
    fs::write(
        dir.path().join(PROJECT_FILE),
        r#"
[[command]]
name = "build"
script = "make"

[[command]]
name = "build"
script = "make again"
"#,
    )?;

    let err = load_project_config(dir.path()).unwrap_err();
    match err {
        PulldagError::ConfigError(msg) => assert!(msg.contains("duplicate")),
        other => panic!("expected ConfigError, got {other:?}"),
    }

    Ok(())
}

#[test]
fn absolute_paths_are_rejected() -> TestResult {
    let dir = tempdir()?;
    fs::write(
        dir.path().join(PROJECT_FILE),
        r#"
[[command]]
name = "build"
deps = ["/etc/passwd"]
outputs = ["out.bin"]
script = "make"
"#,
    )?;

    let err = load_project_config(dir.path()).unwrap_err();
    assert!(matches!(err, PulldagError::ConfigError(_)));

    Ok(())
}

#[test]
fn empty_remote_address_is_rejected() -> TestResult {
    let raw: RawProjectConfig = toml::from_str(
        r#"
[remotes]
default = ""
"#,
    )?;
    let err = ProjectConfig::try_from(raw).unwrap_err();
    assert!(matches!(err, PulldagError::ConfigError(_)));

    Ok(())
}
