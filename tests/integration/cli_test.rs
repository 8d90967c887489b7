//! Argument parsing and command dispatch

use clap::Parser;
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

use depbuild::cli::{Action, Args, Command};
use depbuild::config::parse_config_file;
use depbuild::BuildError;

#[test]
fn test_cli_args_parsing() {
    let args = Args::parse_from(["depbuild"]);
    assert_eq!(args.action, Action::Analyze);
    assert_eq!(args.path, None);
    assert!(!args.force);
    assert!(!args.auto_build);
    assert!(!args.init);

    let args = Args::parse_from([
        "depbuild",
        "toolchains",
        "--path",
        "/srv/shop",
        "--output-file",
        "toolchains.csv",
        "--output",
        "csv",
        "--verbose",
        "--no-progress",
    ]);
    assert_eq!(args.action, Action::Toolchains);
    assert_eq!(args.path, Some(PathBuf::from("/srv/shop")));
    assert_eq!(args.output_file, Some(PathBuf::from("toolchains.csv")));
    assert!(args.verbose);
    assert!(args.no_progress);
}

#[test]
fn test_init_flag_selects_init_command() {
    let args = Args::parse_from(["depbuild", "--init"]);
    assert!(matches!(Command::from_args(args), Command::Init(_)));

    let args = Args::parse_from(["depbuild", "status"]);
    assert!(matches!(Command::from_args(args), Command::Run(_)));
}

#[test]
fn test_init_writes_config_once() {
    let temp_dir = tempdir().unwrap();
    let path = temp_dir.path().join(".depbuild.toml");

    assert_eq!(Command::Init(path.clone()).run(), 0);
    assert!(parse_config_file(&path).is_ok());

    fs::write(&path, "force = true\n").unwrap();
    assert_eq!(Command::Init(path.clone()).run(), 0);
    assert_eq!(fs::read_to_string(&path).unwrap(), "force = true\n");
}

#[test]
fn test_invalid_path_exits_with_error() {
    let temp_dir = tempdir().unwrap();
    let config = temp_dir.path().join("empty.toml");
    fs::write(&config, "").unwrap();
    let missing = temp_dir.path().join("missing-module");

    let args = Args::parse_from([
        "depbuild",
        "status",
        "--path",
        missing.to_str().unwrap(),
        "--config",
        config.to_str().unwrap(),
    ]);
    let command = Command::from_args(args);

    match command.execute() {
        Err(BuildError::InvalidPath { path }) => assert_eq!(path, missing),
        other => panic!("Expected InvalidPath, got {:?}", other),
    }
    assert_eq!(command.run(), 1);
}

#[test]
fn test_missing_config_file_is_critical() {
    let temp_dir = tempdir().unwrap();
    let args = Args::parse_from([
        "depbuild",
        "status",
        "--path",
        temp_dir.path().to_str().unwrap(),
        "--config",
        "/nonexistent/depbuild/config.toml",
    ]);
    let command = Command::from_args(args);

    assert!(matches!(command.execute(), Err(BuildError::ConfigNotFound { .. })));
    assert_eq!(command.run(), 2);
}

#[test]
fn test_status_writes_report_file() {
    let temp_dir = tempdir().unwrap();
    let module_dir = temp_dir.path().join("shop");
    fs::create_dir_all(module_dir.join("node_modules")).unwrap();
    let config = temp_dir.path().join("empty.toml");
    fs::write(&config, "").unwrap();
    let report = temp_dir.path().join("status.json");

    let args = Args::parse_from([
        "depbuild",
        "status",
        "--path",
        module_dir.to_str().unwrap(),
        "--config",
        config.to_str().unwrap(),
        "--output",
        "json",
        "--output-file",
        report.to_str().unwrap(),
        "--quiet",
    ]);
    assert_eq!(Command::from_args(args).run(), 0);

    let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(&report).unwrap()).unwrap();
    assert_eq!(value["module"], "shop");
    assert_eq!(value["built"], true);
}
