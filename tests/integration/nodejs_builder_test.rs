//! Builder behaviour against scripted toolchains and an in-memory file system

use std::sync::Arc;

use depbuild::core::{EventLog, MemoryFileSystem, ScriptedRunner};
use depbuild::{BuildError, Builder, Module, NodeJsBuilder, NodeModule, ToolchainOverrides};

fn module() -> Module {
    Module::new("shop", "/srv/shop", "/srv/shop")
}

fn builder(runner: ScriptedRunner, fs: MemoryFileSystem) -> NodeJsBuilder {
    NodeJsBuilder::new()
        .with_overrides(ToolchainOverrides::default())
        .with_runner(Arc::new(runner))
        .with_filesystem(Arc::new(fs))
}

fn node_and_npm() -> ScriptedRunner {
    ScriptedRunner::new()
        .respond("node -v", "v20.11.1\n")
        .respond("npm -v", "10.2.4\n")
}

#[test]
fn test_env_override_is_tried_first() {
    let runner = ScriptedRunner::new()
        .respond("/opt/node/bin/node -v", "v18.19.0\n")
        .respond("node -v", "v20.11.1\n")
        .respond("npm -v", "10.2.4\n");
    let overrides = ToolchainOverrides {
        node: Some("/opt/node/bin/node".to_string()),
        ..Default::default()
    };
    let mut builder = builder(runner, MemoryFileSystem::new()).with_overrides(overrides);

    builder.initialize().unwrap();

    let node = builder.node().unwrap();
    assert_eq!(node.command, "/opt/node/bin/node");
    assert_eq!(node.version.as_deref(), Some("18.19.0"));
}

#[test]
fn test_node_output_without_v_prefix_is_rejected() {
    let runner = ScriptedRunner::new()
        .respond("node -v", "20.11.1\n")
        .respond("nodejs -v", "v12.22.9\n")
        .respond("npm -v", "10.2.4\n");
    let mut builder = builder(runner, MemoryFileSystem::new());

    builder.initialize().unwrap();
    assert_eq!(builder.node().unwrap().command, "nodejs");
}

#[test]
fn test_short_package_manager_output_is_rejected() {
    let runner = ScriptedRunner::new()
        .respond("node -v", "v20.11.1\n")
        .respond("npm -v", "10\n");
    let mut builder = builder(runner, MemoryFileSystem::new());

    assert!(matches!(builder.initialize(), Err(BuildError::NoPackageManager)));
}

#[test]
fn test_reinitialize_clears_previous_toolchains() {
    let mut builder = builder(
        node_and_npm().respond("yarn -v", "1.22.19\n"),
        MemoryFileSystem::new(),
    );
    builder.initialize().unwrap();
    assert!(builder.yarn().is_some());

    let mut builder = builder.with_runner(Arc::new(node_and_npm()));
    builder.initialize().unwrap();
    assert!(builder.yarn().is_none());
}

#[test]
fn test_lockfile_selects_yarn() {
    let runner = Arc::new(
        node_and_npm()
            .respond("yarn -v", "1.22.19\n")
            .respond("yarn install --production --frozen-lockfile", ""),
    );
    let fs = MemoryFileSystem::new();
    fs.add_file("/srv/shop/yarn.lock", "# yarn lockfile v1\n");

    let mut builder = builder(ScriptedRunner::new(), fs).with_runner(runner.clone());
    builder.initialize().unwrap();
    builder.build(&module(), false).unwrap();

    assert_eq!(
        runner.calls().last().map(String::as_str),
        Some("yarn install --production --frozen-lockfile")
    );
}

#[test]
fn test_lockfile_without_yarn_fails_without_npm_fallback() {
    let runner = Arc::new(node_and_npm());
    let fs = MemoryFileSystem::new();
    fs.add_file("/srv/shop/yarn.lock", "");

    let mut builder = builder(ScriptedRunner::new(), fs).with_runner(runner.clone());
    builder.initialize().unwrap();

    let err = builder.build(&module(), false).unwrap_err();
    assert!(matches!(err, BuildError::LockfileWithoutToolchain { .. }));
    assert!(err.to_string().contains("$YARN_BINARY"));
    assert!(!runner.calls().iter().any(|call| call.contains("install")));
}

#[test]
fn test_npm_install_without_lockfile() {
    let runner = Arc::new(node_and_npm().respond("npm install --production", "added 2 packages\n"));

    let mut builder = builder(ScriptedRunner::new(), MemoryFileSystem::new()).with_runner(runner.clone());
    builder.initialize().unwrap();
    builder.build(&module(), false).unwrap();

    assert_eq!(
        runner.calls().last().map(String::as_str),
        Some("npm install --production")
    );
}

#[test]
fn test_install_failure_carries_stderr() {
    let runner = node_and_npm().fail("npm install --production", 1, "npm ERR! code E404\n");
    let mut builder = builder(runner, MemoryFileSystem::new());
    builder.initialize().unwrap();

    match builder.build(&module(), false) {
        Err(BuildError::CommandFailed { command, status, stderr }) => {
            assert_eq!(command, "npm install --production");
            assert_eq!(status, Some(1));
            assert_eq!(stderr, "npm ERR! code E404");
        }
        other => panic!("Expected CommandFailed, got {:?}", other),
    }
}

#[test]
fn test_force_on_clean_module_still_installs() {
    let events = EventLog::new();
    let runner = node_and_npm()
        .respond("npm install --production", "")
        .with_events(events.clone());
    let fs = MemoryFileSystem::new().with_events(events.clone());

    let mut builder = builder(runner, fs);
    builder.initialize().unwrap();
    builder.build(&module(), true).unwrap();

    assert_eq!(
        events.entries().last().map(String::as_str),
        Some("run npm install --production in /srv/shop")
    );
}

#[test]
fn test_failed_clean_skips_install() {
    let events = EventLog::new();
    let runner = node_and_npm()
        .respond("npm install --production", "")
        .with_events(events.clone());
    let fs = MemoryFileSystem::new().with_events(events.clone()).failing_removal();
    fs.add_file("/srv/shop/node_modules/ms/package.json", "{}");

    let mut builder = builder(runner, fs);
    builder.initialize().unwrap();

    assert!(matches!(
        builder.build(&module(), true),
        Err(BuildError::CleanFailed { .. })
    ));
    assert!(!events.entries().iter().any(|entry| entry.contains("install")));
}

#[test]
fn test_is_built_tracks_node_modules() {
    let fs = Arc::new(MemoryFileSystem::new());
    let builder = builder(ScriptedRunner::new(), MemoryFileSystem::new()).with_filesystem(fs.clone());

    assert!(!builder.is_built(&module(), false).unwrap());
    fs.add_dir("/srv/shop/node_modules");
    assert!(builder.is_built(&module(), false).unwrap());
}

#[test]
fn test_analyze_matches_only_direct_children_of_node_modules() {
    let fs = MemoryFileSystem::new();
    fs.add_file(
        "/srv/shop/node_modules/lodash/package.json",
        r#"{"name":"lodash","version":"4.17.0"}"#,
    );
    fs.add_file(
        "/srv/shop/node_modules/lodash/node_modules/ms/package.json",
        r#"{"name":"ms","version":"2.0.0"}"#,
    );
    fs.add_file(
        "/srv/shop/node_modules/@babel/core/package.json",
        r#"{"name":"@babel/core","version":"7.24.0"}"#,
    );
    fs.add_file("/srv/shop/package.json", r#"{"name":"shop","version":"1.0.0"}"#);

    let builder = builder(ScriptedRunner::new(), fs);
    let mut deps = builder.analyze_modules(&module()).unwrap();
    deps.sort();

    assert_eq!(
        deps,
        vec![NodeModule::new("lodash", "4.17.0"), NodeModule::new("ms", "2.0.0")]
    );
}

#[test]
fn test_analyze_with_thread_pool_skips_bad_manifests() {
    let fs = MemoryFileSystem::new();
    for index in 0..40 {
        fs.add_file(
            format!("/srv/shop/node_modules/pkg-{}/package.json", index),
            format!(r#"{{"name":"pkg-{}","version":"1.0.{}"}}"#, index, index),
        );
    }
    fs.add_file("/srv/shop/node_modules/broken/package.json", "{");
    fs.add_file("/srv/shop/node_modules/nameless/package.json", r#"{"version":"1.0.0"}"#);
    fs.add_unreadable_file("/srv/shop/node_modules/locked/package.json");

    let builder = builder(ScriptedRunner::new(), fs).with_threads(4).unwrap();
    let deps = builder.analyze(&module(), false).unwrap();

    assert_eq!(deps.len(), 40);
    assert!(deps.iter().all(|dep| dep.fetcher() == "npm"));
    assert!(deps.iter().any(|dep| dep.locator() == "npm+pkg-7$1.0.7"));
}

#[test]
fn test_analyze_empty_module() {
    let builder = builder(ScriptedRunner::new(), MemoryFileSystem::new());
    assert!(builder.analyze(&module(), true).unwrap().is_empty());
}

#[test]
fn test_zero_threads_is_rejected() {
    let result = builder(ScriptedRunner::new(), MemoryFileSystem::new()).with_threads(0);
    assert!(matches!(result, Err(BuildError::ParallelExecution { .. })));
}

#[test]
fn test_scan_failure_aborts_analyze_before_any_read() {
    let events = EventLog::new();
    let fs = MemoryFileSystem::new().with_events(events.clone()).failing_glob();
    fs.add_file(
        "/srv/shop/node_modules/ms/package.json",
        r#"{"name":"ms","version":"2.1.3"}"#,
    );

    let builder = builder(ScriptedRunner::new(), fs);

    match builder.analyze_modules(&module()) {
        Err(err) => assert!(!err.is_critical()),
        Ok(deps) => panic!("Expected a scan error, got {:?}", deps),
    }
    assert!(!events.entries().iter().any(|entry| entry.starts_with("read ")));
}
