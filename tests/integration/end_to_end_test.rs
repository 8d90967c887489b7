//! Full build-then-analyze runs on real directories

use std::fs;
use std::io;
use std::path::Path;
use std::sync::Arc;
use tempfile::tempdir;

use depbuild::cli::{perform, Action};
use depbuild::core::{CommandOutput, CommandRunner, EventLog, RealFileSystem};
use depbuild::output::ReportView;
use depbuild::{Builder, Module, NodeJsBuilder, Settings, ToolchainOverrides};

/// Answers version probes and fakes an install by writing manifests
struct FakeInstaller {
    packages: Vec<(&'static str, &'static str)>,
    events: EventLog,
}

impl CommandRunner for FakeInstaller {
    fn run(&self, program: &str, args: &[&str], dir: Option<&Path>) -> io::Result<CommandOutput> {
        self.events.record(format!("{} {}", program, args.join(" ")));
        match (program, args) {
            ("node", ["-v"]) => Ok(CommandOutput::ok("v20.11.1\n")),
            ("npm", ["-v"]) => Ok(CommandOutput::ok("10.2.4\n")),
            ("npm", ["install", "--production"]) => {
                let dir = dir.ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "no dir"))?;
                for (name, version) in &self.packages {
                    let package_dir = dir.join("node_modules").join(name);
                    fs::create_dir_all(&package_dir)?;
                    fs::write(
                        package_dir.join("package.json"),
                        format!(r#"{{"name":"{}","version":"{}"}}"#, name, version),
                    )?;
                }
                Ok(CommandOutput::ok(""))
            }
            _ => Err(io::Error::new(io::ErrorKind::NotFound, "not installed")),
        }
    }
}

fn installer(events: &EventLog) -> Arc<FakeInstaller> {
    Arc::new(FakeInstaller {
        packages: vec![("lodash", "4.17.0"), ("left-pad", "1.3.0")],
        events: events.clone(),
    })
}

fn create_module(dir: &Path) {
    fs::create_dir_all(dir).unwrap();
    fs::write(
        dir.join("package.json"),
        r#"{"name":"shop","version":"1.0.0","dependencies":{"lodash":"^4.17.0","left-pad":"^1.3.0"}}"#,
    )
    .unwrap();
}

#[test]
fn test_build_then_analyze() {
    let temp_dir = tempdir().unwrap();
    let dir = temp_dir.path().join("shop");
    create_module(&dir);
    let events = EventLog::new();

    let mut builder = NodeJsBuilder::new()
        .with_overrides(ToolchainOverrides::default())
        .with_runner(installer(&events))
        .with_filesystem(Arc::new(RealFileSystem));
    let module = Module::from_dir(&dir);
    assert_eq!(module.name, "shop");

    builder.initialize().unwrap();
    assert!(!builder.is_built(&module, false).unwrap());

    builder.build(&module, false).unwrap();
    assert!(builder.is_built(&module, false).unwrap());

    let mut locators: Vec<String> = builder
        .analyze(&module, false)
        .unwrap()
        .iter()
        .map(|dep| dep.locator())
        .collect();
    locators.sort();
    assert_eq!(locators, vec!["npm+left-pad$1.3.0", "npm+lodash$4.17.0"]);
}

#[test]
fn test_forced_rebuild_drops_stale_packages() {
    let temp_dir = tempdir().unwrap();
    let dir = temp_dir.path().join("shop");
    create_module(&dir);
    let stale = dir.join("node_modules").join("request");
    fs::create_dir_all(&stale).unwrap();
    fs::write(stale.join("package.json"), r#"{"name":"request","version":"2.88.2"}"#).unwrap();

    let events = EventLog::new();
    let mut builder = NodeJsBuilder::new()
        .with_overrides(ToolchainOverrides::default())
        .with_runner(installer(&events));
    let module = Module::from_dir(&dir);

    builder.initialize().unwrap();
    builder.build(&module, true).unwrap();

    let packages: Vec<String> = builder
        .analyze_modules(&module)
        .unwrap()
        .into_iter()
        .map(|dep| dep.name)
        .collect();
    assert!(!packages.contains(&"request".to_string()));
    assert_eq!(packages.len(), 2);
}

#[test]
fn test_analyze_action_auto_builds() {
    let temp_dir = tempdir().unwrap();
    let dir = temp_dir.path().join("shop");
    create_module(&dir);
    let events = EventLog::new();

    let mut builder = NodeJsBuilder::new()
        .with_overrides(ToolchainOverrides::default())
        .with_runner(installer(&events));
    let settings = Settings {
        module_path: dir.clone(),
        auto_build: true,
        show_progress: false,
        ..Settings::default()
    };

    let (report, view) = perform(Action::Analyze, &settings, &mut builder).unwrap();

    assert_eq!(view, ReportView::Dependencies);
    assert!(report.built);
    assert_eq!(report.module, "shop");
    assert_eq!(report.dependencies[0].package, "left-pad");
    assert_eq!(report.toolchains.len(), 2);
    assert!(events
        .entries()
        .contains(&"npm install --production".to_string()));

    // A second run finds the install and does not build again
    let installs_before = events.entries().len();
    perform(Action::Analyze, &settings, &mut builder).unwrap();
    assert_eq!(events.entries().len(), installs_before);
}

#[cfg(unix)]
#[test]
fn test_system_toolchains_from_overrides() {
    use depbuild::core::SystemRunner;
    use std::os::unix::fs::PermissionsExt;

    let temp_dir = tempdir().unwrap();
    let bin = temp_dir.path().join("bin");
    fs::create_dir_all(&bin).unwrap();

    let write_script = |name: &str, body: &str| {
        let path = bin.join(name);
        fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path.to_string_lossy().into_owned()
    };
    let node = write_script("node", "echo v20.11.1");
    let npm = write_script(
        "npm",
        r#"if [ "$1" = "-v" ]; then echo 10.2.4; exit 0; fi
mkdir -p node_modules/left-pad
printf '{"name":"left-pad","version":"1.3.0"}' > node_modules/left-pad/package.json"#,
    );

    let dir = temp_dir.path().join("shop");
    create_module(&dir);

    let mut builder = NodeJsBuilder::new()
        .with_runner(Arc::new(SystemRunner))
        .with_overrides(ToolchainOverrides {
            node: Some(node.clone()),
            npm: Some(npm.clone()),
            yarn: None,
        });
    builder.initialize().unwrap();
    assert_eq!(builder.node().unwrap().command, node);
    assert_eq!(builder.npm().unwrap().version.as_deref(), Some("10.2.4"));

    let module = Module::from_dir(&dir);
    builder.build(&module, false).unwrap();

    let deps = builder.analyze(&module, false).unwrap();
    assert_eq!(deps.len(), 1);
    assert_eq!(deps[0].locator(), "npm+left-pad$1.3.0");
}
