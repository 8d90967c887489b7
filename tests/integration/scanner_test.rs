//! Manifest discovery on a real directory tree

use std::fs;
use std::path::Path;
use tempfile::tempdir;

use depbuild::core::scanner::scan;
use depbuild::core::RealFileSystem;

fn write_manifest(dir: &Path, name: &str, version: &str) {
    fs::create_dir_all(dir).unwrap();
    fs::write(
        dir.join("package.json"),
        format!(r#"{{"name":"{}","version":"{}"}}"#, name, version),
    )
    .unwrap();
}

#[test]
fn test_scan_finds_nested_installs() {
    let temp_dir = tempdir().unwrap();
    let root = temp_dir.path();
    write_manifest(root, "shop", "1.0.0");
    write_manifest(&root.join("node_modules/lodash"), "lodash", "4.17.0");
    write_manifest(&root.join("node_modules/left-pad"), "left-pad", "1.3.0");
    write_manifest(
        &root.join("node_modules/lodash/node_modules/ms"),
        "ms",
        "2.0.0",
    );
    // Scoped packages sit one level deeper and are not matched
    write_manifest(&root.join("node_modules/@types/node"), "@types/node", "20.11.0");
    // A directory without a manifest is ignored
    fs::create_dir_all(root.join("node_modules/.bin")).unwrap();

    let mut found = scan(&RealFileSystem, root).unwrap();
    found.sort();

    let relative: Vec<String> = found
        .iter()
        .map(|path| {
            path.strip_prefix(root)
                .unwrap()
                .to_string_lossy()
                .replace('\\', "/")
        })
        .collect();
    assert_eq!(
        relative,
        vec![
            "node_modules/left-pad/package.json",
            "node_modules/lodash/node_modules/ms/package.json",
            "node_modules/lodash/package.json",
        ]
    );
}

#[test]
fn test_scan_without_node_modules_is_empty() {
    let temp_dir = tempdir().unwrap();
    write_manifest(temp_dir.path(), "shop", "1.0.0");

    assert!(scan(&RealFileSystem, temp_dir.path()).unwrap().is_empty());
}

#[test]
fn test_scan_root_with_glob_metacharacters() {
    let temp_dir = tempdir().unwrap();
    let root = temp_dir.path().join("app [v2]");
    write_manifest(&root.join("node_modules/ms"), "ms", "2.1.3");

    let found = scan(&RealFileSystem, &root).unwrap();
    assert_eq!(found.len(), 1);
    assert!(found[0].ends_with("node_modules/ms/package.json"));
}
