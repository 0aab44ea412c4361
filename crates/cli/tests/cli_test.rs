use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn forcecache(root: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_forcecache"))
        .arg("--path")
        .arg(root)
        .args(args)
        .env_remove("FORCECACHE_PATH")
        .env_remove("FORCECACHE_CLEANUP")
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run forcecache")
}

#[test]
fn test_set_get_remove() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();

    let output = forcecache(root, &["set", "GET|host|/a", "hello", "--ttl", "10"]);
    assert!(output.status.success(), "{output:?}");

    let output = forcecache(root, &["get", "GET|host|/a"]);
    assert!(output.status.success());
    assert_eq!(output.stdout, b"hello");

    let output = forcecache(root, &["remove", "GET|host|/a"]);
    assert!(output.status.success());

    let output = forcecache(root, &["get", "GET|host|/a"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
}

#[test]
fn test_locate_prints_shard_path() {
    let temp_dir = TempDir::new().unwrap();
    let output = forcecache(temp_dir.path(), &["locate", "GET|host|/a"]);
    assert!(output.status.success());

    let expected = temp_dir
        .path()
        .join("f3/cf/3e/4a/GET%7Chost%7C%2Fa")
        .display()
        .to_string();
    assert_eq!(String::from_utf8(output.stdout).unwrap().trim_end(), expected);
}

#[test]
fn test_set_from_file() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("cache");
    let body = temp_dir.path().join("body.bin");
    std::fs::write(&body, [0u8, 159, 146, 150]).unwrap();

    let output = forcecache(&root, &["set", "blob", "--file", body.to_str().unwrap()]);
    assert!(output.status.success(), "{output:?}");

    let output = forcecache(&root, &["get", "blob"]);
    assert_eq!(output.stdout, vec![0u8, 159, 146, 150]);
}

#[test]
fn test_inspect_reports_miss_reason() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();

    let output = forcecache(root, &["inspect", "nothing"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stdout).contains("miss (absent)"));

    forcecache(root, &["set", "k", "v"]);
    let output = forcecache(root, &["inspect", "k"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.contains("status:  hit"));
    assert!(stdout.contains("length:  1 bytes"));
}

#[test]
fn test_vacuum_prints_json_report() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();

    let locate = forcecache(root, &["locate", "broken"]);
    let path = String::from_utf8(locate.stdout).unwrap();
    let path = Path::new(path.trim_end());
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, b"abc").unwrap();

    let output = forcecache(root, &["vacuum"]);
    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["corrupt"], 1);
    assert!(!path.exists());
}

#[test]
fn test_zero_ttl_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let output = forcecache(temp_dir.path(), &["set", "k", "v", "--ttl", "0"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("ttl"));
}

#[test]
fn test_zero_cleanup_env_does_not_block_commands() {
    let temp_dir = TempDir::new().unwrap();
    let output = Command::new(env!("CARGO_BIN_EXE_forcecache"))
        .arg("--path")
        .arg(temp_dir.path())
        .args(["set", "k", "v"])
        .env_remove("FORCECACHE_PATH")
        .env("FORCECACHE_CLEANUP", "0")
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run forcecache");
    assert!(output.status.success(), "{output:?}");
}
