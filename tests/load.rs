//! File-loading behavior: snapshots, merging, and error surfacing.

use envful::{EnvError, EnvLoader, EnvTable, MemoryEnv, read_env_file};
use serial_test::serial;
use tempfile::TempDir;

fn write_file(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).unwrap();
    path
}

#[test]
fn loads_quoted_values() {
    let tmp = TempDir::new().unwrap();
    let path = write_file(&tmp, ".env", "KEY1=\"VALUE1\"\nKEY2=\"VALUE2\"\n");

    let vars = read_env_file(&path).unwrap();
    assert_eq!(vars.len(), 2);
    assert_eq!(vars["KEY1"], "VALUE1");
    assert_eq!(vars["KEY2"], "VALUE2");
}

#[test]
fn skips_comment_and_blank_lines() {
    let tmp = TempDir::new().unwrap();
    let path = write_file(&tmp, ".env", "# comment\nKEY1=VALUE1\n\n# another\n");

    let vars = read_env_file(&path).unwrap();
    assert_eq!(vars.len(), 1);
    assert_eq!(vars["KEY1"], "VALUE1");
}

#[test]
fn empty_file_loads_empty_mapping() {
    let tmp = TempDir::new().unwrap();
    let path = write_file(&tmp, ".env", "");

    let vars = read_env_file(&path).unwrap();
    assert!(vars.is_empty());
}

#[test]
fn missing_file_is_an_io_error() {
    let tmp = TempDir::new().unwrap();
    let err = read_env_file(tmp.path().join("nope.env")).unwrap_err();
    match err {
        EnvError::Io { path, .. } => assert!(path.ends_with("nope.env")),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn duplicate_keys_keep_last() {
    let tmp = TempDir::new().unwrap();
    let path = write_file(&tmp, ".env", "A=first\nA=second\n");

    let vars = read_env_file(&path).unwrap();
    assert_eq!(vars.len(), 1);
    assert_eq!(vars["A"], "second");
}

#[test]
fn malformed_lines_are_dropped_silently() {
    let tmp = TempDir::new().unwrap();
    let path = write_file(&tmp, ".env", "export A=1\ngarbage line\n-BAD=2\nB=2\n");

    let vars = read_env_file(&path).unwrap();
    assert_eq!(vars.len(), 2);
    assert_eq!(vars["A"], "1");
    assert_eq!(vars["B"], "2");
}

#[test]
fn later_files_override_earlier_ones() {
    let tmp = TempDir::new().unwrap();
    let base = write_file(&tmp, "base.env", "A=1\nB=1\n");
    let overlay = write_file(&tmp, "overlay.env", "B=2\nC=3\n");

    let mut loader = EnvLoader::with_table(MemoryEnv::new());
    loader.load_files(vec![base, overlay]).unwrap();

    let table = loader.table();
    assert_eq!(table.get("A"), Some("1".to_string()));
    assert_eq!(table.get("B"), Some("2".to_string()));
    assert_eq!(table.get("C"), Some("3".to_string()));
}

#[test]
fn unreadable_file_applies_nothing() {
    let tmp = TempDir::new().unwrap();
    let readable = write_file(&tmp, "base.env", "A=1\n");
    let missing = tmp.path().join("missing.env");

    let mut loader = EnvLoader::with_table(MemoryEnv::new());
    let err = loader.load_files(vec![readable, missing]).unwrap_err();
    assert!(matches!(err, EnvError::Io { .. }));
    assert!(loader.table().is_empty());
}

#[test]
#[serial]
fn load_reads_the_default_env_file() {
    let tmp = TempDir::new().unwrap();
    write_file(&tmp, ".env", "FROM_DEFAULT=yes\n");

    let old_dir = std::env::current_dir().unwrap();
    std::env::set_current_dir(tmp.path()).unwrap();
    let mut loader = EnvLoader::with_table(MemoryEnv::new());
    let result = loader.load();
    std::env::set_current_dir(old_dir).unwrap();

    result.unwrap();
    assert_eq!(loader.table().get("FROM_DEFAULT"), Some("yes".to_string()));
}
