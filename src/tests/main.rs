use super::logger;
use tempfile::TempDir;

#[test]
fn test_interface_without_log_file_has_no_logger() {
    assert!(logger(None, false).unwrap().is_none());
}

#[test]
fn test_json_mode_logs_to_stderr() {
    assert!(logger(None, true).unwrap().is_some());
}

#[test]
fn test_log_file_is_created() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("doccards.log");

    assert!(logger(Some(&path), false).unwrap().is_some());
    assert!(path.exists());
}

#[test]
fn test_unwritable_log_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("missing").join("doccards.log");

    assert!(logger(Some(&path), false).is_err());
}
