#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::io::Write;
use std::path::PathBuf;

use mars_server::obs::logging::{file_writer, LOG_FILE_NAME};

fn scratch(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("mars-logs-{}-{}", name, std::process::id()))
}

#[test]
fn writes_info_log_in_directory() {
    let dir = scratch("ok");
    let _ = std::fs::remove_dir_all(&dir);

    let (mut writer, guard) = file_writer(&dir).unwrap();
    writer.write_all(b"visit logged\n").unwrap();
    drop(guard); // flushes the worker

    let written = std::fs::read_to_string(dir.join(LOG_FILE_NAME)).unwrap();
    assert!(written.contains("visit logged"));

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn unusable_directory_is_an_error() {
    // A regular file where the directory should be.
    let path = scratch("blocked");
    std::fs::write(&path, b"").unwrap();

    assert!(file_writer(&path).is_err());

    std::fs::remove_file(&path).unwrap();
}
