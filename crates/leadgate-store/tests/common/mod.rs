#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, UNIX_EPOCH};

pub fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../../data")
        .join(name)
}

pub fn write_with_mtime(path: &Path, contents: &str, mtime_secs: u64) {
    fs::write(path, contents).expect("write dataset");
    let file = fs::File::options()
        .write(true)
        .open(path)
        .expect("open dataset");
    file.set_modified(UNIX_EPOCH + Duration::from_secs(mtime_secs))
        .expect("set mtime");
}
