#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn rrt() -> Command {
    cargo_bin_cmd!("rruntracker")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rruntracker.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Initialize the DB schema via the CLI
pub fn init_db(db_path: &str) {
    rrt()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();
}

/// Record one scripted run between the two fixes
pub fn track_run(db_path: &str, start_at: &str, end_at: &str, notes: &str) {
    rrt()
        .args([
            "--db", db_path, "--test", "track", "--start-at", start_at, "--end-at", end_at,
            "--notes", notes,
        ])
        .assert()
        .success();
}
