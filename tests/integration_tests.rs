use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use std::fs;

mod common;
use common::{init_db, rrt, setup_test_db, temp_out, track_run};

/// Two points ~98 m apart in Berlin, used across the CLI tests.
const BERLIN_A: &str = "52.5200,13.4050";
const BERLIN_B: &str = "52.5190,13.4060";

#[test]
fn test_init_creates_database() {
    let db_path = setup_test_db("init");

    rrt()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success()
        .stdout(contains("Initialization complete."));

    assert!(fs::metadata(&db_path).is_ok());
}

#[test]
fn test_track_scripted_run() {
    let db_path = setup_test_db("track_scripted");
    init_db(&db_path);

    rrt()
        .args([
            "--db",
            &db_path,
            "--test",
            "track",
            "--start-at",
            BERLIN_A,
            "--end-at",
            BERLIN_B,
            "--notes",
            "morning loop",
        ])
        .assert()
        .success()
        .stdout(contains("Run in progress"))
        .stdout(contains("Run #1 saved"))
        .stdout(contains("98 m"));
}

#[test]
fn test_track_interactive_run() {
    let db_path = setup_test_db("track_interactive");
    init_db(&db_path);

    // start fix, Enter to stop, end fix
    rrt()
        .args(["--db", &db_path, "--test", "track"])
        .write_stdin("52.5200,13.4050\n\n52.5190,13.4060\n")
        .assert()
        .success()
        .stdout(contains("Run #1 saved"));
}

#[test]
fn test_track_interactive_start_failure_leaves_no_record() {
    let db_path = setup_test_db("track_start_fail");
    init_db(&db_path);

    // Malformed position → acquisition failure, session back to Idle
    rrt()
        .args(["--db", &db_path, "--test", "track"])
        .write_stdin("somewhere\n")
        .assert()
        .failure()
        .stdout(contains("Start fix failed"));

    rrt()
        .args(["--db", &db_path, "--test", "list"])
        .assert()
        .success()
        .stdout(contains("No runs found."));
}

#[test]
fn test_track_rejects_out_of_range_coordinates() {
    let db_path = setup_test_db("track_bad_coords");
    init_db(&db_path);

    rrt()
        .args([
            "--db", &db_path, "--test", "track", "--start-at", "200.0,10.0", "--end-at", BERLIN_B,
        ])
        .assert()
        .failure()
        .stderr(contains("Invalid coordinate"));
}

#[test]
fn test_track_requires_both_scripted_fixes() {
    let db_path = setup_test_db("track_half_scripted");
    init_db(&db_path);

    rrt()
        .args(["--db", &db_path, "--test", "track", "--start-at", BERLIN_A])
        .assert()
        .failure()
        .stderr(contains("must be given together"));
}

#[test]
fn test_list_shows_tracked_runs() {
    let db_path = setup_test_db("list_runs");
    init_db(&db_path);
    track_run(&db_path, BERLIN_A, BERLIN_B, "morning loop");
    track_run(&db_path, BERLIN_B, BERLIN_A, "evening loop");

    rrt()
        .args(["--db", &db_path, "--test", "list"])
        .assert()
        .success()
        .stdout(contains("morning loop"))
        .stdout(contains("evening loop"))
        .stdout(contains("98 m"));
}

#[test]
fn test_list_period_filters_out_other_years() {
    let db_path = setup_test_db("list_period");
    init_db(&db_path);
    track_run(&db_path, BERLIN_A, BERLIN_B, "now");

    // Runs are recorded "now", so an old year must be empty
    rrt()
        .args(["--db", &db_path, "--test", "list", "--period", "2020"])
        .assert()
        .success()
        .stdout(contains("No runs found."));
}

#[test]
fn test_list_invalid_period() {
    let db_path = setup_test_db("list_bad_period");
    init_db(&db_path);

    rrt()
        .args(["--db", &db_path, "--test", "list", "--period", "2025-9"])
        .assert()
        .failure()
        .stderr(contains("Invalid period"));
}

#[test]
fn test_stats_aggregates() {
    let db_path = setup_test_db("stats");
    init_db(&db_path);

    rrt()
        .args(["--db", &db_path, "--test", "stats"])
        .assert()
        .success()
        .stdout(contains("Runs:"))
        .stdout(contains("0"));

    track_run(&db_path, BERLIN_A, BERLIN_B, "");

    rrt()
        .args(["--db", &db_path, "--test", "stats"])
        .assert()
        .success()
        .stdout(contains("Runs:"))
        .stdout(contains("Total distance:"))
        .stdout(contains("98 m"));
}

#[test]
fn test_delete_run_by_id() {
    let db_path = setup_test_db("del_by_id");
    init_db(&db_path);
    track_run(&db_path, BERLIN_A, BERLIN_B, "");

    rrt()
        .args(["--db", &db_path, "--test", "del", "--id", "1"])
        .write_stdin("y\n")
        .assert()
        .success()
        .stdout(contains("Deleted 1 run(s)."));

    rrt()
        .args(["--db", &db_path, "--test", "list"])
        .assert()
        .success()
        .stdout(contains("No runs found."));
}

#[test]
fn test_delete_nonexistent_run() {
    let db_path = setup_test_db("del_missing");
    init_db(&db_path);

    rrt()
        .args(["--db", &db_path, "--test", "del", "--id", "42"])
        .write_stdin("y\n")
        .assert()
        .failure()
        .stderr(contains("Run not found"));
}

#[test]
fn test_delete_all_resets_aggregates() {
    let db_path = setup_test_db("del_all");
    init_db(&db_path);
    track_run(&db_path, BERLIN_A, BERLIN_B, "");
    track_run(&db_path, BERLIN_B, BERLIN_A, "");

    rrt()
        .args(["--db", &db_path, "--test", "del", "--all"])
        .write_stdin("y\n")
        .assert()
        .success()
        .stdout(contains("Deleted 2 run(s)."));

    rrt()
        .args(["--db", &db_path, "--test", "stats"])
        .assert()
        .success()
        .stdout(contains("0 m"));
}

#[test]
fn test_delete_cancelled_keeps_runs() {
    let db_path = setup_test_db("del_cancel");
    init_db(&db_path);
    track_run(&db_path, BERLIN_A, BERLIN_B, "keeper");

    rrt()
        .args(["--db", &db_path, "--test", "del", "--all"])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(contains("Operation cancelled."));

    rrt()
        .args(["--db", &db_path, "--test", "list"])
        .assert()
        .success()
        .stdout(contains("keeper"));
}

#[test]
fn test_export_csv_and_json() {
    let db_path = setup_test_db("export");
    init_db(&db_path);
    track_run(&db_path, BERLIN_A, BERLIN_B, "exported");

    let csv_path = temp_out("export_csv", "csv");
    rrt()
        .args([
            "--db", &db_path, "--test", "export", "--format", "csv", "--file", &csv_path,
        ])
        .assert()
        .success()
        .stdout(contains("Exported 1 run(s)"));

    let content = fs::read_to_string(&csv_path).expect("read csv");
    assert!(content.contains("start_lat"));
    assert!(content.contains("52.52"));
    assert!(content.contains("exported"));

    let json_path = temp_out("export_json", "json");
    rrt()
        .args([
            "--db", &db_path, "--test", "export", "--format", "json", "--file", &json_path,
        ])
        .assert()
        .success();

    let content = fs::read_to_string(&json_path).expect("read json");
    assert!(content.contains("\"distance_m\""));
    assert!(content.contains("\"notes\": \"exported\""));
}

#[test]
fn test_export_respects_overwrite_guard() {
    let db_path = setup_test_db("export_guard");
    init_db(&db_path);
    track_run(&db_path, BERLIN_A, BERLIN_B, "");

    let out = temp_out("export_guard", "csv");
    fs::write(&out, "keep me").expect("seed file");

    rrt()
        .args([
            "--db", &db_path, "--test", "export", "--format", "csv", "--file", &out,
        ])
        .assert()
        .failure()
        .stderr(contains("already exists"));

    // --force overwrites
    rrt()
        .args([
            "--db", &db_path, "--test", "export", "--format", "csv", "--file", &out, "--force",
        ])
        .assert()
        .success();

    let content = fs::read_to_string(&out).expect("read csv");
    assert!(content.contains("start_lat"));
}

#[test]
fn test_backup_plain_and_compressed() {
    let db_path = setup_test_db("backup");
    init_db(&db_path);
    track_run(&db_path, BERLIN_A, BERLIN_B, "");

    let plain = temp_out("backup_plain", "sqlite");
    rrt()
        .args(["--db", &db_path, "--test", "backup", "--file", &plain])
        .assert()
        .success()
        .stdout(contains("Backup created"));
    assert!(fs::metadata(&plain).is_ok());

    let to_compress = temp_out("backup_zip", "sqlite");
    rrt()
        .args([
            "--db",
            &db_path,
            "--test",
            "backup",
            "--file",
            &to_compress,
            "--compress",
        ])
        .assert()
        .success()
        .stdout(contains("Compressed"));

    let zipped = std::path::Path::new(&to_compress).with_extension("zip");
    assert!(zipped.exists());
}

#[test]
fn test_log_records_operations() {
    let db_path = setup_test_db("log_ops");
    init_db(&db_path);
    track_run(&db_path, BERLIN_A, BERLIN_B, "");

    rrt()
        .args(["--db", &db_path, "--test", "log", "--print"])
        .assert()
        .success()
        .stdout(contains("init"))
        .stdout(contains("track"));
}

#[test]
fn test_db_info_and_check() {
    let db_path = setup_test_db("db_info");
    init_db(&db_path);
    track_run(&db_path, BERLIN_A, BERLIN_B, "");

    rrt()
        .args(["--db", &db_path, "--test", "db", "--info"])
        .assert()
        .success()
        .stdout(contains("Total runs:"))
        .stdout(contains("Date range:"));

    rrt()
        .args(["--db", &db_path, "--test", "db", "--check"])
        .assert()
        .success()
        .stdout(contains("integrity check passed").or(contains("Integrity check")));
}
