//! SQLite store tests: CRUD, ordering, calendar lookup, aggregates and
//! the reactive watch channels.

use chrono::{Duration, Local};
use rruntracker::db::store::{RunStore, SqliteRunStore};
use rruntracker::models::fix::Fix;
use rruntracker::models::run_record::RunRecord;

fn fix(lat: f64, lon: f64) -> Fix {
    Fix::new(lat, lon).expect("valid fix")
}

/// A run along the equator: `meters` east of the origin, ended now.
fn run_of_meters(meters: f64, minutes_ago: i64, notes: &str) -> RunRecord {
    // 1 degree of longitude on the equator ≈ 111.19 km (haversine)
    let deg = meters / 111_194.93;
    let ended_at = Local::now() - Duration::minutes(minutes_ago);
    let started_at = ended_at - Duration::minutes(30);
    RunRecord::from_fixes(fix(0.0, 0.0), fix(0.0, deg), started_at, ended_at, notes)
        .expect("valid record")
}

#[test]
fn insert_assigns_monotonic_ids() {
    let store = SqliteRunStore::open_in_memory().expect("store");

    let id1 = store.insert(&run_of_meters(100.0, 60, "")).expect("insert");
    let id2 = store.insert(&run_of_meters(300.0, 30, "")).expect("insert");

    assert_eq!(id1, 1);
    assert_eq!(id2, 2);
}

#[test]
fn get_by_id_roundtrip() {
    let store = SqliteRunStore::open_in_memory().expect("store");
    let record = run_of_meters(250.0, 10, "roundtrip");

    let id = store.insert(&record).expect("insert");
    let loaded = store.get_by_id(id).expect("query").expect("present");

    assert_eq!(loaded.id, id);
    assert_eq!(loaded.notes, "roundtrip");
    assert!((loaded.distance_m - record.distance_m).abs() < 1e-9);
    assert_eq!(loaded.duration_ms, record.duration_ms);
    assert_eq!(loaded.start, record.start);
    assert_eq!(loaded.end, record.end);

    assert!(store.get_by_id(999).expect("query").is_none());
}

#[test]
fn get_all_is_newest_first() {
    let store = SqliteRunStore::open_in_memory().expect("store");

    store.insert(&run_of_meters(100.0, 120, "oldest")).expect("insert");
    store.insert(&run_of_meters(100.0, 10, "newest")).expect("insert");
    store.insert(&run_of_meters(100.0, 60, "middle")).expect("insert");

    let all = store.get_all().expect("history");
    let notes: Vec<&str> = all.iter().map(|r| r.notes.as_str()).collect();
    assert_eq!(notes, vec!["newest", "middle", "oldest"]);
}

#[test]
fn runs_for_date_matches_local_calendar_date() {
    let store = SqliteRunStore::open_in_memory().expect("store");
    let record = run_of_meters(100.0, 10, "today");
    store.insert(&record).expect("insert");

    let today = record.started_at.date_naive();
    let hits = store.runs_for_date(today).expect("query");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].notes, "today");

    let none = store
        .runs_for_date(today - Duration::days(1))
        .expect("query");
    assert!(none.is_empty());
}

#[test]
fn aggregates_over_empty_table_are_zero() {
    let store = SqliteRunStore::open_in_memory().expect("store");

    let aggregates = store.aggregates().expect("aggregates");
    assert_eq!(aggregates.count, 0);
    assert_eq!(aggregates.total_distance_m, 0.0);
    assert_eq!(aggregates.average_distance_m, 0.0);
    assert_eq!(aggregates.total_duration_ms, 0);
}

#[test]
fn average_of_two_runs_is_their_midpoint() {
    let store = SqliteRunStore::open_in_memory().expect("store");

    let short = run_of_meters(100.0, 60, "");
    let long = run_of_meters(300.0, 30, "");
    store.insert(&short).expect("insert");
    store.insert(&long).expect("insert");

    let aggregates = store.aggregates().expect("aggregates");
    assert_eq!(aggregates.count, 2);

    let expected_total = short.distance_m + long.distance_m;
    let expected_avg = expected_total / 2.0;
    assert!((aggregates.total_distance_m - expected_total).abs() < 1e-6);
    assert!((aggregates.average_distance_m - expected_avg).abs() < 1e-6);
    // ~100 m and ~300 m apart → average ~200 m
    assert!((expected_avg - 200.0).abs() < 1.0);
}

#[test]
fn delete_and_delete_all() {
    let store = SqliteRunStore::open_in_memory().expect("store");

    let id = store.insert(&run_of_meters(100.0, 60, "")).expect("insert");
    store.insert(&run_of_meters(300.0, 30, "")).expect("insert");

    assert!(store.delete(id).expect("delete"));
    assert!(!store.delete(id).expect("second delete is a no-op"));
    assert_eq!(store.aggregates().expect("aggregates").count, 1);

    assert_eq!(store.delete_all().expect("delete all"), 1);
    let aggregates = store.aggregates().expect("aggregates");
    assert_eq!(aggregates.count, 0);
    assert_eq!(aggregates.total_distance_m, 0.0);
}

#[test]
fn watch_channels_follow_committed_writes() {
    let store = SqliteRunStore::open_in_memory().expect("store");
    let history_rx = store.history_watch();
    let aggregates_rx = store.aggregates_watch();

    assert!(history_rx.borrow().is_empty());
    assert_eq!(aggregates_rx.borrow().count, 0);

    store.insert(&run_of_meters(100.0, 60, "first")).expect("insert");

    // each committed write republishes both views
    assert_eq!(history_rx.borrow().len(), 1);
    assert_eq!(history_rx.borrow()[0].notes, "first");
    assert_eq!(aggregates_rx.borrow().count, 1);

    store.delete_all().expect("delete all");
    assert!(history_rx.borrow().is_empty());
    assert_eq!(aggregates_rx.borrow().count, 0);
}

#[test]
fn two_subscribers_see_the_same_value() {
    let store = SqliteRunStore::open_in_memory().expect("store");
    let rx1 = store.aggregates_watch();
    let rx2 = store.aggregates_watch();

    store.insert(&run_of_meters(500.0, 5, "")).expect("insert");

    assert_eq!(rx1.borrow().count, 1);
    assert_eq!(*rx1.borrow(), *rx2.borrow());
}

#[test]
fn record_constructor_rejects_negative_duration() {
    let now = Local::now();
    let earlier = now - Duration::minutes(5);
    let res = RunRecord::from_fixes(fix(0.0, 0.0), fix(0.0, 0.001), now, earlier, "");
    assert!(res.is_err());
}
