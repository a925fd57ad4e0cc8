use crate::ui::messages::{success, warning};
use rusqlite::{Connection, Error, OptionalExtension, Result};

/// Ensure that the `log` table exists with the modern schema.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

/// Check if the `runs` table exists.
fn runs_table_exists(conn: &Connection) -> Result<bool> {
    let mut stmt =
        conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name='runs'")?;
    let exists: Option<String> = stmt.query_row([], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

/// Check if the `runs` table has a `notes` column.
fn runs_has_notes_column(conn: &Connection) -> Result<bool> {
    let mut stmt = conn.prepare("PRAGMA table_info('runs')")?;
    let cols = stmt.query_map([], |row| row.get::<_, String>(1))?;

    for c in cols {
        if c? == "notes" {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Create the `runs` table with the modern schema (including `notes`).
fn create_runs_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS runs (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            start_date  TEXT NOT NULL,
            started_at  TEXT NOT NULL,
            ended_at    TEXT NOT NULL,
            start_lat   REAL NOT NULL CHECK(start_lat BETWEEN -90.0 AND 90.0),
            start_lon   REAL NOT NULL CHECK(start_lon BETWEEN -180.0 AND 180.0),
            end_lat     REAL NOT NULL CHECK(end_lat BETWEEN -90.0 AND 90.0),
            end_lon     REAL NOT NULL CHECK(end_lon BETWEEN -180.0 AND 180.0),
            distance_m  REAL NOT NULL CHECK(distance_m >= 0),
            duration_ms INTEGER NOT NULL CHECK(duration_ms >= 0),
            notes       TEXT NOT NULL DEFAULT '',
            created_at  TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_runs_start_date ON runs(start_date);
        CREATE INDEX IF NOT EXISTS idx_runs_started_at ON runs(started_at);
        "#,
    )?;
    Ok(())
}

/// Add the `notes` column to a pre-0.3 `runs` table, tracked in the log.
fn migrate_add_notes_column(conn: &Connection) -> Result<(), Error> {
    let version = "20250612_0001_add_run_notes";

    // 1) Already applied?
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    if chk.query_row([version], |_| Ok(())).optional()?.is_some() {
        return Ok(());
    }

    if runs_has_notes_column(conn)? {
        // Column created together with the table; just record the version.
        conn.execute(
            "INSERT INTO log (date, operation, target, message)
             VALUES (datetime('now'), 'migration_applied', ?1, 'runs.notes present at creation')",
            [version],
        )?;
        return Ok(());
    }

    warning("Adding 'notes' column to runs table...");

    // 2) Apply
    conn.execute(
        "ALTER TABLE runs ADD COLUMN notes TEXT NOT NULL DEFAULT '';",
        [],
    )
    .map_err(|e| {
        Error::SqliteFailure(
            rusqlite::ffi::Error::new(1),
            Some(format!("Failed to add 'notes' column: {}", e)),
        )
    })?;

    // 3) Mark as applied
    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, 'Added notes column to runs')",
        [version],
    )?;

    success(format!(
        "Migration applied: {} → added 'notes' to runs table",
        version
    ));

    Ok(())
}

/// Public entry point: run all pending migrations.
///
/// Invoked by db::init_db().
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    // 1) Ensure log table
    ensure_log_table(conn)?;

    // 2) Ensure runs table exists
    if !runs_table_exists(conn)? {
        create_runs_table(conn)?;
    } else {
        conn.execute_batch(
            r#"
            CREATE INDEX IF NOT EXISTS idx_runs_start_date ON runs(start_date);
            CREATE INDEX IF NOT EXISTS idx_runs_started_at ON runs(started_at);
            "#,
        )?;
    }

    // 3) Column migrations
    migrate_add_notes_column(conn)?;

    Ok(())
}
