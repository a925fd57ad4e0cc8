use crate::db::store::{RunStore, SqliteRunStore};
use crate::errors::AppResult;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use crate::utils::formatting::format_distance_m;
use rusqlite::OptionalExtension;
use std::fs;

pub fn print_db_info(store: &SqliteRunStore, db_path: &str) -> AppResult<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_mb = (file_size as f64) / (1024.0 * 1024.0);

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.2} MB", CYAN, RESET, file_mb);

    //
    // 2) TOTAL RUNS + DISTANCE
    //
    let aggregates = store.aggregates()?;
    println!(
        "{}• Total runs:{} {}{}{}",
        CYAN, RESET, GREEN, aggregates.count, RESET
    );
    println!(
        "{}• Total distance:{} {}{}{}",
        CYAN,
        RESET,
        GREEN,
        format_distance_m(aggregates.total_distance_m),
        RESET
    );

    //
    // 3) DATE RANGE
    //
    let (first_date, last_date) = store.pool().with_conn(|conn| {
        let first: Option<String> = conn
            .query_row(
                "SELECT start_date FROM runs ORDER BY start_date ASC LIMIT 1",
                [],
                |row| row.get(0),
            )
            .optional()?;
        let last: Option<String> = conn
            .query_row(
                "SELECT start_date FROM runs ORDER BY start_date DESC LIMIT 1",
                [],
                |row| row.get(0),
            )
            .optional()?;
        Ok((first, last))
    })?;

    let fmt_first = first_date.unwrap_or_else(|| format!("{GREY}--{RESET}"));
    let fmt_last = last_date.unwrap_or_else(|| format!("{GREY}--{RESET}"));

    println!("{}• Date range:{}", CYAN, RESET);
    println!("    from: {}", fmt_first);
    println!("    to:   {}", fmt_last);

    //
    // 4) AVERAGE DISTANCE/RUN
    //
    if aggregates.count > 0 {
        println!(
            "{}• Average distance/run:{} {}",
            CYAN,
            RESET,
            format_distance_m(aggregates.average_distance_m)
        );
    }

    println!();
    Ok(())
}
