use crate::config::Config;
use crate::db::store::{RunStore, SqliteRunStore};
use crate::errors::AppResult;
use crate::utils::colors::{CYAN, GREEN, RESET};
use crate::utils::formatting::{format_distance_m, format_duration_ms};

/// Aggregate statistics over the whole run history.
pub fn handle(cfg: &Config) -> AppResult<()> {
    let store = SqliteRunStore::open(&cfg.database)?;

    // Read through the published view, the same one reactive consumers hold.
    let aggregates = *store.aggregates_watch().borrow();

    println!();
    println!(
        "{}• Runs:{} {}{}{}",
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
    println!(
        "{}• Average distance:{} {}",
        CYAN,
        RESET,
        format_distance_m(aggregates.average_distance_m)
    );
    println!(
        "{}• Total time:{} {}",
        CYAN,
        RESET,
        format_duration_ms(aggregates.total_duration_ms)
    );
    println!();

    Ok(())
}
