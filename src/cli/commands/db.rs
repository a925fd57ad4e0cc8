use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::migrate::run_pending_migrations;
use crate::db::stats::print_db_info;
use crate::db::store::SqliteRunStore;
use crate::errors::AppResult;
use crate::ui::messages::{success, warning};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Db {
        migrate,
        check,
        vacuum,
        info,
    } = cmd
    {
        let store = SqliteRunStore::open(&cfg.database)?;

        if *migrate {
            store.pool().with_conn(run_pending_migrations)?;
            success("Migrations are up to date.");
        }

        if *check {
            let result: String = store.pool().with_conn(|conn| {
                conn.query_row("PRAGMA integrity_check", [], |row| row.get(0))
            })?;
            if result == "ok" {
                success("Database integrity check passed.");
            } else {
                warning(format!("Integrity check reported: {}", result));
            }
        }

        if *vacuum {
            store.pool().with_conn(|conn| conn.execute_batch("VACUUM"))?;
            success("Database optimized.");
        }

        if *info {
            print_db_info(&store, &cfg.database)?;
        }
    }

    Ok(())
}
