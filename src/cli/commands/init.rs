use crate::cli::parser::Cli;
use crate::config::Config;
use crate::db::initialize::init_db;
use crate::db::log::rtlog;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::success;

/// Create config + database and run all migrations.
pub fn handle(cli: &Cli) -> AppResult<()> {
    Config::init_all(cli.db.clone(), cli.test)?;

    let cfg = if let Some(custom_db) = &cli.db {
        Config {
            database: custom_db.clone(),
            ..Config::load()
        }
    } else {
        Config::load()
    };

    let pool = DbPool::new(&cfg.database)?;
    {
        let conn = pool.conn();
        init_db(&conn)?;
        rtlog(&conn, "init", &cfg.database, "Database initialized")?;
    }

    success("Initialization complete.");
    Ok(())
}
