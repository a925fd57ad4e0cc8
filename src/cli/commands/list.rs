use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::list::ListLogic;
use crate::db::store::SqliteRunStore;
use crate::errors::AppResult;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List { period, limit } = cmd {
        let store = SqliteRunStore::open(&cfg.database)?;
        ListLogic::apply(&store, cfg, period.as_deref(), *limit)?;
    }
    Ok(())
}
