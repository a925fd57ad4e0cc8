use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::logview::LogLogic;
use crate::db::store::SqliteRunStore;
use crate::errors::AppResult;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Log { print } = cmd
        && *print
    {
        let store = SqliteRunStore::open(&cfg.database)?;
        LogLogic::print_log(&store, cfg)?;
    }
    Ok(())
}
