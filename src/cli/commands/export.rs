use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::store::SqliteRunStore;
use crate::errors::AppResult;
use crate::export::run_export;
use crate::utils::path::expand_tilde;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        format,
        file,
        period,
        force,
    } = cmd
    {
        let store = SqliteRunStore::open(&cfg.database)?;
        let dest = expand_tilde(file);
        run_export(
            &store,
            *format,
            &dest.to_string_lossy(),
            period.as_deref(),
            *force,
        )?;
    }
    Ok(())
}
