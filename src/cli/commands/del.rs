use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::del::{DeleteLogic, DeleteTarget};
use crate::db::store::SqliteRunStore;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{confirm, info, success};
use crate::utils::date;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Del { id, date: d, all } = cmd {
        //
        // 1. Resolve the target
        //
        let target = match (id, d, all) {
            (Some(id), None, false) => DeleteTarget::ById(*id),
            (None, Some(text), false) => {
                let parsed = date::parse_date(text)
                    .ok_or_else(|| AppError::InvalidDate(text.to_string()))?;
                DeleteTarget::ByDate(parsed)
            }
            (None, None, true) => DeleteTarget::All,
            _ => {
                return Err(AppError::Config(
                    "use exactly one of --id, --date or --all".to_string(),
                ));
            }
        };

        //
        // 2. Confirmation prompt
        //
        let prompt = match &target {
            DeleteTarget::ById(id) => {
                format!("Delete run #{}? This action is irreversible.", id)
            }
            DeleteTarget::ByDate(d) => {
                format!("Delete ALL runs for {}? This action is irreversible.", d)
            }
            DeleteTarget::All => "Delete ALL runs? This action is irreversible.".to_string(),
        };

        if !confirm(&prompt) {
            info("Operation cancelled.");
            return Ok(());
        }

        //
        // 3. Execute deletion
        //
        let store = SqliteRunStore::open(&cfg.database)?;
        let removed = DeleteLogic::apply(&store, &target)?;
        success(format!("Deleted {} run(s).", removed));
    }

    Ok(())
}
