use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::track::{TrackLogic, TrackOptions};
use crate::errors::{AppError, AppResult};
use crate::models::fix::Fix;

/// Track one full run session.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Track {
        start_at,
        end_at,
        wait,
        notes,
    } = cmd
    {
        //
        // 1. Parse scripted fixes (optional)
        //
        let start_fix = parse_fix_arg(start_at.as_deref())?;
        let end_fix = parse_fix_arg(end_at.as_deref())?;

        //
        // 2. Run the session
        //
        let opts = TrackOptions {
            start_at: start_fix,
            end_at: end_fix,
            wait_secs: *wait,
            notes: notes.clone().unwrap_or_default(),
        };

        TrackLogic::apply(cfg, opts)?;
    }

    Ok(())
}

fn parse_fix_arg(arg: Option<&str>) -> AppResult<Option<Fix>> {
    match arg {
        Some(text) => Fix::parse(text)
            .map(Some)
            .ok_or_else(|| AppError::InvalidCoordinate(text.to_string())),
        None => Ok(None),
    }
}
