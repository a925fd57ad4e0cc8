//! Drives one full tracking session for the `track` command:
//! start fix → run → end fix → persisted record.

use crate::config::Config;
use crate::core::location::{LocationSource, ScriptedLocationSource, StdinLocationSource};
use crate::core::tracker::RunTracker;
use crate::db::log::rtlog;
use crate::db::store::SqliteRunStore;
use crate::errors::{AppError, AppResult};
use crate::models::fix::Fix;
use crate::models::run_record::RunRecord;
use crate::ui::messages;
use crate::utils::formatting::{format_distance_m, format_duration_ms, format_pace};
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

pub struct TrackOptions {
    pub start_at: Option<Fix>,
    pub end_at: Option<Fix>,
    pub wait_secs: Option<u64>,
    pub notes: String,
}

pub struct TrackLogic;

impl TrackLogic {
    pub fn apply(cfg: &Config, opts: TrackOptions) -> AppResult<RunRecord> {
        let store = Arc::new(SqliteRunStore::open(&cfg.database)?);

        //
        // 1. Pick the location source: scripted fixes when both endpoints
        //    are given, interactive prompts otherwise.
        //
        let interactive = opts.start_at.is_none();
        let source: Arc<dyn LocationSource> = match (opts.start_at, opts.end_at) {
            (Some(start), Some(end)) => {
                Arc::new(ScriptedLocationSource::from_fixes(vec![start, end]))
            }
            (None, None) => Arc::new(StdinLocationSource),
            _ => {
                return Err(AppError::Config(
                    "--start-at and --end-at must be given together".to_string(),
                ));
            }
        };

        //
        // 2. Run the session on a local runtime; the rest of the CLI
        //    stays synchronous.
        //
        let tracker = RunTracker::new(source, store.clone());
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()?;
        let record = rt.block_on(Self::run_session(&tracker, &opts, interactive))?;

        //
        // 3. Report + audit trail
        //
        messages::success(format!(
            "Run #{} saved: {} in {} ({})",
            record.id,
            format_distance_m(record.distance_m),
            format_duration_ms(record.duration_ms),
            format_pace(record.pace_min_per_km()),
        ));

        rtlog(
            &store.pool().conn(),
            "track",
            &record.date_str(),
            &format!("Run recorded: {}", format_distance_m(record.distance_m)),
        )?;

        Ok(record)
    }

    async fn run_session(
        tracker: &RunTracker,
        opts: &TrackOptions,
        interactive: bool,
    ) -> AppResult<RunRecord> {
        messages::info("Requesting start fix...");
        if let Err(e) = tracker.start().await {
            messages::warning(format!("Start fix failed — run not started ({})", e));
            return Err(e);
        }
        messages::status(tracker.status_line());

        //
        // Wait for the run to happen: a scripted delay, or Enter.
        //
        match opts.wait_secs {
            Some(secs) => tokio::time::sleep(Duration::from_secs(secs)).await,
            None if interactive => {
                wait_for_enter().await?;
            }
            None => {}
        }

        messages::info("Requesting end fix...");
        loop {
            match tracker.stop_with_notes(&opts.notes).await {
                Ok(record) => return Ok(record),
                Err(e @ AppError::Acquisition(_)) if interactive => {
                    messages::warning(format!("End fix failed — run still active ({})", e));
                    if !confirm_async("Retry the end fix?").await {
                        return Err(e);
                    }
                }
                Err(e @ AppError::Db(_)) if interactive => {
                    // The computed record is held by the session; a retried
                    // stop() repeats only the commit.
                    messages::warning(format!("Could not save the run ({})", e));
                    if !confirm_async("Retry saving?").await {
                        return Err(e);
                    }
                }
                Err(e) => return Err(e),
            }
        }
    }
}

async fn wait_for_enter() -> AppResult<()> {
    tokio::task::spawn_blocking(|| {
        print!("Press Enter to stop the run... ");
        let _ = std::io::stdout().flush();
        let mut s = String::new();
        std::io::stdin().read_line(&mut s).map(|_| ())
    })
    .await
    .map_err(|e| AppError::Other(format!("input task failed: {}", e)))??;
    Ok(())
}

async fn confirm_async(prompt: &'static str) -> bool {
    tokio::task::spawn_blocking(move || messages::confirm(prompt))
        .await
        .unwrap_or(false)
}
