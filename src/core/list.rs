//! Rendering of the run history for the `list` command.

use crate::config::Config;
use crate::db::store::RunStore;
use crate::errors::AppResult;
use crate::models::run_record::RunRecord;
use crate::utils::colors::{CYAN, GREY, RESET, color_for_optional_field};
use crate::utils::date;
use crate::utils::formatting::{format_distance_m, format_duration_ms, format_pace, pad_left, pad_right};

pub struct ListLogic;

impl ListLogic {
    pub fn apply(
        store: &dyn RunStore,
        cfg: &Config,
        period: Option<&str>,
        limit: Option<usize>,
    ) -> AppResult<()> {
        //
        // 1. Load runs (single-day periods go through the calendar query)
        //
        let mut runs = match period {
            Some(p) => {
                let (from, to) = date::period_bounds(p)?;
                if from == to {
                    store.runs_for_date(from)?
                } else {
                    let mut all = store.get_all()?;
                    all.retain(|r| {
                        let d = r.started_at.date_naive();
                        d >= from && d <= to
                    });
                    all
                }
            }
            None => store.get_all()?,
        };

        if let Some(n) = limit {
            runs.truncate(n);
        }

        if runs.is_empty() {
            println!("No runs found.");
            return Ok(());
        }

        //
        // 2. Render
        //
        match period {
            Some(p) => println!("🏃 Saved runs for {}:\n", p),
            None => println!("🏃 Saved runs:\n"),
        }
        print_header(cfg);
        for r in &runs {
            print_run(cfg, r);
        }
        println!();

        Ok(())
    }
}

fn print_header(_cfg: &Config) {
    let line = format!(
        "{}  {}  {}  {}  {}  {}  Notes",
        pad_left("ID", 4),
        pad_right("Date", 10),
        pad_right("Start", 8),
        pad_left("Distance", 9),
        pad_left("Duration", 8),
        pad_left("Pace", 9),
    );
    println!("{}{}{}", CYAN, line, RESET);
    println!("{}{}{}", GREY, "-".repeat(62), RESET);
}

fn print_run(cfg: &Config, r: &RunRecord) {
    let pace = if cfg.show_pace {
        format_pace(r.pace_min_per_km())
    } else {
        "-".to_string()
    };
    let notes_color = color_for_optional_field(Some(r.notes.as_str()));

    println!(
        "{}  {}  {}  {}  {}  {}  {}{}{}",
        pad_left(&r.id.to_string(), 4),
        pad_right(&r.date_str(), 10),
        pad_right(&r.start_time_str(), 8),
        pad_left(&format_distance_m(r.distance_m), 9),
        pad_left(&format_duration_ms(r.duration_ms), 8),
        pad_left(&pace, 9),
        notes_color,
        if r.notes.is_empty() { "-" } else { &r.notes },
        RESET,
    );
}
