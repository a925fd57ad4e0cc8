use crate::config::Config;
use crate::db::store::SqliteRunStore;
use crate::errors::AppResult;
use ansi_term::Colour;

fn strip_ansi(s: &str) -> String {
    let re = regex::Regex::new(r"\x1B\[[0-9;]*[mK]").expect("valid ANSI pattern");
    re.replace_all(s, "").into_owned()
}

/// ANSI color for the operation column.
fn color_for_operation(op: &str) -> Colour {
    match op {
        "track" => Colour::Green,
        "del" => Colour::Red,
        "migration_applied" => Colour::Purple,
        "backup" => Colour::Blue,
        "export" => Colour::Yellow,
        "init" => Colour::RGB(255, 153, 51),
        _ => Colour::White,
    }
}

pub struct LogLogic;

impl LogLogic {
    pub fn print_log(store: &SqliteRunStore, _cfg: &Config) -> AppResult<()> {
        let entries: Vec<(i64, String, String, String, String)> = {
            let conn = store.pool().conn();
            let mut stmt = conn.prepare_cached(
                "SELECT id, date, operation, target, message FROM log ORDER BY id ASC",
            )?;

            let rows = stmt.query_map([], |row| {
                let id: i64 = row.get(0)?;
                let raw_date: String = row.get(1)?;
                let operation: String = row.get(2)?;
                let target: String = row.get(3)?;
                let message: String = row.get(4)?;

                let date = chrono::DateTime::parse_from_rfc3339(&raw_date)
                    .map(|dt| dt.format("%FT%T%:z").to_string())
                    .unwrap_or(raw_date);

                // Single op+target column
                let op_target = if target.is_empty() {
                    operation.clone()
                } else {
                    format!("{operation} ({target})")
                };

                Ok((id, date, operation, op_target, message))
            })?;

            let mut out = Vec::new();
            for r in rows {
                out.push(r?);
            }
            out
        };

        if entries.is_empty() {
            println!("📜 Internal log is empty.");
            return Ok(());
        }

        let op_w = entries
            .iter()
            .map(|(_, _, _, op_target, _)| op_target.len())
            .max()
            .unwrap_or(10)
            .min(60);

        let id_w = entries
            .iter()
            .map(|(id, _, _, _, _)| id.to_string().len())
            .max()
            .unwrap_or(1);
        let date_w = entries
            .iter()
            .map(|(_, date, _, _, _)| date.len())
            .max()
            .unwrap_or(10);

        println!("📜 Internal log:\n");

        for (id, date, operation_raw, op_target, message) in entries {
            let color = color_for_operation(&operation_raw);

            // Truncate to 60 visible characters, then recolor the operation word
            let truncated = if op_target.len() > 60 {
                let mut s = op_target.chars().take(57).collect::<String>();
                s.push_str("...");
                s
            } else {
                op_target
            };

            let colored = if let Some((op_word, rest)) = truncated.split_once(' ') {
                format!("{} {}", color.paint(op_word), rest)
            } else {
                color.paint(truncated.as_str()).to_string()
            };

            let padding = " ".repeat(op_w.saturating_sub(strip_ansi(&colored).len()));

            println!(
                "{:>id_w$}: {:<date_w$} | {}{} => {}",
                id,
                date,
                colored,
                padding,
                message,
                id_w = id_w,
                date_w = date_w
            );
        }

        Ok(())
    }
}
