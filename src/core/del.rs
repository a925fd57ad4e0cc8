use crate::db::log::rtlog;
use crate::db::store::{RunStore, SqliteRunStore};
use crate::errors::{AppError, AppResult};
use chrono::NaiveDate;

pub enum DeleteTarget {
    ById(i64),
    ByDate(NaiveDate),
    All,
}

pub struct DeleteLogic;

impl DeleteLogic {
    /// Delete the targeted runs, returning how many rows were removed.
    pub fn apply(store: &SqliteRunStore, target: &DeleteTarget) -> AppResult<usize> {
        let (removed, audit_target) = match target {
            DeleteTarget::ById(id) => {
                if !store.delete(*id)? {
                    return Err(AppError::RunNotFound(*id));
                }
                (1, format!("id {}", id))
            }
            DeleteTarget::ByDate(d) => {
                let runs = store.runs_for_date(*d)?;
                if runs.is_empty() {
                    return Err(AppError::NoRunsForDate(d.to_string()));
                }
                let mut n = 0;
                for r in runs {
                    if store.delete(r.id)? {
                        n += 1;
                    }
                }
                (n, d.to_string())
            }
            DeleteTarget::All => (store.delete_all()?, "all".to_string()),
        };

        rtlog(
            &store.pool().conn(),
            "del",
            &audit_target,
            &format!("Deleted {} run(s)", removed),
        )?;

        Ok(removed)
    }
}
