//! The run-tracking state machine.
//!
//! Owns the in-memory session, issues one location request per
//! transition, derives distance/duration on stop and hands the completed
//! record to the store. Phase changes are published on a watch channel,
//! acquisition failures on a separate broadcast channel.

use crate::core::location::LocationSource;
use crate::db::store::RunStore;
use crate::errors::{AppError, AppResult};
use crate::models::fix::Fix;
use crate::models::phase::Phase;
use crate::models::run_record::RunRecord;
use crate::utils::formatting::format_distance_m;
use chrono::{DateTime, Local};
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::{broadcast, watch};

/// Session state, one variant per phase. Fix data lives on the variants
/// that have it, so an active run without a start fix is unrepresentable.
#[derive(Debug, Clone)]
pub enum RunSession {
    Idle,
    AcquiringStart,
    Active {
        start: Fix,
        started_at: DateTime<Local>,
        /// A computed record whose insert failed; a retried `stop()`
        /// commits it without issuing a new fix request.
        pending: Option<RunRecord>,
    },
    AcquiringEnd {
        start: Fix,
        started_at: DateTime<Local>,
    },
}

impl RunSession {
    pub fn phase(&self) -> Phase {
        match self {
            RunSession::Idle => Phase::Idle,
            RunSession::AcquiringStart => Phase::AcquiringStart,
            RunSession::Active { .. } => Phase::Active,
            RunSession::AcquiringEnd { .. } => Phase::AcquiringEnd,
        }
    }
}

/// Out-of-band notification, distinct from the phase values.
#[derive(Debug, Clone)]
pub enum TrackerSignal {
    AcquisitionFailed { stage: Phase, reason: String },
}

pub struct RunTracker {
    location: Arc<dyn LocationSource>,
    store: Arc<dyn RunStore>,
    session: Mutex<RunSession>,
    phase_tx: watch::Sender<Phase>,
    signal_tx: broadcast::Sender<TrackerSignal>,
}

impl RunTracker {
    pub fn new(location: Arc<dyn LocationSource>, store: Arc<dyn RunStore>) -> Self {
        Self {
            location,
            store,
            session: Mutex::new(RunSession::Idle),
            phase_tx: watch::channel(Phase::Idle).0,
            signal_tx: broadcast::channel(16).0,
        }
    }

    pub fn phase(&self) -> Phase {
        self.lock_session().phase()
    }

    /// Current phase, republished on every transition.
    pub fn phase_watch(&self) -> watch::Receiver<Phase> {
        self.phase_tx.subscribe()
    }

    /// Acquisition-failure notifications.
    pub fn signals(&self) -> broadcast::Receiver<TrackerSignal> {
        self.signal_tx.subscribe()
    }

    /// Begin a run: Idle → AcquiringStart → Active.
    /// On acquisition failure the session reverts to Idle and the error
    /// is reported; nothing is persisted.
    pub async fn start(&self) -> AppResult<()> {
        {
            let mut session = self.lock_session();
            match *session {
                RunSession::Idle => *session = RunSession::AcquiringStart,
                ref s => {
                    return Err(AppError::InvalidTransition {
                        action: "start",
                        phase: s.phase(),
                    });
                }
            }
        }
        self.publish_phase();

        // Revert to Idle if the acquisition future is dropped mid-flight.
        let guard = RevertGuard::new(self, RunSession::Idle);
        let outcome = self.location.request_current_fix().await;
        guard.disarm();

        match outcome {
            Ok(start) => {
                self.replace_session(RunSession::Active {
                    start,
                    started_at: Local::now(),
                    pending: None,
                });
                Ok(())
            }
            Err(e) => {
                self.replace_session(RunSession::Idle);
                self.signal(Phase::AcquiringStart, &e);
                Err(e)
            }
        }
    }

    /// Finish a run: Active → AcquiringEnd → Idle, persisting the record.
    ///
    /// Acquisition failure reverts to Active with the start fix intact.
    /// Insert failure also reverts to Active but keeps the computed
    /// record, so a retried `stop()` only repeats the commit.
    pub async fn stop(&self) -> AppResult<RunRecord> {
        self.stop_with_notes("").await
    }

    pub async fn stop_with_notes(&self, notes: &str) -> AppResult<RunRecord> {
        enum Next {
            Commit(RunRecord),
            Acquire {
                start: Fix,
                started_at: DateTime<Local>,
            },
        }

        let next = {
            let mut session = self.lock_session();
            match session.clone() {
                RunSession::Active {
                    start,
                    started_at,
                    pending,
                } => {
                    if let Some(record) = pending {
                        Next::Commit(record)
                    } else {
                        *session = RunSession::AcquiringEnd { start, started_at };
                        Next::Acquire { start, started_at }
                    }
                }
                other => {
                    return Err(AppError::InvalidTransition {
                        action: "stop",
                        phase: other.phase(),
                    });
                }
            }
        };

        match next {
            Next::Commit(record) => self.commit(record),
            Next::Acquire { start, started_at } => {
                self.publish_phase();

                // Revert to Active (run still in progress) on cancellation.
                let guard = RevertGuard::new(
                    self,
                    RunSession::Active {
                        start,
                        started_at,
                        pending: None,
                    },
                );
                let outcome = self.location.request_current_fix().await;
                guard.disarm();

                match outcome {
                    Ok(end) => {
                        match RunRecord::from_fixes(start, end, started_at, Local::now(), notes) {
                            Ok(record) => self.commit(record),
                            Err(e) => {
                                // clock moved backwards; the run stays active
                                self.replace_session(RunSession::Active {
                                    start,
                                    started_at,
                                    pending: None,
                                });
                                Err(e)
                            }
                        }
                    }
                    Err(e) => {
                        self.replace_session(RunSession::Active {
                            start,
                            started_at,
                            pending: None,
                        });
                        self.signal(Phase::AcquiringEnd, &e);
                        Err(e)
                    }
                }
            }
        }
    }

    /// Distance between the currently known start/end fixes; absent
    /// unless both are known (i.e. an uncommitted record is held).
    pub fn derived_distance(&self) -> Option<f64> {
        match &*self.lock_session() {
            RunSession::Active {
                pending: Some(record),
                ..
            } => Some(record.distance_m),
            _ => None,
        }
    }

    /// Discard the session (including any uncommitted record).
    /// Rejected while an acquisition is in flight; the drop guard owns
    /// those phases.
    pub fn reset(&self) -> AppResult<()> {
        {
            let mut session = self.lock_session();
            match *session {
                RunSession::AcquiringStart | RunSession::AcquiringEnd { .. } => {
                    return Err(AppError::InvalidTransition {
                        action: "reset",
                        phase: session.phase(),
                    });
                }
                _ => *session = RunSession::Idle,
            }
        }
        self.publish_phase();
        Ok(())
    }

    /// Human-readable status for UI consumption.
    pub fn status_line(&self) -> String {
        match &*self.lock_session() {
            RunSession::Idle => "Idle — no run in progress".to_string(),
            RunSession::AcquiringStart => "Acquiring start fix...".to_string(),
            RunSession::Active {
                start,
                started_at,
                pending,
            } => match pending {
                Some(record) => format!(
                    "Run in progress since {} — {} recorded, waiting to be saved",
                    started_at.format("%H:%M:%S"),
                    format_distance_m(record.distance_m)
                ),
                None => format!(
                    "Run in progress since {} from {}",
                    started_at.format("%H:%M:%S"),
                    start.display()
                ),
            },
            RunSession::AcquiringEnd { started_at, .. } => format!(
                "Acquiring end fix for the run started at {}...",
                started_at.format("%H:%M:%S")
            ),
        }
    }

    fn commit(&self, record: RunRecord) -> AppResult<RunRecord> {
        match self.store.insert(&record) {
            Ok(id) => {
                self.replace_session(RunSession::Idle);
                Ok(RunRecord { id, ..record })
            }
            Err(e) => {
                self.replace_session(RunSession::Active {
                    start: record.start,
                    started_at: record.started_at,
                    pending: Some(record),
                });
                Err(e)
            }
        }
    }

    fn lock_session(&self) -> MutexGuard<'_, RunSession> {
        // The lock is never held across an await.
        self.session.lock().expect("run session lock poisoned")
    }

    fn replace_session(&self, next: RunSession) {
        *self.lock_session() = next;
        self.publish_phase();
    }

    fn publish_phase(&self) {
        let phase = self.lock_session().phase();
        self.phase_tx.send_replace(phase);
    }

    fn signal(&self, stage: Phase, error: &AppError) {
        let _ = self.signal_tx.send(TrackerSignal::AcquisitionFailed {
            stage,
            reason: error.to_string(),
        });
    }
}

/// Restores the session to a known phase if an in-flight acquisition is
/// dropped before resolving, discarding the in-flight result.
struct RevertGuard<'a> {
    tracker: &'a RunTracker,
    revert_to: Option<RunSession>,
}

impl<'a> RevertGuard<'a> {
    fn new(tracker: &'a RunTracker, revert_to: RunSession) -> Self {
        Self {
            tracker,
            revert_to: Some(revert_to),
        }
    }

    fn disarm(mut self) {
        self.revert_to = None;
    }
}

impl Drop for RevertGuard<'_> {
    fn drop(&mut self) {
        if let Some(prev) = self.revert_to.take() {
            self.tracker.replace_session(prev);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_phase_mapping() {
        let fix = Fix::new(52.52, 13.405).unwrap();
        assert_eq!(RunSession::Idle.phase(), Phase::Idle);
        assert_eq!(RunSession::AcquiringStart.phase(), Phase::AcquiringStart);
        assert_eq!(
            RunSession::Active {
                start: fix,
                started_at: Local::now(),
                pending: None
            }
            .phase(),
            Phase::Active
        );
        assert_eq!(
            RunSession::AcquiringEnd {
                start: fix,
                started_at: Local::now()
            }
            .phase(),
            Phase::AcquiringEnd
        );
    }
}
