//! Location acquisition: one best-effort fix per request.
//!
//! The tracker never retries internally; a failed request surfaces as
//! `AppError::Acquisition` and the caller decides whether to try again.

use crate::core::geo;
use crate::errors::{AppError, AppResult};
use crate::models::fix::Fix;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::io::Write;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

#[async_trait]
pub trait LocationSource: Send + Sync {
    /// Resolve exactly once per call: a fix, or a failure
    /// (timeout, permission revoked, provider unavailable).
    async fn request_current_fix(&self) -> AppResult<Fix>;
}

/// One scripted outcome per request.
#[derive(Debug, Clone)]
pub enum ScriptedFix {
    Fix(Fix),
    Failure(String),
}

/// Location source fed from a prepared queue of outcomes.
/// Used by `track --start-at/--end-at` and by tests; an exhausted queue
/// counts as a provider failure.
pub struct ScriptedLocationSource {
    queue: Mutex<VecDeque<ScriptedFix>>,
    requests: AtomicUsize,
}

impl ScriptedLocationSource {
    pub fn new(outcomes: Vec<ScriptedFix>) -> Self {
        Self {
            queue: Mutex::new(outcomes.into()),
            requests: AtomicUsize::new(0),
        }
    }

    pub fn from_fixes(fixes: Vec<Fix>) -> Self {
        Self::new(fixes.into_iter().map(ScriptedFix::Fix).collect())
    }

    /// Number of fix requests issued so far.
    pub fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    fn next(&self) -> Option<ScriptedFix> {
        self.queue
            .lock()
            .expect("scripted fix queue lock poisoned")
            .pop_front()
    }
}

#[async_trait]
impl LocationSource for ScriptedLocationSource {
    async fn request_current_fix(&self) -> AppResult<Fix> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        match self.next() {
            Some(ScriptedFix::Fix(fix)) => Ok(fix),
            Some(ScriptedFix::Failure(reason)) => Err(AppError::Acquisition(reason)),
            None => Err(AppError::Acquisition("no fix available".to_string())),
        }
    }
}

/// Interactive source: prompts for `lat,lon` on standard input.
/// Blank or malformed input is an acquisition failure, never a panic.
pub struct StdinLocationSource;

#[async_trait]
impl LocationSource for StdinLocationSource {
    async fn request_current_fix(&self) -> AppResult<Fix> {
        let line = tokio::task::spawn_blocking(|| {
            print!("Current position (lat,lon): ");
            let _ = std::io::stdout().flush();

            let mut s = String::new();
            std::io::stdin().read_line(&mut s).map(|_| s)
        })
        .await
        .map_err(|e| AppError::Acquisition(format!("input task failed: {}", e)))??;

        let text = line.trim();
        if text.is_empty() || text == geo::UNSET_COORDINATE {
            return Err(AppError::Acquisition("no position entered".to_string()));
        }

        Fix::parse(text)
            .ok_or_else(|| AppError::Acquisition(format!("invalid position '{}'", text)))
    }
}
