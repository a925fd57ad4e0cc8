use serde::Serialize;
use std::fmt;

/// State tag of the run-tracking state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Phase {
    Idle,
    AcquiringStart,
    Active,
    AcquiringEnd,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::AcquiringStart => "acquiring-start",
            Phase::Active => "active",
            Phase::AcquiringEnd => "acquiring-end",
        }
    }

    /// Human-readable label for status lines.
    pub fn label(&self) -> &'static str {
        match self {
            Phase::Idle => "Idle",
            Phase::AcquiringStart => "Acquiring start fix",
            Phase::Active => "Run in progress",
            Phase::AcquiringEnd => "Acquiring end fix",
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Phase::Idle)
    }

    pub fn is_active(&self) -> bool {
        matches!(self, Phase::Active)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
