use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::{Preset, TimerState};

/// Every focus timer state change produces an Event.
/// The CLI prints them; hosts may forward them to notifications.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    TimerStarted {
        preset: Preset,
        duration_secs: u64,
        at: DateTime<Utc>,
    },
    TimerPaused {
        remaining_ms: u64,
        at: DateTime<Utc>,
    },
    TimerResumed {
        remaining_ms: u64,
        at: DateTime<Utc>,
    },
    /// Countdown reached zero.
    TimerFinished {
        preset: Preset,
        at: DateTime<Utc>,
    },
    TimerReset {
        at: DateTime<Utc>,
    },
    PresetChanged {
        preset: Preset,
        at: DateTime<Utc>,
    },
    /// Full state snapshot (sent on request).
    StateSnapshot {
        state: TimerState,
        preset: Preset,
        remaining_ms: u64,
        total_ms: u64,
        progress_pct: f64,
        display: String,
        at: DateTime<Utc>,
    },
}
