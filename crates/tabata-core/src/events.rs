use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::Phase;

/// Every engine command that changes state produces an Event.
/// The presentation layer polls these to render and to fire audio cues.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    SessionStarted {
        phase: Phase,
        interval: u32,
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    SessionPaused {
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    /// The countdown hit zero and the engine entered the next phase.
    PhaseChanged {
        phase: Phase,
        interval: u32,
        duration_secs: u32,
        at: DateTime<Utc>,
    },
    /// The final work interval finished; the engine is frozen at zero.
    SessionCompleted {
        total_intervals: u32,
        at: DateTime<Utc>,
    },
    /// A bare countdown (non-session mode) reached zero.
    CountdownFinished {
        at: DateTime<Utc>,
    },
    /// Manual forward skip to the next work interval.
    IntervalSkipped {
        from_interval: u32,
        to_interval: u32,
        at: DateTime<Utc>,
    },
    /// Manual backward navigation; `restarted` is true when the current
    /// interval was replayed rather than stepped back from.
    IntervalRewound {
        phase: Phase,
        interval: u32,
        restarted: bool,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        phase: Phase,
        interval: u32,
        remaining_secs: u32,
        total_secs: u32,
        is_active: bool,
        sequential_number: u32,
        session_progress_pct: f64,
        at: DateTime<Utc>,
    },
}
