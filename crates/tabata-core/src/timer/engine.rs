//! Interval timing engine.
//!
//! The engine is a tick-driven state machine. It does not use internal
//! threads or read the wall clock - the caller delivers one `tick()` per
//! elapsed second while the countdown is active.
//!
//! ## State Transitions
//!
//! ```text
//! prepare -> work(1) -> rest(1) -> work(2) -> ... -> work(N) -> complete
//! ```
//!
//! All transitions are expressed by a single pure reducer over
//! [`TimerAction`]; the engine wraps the reducer with the immutable
//! session configuration and derives events by diffing state.
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = IntervalEngine::new(SessionConfig::standard());
//! engine.start();
//! // Once per second:
//! engine.tick(); // Returns Some(Event) at phase boundaries
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::timeline::{self, Phase};
use crate::config::SessionConfig;
use crate::events::Event;

/// `previous_interval` restarts the current interval instead of stepping
/// back once this many seconds of it have elapsed. Fixed regardless of
/// configured durations.
pub const REWIND_THRESHOLD_SECS: u32 = 5;

/// Mutable timer state, exclusively owned by [`IntervalEngine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerState {
    pub phase: Phase,
    /// 1-based work interval; never exceeds the configured total.
    pub current_interval: u32,
    /// Remaining whole seconds in the current phase.
    pub remaining_secs: u32,
    pub is_active: bool,
    /// Fixed at construction: true drives automatic phase transitions,
    /// false is a bare countdown that freezes at zero.
    pub is_session_mode: bool,
}

/// Commands folded over [`TimerState`] by [`reduce`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerAction {
    Tick,
    Start,
    Pause,
    NextInterval,
    PreviousInterval,
}

/// Pure state-transition function: `(state, action) -> state`.
///
/// Total over all inputs; invalid navigation requests return the state
/// unchanged rather than failing.
pub fn reduce(state: TimerState, action: TimerAction, config: &SessionConfig) -> TimerState {
    match action {
        TimerAction::Start => TimerState {
            is_active: true,
            ..state
        },

        TimerAction::Pause => TimerState {
            is_active: false,
            ..state
        },

        TimerAction::Tick => {
            if state.remaining_secs == 0 {
                // Frozen at session end or in bare countdown mode.
                return state;
            }

            let remaining_secs = state.remaining_secs - 1;

            // Phase transitions happen only in session mode.
            if remaining_secs == 0 && state.is_session_mode {
                return match state.phase {
                    Phase::Prepare => TimerState {
                        phase: Phase::Work,
                        remaining_secs: config.work_duration,
                        ..state
                    },
                    Phase::Work if state.current_interval < config.total_intervals => TimerState {
                        phase: Phase::Rest,
                        remaining_secs: config.rest_duration,
                        ..state
                    },
                    // Final work interval: session complete, freeze at zero.
                    Phase::Work => TimerState {
                        remaining_secs: 0,
                        ..state
                    },
                    Phase::Rest => TimerState {
                        phase: Phase::Work,
                        current_interval: state.current_interval + 1,
                        remaining_secs: config.work_duration,
                        ..state
                    },
                };
            }

            TimerState {
                remaining_secs,
                ..state
            }
        }

        TimerAction::NextInterval => {
            if state.current_interval >= config.total_intervals {
                return state;
            }
            TimerState {
                phase: Phase::Work,
                current_interval: state.current_interval + 1,
                remaining_secs: config.work_duration,
                ..state
            }
        }

        TimerAction::PreviousInterval => {
            if state.phase == Phase::Prepare {
                return state;
            }
            let elapsed = config
                .duration_of(state.phase)
                .saturating_sub(state.remaining_secs);

            if elapsed > REWIND_THRESHOLD_SECS {
                // Well into the interval: replay it rather than go back.
                TimerState {
                    phase: Phase::Work,
                    remaining_secs: config.work_duration,
                    ..state
                }
            } else if state.current_interval == 1 {
                TimerState {
                    phase: Phase::Prepare,
                    current_interval: 1,
                    remaining_secs: config.prepare_duration,
                    ..state
                }
            } else {
                TimerState {
                    phase: Phase::Work,
                    current_interval: state.current_interval - 1,
                    remaining_secs: config.work_duration,
                    ..state
                }
            }
        }
    }
}

/// Core interval engine.
///
/// Owns an immutable [`SessionConfig`] and the mutable [`TimerState`].
/// Commands return `Some(Event)` when they changed state in a way the
/// presentation layer should react to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntervalEngine {
    config: SessionConfig,
    state: TimerState,
}

impl IntervalEngine {
    /// Create a session-mode engine: automatic phase transitions at zero.
    pub fn new(config: SessionConfig) -> Self {
        Self {
            state: TimerState {
                phase: Phase::Prepare,
                current_interval: 1,
                remaining_secs: config.prepare_duration,
                is_active: false,
                is_session_mode: true,
            },
            config,
        }
    }

    /// Create a bare countdown probe: ticks to zero and freezes, never
    /// transitioning phases.
    pub fn countdown(initial_secs: u32) -> Self {
        let config = SessionConfig {
            prepare_duration: initial_secs,
            ..SessionConfig::default()
        };
        Self {
            state: TimerState {
                phase: Phase::Prepare,
                current_interval: 1,
                remaining_secs: initial_secs,
                is_active: false,
                is_session_mode: false,
            },
            config,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn current_interval(&self) -> u32 {
        self.state.current_interval
    }

    pub fn remaining_secs(&self) -> u32 {
        self.state.remaining_secs
    }

    pub fn is_active(&self) -> bool {
        self.state.is_active
    }

    pub fn can_go_next(&self) -> bool {
        self.state.current_interval < self.config.total_intervals
    }

    pub fn can_go_previous(&self) -> bool {
        self.state.phase != Phase::Prepare
    }

    /// Terminal condition: final work interval counted down to zero.
    pub fn is_complete(&self) -> bool {
        self.state.is_session_mode
            && self.state.phase == Phase::Work
            && self.state.current_interval == self.config.total_intervals
            && self.state.remaining_secs == 0
    }

    /// 1-based position of the current phase in the session timeline.
    pub fn sequential_number(&self) -> u32 {
        timeline::sequential_number_of(self.state.phase, self.state.current_interval)
    }

    /// 0.0 .. 1.0 progress within the current phase.
    pub fn phase_progress(&self) -> f64 {
        let total = self.config.duration_of(self.state.phase);
        if total == 0 {
            return 0.0;
        }
        1.0 - (self.state.remaining_secs as f64 / total as f64)
    }

    /// 0.0 .. 100.0 progress across the entire session.
    pub fn session_progress_pct(&self) -> f64 {
        if !self.state.is_session_mode {
            return self.phase_progress() * 100.0;
        }
        let total = self.config.total_session_secs() as f64;
        if total == 0.0 {
            return 0.0;
        }
        let n = self.state.current_interval as u64;
        let cycle = self.config.work_duration as u64 + self.config.rest_duration as u64;
        let completed: u64 = match self.state.phase {
            Phase::Prepare => 0,
            Phase::Work => self.config.prepare_duration as u64 + (n - 1) * cycle,
            Phase::Rest => {
                self.config.prepare_duration as u64
                    + (n - 1) * cycle
                    + self.config.work_duration as u64
            }
        };
        let in_phase = self
            .config
            .duration_of(self.state.phase)
            .saturating_sub(self.state.remaining_secs) as u64;
        ((completed + in_phase) as f64 / total * 100.0).min(100.0)
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            phase: self.state.phase,
            interval: self.state.current_interval,
            remaining_secs: self.state.remaining_secs,
            total_secs: self.config.duration_of(self.state.phase),
            is_active: self.state.is_active,
            sequential_number: self.sequential_number(),
            session_progress_pct: self.session_progress_pct(),
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Begin or resume consuming ticks. Idempotent while active.
    pub fn start(&mut self) -> Option<Event> {
        if self.state.is_active {
            return None;
        }
        self.state = reduce(self.state, TimerAction::Start, &self.config);
        Some(Event::SessionStarted {
            phase: self.state.phase,
            interval: self.state.current_interval,
            remaining_secs: self.state.remaining_secs,
            at: Utc::now(),
        })
    }

    /// Freeze the countdown. Idempotent while paused; resuming with
    /// `start()` continues from the frozen remaining time.
    pub fn pause(&mut self) -> Option<Event> {
        if !self.state.is_active {
            return None;
        }
        self.state = reduce(self.state, TimerAction::Pause, &self.config);
        Some(Event::SessionPaused {
            remaining_secs: self.state.remaining_secs,
            at: Utc::now(),
        })
    }

    /// Consume one elapsed second. No-op while inactive or frozen at zero.
    ///
    /// Returns the boundary event when the decrement crossed into a new
    /// phase, completed the session, or finished a bare countdown.
    pub fn tick(&mut self) -> Option<Event> {
        if !self.state.is_active || self.state.remaining_secs == 0 {
            return None;
        }
        let before = self.state;
        self.state = reduce(before, TimerAction::Tick, &self.config);

        if !self.state.is_session_mode && self.state.remaining_secs == 0 {
            return Some(Event::CountdownFinished { at: Utc::now() });
        }
        if self.is_complete() {
            return Some(Event::SessionCompleted {
                total_intervals: self.config.total_intervals,
                at: Utc::now(),
            });
        }
        if self.state.phase != before.phase || self.state.current_interval != before.current_interval
        {
            return Some(Event::PhaseChanged {
                phase: self.state.phase,
                interval: self.state.current_interval,
                duration_secs: self.config.duration_of(self.state.phase),
                at: Utc::now(),
            });
        }
        None
    }

    /// Manual forward skip: jump to the next work interval at full
    /// duration. No-op at the final interval. Does not alter `is_active`.
    pub fn next_interval(&mut self) -> Option<Event> {
        if !self.can_go_next() {
            return None;
        }
        let from_interval = self.state.current_interval;
        self.state = reduce(self.state, TimerAction::NextInterval, &self.config);
        Some(Event::IntervalSkipped {
            from_interval,
            to_interval: self.state.current_interval,
            at: Utc::now(),
        })
    }

    /// Manual backward navigation. No-op during prepare. More than
    /// [`REWIND_THRESHOLD_SECS`] into the current phase this restarts the
    /// current interval; otherwise it steps back to the previous one (or
    /// to prepare from interval 1). Does not alter `is_active`.
    pub fn previous_interval(&mut self) -> Option<Event> {
        if !self.can_go_previous() {
            return None;
        }
        let elapsed = self
            .config
            .duration_of(self.state.phase)
            .saturating_sub(self.state.remaining_secs);
        self.state = reduce(self.state, TimerAction::PreviousInterval, &self.config);
        Some(Event::IntervalRewound {
            phase: self.state.phase,
            interval: self.state.current_interval,
            restarted: elapsed > REWIND_THRESHOLD_SECS,
            at: Utc::now(),
        })
    }
}
