//! Session timeline builder.
//!
//! Expands a [`SessionConfig`] into the flat ordered list of phases the
//! session will pass through: one prepare entry, then alternating
//! work/rest entries with no rest after the final work interval.
//! The timeline is a pure function of the configuration and is built once
//! per session; the engine never mutates it.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::SessionConfig;

/// The three recurring states of an interval session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Prepare,
    Work,
    Rest,
}

impl Phase {
    pub fn label(&self) -> &'static str {
        match self {
            Phase::Prepare => "Prepare",
            Phase::Work => "Work",
            Phase::Rest => "Rest",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One position in the flattened session timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineEntry {
    /// 1-based contiguous position in the timeline.
    pub sequential_number: u32,
    pub phase: Phase,
    /// Duration in seconds.
    pub duration: u32,
    /// Owning 1-based work interval; `None` only for the prepare entry.
    /// A rest entry shares its interval with the work entry it follows.
    pub work_interval: Option<u32>,
}

/// Build the complete session timeline.
///
/// Structure: 1 prepare + (N work + N-1 rest) = 2N entries total.
pub fn build(config: &SessionConfig) -> Vec<TimelineEntry> {
    let mut entries = Vec::with_capacity(config.timeline_len());
    let mut sequential_number = 1;

    entries.push(TimelineEntry {
        sequential_number,
        phase: Phase::Prepare,
        duration: config.prepare_duration,
        work_interval: None,
    });

    for i in 1..=config.total_intervals {
        sequential_number += 1;
        entries.push(TimelineEntry {
            sequential_number,
            phase: Phase::Work,
            duration: config.work_duration,
            work_interval: Some(i),
        });

        // No rest after the last work interval.
        if i < config.total_intervals {
            sequential_number += 1;
            entries.push(TimelineEntry {
                sequential_number,
                phase: Phase::Rest,
                duration: config.rest_duration,
                work_interval: Some(i),
            });
        }
    }

    entries
}

/// Closed-form sequential number for a (phase, interval) pair.
///
/// Mapping: prepare -> 1; work interval N -> 2N; rest after interval
/// N -> 2N + 1. Must agree with the position the same pair occupies in
/// [`build`]'s output.
pub fn sequential_number_of(phase: Phase, current_interval: u32) -> u32 {
    match phase {
        Phase::Prepare => 1,
        Phase::Work => 2 * current_interval,
        Phase::Rest => 2 * current_interval + 1,
    }
}
