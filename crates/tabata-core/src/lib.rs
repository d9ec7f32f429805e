//! # Tabata Core Library
//!
//! This library provides the core logic for the Tabata interval timer.
//! It implements a CLI-first philosophy where the whole workout protocol
//! (prepare, then repeated work/rest cycles) is driven by a small state
//! machine that any frontend can poll.
//!
//! ## Architecture
//!
//! - **Interval Engine**: a tick-driven state machine. It has no internal
//!   thread or clock; the caller invokes `tick()` once per elapsed second
//!   and the engine performs the phase transition at zero.
//! - **Session Timeline**: a pure expansion of a [`SessionConfig`] into the
//!   flat ordered list of phases the session will pass through, used for
//!   progress display.
//! - **Exercise Rotation**: a per-session random assignment of exercises to
//!   work intervals, with no two consecutive intervals sharing an exercise.
//!
//! ## Key Components
//!
//! - [`IntervalEngine`]: core timer state machine
//! - [`SessionConfig`]: immutable session parameters (normal or debug variant)
//! - [`ExerciseRotation`]: memoized exercise assignment with a session lifecycle
//! - [`Event`]: state-change events emitted by engine commands

pub mod config;
pub mod error;
pub mod events;
pub mod exercises;
pub mod timer;

pub use config::SessionConfig;
pub use error::{ConfigError, Result};
pub use events::Event;
pub use exercises::ExerciseRotation;
pub use timer::{IntervalEngine, Phase, TimelineEntry, TimerState};
