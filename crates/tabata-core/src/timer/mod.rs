mod engine;
pub mod timeline;

pub use engine::{reduce, IntervalEngine, TimerAction, TimerState, REWIND_THRESHOLD_SECS};
pub use timeline::{Phase, TimelineEntry};
