//! Property-based tests over arbitrary configurations.

use proptest::prelude::*;

use tabata_core::timer::timeline;
use tabata_core::{ExerciseRotation, IntervalEngine, Phase, SessionConfig};

fn arb_config() -> impl Strategy<Value = SessionConfig> {
    (1u32..=120, 1u32..=120, 1u32..=120, 1u32..=20).prop_map(
        |(prepare_duration, work_duration, rest_duration, total_intervals)| SessionConfig {
            prepare_duration,
            work_duration,
            rest_duration,
            total_intervals,
        },
    )
}

proptest! {
    #[test]
    fn timeline_length_is_2n(config in arb_config()) {
        let entries = timeline::build(&config);
        prop_assert_eq!(entries.len(), 2 * config.total_intervals as usize);
    }

    #[test]
    fn sequential_numbers_are_contiguous(config in arb_config()) {
        let entries = timeline::build(&config);
        for (i, entry) in entries.iter().enumerate() {
            prop_assert_eq!(entry.sequential_number as usize, i + 1);
        }
    }

    #[test]
    fn closed_form_agrees_with_build(config in arb_config()) {
        let entries = timeline::build(&config);
        for entry in &entries {
            let interval = entry.work_interval.unwrap_or(1);
            let seq = timeline::sequential_number_of(entry.phase, interval);
            prop_assert_eq!(seq, entry.sequential_number);
            let indexed = &entries[seq as usize - 1];
            prop_assert_eq!(indexed.phase, entry.phase);
            prop_assert_eq!(indexed.work_interval, entry.work_interval);
        }
    }

    #[test]
    fn entry_durations_come_from_config(config in arb_config()) {
        for entry in timeline::build(&config) {
            let expected = match entry.phase {
                Phase::Prepare => config.prepare_duration,
                Phase::Work => config.work_duration,
                Phase::Rest => config.rest_duration,
            };
            prop_assert_eq!(entry.duration, expected);
        }
    }

    #[test]
    fn session_completes_in_total_secs_ticks(config in arb_config()) {
        let mut engine = IntervalEngine::new(config);
        engine.start();
        let mut ticks = 0u64;
        while !engine.is_complete() {
            engine.tick();
            ticks += 1;
            prop_assert!(ticks <= config.total_session_secs());
        }
        prop_assert_eq!(ticks, config.total_session_secs());
    }

    #[test]
    fn remaining_time_never_grows_while_ticking(config in arb_config()) {
        let mut engine = IntervalEngine::new(config);
        engine.start();
        while !engine.is_complete() {
            let before = engine.snapshot();
            let changed = engine.tick();
            // Within a phase the countdown strictly decreases; a boundary
            // resets it to the entered phase's duration.
            if changed.is_none() {
                if let tabata_core::Event::StateSnapshot { remaining_secs, .. } = before {
                    prop_assert!(engine.remaining_secs() < remaining_secs);
                }
            }
        }
    }

    #[test]
    fn rotation_has_no_consecutive_duplicates(config in arb_config(), seed in any::<u64>()) {
        let mut rotation = ExerciseRotation::default();
        let seq = rotation.get_or_create_seeded(&config, seed);
        prop_assert_eq!(seq.len(), config.total_intervals as usize);
        for pair in seq.windows(2) {
            prop_assert_ne!(&pair[0], &pair[1]);
        }
    }
}
