//! Audio cue collaborator.
//!
//! The presentation layer fires a short cue at 3/2/1 seconds remaining
//! and a longer, louder cue at every phase transition. The cue sink must
//! degrade silently when the terminal cannot emit sound; it never
//! interrupts the countdown.

use std::io::Write;

use tabata_core::Phase;

pub const BEEP_DURATION_MS: u32 = 150;
pub const BEEP_VOLUME: f32 = 0.3;
pub const FINAL_BEEP_DURATION_MS: u32 = 300;
pub const FINAL_BEEP_VOLUME: f32 = 0.5;

/// Cue frequency tied to a phase.
pub fn frequency_for(phase: Phase) -> u32 {
    match phase {
        Phase::Prepare => 660,
        Phase::Work => 880,
        Phase::Rest => 440,
    }
}

pub trait AudioCue {
    fn play_cue(&self, frequency_hz: u32, duration_ms: u32, volume: f32);
}

/// Emits the terminal bell. Frequency, duration and volume are accepted
/// for interface compatibility; the bell itself is fixed by the terminal.
pub struct TerminalBell;

impl AudioCue for TerminalBell {
    fn play_cue(&self, _frequency_hz: u32, _duration_ms: u32, _volume: f32) {
        let mut out = std::io::stdout();
        // Swallow I/O errors: audio must never break the countdown.
        let _ = out.write_all(b"\x07");
        let _ = out.flush();
    }
}

/// Used with `--no-audio`.
pub struct NullAudio;

impl AudioCue for NullAudio {
    fn play_cue(&self, _frequency_hz: u32, _duration_ms: u32, _volume: f32) {}
}
