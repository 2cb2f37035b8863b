//! PlaybackClock: wall-clock frame timestamps → looping, repeat-bounded progress.
//!
//! The clock is pure time math plus a repeat counter; it never touches the
//! shared state itself. The caller (normally [`crate::driver::PlaybackDriver`])
//! applies each tick's result and clears `is_playing` on the terminal
//! transition.

use serde::{Deserialize, Serialize};

use crate::error::PlaybackError;
use crate::state::{PlaybackPhase, RepeatCount};

const NANOS_PER_SECOND: f32 = 1_000_000_000.0;

/// Result of one clock advance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClockTick {
    /// New progress in [0, 1), or exactly 1.0 when `finished`.
    pub progress: f32,
    /// Whole loops completed by this call (can exceed 1 after a stall).
    pub wraps: u32,
    /// Repeat bound exceeded; the caller must clear `is_playing`.
    pub finished: bool,
}

/// Converts successive frame timestamps into a looping progress value
/// bounded by a repeat count.
#[derive(Debug, Clone)]
pub struct PlaybackClock {
    repeat: RepeatCount,
    repeats_completed: u32,
    phase: PlaybackPhase,
}

impl PlaybackClock {
    /// Create a new clock in the Idle phase
    pub fn new(repeat: RepeatCount) -> Self {
        Self {
            repeat,
            repeats_completed: 0,
            phase: PlaybackPhase::Idle,
        }
    }

    /// Current phase
    #[inline]
    pub fn phase(&self) -> PlaybackPhase {
        self.phase
    }

    /// Configured repeat bound
    #[inline]
    pub fn repeat_count(&self) -> RepeatCount {
        self.repeat
    }

    /// Whole loops completed since the last activation
    #[inline]
    pub fn repeats_completed(&self) -> u32 {
        self.repeats_completed
    }

    /// Update the repeat bound. Takes effect on the next advance.
    #[inline]
    pub fn set_repeat_count(&mut self, repeat: RepeatCount) {
        self.repeat = repeat;
    }

    /// Move to Playing. The loop counter restarts on every activation.
    pub fn activate(&mut self) {
        self.phase = PlaybackPhase::Playing;
        self.repeats_completed = 0;
    }

    /// Pause: Playing → Idle. No effect in other phases.
    pub fn deactivate(&mut self) {
        if self.phase.is_playing() {
            self.phase = PlaybackPhase::Idle;
        }
    }

    /// Advance progress from one frame timestamp to the next.
    ///
    /// `new_progress = (previous_progress + Δt / duration) mod 1`. The number
    /// of whole loops passed this call is `floor(previous_progress + Δt / duration)`,
    /// so a long stall that spans several loops counts each of them. When the
    /// repeat counter overruns the bound, progress is pinned to exactly 1.0,
    /// `finished` is set and the clock moves to Stopped.
    ///
    /// Callers must skip the clock entirely for absent or zero-duration
    /// compositions; a non-positive duration here is an error.
    pub fn advance(
        &mut self,
        previous_ns: u64,
        current_ns: u64,
        duration_secs: f32,
        previous_progress: f32,
    ) -> Result<ClockTick, PlaybackError> {
        if !self.phase.is_playing() {
            return Err(PlaybackError::ClockNotActive {
                phase: self.phase.name().to_string(),
            });
        }
        if !duration_secs.is_finite() || duration_secs <= 0.0 {
            return Err(PlaybackError::InvalidDuration {
                seconds: duration_secs,
            });
        }
        if current_ns < previous_ns {
            return Err(PlaybackError::NonMonotonicFrame {
                previous_ns,
                current_ns,
            });
        }
        if !(0.0..1.0).contains(&previous_progress) {
            return Err(PlaybackError::InvalidProgress {
                progress: previous_progress,
            });
        }

        let delta_progress = (current_ns - previous_ns) as f32 / NANOS_PER_SECOND / duration_secs;
        let raw = previous_progress + delta_progress;
        let wraps = raw.floor() as u32;
        let mut progress = raw - raw.floor();

        self.repeats_completed = self.repeats_completed.saturating_add(wraps);
        let finished = self.repeat.exceeded_by(self.repeats_completed);
        if finished {
            progress = 1.0;
            self.phase = PlaybackPhase::Stopped;
        }

        Ok(ClockTick {
            progress,
            wraps,
            finished,
        })
    }
}

impl Default for PlaybackClock {
    fn default() -> Self {
        Self::new(RepeatCount::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn playing_clock(repeat: RepeatCount) -> PlaybackClock {
        let mut clock = PlaybackClock::new(repeat);
        clock.activate();
        clock
    }

    #[test]
    fn test_advance_requires_playing_phase() {
        let mut clock = PlaybackClock::new(RepeatCount::Infinite);
        let err = clock.advance(0, 1, 1.0, 0.0).unwrap_err();
        assert!(matches!(err, PlaybackError::ClockNotActive { .. }));
    }

    #[test]
    fn test_advance_rejects_bad_inputs() {
        let mut clock = playing_clock(RepeatCount::Infinite);
        assert!(matches!(
            clock.advance(0, 1, 0.0, 0.0),
            Err(PlaybackError::InvalidDuration { .. })
        ));
        assert!(matches!(
            clock.advance(10, 5, 1.0, 0.0),
            Err(PlaybackError::NonMonotonicFrame { .. })
        ));
        assert!(matches!(
            clock.advance(0, 1, 1.0, 1.0),
            Err(PlaybackError::InvalidProgress { .. })
        ));
    }

    #[test]
    fn test_activation_restarts_loop_counter() {
        let mut clock = playing_clock(RepeatCount::Infinite);
        let tick = clock.advance(0, 3_000_000_000, 1.0, 0.0).unwrap();
        assert_eq!(tick.wraps, 3);
        assert_eq!(clock.repeats_completed(), 3);

        clock.deactivate();
        clock.activate();
        assert_eq!(clock.repeats_completed(), 0);
    }
}
