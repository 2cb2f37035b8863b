//! Observable playback state: phase, repeat bound and the shared record.

use serde::{Deserialize, Serialize};

/// Number of additional loops after the first full play-through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RepeatCount {
    /// Play once, then `n` more times.
    Finite(u32),
    /// Never stop automatically.
    Infinite,
}

impl RepeatCount {
    /// Play a single time through, no repeats.
    pub const ONCE: RepeatCount = RepeatCount::Finite(0);

    /// Check if this bound never stops playback
    #[inline]
    pub fn is_infinite(&self) -> bool {
        matches!(self, Self::Infinite)
    }

    /// True when `completed` full loops overrun this bound.
    #[inline]
    pub fn exceeded_by(&self, completed: u32) -> bool {
        match self {
            Self::Finite(n) => completed > *n,
            Self::Infinite => false,
        }
    }
}

impl Default for RepeatCount {
    fn default() -> Self {
        Self::ONCE
    }
}

impl From<u32> for RepeatCount {
    fn from(n: u32) -> Self {
        Self::Finite(n)
    }
}

/// Phase of the playback clock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlaybackPhase {
    /// Not advancing; waiting for activation
    Idle,
    /// Advancing on each frame
    Playing,
    /// Terminal for the current cycle; requires explicit re-activation
    Stopped,
}

impl PlaybackPhase {
    /// Get the name of this phase
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Playing => "playing",
            Self::Stopped => "stopped",
        }
    }

    /// Check if the clock is actively playing
    #[inline]
    pub fn is_playing(&self) -> bool {
        matches!(self, Self::Playing)
    }

    /// Check if the clock can be (re-)activated
    #[inline]
    pub fn can_resume(&self) -> bool {
        matches!(self, Self::Idle | Self::Stopped)
    }
}

impl From<&str> for PlaybackPhase {
    fn from(s: &str) -> Self {
        match s {
            "playing" => Self::Playing,
            "stopped" => Self::Stopped,
            _ => Self::Idle,
        }
    }
}

/// The shared mutable record host UI binds against.
///
/// `progress` stays in [0, 1) except at the terminal repeat boundary,
/// where it is pinned to exactly 1.0 and `is_playing` becomes false.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnimationState {
    pub is_playing: bool,
    pub repeat_count: RepeatCount,
    pub progress: f32,
}

impl AnimationState {
    /// Create a fresh state at progress zero
    #[inline]
    pub fn new(is_playing: bool) -> Self {
        Self {
            is_playing,
            repeat_count: RepeatCount::default(),
            progress: 0.0,
        }
    }

    /// Check if progress is pinned at the terminal boundary
    #[inline]
    pub fn at_terminal(&self) -> bool {
        self.progress == 1.0
    }
}

impl Default for AnimationState {
    fn default() -> Self {
        Self::new(false)
    }
}
