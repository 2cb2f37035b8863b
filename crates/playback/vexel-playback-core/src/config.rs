//! Driver configuration.

use serde::{Deserialize, Serialize};

use crate::state::RepeatCount;

/// Initial playback behavior for a driver.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlaybackConfig {
    /// Begin playing as soon as the lifecycle starts and a renderable
    /// composition is installed.
    pub autoplay: bool,
    /// Additional loops after the first full play-through.
    pub repeat_count: RepeatCount,
}

impl PlaybackConfig {
    pub fn new() -> Self {
        Self {
            autoplay: true,
            repeat_count: RepeatCount::default(),
        }
    }

    /// Start paused
    #[inline]
    pub fn paused(mut self) -> Self {
        self.autoplay = false;
        self
    }

    /// Set the repeat bound
    #[inline]
    pub fn with_repeat_count(mut self, repeat: RepeatCount) -> Self {
        self.repeat_count = repeat;
        self
    }

    /// Loop forever
    #[inline]
    pub fn looping(mut self) -> Self {
        self.repeat_count = RepeatCount::Infinite;
        self
    }
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self::new()
    }
}
