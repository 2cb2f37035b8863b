//! Error types for the playback core

use serde::{Deserialize, Serialize};

/// Error type for playback operations
#[derive(thiserror::Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum PlaybackError {
    /// Composition duration is unusable for advancement
    #[error("Invalid composition duration: {seconds}s")]
    InvalidDuration { seconds: f32 },

    /// Progress value outside the normalized range
    #[error("Invalid progress value: {progress}")]
    InvalidProgress { progress: f32 },

    /// Frame timestamps must be monotonic
    #[error("Frame timestamp went backwards: {current_ns}ns after {previous_ns}ns")]
    NonMonotonicFrame { previous_ns: u64, current_ns: u64 },

    /// The clock can only advance while playing
    #[error("Clock cannot advance in phase '{phase}'")]
    ClockNotActive { phase: String },

    /// External loader reported a failure
    #[error("Failed to load composition from {origin}: {reason}")]
    CompositionLoadFailed { origin: String, reason: String },

    /// Operation on a disposed driver
    #[error("Playback driver is disposed")]
    Disposed,

    /// Drawing primitive reported a failure
    #[error("Render failed: {reason}")]
    RenderFailed { reason: String },

    /// Generic playback error
    #[error("Playback error: {message}")]
    Generic { message: String },
}

impl PlaybackError {
    /// Create a new generic error
    pub fn new(message: impl Into<String>) -> Self {
        Self::Generic {
            message: message.into(),
        }
    }

    /// Check if this is a recoverable error
    #[inline]
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::NonMonotonicFrame { .. }
                | Self::ClockNotActive { .. }
                | Self::CompositionLoadFailed { .. }
                | Self::RenderFailed { .. }
        )
    }

    /// Get error category for logging/metrics
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::InvalidDuration { .. } | Self::InvalidProgress { .. } => "validation",
            Self::NonMonotonicFrame { .. } | Self::ClockNotActive { .. } => "clock",
            Self::CompositionLoadFailed { .. } => "loader",
            Self::Disposed => "lifecycle",
            Self::RenderFailed { .. } => "render",
            Self::Generic { .. } => "generic",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let error = PlaybackError::new("test error");
        assert!(matches!(error, PlaybackError::Generic { .. }));
    }

    #[test]
    fn test_error_recoverability() {
        let recoverable = PlaybackError::CompositionLoadFailed {
            origin: "url http://example.com/a.json".to_string(),
            reason: "timeout".to_string(),
        };
        assert!(recoverable.is_recoverable());
        assert_eq!(
            recoverable.to_string(),
            "Failed to load composition from url http://example.com/a.json: timeout"
        );

        let non_recoverable = PlaybackError::InvalidDuration { seconds: -1.0 };
        assert!(!non_recoverable.is_recoverable());
    }

    #[test]
    fn test_error_categories() {
        assert_eq!(
            PlaybackError::InvalidProgress { progress: 2.0 }.category(),
            "validation"
        );
        assert_eq!(
            PlaybackError::NonMonotonicFrame {
                previous_ns: 10,
                current_ns: 5
            }
            .category(),
            "clock"
        );
        assert_eq!(PlaybackError::Disposed.category(), "lifecycle");
    }

    #[test]
    fn test_serialization() {
        let error = PlaybackError::new("test");
        let serialized = serde_json::to_string(&error).unwrap();
        let deserialized: PlaybackError = serde_json::from_str(&serialized).unwrap();
        assert_eq!(error, deserialized);
    }
}
