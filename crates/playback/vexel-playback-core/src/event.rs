//! Playback notifications for host observers.

use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

/// Discrete semantic signals emitted by the state store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum PlaybackEvent {
    /// Playback was (re-)activated
    Started,
    /// Playback was paused
    Paused,
    /// The repeat bound was exceeded; progress is pinned
    Ended { progress: f32 },
    /// A composition was installed
    CompositionLoaded { duration_secs: f32 },
    /// The external loader reported a failure
    LoadFailed { reason: String },
}

impl PlaybackEvent {
    /// Get the name of this event
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Started => "started",
            Self::Paused => "paused",
            Self::Ended { .. } => "ended",
            Self::CompositionLoaded { .. } => "composition_loaded",
            Self::LoadFailed { .. } => "load_failed",
        }
    }

    /// Check if this event ends the current playback cycle
    #[inline]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Ended { .. })
    }
}

/// Observer of the shared playback state.
///
/// `on_progress` fires for every applied progress value, with no
/// distinction between clock-driven updates and explicit seeks.
pub trait PlaybackListener {
    /// A progress value was applied to the shared state
    fn on_progress(&mut self, _progress: f32) {}

    /// A semantic playback event occurred
    fn on_event(&mut self, _event: &PlaybackEvent) {}
}

/// Listener that records everything it sees; clones share storage so a
/// test can keep one handle and register the other.
#[derive(Clone, Default)]
pub struct CollectingListener {
    events: Arc<Mutex<Vec<PlaybackEvent>>>,
    progress: Arc<Mutex<Vec<f32>>>,
}

impl CollectingListener {
    /// Create a new collecting listener
    pub fn new() -> Self {
        Self::default()
    }

    /// All events seen so far
    pub fn events(&self) -> Vec<PlaybackEvent> {
        self.events.lock().unwrap().clone()
    }

    /// All progress updates seen so far, in order
    pub fn progress_updates(&self) -> Vec<f32> {
        self.progress.lock().unwrap().clone()
    }

    /// Last progress update, if any
    pub fn last_progress(&self) -> Option<f32> {
        self.progress.lock().unwrap().last().copied()
    }

    /// Clear recorded events and progress updates
    pub fn clear(&self) {
        self.events.lock().unwrap().clear();
        self.progress.lock().unwrap().clear();
    }
}

impl PlaybackListener for CollectingListener {
    fn on_progress(&mut self, progress: f32) {
        self.progress.lock().unwrap().push(progress);
    }

    fn on_event(&mut self, event: &PlaybackEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}
