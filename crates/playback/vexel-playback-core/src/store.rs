//! AnimationStateStore: single source of truth for playback flags and
//! progress.
//!
//! Two producers write progress: the playback clock (automatic playback)
//! and an explicit seek queue (e.g. a scrubber). Seeks are queued on an
//! ordered single-consumer queue and applied in order; once applied they
//! are indistinguishable from clock updates as far as listeners are
//! concerned. All mutation happens on the owning task, so ordering holds
//! by construction and no locks are involved.

use std::collections::VecDeque;

use crate::error::PlaybackError;
use crate::event::{PlaybackEvent, PlaybackListener};
use crate::state::{AnimationState, RepeatCount};

/// Handle returned by [`AnimationStateStore::add_listener`].
pub type ListenerId = usize;

pub struct AnimationStateStore {
    state: AnimationState,
    seek_queue: VecDeque<f32>,
    listeners: Vec<(ListenerId, Box<dyn PlaybackListener + Send + Sync>)>,
    next_listener: ListenerId,
}

impl AnimationStateStore {
    /// Create a store around an initial state
    pub fn new(state: AnimationState) -> Self {
        Self {
            state,
            seek_queue: VecDeque::new(),
            listeners: Vec::new(),
            next_listener: 0,
        }
    }

    /// Snapshot of the shared record
    #[inline]
    pub fn state(&self) -> AnimationState {
        self.state
    }

    /// Last applied progress
    #[inline]
    pub fn progress(&self) -> f32 {
        self.state.progress
    }

    #[inline]
    pub fn is_playing(&self) -> bool {
        self.state.is_playing
    }

    #[inline]
    pub fn repeat_count(&self) -> RepeatCount {
        self.state.repeat_count
    }

    /// Toggle the playing flag. Never resets progress; re-activation
    /// reset is the clock owner's responsibility.
    pub fn set_playing(&mut self, playing: bool) {
        if self.state.is_playing == playing {
            return;
        }
        self.state.is_playing = playing;
        let event = if playing {
            PlaybackEvent::Started
        } else {
            PlaybackEvent::Paused
        };
        self.dispatch(event);
    }

    /// Update the repeat bound consulted by the clock. Takes effect on
    /// the next advance.
    #[inline]
    pub fn set_repeat_count(&mut self, repeat: RepeatCount) {
        self.state.repeat_count = repeat;
    }

    /// Queue an externally pushed progress value in [0, 1).
    pub fn push_seek(&mut self, progress: f32) -> Result<(), PlaybackError> {
        if !progress.is_finite() || !(0.0..1.0).contains(&progress) {
            return Err(PlaybackError::InvalidProgress { progress });
        }
        self.seek_queue.push_back(progress);
        Ok(())
    }

    /// Number of queued, not yet applied seeks
    #[inline]
    pub fn pending_seeks(&self) -> usize {
        self.seek_queue.len()
    }

    /// Drain the seek queue in order, each value overwriting stored
    /// progress and notifying listeners. Returns how many were applied.
    pub fn apply_pending_seeks(&mut self) -> usize {
        let mut applied = 0;
        while let Some(progress) = self.seek_queue.pop_front() {
            self.state.progress = progress;
            self.notify_progress(progress);
            applied += 1;
        }
        applied
    }

    /// Apply a clock-driven progress value in [0, 1]; exactly 1.0 is
    /// only valid as the terminal pin.
    pub fn apply_progress(&mut self, progress: f32) -> Result<(), PlaybackError> {
        if !progress.is_finite() || !(0.0..=1.0).contains(&progress) {
            return Err(PlaybackError::InvalidProgress { progress });
        }
        self.state.progress = progress;
        self.notify_progress(progress);
        Ok(())
    }

    /// Reset progress to zero (re-activation path), notifying listeners.
    pub fn reset_progress(&mut self) {
        self.state.progress = 0.0;
        self.notify_progress(0.0);
    }

    /// Terminal transition: pin progress to exactly 1.0 and clear the
    /// playing flag.
    pub fn finish(&mut self) {
        self.state.progress = 1.0;
        self.state.is_playing = false;
        self.notify_progress(1.0);
        self.dispatch(PlaybackEvent::Ended { progress: 1.0 });
    }

    /// Subscribe a listener, returning a handle for unsubscription
    pub fn add_listener(&mut self, listener: Box<dyn PlaybackListener + Send + Sync>) -> ListenerId {
        let id = self.next_listener;
        self.next_listener += 1;
        self.listeners.push((id, listener));
        id
    }

    /// Unsubscribe a listener. Returns false when the handle is unknown.
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    /// Remove all listeners
    pub fn clear_listeners(&mut self) {
        self.listeners.clear();
    }

    /// Number of subscribed listeners
    #[inline]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Dispatch a semantic event to all listeners
    pub fn dispatch(&mut self, event: PlaybackEvent) {
        for (_, listener) in &mut self.listeners {
            listener.on_event(&event);
        }
    }

    fn notify_progress(&mut self, progress: f32) {
        for (_, listener) in &mut self.listeners {
            listener.on_progress(progress);
        }
    }
}

impl Default for AnimationStateStore {
    fn default() -> Self {
        Self::new(AnimationState::default())
    }
}
