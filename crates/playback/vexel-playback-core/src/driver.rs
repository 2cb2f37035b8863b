//! PlaybackDriver: owns the frame-driven loop that binds the clock, the
//! state store and the composition slot together.
//!
//! The host pumps `on_frame` at most once per display refresh and wires
//! its lifecycle into `on_start`/`on_stop`/`dispose`. Loader results
//! arrive through `on_composition_loaded`, which is a guarded no-op once
//! the driver is disposed — the loader may complete after teardown.

use serde::{Deserialize, Serialize};

use crate::clock::PlaybackClock;
use crate::composition::CompositionHandle;
use crate::config::PlaybackConfig;
use crate::error::PlaybackError;
use crate::event::{PlaybackEvent, PlaybackListener};
use crate::render::{FrameRenderer, TargetSize};
use crate::state::{AnimationState, PlaybackPhase, RepeatCount};
use crate::store::{AnimationStateStore, ListenerId};

/// What a single frame pump did.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FrameOutcome {
    /// Progress after this frame (clock advance, then drained seeks).
    pub progress: f32,
    /// The clock advanced this frame.
    pub advanced: bool,
    /// The repeat bound was exceeded this frame.
    pub ended: bool,
    /// Seek values drained this frame.
    pub seeks_applied: usize,
}

pub struct PlaybackDriver {
    store: AnimationStateStore,
    clock: PlaybackClock,
    composition: Option<CompositionHandle>,
    last_frame_ns: Option<u64>,
    started: bool,
    disposed: bool,
}

impl PlaybackDriver {
    /// Create a driver from an initial configuration
    pub fn new(config: PlaybackConfig) -> Self {
        let mut state = AnimationState::new(config.autoplay);
        state.repeat_count = config.repeat_count;
        let mut clock = PlaybackClock::new(config.repeat_count);
        if config.autoplay {
            clock.activate();
        }
        Self {
            store: AnimationStateStore::new(state),
            clock,
            composition: None,
            last_frame_ns: None,
            started: false,
            disposed: false,
        }
    }

    #[inline]
    pub fn state(&self) -> AnimationState {
        self.store.state()
    }

    #[inline]
    pub fn progress(&self) -> f32 {
        self.store.progress()
    }

    #[inline]
    pub fn is_playing(&self) -> bool {
        self.store.is_playing()
    }

    #[inline]
    pub fn phase(&self) -> PlaybackPhase {
        self.clock.phase()
    }

    #[inline]
    pub fn composition(&self) -> Option<&CompositionHandle> {
        self.composition.as_ref()
    }

    #[inline]
    pub fn is_started(&self) -> bool {
        self.started
    }

    #[inline]
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Toggle playback. Re-activation from the terminal pin resets
    /// progress to 0 before the next advance; a plain pause/resume keeps
    /// the current progress.
    pub fn set_playing(&mut self, playing: bool) {
        if self.disposed {
            log::warn!("set_playing({playing}) on a disposed driver; ignoring");
            return;
        }
        if playing == self.store.is_playing() {
            return;
        }
        if playing {
            if self.store.state().at_terminal() {
                self.store.reset_progress();
            }
            self.clock.activate();
            self.last_frame_ns = None;
        } else {
            self.clock.deactivate();
        }
        self.store.set_playing(playing);
    }

    /// Update the repeat bound; takes effect on the next advance
    pub fn set_repeat_count(&mut self, repeat: RepeatCount) {
        self.store.set_repeat_count(repeat);
        self.clock.set_repeat_count(repeat);
    }

    /// Queue an external seek in [0, 1); applied on the next frame pump.
    /// Errors with [`PlaybackError::Disposed`] after teardown: unlike the
    /// infallible entry points, a dropped seek is worth surfacing.
    pub fn push_seek(&mut self, progress: f32) -> Result<(), PlaybackError> {
        if self.disposed {
            return Err(PlaybackError::Disposed);
        }
        self.store.push_seek(progress)
    }

    /// Subscribe a listener to state updates
    pub fn add_listener(&mut self, listener: Box<dyn PlaybackListener + Send + Sync>) -> ListenerId {
        self.store.add_listener(listener)
    }

    /// Unsubscribe a listener
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        self.store.remove_listener(id)
    }

    /// Install or clear a composition directly (synchronous hosts)
    pub fn set_composition(&mut self, composition: Option<CompositionHandle>) {
        if self.disposed {
            log::warn!("composition installed on a disposed driver; ignoring");
            return;
        }
        if let Some(handle) = &composition {
            if !handle.is_renderable() {
                log::debug!("zero-duration composition installed; advancement will be skipped");
            }
            self.store.dispatch(PlaybackEvent::CompositionLoaded {
                duration_secs: handle.duration_secs(),
            });
        }
        self.composition = composition;
        self.last_frame_ns = None;
    }

    /// Loader callback entry. Failures are logged and leave any current
    /// composition untouched; nothing is retried here.
    pub fn on_composition_loaded(&mut self, result: Result<CompositionHandle, PlaybackError>) {
        if self.disposed {
            log::warn!("composition load completed after dispose; ignoring");
            return;
        }
        match result {
            Ok(handle) => self.set_composition(Some(handle)),
            Err(err) => {
                log::error!("failed to load composition: {err}");
                self.store.dispatch(PlaybackEvent::LoadFailed {
                    reason: err.to_string(),
                });
            }
        }
    }

    /// Host lifecycle: view became visible/started
    pub fn on_start(&mut self) {
        if self.disposed {
            return;
        }
        self.started = true;
        self.last_frame_ns = None;
    }

    /// Host lifecycle: view stopped. Playback flags are untouched; the
    /// frame baseline is retired so resuming never sees a stall-sized
    /// delta.
    pub fn on_stop(&mut self) {
        self.started = false;
        self.last_frame_ns = None;
    }

    /// Tear down both suspension points. Every later frame, seek or
    /// loader callback is a guarded no-op.
    pub fn dispose(&mut self) {
        self.disposed = true;
        self.started = false;
        self.last_frame_ns = None;
    }

    /// Per-frame pump, called with one monotonic timestamp per display
    /// refresh.
    ///
    /// Advancement requires the lifecycle to be started, `is_playing`,
    /// and a composition with positive duration; otherwise the frame
    /// only retires the baseline timestamp. The first frame after
    /// (re-)activation records the baseline without advancing. Pending
    /// seeks drain after the advance, so a seek pushed mid-frame wins
    /// the frame.
    pub fn on_frame(&mut self, frame_ns: u64) -> Result<FrameOutcome, PlaybackError> {
        let mut outcome = FrameOutcome {
            progress: self.store.progress(),
            ..Default::default()
        };
        if self.disposed {
            return Ok(outcome);
        }

        let duration_secs = self
            .composition
            .as_ref()
            .filter(|c| c.is_renderable())
            .map(|c| c.duration_secs());
        let active = self.started && self.store.is_playing();

        match (active, duration_secs) {
            (true, Some(duration_secs)) => {
                if let Some(previous_ns) = self.last_frame_ns.replace(frame_ns) {
                    let tick = self.clock.advance(
                        previous_ns,
                        frame_ns,
                        duration_secs,
                        self.store.progress(),
                    )?;
                    if tick.finished {
                        self.store.finish();
                        outcome.ended = true;
                    } else {
                        self.store.apply_progress(tick.progress)?;
                    }
                    outcome.advanced = true;
                }
            }
            _ => {
                self.last_frame_ns = None;
            }
        }

        outcome.seeks_applied = self.store.apply_pending_seeks();
        outcome.progress = self.store.progress();
        Ok(outcome)
    }

    /// Render the current frame through the external drawing primitive.
    /// Skipped entirely (Ok) when disposed, or when the composition is
    /// absent or zero-duration.
    pub fn render<R: FrameRenderer>(
        &self,
        renderer: &mut R,
        target: TargetSize,
    ) -> Result<(), PlaybackError> {
        if self.disposed {
            return Ok(());
        }
        let Some(composition) = self.composition.as_ref().filter(|c| c.is_renderable()) else {
            return Ok(());
        };
        renderer.draw_frame(composition, self.store.progress(), target)
    }
}

impl Default for PlaybackDriver {
    fn default() -> Self {
        Self::new(PlaybackConfig::default())
    }
}
