//! Vexel Playback Core (host-agnostic)
//!
//! Converts wall-clock frame timestamps into a looping, repeat-bounded,
//! normalized progress value and exposes the observable playback state a
//! reactive host binds against. Parsing, interpolation and rasterization
//! stay external: the core only reads a composition's duration and frame
//! bounds and hands progress to a host-provided drawing primitive.

pub mod clock;
pub mod composition;
pub mod config;
pub mod driver;
pub mod error;
pub mod event;
pub mod render;
pub mod state;
pub mod store;

// Re-exports for consumers (adapters)
pub use clock::{ClockTick, PlaybackClock};
pub use composition::{
    CompositionHandle, CompositionLoader, CompositionSource, CompositionTask, FrameBounds,
    SourceFormat,
};
pub use config::PlaybackConfig;
pub use driver::{FrameOutcome, PlaybackDriver};
pub use error::PlaybackError;
pub use event::{CollectingListener, PlaybackEvent, PlaybackListener};
pub use render::{fill_scale, FrameRenderer, RenderScale, TargetSize};
pub use state::{AnimationState, PlaybackPhase, RepeatCount};
pub use store::{AnimationStateStore, ListenerId};

/// Playback result type
pub type Result<T> = core::result::Result<T, PlaybackError>;
