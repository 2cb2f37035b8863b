//! Drawing-primitive contract and target-fit scaling.

use serde::{Deserialize, Serialize};

use crate::composition::{CompositionHandle, FrameBounds};
use crate::error::PlaybackError;

/// Target size in host pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TargetSize {
    pub width: f32,
    pub height: f32,
}

impl TargetSize {
    #[inline]
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Per-axis scale factors applied to a composition's frame bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RenderScale {
    pub x: f32,
    pub y: f32,
}

/// Scale width and height independently so the frame bounds fill
/// `target`. Non-uniform scale is permitted here; keeping the aspect
/// ratio is the container's job via [`FrameBounds::aspect_ratio`].
pub fn fill_scale(bounds: FrameBounds, target: TargetSize) -> RenderScale {
    let x = if bounds.width > 0.0 {
        target.width / bounds.width
    } else {
        1.0
    };
    let y = if bounds.height > 0.0 {
        target.height / bounds.height
    } else {
        1.0
    };
    RenderScale { x, y }
}

/// External drawing primitive: renders one frame at `progress` into the
/// host-provided surface, scaled to `target`.
pub trait FrameRenderer {
    fn draw_frame(
        &mut self,
        composition: &CompositionHandle,
        progress: f32,
        target: TargetSize,
    ) -> Result<(), PlaybackError>;
}
