use bevy::prelude::*;
use vexel_playback_core::{FrameOutcome, PlaybackDriver};

/// Driver resource wrapping the host-agnostic core.
#[derive(Resource)]
pub struct VexelPlayback(pub PlaybackDriver);

/// Outcome staged from the per-frame pump for downstream systems
/// (keeps ordering explicit: Pump -> Apply).
#[derive(Resource, Default)]
pub struct LastFrame(pub FrameOutcome);
