//! Bevy adapter for the Vexel playback core.
//!
//! Inserts a [`VexelPlayback`] driver resource and pumps it once per
//! `Update` with a monotonic timestamp taken from Bevy's clock. The
//! per-frame outcome is staged in [`LastFrame`] so downstream systems can
//! react (Pump -> Apply ordering).

use bevy::prelude::*;
use vexel_playback_core::{PlaybackConfig, PlaybackDriver};

pub mod resources;
pub mod systems;

pub use resources::{LastFrame, VexelPlayback};
pub use systems::{lifecycle_start_system, tick_playback_system};

/// Plugin wiring the playback driver into the app schedule.
#[derive(Default)]
pub struct VexelPlaybackPlugin {
    pub config: PlaybackConfig,
}

impl VexelPlaybackPlugin {
    pub fn with_config(config: PlaybackConfig) -> Self {
        Self { config }
    }
}

impl Plugin for VexelPlaybackPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(VexelPlayback(PlaybackDriver::new(self.config)))
            .init_resource::<LastFrame>()
            .add_systems(Startup, lifecycle_start_system)
            .add_systems(Update, tick_playback_system);
    }
}
