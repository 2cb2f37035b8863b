use bevy::prelude::*;

use crate::resources::{LastFrame, VexelPlayback};

/// Maps the host lifecycle start to the driver. Hosts tearing a view
/// down call `PlaybackDriver::on_stop`/`dispose` from their own exit
/// hooks.
pub fn lifecycle_start_system(mut playback: ResMut<VexelPlayback>) {
    playback.0.on_start();
}

/// Per-frame pump: one monotonic timestamp per refresh, taken from
/// Bevy's clock. Errors (e.g. a non-monotonic timestamp) skip the frame
/// rather than poisoning the driver.
pub fn tick_playback_system(
    mut playback: ResMut<VexelPlayback>,
    time: Res<Time>,
    mut last: ResMut<LastFrame>,
) {
    let frame_ns = time.elapsed().as_nanos() as u64;
    match playback.0.on_frame(frame_ns) {
        Ok(outcome) => last.0 = outcome,
        Err(err) => warn!("playback frame skipped: {err}"),
    }
}
