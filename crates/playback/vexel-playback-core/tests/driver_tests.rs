use vexel_playback_core::{
    CollectingListener, CompositionHandle, FrameBounds, FrameRenderer, PlaybackConfig,
    PlaybackDriver, PlaybackError, PlaybackEvent, PlaybackPhase, RepeatCount, TargetSize,
};

const SECOND_NS: u64 = 1_000_000_000;

fn composition(duration_secs: f32) -> CompositionHandle {
    CompositionHandle::new(duration_secs, FrameBounds::new(100.0, 50.0)).unwrap()
}

fn looping_driver() -> PlaybackDriver {
    let mut driver = PlaybackDriver::new(PlaybackConfig::new().looping());
    driver.set_composition(Some(composition(1.0)));
    driver.on_start();
    driver
}

#[test]
fn advancement_requires_lifecycle_start() {
    let mut driver = PlaybackDriver::new(PlaybackConfig::new().looping());
    driver.set_composition(Some(composition(1.0)));

    // Not started: frames only retire the baseline.
    assert!(!driver.on_frame(0).unwrap().advanced);
    assert!(!driver.on_frame(SECOND_NS).unwrap().advanced);
    assert_eq!(driver.progress(), 0.0);

    driver.on_start();
    // First frame after start records the baseline.
    assert!(!driver.on_frame(2 * SECOND_NS).unwrap().advanced);
    let outcome = driver.on_frame(2 * SECOND_NS + SECOND_NS / 4).unwrap();
    assert!(outcome.advanced);
    assert_eq!(outcome.progress, 0.25);
}

#[test]
fn zero_or_missing_duration_is_a_benign_skip() {
    let mut driver = PlaybackDriver::new(PlaybackConfig::new().looping());
    driver.on_start();

    // No composition at all.
    assert!(!driver.on_frame(0).unwrap().advanced);
    assert!(!driver.on_frame(SECOND_NS).unwrap().advanced);

    // Zero duration.
    driver.set_composition(Some(composition(0.0)));
    assert!(!driver.on_frame(2 * SECOND_NS).unwrap().advanced);
    assert!(!driver.on_frame(3 * SECOND_NS).unwrap().advanced);
    assert_eq!(driver.progress(), 0.0);
}

#[test]
fn composition_arriving_mid_playback_starts_from_a_fresh_baseline() {
    let mut driver = PlaybackDriver::new(PlaybackConfig::new().looping());
    driver.on_start();
    assert!(!driver.on_frame(10 * SECOND_NS).unwrap().advanced);

    driver.on_composition_loaded(Ok(composition(1.0)));
    // The pre-load timestamps must not count as a stall.
    assert!(!driver.on_frame(20 * SECOND_NS).unwrap().advanced);
    let outcome = driver.on_frame(20 * SECOND_NS + SECOND_NS / 2).unwrap();
    assert!(outcome.advanced);
    assert_eq!(outcome.progress, 0.5);
}

#[test]
fn repeat_bound_forces_terminal_stop() {
    // Default repeat count: play once.
    let mut driver = PlaybackDriver::new(PlaybackConfig::new());
    let listener = CollectingListener::new();
    driver.add_listener(Box::new(listener.clone()));
    driver.set_composition(Some(composition(1.0)));
    driver.on_start();

    driver.on_frame(0).unwrap();
    assert_eq!(driver.on_frame(SECOND_NS / 2).unwrap().progress, 0.5);
    let outcome = driver.on_frame(SECOND_NS).unwrap();
    assert!(outcome.ended);
    assert_eq!(outcome.progress, 1.0);
    assert!(!driver.is_playing());
    assert_eq!(driver.phase(), PlaybackPhase::Stopped);
    assert!(listener
        .events()
        .contains(&PlaybackEvent::Ended { progress: 1.0 }));

    // No further advancement until re-activated.
    assert!(!driver.on_frame(2 * SECOND_NS).unwrap().advanced);
    assert_eq!(driver.progress(), 1.0);
}

#[test]
fn reactivation_resets_progress_before_the_next_advance() {
    let mut driver = PlaybackDriver::new(PlaybackConfig::new());
    driver.set_composition(Some(composition(1.0)));
    driver.on_start();
    driver.on_frame(0).unwrap();
    assert!(driver.on_frame(SECOND_NS).unwrap().ended);

    driver.set_playing(true);
    assert_eq!(driver.progress(), 0.0);
    assert!(driver.is_playing());
    assert_eq!(driver.phase(), PlaybackPhase::Playing);

    assert!(!driver.on_frame(5 * SECOND_NS).unwrap().advanced);
    let outcome = driver.on_frame(5 * SECOND_NS + SECOND_NS / 2).unwrap();
    assert_eq!(outcome.progress, 0.5);
}

#[test]
fn pause_keeps_progress_and_resume_does_not_reset() {
    let mut driver = looping_driver();
    driver.on_frame(0).unwrap();
    driver.on_frame(SECOND_NS / 4).unwrap();
    assert_eq!(driver.progress(), 0.25);

    driver.set_playing(false);
    assert!(!driver.on_frame(SECOND_NS).unwrap().advanced);
    assert_eq!(driver.progress(), 0.25);

    driver.set_playing(true);
    assert_eq!(driver.progress(), 0.25);
    driver.on_frame(2 * SECOND_NS).unwrap();
    let outcome = driver.on_frame(2 * SECOND_NS + SECOND_NS / 4).unwrap();
    assert_eq!(outcome.progress, 0.5);
}

#[test]
fn seek_pushed_mid_playback_wins_the_frame() {
    let mut driver = looping_driver();
    let listener = CollectingListener::new();
    driver.add_listener(Box::new(listener.clone()));

    driver.on_frame(0).unwrap();
    driver.on_frame(SECOND_NS / 4).unwrap();
    assert_eq!(driver.progress(), 0.25);

    driver.push_seek(0.9).unwrap();
    let outcome = driver.on_frame(SECOND_NS / 2).unwrap();
    assert!(outcome.advanced);
    assert_eq!(outcome.seeks_applied, 1);
    // The clock produced 0.5 this frame, but the seek overwrote it.
    assert_eq!(outcome.progress, 0.9);
    assert_eq!(listener.progress_updates(), vec![0.25, 0.5, 0.9]);
}

#[test]
fn seeks_apply_while_paused() {
    let mut driver = looping_driver();
    driver.set_playing(false);
    driver.push_seek(0.3).unwrap();

    let outcome = driver.on_frame(0).unwrap();
    assert!(!outcome.advanced);
    assert_eq!(outcome.seeks_applied, 1);
    assert_eq!(driver.progress(), 0.3);
}

#[test]
fn loader_failure_is_logged_and_leaves_composition_unset() {
    let mut driver = PlaybackDriver::new(PlaybackConfig::new());
    let listener = CollectingListener::new();
    driver.add_listener(Box::new(listener.clone()));

    driver.on_composition_loaded(Err(PlaybackError::CompositionLoadFailed {
        origin: "url http://example.com/a.json".to_string(),
        reason: "404".to_string(),
    }));

    assert!(driver.composition().is_none());
    assert!(matches!(
        listener.events().as_slice(),
        [PlaybackEvent::LoadFailed { .. }]
    ));
}

#[test]
fn disposed_driver_ignores_everything() {
    let mut driver = looping_driver();
    driver.on_frame(0).unwrap();
    driver.on_frame(SECOND_NS / 4).unwrap();
    driver.dispose();
    assert!(driver.is_disposed());

    // Late loader callback is a guarded no-op.
    driver.on_composition_loaded(Ok(composition(3.0)));
    assert_eq!(driver.composition().unwrap().duration_secs(), 1.0);

    let outcome = driver.on_frame(SECOND_NS).unwrap();
    assert!(!outcome.advanced);
    assert_eq!(outcome.progress, 0.25);

    driver.set_playing(false);
    assert!(driver.is_playing());

    // A dropped seek is the one rejection that surfaces as an error.
    let err = driver.push_seek(0.5).unwrap_err();
    assert!(matches!(err, PlaybackError::Disposed));
    assert_eq!(driver.progress(), 0.25);
}

#[test]
fn lifecycle_stop_retires_the_frame_baseline() {
    let mut driver = looping_driver();
    driver.on_frame(0).unwrap();
    driver.on_frame(SECOND_NS / 4).unwrap();
    assert_eq!(driver.progress(), 0.25);

    driver.on_stop();
    assert!(!driver.on_frame(100 * SECOND_NS).unwrap().advanced);
    assert!(driver.is_playing());

    driver.on_start();
    // The 100s gap never reaches the clock.
    assert!(!driver.on_frame(200 * SECOND_NS).unwrap().advanced);
    let outcome = driver.on_frame(200 * SECOND_NS + SECOND_NS / 4).unwrap();
    assert_eq!(outcome.progress, 0.5);
}

#[test]
fn non_monotonic_frame_is_an_error() {
    let mut driver = looping_driver();
    driver.on_frame(SECOND_NS).unwrap();
    let err = driver.on_frame(SECOND_NS / 2).unwrap_err();
    assert!(matches!(err, PlaybackError::NonMonotonicFrame { .. }));
}

#[derive(Default)]
struct RecordingRenderer {
    frames: Vec<(f32, f32, f32)>, // (progress, target w, target h)
}

impl FrameRenderer for RecordingRenderer {
    fn draw_frame(
        &mut self,
        _composition: &CompositionHandle,
        progress: f32,
        target: TargetSize,
    ) -> Result<(), PlaybackError> {
        self.frames.push((progress, target.width, target.height));
        Ok(())
    }
}

#[test]
fn render_skips_absent_or_zero_duration_compositions() {
    let mut renderer = RecordingRenderer::default();
    let target = TargetSize::new(320.0, 240.0);

    let mut driver = PlaybackDriver::new(PlaybackConfig::new().looping());
    driver.render(&mut renderer, target).unwrap();
    assert!(renderer.frames.is_empty());

    driver.set_composition(Some(composition(0.0)));
    driver.render(&mut renderer, target).unwrap();
    assert!(renderer.frames.is_empty());

    driver.set_composition(Some(composition(1.0)));
    driver.on_start();
    driver.on_frame(0).unwrap();
    driver.on_frame(SECOND_NS / 4).unwrap();
    driver.render(&mut renderer, target).unwrap();
    assert_eq!(renderer.frames, vec![(0.25, 320.0, 240.0)]);

    driver.dispose();
    driver.render(&mut renderer, target).unwrap();
    assert_eq!(renderer.frames.len(), 1);
}

#[test]
fn repeat_count_change_takes_effect_on_the_next_advance() {
    let mut driver = looping_driver();
    driver.on_frame(0).unwrap();
    driver.on_frame(SECOND_NS + SECOND_NS / 2).unwrap();
    assert!(driver.is_playing());

    driver.set_repeat_count(RepeatCount::Finite(0));
    let outcome = driver.on_frame(2 * SECOND_NS).unwrap();
    assert!(outcome.ended);
    assert!(!driver.is_playing());
}
