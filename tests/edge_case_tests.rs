//! Edge case tests for occlusion, snapshots and the frame loop


use face_occlusion_overlay::{
    detection::{BodyPose, DetectionOutcome},
    geometry::{DisplayPoint, EulerAngles, FaceBox, HeadPose, SourceRect},
    occlusion::{is_occluded, HandPoint, OcclusionTracker, TrackerSettings},
    pose_axes::{project_axes, AxisStyle},
    snapshot::{CaptureOutcome, FaceSnapshotCache},
    status::format_angles,
};
use image::Rgba;
use test_helpers::{create_test_surface, face_at, frame, hand_at, identity_orchestrator};

#[test]
fn test_capture_of_box_hanging_off_the_buffer() {
    let surface = create_test_surface();
    let mut cache = FaceSnapshotCache::new();

    let outcome = cache.capture(&surface, Some(&FaceBox::new(-50.0, 350.0, 100.0, 480.0)));
    assert_eq!(outcome, CaptureOutcome::Captured);

    let snapshot = cache.snapshot().unwrap();
    assert_eq!(snapshot.image().dimensions(), (100, 50));
    assert_eq!(snapshot.image().get_pixel(0, 0), &Rgba([0, (350 % 256) as u8, 128, 255]));
}

#[test]
fn test_box_left_of_or_above_buffer_is_skipped() {
    let surface = create_test_surface();
    let mut cache = FaceSnapshotCache::new();

    assert_eq!(
        cache.capture(&surface, Some(&FaceBox::new(-200.0, 10.0, -20.0, 100.0))),
        CaptureOutcome::Skipped
    );
    assert_eq!(
        cache.capture(&surface, Some(&FaceBox::new(10.0, -200.0, 100.0, -1.0))),
        CaptureOutcome::Skipped
    );
    assert!(cache.snapshot().is_none());
}

#[test]
fn test_zero_radius_hand() {
    let face = FaceBox::new(100.0, 100.0, 300.0, 300.0);
    assert!(is_occluded(Some(&face), &[HandPoint::new(DisplayPoint::new(200.0, 200.0), 0.0)]));
    assert!(!is_occluded(Some(&face), &[HandPoint::new(DisplayPoint::new(300.0, 200.0), 0.0)]));
}

#[test]
fn test_threshold_of_one_captures_every_clear_frame() {
    let mut tracker = OcclusionTracker::new(TrackerSettings {
        no_hand_threshold: 1,
        show_saved_face_frames: 1,
    });
    let face = FaceBox::new(0.0, 0.0, 10.0, 10.0);
    for _ in 0..5 {
        assert!(tracker.observe(Some(&face), &[]).capture_requested);
    }
    assert!(tracker.teardown_due());
}

#[test]
fn test_non_finite_angles_do_not_panic() {
    let text = format_angles(&EulerAngles::new(f32::NAN, f32::INFINITY, -0.4), f32::NAN);
    assert_eq!(
        text,
        "Euler angles:\nX (up-down): 0°\nY (left-right): 0°\nZ (tilt): 0°\nRate of change: 0°/s"
    );

    let pose =
        HeadPose::from_euler(EulerAngles::new(f32::NAN, 0.0, 0.0), DisplayPoint::new(0.0, 0.0));
    let axes = project_axes(&pose, AxisStyle::default());
    assert!(axes.pitch.end.x.is_nan());
    assert_eq!(axes.yaw.end, DisplayPoint::new(0.0, -200.0));
}

#[test]
fn test_turned_away_yaw_points_down() {
    let pose =
        HeadPose::from_euler(EulerAngles::new(0.0, 180.0, 0.0), DisplayPoint::new(100.0, 100.0));
    let axes = project_axes(&pose, AxisStyle::default());
    assert!((axes.yaw.end.y - 300.0).abs() < 1e-3);
}

#[test]
fn test_pending_face_keeps_box_and_status() {
    let mut orchestrator = identity_orchestrator().unwrap();
    let surface = create_test_surface();
    let face =
        face_at(SourceRect::new(100.0, 100.0, 300.0, 300.0), EulerAngles::new(7.0, 8.0, 9.0));

    let first = orchestrator.process_frame(
        frame(0, DetectionOutcome::Detected(face), DetectionOutcome::Empty),
        &surface,
    );
    let pending = orchestrator.process_frame(
        frame(1, DetectionOutcome::Pending, DetectionOutcome::Detected(hand_at(150.0, 150.0))),
        &surface,
    );

    assert_eq!(pending.status, first.status);
    assert_eq!(pending.axes, first.axes);
    assert!(pending.occluded);
    assert_eq!(orchestrator.face_box(), Some(FaceBox::new(100.0, 100.0, 300.0, 300.0)));
}

#[test]
fn test_switching_camera_mirrors_next_face() {
    let mut orchestrator = identity_orchestrator().unwrap();
    let surface = create_test_surface();
    let face = face_at(SourceRect::new(50.0, 100.0, 150.0, 200.0), EulerAngles::default());

    orchestrator.process_frame(
        frame(0, DetectionOutcome::Detected(face), DetectionOutcome::Empty),
        &surface,
    );
    assert_eq!(orchestrator.face_box(), Some(FaceBox::new(50.0, 100.0, 150.0, 200.0)));

    orchestrator.switch_camera();
    orchestrator.process_frame(
        frame(1, DetectionOutcome::Detected(face), DetectionOutcome::Empty),
        &surface,
    );
    assert_eq!(orchestrator.face_box(), Some(FaceBox::new(250.0, 100.0, 350.0, 200.0)));
}

#[test]
fn test_pose_without_hand_landmarks_counts_as_clear() {
    let mut orchestrator = identity_orchestrator().unwrap();
    let surface = create_test_surface();
    let face = face_at(SourceRect::new(100.0, 100.0, 300.0, 300.0), EulerAngles::default());

    let out = orchestrator.process_frame(
        frame(0, DetectionOutcome::Detected(face), DetectionOutcome::Detected(BodyPose::default())),
        &surface,
    );
    assert!(!out.occluded);
    assert_eq!(orchestrator.occlusion_state().no_hand_frames, 1);
}
