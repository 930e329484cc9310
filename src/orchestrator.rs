//! Per-frame glue between the detection providers and the core components.
//!
//! One [`FrameOrchestrator`] per camera session. Each call to
//! [`FrameOrchestrator::process_frame`] runs mapping, occlusion tracking, the
//! snapshot cache and status formatting for exactly one frame, and always
//! produces a [`FrameOutput`]: errors fall back to the last known state.

use crate::{
    angle_rate::AngleRateEstimator,
    config::Config,
    coordinate_mapping::{CoordinateMapper, HandMapping},
    detection::{BodyPose, DetectionOutcome, DetectorKind, FaceObservation},
    geometry::{CameraFacing, FaceBox, FrameGeometry, HeadPose},
    occlusion::{HandPoint, OcclusionState, OcclusionTracker},
    pose_axes::{project_axes, AxisProjection, AxisStyle},
    snapshot::{
        CaptureOutcome, DisplaySurface, FaceSnapshotCache, SnapshotView, ViewCommand,
        ViewPlacement,
    },
    status, Error, Result,
};
use log::{debug, info, warn};

/// Everything the providers delivered for one frame
#[derive(Debug, Clone, PartialEq)]
pub struct FrameInput {
    /// Sensor image size `(width, height)`
    pub source_size: (u32, u32),
    /// Display surface size `(width, height)`
    pub display_size: (u32, u32),
    /// Monotonic frame time in milliseconds
    pub timestamp_ms: u64,
    /// Face provider result
    pub face: DetectionOutcome<FaceObservation>,
    /// Body landmark provider result
    pub pose: DetectionOutcome<BodyPose>,
}

/// Render instructions for one frame
#[derive(Debug, Clone, PartialEq)]
pub struct FrameOutput {
    /// Axis gizmo, absent when no face is shown
    pub axes: Option<AxisProjection>,
    /// Where the saved face is drawn, if it is on screen
    pub saved_face: Option<ViewPlacement>,
    /// Saved-face view state after this frame
    pub view: SnapshotView,
    /// View changes the renderer must apply, in order
    pub view_commands: Vec<ViewCommand>,
    /// Status text
    pub status: String,
    /// A hand covered the face this frame
    pub occluded: bool,
    /// What happened to a capture request, if one fired
    pub capture: Option<CaptureOutcome>,
    /// The frame geometry was invalid and nothing was updated
    pub skipped: bool,
}

/// Owner of all per-session tracking state
#[derive(Debug)]
pub struct FrameOrchestrator {
    camera: CameraFacing,
    hand_mapping: HandMapping,
    hand_radius: f32,
    axis_style: AxisStyle,
    tracker: OcclusionTracker,
    cache: FaceSnapshotCache,
    rate: AngleRateEstimator,
    face_box: Option<FaceBox>,
    axes: Option<AxisProjection>,
    status: String,
}

impl FrameOrchestrator {
    /// Create an orchestrator from configuration
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the configuration does not validate
    pub fn new(config: &Config) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            camera: config.display.camera,
            hand_mapping: config.display.hand_mapping,
            hand_radius: config.tracking.hand_radius,
            axis_style: config.axis_style(),
            tracker: OcclusionTracker::new(config.tracker_settings()),
            cache: FaceSnapshotCache::new(),
            rate: AngleRateEstimator::new(),
            face_box: None,
            axes: None,
            status: status::no_face(),
        })
    }

    /// Camera currently in use
    #[must_use]
    pub const fn camera(&self) -> CameraFacing {
        self.camera
    }

    /// Switch between the front and back camera
    pub fn switch_camera(&mut self) -> CameraFacing {
        self.camera = self.camera.toggled();
        info!("switched to {:?} camera", self.camera);
        self.camera
    }

    /// Last known face box in display space
    #[must_use]
    pub const fn face_box(&self) -> Option<FaceBox> {
        self.face_box
    }

    /// Occlusion counters
    #[must_use]
    pub const fn occlusion_state(&self) -> OcclusionState {
        self.tracker.state()
    }

    /// Snapshot cache
    #[must_use]
    pub const fn cache(&self) -> &FaceSnapshotCache {
        &self.cache
    }

    /// Current head rotation rate in degrees per second
    #[must_use]
    pub const fn rotation_rate(&self) -> f32 {
        self.rate.rate()
    }

    /// Process one frame
    pub fn process_frame<S: DisplaySurface + ?Sized>(
        &mut self,
        input: FrameInput,
        surface: &S,
    ) -> FrameOutput {
        let geometry =
            FrameGeometry::for_camera(input.source_size, input.display_size, self.camera);
        let mapper = match CoordinateMapper::new(geometry) {
            Ok(mapper) => mapper,
            Err(e) => {
                warn!("skipping frame at {} ms: {e}", input.timestamp_ms);
                return self.output(false, None, true);
            }
        };

        match input.face {
            DetectionOutcome::Detected(face) => {
                self.apply_face(&face, &mapper, input.timestamp_ms);
            }
            DetectionOutcome::Empty => {
                self.axes = None;
                self.status = status::no_face();
            }
            DetectionOutcome::Pending => {}
            DetectionOutcome::Failed(message) => {
                warn!("{}", Error::detection(DetectorKind::Face, message));
            }
        }

        let (occluded, capture) = match input.pose {
            DetectionOutcome::Detected(pose) => {
                let hands = self.hand_points(&pose, &mapper);
                self.track_occlusion(&hands, surface)
            }
            DetectionOutcome::Empty => self.track_occlusion(&[], surface),
            DetectionOutcome::Pending => (false, None),
            DetectionOutcome::Failed(message) => {
                warn!("{}", Error::detection(DetectorKind::Pose, message));
                (false, None)
            }
        };

        self.output(occluded, capture, false)
    }

    fn apply_face(&mut self, face: &FaceObservation, mapper: &CoordinateMapper, timestamp_ms: u64) {
        self.face_box = Some(mapper.map_rect(&face.bounding_box));

        let anchor = face
            .nose_base
            .map_or_else(|| mapper.geometry().display_center(), |nose| mapper.map_point(nose));
        let pose = HeadPose::from_euler(face.angles, anchor);
        self.axes = Some(project_axes(&pose, self.axis_style));

        let rate = self.rate.update(face.angles, timestamp_ms);
        self.status = status::format_angles(&face.angles, rate);
    }

    fn hand_points(&self, pose: &BodyPose, mapper: &CoordinateMapper) -> Vec<HandPoint> {
        pose.hand_landmarks()
            .into_iter()
            .map(|p| HandPoint::new(mapper.map_hand(p, self.hand_mapping), self.hand_radius))
            .collect()
    }

    fn track_occlusion<S: DisplaySurface + ?Sized>(
        &mut self,
        hands: &[HandPoint],
        surface: &S,
    ) -> (bool, Option<CaptureOutcome>) {
        let face_box = self.face_box;
        let update = self.tracker.observe(face_box.as_ref(), hands);

        let capture = update
            .capture_requested
            .then(|| self.cache.capture(surface, face_box.as_ref()));
        if let Some(outcome) = capture {
            debug!("capture request: {outcome:?}");
        }

        self.cache.update_display(&mut self.tracker, face_box.as_ref());
        (update.occluded, capture)
    }

    fn output(
        &mut self,
        occluded: bool,
        capture: Option<CaptureOutcome>,
        skipped: bool,
    ) -> FrameOutput {
        let view = self.cache.view();
        FrameOutput {
            axes: self.axes,
            saved_face: view.placement(),
            view,
            view_commands: self.cache.drain_commands(),
            status: self.status.clone(),
            occluded,
            capture,
            skipped,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        detection::{BodyLandmark, BodyLandmarkKind},
        geometry::{EulerAngles, Landmark2D, SourceRect},
    };
    use image::RgbaImage;

    fn input(
        face: DetectionOutcome<FaceObservation>,
        pose: DetectionOutcome<BodyPose>,
        t: u64,
    ) -> FrameInput {
        FrameInput {
            source_size: (400, 400),
            display_size: (400, 400),
            timestamp_ms: t,
            face,
            pose,
        }
    }

    fn face() -> FaceObservation {
        FaceObservation {
            bounding_box: SourceRect::new(100.0, 100.0, 200.0, 200.0),
            angles: EulerAngles::new(5.0, -10.0, 2.0),
            nose_base: Some(Landmark2D::new(150.0, 160.0)),
        }
    }

    #[test]
    fn test_face_is_mirrored_for_front_camera() {
        let mut orchestrator = FrameOrchestrator::new(&Config::default()).unwrap();
        let surface = RgbaImage::new(400, 400);
        let frame = input(DetectionOutcome::Detected(face()), DetectionOutcome::Empty, 0);
        let out = orchestrator.process_frame(frame, &surface);

        assert_eq!(orchestrator.face_box(), Some(FaceBox::new(200.0, 100.0, 300.0, 200.0)));
        let axes = out.axes.unwrap();
        assert_eq!(axes.yaw.start.x, 250.0);
        assert_eq!(axes.yaw.start.y, 160.0);
        assert!(out.status.starts_with("Euler angles:"));
    }

    #[test]
    fn test_anchor_falls_back_to_display_center() {
        let mut config = Config::default();
        config.display.camera = CameraFacing::Back;
        let mut orchestrator = FrameOrchestrator::new(&config).unwrap();
        let surface = RgbaImage::new(400, 400);
        let observation = FaceObservation {
            nose_base: None,
            ..face()
        };
        let frame = input(DetectionOutcome::Detected(observation), DetectionOutcome::Empty, 0);
        let out = orchestrator.process_frame(frame, &surface);
        assert_eq!(out.axes.unwrap().pitch.start.x, 200.0);
        assert_eq!(orchestrator.face_box(), Some(FaceBox::new(100.0, 100.0, 200.0, 200.0)));
    }

    #[test]
    fn test_failed_face_keeps_previous_output() {
        let mut orchestrator = FrameOrchestrator::new(&Config::default()).unwrap();
        let surface = RgbaImage::new(400, 400);
        let first = orchestrator.process_frame(
            input(DetectionOutcome::Detected(face()), DetectionOutcome::Empty, 0),
            &surface,
        );
        let failed = orchestrator.process_frame(
            input(DetectionOutcome::Failed("busy".to_string()), DetectionOutcome::Empty, 33),
            &surface,
        );
        assert_eq!(failed.status, first.status);
        assert_eq!(failed.axes, first.axes);
    }

    #[test]
    fn test_pending_pose_leaves_counters_alone() {
        let mut orchestrator = FrameOrchestrator::new(&Config::default()).unwrap();
        let surface = RgbaImage::new(400, 400);
        orchestrator.process_frame(
            input(DetectionOutcome::Detected(face()), DetectionOutcome::Empty, 0),
            &surface,
        );
        let before = orchestrator.occlusion_state();
        orchestrator.process_frame(
            input(DetectionOutcome::Pending, DetectionOutcome::Pending, 33),
            &surface,
        );
        orchestrator.process_frame(
            input(DetectionOutcome::Pending, DetectionOutcome::Failed("lost".to_string()), 66),
            &surface,
        );
        assert_eq!(orchestrator.occlusion_state(), before);
    }

    #[test]
    fn test_zero_geometry_skips_frame() {
        let mut orchestrator = FrameOrchestrator::new(&Config::default()).unwrap();
        let surface = RgbaImage::new(400, 400);
        let mut frame = input(DetectionOutcome::Detected(face()), DetectionOutcome::Empty, 0);
        frame.source_size = (0, 400);
        let out = orchestrator.process_frame(frame, &surface);
        assert!(out.skipped);
        assert!(out.axes.is_none());
        assert_eq!(orchestrator.face_box(), None);
        assert_eq!(orchestrator.occlusion_state(), OcclusionState::default());
    }

    fn left_index_at(x: f32, y: f32) -> BodyPose {
        BodyPose {
            landmarks: vec![BodyLandmark {
                kind: BodyLandmarkKind::LeftIndex,
                position: Landmark2D::new(x, y),
            }],
        }
    }

    #[test]
    fn test_hand_mapping_mode_from_config() {
        let surface = RgbaImage::new(960, 1280);
        let frame = || FrameInput {
            source_size: (640, 480),
            display_size: (960, 1280),
            timestamp_ms: 0,
            face: DetectionOutcome::Detected(FaceObservation {
                bounding_box: SourceRect::new(100.0, 100.0, 300.0, 300.0),
                angles: EulerAngles::default(),
                nose_base: None,
            }),
            pose: DetectionOutcome::Detected(left_index_at(300.0, 250.0)),
        };

        // Aspect fit: hand lands at (450, 655), over the face box
        let fit = Config::from_yaml("display:\n  camera: back\n").unwrap();
        let mut orchestrator = FrameOrchestrator::new(&fit).unwrap();
        assert!(orchestrator.process_frame(frame(), &surface).occluded);
        assert_eq!(orchestrator.face_box(), Some(FaceBox::new(150.0, 430.0, 450.0, 730.0)));

        // Swapped stretch: hand lands at (600, 500), clear of it
        let yaml = "display:\n  camera: back\n  hand_mapping: swapped_axes_stretch\n";
        let swapped = Config::from_yaml(yaml).unwrap();
        assert_eq!(swapped.display.hand_mapping, HandMapping::SwappedAxesStretch);
        let mut orchestrator = FrameOrchestrator::new(&swapped).unwrap();
        let out = orchestrator.process_frame(frame(), &surface);
        assert!(!out.occluded);
        assert_eq!(orchestrator.face_box(), Some(FaceBox::new(150.0, 430.0, 450.0, 730.0)));
        assert_eq!(orchestrator.occlusion_state().no_hand_frames, 1);
    }

    #[test]
    fn test_switch_camera() {
        let mut orchestrator = FrameOrchestrator::new(&Config::default()).unwrap();
        assert_eq!(orchestrator.camera(), CameraFacing::Front);
        assert_eq!(orchestrator.switch_camera(), CameraFacing::Back);
        assert_eq!(orchestrator.switch_camera(), CameraFacing::Front);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut config = Config::default();
        config.tracking.show_saved_face_frames = 0;
        assert!(FrameOrchestrator::new(&config).is_err());
    }
}
