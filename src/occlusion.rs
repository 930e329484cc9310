//! Hand-over-face occlusion tracking.
//!
//! Detections flicker from frame to frame, so the tracker never acts on a
//! single frame. It keeps four counters, updated once per frame:
//!
//! - `over_face_frames`: consecutive frames with a hand over the face
//! - `no_hand_frames`: consecutive clear frames since the last capture request
//! - `visible_countdown`: frames the saved face should stay on screen
//! - `invisible_frames`: consecutive clear frames since the last occlusion
//!
//! A capture request fires every `no_hand_threshold` consecutive clear frames,
//! and the countdown is re-armed on every occluded frame.

use crate::{
    constants::{HAND_RADIUS, NO_HAND_THRESHOLD, SHOW_SAVED_FACE_FRAMES},
    geometry::{DisplayPoint, FaceBox},
};
use log::debug;

/// A hand landmark on the display with its square occlusion footprint
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandPoint {
    /// Display-space landmark position
    pub position: DisplayPoint,
    /// Half side of the footprint square
    pub radius: f32,
}

impl HandPoint {
    /// Create a hand point with an explicit footprint radius
    #[must_use]
    pub const fn new(position: DisplayPoint, radius: f32) -> Self {
        Self { position, radius }
    }

    /// Create a hand point with the default footprint radius
    #[must_use]
    pub const fn with_default_radius(position: DisplayPoint) -> Self {
        Self::new(position, HAND_RADIUS)
    }

    /// Square region this hand point covers
    #[must_use]
    pub fn footprint(&self) -> FaceBox {
        FaceBox::square_around(self.position, self.radius)
    }

    /// Whether the footprint overlaps the face box
    #[must_use]
    pub fn covers(&self, face: &FaceBox) -> bool {
        self.footprint().intersects(face)
    }
}

/// Whether any hand footprint overlaps the face box
///
/// Without a face box nothing can be occluded.
#[must_use]
pub fn is_occluded(face: Option<&FaceBox>, hands: &[HandPoint]) -> bool {
    face.is_some_and(|face| hands.iter().any(|hand| hand.covers(face)))
}

/// Debounce thresholds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackerSettings {
    /// Clear frames between capture requests
    pub no_hand_threshold: u32,
    /// Countdown armed on each occluded frame, also the teardown threshold
    pub show_saved_face_frames: u32,
}

impl Default for TrackerSettings {
    fn default() -> Self {
        Self {
            no_hand_threshold: NO_HAND_THRESHOLD,
            show_saved_face_frames: SHOW_SAVED_FACE_FRAMES,
        }
    }
}

/// The four frame counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OcclusionState {
    /// Consecutive occluded frames
    pub over_face_frames: u32,
    /// Clear frames since the last capture request or occlusion
    pub no_hand_frames: u32,
    /// Remaining frames to keep showing the saved face
    pub visible_countdown: u32,
    /// Consecutive clear frames since the last occlusion
    pub invisible_frames: u32,
}

/// Result of one frame's occlusion update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OcclusionUpdate {
    /// A hand covers the face this frame
    pub occluded: bool,
    /// A fresh snapshot should be captured this frame
    pub capture_requested: bool,
    /// Saved-face countdown after this update
    pub visible_countdown: u32,
}

/// Per-session occlusion state machine
///
/// Each camera session owns its own tracker, mutated from one frame loop.
#[derive(Debug, Clone, Default)]
pub struct OcclusionTracker {
    settings: TrackerSettings,
    state: OcclusionState,
}

impl OcclusionTracker {
    /// Create a tracker with the given thresholds
    #[must_use]
    pub fn new(settings: TrackerSettings) -> Self {
        Self {
            settings,
            state: OcclusionState::default(),
        }
    }

    /// Thresholds in use
    #[must_use]
    pub const fn settings(&self) -> TrackerSettings {
        self.settings
    }

    /// Current counters
    #[must_use]
    pub const fn state(&self) -> OcclusionState {
        self.state
    }

    /// Run the occlusion test for one frame and advance the counters
    pub fn observe(&mut self, face: Option<&FaceBox>, hands: &[HandPoint]) -> OcclusionUpdate {
        let occluded = is_occluded(face, hands);
        let mut capture_requested = false;
        let state = &mut self.state;

        if occluded {
            state.over_face_frames = state.over_face_frames.saturating_add(1);
            state.no_hand_frames = 0;
            state.visible_countdown = self.settings.show_saved_face_frames;
            state.invisible_frames = 0;
        } else {
            state.over_face_frames = 0;
            state.no_hand_frames = state.no_hand_frames.saturating_add(1);
            state.invisible_frames = state.invisible_frames.saturating_add(1);

            if state.no_hand_frames >= self.settings.no_hand_threshold {
                capture_requested = true;
                state.no_hand_frames = 0;
            }
        }

        debug!(
            "occlusion: occluded={} over={} clear={} countdown={} invisible={}",
            occluded,
            state.over_face_frames,
            state.no_hand_frames,
            state.visible_countdown,
            state.invisible_frames
        );

        OcclusionUpdate {
            occluded,
            capture_requested,
            visible_countdown: state.visible_countdown,
        }
    }

    /// Consume one frame of the saved-face countdown
    ///
    /// Returns `true` if the countdown was still running.
    pub fn take_visible_frame(&mut self) -> bool {
        if self.state.visible_countdown > 0 {
            self.state.visible_countdown -= 1;
            true
        } else {
            false
        }
    }

    /// Whether the hand has been gone long enough to tear the saved view down
    #[must_use]
    pub const fn teardown_due(&self) -> bool {
        self.state.invisible_frames >= self.settings.show_saved_face_frames
    }

    /// Reset all counters
    pub fn reset(&mut self) {
        self.state = OcclusionState::default();
    }
}
