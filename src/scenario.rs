//! Scripted detection sessions for offline replay.
//!
//! A scenario lists per-frame provider results in source-image space. The
//! `occlusion-replay` binary feeds them through the detection slots and the
//! frame orchestrator exactly as a live capture pipeline would.
//!
//! ```yaml
//! source: { width: 400, height: 400 }
//! display: { width: 400, height: 400 }
//! frames:
//!   - repeat: 3
//!     face:
//!       bounding_box: { left: 100, top: 100, right: 300, bottom: 300 }
//!       angles: { x: 0, y: 0, z: 0 }
//!     pose:
//!       landmarks:
//!         - { kind: left_index, position: { x: 200, y: 200 } }
//!   - face_status: failed
//!     pose_status: pending
//! ```

use crate::{
    constants::DEFAULT_FRAME_INTERVAL_MS,
    detection::{BodyPose, DetectionOutcome, FaceObservation},
    Error, Result,
};
use image::{Rgba, RgbaImage};
use serde::Deserialize;
use std::path::Path;

/// Width and height in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Size {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl Size {
    /// As a `(width, height)` pair
    #[must_use]
    pub const fn pair(self) -> (u32, u32) {
        (self.width, self.height)
    }
}

/// Scripted provider state for a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderStatus {
    /// The provider answered; a missing result means it found nothing
    #[default]
    Ok,
    /// The provider has not answered yet
    Pending,
    /// The provider reported an error
    Failed,
}

/// One scripted frame, optionally repeated
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ScenarioFrame {
    /// How many consecutive frames share this script
    #[serde(default = "default_repeat")]
    pub repeat: u32,
    /// Face provider result
    #[serde(default)]
    pub face: Option<FaceObservation>,
    /// Face provider state
    #[serde(default)]
    pub face_status: ProviderStatus,
    /// Body landmark provider result
    #[serde(default)]
    pub pose: Option<BodyPose>,
    /// Body landmark provider state
    #[serde(default)]
    pub pose_status: ProviderStatus,
    /// Toggle the camera before this frame
    #[serde(default)]
    pub switch_camera: bool,
}

const fn default_repeat() -> u32 {
    1
}

const fn default_frame_interval() -> u64 {
    DEFAULT_FRAME_INTERVAL_MS
}

fn outcome<T: Clone>(
    status: ProviderStatus,
    value: Option<&T>,
    provider: &str,
) -> DetectionOutcome<T> {
    match status {
        ProviderStatus::Ok => DetectionOutcome::from_option(value.cloned()),
        ProviderStatus::Pending => DetectionOutcome::Pending,
        ProviderStatus::Failed => {
            DetectionOutcome::Failed(format!("scripted {provider} provider failure"))
        }
    }
}

impl ScenarioFrame {
    /// Face provider outcome for this frame
    #[must_use]
    pub fn face_outcome(&self) -> DetectionOutcome<FaceObservation> {
        outcome(self.face_status, self.face.as_ref(), "face")
    }

    /// Body landmark provider outcome for this frame
    #[must_use]
    pub fn pose_outcome(&self) -> DetectionOutcome<BodyPose> {
        outcome(self.pose_status, self.pose.as_ref(), "pose")
    }
}

/// A scripted capture session
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Scenario {
    /// Sensor image size
    pub source: Size,
    /// Display surface size
    pub display: Size,
    /// Time between frames
    #[serde(default = "default_frame_interval")]
    pub frame_interval_ms: u64,
    /// Scripted frames in order
    pub frames: Vec<ScenarioFrame>,
}

impl Scenario {
    /// Load a scenario from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse a scenario from YAML text
    pub fn from_yaml(content: &str) -> Result<Self> {
        let scenario: Self = serde_yaml::from_str(content)
            .map_err(|e| Error::Scenario(format!("Failed to parse scenario: {e}")))?;
        if scenario.frames.is_empty() {
            return Err(Error::Scenario("Scenario has no frames".to_string()));
        }
        Ok(scenario)
    }

    /// Total number of frames after expanding repeats
    #[must_use]
    pub fn frame_count(&self) -> u64 {
        self.frames.iter().map(|f| u64::from(f.repeat)).sum()
    }

    /// Timestamp of the frame at `index`, saturating at `u64::MAX`
    #[must_use]
    pub const fn timestamp_ms(&self, index: u64) -> u64 {
        index.saturating_mul(self.frame_interval_ms)
    }

    /// Frames in playback order with repeats expanded
    pub fn frames(&self) -> impl Iterator<Item = &ScenarioFrame> + '_ {
        self.frames
            .iter()
            .flat_map(|frame| std::iter::repeat(frame).take(frame.repeat as usize))
    }

    /// A deterministic display surface of the scenario's display size
    #[must_use]
    #[allow(clippy::cast_possible_truncation)] // Modulo keeps channels within u8
    pub fn synthetic_surface(&self) -> RgbaImage {
        RgbaImage::from_fn(self.display.width, self.display.height, |x, y| {
            Rgba([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8, 255])
        })
    }
}
