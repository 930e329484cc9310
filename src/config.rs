//! Configuration management for the occlusion overlay

use crate::{
    constants::{
        AXIS_LABEL_TEXT_SIZE, AXIS_LENGTH, AXIS_STROKE_WIDTH, HAND_RADIUS, NO_HAND_THRESHOLD,
        SHOW_SAVED_FACE_FRAMES,
    },
    coordinate_mapping::HandMapping,
    detection::BackpressurePolicy,
    geometry::CameraFacing,
    occlusion::TrackerSettings,
    pose_axes::AxisStyle,
    Error, Result,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Occlusion debounce configuration
    pub tracking: TrackingConfig,

    /// Pose axis gizmo configuration
    pub axes: AxesConfig,

    /// Display mapping configuration
    pub display: DisplayConfig,

    /// Detection provider configuration
    pub detection: DetectionConfig,
}

/// Occlusion debounce parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackingConfig {
    /// Consecutive clear frames before a new snapshot is captured
    pub no_hand_threshold: u32,

    /// Frames the saved face stays visible after the hand leaves
    pub show_saved_face_frames: u32,

    /// Half side of each hand footprint square, display units
    pub hand_radius: f32,
}

/// Pose axis gizmo parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AxesConfig {
    /// Axis length, display units
    pub length: f32,

    /// Line width
    pub stroke_width: f32,

    /// Label text size
    pub label_text_size: f32,
}

/// Display mapping parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Camera the session starts with
    pub camera: CameraFacing,

    /// How body landmarks are mapped into display space
    pub hand_mapping: HandMapping,
}

/// Detection provider parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    /// What happens to requests submitted while a provider is busy
    pub backpressure: BackpressurePolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tracking: TrackingConfig::default(),
            axes: AxesConfig::default(),
            display: DisplayConfig::default(),
            detection: DetectionConfig::default(),
        }
    }
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            no_hand_threshold: NO_HAND_THRESHOLD,
            show_saved_face_frames: SHOW_SAVED_FACE_FRAMES,
            hand_radius: HAND_RADIUS,
        }
    }
}

impl Default for AxesConfig {
    fn default() -> Self {
        Self {
            length: AXIS_LENGTH,
            stroke_width: AXIS_STROKE_WIDTH,
            label_text_size: AXIS_LABEL_TEXT_SIZE,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            camera: CameraFacing::Front,
            hand_mapping: HandMapping::AspectFit,
        }
    }
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            backpressure: BackpressurePolicy::LatestWins,
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML text
    pub fn from_yaml(content: &str) -> Result<Self> {
        serde_yaml::from_str(content)
            .map_err(|e| Error::Config(format!("Failed to parse config: {e}")))
    }

    /// Save configuration to a YAML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_yaml::to_string(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {e}")))?;

        std::fs::write(path, content)?;

        Ok(())
    }

    /// Debounce thresholds for the occlusion tracker
    #[must_use]
    pub const fn tracker_settings(&self) -> TrackerSettings {
        TrackerSettings {
            no_hand_threshold: self.tracking.no_hand_threshold,
            show_saved_face_frames: self.tracking.show_saved_face_frames,
        }
    }

    /// Style for the pose axis gizmo
    #[must_use]
    pub const fn axis_style(&self) -> AxisStyle {
        AxisStyle {
            length: self.axes.length,
            stroke_width: self.axes.stroke_width,
            label_text_size: self.axes.label_text_size,
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.tracking.no_hand_threshold == 0 {
            return Err(Error::Config("No-hand threshold must be greater than 0".to_string()));
        }
        if self.tracking.show_saved_face_frames == 0 {
            return Err(Error::Config(
                "Saved face display frames must be greater than 0".to_string(),
            ));
        }
        if !self.tracking.hand_radius.is_finite() || self.tracking.hand_radius < 0.0 {
            return Err(Error::Config(
                "Hand radius must be a finite, non-negative number".to_string(),
            ));
        }

        if !self.axes.length.is_finite() || self.axes.length <= 0.0 {
            return Err(Error::Config("Axis length must be greater than 0".to_string()));
        }
        if !self.axes.stroke_width.is_finite() || self.axes.stroke_width <= 0.0 {
            return Err(Error::Config("Axis stroke width must be greater than 0".to_string()));
        }
        if !self.axes.label_text_size.is_finite() || self.axes.label_text_size <= 0.0 {
            return Err(Error::Config("Axis label text size must be greater than 0".to_string()));
        }

        Ok(())
    }
}

/// Example configuration file content
pub const EXAMPLE_CONFIG: &str = r#"# Face Occlusion Overlay Configuration

# Occlusion debounce
tracking:
  no_hand_threshold: 5
  show_saved_face_frames: 10
  hand_radius: 100.0

# Pose axis gizmo
axes:
  length: 200.0
  stroke_width: 8.0
  label_text_size: 48.0

# Display mapping
display:
  camera: front                 # front | back
  hand_mapping: aspect_fit      # aspect_fit | swapped_axes_stretch

# Detection providers
detection:
  backpressure: latest_wins     # latest_wins | reject_while_busy
"#;
