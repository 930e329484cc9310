//! Constants used throughout the library

/// Consecutive clear frames required before a fresh face snapshot is captured
pub const NO_HAND_THRESHOLD: u32 = 5;

/// Frames the saved face stays on screen after the last occluded frame
pub const SHOW_SAVED_FACE_FRAMES: u32 = 10;

/// Half side of the square footprint around each hand point, in display units
pub const HAND_RADIUS: f32 = 100.0;

/// Length of each rendered pose axis, in display units
pub const AXIS_LENGTH: f32 = 200.0;

/// Stroke width of the pose axis lines
pub const AXIS_STROKE_WIDTH: f32 = 8.0;

/// Text size of the axis labels
pub const AXIS_LABEL_TEXT_SIZE: f32 = 48.0;

/// Offset of an axis label from its segment end
pub const AXIS_LABEL_OFFSET: f32 = 10.0;

/// Status text shown when no face is detected
pub const NO_FACE_MESSAGE: &str = "No face detected";

/// Milliseconds per second, for rate conversion
pub const MILLIS_PER_SECOND: f32 = 1000.0;

/// Default interval between replayed frames (about 30 fps)
pub const DEFAULT_FRAME_INTERVAL_MS: u64 = 33;
