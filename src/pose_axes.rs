//! Head pose axis gizmo.
//!
//! Each axis is driven by a single angle: yaw bends the vertical axis, pitch
//! the horizontal one, roll the downward one. This is a flat on-screen
//! indicator, not a projection of a rotated 3D frame.

use crate::{
    constants::{AXIS_LABEL_OFFSET, AXIS_LABEL_TEXT_SIZE, AXIS_LENGTH, AXIS_STROKE_WIDTH},
    geometry::{DisplayPoint, HeadPose},
};

/// Which rotation an axis segment represents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Turn left/right
    Yaw,
    /// Nod up/down
    Pitch,
    /// Tilt
    Roll,
}

impl Axis {
    /// Label drawn next to the segment end
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Yaw => "Yaw",
            Self::Pitch => "Pitch",
            Self::Roll => "Roll",
        }
    }

    /// RGB colour of the segment
    #[must_use]
    pub const fn color(self) -> [u8; 3] {
        match self {
            Self::Yaw => [0, 0, 255],
            Self::Pitch => [0, 255, 0],
            Self::Roll => [255, 0, 0],
        }
    }

    /// Offset of the label from the segment end
    fn label_offset(self) -> (f32, f32) {
        match self {
            Self::Yaw => (AXIS_LABEL_OFFSET, -AXIS_LABEL_OFFSET),
            Self::Pitch | Self::Roll => (AXIS_LABEL_OFFSET, AXIS_LABEL_OFFSET),
        }
    }
}

/// Stroke and text settings for the gizmo
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisStyle {
    /// Segment length in display units
    pub length: f32,
    /// Line width
    pub stroke_width: f32,
    /// Label text size
    pub label_text_size: f32,
}

impl Default for AxisStyle {
    fn default() -> Self {
        Self {
            length: AXIS_LENGTH,
            stroke_width: AXIS_STROKE_WIDTH,
            label_text_size: AXIS_LABEL_TEXT_SIZE,
        }
    }
}

/// One line from the anchor to an axis end point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisSegment {
    /// Rotation this segment shows
    pub axis: Axis,
    /// Start point, the pose anchor
    pub start: DisplayPoint,
    /// End point
    pub end: DisplayPoint,
    /// Where the label text goes
    pub label_position: DisplayPoint,
}

impl AxisSegment {
    fn new(axis: Axis, start: DisplayPoint, end: DisplayPoint) -> Self {
        let (dx, dy) = axis.label_offset();
        Self {
            axis,
            start,
            end,
            label_position: DisplayPoint::new(end.x + dx, end.y + dy),
        }
    }
}

/// The three segments of one frame's gizmo
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisProjection {
    /// Vertical segment driven by yaw
    pub yaw: AxisSegment,
    /// Horizontal segment driven by pitch
    pub pitch: AxisSegment,
    /// Downward segment driven by roll
    pub roll: AxisSegment,
    /// Style the renderer should use
    pub style: AxisStyle,
}

impl AxisProjection {
    /// Segments in draw order
    #[must_use]
    pub const fn segments(&self) -> [AxisSegment; 3] {
        [self.yaw, self.pitch, self.roll]
    }
}

/// Project a head pose into three axis segments
#[must_use]
pub fn project_axes(pose: &HeadPose, style: AxisStyle) -> AxisProjection {
    let anchor = pose.anchor;
    let length = style.length;

    let yaw_rad = pose.yaw.to_radians();
    let pitch_rad = pose.pitch.to_radians();
    let roll_rad = pose.roll.to_radians();

    let yaw_end = DisplayPoint::new(anchor.x, anchor.y - length * yaw_rad.cos());
    let pitch_end = DisplayPoint::new(anchor.x + length * pitch_rad.cos(), anchor.y);
    let roll_end = DisplayPoint::new(anchor.x, anchor.y + length * roll_rad.sin());

    AxisProjection {
        yaw: AxisSegment::new(Axis::Yaw, anchor, yaw_end),
        pitch: AxisSegment::new(Axis::Pitch, anchor, pitch_end),
        roll: AxisSegment::new(Axis::Roll, anchor, roll_end),
        style,
    }
}
