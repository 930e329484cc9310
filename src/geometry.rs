//! Geometry primitives shared by the mapper, the occlusion tracker and the
//! snapshot cache.
//!
//! Points and rectangles are split by coordinate space: [`Landmark2D`] and
//! [`SourceRect`] live in sensor-image pixels, [`DisplayPoint`] and [`FaceBox`]
//! live on the display surface. The only way from one to the other is
//! [`CoordinateMapper`](crate::coordinate_mapping::CoordinateMapper).

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Which camera produced the frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CameraFacing {
    /// User-facing camera; its preview is mirrored
    #[default]
    Front,
    /// World-facing camera
    Back,
}

impl CameraFacing {
    /// Whether detections from this camera must be mirrored horizontally
    #[must_use]
    pub const fn mirrors(self) -> bool {
        matches!(self, Self::Front)
    }

    /// The other camera
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Front => Self::Back,
            Self::Back => Self::Front,
        }
    }
}

/// Source and display dimensions for one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameGeometry {
    /// Sensor image width in pixels
    pub source_width: u32,
    /// Sensor image height in pixels
    pub source_height: u32,
    /// Display surface width
    pub display_width: u32,
    /// Display surface height
    pub display_height: u32,
    /// Mirror x after scaling (front camera)
    pub mirror_horizontal: bool,
}

impl FrameGeometry {
    /// Create frame geometry from raw dimensions
    #[must_use]
    pub const fn new(
        source_width: u32,
        source_height: u32,
        display_width: u32,
        display_height: u32,
        mirror_horizontal: bool,
    ) -> Self {
        Self {
            source_width,
            source_height,
            display_width,
            display_height,
            mirror_horizontal,
        }
    }

    /// Create frame geometry for the given camera, mirroring only the front one
    #[must_use]
    pub const fn for_camera(source: (u32, u32), display: (u32, u32), facing: CameraFacing) -> Self {
        Self::new(source.0, source.1, display.0, display.1, facing.mirrors())
    }

    /// Check that every dimension is non-zero
    ///
    /// # Errors
    ///
    /// Returns [`Error::Geometry`] when a source or display dimension is zero
    pub fn validate(&self) -> Result<()> {
        if self.source_width == 0 || self.source_height == 0 {
            return Err(Error::Geometry(format!(
                "source dimensions must be positive, got {}x{}",
                self.source_width, self.source_height
            )));
        }
        if self.display_width == 0 || self.display_height == 0 {
            return Err(Error::Geometry(format!(
                "display dimensions must be positive, got {}x{}",
                self.display_width, self.display_height
            )));
        }
        Ok(())
    }

    /// Centre of the display surface
    #[must_use]
    #[allow(clippy::cast_precision_loss)] // Display sizes are far below f32 precision limits
    pub fn display_center(&self) -> DisplayPoint {
        DisplayPoint::new(self.display_width as f32 / 2.0, self.display_height as f32 / 2.0)
    }
}

/// A landmark position in source-image pixel space
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Landmark2D {
    /// Horizontal pixel coordinate
    pub x: f32,
    /// Vertical pixel coordinate
    pub y: f32,
}

impl Landmark2D {
    /// Create a new source-space landmark
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A position on the display surface
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DisplayPoint {
    /// Horizontal display coordinate
    pub x: f32,
    /// Vertical display coordinate
    pub y: f32,
}

impl DisplayPoint {
    /// Create a new display-space point
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle in source-image pixel space
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SourceRect {
    /// Left edge
    pub left: f32,
    /// Top edge
    pub top: f32,
    /// Right edge
    pub right: f32,
    /// Bottom edge
    pub bottom: f32,
}

impl SourceRect {
    /// Create a rectangle from its edges
    #[must_use]
    pub const fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Top-left corner
    #[must_use]
    pub const fn top_left(&self) -> Landmark2D {
        Landmark2D::new(self.left, self.top)
    }

    /// Bottom-right corner
    #[must_use]
    pub const fn bottom_right(&self) -> Landmark2D {
        Landmark2D::new(self.right, self.bottom)
    }
}

/// Axis-aligned face extent in display space
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FaceBox {
    /// Left edge
    pub left: f32,
    /// Top edge
    pub top: f32,
    /// Right edge
    pub right: f32,
    /// Bottom edge
    pub bottom: f32,
}

impl FaceBox {
    /// Create a box from its edges
    #[must_use]
    pub const fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Create a box from two opposite corners in any order
    #[must_use]
    pub fn from_corners(a: DisplayPoint, b: DisplayPoint) -> Self {
        Self::new(a.x.min(b.x), a.y.min(b.y), a.x.max(b.x), a.y.max(b.y))
    }

    /// Create a square box of half side `radius` around `center`
    #[must_use]
    pub fn square_around(center: DisplayPoint, radius: f32) -> Self {
        Self::new(center.x - radius, center.y - radius, center.x + radius, center.y + radius)
    }

    /// Box width
    #[must_use]
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    /// Box height
    #[must_use]
    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    /// Box centre
    #[must_use]
    pub fn center(&self) -> DisplayPoint {
        DisplayPoint::new((self.left + self.right) / 2.0, (self.top + self.bottom) / 2.0)
    }

    /// Strict overlap test; boxes that only share an edge do not intersect
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        self.left < other.right
            && other.left < self.right
            && self.top < other.bottom
            && other.top < self.bottom
    }
}

/// Raw head Euler angles as reported by the face provider, in degrees
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EulerAngles {
    /// Rotation around the horizontal axis (nodding up and down)
    pub x: f32,
    /// Rotation around the vertical axis (turning left and right)
    pub y: f32,
    /// Rotation around the viewing axis (tilting)
    pub z: f32,
}

impl EulerAngles {
    /// Create a new angle triple
    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Sum of absolute per-axis differences to `other`
    #[must_use]
    pub fn l1_distance(&self, other: &Self) -> f32 {
        (self.x - other.x).abs() + (self.y - other.y).abs() + (self.z - other.z).abs()
    }
}

/// Head orientation anchored on the display surface
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HeadPose {
    /// Turn left/right, degrees
    pub yaw: f32,
    /// Nod up/down, degrees
    pub pitch: f32,
    /// Tilt, degrees
    pub roll: f32,
    /// Display-space anchor, the nose or the display centre
    pub anchor: DisplayPoint,
}

impl HeadPose {
    /// Build a pose from provider Euler angles
    #[must_use]
    pub const fn from_euler(angles: EulerAngles, anchor: DisplayPoint) -> Self {
        Self {
            yaw: angles.y,
            pitch: angles.x,
            roll: angles.z,
            anchor,
        }
    }
}
