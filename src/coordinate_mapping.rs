//! Mapping of detector output from sensor-image pixels onto the display
//! surface.
//!
//! The preview is aspect-fit into the display (letterboxed, centred) and, for
//! the front camera, mirrored horizontally. Detections have to go through the
//! same transform to line up with what the user sees.

use crate::{
    geometry::{DisplayPoint, FaceBox, FrameGeometry, Landmark2D, SourceRect},
    Result,
};
use serde::{Deserialize, Serialize};

/// How body landmarks are brought into display space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandMapping {
    /// Same aspect-fit transform as face landmarks
    #[default]
    AspectFit,
    /// Per-axis stretch with source width and height swapped, for providers
    /// that report landmarks in the unrotated sensor frame
    SwappedAxesStretch,
}

/// Mirror a display point around the vertical centre line
#[must_use]
pub fn mirror_horizontal(point: DisplayPoint, display_width: f32) -> DisplayPoint {
    DisplayPoint::new(display_width - point.x, point.y)
}

/// Source-to-display transform for one frame geometry
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateMapper {
    geometry: FrameGeometry,
    scale: f32,
    offset_x: f32,
    offset_y: f32,
}

impl CoordinateMapper {
    /// Create a mapper for the given geometry
    ///
    /// # Errors
    ///
    /// Returns [`Error::Geometry`](crate::Error::Geometry) when any dimension is zero
    #[allow(clippy::cast_precision_loss)] // Frame sizes are far below f32 precision limits
    pub fn new(geometry: FrameGeometry) -> Result<Self> {
        geometry.validate()?;

        let source_w = geometry.source_width as f32;
        let source_h = geometry.source_height as f32;
        let display_w = geometry.display_width as f32;
        let display_h = geometry.display_height as f32;

        let scale = (display_w / source_w).min(display_h / source_h);
        let offset_x = (display_w - source_w * scale) / 2.0;
        let offset_y = (display_h - source_h * scale) / 2.0;

        Ok(Self {
            geometry,
            scale,
            offset_x,
            offset_y,
        })
    }

    /// Geometry this mapper was built for
    #[must_use]
    pub const fn geometry(&self) -> &FrameGeometry {
        &self.geometry
    }

    /// Uniform aspect-fit scale factor
    #[must_use]
    pub const fn scale(&self) -> f32 {
        self.scale
    }

    /// Letterbox offsets `(x, y)`
    #[must_use]
    pub const fn offset(&self) -> (f32, f32) {
        (self.offset_x, self.offset_y)
    }

    #[allow(clippy::cast_precision_loss)]
    fn display_width(&self) -> f32 {
        self.geometry.display_width as f32
    }

    /// Map a source-space point onto the display
    #[must_use]
    pub fn map_point(&self, point: Landmark2D) -> DisplayPoint {
        let mapped = DisplayPoint::new(
            point.x * self.scale + self.offset_x,
            point.y * self.scale + self.offset_y,
        );

        if self.geometry.mirror_horizontal {
            mirror_horizontal(mapped, self.display_width())
        } else {
            mapped
        }
    }

    /// Map a source-space rectangle onto the display
    ///
    /// Mirroring swaps left and right edges; the result is normalised.
    #[must_use]
    pub fn map_rect(&self, rect: &SourceRect) -> FaceBox {
        FaceBox::from_corners(self.map_point(rect.top_left()), self.map_point(rect.bottom_right()))
    }

    /// Map a body landmark using the requested hand mapping mode
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn map_hand(&self, point: Landmark2D, mode: HandMapping) -> DisplayPoint {
        match mode {
            HandMapping::AspectFit => self.map_point(point),
            HandMapping::SwappedAxesStretch => {
                let scale_x = self.display_width() / self.geometry.source_height as f32;
                let scale_y =
                    self.geometry.display_height as f32 / self.geometry.source_width as f32;
                let mapped = DisplayPoint::new(point.x * scale_x, point.y * scale_y);

                if self.geometry.mirror_horizontal {
                    mirror_horizontal(mapped, self.display_width())
                } else {
                    mapped
                }
            }
        }
    }
}

/// Map a single source-space point without keeping a mapper around
///
/// # Errors
///
/// Returns [`Error::Geometry`](crate::Error::Geometry) when any dimension is zero
pub fn map_to_display(point: Landmark2D, geometry: &FrameGeometry) -> Result<DisplayPoint> {
    Ok(CoordinateMapper::new(*geometry)?.map_point(point))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn test_letterbox_vertical() {
        // 640x480 into 1080x1920: width-limited, bars top and bottom
        let mapper =
            CoordinateMapper::new(FrameGeometry::new(640, 480, 1080, 1920, false)).unwrap();
        assert!(approx(mapper.scale(), 1.6875));
        let (ox, oy) = mapper.offset();
        assert!(approx(ox, 0.0));
        assert!(approx(oy, (1920.0 - 480.0 * 1.6875) / 2.0));

        let origin = mapper.map_point(Landmark2D::new(0.0, 0.0));
        assert!(approx(origin.x, 0.0));
        assert!(approx(origin.y, oy));
    }

    #[test]
    fn test_mirroring_flips_x_only() {
        let plain = CoordinateMapper::new(FrameGeometry::new(100, 100, 200, 200, false)).unwrap();
        let mirrored = CoordinateMapper::new(FrameGeometry::new(100, 100, 200, 200, true)).unwrap();

        let p = Landmark2D::new(10.0, 30.0);
        assert_eq!(plain.map_point(p), DisplayPoint::new(20.0, 60.0));
        assert_eq!(mirrored.map_point(p), DisplayPoint::new(180.0, 60.0));
    }

    #[test]
    fn test_map_rect_normalizes_mirrored_edges() {
        let mapper = CoordinateMapper::new(FrameGeometry::new(100, 100, 100, 100, true)).unwrap();
        let face = mapper.map_rect(&SourceRect::new(10.0, 20.0, 40.0, 60.0));
        assert_eq!(face, FaceBox::new(60.0, 20.0, 90.0, 60.0));
    }

    #[test]
    fn test_swapped_axes_stretch() {
        let mapper = CoordinateMapper::new(FrameGeometry::new(640, 480, 960, 1280, true)).unwrap();
        // scale_x = 960 / 480 = 2, scale_y = 1280 / 640 = 2
        let p = mapper.map_hand(Landmark2D::new(100.0, 50.0), HandMapping::SwappedAxesStretch);
        assert_eq!(p, DisplayPoint::new(960.0 - 200.0, 100.0));

        let fit = mapper.map_hand(Landmark2D::new(100.0, 50.0), HandMapping::AspectFit);
        assert_eq!(fit, mapper.map_point(Landmark2D::new(100.0, 50.0)));
    }

    #[test]
    fn test_zero_source_is_geometry_error() {
        let geometry = FrameGeometry::new(0, 0, 100, 100, false);
        let result = map_to_display(Landmark2D::new(1.0, 1.0), &geometry);
        assert!(matches!(result, Err(Error::Geometry(_))));
    }
}
