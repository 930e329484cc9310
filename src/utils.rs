//! Pixel-level helpers for turning display-space boxes into buffer regions.

pub mod safe_cast;

use crate::{geometry::FaceBox, Error, Result};
use safe_cast::{f32_to_i32_clamp, i32_to_u32, u32_to_i32};

/// Integer pixel region inside a buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRegion {
    /// Left column
    pub x: u32,
    /// Top row
    pub y: u32,
    /// Width in pixels, always positive
    pub width: u32,
    /// Height in pixels, always positive
    pub height: u32,
}

/// Clip a display-space box to a `width` x `height` pixel buffer
///
/// Edges are truncated to whole pixels and clamped into the buffer, so the
/// result is the part of the box that actually lies inside it.
///
/// # Errors
///
/// Returns [`Error::CaptureSkipped`] when nothing of the box is left, and
/// [`Error::InvalidInput`] if the buffer is larger than `i32::MAX` pixels wide
/// or tall.
pub fn clip_to_buffer(face: &FaceBox, width: u32, height: u32) -> Result<PixelRegion> {
    let max_x = u32_to_i32(width)?;
    let max_y = u32_to_i32(height)?;

    let left = f32_to_i32_clamp(face.left, 0, max_x);
    let top = f32_to_i32_clamp(face.top, 0, max_y);
    let right = f32_to_i32_clamp(face.right, 0, max_x);
    let bottom = f32_to_i32_clamp(face.bottom, 0, max_y);

    let clipped_width = right - left;
    let clipped_height = bottom - top;
    if clipped_width <= 0 || clipped_height <= 0 {
        return Err(Error::CaptureSkipped {
            width: clipped_width,
            height: clipped_height,
        });
    }

    Ok(PixelRegion {
        x: i32_to_u32(left)?,
        y: i32_to_u32(top)?,
        width: i32_to_u32(clipped_width)?,
        height: i32_to_u32(clipped_height)?,
    })
}
