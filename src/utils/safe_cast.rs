//! Checked conversions between float layout coordinates and integer pixels

use crate::{Error, Result};

/// Buffer dimension as a signed pixel coordinate
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] for dimensions above `i32::MAX`
pub fn u32_to_i32(value: u32) -> Result<i32> {
    i32::try_from(value)
        .map_err(|_| Error::InvalidInput(format!("Pixel dimension {value} exceeds i32")))
}

/// Signed pixel coordinate as a buffer offset or size
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] for negative values
pub fn i32_to_u32(value: i32) -> Result<u32> {
    u32::try_from(value).map_err(|_| {
        Error::InvalidInput(format!("Value {value} cannot be a pixel size or offset"))
    })
}

/// Layout coordinate to whole pixels, truncating toward zero
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] for NaN, infinities and values beyond the i32 range
#[allow(clippy::cast_precision_loss)] // i32 bounds as f32 round outward by at most one ulp
#[allow(clippy::cast_possible_truncation)] // Range checked above
pub fn f32_to_i32(value: f32) -> Result<i32> {
    let in_range = (i32::MIN as f32..=i32::MAX as f32).contains(&value);
    if in_range {
        Ok(value as i32)
    } else {
        Err(Error::InvalidInput(format!("Layout coordinate {value} is not a pixel position")))
    }
}

/// Layout coordinate to whole pixels inside `[lo, hi]`
///
/// Bounds may be given in either order. NaN and infinities land on the lower
/// bound.
#[must_use]
#[allow(clippy::cast_precision_loss)]
#[allow(clippy::cast_possible_truncation)] // Clamped into [lo, hi] first
pub fn f32_to_i32_clamp(value: f32, lo: i32, hi: i32) -> i32 {
    let (lo, hi) = (lo.min(hi), lo.max(hi));
    if value.is_finite() {
        (value.clamp(lo as f32, hi as f32) as i32).clamp(lo, hi)
    } else {
        lo
    }
}
