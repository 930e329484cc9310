//! User-facing status text.

use crate::{constants::NO_FACE_MESSAGE, geometry::EulerAngles};

/// Round half up to the nearest integer, as the on-screen readout does
#[must_use]
#[allow(clippy::cast_possible_truncation)] // Angles and rates are far inside i64
pub fn round_half_up(value: f32) -> i64 {
    if value.is_finite() {
        (value + 0.5).floor() as i64
    } else {
        0
    }
}

/// Status text for a detected face
#[must_use]
pub fn format_angles(angles: &EulerAngles, rate: f32) -> String {
    format!(
        "Euler angles:\nX (up-down): {}°\nY (left-right): {}°\nZ (tilt): {}°\n\
         Rate of change: {}°/s",
        round_half_up(angles.x),
        round_half_up(angles.y),
        round_half_up(angles.z),
        round_half_up(rate),
    )
}

/// Status text when no face is detected
#[must_use]
pub fn no_face() -> String {
    NO_FACE_MESSAGE.to_string()
}
