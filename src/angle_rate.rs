//! Rate of head rotation between successive face detections.
//!
//! The estimate is instantaneous: the L1 distance between the last two angle
//! readings divided by the time between them. No smoothing, no clamping.

use crate::{constants::MILLIS_PER_SECOND, geometry::EulerAngles};

/// Angle reading with its monotonic timestamp
#[derive(Debug, Clone, Copy, PartialEq)]
struct Reading {
    angles: EulerAngles,
    timestamp_ms: u64,
}

/// Instantaneous angular rate estimator
#[derive(Debug, Clone, Default)]
pub struct AngleRateEstimator {
    last: Option<Reading>,
    rate: f32,
}

impl AngleRateEstimator {
    /// Create a new estimator with a zero rate and no baseline
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a new reading and return the current rate in degrees per second
    ///
    /// The rate is recomputed only when time moved forward since the last
    /// reading; otherwise the previous rate is kept. The baseline is always
    /// replaced by the new reading.
    #[allow(clippy::cast_precision_loss)] // Frame intervals are small
    pub fn update(&mut self, angles: EulerAngles, timestamp_ms: u64) -> f32 {
        if let Some(last) = self.last {
            if timestamp_ms > last.timestamp_ms {
                let elapsed = (timestamp_ms - last.timestamp_ms) as f32;
                self.rate = last.angles.l1_distance(&angles) / elapsed * MILLIS_PER_SECOND;
            }
        }

        self.last = Some(Reading { angles, timestamp_ms });
        self.rate
    }

    /// Most recently computed rate in degrees per second
    #[must_use]
    pub const fn rate(&self) -> f32 {
        self.rate
    }

    /// Angles of the last reading, if any
    #[must_use]
    pub fn last_angles(&self) -> Option<EulerAngles> {
        self.last.map(|r| r.angles)
    }

    /// Forget the baseline and the rate
    pub fn reset(&mut self) {
        self.last = None;
        self.rate = 0.0;
    }
}
