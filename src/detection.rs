//! Boundary to the external face and body landmark providers.
//!
//! Providers run asynchronously and may finish after later frames were
//! captured. Each provider kind gets a [`DetectionSlot`]: at most one request
//! in flight, at most one queued, and results handed to the frame loop only
//! once, as soon as they complete.

use crate::geometry::{EulerAngles, Landmark2D, SourceRect};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which external provider a request or result belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectorKind {
    /// Face landmark and head angle provider
    Face,
    /// Body landmark provider
    Pose,
}

impl fmt::Display for DetectorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Face => write!(f, "face"),
            Self::Pose => write!(f, "pose"),
        }
    }
}

/// Primary face reported by the face provider, in source-image space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FaceObservation {
    /// Face extent
    pub bounding_box: SourceRect,
    /// Head Euler angles in degrees
    pub angles: EulerAngles,
    /// Base of the nose, if the provider located it
    #[serde(default)]
    pub nose_base: Option<Landmark2D>,
}

/// Body landmark identities reported by the pose provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyLandmarkKind {
    Nose,
    LeftShoulder,
    RightShoulder,
    LeftElbow,
    RightElbow,
    LeftWrist,
    RightWrist,
    LeftPinky,
    RightPinky,
    LeftIndex,
    RightIndex,
    LeftThumb,
    RightThumb,
    LeftHip,
    RightHip,
}

impl BodyLandmarkKind {
    /// Landmarks that stand in for the hands during occlusion; all others are ignored
    pub const HAND_LANDMARKS: [Self; 2] = [Self::LeftIndex, Self::RightIndex];

    /// Whether this landmark stands in for a hand
    #[must_use]
    pub const fn is_hand_landmark(self) -> bool {
        matches!(self, Self::LeftIndex | Self::RightIndex)
    }
}

/// One body landmark in source-image space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyLandmark {
    /// Landmark identity
    pub kind: BodyLandmarkKind,
    /// Position in source pixels
    pub position: Landmark2D,
}

/// Body pose reported by the pose provider
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BodyPose {
    /// Detected landmarks, any order
    #[serde(default)]
    pub landmarks: Vec<BodyLandmark>,
}

impl BodyPose {
    /// Look up a landmark by identity
    #[must_use]
    pub fn landmark(&self, kind: BodyLandmarkKind) -> Option<&BodyLandmark> {
        self.landmarks.iter().find(|l| l.kind == kind)
    }

    /// Positions of the hand landmarks that were detected, left before right
    #[must_use]
    pub fn hand_landmarks(&self) -> Vec<Landmark2D> {
        BodyLandmarkKind::HAND_LANDMARKS
            .iter()
            .filter_map(|&kind| self.landmark(kind))
            .map(|l| l.position)
            .collect()
    }
}

/// Result of one provider call as seen by the frame loop
#[derive(Debug, Clone, PartialEq, Default)]
pub enum DetectionOutcome<T> {
    /// The provider found something
    Detected(T),
    /// The provider ran and found nothing
    Empty,
    /// No result completed for this frame
    #[default]
    Pending,
    /// The provider reported an error
    Failed(String),
}

impl<T> DetectionOutcome<T> {
    /// Convert an optional provider result
    pub fn from_option(value: Option<T>) -> Self {
        value.map_or(Self::Empty, Self::Detected)
    }
}

/// What to do with a request that arrives while the provider is busy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackpressurePolicy {
    /// Queue it, replacing any older queued request
    #[default]
    LatestWins,
    /// Drop it
    RejectWhileBusy,
}

/// Result of [`DetectionSlot::submit`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome<R> {
    /// Request queued
    Accepted,
    /// Request queued; the older queued request is returned
    Replaced(R),
    /// Request refused and returned
    Rejected(R),
}

/// Single-slot request/response channel for one provider
#[derive(Debug)]
pub struct DetectionSlot<Req, Resp> {
    kind: DetectorKind,
    policy: BackpressurePolicy,
    queued: Option<Req>,
    in_flight: bool,
    completed: Option<DetectionOutcome<Resp>>,
}

impl<Req, Resp> DetectionSlot<Req, Resp> {
    /// Create an idle slot
    #[must_use]
    pub const fn new(kind: DetectorKind, policy: BackpressurePolicy) -> Self {
        Self {
            kind,
            policy,
            queued: None,
            in_flight: false,
            completed: None,
        }
    }

    /// Provider kind served by this slot
    #[must_use]
    pub const fn kind(&self) -> DetectorKind {
        self.kind
    }

    /// Whether a request is being processed
    #[must_use]
    pub const fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    /// Whether a request is waiting to start
    #[must_use]
    pub const fn has_queued(&self) -> bool {
        self.queued.is_some()
    }

    /// Offer a new request
    pub fn submit(&mut self, request: Req) -> SubmitOutcome<Req> {
        let busy = self.in_flight || self.queued.is_some();
        if !busy {
            self.queued = Some(request);
            return SubmitOutcome::Accepted;
        }

        match self.policy {
            BackpressurePolicy::LatestWins => match self.queued.replace(request) {
                Some(older) => {
                    debug!("{} request replaced a queued one", self.kind);
                    SubmitOutcome::Replaced(older)
                }
                None => SubmitOutcome::Accepted,
            },
            BackpressurePolicy::RejectWhileBusy => {
                debug!("{} request rejected, provider busy", self.kind);
                SubmitOutcome::Rejected(request)
            }
        }
    }

    /// Hand the queued request to the provider, unless one is already running
    pub fn start(&mut self) -> Option<Req> {
        if self.in_flight {
            return None;
        }
        let request = self.queued.take()?;
        self.in_flight = true;
        Some(request)
    }

    /// Record the provider's answer for the running request
    ///
    /// A newer completion overwrites one the frame loop has not collected yet.
    pub fn complete(&mut self, outcome: DetectionOutcome<Resp>) {
        if !self.in_flight {
            warn!("{} result completed with no request in flight", self.kind);
        }
        if let DetectionOutcome::Failed(message) = &outcome {
            debug!("{} provider reported: {}", self.kind, message);
        }
        self.in_flight = false;
        self.completed = Some(outcome);
    }

    /// Collect the newest completed result, or `Pending` if none arrived
    pub fn poll(&mut self) -> DetectionOutcome<Resp> {
        self.completed.take().unwrap_or(DetectionOutcome::Pending)
    }
}
