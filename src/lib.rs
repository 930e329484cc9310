//! Face occlusion overlay: head pose axes and a saved-face stand-in that
//! covers the face while a hand passes in front of it.
//!
//! Face and body landmark detection are external. This library takes their
//! per-frame results and decides what to draw:
//! 1. Map detections from sensor pixels onto the mirrored, aspect-fit display
//! 2. Project the head angles into a three-line axis gizmo anchored on the nose
//! 3. Track hand-over-face occlusion with frame-count debouncing
//! 4. Capture, show and retire a snapshot of the unoccluded face
//!
//! # Examples
//!
//! ## Driving one session
//!
//! ```no_run
//! use face_occlusion_overlay::{
//!     config::Config,
//!     detection::{BodyPose, DetectionOutcome, FaceObservation},
//!     geometry::{EulerAngles, SourceRect},
//!     orchestrator::{FrameInput, FrameOrchestrator},
//! };
//! use image::RgbaImage;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut orchestrator = FrameOrchestrator::new(&Config::default())?;
//! let surface = RgbaImage::new(1080, 1920);
//!
//! let output = orchestrator.process_frame(
//!     FrameInput {
//!         source_size: (480, 640),
//!         display_size: (1080, 1920),
//!         timestamp_ms: 0,
//!         face: DetectionOutcome::Detected(FaceObservation {
//!             bounding_box: SourceRect::new(150.0, 200.0, 330.0, 420.0),
//!             angles: EulerAngles::new(4.0, -12.0, 1.0),
//!             nose_base: None,
//!         }),
//!         pose: DetectionOutcome::Detected(BodyPose::default()),
//!     },
//!     &surface,
//! );
//!
//! println!("{}", output.status);
//! for command in output.view_commands {
//!     println!("{command:?}");
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Occlusion tracking on its own
//!
//! ```no_run
//! use face_occlusion_overlay::{
//!     geometry::{DisplayPoint, FaceBox},
//!     occlusion::{HandPoint, OcclusionTracker},
//! };
//!
//! # fn main() {
//! let mut tracker = OcclusionTracker::default();
//! let face = FaceBox::new(100.0, 100.0, 300.0, 300.0);
//! let hand = HandPoint::with_default_radius(DisplayPoint::new(200.0, 200.0));
//!
//! let update = tracker.observe(Some(&face), &[hand]);
//! assert!(update.occluded);
//! # }
//! ```

/// Geometry primitives in source and display space
pub mod geometry;

/// Source-to-display coordinate mapping
pub mod coordinate_mapping;

/// Head pose axis gizmo projection
pub mod pose_axes;

/// Head rotation rate estimation
pub mod angle_rate;

/// Hand-over-face occlusion tracking
pub mod occlusion;

/// Saved-face snapshot cache and view lifecycle
pub mod snapshot;

/// Detection provider boundary and backpressure slots
pub mod detection;

/// User-facing status text
pub mod status;

/// Per-frame orchestration
pub mod orchestrator;

/// Scripted sessions for offline replay
pub mod scenario;

/// Pixel helpers and safe casts
pub mod utils;

/// Error types and result handling
pub mod error;

/// Constants used throughout the library
pub mod constants;

/// Configuration management
pub mod config;

pub use error::{Error, Result};
