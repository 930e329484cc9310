//! Saved-face snapshot cache and its on-screen view.
//!
//! The cache holds at most one still of the face, captured from the display
//! surface whenever the occlusion tracker asks for it. While a hand covers
//! the face (and for a few frames after) the still is drawn over the *live*
//! face box, stretched and moved with it. The renderer is driven through
//! [`ViewCommand`]s: create once, move when the placement changes, remove on
//! teardown.

use crate::{
    geometry::FaceBox,
    occlusion::OcclusionTracker,
    utils::{clip_to_buffer, safe_cast::f32_to_i32},
    Error, Result,
};
use image::{imageops, RgbaImage};
use log::{debug, info, warn};
use std::{borrow::Cow, path::Path};

/// Source of the currently displayed pixels, read on demand at capture time
///
/// Surfaces that already hold the frame in memory lend it out; only surfaces
/// that have to read it back from elsewhere hand over an owned copy.
pub trait DisplaySurface {
    /// Current contents of the display surface, if available
    fn read_pixels(&self) -> Option<Cow<'_, RgbaImage>>;
}

impl DisplaySurface for RgbaImage {
    fn read_pixels(&self) -> Option<Cow<'_, RgbaImage>> {
        Some(Cow::Borrowed(self))
    }
}

impl<T: DisplaySurface + ?Sized> DisplaySurface for &T {
    fn read_pixels(&self) -> Option<Cow<'_, RgbaImage>> {
        (**self).read_pixels()
    }
}

/// A captured still of the face region
#[derive(Debug, Clone)]
pub struct FaceSnapshot {
    image: RgbaImage,
    source_rect: FaceBox,
}

impl FaceSnapshot {
    /// Captured pixels
    #[must_use]
    pub const fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Face box at capture time
    #[must_use]
    pub const fn source_rect(&self) -> FaceBox {
        self.source_rect
    }

    /// Write the captured pixels to `path`, format chosen by extension
    ///
    /// # Errors
    ///
    /// Returns [`Error::Image`] if encoding or writing fails
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.image.save(path)?;
        Ok(())
    }
}

/// Integer layout rectangle for the saved-face view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewPlacement {
    /// Left margin
    pub left: i32,
    /// Top margin
    pub top: i32,
    /// View width
    pub width: i32,
    /// View height
    pub height: i32,
}

impl ViewPlacement {
    /// Layout rectangle covering a face box, edges truncated toward zero
    ///
    /// # Errors
    ///
    /// Returns an error if an edge or extent is not a finite i32
    pub fn from_face_box(face: &FaceBox) -> Result<Self> {
        Ok(Self {
            left: f32_to_i32(face.left)?,
            top: f32_to_i32(face.top)?,
            width: f32_to_i32(face.width())?,
            height: f32_to_i32(face.height())?,
        })
    }
}

/// Lifecycle of the saved-face view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SnapshotView {
    /// No view attached; the live feed is all that is shown
    #[default]
    Hidden,
    /// View attached and placed over the current face box this frame
    ShowingSnapshot {
        /// Where the view was placed
        placement: ViewPlacement,
    },
    /// View still attached at its last placement but no longer driven; the
    /// live face is expected to be visible again
    ShowingLive {
        /// Last placement of the view
        placement: ViewPlacement,
    },
}

impl SnapshotView {
    /// Placement of the attached view, if any
    #[must_use]
    pub const fn placement(&self) -> Option<ViewPlacement> {
        match self {
            Self::Hidden => None,
            Self::ShowingSnapshot { placement } | Self::ShowingLive { placement } => {
                Some(*placement)
            }
        }
    }
}

/// Instruction for the render layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewCommand {
    /// Attach a new view showing the current snapshot
    Create(ViewPlacement),
    /// Reposition and resize the attached view
    Move(ViewPlacement),
    /// Detach the view
    Remove,
}

/// What a capture request did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureOutcome {
    /// A new snapshot replaced the previous one
    Captured,
    /// No face box is known yet
    NoFace,
    /// The display surface had no pixels to read
    NoFrame,
    /// The clipped region was empty or invalid; nothing changed
    Skipped,
}

/// Owner of the saved face and its view
#[derive(Debug, Default)]
pub struct FaceSnapshotCache {
    snapshot: Option<FaceSnapshot>,
    view: SnapshotView,
    commands: Vec<ViewCommand>,
}

impl FaceSnapshotCache {
    /// Create an empty cache
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Currently cached snapshot
    #[must_use]
    pub const fn snapshot(&self) -> Option<&FaceSnapshot> {
        self.snapshot.as_ref()
    }

    /// Current view state
    #[must_use]
    pub const fn view(&self) -> SnapshotView {
        self.view
    }

    /// Take the render commands issued since the last call
    pub fn drain_commands(&mut self) -> Vec<ViewCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Capture the face region from the display surface
    ///
    /// On success the previous snapshot is replaced and its view, if any, is
    /// removed at once so the old still never shows at a new position.
    /// Degenerate regions are skipped without touching the cache.
    pub fn capture<S: DisplaySurface + ?Sized>(
        &mut self,
        surface: &S,
        face: Option<&FaceBox>,
    ) -> CaptureOutcome {
        let Some(face) = face else {
            debug!("capture requested without a face box");
            return CaptureOutcome::NoFace;
        };
        let Some(pixels) = surface.read_pixels() else {
            debug!("capture requested but the display surface has no pixels");
            return CaptureOutcome::NoFrame;
        };

        let region = match clip_to_buffer(face, pixels.width(), pixels.height()) {
            Ok(region) => region,
            Err(Error::CaptureSkipped { width, height }) => {
                debug!("capture skipped: clipped face region is {width}x{height}");
                return CaptureOutcome::Skipped;
            }
            Err(e) => {
                warn!("capture skipped: {e}");
                return CaptureOutcome::Skipped;
            }
        };

        let image = imageops::crop_imm(&*pixels, region.x, region.y, region.width, region.height)
            .to_image();
        info!(
            "captured face snapshot {}x{} at ({}, {})",
            region.width, region.height, region.x, region.y
        );

        self.snapshot = Some(FaceSnapshot {
            image,
            source_rect: *face,
        });
        self.hide();

        CaptureOutcome::Captured
    }

    /// Apply the display policy for this frame
    ///
    /// Runs after the tracker has observed the frame. While the countdown is
    /// running the view follows the current face box; once it has run out and
    /// the hand has been gone long enough, the view is removed.
    pub fn update_display(&mut self, tracker: &mut OcclusionTracker, face: Option<&FaceBox>) {
        if tracker.take_visible_frame() {
            let target = face.filter(|_| self.snapshot.is_some());
            if let Some(face) = target {
                match ViewPlacement::from_face_box(face) {
                    Ok(placement) => self.show(placement),
                    Err(e) => {
                        warn!("cannot place saved face view: {e}");
                        self.idle();
                    }
                }
            } else {
                self.idle();
            }
        } else if tracker.teardown_due() {
            self.hide();
        } else {
            self.idle();
        }
    }

    fn show(&mut self, placement: ViewPlacement) {
        match self.view {
            SnapshotView::Hidden => self.commands.push(ViewCommand::Create(placement)),
            SnapshotView::ShowingSnapshot { placement: last }
            | SnapshotView::ShowingLive { placement: last } => {
                if last != placement {
                    self.commands.push(ViewCommand::Move(placement));
                }
            }
        }
        self.view = SnapshotView::ShowingSnapshot { placement };
    }

    fn idle(&mut self) {
        if let SnapshotView::ShowingSnapshot { placement } = self.view {
            self.view = SnapshotView::ShowingLive { placement };
        }
    }

    fn hide(&mut self) {
        if self.view != SnapshotView::Hidden {
            debug!("removing saved face view");
            self.commands.push(ViewCommand::Remove);
            self.view = SnapshotView::Hidden;
        }
    }
}
