//! Interfaces the frame loop needs from the platform
//!
//! The window/surface and cursor are collaborators: the loop only records
//! frames and asks for them to be shown. Implementations live in
//! [`super::renderer`] (wgpu) and [`super::cursor`] (winit).

use glam::IVec2;
use thiserror::Error;

use super::renderer::command::FrameBuffer;

/// Failures reported by a [`Surface`]
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SurfaceError {
    /// The surface contents were invalidated; skip this frame and carry on
    #[error("surface contents lost")]
    ContentsLost,
    /// The surface or device is gone and cannot be used again
    #[error("surface lost: {0}")]
    Lost(String),
}

impl SurfaceError {
    /// Whether the loop can continue after this error
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::ContentsLost)
    }
}

/// A presentable drawing surface
pub trait Surface {
    /// Scoped access to the next frame
    ///
    /// Dropping a target without calling [`DrawTarget::present`] discards
    /// the frame and releases its resources.
    type Target<'a>: DrawTarget
    where
        Self: 'a;

    fn acquire_draw_target(&mut self) -> Result<Self::Target<'_>, SurfaceError>;
}

/// The back buffer of a [`Surface`] for one frame
pub trait DrawTarget {
    /// Copies a finished off-screen frame into this target
    fn blit(&mut self, frame: &FrameBuffer) -> Result<(), SurfaceError>;

    /// Whether the contents were invalidated since acquisition
    fn contents_lost(&mut self) -> bool;

    /// Publishes the frame
    fn present(self);
}

/// Pointer visibility and positioning
pub trait CursorControl {
    fn hide(&mut self);

    fn show(&mut self);

    /// Moves the pointer to `pos` in surface coordinates
    ///
    /// Returns false when the platform cannot warp the pointer.
    fn warp(&mut self, _pos: IVec2) -> bool {
        false
    }
}
