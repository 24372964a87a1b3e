//! Cursor control backed by a winit window

use std::sync::Arc;

use glam::IVec2;
use tracing::warn;
use winit::dpi::LogicalPosition;
use winit::window::Window;

use super::surface::CursorControl;

/// Shows, hides and warps the pointer over a window
pub struct WindowCursor {
    window: Arc<Window>,
    /// Cleared after the first failed warp (e.g. on Wayland)
    can_warp: bool,
}

impl WindowCursor {
    pub fn new(window: Arc<Window>) -> Self {
        Self {
            window,
            can_warp: true,
        }
    }
}

impl CursorControl for WindowCursor {
    fn hide(&mut self) {
        self.window.set_cursor_visible(false);
    }

    fn show(&mut self) {
        self.window.set_cursor_visible(true);
    }

    fn warp(&mut self, pos: IVec2) -> bool {
        if !self.can_warp {
            return false;
        }
        match self
            .window
            .set_cursor_position(LogicalPosition::new(pos.x, pos.y))
        {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "Pointer warp not supported, recentring disabled");
                self.can_warp = false;
                false
            }
        }
    }
}
