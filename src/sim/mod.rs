//! Simulation state
//!
//! A single square that follows relative mouse motion around a wrapping
//! surface.

pub mod rect;

use glam::IVec2;

pub use rect::{RECT_SIZE, WrappingRect};

/// Pointer reading handed to the simulation each frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerSample {
    /// Absolute surface position (display only)
    Absolute(IVec2),
    /// Displacement since the previous frame
    Relative(IVec2),
}

/// Simulation world state
#[derive(Debug, Clone)]
pub struct World {
    /// Total number of updates applied
    tick_count: u64,
    rect: WrappingRect,
}

impl World {
    /// Creates a world for a `bounds` sized surface
    pub fn new(bounds: IVec2) -> Self {
        Self {
            tick_count: 0,
            rect: WrappingRect::new(bounds),
        }
    }

    /// Advances the world by one frame
    ///
    /// Only relative samples move the rectangle; absolute positions are
    /// shown in the overlay but never applied.
    pub fn update(&mut self, pointer: PointerSample) {
        self.tick_count += 1;
        if let PointerSample::Relative(delta) = pointer {
            self.rect.translate(delta);
        }
    }

    /// Returns the number of updates applied so far
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn rect(&self) -> &WrappingRect {
        &self.rect
    }
}
