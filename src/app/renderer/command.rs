//! Off-screen frame buffer
//!
//! The frame loop records each frame here first; a [`DrawTarget`](crate::app::surface::DrawTarget)
//! then copies the finished frame onto the real surface. Commands are pushed
//! by builders when they drop, so optional properties can be chained:
//!
//! ```
//! use glam::IVec2;
//! use relmouse::app::renderer::command::{FrameBuffer, GREEN};
//!
//! let mut frame = FrameBuffer::new(IVec2::new(640, 480));
//! frame.text(IVec2::new(20, 20), "Press ESC to exit").color(GREEN);
//! assert_eq!(frame.commands().len(), 1);
//! ```

use glam::IVec2;

/// Linear RGB color, each channel in `0.0..=1.0`
pub type Color = [f32; 3];

pub const BLACK: Color = [0.0, 0.0, 0.0];
pub const WHITE: Color = [1.0, 1.0, 1.0];
pub const GREEN: Color = [0.0, 1.0, 0.0];

/// A single recorded drawing operation
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    /// Fill the whole frame
    Clear { color: Color },
    /// Text with its baseline starting at `pos`
    Text {
        pos: IVec2,
        text: String,
        color: Color,
    },
    /// One pixel wide rectangle outline
    RectOutline {
        pos: IVec2,
        size: IVec2,
        color: Color,
    },
}

/// Recorded frame, replayed by a draw target
#[derive(Clone, Debug)]
pub struct FrameBuffer {
    size: IVec2,
    commands: Vec<DrawCommand>,
}

impl FrameBuffer {
    /// Creates an empty buffer for a surface of `size` pixels
    pub fn new(size: IVec2) -> Self {
        Self {
            size,
            commands: Vec::with_capacity(8),
        }
    }

    pub fn size(&self) -> IVec2 {
        self.size
    }

    /// Drops everything recorded so far and fills with `color`
    pub fn clear(&mut self, color: Color) {
        self.commands.clear(); // Retains capacity
        self.commands.push(DrawCommand::Clear { color });
    }

    /// Draw a line of text
    pub fn text(&mut self, pos: IVec2, text: impl Into<String>) -> TextBuilder<'_> {
        TextBuilder {
            frame: self,
            pos,
            text: text.into(),
            color: WHITE,
        }
    }

    /// Draw a rectangle outline
    pub fn rect(&mut self, pos: IVec2, size: IVec2) -> RectBuilder<'_> {
        RectBuilder {
            frame: self,
            pos,
            size,
            color: WHITE,
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }
}

/// Builder for text commands
pub struct TextBuilder<'a> {
    frame: &'a mut FrameBuffer,
    pos: IVec2,
    text: String,
    color: Color,
}

impl TextBuilder<'_> {
    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }
}

impl Drop for TextBuilder<'_> {
    fn drop(&mut self) {
        self.frame.commands.push(DrawCommand::Text {
            pos: self.pos,
            text: std::mem::take(&mut self.text),
            color: self.color,
        });
    }
}

/// Builder for rectangle outlines
pub struct RectBuilder<'a> {
    frame: &'a mut FrameBuffer,
    pos: IVec2,
    size: IVec2,
    color: Color,
}

impl RectBuilder<'_> {
    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }
}

impl Drop for RectBuilder<'_> {
    fn drop(&mut self) {
        self.frame.commands.push(DrawCommand::RectOutline {
            pos: self.pos,
            size: self.size,
            color: self.color,
        });
    }
}
