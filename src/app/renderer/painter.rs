//! Replays a [`FrameBuffer`] with egui shapes

use egui::{Align2, Color32, FontId, LayerId, Pos2, Rect, Stroke, StrokeKind, Vec2};

use super::command::{BLACK, Color, DrawCommand, FrameBuffer};

/// Monospace size used for overlay text
const TEXT_SIZE: f32 = 12.0;

pub fn to_color32(color: Color) -> Color32 {
    let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
    Color32::from_rgb(channel(color[0]), channel(color[1]), channel(color[2]))
}

/// Background color of the frame (the last clear wins)
pub fn clear_color(frame: &FrameBuffer) -> Color {
    frame
        .commands()
        .iter()
        .rev()
        .find_map(|cmd| match cmd {
            DrawCommand::Clear { color } => Some(*color),
            _ => None,
        })
        .unwrap_or(BLACK)
}

/// Paints every command onto the background layer
///
/// Clears are handled by the render pass load op, see [`clear_color`].
pub fn paint(ctx: &egui::Context, frame: &FrameBuffer) {
    let painter = ctx.layer_painter(LayerId::background());
    for cmd in frame.commands() {
        match cmd {
            DrawCommand::Clear { .. } => {}
            DrawCommand::Text { pos, text, color } => {
                painter.text(
                    Pos2::new(pos.x as f32, pos.y as f32),
                    Align2::LEFT_BOTTOM,
                    text,
                    FontId::monospace(TEXT_SIZE),
                    to_color32(*color),
                );
            }
            DrawCommand::RectOutline { pos, size, color } => {
                let rect = Rect::from_min_size(
                    Pos2::new(pos.x as f32, pos.y as f32),
                    Vec2::new(size.x as f32, size.y as f32),
                );
                painter.rect_stroke(
                    rect,
                    0.0,
                    Stroke::new(1.0, to_color32(*color)),
                    StrokeKind::Inside,
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::renderer::command::{GREEN, WHITE};
    use glam::IVec2;

    #[test]
    fn test_color_conversion() {
        assert_eq!(to_color32(WHITE), Color32::WHITE);
        assert_eq!(to_color32(GREEN), Color32::from_rgb(0, 255, 0));
        assert_eq!(to_color32([2.0, -1.0, 0.5]), Color32::from_rgb(255, 0, 128));
    }

    #[test]
    fn test_clear_color_uses_last_clear() {
        let mut frame = FrameBuffer::new(IVec2::new(64, 48));
        assert_eq!(clear_color(&frame), BLACK);

        frame.clear(WHITE);
        assert_eq!(clear_color(&frame), WHITE);
    }

    #[test]
    fn test_paint_emits_shapes() {
        let mut frame = FrameBuffer::new(IVec2::new(640, 480));
        frame.clear(BLACK);
        frame.text(IVec2::new(20, 20), "Position: (0, 0)").color(GREEN);
        frame.rect(IVec2::new(10, 10), IVec2::splat(25)).color(WHITE);

        let ctx = egui::Context::default();
        let output = ctx.run(egui::RawInput::default(), |ctx| paint(ctx, &frame));
        assert!(output.shapes.len() >= 2);
    }
}
