//! Routes winit window events into the input sources

use glam::IVec2;
use tracing::trace;
use winit::event::{ElementState, WindowEvent};
use winit::keyboard::PhysicalKey;

use super::events::{KeyCode, MouseButton};
use super::keyboard::KeyboardInput;
use super::mouse::MouseInput;

/// Forwards raw winit input to the keyboard and mouse sources
///
/// This is the only place that sees winit events; everything downstream
/// works on the polled snapshots.
pub struct InputCollector {
    keyboard: KeyboardInput,
    mouse: MouseInput,
    scale_factor: f64,
}

impl InputCollector {
    /// Creates a collector feeding the given sources
    pub fn new(keyboard: KeyboardInput, mouse: MouseInput) -> Self {
        Self {
            keyboard,
            mouse,
            scale_factor: 1.0,
        }
    }

    /// Update scale factor (DPI scaling)
    pub fn set_scale_factor(&mut self, scale_factor: f64) {
        if scale_factor > 0.0 {
            self.scale_factor = scale_factor;
        }
    }

    /// Converts a physical cursor position to logical surface pixels
    pub fn to_surface_pos(&self, x: f64, y: f64) -> IVec2 {
        IVec2::new(
            (x / self.scale_factor).round() as i32,
            (y / self.scale_factor).round() as i32,
        )
    }

    /// Handle a winit window event
    pub fn handle_window_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                let pos = self.to_surface_pos(position.x, position.y);
                self.mouse.notify_motion(pos);
            }

            WindowEvent::MouseInput { state, button, .. } => {
                if let Some(button) = MouseButton::from_winit(*button) {
                    self.mouse
                        .notify_button(button, *state == ElementState::Pressed);
                }
            }

            WindowEvent::KeyboardInput { event, .. } => {
                let PhysicalKey::Code(code) = event.physical_key else {
                    trace!(key = ?event.physical_key, "Ignoring unidentified key");
                    return;
                };
                let Some(key) = KeyCode::from_winit(code) else {
                    trace!(?code, "Ignoring unmapped key");
                    return;
                };
                match event.state {
                    ElementState::Pressed => self.keyboard.key_pressed(key),
                    ElementState::Released => self.keyboard.key_released(key),
                }
            }

            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                self.set_scale_factor(*scale_factor);
            }

            // Releases are not delivered while unfocused
            WindowEvent::Focused(false) => {
                self.keyboard.release_all();
            }

            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::dpi::PhysicalPosition;
    use winit::event::DeviceId;

    fn cursor_moved(x: f64, y: f64) -> WindowEvent {
        // SAFETY: dummy ids are only compared, never passed back to winit
        let device_id = unsafe { DeviceId::dummy() };
        WindowEvent::CursorMoved {
            device_id,
            position: PhysicalPosition::new(x, y),
        }
    }

    #[test]
    fn test_cursor_motion_reaches_mouse() {
        let keyboard = KeyboardInput::new();
        let mouse = MouseInput::new();
        let mut collector = InputCollector::new(keyboard, mouse.clone());

        collector.handle_window_event(&cursor_moved(100.0, 50.0));
        mouse.poll();
        assert_eq!(mouse.position(), IVec2::new(100, 50));
    }

    #[test]
    fn test_cursor_motion_is_scaled_to_logical_pixels() {
        let mouse = MouseInput::new();
        let mut collector = InputCollector::new(KeyboardInput::new(), mouse.clone());
        collector.set_scale_factor(2.0);

        collector.handle_window_event(&cursor_moved(200.0, 101.0));
        mouse.poll();
        assert_eq!(mouse.position(), IVec2::new(100, 51));
    }

    #[test]
    fn test_ignores_non_positive_scale_factor() {
        let mut collector = InputCollector::new(KeyboardInput::new(), MouseInput::new());
        collector.set_scale_factor(0.0);
        assert_eq!(collector.to_surface_pos(10.0, 20.0), IVec2::new(10, 20));
    }

    #[test]
    fn test_focus_loss_releases_keys() {
        let keyboard = KeyboardInput::new();
        let mut collector = InputCollector::new(keyboard.clone(), MouseInput::new());

        keyboard.key_pressed(KeyCode::Space);
        collector.handle_window_event(&WindowEvent::Focused(false));
        keyboard.poll();
        assert!(!keyboard.is_down(KeyCode::Space));
    }
}
