//! Window configuration and management

use super::config::WindowConfig;
use winit::dpi::LogicalSize;
use winit::window::WindowAttributes;

/// Creates window attributes from configuration
///
/// The drawing surface has a fixed size, so the window is not resizable.
pub fn window_attributes_from_config(config: &WindowConfig) -> WindowAttributes {
    WindowAttributes::default()
        .with_title(config.title.clone())
        .with_inner_size(LogicalSize::new(config.width, config.height))
        .with_resizable(false)
        .with_decorations(config.decorated)
}
