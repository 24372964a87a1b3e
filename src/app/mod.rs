//! Application module
//!
//! Handles windowing, input, the frame loop and rendering.

pub mod config;
pub mod cursor;
pub mod frame_loop;
pub mod input;
pub mod renderer;
mod runner;
pub mod surface;
mod window;

pub use config::{AppConfig, InputConfig, WindowConfig};
pub use frame_loop::{FrameError, FrameLoop, LoopSettings, LoopState, PresentOutcome};
pub use runner::App;
pub use surface::{CursorControl, DrawTarget, Surface, SurfaceError};
pub use window::window_attributes_from_config;
