//! Frame-synchronous input
//!
//! Window events arrive whenever the platform delivers them; the frame loop
//! wants one consistent view per frame. The sources here bridge the two:
//!
//! ```text
//! winit events → InputCollector → KeyboardInput / MouseInput (live state)
//!                                          ↓ poll()
//!                                  frame snapshot → FrameLoop
//! ```
//!
//! # Usage
//!
//! ```
//! use glam::IVec2;
//! use relmouse::app::input::{KeyCode, KeyboardInput, MouseInput};
//!
//! let keyboard = KeyboardInput::new();
//! let mouse = MouseInput::new();
//!
//! // From the event side
//! keyboard.key_pressed(KeyCode::Space);
//! mouse.notify_motion(IVec2::new(100, 50));
//!
//! // Once per frame
//! keyboard.poll();
//! mouse.poll();
//! assert!(keyboard.is_down_once(KeyCode::Space));
//! assert_eq!(mouse.position(), IVec2::new(100, 50));
//! ```

mod collector;
mod events;
mod keyboard;
mod keys;
mod mouse;

// Re-export public API
pub use collector::InputCollector;
pub use events::{KeyCode, MouseButton};
pub use keyboard::KeyboardInput;
pub use keys::{KEY_COUNT, KeyStates};
pub use mouse::{MouseInput, PointerState};
