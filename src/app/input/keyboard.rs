//! Thread-safe keyboard input source

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::keys::KeyStates;

/// Shared handle to the keyboard state
///
/// Clones refer to the same state. Notification writers (`key_pressed`,
/// `key_released`) may run on any thread; the frame loop calls [`poll`]
/// once per frame and then queries the snapshot.
///
/// [`poll`]: KeyboardInput::poll
#[derive(Debug, Clone, Default)]
pub struct KeyboardInput {
    keys: Arc<Mutex<KeyStates>>,
}

impl KeyboardInput {
    pub fn new() -> Self {
        Self::default()
    }

    // Plain data, so a panic in another holder leaves nothing half-written
    fn lock(&self) -> MutexGuard<'_, KeyStates> {
        self.keys.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Key-down notification
    pub fn key_pressed(&self, code: impl Into<u16>) {
        self.lock().set_down(code.into());
    }

    /// Key-up notification
    pub fn key_released(&self, code: impl Into<u16>) {
        self.lock().set_up(code.into());
    }

    /// Drops every held key, used when the window loses focus
    pub fn release_all(&self) {
        self.lock().release_all();
    }

    /// Takes this frame's snapshot
    pub fn poll(&self) {
        self.lock().poll();
    }

    /// Key held as of the last poll
    pub fn is_down(&self, code: impl Into<u16>) -> bool {
        self.lock().is_down(code.into())
    }

    /// Key pressed since the previous poll
    pub fn is_down_once(&self, code: impl Into<u16>) -> bool {
        self.lock().is_down_once(code.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::input::KeyCode;
    use std::thread;

    #[test]
    fn test_clones_share_state() {
        let keyboard = KeyboardInput::new();
        let writer = keyboard.clone();

        writer.key_pressed(KeyCode::Escape);
        keyboard.poll();
        assert!(keyboard.is_down_once(KeyCode::Escape));
        assert!(!keyboard.is_down(KeyCode::Space));
    }

    #[test]
    fn test_raw_codes_accepted() {
        let keyboard = KeyboardInput::new();
        keyboard.key_pressed(200u16);
        keyboard.key_pressed(9000u16);
        keyboard.poll();
        assert!(keyboard.is_down(200u16));
        assert!(!keyboard.is_down(9000u16));
    }

    #[test]
    fn test_notifications_from_another_thread() {
        let keyboard = KeyboardInput::new();
        let writer = keyboard.clone();

        thread::spawn(move || {
            for _ in 0..1000 {
                writer.key_pressed(KeyCode::A);
                writer.key_released(KeyCode::A);
            }
            writer.key_pressed(KeyCode::A);
        })
        .join()
        .unwrap();

        keyboard.poll();
        assert!(keyboard.is_down(KeyCode::A));
        assert!(keyboard.is_down_once(KeyCode::A));
    }

    #[test]
    fn test_queries_stable_while_writer_runs() {
        let keyboard = KeyboardInput::new();
        keyboard.key_pressed(KeyCode::Space);
        keyboard.poll();

        let writer = keyboard.clone();
        let handle = thread::spawn(move || {
            for i in 0..500 {
                if i % 2 == 0 {
                    writer.key_released(KeyCode::Space);
                } else {
                    writer.key_pressed(KeyCode::Space);
                }
            }
        });

        for _ in 0..100 {
            assert!(keyboard.is_down(KeyCode::Space));
            assert!(keyboard.is_down_once(KeyCode::Space));
        }
        handle.join().unwrap();
    }
}
