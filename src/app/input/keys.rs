//! Per-key state with frame-edge detection

use tracing::trace;

/// Size of the key code space; codes at or above this are ignored
pub const KEY_COUNT: usize = 256;

/// Key state in three generations
///
/// - `live`: written by key notifications at any time
/// - `current`: snapshot of `live` taken by the last [`KeyStates::poll`]
/// - `previous`: the snapshot before that
///
/// Queries only read the two snapshots, so they give the same answer for
/// the whole frame no matter what arrives between polls.
#[derive(Debug, Clone)]
pub struct KeyStates {
    live: [bool; KEY_COUNT],
    current: [bool; KEY_COUNT],
    previous: [bool; KEY_COUNT],
}

impl KeyStates {
    /// Creates a tracker with every key released
    pub fn new() -> Self {
        Self {
            live: [false; KEY_COUNT],
            current: [false; KEY_COUNT],
            previous: [false; KEY_COUNT],
        }
    }

    /// Marks a key as held. Returns false if the code is out of range.
    pub fn set_down(&mut self, code: u16) -> bool {
        self.write(code, true)
    }

    /// Marks a key as released. Returns false if the code is out of range.
    pub fn set_up(&mut self, code: u16) -> bool {
        self.write(code, false)
    }

    fn write(&mut self, code: u16, down: bool) -> bool {
        match self.live.get_mut(code as usize) {
            Some(slot) => {
                *slot = down;
                true
            }
            None => {
                trace!(code, "Ignoring out-of-range key code");
                false
            }
        }
    }

    /// Releases every live key (e.g. after focus loss)
    pub fn release_all(&mut self) {
        self.live = [false; KEY_COUNT];
    }

    /// Finalizes the frame: `previous = current`, `current = live`
    pub fn poll(&mut self) {
        self.previous = self.current;
        self.current = self.live;
    }

    /// Whether the key was held at the last poll
    pub fn is_down(&self, code: u16) -> bool {
        self.current.get(code as usize).copied().unwrap_or(false)
    }

    /// Whether the key went from released to held at the last poll
    pub fn is_down_once(&self, code: u16) -> bool {
        let idx = code as usize;
        match (self.current.get(idx), self.previous.get(idx)) {
            (Some(&now), Some(&before)) => now && !before,
            _ => false,
        }
    }
}

impl Default for KeyStates {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: u16 = 5;

    #[test]
    fn test_new_tracker_is_released() {
        let keys = KeyStates::new();
        assert!(!keys.is_down(A));
        assert!(!keys.is_down_once(A));
    }

    #[test]
    fn test_writes_invisible_until_poll() {
        let mut keys = KeyStates::new();
        keys.set_down(A);
        assert!(!keys.is_down(A));

        keys.poll();
        assert!(keys.is_down(A));
    }

    #[test]
    fn test_last_write_before_poll_wins() {
        let mut keys = KeyStates::new();
        keys.set_down(A);
        keys.set_up(A);
        keys.set_down(A);
        keys.set_up(A);
        keys.poll();
        assert!(!keys.is_down(A));
        assert!(!keys.is_down_once(A));

        keys.set_up(A);
        keys.set_down(A);
        keys.poll();
        assert!(keys.is_down(A));
    }

    #[test]
    fn test_down_once_lasts_exactly_one_poll() {
        let mut keys = KeyStates::new();
        keys.set_down(A);
        keys.poll();
        assert!(keys.is_down_once(A));
        // Idempotent within the frame
        assert!(keys.is_down_once(A));

        keys.poll();
        assert!(keys.is_down(A));
        assert!(!keys.is_down_once(A));

        keys.poll();
        assert!(!keys.is_down_once(A));
    }

    #[test]
    fn test_release_and_press_again_retriggers() {
        let mut keys = KeyStates::new();
        keys.set_down(A);
        keys.poll();
        keys.set_up(A);
        keys.poll();
        assert!(!keys.is_down(A));

        keys.set_down(A);
        keys.poll();
        assert!(keys.is_down_once(A));
    }

    #[test]
    fn test_mid_frame_writes_do_not_change_queries() {
        let mut keys = KeyStates::new();
        keys.set_down(A);
        keys.poll();
        keys.set_up(A);
        assert!(keys.is_down(A));
        assert!(keys.is_down_once(A));
    }

    #[test]
    fn test_out_of_range_codes_are_ignored() {
        let mut keys = KeyStates::new();
        assert!(!keys.set_down(KEY_COUNT as u16));
        assert!(!keys.set_up(u16::MAX));
        keys.poll();
        assert!(!keys.is_down(KEY_COUNT as u16));
        assert!(!keys.is_down_once(u16::MAX));
    }

    #[test]
    fn test_release_all_clears_live_state() {
        let mut keys = KeyStates::new();
        keys.set_down(A);
        keys.set_down(A + 1);
        keys.poll();
        keys.release_all();
        keys.poll();
        assert!(!keys.is_down(A));
        assert!(!keys.is_down(A + 1));
    }
}
