//! Mouse tracking with absolute and relative reporting modes
//!
//! Motion notifications carry absolute surface positions. In relative mode
//! each poll reports the displacement since the previous poll, computed from
//! the first and last positions only, so any number of motion events between
//! two polls collapses into their net movement.
//!
//! When the pointer is recentred by the system (see [`PointerState::warp`])
//! the reference point moves with it, so the warp never shows up as motion.
//! A motion event queued before the warp can still be delivered after it
//! (X11 does this); one such event repeating the pre-warp position is
//! dropped. Older stale positions are not detected.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use glam::IVec2;
use tracing::{debug, trace};

use super::events::MouseButton;

/// Pointer state owned by the tracker
#[derive(Debug, Clone, Default)]
pub struct PointerState {
    /// Latest notified position
    current: IVec2,
    /// Position at the last relative-mode poll
    reference: IVec2,
    /// Displacement computed by the last poll (zero in absolute mode)
    delta: IVec2,
    /// Frame value returned by `position()`
    reported: IVec2,
    relative: bool,
    buttons: [bool; MouseButton::COUNT],
    /// Pre-warp position, until the next motion event arrives
    stale: Option<IVec2>,
}

impl PointerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the pointer's new absolute position
    pub fn motion(&mut self, pos: IVec2) {
        if self.stale.take() == Some(pos) {
            trace!(?pos, "Dropping motion queued before warp");
            return;
        }
        self.current = pos;
    }

    /// Records that the system moved the pointer to `pos`
    ///
    /// Movement accumulated since the last poll is kept.
    pub fn warp(&mut self, pos: IVec2) {
        let pending = self.current - self.reference;
        self.stale = (self.current != pos).then_some(self.current);
        self.current = pos;
        self.reference = pos - pending;
    }

    pub fn button(&mut self, button: MouseButton, pressed: bool) {
        self.buttons[button.index()] = pressed;
    }

    /// Switches mode; the frame value is reset to match the new mode
    pub fn set_relative(&mut self, relative: bool) {
        if relative == self.relative {
            return;
        }
        self.relative = relative;
        self.delta = IVec2::ZERO;
        if relative {
            self.reference = self.current;
            self.reported = IVec2::ZERO;
        } else {
            self.reported = self.current;
        }
    }

    pub fn poll(&mut self) {
        if self.relative {
            self.delta = self.current - self.reference;
            self.reference = self.current;
            self.reported = self.delta;
        } else {
            self.delta = IVec2::ZERO;
            self.reported = self.current;
        }
    }

    pub fn is_relative(&self) -> bool {
        self.relative
    }

    /// Absolute position in absolute mode, displacement in relative mode
    pub fn position(&self) -> IVec2 {
        self.reported
    }

    pub fn delta(&self) -> IVec2 {
        self.delta
    }

    pub fn absolute_position(&self) -> IVec2 {
        self.current
    }

    pub fn is_button_down(&self, button: MouseButton) -> bool {
        self.buttons[button.index()]
    }
}

/// Shared handle to the pointer state
///
/// Clones refer to the same state, so the event side and the frame loop can
/// each hold one. All methods take the lock for their whole duration, which
/// makes [`MouseInput::poll`] atomic with respect to notifications.
#[derive(Debug, Clone, Default)]
pub struct MouseInput {
    state: Arc<Mutex<PointerState>>,
}

impl MouseInput {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, PointerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Pointer moved to `pos` (surface-local pixels)
    pub fn notify_motion(&self, pos: IVec2) {
        self.lock().motion(pos);
    }

    /// Pointer was warped to `pos` by us or the system
    pub fn notify_warp(&self, pos: IVec2) {
        self.lock().warp(pos);
    }

    pub fn notify_button(&self, button: MouseButton, pressed: bool) {
        self.lock().button(button, pressed);
    }

    /// Switches reporting mode
    ///
    /// Entering relative mode re-anchors the reference point at the current
    /// position, so the first relative poll reports no movement.
    pub fn set_relative(&self, relative: bool) {
        let mut state = self.lock();
        state.set_relative(relative);
        debug!(relative, pos = ?state.absolute_position(), "Mouse mode set");
    }

    /// Takes this frame's snapshot
    pub fn poll(&self) {
        self.lock().poll();
    }

    pub fn is_relative(&self) -> bool {
        self.lock().is_relative()
    }

    /// Frame value: absolute position or relative delta, see [`Self::is_relative`]
    pub fn position(&self) -> IVec2 {
        self.lock().position()
    }

    /// Displacement reported by the last poll, zero in absolute mode
    pub fn delta(&self) -> IVec2 {
        self.lock().delta()
    }

    /// Latest known pointer position regardless of mode
    pub fn absolute_position(&self) -> IVec2 {
        self.lock().absolute_position()
    }

    pub fn is_button_down(&self, button: MouseButton) -> bool {
        self.lock().is_button_down(button)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_absolute_mode_reports_position_at_poll() {
        let mouse = MouseInput::new();
        mouse.notify_motion(IVec2::new(100, 50));
        assert_eq!(mouse.position(), IVec2::ZERO);

        mouse.poll();
        assert_eq!(mouse.position(), IVec2::new(100, 50));
        assert_eq!(mouse.delta(), IVec2::ZERO);

        // Later motion is not visible until the next poll
        mouse.notify_motion(IVec2::new(3, 4));
        assert_eq!(mouse.position(), IVec2::new(100, 50));
    }

    #[test]
    fn test_switch_to_relative_starts_at_zero() {
        let mouse = MouseInput::new();
        mouse.notify_motion(IVec2::new(600, 400));
        mouse.poll();

        mouse.set_relative(true);
        mouse.poll();
        assert_eq!(mouse.position(), IVec2::ZERO);
    }

    #[test]
    fn test_switch_to_relative_ignores_unpolled_motion() {
        let mouse = MouseInput::new();
        mouse.notify_motion(IVec2::new(600, 400));
        mouse.set_relative(true);
        mouse.poll();
        assert_eq!(mouse.position(), IVec2::ZERO);
    }

    #[test]
    fn test_relative_reports_net_motion_between_polls() {
        let mouse = MouseInput::new();
        mouse.notify_motion(IVec2::new(10, 10));
        mouse.set_relative(true);
        mouse.poll();

        mouse.notify_motion(IVec2::new(12, 9));
        mouse.notify_motion(IVec2::new(30, 0));
        mouse.notify_motion(IVec2::new(25, 14));
        mouse.poll();
        assert_eq!(mouse.position(), IVec2::new(15, 4));

        // No motion since last poll
        mouse.poll();
        assert_eq!(mouse.position(), IVec2::ZERO);
    }

    #[test]
    fn test_end_to_end_mode_scenario() {
        let mouse = MouseInput::new();
        mouse.notify_motion(IVec2::new(100, 50));
        mouse.poll();
        assert_eq!(mouse.position(), IVec2::new(100, 50));

        mouse.set_relative(true);
        mouse.poll();
        assert_eq!(mouse.position(), IVec2::ZERO);

        mouse.notify_motion(IVec2::new(110, 55));
        mouse.poll();
        assert_eq!(mouse.position(), IVec2::new(10, 5));
    }

    #[test]
    fn test_leaving_relative_keeps_absolute_position() {
        let mouse = MouseInput::new();
        mouse.set_relative(true);
        mouse.notify_motion(IVec2::new(70, 80));
        mouse.poll();
        assert_eq!(mouse.position(), IVec2::new(70, 80));

        mouse.set_relative(false);
        mouse.poll();
        assert_eq!(mouse.position(), IVec2::new(70, 80));
        assert_eq!(mouse.delta(), IVec2::ZERO);
    }

    #[test]
    fn test_toggle_mid_frame_keeps_frame_value_consistent() {
        let mouse = MouseInput::new();
        mouse.notify_motion(IVec2::new(300, 200));
        mouse.poll();
        assert_eq!(mouse.position(), IVec2::new(300, 200));

        // An absolute position must never be read back as a delta
        mouse.set_relative(true);
        assert_eq!(mouse.position(), IVec2::ZERO);

        mouse.notify_motion(IVec2::new(305, 200));
        mouse.poll();
        mouse.set_relative(false);
        assert_eq!(mouse.position(), IVec2::new(305, 200));
    }

    #[test]
    fn test_setting_relative_twice_does_not_reanchor() {
        let mouse = MouseInput::new();
        mouse.set_relative(true);
        mouse.notify_motion(IVec2::new(5, 5));
        mouse.set_relative(true);
        mouse.poll();
        assert_eq!(mouse.position(), IVec2::new(5, 5));
    }

    #[test]
    fn test_warp_is_not_reported_as_motion() {
        let mouse = MouseInput::new();
        mouse.notify_motion(IVec2::new(320, 240));
        mouse.set_relative(true);
        mouse.poll();

        mouse.notify_motion(IVec2::new(330, 250));
        mouse.poll();
        assert_eq!(mouse.position(), IVec2::new(10, 10));

        // Recentre; the echo of the warp arrives as a motion event
        mouse.notify_warp(IVec2::new(320, 240));
        mouse.notify_motion(IVec2::new(320, 240));
        mouse.poll();
        assert_eq!(mouse.position(), IVec2::ZERO);

        mouse.notify_motion(IVec2::new(317, 241));
        mouse.poll();
        assert_eq!(mouse.position(), IVec2::new(-3, 1));
    }

    #[test]
    fn test_warp_keeps_pending_motion() {
        let mouse = MouseInput::new();
        mouse.set_relative(true);
        mouse.poll();

        mouse.notify_motion(IVec2::new(7, -2));
        mouse.notify_warp(IVec2::new(320, 240));
        mouse.notify_motion(IVec2::new(321, 240));
        mouse.poll();
        assert_eq!(mouse.position(), IVec2::new(8, -2));
    }

    #[test]
    fn test_late_pre_warp_motion_is_dropped() {
        let mouse = MouseInput::new();
        mouse.notify_motion(IVec2::new(320, 240));
        mouse.set_relative(true);
        mouse.poll();

        mouse.notify_motion(IVec2::new(400, 300));
        mouse.poll();
        assert_eq!(mouse.position(), IVec2::new(80, 60));

        // The pre-warp position is delivered again after the warp
        mouse.notify_warp(IVec2::new(320, 240));
        mouse.notify_motion(IVec2::new(400, 300));
        mouse.poll();
        assert_eq!(mouse.position(), IVec2::ZERO);
        assert_eq!(mouse.absolute_position(), IVec2::new(320, 240));

        mouse.notify_motion(IVec2::new(322, 240));
        mouse.poll();
        assert_eq!(mouse.position(), IVec2::new(2, 0));
    }

    #[test]
    fn test_only_first_motion_after_warp_is_checked() {
        let mouse = MouseInput::new();
        mouse.notify_motion(IVec2::new(400, 300));
        mouse.set_relative(true);
        mouse.poll();

        mouse.notify_warp(IVec2::new(320, 240));
        mouse.notify_motion(IVec2::new(321, 240));
        // A real return to the old spot is motion again
        mouse.notify_motion(IVec2::new(400, 300));
        mouse.poll();
        assert_eq!(mouse.position(), IVec2::new(80, 60));
    }

    #[test]
    fn test_buttons_track_level_state() {
        let mouse = MouseInput::new();
        assert!(!mouse.is_button_down(MouseButton::Left));

        mouse.notify_button(MouseButton::Left, true);
        assert!(mouse.is_button_down(MouseButton::Left));
        assert!(!mouse.is_button_down(MouseButton::Right));

        mouse.notify_button(MouseButton::Left, false);
        assert!(!mouse.is_button_down(MouseButton::Left));
    }

    #[test]
    fn test_motion_from_another_thread() {
        let mouse = MouseInput::new();
        mouse.set_relative(true);
        mouse.poll();

        let writer = mouse.clone();
        thread::spawn(move || {
            for x in 1..=40 {
                writer.notify_motion(IVec2::new(x, x * 2));
            }
        })
        .join()
        .unwrap();

        mouse.poll();
        assert_eq!(mouse.position(), IVec2::new(40, 80));
    }
}
