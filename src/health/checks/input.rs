//! Input tracking self-test

use glam::IVec2;

use crate::app::input::{KeyCode, KeyboardInput, MouseInput};
use crate::health::check::{CheckResult, Findings, SystemCheck};

/// Drives the keyboard and mouse trackers through a scripted frame sequence
#[derive(Default)]
pub struct InputCheck;

impl InputCheck {
    pub fn new() -> Self {
        Self
    }

    fn keyboard(findings: &mut Findings) {
        let keyboard = KeyboardInput::new();

        keyboard.key_pressed(KeyCode::Space);
        keyboard.poll();
        findings.require(
            keyboard.is_down(KeyCode::Space) && keyboard.is_down_once(KeyCode::Space),
            "Key press reported on the first frame",
        );

        keyboard.poll();
        findings.require(
            keyboard.is_down(KeyCode::Space) && !keyboard.is_down_once(KeyCode::Space),
            "Held key reported once only",
        );

        keyboard.key_released(KeyCode::Space);
        keyboard.key_pressed(KeyCode::Space);
        keyboard.poll();
        findings.require(
            !keyboard.is_down_once(KeyCode::Space),
            "Release and press within one frame is not a new press",
        );

        keyboard.key_pressed(u16::MAX);
        keyboard.poll();
        findings.require(!keyboard.is_down(u16::MAX), "Out-of-range key codes ignored");
    }

    fn mouse(findings: &mut Findings) {
        let mouse = MouseInput::new();

        mouse.notify_motion(IVec2::new(100, 50));
        mouse.poll();
        findings.require(
            mouse.position() == IVec2::new(100, 50),
            "Absolute mode reports the pointer position",
        );

        mouse.set_relative(true);
        mouse.poll();
        findings.require(
            mouse.position() == IVec2::ZERO,
            "Relative mode starts without movement",
        );

        mouse.notify_motion(IVec2::new(104, 52));
        mouse.notify_motion(IVec2::new(110, 55));
        mouse.poll();
        findings.require(
            mouse.position() == IVec2::new(10, 5),
            "Relative mode reports net motion between polls",
        );

        mouse.notify_warp(IVec2::new(320, 240));
        mouse.poll();
        findings.require(
            mouse.position() == IVec2::ZERO,
            "Pointer warps are not reported as motion",
        );
    }
}

impl SystemCheck for InputCheck {
    fn name(&self) -> &'static str {
        "Input"
    }

    fn description(&self) -> Option<&'static str> {
        Some("Exercises key edge detection and mouse mode tracking")
    }

    fn check(&self) -> CheckResult {
        let mut findings = Findings::new();
        Self::keyboard(&mut findings);
        Self::mouse(&mut findings);
        findings.finish(
            "Keyboard and mouse tracking operational",
            "Input tracking degraded",
            "Input tracking broken",
        )
    }
}
