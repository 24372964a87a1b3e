//! Simulation self-test

use glam::IVec2;

use crate::health::check::{CheckResult, Findings, SystemCheck};
use crate::sim::{PointerSample, RECT_SIZE, World};

/// Moves the square around a default-sized world and checks the wrapping
pub struct SimulationCheck {
    bounds: IVec2,
}

impl SimulationCheck {
    pub fn new() -> Self {
        Self::with_bounds(IVec2::new(640, 480))
    }

    pub fn with_bounds(bounds: IVec2) -> Self {
        Self { bounds }
    }
}

impl Default for SimulationCheck {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemCheck for SimulationCheck {
    fn name(&self) -> &'static str {
        "Simulation"
    }

    fn description(&self) -> Option<&'static str> {
        Some("Validates square movement and edge wrapping")
    }

    fn check(&self) -> CheckResult {
        let mut findings = Findings::new();
        let mut world = World::new(self.bounds);

        findings.require(
            world.tick_count() == 0 && world.rect().position() == IVec2::ZERO,
            "World starts empty with the square at the origin",
        );

        world.update(PointerSample::Absolute(IVec2::new(300, 200)));
        findings.require(
            world.tick_count() == 1 && world.rect().position() == IVec2::ZERO,
            "Absolute samples leave the square in place",
        );

        world.update(PointerSample::Relative(IVec2::new(10, 5)));
        findings.require(
            world.rect().position() == IVec2::new(10, 5),
            "Relative samples move the square",
        );

        world.update(PointerSample::Relative(IVec2::new(-(10 + RECT_SIZE + 1), 0)));
        findings.require(
            world.rect().position().x == self.bounds.x - 1,
            "Square leaving the left edge re-enters on the right",
        );

        world.update(PointerSample::Relative(IVec2::new(1, 0)));
        findings.require(
            world.rect().position().x == -RECT_SIZE,
            "Square leaving the right edge re-enters on the left",
        );

        findings.finish(
            "Simulation operational",
            "Simulation degraded",
            "Simulation misbehaving",
        )
    }
}
