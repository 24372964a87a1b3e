//! Per-frame orchestration
//!
//! Every tick runs the same linear sequence:
//!
//! 1. poll keyboard, poll mouse
//! 2. ESC pressed this frame: move to [`LoopState::Exiting`] and stop
//! 3. SPACE toggles relative mouse mode, C toggles cursor visibility
//! 4. in relative mode, warp the pointer back to the surface centre
//! 5. update the world from the mouse snapshot
//! 6. record the frame into the off-screen [`FrameBuffer`]
//! 7. acquire the draw target, blit, present
//!
//! Ticks outside [`LoopState::Running`] do nothing.

use std::thread;
use std::time::Duration;

use glam::IVec2;
use thiserror::Error;
use tracing::{debug, error, info, warn};

use super::config::AppConfig;
use super::input::{KeyCode, KeyboardInput, MouseInput};
use super::renderer::command::{BLACK, FrameBuffer, GREEN, WHITE};
use super::surface::{CursorControl, DrawTarget, Surface, SurfaceError};
use crate::sim::{PointerSample, World};

/// Lifecycle of the frame loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Running,
    /// Exit requested; no more updates will run
    Exiting,
    Terminated,
}

/// Unrecoverable frame failure
#[derive(Debug, Error)]
pub enum FrameError {
    #[error("surface failure: {0}")]
    Surface(#[from] SurfaceError),
}

/// What happened to the frame at the end of a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresentOutcome {
    Presented,
    /// Contents were lost, the frame was dropped
    Skipped,
}

/// Loop parameters
#[derive(Debug, Clone)]
pub struct LoopSettings {
    /// Simulation surface size in logical pixels
    pub surface_size: IVec2,
    /// Time yielded to the host after each tick
    pub frame_interval: Duration,
    /// Keep the pointer centred while in relative mode
    pub recenter_relative: bool,
    /// Begin in relative mode
    pub start_relative: bool,
}

impl Default for LoopSettings {
    fn default() -> Self {
        Self {
            surface_size: IVec2::new(640, 480),
            frame_interval: Duration::from_millis(10),
            recenter_relative: true,
            start_relative: false,
        }
    }
}

impl From<&AppConfig> for LoopSettings {
    fn from(config: &AppConfig) -> Self {
        Self {
            surface_size: IVec2::new(config.window.width as i32, config.window.height as i32),
            frame_interval: Duration::from_millis(config.input.frame_interval_ms),
            recenter_relative: config.input.recenter_relative,
            start_relative: config.input.start_relative,
        }
    }
}

/// Frame loop context: input sources, world and loop state
pub struct FrameLoop {
    settings: LoopSettings,
    state: LoopState,
    keyboard: KeyboardInput,
    mouse: MouseInput,
    world: World,
    frame: FrameBuffer,
    cursor_hidden: bool,
    frames_rendered: u64,
    frames_presented: u64,
}

impl FrameLoop {
    pub fn new(settings: LoopSettings, keyboard: KeyboardInput, mouse: MouseInput) -> Self {
        mouse.set_relative(settings.start_relative);
        Self {
            state: LoopState::Running,
            world: World::new(settings.surface_size),
            frame: FrameBuffer::new(settings.surface_size),
            keyboard,
            mouse,
            settings,
            cursor_hidden: false,
            frames_rendered: 0,
            frames_presented: 0,
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn settings(&self) -> &LoopSettings {
        &self.settings
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    /// The most recently rendered off-screen frame
    pub fn frame(&self) -> &FrameBuffer {
        &self.frame
    }

    pub fn is_relative(&self) -> bool {
        self.mouse.is_relative()
    }

    pub fn is_cursor_hidden(&self) -> bool {
        self.cursor_hidden
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    /// Runs one frame
    ///
    /// A fatal surface error terminates the loop and is returned; lost
    /// contents only skip the present.
    pub fn tick<S, C>(&mut self, surface: &mut S, cursor: &mut C) -> Result<LoopState, FrameError>
    where
        S: Surface,
        C: CursorControl,
    {
        if self.state != LoopState::Running {
            return Ok(self.state);
        }

        self.keyboard.poll();
        self.mouse.poll();

        if self.keyboard.is_down_once(KeyCode::Escape) {
            self.request_exit();
            return Ok(self.state);
        }

        self.process_commands(cursor);
        self.recenter(cursor);

        let position = self.mouse.position();
        let sample = if self.mouse.is_relative() {
            PointerSample::Relative(position)
        } else {
            PointerSample::Absolute(position)
        };
        self.world.update(sample);

        self.render(position);

        match self.present(surface) {
            Ok(PresentOutcome::Presented) => self.frames_presented += 1,
            Ok(PresentOutcome::Skipped) => {}
            Err(e) => {
                error!(error = %e, "Surface failure, terminating");
                self.state = LoopState::Terminated;
                return Err(e.into());
            }
        }

        Ok(self.state)
    }

    /// Asks the loop to stop, e.g. when the window is closed
    ///
    /// Has no effect once the loop is already stopping.
    pub fn request_exit(&mut self) {
        if self.state == LoopState::Running {
            info!(ticks = self.world.tick_count(), "Exit requested");
            self.state = LoopState::Exiting;
        }
    }

    /// Completes shutdown after an exit request
    pub fn finish(&mut self) -> LoopState {
        if self.state == LoopState::Exiting {
            info!(
                rendered = self.frames_rendered,
                presented = self.frames_presented,
                "Frame loop terminated"
            );
            self.state = LoopState::Terminated;
        }
        self.state
    }

    /// Drives the loop on the current thread until exit
    ///
    /// Sleeps `frame_interval` between ticks so input can arrive from other
    /// threads.
    pub fn run<S, C>(&mut self, surface: &mut S, cursor: &mut C) -> Result<(), FrameError>
    where
        S: Surface,
        C: CursorControl,
    {
        while self.tick(surface, cursor)? == LoopState::Running {
            thread::sleep(self.settings.frame_interval);
        }
        self.finish();
        Ok(())
    }

    fn process_commands<C: CursorControl>(&mut self, cursor: &mut C) {
        if self.keyboard.is_down_once(KeyCode::Space) {
            let relative = !self.mouse.is_relative();
            self.mouse.set_relative(relative);
            info!(relative, "Mouse mode toggled");
        }

        if self.keyboard.is_down_once(KeyCode::C) {
            self.cursor_hidden = !self.cursor_hidden;
            if self.cursor_hidden {
                cursor.hide();
            } else {
                cursor.show();
            }
            debug!(hidden = self.cursor_hidden, "Cursor visibility toggled");
        }
    }

    fn recenter<C: CursorControl>(&mut self, cursor: &mut C) {
        if !self.settings.recenter_relative || !self.mouse.is_relative() {
            return;
        }
        let center = self.settings.surface_size / 2;
        if self.mouse.absolute_position() != center && cursor.warp(center) {
            self.mouse.notify_warp(center);
        }
    }

    fn render(&mut self, position: IVec2) {
        let frame = &mut self.frame;
        frame.clear(BLACK);

        frame
            .text(
                IVec2::new(20, 20),
                format!("Position: ({}, {})", position.x, position.y),
            )
            .color(GREEN);
        frame
            .text(IVec2::new(20, 32), "Press Space to switch mouse modes")
            .color(GREEN);
        frame
            .text(IVec2::new(20, 44), "Press C to toggle cursor")
            .color(GREEN);
        frame
            .text(IVec2::new(20, 56), "Press ESC to exit")
            .color(GREEN);

        let rect = self.world.rect();
        frame
            .rect(rect.position(), IVec2::splat(rect.size()))
            .color(WHITE);

        self.frames_rendered += 1;
    }

    fn present<S: Surface>(&mut self, surface: &mut S) -> Result<PresentOutcome, SurfaceError> {
        // The target is released when it goes out of scope on every path
        let mut target = match surface.acquire_draw_target() {
            Ok(target) => target,
            Err(e) if e.is_transient() => {
                warn!(error = %e, "Could not acquire frame, skipping present");
                return Ok(PresentOutcome::Skipped);
            }
            Err(e) => return Err(e),
        };

        match target.blit(&self.frame) {
            Ok(()) => {}
            Err(e) if e.is_transient() => {
                warn!(error = %e, "Blit failed, skipping present");
                return Ok(PresentOutcome::Skipped);
            }
            Err(e) => return Err(e),
        }

        if target.contents_lost() {
            warn!("Surface contents lost, skipping present");
            return Ok(PresentOutcome::Skipped);
        }

        target.present();
        Ok(PresentOutcome::Presented)
    }
}
