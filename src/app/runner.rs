//! Main application handler

use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{error, info, warn};
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow};
use winit::window::{Window, WindowId};

use super::config::AppConfig;
use super::cursor::WindowCursor;
use super::frame_loop::{FrameLoop, LoopSettings, LoopState};
use super::input::{InputCollector, KeyboardInput, MouseInput};
use super::renderer::Renderer;
use super::window::window_attributes_from_config;

/// Window-side resources, created once the event loop resumes
struct Shell {
    window: Arc<Window>,
    renderer: Renderer,
    cursor: WindowCursor,
}

/// Spaces ticks at least one interval apart
///
/// winit calls `about_to_wait` after every batch of events, so input alone
/// would otherwise drive extra ticks before the deadline.
#[derive(Debug, Clone)]
struct TickSchedule {
    interval: Duration,
    next: Option<Instant>,
}

impl TickSchedule {
    fn new(interval: Duration) -> Self {
        Self {
            interval,
            next: None,
        }
    }

    /// Returns true when a tick may run at `now`; otherwise the caller
    /// should wait until [`Self::deadline`]
    fn is_due(&self, now: Instant) -> bool {
        self.next.is_none_or(|next| now >= next)
    }

    /// Records a tick that ran at `now`
    fn ticked(&mut self, now: Instant) -> Instant {
        let next = now + self.interval;
        self.next = Some(next);
        next
    }

    fn deadline(&self) -> Option<Instant> {
        self.next
    }
}

/// Main application
pub struct App {
    config: AppConfig,
    shell: Option<Shell>,
    input_collector: InputCollector,
    frame_loop: FrameLoop,
    schedule: TickSchedule,
    /// Mode shown in the window title
    title_relative: Option<bool>,
    /// Set when the loop ended on an unrecoverable error
    failed: bool,
}

impl App {
    /// Creates a new application with the provided configuration
    pub fn new(config: AppConfig) -> Self {
        info!(profile = %config.profile, "Starting");
        info!(?config.window, ?config.input, "Configuration");

        let keyboard = KeyboardInput::new();
        let mouse = MouseInput::new();
        let input_collector = InputCollector::new(keyboard.clone(), mouse.clone());
        let frame_loop = FrameLoop::new(LoopSettings::from(&config), keyboard, mouse);
        let schedule = TickSchedule::new(frame_loop.settings().frame_interval);

        Self {
            config,
            shell: None,
            input_collector,
            frame_loop,
            schedule,
            title_relative: None,
            failed: false,
        }
    }

    /// Creates a new application with configuration loaded from environment
    pub fn from_env() -> Self {
        let config = AppConfig::load_from_env().unwrap_or_else(|e| {
            warn!(error = %e, "Failed to load config, using default configuration");
            AppConfig::default()
        });
        Self::new(config)
    }

    /// Process exit code once the event loop has returned
    pub fn exit_code(&self) -> i32 {
        if self.failed { 1 } else { 0 }
    }

    /// Reflects the mouse mode in the window title after a toggle
    fn sync_title(&mut self) {
        let relative = self.frame_loop.is_relative();
        if self.title_relative == Some(relative) {
            return;
        }
        // The configured title stays until the first toggle
        if self.title_relative.is_some()
            && let Some(shell) = &self.shell
        {
            shell.window.set_title(&format!("Relative: {relative}"));
        }
        self.title_relative = Some(relative);
    }
}

impl Default for App {
    fn default() -> Self {
        Self::from_env()
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.shell.is_some() {
            return;
        }

        let window_attributes = window_attributes_from_config(&self.config.window);
        let window = match event_loop.create_window(window_attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                error!(error = %e, "Failed to create window");
                self.failed = true;
                event_loop.exit();
                return;
            }
        };

        let size = window.inner_size();
        info!(
            window.width = size.width,
            window.height = size.height,
            "Window created successfully"
        );
        self.input_collector
            .set_scale_factor(window.scale_factor());

        // winit's event loop is synchronous, so wgpu setup gets its own runtime
        let renderer = tokio::runtime::Runtime::new()
            .map_err(anyhow::Error::from)
            .and_then(|rt| {
                rt.block_on(Renderer::new(window.clone(), self.config.window.vsync))
            });

        match renderer {
            Ok(renderer) => {
                info!("Renderer initialized successfully");
                self.shell = Some(Shell {
                    cursor: WindowCursor::new(window.clone()),
                    window,
                    renderer,
                });
                self.sync_title();
                event_loop.set_control_flow(ControlFlow::Poll);
            }
            Err(e) => {
                error!(error = %e, "Failed to initialize renderer");
                self.failed = true;
                event_loop.exit();
            }
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let Some(shell) = &mut self.shell else {
            return;
        };

        let now = Instant::now();
        if !self.schedule.is_due(now) {
            // Woken early by input; keep waiting for the deadline
            if let Some(deadline) = self.schedule.deadline() {
                event_loop.set_control_flow(ControlFlow::WaitUntil(deadline));
            }
            return;
        }

        match self.frame_loop.tick(&mut shell.renderer, &mut shell.cursor) {
            Ok(LoopState::Running) => {
                self.sync_title();
                // Let the OS have a little time
                let next = self.schedule.ticked(now);
                event_loop.set_control_flow(ControlFlow::WaitUntil(next));
            }
            Ok(_) => {
                self.frame_loop.finish();
                event_loop.exit();
            }
            Err(e) => {
                error!(error = %e, "Frame loop failed");
                self.failed = true;
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        // Feed events to the input sources first
        self.input_collector.handle_window_event(&event);

        match event {
            WindowEvent::CloseRequested => {
                info!("Close requested, exiting");
                self.frame_loop.request_exit();
                self.frame_loop.finish();
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                if let Some(shell) = &mut self.shell {
                    shell.renderer.resize(new_size);
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INTERVAL: Duration = Duration::from_millis(10);

    #[test]
    fn test_first_tick_is_due_immediately() {
        let schedule = TickSchedule::new(INTERVAL);
        assert!(schedule.is_due(Instant::now()));
        assert!(schedule.deadline().is_none());
    }

    #[test]
    fn test_early_wake_does_not_tick() {
        let mut schedule = TickSchedule::new(INTERVAL);
        let start = Instant::now();
        let next = schedule.ticked(start);
        assert_eq!(next, start + INTERVAL);

        // Mouse events wake the loop 1ms later
        assert!(!schedule.is_due(start + Duration::from_millis(1)));
        assert_eq!(schedule.deadline(), Some(next));

        assert!(schedule.is_due(start + INTERVAL));
        assert!(schedule.is_due(start + Duration::from_millis(25)));
    }

    #[test]
    fn test_ticks_are_spaced_from_when_they_ran() {
        let mut schedule = TickSchedule::new(INTERVAL);
        let start = Instant::now();
        schedule.ticked(start);

        // A late tick pushes the next deadline out
        let late = start + Duration::from_millis(30);
        assert!(schedule.is_due(late));
        schedule.ticked(late);
        assert!(!schedule.is_due(start + Duration::from_millis(35)));
        assert!(schedule.is_due(late + INTERVAL));
    }
}
