//! Frame-synchronous mouse and keyboard input
//!
//! A small real-time loop built with winit and wgpu: keyboard and mouse
//! notifications are buffered and snapshotted once per frame, and a square
//! follows relative mouse motion around a wrapping surface.

/// Application - windowing, input, frame loop and rendering
pub mod app;

/// Build-time information (git SHA, branch, timestamp, etc.)
pub mod build_info;

/// Startup diagnostics
pub mod health;

/// Simulation - the wrapping rectangle
pub mod sim;
