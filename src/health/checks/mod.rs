//! Built-in checks

pub mod build_info;
pub mod config;
pub mod input;
pub mod simulation;
pub mod system_info;

pub use build_info::BuildInfoCheck;
pub use config::ConfigCheck;
pub use input::InputCheck;
pub use simulation::SimulationCheck;
pub use system_info::SystemInfoCheck;
