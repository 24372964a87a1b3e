//! Startup diagnostics
//!
//! `relmouse --check` runs these instead of opening a window. They confirm
//! that configuration loads, build metadata is present and the input and
//! simulation logic behave, without needing a display.
//!
//! # Example
//!
//! ```no_run
//! use relmouse::health::{HealthCheckRunner, checks::*};
//!
//! let report = HealthCheckRunner::new()
//!     .add_check(ConfigCheck::new())
//!     .add_check(InputCheck::new())
//!     .run();
//!
//! std::process::exit(report.exit_code());
//! ```

pub mod check;
pub mod checks;
pub mod reporter;
pub mod runner;

pub use check::{CheckResult, CheckStatus, Findings, SystemCheck};
pub use reporter::{format_report, print_report};
pub use runner::{HealthCheckReport, HealthCheckRunner};

/// Runs the default suite
pub fn run_all_checks() -> HealthCheckReport {
    HealthCheckRunner::new()
        .add_check(checks::ConfigCheck::new())
        .add_check(checks::BuildInfoCheck::new())
        .add_check(checks::SystemInfoCheck::new())
        .add_check(checks::InputCheck::new())
        .add_check(checks::SimulationCheck::new())
        .run()
}
