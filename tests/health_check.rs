//! Integration tests for the startup diagnostics

use relmouse::health::{self, CheckStatus, HealthCheckRunner, SystemCheck, checks::*};

#[test]
fn test_all_health_checks() {
    let report = health::run_all_checks();

    if !report.is_healthy() {
        eprintln!("\n{}", health::format_report(&report));
    }

    assert!(
        report.is_healthy(),
        "Health checks failed: {} failures, {} warnings",
        report.failed,
        report.warned
    );
    assert_eq!(report.total, 5);
}

#[test]
fn test_config_check() {
    let result = ConfigCheck::new().check();
    assert!(result.status.is_ok(), "Config check failed: {}", result.message);
}

#[test]
fn test_config_check_accepts_unknown_profile() {
    // Missing profile files fall back to the built-in values
    let result = ConfigCheck::with_profiles(["no-such-profile"]).check();
    assert!(result.status.is_ok(), "Config check failed: {}", result.message);
}

#[test]
fn test_input_check() {
    let result = InputCheck::new().check();
    assert_eq!(
        result.status,
        CheckStatus::Pass,
        "Input check failed: {:?}",
        result.details
    );
}

#[test]
fn test_simulation_check() {
    let result = SimulationCheck::new().check();
    assert_eq!(
        result.status,
        CheckStatus::Pass,
        "Simulation check failed: {:?}",
        result.details
    );
}

#[test]
fn test_build_info_check() {
    let result = BuildInfoCheck::new().check();
    assert!(result.status.is_ok(), "Build info check failed: {}", result.message);
}

#[test]
fn test_system_info_check() {
    let result = SystemInfoCheck::new().check();
    assert!(result.status.is_ok(), "System info check failed: {}", result.message);
}

#[test]
fn test_report_lists_every_check() {
    let report = HealthCheckRunner::new()
        .add_check(InputCheck::new())
        .add_check(SimulationCheck::new())
        .run();

    assert_eq!(report.total, 2);
    assert_eq!(report.passed + report.warned + report.failed, report.total);

    let table = health::format_report(&report);
    assert!(table.contains("Input"));
    assert!(table.contains("Simulation"));
}
