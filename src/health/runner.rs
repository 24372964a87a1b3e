//! Runs a suite of checks and tallies the results

use std::time::Instant;

use tracing::debug;

use super::check::{CheckResult, CheckStatus, SystemCheck};

/// Results of a check suite, in registration order
#[derive(Debug, Default)]
pub struct HealthCheckReport {
    pub results: Vec<(String, CheckResult)>,
    pub total: usize,
    pub passed: usize,
    pub warned: usize,
    pub failed: usize,
}

impl HealthCheckReport {
    fn record(&mut self, name: String, result: CheckResult) {
        match result.status {
            CheckStatus::Pass => self.passed += 1,
            CheckStatus::Warn => self.warned += 1,
            CheckStatus::Fail => self.failed += 1,
        }
        self.total += 1;
        self.results.push((name, result));
    }

    /// No check failed
    pub fn is_healthy(&self) -> bool {
        self.failed == 0
    }

    pub fn has_warnings(&self) -> bool {
        self.warned > 0
    }

    /// Process exit code: 0 all passed, 1 any failure, 2 warnings only
    pub fn exit_code(&self) -> i32 {
        match (self.failed, self.warned) {
            (0, 0) => 0,
            (0, _) => 2,
            _ => 1,
        }
    }

    /// Looks up a result by check name
    pub fn result(&self, name: &str) -> Option<&CheckResult> {
        self.results
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, result)| result)
    }
}

/// Collects checks and runs them in order
#[derive(Default)]
pub struct HealthCheckRunner {
    checks: Vec<Box<dyn SystemCheck>>,
}

impl HealthCheckRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_check<C: SystemCheck + 'static>(mut self, check: C) -> Self {
        self.checks.push(Box::new(check));
        self
    }

    /// Runs every check, timing each one
    pub fn run(self) -> HealthCheckReport {
        let mut report = HealthCheckReport::default();

        for check in self.checks {
            let start = Instant::now();
            let result = check.check().with_duration(start.elapsed());
            debug!(
                check = check.name(),
                status = result.status.label(),
                "Health check finished"
            );
            report.record(check.name().to_string(), result);
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(&'static str, CheckStatus);

    impl SystemCheck for Fixed {
        fn name(&self) -> &'static str {
            self.0
        }

        fn check(&self) -> CheckResult {
            match self.1 {
                CheckStatus::Pass => CheckResult::pass("ok"),
                CheckStatus::Warn => CheckResult::warn("meh"),
                CheckStatus::Fail => CheckResult::fail("bad"),
            }
        }
    }

    #[test]
    fn test_exit_codes() {
        let report = HealthCheckRunner::new()
            .add_check(Fixed("a", CheckStatus::Pass))
            .run();
        assert_eq!(report.exit_code(), 0);

        let report = HealthCheckRunner::new()
            .add_check(Fixed("a", CheckStatus::Pass))
            .add_check(Fixed("b", CheckStatus::Warn))
            .run();
        assert_eq!(report.exit_code(), 2);
        assert!(report.is_healthy());

        let report = HealthCheckRunner::new()
            .add_check(Fixed("a", CheckStatus::Warn))
            .add_check(Fixed("b", CheckStatus::Fail))
            .run();
        assert_eq!(report.exit_code(), 1);
        assert!(!report.is_healthy());
    }

    #[test]
    fn test_results_keep_registration_order() {
        let report = HealthCheckRunner::new()
            .add_check(Fixed("first", CheckStatus::Fail))
            .add_check(Fixed("second", CheckStatus::Pass))
            .run();

        let names: Vec<_> = report.results.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, ["first", "second"]);
        assert_eq!(report.total, 2);
        assert_eq!(report.result("first").map(|r| r.status), Some(CheckStatus::Fail));
        assert!(report.result("third").is_none());
    }
}
