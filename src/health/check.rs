//! Check trait and result types

use std::time::Duration;

use colored::Colorize;

/// Outcome of a single check
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum CheckStatus {
    Pass,
    /// Usable, but something looks off
    Warn,
    Fail,
}

impl CheckStatus {
    /// Pass or Warn
    pub fn is_ok(&self) -> bool {
        !self.is_fail()
    }

    pub fn is_fail(&self) -> bool {
        matches!(self, CheckStatus::Fail)
    }

    pub fn label(&self) -> &'static str {
        match self {
            CheckStatus::Pass => "PASS",
            CheckStatus::Warn => "WARN",
            CheckStatus::Fail => "FAIL",
        }
    }

    /// Label colored for terminal output
    pub fn as_colored_str(&self) -> String {
        match self {
            CheckStatus::Pass => self.label().green().to_string(),
            CheckStatus::Warn => self.label().yellow().to_string(),
            CheckStatus::Fail => self.label().red().to_string(),
        }
    }
}

/// Result of a check
#[derive(Debug, Clone)]
pub struct CheckResult {
    pub status: CheckStatus,
    /// One-line summary
    pub message: String,
    /// Multi-line detail, printed below the table
    pub details: Option<String>,
    pub duration: Duration,
}

impl CheckResult {
    fn with_status(status: CheckStatus, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            details: None,
            duration: Duration::ZERO,
        }
    }

    pub fn pass(message: impl Into<String>) -> Self {
        Self::with_status(CheckStatus::Pass, message)
    }

    pub fn warn(message: impl Into<String>) -> Self {
        Self::with_status(CheckStatus::Warn, message)
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self::with_status(CheckStatus::Fail, message)
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }
}

/// Detail lines gathered by a check, each with its own status
///
/// The overall status is the worst line seen.
#[derive(Debug, Default)]
pub struct Findings {
    lines: Vec<String>,
    worst: Option<CheckStatus>,
}

impl Findings {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, status: CheckStatus, mark: &str, line: String) {
        self.lines.push(format!("  {mark} {line}"));
        self.worst = self.worst.max(Some(status));
    }

    pub fn ok(&mut self, line: impl Into<String>) {
        self.push(CheckStatus::Pass, "✓", line.into());
    }

    pub fn warn(&mut self, line: impl Into<String>) {
        self.push(CheckStatus::Warn, "⚠", line.into());
    }

    pub fn fail(&mut self, line: impl Into<String>) {
        self.push(CheckStatus::Fail, "✗", line.into());
    }

    /// Adds an informational line that does not affect the status
    pub fn info(&mut self, line: impl Into<String>) {
        self.lines.push(format!("    {}", line.into()));
    }

    /// Records `line` as passing when `cond` holds, failing otherwise
    pub fn require(&mut self, cond: bool, line: impl Into<String>) {
        if cond {
            self.ok(line);
        } else {
            self.fail(line);
        }
    }

    pub fn status(&self) -> CheckStatus {
        self.worst.unwrap_or(CheckStatus::Pass)
    }

    /// Builds the result, picking the message that matches the worst status
    pub fn finish(self, pass: &str, warn: &str, fail: &str) -> CheckResult {
        let result = match self.status() {
            CheckStatus::Pass => CheckResult::pass(pass),
            CheckStatus::Warn => CheckResult::warn(warn),
            CheckStatus::Fail => CheckResult::fail(fail),
        };
        result.with_details(self.lines.join("\n"))
    }
}

/// A startup diagnostic
pub trait SystemCheck {
    /// Name shown in the report
    fn name(&self) -> &'static str;

    fn check(&self) -> CheckResult;

    fn description(&self) -> Option<&'static str> {
        None
    }
}
