//! Build metadata check

use crate::build_info;
use crate::health::check::{CheckResult, Findings, SystemCheck};

/// Reports the metadata embedded at compile time
#[derive(Default)]
pub struct BuildInfoCheck;

impl BuildInfoCheck {
    pub fn new() -> Self {
        Self
    }
}

impl SystemCheck for BuildInfoCheck {
    fn name(&self) -> &'static str {
        "Build Info"
    }

    fn description(&self) -> Option<&'static str> {
        Some("Shows git, rustc and target metadata")
    }

    fn check(&self) -> CheckResult {
        let mut findings = Findings::new();

        match build_info::GIT_SHA {
            Some(_) => findings.ok(format!(
                "Git: {}@{}",
                build_info::GIT_BRANCH.unwrap_or("detached"),
                build_info::git_sha_short()
            )),
            // Source tarballs have no git metadata
            None => findings.info("Git: not available"),
        }
        findings.info(format!("Built: {}", build_info::BUILD_TIMESTAMP));
        findings.info(format!(
            "Rustc: {} ({})",
            build_info::RUSTC_SEMVER,
            build_info::RUSTC_CHANNEL
        ));
        findings.info(format!("Version: {}", build_info::version_string()));

        findings.finish(
            "Build metadata accessible",
            "Build metadata incomplete",
            "Build metadata unavailable",
        )
    }
}
