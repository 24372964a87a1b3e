//! Configuration loading check

use crate::app::AppConfig;
use crate::health::check::{CheckResult, Findings, SystemCheck};
use crate::sim::RECT_SIZE;

/// Loads every profile and sanity-checks the values
pub struct ConfigCheck {
    profiles: Vec<String>,
}

impl ConfigCheck {
    /// Checks the shipped profiles
    pub fn new() -> Self {
        Self::with_profiles(["debug", "release"])
    }

    pub fn with_profiles<I, S>(profiles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            profiles: profiles.into_iter().map(Into::into).collect(),
        }
    }

    fn inspect(config: &AppConfig, findings: &mut Findings) {
        let window = &config.window;
        let input = &config.input;
        let line = format!(
            "Profile '{}': {}x{}, frame interval {}ms, start relative {}",
            config.profile, window.width, window.height, input.frame_interval_ms, input.start_relative
        );

        if window.width < RECT_SIZE as u32 || window.height < RECT_SIZE as u32 {
            findings.warn(format!("{line} (surface smaller than the square)"));
        } else if input.frame_interval_ms == 0 {
            findings.warn(format!("{line} (loop will not yield to the OS)"));
        } else {
            findings.ok(line);
        }
    }
}

impl Default for ConfigCheck {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemCheck for ConfigCheck {
    fn name(&self) -> &'static str {
        "Configuration"
    }

    fn description(&self) -> Option<&'static str> {
        Some("Loads each profile from files and APP_ environment variables")
    }

    fn check(&self) -> CheckResult {
        let mut findings = Findings::new();

        for profile in &self.profiles {
            match AppConfig::load(profile) {
                Ok(config) => Self::inspect(&config, &mut findings),
                Err(e) => findings.fail(format!("Profile '{profile}': {e}")),
            }
        }

        match AppConfig::load_from_env() {
            Ok(config) => findings.ok(format!("Environment selects profile '{}'", config.profile)),
            Err(e) => findings.warn(format!("Environment config: {e}")),
        }

        let count = self.profiles.len();
        findings.finish(
            &format!("{count} profiles validated"),
            "Config loaded with warnings",
            "Failed to load one or more profiles",
        )
    }
}
