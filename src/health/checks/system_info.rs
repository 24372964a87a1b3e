//! Host system check

use sysinfo::System;

use crate::health::check::{CheckResult, Findings, SystemCheck};

const BYTES_PER_GIB: f64 = 1_073_741_824.0;

/// Gathers OS, CPU and memory information
#[derive(Default)]
pub struct SystemInfoCheck;

impl SystemInfoCheck {
    pub fn new() -> Self {
        Self
    }
}

impl SystemCheck for SystemInfoCheck {
    fn name(&self) -> &'static str {
        "System Info"
    }

    fn description(&self) -> Option<&'static str> {
        Some("Reads OS, CPU and memory information")
    }

    fn check(&self) -> CheckResult {
        let mut sys = System::new();
        sys.refresh_cpu_all();
        sys.refresh_memory();

        let unknown = || "unknown".to_string();
        let mut findings = Findings::new();
        findings.info(format!(
            "OS: {} {} (kernel {})",
            System::name().unwrap_or_else(unknown),
            System::os_version().unwrap_or_else(unknown),
            System::kernel_version().unwrap_or_else(unknown)
        ));

        let logical = sys.cpus().len();
        if logical == 0 {
            findings.warn("CPU cores: not detected");
        } else {
            findings.ok(format!("CPU cores: {logical} logical"));
        }

        let memory = sys.total_memory() as f64 / BYTES_PER_GIB;
        if memory < 1.0 {
            findings.warn(format!("Memory: {memory:.1} GB total"));
        } else {
            findings.ok(format!("Memory: {memory:.1} GB total"));
        }

        if let Some(host) = System::host_name() {
            findings.info(format!("Hostname: {host}"));
        }

        findings.finish(
            "System info gathered",
            "System info incomplete",
            "System info unavailable",
        )
    }
}
