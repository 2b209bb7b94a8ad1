//! Toolchain detection for the generated project

use crate::runtime::tool::required_tools;
use crate::scaffold::version::check_compatibility;
use crate::toggles::ToggleSet;
use std::process::Command;

/// Tool detection result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeInfo {
    pub name: &'static str,
    pub version: Option<String>,
    pub available: bool,
}

/// Advisory findings; nothing here stops scaffolding
#[derive(Debug, Clone, Default)]
pub struct ToolchainReport {
    pub runtimes: Vec<RuntimeInfo>,
    pub warnings: Vec<String>,
}

impl ToolchainReport {
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// Check if the Go toolchain is available
pub fn check_go() -> RuntimeInfo {
    let output = Command::new("go").arg("version").output();

    match output {
        Ok(out) if out.status.success() => {
            let stdout = String::from_utf8_lossy(&out.stdout);
            RuntimeInfo {
                name: "Go",
                version: parse_go_version(&stdout),
                available: true,
            }
        }
        _ => RuntimeInfo {
            name: "Go",
            version: None,
            available: false,
        },
    }
}

/// Extract `go1.21.3` from `go version go1.21.3 linux/amd64`
pub fn parse_go_version(output: &str) -> Option<String> {
    output
        .split_whitespace()
        .find(|word| word.starts_with("go") && word[2..].starts_with(|c: char| c.is_ascii_digit()))
        .map(str::to_string)
}

/// Check Go and every helper tool the Makefile for `toggles` calls.
///
/// When `go_directive` is given, an installed Go older than it is reported.
pub fn check_toolchain(toggles: &ToggleSet, go_directive: Option<&str>) -> ToolchainReport {
    let mut report = ToolchainReport::default();

    let go = check_go();
    if !go.available {
        report
            .warnings
            .push("Go not found (install from https://go.dev/dl)".to_string());
    } else if let (Some(installed), Some(required)) = (go.version.as_deref(), go_directive) {
        if let Some(warning) = check_compatibility(installed, required) {
            report.warnings.push(warning);
        }
    }
    report.runtimes.push(go);

    for tool in required_tools(toggles) {
        let available = tool.is_installed();
        if !available {
            report.warnings.push(format!(
                "{} not found (install with: {})",
                tool.config().display_name,
                tool.install_command()
            ));
        }
        report.runtimes.push(RuntimeInfo {
            name: tool.config().name,
            version: None,
            available,
        });
    }

    report
}
