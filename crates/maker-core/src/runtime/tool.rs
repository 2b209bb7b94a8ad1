//! Go-installable helper tools referenced by the generated Makefile
//!
//! `golint` and `shadow` are not part of the Go distribution; the Makefile
//! calls them only when the matching toggle is on. This module checks for
//! them and installs them with `go install`.

use crate::toggles::{Toggle, ToggleSet};
use anyhow::{Context, Result};
use colored::Colorize;
use std::process::Stdio;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command as TokioCommand;
use tokio::time::timeout;

/// `go install` downloads modules, so allow more than a shell script would need
const INSTALL_TIMEOUT: Duration = Duration::from_secs(120);

/// Configuration for a Go tool
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolConfig {
    /// Name of the tool binary (e.g., "golint")
    pub name: &'static str,
    /// Display name for user-facing messages
    pub display_name: &'static str,
    /// Import path passed to `go install`
    pub package: &'static str,
    /// Toggle whose Makefile target invokes the tool
    pub toggle: Toggle,
}

/// Manager for checking and installing a Go tool
#[derive(Debug, Clone)]
pub struct ToolManager {
    config: ToolConfig,
}

impl ToolManager {
    pub fn new(config: ToolConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ToolConfig {
        &self.config
    }

    pub fn install_command(&self) -> String {
        format!("go install {}@latest", self.config.package)
    }

    /// Check if the tool is installed and available in PATH
    pub fn is_installed(&self) -> bool {
        std::process::Command::new("which")
            .arg(self.config.name)
            .output()
            .map(|output| output.status.success())
            .unwrap_or(false)
    }

    /// Install the tool with `go install`, streaming its output
    pub async fn install(&self) -> Result<()> {
        let cmd = self.install_command();
        println!();
        println!("{} {}", "Running:".dimmed(), cmd.yellow());
        println!();

        let mut child = TokioCommand::new("go")
            .arg("install")
            .arg(format!("{}@latest", self.config.package))
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .context("Failed to run go; is the Go toolchain installed?")?;

        let stdout = child.stdout.take().context("Failed to capture stdout")?;
        let stderr = child.stderr.take().context("Failed to capture stderr")?;

        let mut stdout_reader = BufReader::new(stdout).lines();
        let mut stderr_reader = BufReader::new(stderr).lines();

        let output_task = async {
            let mut stderr_open = true;
            loop {
                tokio::select! {
                    line = stdout_reader.next_line() => {
                        match line {
                            Ok(Some(line)) => println!("  {}", line),
                            Ok(None) => break,
                            Err(e) => {
                                eprintln!("{} {}", "Error reading stdout:".red(), e);
                                break;
                            }
                        }
                    }
                    line = stderr_reader.next_line(), if stderr_open => {
                        match line {
                            Ok(Some(line)) => eprintln!("  {}", line.yellow()),
                            Ok(None) => stderr_open = false,
                            Err(e) => {
                                eprintln!("{} {}", "Error reading stderr:".red(), e);
                                stderr_open = false;
                            }
                        }
                    }
                }
            }
        };

        if timeout(INSTALL_TIMEOUT, output_task).await.is_err() {
            let _ = child.kill().await;
            println!();
            anyhow::bail!(
                "Installation timed out after {} seconds.\n\
                 Please try again later or install manually:\n\
                 {}",
                INSTALL_TIMEOUT.as_secs(),
                cmd
            );
        }

        match timeout(Duration::from_secs(5), child.wait()).await {
            Ok(Ok(status)) => {
                println!();
                if status.success() {
                    Ok(())
                } else {
                    anyhow::bail!(
                        "Installation failed with exit code: {}\n\
                         Please try installing manually: {}",
                        status.code().unwrap_or(-1),
                        cmd
                    );
                }
            }
            Ok(Err(e)) => {
                anyhow::bail!("Failed to wait for go install: {}", e);
            }
            Err(_) => {
                let _ = child.kill().await;
                anyhow::bail!(
                    "Installation process hung. Please try installing manually:\n{}",
                    cmd
                );
            }
        }
    }
}

/// Pre-configured tool manager for golint
pub fn golint_tool() -> ToolManager {
    ToolManager::new(ToolConfig {
        name: "golint",
        display_name: "golint",
        package: "golang.org/x/lint/golint",
        toggle: Toggle::Lint,
    })
}

/// Pre-configured tool manager for the shadow analyzer
pub fn shadow_tool() -> ToolManager {
    ToolManager::new(ToolConfig {
        name: "shadow",
        display_name: "shadow",
        package: "golang.org/x/tools/go/analysis/passes/shadow/cmd/shadow",
        toggle: Toggle::Shadow,
    })
}

/// Tools the Makefile for these toggles will call
pub fn required_tools(toggles: &ToggleSet) -> Vec<ToolManager> {
    [golint_tool(), shadow_tool()]
        .into_iter()
        .filter(|tool| toggles.is_on(tool.config().toggle))
        .collect()
}
