//! Product configuration trait for CLI binaries
//!
//! The library never hardcodes the binary's identity or its defaults; the
//! binary supplies them through this trait.

use crate::toggles::{Toggle, ToggleSet};
use std::path::Path;

/// Configuration trait for a scaffolding CLI
///
/// Implementors define:
/// - Product identity (name, display name)
/// - The default Go toolchain version written to `go.mod`
/// - The environment variable overriding that default
/// - Post-setup instructions
pub trait ProductConfig: Clone + Send + Sync + 'static {
    /// Internal product name (used for CLI command, env vars)
    fn name(&self) -> &'static str;

    /// Human-readable display name
    fn display_name(&self) -> &'static str;

    /// CLI description shown in help text
    fn cli_description(&self) -> &'static str;

    /// Go version for the `go` directive when nothing else is specified
    fn default_toolchain_version(&self) -> &'static str;

    /// Environment variable name for overriding the toolchain version
    fn toolchain_version_env(&self) -> &'static str;

    /// Generate the "next steps" instructions after project creation
    fn next_steps(&self, dir: &Path, toggles: &ToggleSet) -> Vec<String> {
        let mut steps = Vec::new();
        let current = std::env::current_dir().ok();

        if current.as_deref() != Some(dir) {
            steps.push(format!("cd {}", dir.display()));
        }

        steps.push("make help".to_string());
        if toggles.is_on(Toggle::Test) {
            steps.push("make test".to_string());
        } else {
            steps.push("make build".to_string());
        }

        steps
    }
}
