//! Go toolchain version handling for `go.mod` and tool checks

use crate::error::ScaffoldError;
use crate::product::ProductConfig;
use semver::Version;

/// Parse a Go version string (`1.14`, `1.21.3`, `go1.21.3`, `v1.22`)
///
/// Go omits the patch component, so missing components are padded with zero
/// before handing the string to semver.
pub fn parse_toolchain_version(version_str: &str) -> Result<Version, ScaffoldError> {
    let cleaned = strip_prefix(version_str);
    let invalid = |reason: String| ScaffoldError::InvalidToolchainVersion {
        version: version_str.to_string(),
        reason,
    };

    let parts = cleaned.split('.').count();
    let padded = match parts {
        1 => format!("{}.0.0", cleaned),
        2 => format!("{}.0", cleaned),
        3 => cleaned.to_string(),
        _ => return Err(invalid("expected at most three components".to_string())),
    };

    Version::parse(&padded).map_err(|e| invalid(e.to_string()))
}

/// Pick the toolchain version for `go.mod`: explicit value, then the
/// product's environment variable, then the product default.
///
/// Blank values count as unset. Returns the version as written to the `go`
/// directive (prefix stripped).
pub fn resolve_toolchain_version<C: ProductConfig>(
    config: &C,
    explicit: Option<&str>,
) -> Result<String, ScaffoldError> {
    let env_value = std::env::var(config.toolchain_version_env()).ok();
    choose_toolchain_version(
        explicit,
        env_value.as_deref(),
        config.default_toolchain_version(),
    )
}

fn choose_toolchain_version(
    explicit: Option<&str>,
    env_value: Option<&str>,
    default: &str,
) -> Result<String, ScaffoldError> {
    let is_set = |v: &&str| !v.trim().is_empty();
    let chosen = explicit
        .filter(is_set)
        .or(env_value.filter(is_set))
        .unwrap_or(default);

    parse_toolchain_version(chosen)?;
    Ok(strip_prefix(chosen).to_string())
}

/// Compare the installed Go against the `go` directive
/// Returns a warning message if the installed toolchain is older
pub fn check_compatibility(installed: &str, required: &str) -> Option<String> {
    let installed_ver = parse_toolchain_version(installed).ok()?;
    let required_ver = parse_toolchain_version(required).ok()?;

    if installed_ver < required_ver {
        Some(format!(
            "Installed Go {} is older than the go.mod directive ({}).\n\
             Builds may fail until the toolchain is upgraded.",
            strip_prefix(installed),
            strip_prefix(required)
        ))
    } else {
        None
    }
}

fn strip_prefix(version_str: &str) -> &str {
    let trimmed = version_str.trim();
    trimmed
        .strip_prefix("go")
        .or_else(|| trimmed.strip_prefix('v'))
        .unwrap_or(trimmed)
}
