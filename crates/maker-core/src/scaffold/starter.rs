//! Starter files written next to the Makefile

use crate::error::ScaffoldError;

pub const MAKEFILE: &str = "Makefile";
pub const MAIN_SOURCE: &str = "main.go";
pub const GO_MOD: &str = "go.mod";
pub const GITIGNORE: &str = ".gitignore";

/// Build output directory, matches `BIN` in the Makefile preamble
pub const BUILD_OUTPUT_DIR: &str = "bin/";

/// Empty entry point for executables
pub fn main_source() -> &'static str {
    "package main\n\nfunc main() {\n}\n"
}

/// Package clause for a library stub
pub fn library_source(package: &str) -> String {
    format!("package {}\n", package)
}

pub fn go_mod(module_path: &str, go_version: &str) -> String {
    format!("module {}\n\ngo {}\n", module_path, go_version)
}

pub fn gitignore() -> String {
    format!("{}\n", BUILD_OUTPUT_DIR)
}

/// Turn a directory name into a Go package identifier
///
/// Lowercases, maps separators (`-`, `.`, spaces) to `_`, drops anything else
/// that is not ASCII alphanumeric and prefixes `pkg` when the result would
/// start with a digit.
pub fn package_name(dir_name: &str) -> Result<String, ScaffoldError> {
    let mut name: String = dir_name
        .chars()
        .filter_map(|c| match c {
            'a'..='z' | '0'..='9' | '_' => Some(c),
            'A'..='Z' => Some(c.to_ascii_lowercase()),
            '-' | '.' | ' ' => Some('_'),
            _ => None,
        })
        .collect();

    if name.trim_matches('_').is_empty() {
        return Err(ScaffoldError::InvalidDirectoryName(dir_name.to_string()));
    }

    if name.starts_with(|c: char| c.is_ascii_digit()) {
        name.insert_str(0, "pkg");
    }

    Ok(name)
}
