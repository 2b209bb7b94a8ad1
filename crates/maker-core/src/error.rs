//! Error types for scaffolding
//!
//! Composition itself cannot fail; everything here belongs to input parsing
//! and filesystem work around it.

use std::path::PathBuf;
use thiserror::Error;

/// Successful execution.
pub const EXIT_SUCCESS: i32 = 0;

/// Bad invocation or configuration: nothing was written.
pub const EXIT_USAGE: i32 = 1;

/// Filesystem failure while scaffolding.
pub const EXIT_SCAFFOLD_FAILURE: i32 = 2;

#[derive(Error, Debug)]
pub enum ScaffoldError {
    #[error("{0}")]
    Usage(String),

    #[error("unknown toggle '{0}'")]
    UnknownToggle(String),

    #[error("invalid project directory name: {0}")]
    InvalidDirectoryName(String),

    #[error("invalid Go version '{version}': {reason}")]
    InvalidToolchainVersion { version: String, reason: String },

    #[error("failed to read preset {}", path.display())]
    ReadPreset {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse preset {}", path.display())]
    ParsePreset {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("directory already exists: {}", .0.display())]
    DirectoryExists(PathBuf),

    #[error("failed to create directory {}", path.display())]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {}", path.display())]
    WriteFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ScaffoldError {
    /// Process exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            ScaffoldError::Usage(_)
            | ScaffoldError::UnknownToggle(_)
            | ScaffoldError::InvalidDirectoryName(_)
            | ScaffoldError::InvalidToolchainVersion { .. }
            | ScaffoldError::ReadPreset { .. }
            | ScaffoldError::ParsePreset { .. } => EXIT_USAGE,
            ScaffoldError::DirectoryExists(_)
            | ScaffoldError::CreateDirectory { .. }
            | ScaffoldError::WriteFile { .. } => EXIT_SCAFFOLD_FAILURE,
        }
    }
}
