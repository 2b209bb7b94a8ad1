//! Toolchain detection and tool management
//!
//! This module provides:
//! - Go toolchain detection and version comparison against `go.mod`
//! - Installation of the helper tools (`golint`, `shadow`) the Makefile calls

pub mod check;
pub mod tool;

pub use check::{check_go, check_toolchain, RuntimeInfo, ToolchainReport};
pub use tool::{required_tools, ToolManager};
