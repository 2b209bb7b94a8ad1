//! Maker Core - Makefile composition and project scaffolding for Go projects
//!
//! The heart of the library is the conditional Makefile composer: a static,
//! ordered catalog of recipe fragments, each gated by a predicate over a set
//! of boolean feature toggles, is filtered, resolved and normalized into one
//! deterministic Makefile.
//!
//! # Architecture
//!
//! - **Layer 1: Composition** - `toggles`, `catalog` and `composer`; pure, no I/O
//! - **Layer 2: Scaffolding** - `scaffold` creates the project directory and
//!   writes the Makefile plus starter files; `preset` and `product` feed it
//!   configuration; `runtime` checks the Go toolchain afterwards
//! - **Layer 3: CLI/TUI Interface** - Optional cliclack-based prompts (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based TUI prompts module
//!
//! # Example Usage (without TUI)
//!
//! ```
//! use maker_core::{compose, Toggle, ToggleSet};
//!
//! let toggles = ToggleSet::new().with(Toggle::Test).with(Toggle::Cover);
//! let recipe = compose(&toggles);
//! assert!(recipe.as_str().contains("test-cover: phony vet"));
//! ```

pub mod catalog;
pub mod composer;
pub mod error;
pub mod preset;
pub mod product;
pub mod runtime;
pub mod scaffold;
pub mod toggles;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use composer::{compose, normalize, ComposedRecipe};
pub use error::ScaffoldError;
pub use preset::Preset;
pub use product::ProductConfig;
pub use runtime::{check_toolchain, RuntimeInfo, ToolchainReport};
pub use scaffold::{scaffold, ScaffoldReport, ScaffoldRequest};
pub use toggles::{Toggle, ToggleSet};

#[cfg(feature = "tui")]
pub use tui::run;
