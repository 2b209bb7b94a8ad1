//! Makefile composition
//!
//! Walks the fragment catalog in order, keeps the fragments whose predicate
//! holds, resolves their inline spans and normalizes blank lines so the
//! output is byte-stable for any toggle combination.

use crate::catalog::{self, Fragment};
use crate::toggles::ToggleSet;
use std::fmt;

/// The final Makefile text plus the names of the fragments it was built from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposedRecipe {
    text: String,
    fragments: Vec<&'static str>,
}

impl ComposedRecipe {
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Names of emitted fragments, in emission order
    pub fn fragments(&self) -> &[&'static str] {
        &self.fragments
    }

    pub fn contains_fragment(&self, name: &str) -> bool {
        self.fragments.iter().any(|f| *f == name)
    }

    pub fn into_string(self) -> String {
        self.text
    }
}

impl fmt::Display for ComposedRecipe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl AsRef<str> for ComposedRecipe {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

/// Compose the Makefile for a toggle set
pub fn compose(toggles: &ToggleSet) -> ComposedRecipe {
    compose_from(catalog::CATALOG, toggles)
}

/// Compose from an arbitrary fragment list; `compose` uses the built-in catalog
pub fn compose_from(fragments: &[Fragment], toggles: &ToggleSet) -> ComposedRecipe {
    let mut buffer = String::new();
    let mut emitted = Vec::new();

    for fragment in fragments.iter().filter(|f| f.applies(toggles)) {
        for span in fragment.body {
            buffer.push_str(span.resolve(toggles));
        }
        if !buffer.ends_with('\n') {
            buffer.push('\n');
        }
        // Blank separator; runs are collapsed below
        buffer.push('\n');
        emitted.push(fragment.name);
    }

    ComposedRecipe {
        text: normalize(&buffer),
        fragments: emitted,
    }
}

/// Collapse runs of blank lines to one, drop leading/trailing blank lines
/// and terminate with a single newline.
///
/// Whitespace-only lines count as blank and are emitted empty. Idempotent.
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_blank = false;

    for line in text.lines() {
        if line.trim().is_empty() {
            pending_blank = !out.is_empty();
            continue;
        }
        if pending_blank {
            out.push('\n');
            pending_blank = false;
        }
        out.push_str(line);
        out.push('\n');
    }

    out
}
