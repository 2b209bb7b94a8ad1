//! Fragment catalog: the ordered building blocks of a generated Makefile
//!
//! Each [`Fragment`] is gated by a [`Predicate`] over a [`ToggleSet`] and its
//! body is a list of [`Span`]s, some of which carry their own predicate. The
//! catalog is static data; nothing here mutates at runtime.

mod fragments;

use crate::toggles::{Toggle, ToggleSet};

pub use fragments::CATALOG;

/// Pure condition over a toggle set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Predicate {
    Always,
    On(Toggle),
    Off(Toggle),
    All(&'static [Predicate]),
}

impl Predicate {
    pub fn eval(&self, toggles: &ToggleSet) -> bool {
        match self {
            Predicate::Always => true,
            Predicate::On(t) => toggles.is_on(*t),
            Predicate::Off(t) => !toggles.is_on(*t),
            Predicate::All(preds) => preds.iter().all(|p| p.eval(toggles)),
        }
    }

    /// Toggles this predicate reads, in first-seen order
    pub fn referenced(&self) -> Vec<Toggle> {
        let mut out = Vec::new();
        self.collect_referenced(&mut out);
        out
    }

    fn collect_referenced(&self, out: &mut Vec<Toggle>) {
        match self {
            Predicate::Always => {}
            Predicate::On(t) | Predicate::Off(t) => {
                if !out.contains(t) {
                    out.push(*t);
                }
            }
            Predicate::All(preds) => {
                for p in preds.iter() {
                    p.collect_referenced(out);
                }
            }
        }
    }
}

/// A piece of fragment text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Span {
    /// Always emitted when the owning fragment is
    Text(&'static str),
    /// Emitted only when the predicate also holds
    When(Predicate, &'static str),
}

impl Span {
    /// Text this span contributes for the given toggles
    pub fn resolve(&self, toggles: &ToggleSet) -> &'static str {
        match self {
            Span::Text(text) => *text,
            Span::When(pred, text) if pred.eval(toggles) => *text,
            Span::When(..) => "",
        }
    }
}

/// One block of recipe text and the condition under which it appears
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fragment {
    /// Stable identifier, also the main make target of the block
    pub name: &'static str,
    pub when: Predicate,
    pub body: &'static [Span],
}

impl Fragment {
    pub fn is_mandatory(&self) -> bool {
        self.when == Predicate::Always
    }

    pub fn applies(&self, toggles: &ToggleSet) -> bool {
        self.when.eval(toggles)
    }
}

/// Catalog entries with their emission position
pub fn entries() -> impl Iterator<Item = (usize, &'static Fragment)> {
    CATALOG.iter().enumerate()
}

/// Look up a fragment by name
pub fn find(name: &str) -> Option<(usize, &'static Fragment)> {
    entries().find(|(_, f)| f.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compound_predicate_needs_every_toggle() {
        const BOTH: Predicate = Predicate::All(&[
            Predicate::On(Toggle::Test),
            Predicate::On(Toggle::CoverHtml),
        ]);
        let only_html = ToggleSet::new().with(Toggle::CoverHtml);
        let both = only_html.with(Toggle::Test);

        assert!(!BOTH.eval(&only_html));
        assert!(BOTH.eval(&both));
        assert_eq!(BOTH.referenced(), vec![Toggle::Test, Toggle::CoverHtml]);
    }

    #[test]
    fn test_off_inside_all() {
        const RACE_BINARY: Predicate = Predicate::All(&[
            Predicate::On(Toggle::Race),
            Predicate::Off(Toggle::Library),
        ]);
        assert!(!RACE_BINARY.eval(&ToggleSet::new()));
        assert!(RACE_BINARY.eval(&ToggleSet::new().with(Toggle::Race)));
        assert!(!RACE_BINARY.eval(&ToggleSet::all()));
    }

    #[test]
    fn test_gated_span_resolves_to_empty_when_off() {
        let span = Span::When(Predicate::On(Toggle::Bench), "-bench=. ");
        assert_eq!(span.resolve(&ToggleSet::new()), "");
        assert_eq!(span.resolve(&ToggleSet::new().with(Toggle::Bench)), "-bench=. ");
        assert_eq!(Span::Text("x").resolve(&ToggleSet::new()), "x");
    }

    #[test]
    fn test_fragment_names_are_unique() {
        let mut names: Vec<&str> = CATALOG.iter().map(|f| f.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), CATALOG.len());
    }

    #[test]
    fn test_every_body_ends_with_newline() {
        for fragment in CATALOG {
            let last = fragment.body.last().expect("fragment has a body");
            assert!(
                matches!(last, Span::Text(t) if t.ends_with('\n')),
                "{} must end with an unconditional newline",
                fragment.name
            );
        }
    }

    #[test]
    fn test_formatting_precedes_analysis() {
        let (fmt, _) = find("fmt").unwrap();
        let (lint, _) = find("lint").unwrap();
        let (vet, _) = find("vet").unwrap();
        let (help, _) = find("help").unwrap();
        assert!(fmt < lint && lint < vet);
        assert_eq!(help, CATALOG.len() - 1);
    }

    #[test]
    fn test_skeleton_is_mandatory() {
        let mandatory: Vec<&str> = CATALOG
            .iter()
            .filter(|f| f.is_mandatory())
            .map(|f| f.name)
            .collect();
        assert_eq!(mandatory, vec!["preamble", "fmt", "vet", "clean", "help"]);
    }

    #[test]
    fn test_build_variants_are_mutually_exclusive() {
        let (_, binary) = find("build-binary").unwrap();
        let (_, library) = find("build-library").unwrap();
        for toggles in [ToggleSet::new(), ToggleSet::all()] {
            assert_ne!(binary.applies(&toggles), library.applies(&toggles));
        }
    }

    #[test]
    fn test_every_toggle_is_referenced() {
        let mut seen = Vec::new();
        for fragment in CATALOG {
            seen.extend(fragment.when.referenced());
            for span in fragment.body {
                if let Span::When(pred, _) = span {
                    seen.extend(pred.referenced());
                }
            }
        }
        for toggle in Toggle::ALL {
            assert!(seen.contains(&toggle), "{} is never consulted", toggle);
        }
    }
}
