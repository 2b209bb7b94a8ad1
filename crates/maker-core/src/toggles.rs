//! Feature toggles that drive Makefile composition

use crate::error::ScaffoldError;
use std::fmt;
use std::str::FromStr;

/// Every switch the fragment catalog knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Toggle {
    Test,
    Bench,
    Lint,
    Shadow,
    Cover,
    CoverHtml,
    Race,
    TestRace,
    CpuProfile,
    MemProfile,
    Library,
}

impl Toggle {
    /// All toggles, in flag/help order
    pub const ALL: [Toggle; 11] = [
        Toggle::Test,
        Toggle::Bench,
        Toggle::Lint,
        Toggle::Shadow,
        Toggle::Cover,
        Toggle::CoverHtml,
        Toggle::Race,
        Toggle::TestRace,
        Toggle::CpuProfile,
        Toggle::MemProfile,
        Toggle::Library,
    ];

    /// Canonical kebab-case name, identical to the CLI flag without dashes
    pub fn name(&self) -> &'static str {
        match self {
            Toggle::Test => "test",
            Toggle::Bench => "bench",
            Toggle::Lint => "lint",
            Toggle::Shadow => "shadow",
            Toggle::Cover => "cover",
            Toggle::CoverHtml => "cover-html",
            Toggle::Race => "race",
            Toggle::TestRace => "test-race",
            Toggle::CpuProfile => "cpu-profile",
            Toggle::MemProfile => "mem-profile",
            Toggle::Library => "library",
        }
    }

    /// Short description shown in prompts
    pub fn description(&self) -> &'static str {
        match self {
            Toggle::Test => "test target",
            Toggle::Bench => "benchmark target",
            Toggle::Lint => "golint step before vet",
            Toggle::Shadow => "shadowed variable check in vet",
            Toggle::Cover => "coverage target (needs test)",
            Toggle::CoverHtml => "HTML coverage report (needs test)",
            Toggle::Race => "race-checked build target",
            Toggle::TestRace => "race-checked test target",
            Toggle::CpuProfile => "CPU profiling target",
            Toggle::MemProfile => "memory profiling target",
            Toggle::Library => "library instead of executable",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Toggle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Toggle {
    type Err = ScaffoldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('_', "-");
        Toggle::ALL
            .into_iter()
            .find(|t| t.name() == normalized)
            .ok_or_else(|| ScaffoldError::UnknownToggle(s.to_string()))
    }
}

/// Boolean value for every toggle; anything not switched on is `false`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ToggleSet {
    enabled: [bool; Toggle::ALL.len()],
}

impl ToggleSet {
    /// All toggles off
    pub fn new() -> Self {
        Self::default()
    }

    /// All toggles on
    pub fn all() -> Self {
        Self {
            enabled: [true; Toggle::ALL.len()],
        }
    }

    /// Builder-style setter
    pub fn with(mut self, toggle: Toggle) -> Self {
        self.set(toggle, true);
        self
    }

    /// Builder-style unsetter
    pub fn without(mut self, toggle: Toggle) -> Self {
        self.set(toggle, false);
        self
    }

    pub fn set(&mut self, toggle: Toggle, value: bool) {
        self.enabled[toggle.index()] = value;
    }

    pub fn is_on(&self, toggle: Toggle) -> bool {
        self.enabled[toggle.index()]
    }

    /// Toggles that are switched on, in `Toggle::ALL` order
    pub fn enabled(&self) -> Vec<Toggle> {
        Toggle::ALL.into_iter().filter(|t| self.is_on(*t)).collect()
    }

    /// Switch on every toggle that is on in `other`
    pub fn union(mut self, other: &ToggleSet) -> Self {
        for toggle in other.enabled() {
            self.set(toggle, true);
        }
        self
    }

    /// Parse a list of toggle names, rejecting anything outside the closed set
    pub fn from_names<I, S>(names: I) -> Result<Self, ScaffoldError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::new();
        for name in names {
            set.set(name.as_ref().parse()?, true);
        }
        Ok(set)
    }
}

impl FromIterator<Toggle> for ToggleSet {
    fn from_iter<I: IntoIterator<Item = Toggle>>(iter: I) -> Self {
        let mut set = Self::new();
        for toggle in iter {
            set.set(toggle, true);
        }
        set
    }
}
