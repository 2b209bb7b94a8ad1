//! Preset files: reusable toggle selections stored as YAML
//!
//! ```yaml
//! toggles: [test, bench, cover]
//! module: github.com/user/project
//! go_version: "1.21"
//! ```

use crate::error::ScaffoldError;
use crate::toggles::ToggleSet;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Preset {
    /// Names of the toggles switched on by this preset
    #[serde(default)]
    pub toggles: Vec<String>,

    /// Module path for `go.mod`
    #[serde(default)]
    pub module: Option<String>,

    /// Version for the `go` directive
    #[serde(default)]
    pub go_version: Option<String>,
}

impl Preset {
    /// Parse a preset, rejecting toggle names outside the known set
    pub fn from_yaml(content: &str, path: &Path) -> Result<Self, ScaffoldError> {
        let preset: Self =
            serde_yaml::from_str(content).map_err(|source| ScaffoldError::ParsePreset {
                path: path.to_path_buf(),
                source,
            })?;
        preset.toggle_set()?;
        Ok(preset)
    }

    pub fn load(path: &Path) -> Result<Self, ScaffoldError> {
        let content = std::fs::read_to_string(path).map_err(|source| ScaffoldError::ReadPreset {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&content, path)
    }

    pub fn toggle_set(&self) -> Result<ToggleSet, ScaffoldError> {
        ToggleSet::from_names(&self.toggles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::toggles::Toggle;

    #[test]
    fn test_parse_full_preset() {
        let preset = Preset::from_yaml(
            "toggles: [test, cover-html, library]\nmodule: github.com/u/p\ngo_version: \"1.21\"\n",
            Path::new("p.yaml"),
        )
        .unwrap();

        let set = preset.toggle_set().unwrap();
        assert!(set.is_on(Toggle::Test));
        assert!(set.is_on(Toggle::CoverHtml));
        assert!(set.is_on(Toggle::Library));
        assert!(!set.is_on(Toggle::Bench));
        assert_eq!(preset.module.as_deref(), Some("github.com/u/p"));
        assert_eq!(preset.go_version.as_deref(), Some("1.21"));
    }

    #[test]
    fn test_empty_document_fields_default() {
        let preset = Preset::from_yaml("{}", Path::new("p.yaml")).unwrap();
        assert_eq!(preset, Preset::default());
        assert_eq!(preset.toggle_set().unwrap(), ToggleSet::new());
    }

    #[test]
    fn test_unknown_toggle_is_rejected() {
        let err = Preset::from_yaml("toggles: [test, coverage]\n", Path::new("p.yaml")).unwrap_err();
        assert!(matches!(err, ScaffoldError::UnknownToggle(ref name) if name == "coverage"));
    }

    #[test]
    fn test_toggle_names_accept_underscores() {
        let preset = Preset::from_yaml("toggles: [cpu_profile, test-race]\n", Path::new("p.yaml"))
            .unwrap();
        assert_eq!(
            preset.toggle_set().unwrap().enabled(),
            vec![Toggle::TestRace, Toggle::CpuProfile]
        );
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let err = Preset::from_yaml("tests: true\n", Path::new("p.yaml")).unwrap_err();
        assert!(matches!(err, ScaffoldError::ParsePreset { .. }));
    }

    #[test]
    fn test_load_missing_file() {
        let err = Preset::load(Path::new("/nonexistent/maker-preset.yaml")).unwrap_err();
        assert!(matches!(err, ScaffoldError::ReadPreset { .. }));
    }

    #[test]
    fn test_load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preset.yaml");
        std::fs::write(&path, "toggles: [bench]\n").unwrap();
        let preset = Preset::load(&path).unwrap();
        assert_eq!(preset.toggle_set().unwrap().enabled(), vec![Toggle::Bench]);
    }
}
