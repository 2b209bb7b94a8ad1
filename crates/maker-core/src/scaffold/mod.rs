//! Project scaffolding around the composed Makefile
//!
//! This module provides:
//! - Target directory creation (fails when the directory already exists)
//! - Makefile and starter file writing
//! - Go toolchain version resolution for `go.mod`

pub mod starter;
pub mod version;

use crate::composer::{compose, ComposedRecipe};
use crate::error::ScaffoldError;
use crate::toggles::{Toggle, ToggleSet};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

pub use version::{check_compatibility, parse_toolchain_version, resolve_toolchain_version};

/// Everything needed to create one project
#[derive(Debug, Clone)]
pub struct ScaffoldRequest {
    /// Directory to create; must not exist yet
    pub directory: PathBuf,

    pub toggles: ToggleSet,

    /// Module path for `go.mod`; no `go.mod` is written when absent or blank
    pub module_path: Option<String>,

    /// Version for the `go` directive in `go.mod`
    pub go_version: String,
}

impl ScaffoldRequest {
    pub fn module_path(&self) -> Option<&str> {
        self.module_path
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty())
    }

    /// Final path component, used for the library stub
    fn dir_name(&self) -> Result<&str, ScaffoldError> {
        self.directory
            .file_name()
            .and_then(|n| n.to_str())
            .filter(|n| !n.is_empty())
            .ok_or_else(|| {
                ScaffoldError::InvalidDirectoryName(self.directory.display().to_string())
            })
    }

    /// Name of the starter source file for this request
    pub fn source_file_name(&self) -> Result<String, ScaffoldError> {
        if self.toggles.is_on(Toggle::Library) {
            Ok(format!("{}.go", self.dir_name()?))
        } else {
            Ok(starter::MAIN_SOURCE.to_string())
        }
    }

    /// Files `scaffold` will write, in write order
    pub fn planned_files(&self) -> Result<Vec<String>, ScaffoldError> {
        let mut files = vec![starter::MAKEFILE.to_string(), self.source_file_name()?];
        if self.module_path().is_some() {
            files.push(starter::GO_MOD.to_string());
        }
        files.push(starter::GITIGNORE.to_string());
        Ok(files)
    }
}

/// Outcome of a successful scaffold
#[derive(Debug, Clone)]
pub struct ScaffoldReport {
    pub directory: PathBuf,
    /// Written files relative to `directory`, in write order
    pub files: Vec<String>,
    pub recipe: ComposedRecipe,
}

/// Create the project directory and write the Makefile and starter files
///
/// Directory creation is the first side effect; if it fails nothing else is
/// attempted. Later write failures leave a partial scaffold behind.
pub async fn scaffold(request: &ScaffoldRequest) -> Result<ScaffoldReport, ScaffoldError> {
    let source_name = request.source_file_name()?;
    let source = if request.toggles.is_on(Toggle::Library) {
        starter::library_source(&starter::package_name(request.dir_name()?)?)
    } else {
        starter::main_source().to_string()
    };
    let recipe = compose(&request.toggles);

    create_project_dir(&request.directory).await?;

    let dir = request.directory.as_path();
    let mut files = Vec::new();

    write_file(dir, starter::MAKEFILE, recipe.as_str(), &mut files).await?;
    write_file(dir, &source_name, &source, &mut files).await?;
    if let Some(module_path) = request.module_path() {
        let go_mod = starter::go_mod(module_path, &request.go_version);
        write_file(dir, starter::GO_MOD, &go_mod, &mut files).await?;
    }
    write_file(dir, starter::GITIGNORE, &starter::gitignore(), &mut files).await?;

    Ok(ScaffoldReport {
        directory: request.directory.clone(),
        files,
        recipe,
    })
}

async fn create_project_dir(dir: &Path) -> Result<(), ScaffoldError> {
    fs::create_dir(dir).await.map_err(|e| match e.kind() {
        ErrorKind::AlreadyExists => ScaffoldError::DirectoryExists(dir.to_path_buf()),
        _ => ScaffoldError::CreateDirectory {
            path: dir.to_path_buf(),
            source: e,
        },
    })
}

async fn write_file(
    dir: &Path,
    name: &str,
    contents: &str,
    written: &mut Vec<String>,
) -> Result<(), ScaffoldError> {
    let path = dir.join(name);
    fs::write(&path, contents)
        .await
        .map_err(|source| ScaffoldError::WriteFile { path, source })?;
    written.push(name.to_string());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn request(root: &TempDir, name: &str, toggles: ToggleSet) -> ScaffoldRequest {
        ScaffoldRequest {
            directory: root.path().join(name),
            toggles,
            module_path: None,
            go_version: "1.14".to_string(),
        }
    }

    #[tokio::test]
    async fn test_executable_scaffold_writes_expected_files() {
        let root = TempDir::new().unwrap();
        let req = request(&root, "demo", ToggleSet::new().with(Toggle::Test));

        let report = scaffold(&req).await.unwrap();
        assert_eq!(report.files, vec!["Makefile", "main.go", ".gitignore"]);
        assert_eq!(report.files, req.planned_files().unwrap());

        let dir = root.path().join("demo");
        let makefile = std::fs::read_to_string(dir.join("Makefile")).unwrap();
        assert_eq!(makefile, report.recipe.as_str());
        assert!(makefile.contains("test: phony vet"));

        let main = std::fs::read_to_string(dir.join("main.go")).unwrap();
        assert_eq!(main, "package main\n\nfunc main() {\n}\n");

        let ignore = std::fs::read_to_string(dir.join(".gitignore")).unwrap();
        assert_eq!(ignore, "bin/\n");
        assert!(!dir.join("go.mod").exists());
    }

    #[tokio::test]
    async fn test_library_scaffold_writes_package_stub() {
        let root = TempDir::new().unwrap();
        let req = request(&root, "string-util", ToggleSet::new().with(Toggle::Library));

        let report = scaffold(&req).await.unwrap();
        assert_eq!(report.files[1], "string-util.go");
        assert!(report.recipe.contains_fragment("build-library"));

        let stub =
            std::fs::read_to_string(root.path().join("string-util").join("string-util.go")).unwrap();
        assert_eq!(stub, "package string_util\n");
        assert!(!root.path().join("string-util").join("main.go").exists());
    }

    #[tokio::test]
    async fn test_module_path_adds_go_mod() {
        let root = TempDir::new().unwrap();
        let mut req = request(&root, "svc", ToggleSet::new());
        req.module_path = Some("github.com/user/svc".to_string());
        req.go_version = "1.21".to_string();

        let report = scaffold(&req).await.unwrap();
        assert_eq!(report.files, vec!["Makefile", "main.go", "go.mod", ".gitignore"]);

        let go_mod = std::fs::read_to_string(root.path().join("svc").join("go.mod")).unwrap();
        assert_eq!(go_mod, "module github.com/user/svc\n\ngo 1.21\n");
    }

    #[tokio::test]
    async fn test_blank_module_path_is_ignored() {
        let root = TempDir::new().unwrap();
        let mut req = request(&root, "svc", ToggleSet::new());
        req.module_path = Some("   ".to_string());

        let report = scaffold(&req).await.unwrap();
        assert!(!report.files.contains(&"go.mod".to_string()));
    }

    #[tokio::test]
    async fn test_existing_directory_is_fatal_and_untouched() {
        let root = TempDir::new().unwrap();
        let dir = root.path().join("taken");
        std::fs::create_dir(&dir).unwrap();
        std::fs::write(dir.join("keep.txt"), "keep").unwrap();

        let err = scaffold(&request(&root, "taken", ToggleSet::new()))
            .await
            .unwrap_err();
        assert!(matches!(err, ScaffoldError::DirectoryExists(_)));
        assert!(!dir.join("Makefile").exists());
        assert_eq!(std::fs::read_to_string(dir.join("keep.txt")).unwrap(), "keep");
    }

    #[tokio::test]
    async fn test_missing_parent_is_a_create_error() {
        let root = TempDir::new().unwrap();
        let err = scaffold(&request(&root, "missing/child", ToggleSet::new()))
            .await
            .unwrap_err();
        assert!(matches!(err, ScaffoldError::CreateDirectory { .. }));
        assert!(!root.path().join("missing").exists());
    }

    #[tokio::test]
    async fn test_invalid_library_name_fails_before_creating_anything() {
        let root = TempDir::new().unwrap();
        let req = request(&root, "---", ToggleSet::new().with(Toggle::Library));

        let err = scaffold(&req).await.unwrap_err();
        assert!(matches!(err, ScaffoldError::InvalidDirectoryName(_)));
        assert!(!root.path().join("---").exists());
    }
}
