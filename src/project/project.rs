//! Project detection
//!
//! A microfolio project is a directory containing a `package.json`. Build
//! output lives in `dist/` or `build/` once the site has been built.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use thiserror::Error;

/// File whose presence marks a project root
pub const MARKER_FILE: &str = "package.json";

/// Conventional build output directories, in lookup order
pub const OUTPUT_DIRS: [&str; 2] = ["dist", "build"];

#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("Directory '{0}' already exists")]
    AlreadyExists(String),

    #[error("No microfolio project detected in this folder")]
    NotInProject,

    #[error("No built site found. Run 'microfolio build' first.")]
    NoBuildOutput,
}

impl ProjectError {
    /// Remediation shown under the error message
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            ProjectError::AlreadyExists(_) => None,
            ProjectError::NotInProject => {
                Some("Use 'microfolio new <name>' to create a new project")
            }
            ProjectError::NoBuildOutput => {
                Some("Quick start:\n  microfolio build\n  microfolio preview")
            }
        }
    }
}

/// The parts of `package.json` we care about
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub scripts: BTreeMap<String, String>,
}

impl Manifest {
    /// Returns true if the manifest declares the given script
    pub fn has_script(&self, script: &str) -> bool {
        self.scripts.contains_key(script)
    }
}

/// A microfolio project
#[derive(Debug)]
pub struct Project {
    root: PathBuf,
}

impl Project {
    /// Opens the project rooted at the given path
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, ProjectError> {
        let root = root.into();

        if !root.join(MARKER_FILE).is_file() {
            return Err(ProjectError::NotInProject);
        }

        Ok(Self { root })
    }

    /// Opens the project at the current directory
    ///
    /// Parent directories are not searched: commands always act on the
    /// directory they are run from.
    pub fn open_current() -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to read current directory")?;
        Ok(Self::open(cwd)?)
    }

    /// Returns the project root path
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the marker file path
    pub fn marker_path(&self) -> PathBuf {
        self.root.join(MARKER_FILE)
    }

    /// Returns the first build output directory that exists, if any
    pub fn build_output(&self) -> Option<PathBuf> {
        OUTPUT_DIRS
            .iter()
            .map(|name| self.root.join(name))
            .find(|path| path.is_dir())
    }

    /// Returns the build output directory, or an error if the site was never built
    pub fn require_build_output(&self) -> Result<PathBuf, ProjectError> {
        self.build_output().ok_or(ProjectError::NoBuildOutput)
    }

    /// Reads and parses `package.json`
    pub fn manifest(&self) -> Result<Manifest> {
        let path = self.marker_path();
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn project_dir(manifest: &str) -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(MARKER_FILE), manifest).unwrap();
        dir
    }

    #[test]
    fn open_existing_project() {
        let dir = project_dir("{}");

        let project = Project::open(dir.path()).unwrap();
        assert_eq!(project.root(), dir.path());
        assert!(project.marker_path().ends_with("package.json"));
    }

    #[test]
    fn open_non_project_fails() {
        let dir = TempDir::new().unwrap();
        let result = Project::open(dir.path());

        assert!(matches!(result, Err(ProjectError::NotInProject)));
    }

    #[test]
    fn marker_must_be_a_file() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join(MARKER_FILE)).unwrap();

        assert!(Project::open(dir.path()).is_err());
    }

    #[test]
    fn build_output_missing() {
        let dir = project_dir("{}");
        let project = Project::open(dir.path()).unwrap();

        assert!(project.build_output().is_none());
        assert!(matches!(
            project.require_build_output(),
            Err(ProjectError::NoBuildOutput)
        ));
    }

    #[test]
    fn build_output_prefers_dist() {
        let dir = project_dir("{}");
        fs::create_dir(dir.path().join("build")).unwrap();
        fs::create_dir(dir.path().join("dist")).unwrap();

        let project = Project::open(dir.path()).unwrap();
        assert_eq!(project.build_output(), Some(dir.path().join("dist")));
    }

    #[test]
    fn build_output_falls_back_to_build() {
        let dir = project_dir("{}");
        fs::create_dir(dir.path().join("build")).unwrap();

        let project = Project::open(dir.path()).unwrap();
        assert_eq!(project.build_output(), Some(dir.path().join("build")));
    }

    #[test]
    fn build_output_ignores_files() {
        let dir = project_dir("{}");
        fs::write(dir.path().join("dist"), "not a directory").unwrap();

        let project = Project::open(dir.path()).unwrap();
        assert!(project.build_output().is_none());
    }

    #[test]
    fn manifest_scripts() {
        let dir = project_dir(
            r#"{"name": "my-portfolio", "scripts": {"dev": "vite dev", "build": "vite build"}}"#,
        );
        let project = Project::open(dir.path()).unwrap();

        let manifest = project.manifest().unwrap();
        assert_eq!(manifest.name.as_deref(), Some("my-portfolio"));
        assert!(manifest.has_script("dev"));
        assert!(!manifest.has_script("optimize-images"));
    }

    #[test]
    fn manifest_invalid_json() {
        let dir = project_dir("not json");
        let project = Project::open(dir.path()).unwrap();

        assert!(project.manifest().is_err());
    }

    #[test]
    fn hints() {
        assert!(ProjectError::NotInProject.hint().unwrap().contains("microfolio new"));
        assert!(ProjectError::NoBuildOutput.hint().unwrap().contains("microfolio build"));
        assert!(ProjectError::AlreadyExists("x".into()).hint().is_none());
    }
}
