//! `microfolio new`: seed a project from the template repository

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{Context, Result};
use thiserror::Error;

use super::output::Output;
use super::usage::next_steps;
use crate::project::{Config, Git, ProjectError};

/// Scratch directory the template is cloned into, inside the new project
const TEMPLATE_CLONE_DIR: &str = ".microfolio-template";

#[derive(Debug, Error)]
pub enum ScaffoldError {
    #[error("Dependency installation with '{package_manager}' failed: {reason}")]
    InstallFailed {
        package_manager: String,
        project: PathBuf,
        reason: String,
    },
}

impl ScaffoldError {
    pub fn hint(&self) -> Option<String> {
        match self {
            ScaffoldError::InstallFailed {
                package_manager,
                project,
                ..
            } => Some(format!(
                "Retry the installation manually:\n  cd {}\n  {} install",
                project.display(),
                package_manager
            )),
        }
    }
}

/// Options for `microfolio new`
#[derive(Debug, Clone)]
pub struct ScaffoldOptions {
    /// Install dependencies once the template is in place
    pub install: bool,
}

impl Default for ScaffoldOptions {
    fn default() -> Self {
        Self { install: true }
    }
}

/// Creates `./<name>` from the template
///
/// The directory must not exist yet. Once it has been created, any failure
/// leaves it in place for inspection.
pub fn new_project(
    output: &Output,
    config: &Config,
    name: &str,
    options: &ScaffoldOptions,
) -> Result<PathBuf> {
    let target = PathBuf::from(name);
    if target.is_dir() {
        return Err(ProjectError::AlreadyExists(name.to_string()).into());
    }

    let git = Git::new(&config.git);
    git.check_available()?;

    output.status(&format!("📁 Creating project '{}'...", name));
    fs::create_dir(&target).with_context(|| format!("Failed to create directory '{}'", name))?;

    populate(output, config, &git, &target, options).with_context(|| {
        format!(
            "Project '{}' is incomplete (the directory was left in place)",
            name
        )
    })?;

    output.status(&format!("✅ Project '{}' created successfully!", name));
    output.blank();
    output.status(&next_steps(name));
    Ok(target)
}

fn populate(
    output: &Output,
    config: &Config,
    git: &Git,
    target: &Path,
    options: &ScaffoldOptions,
) -> Result<()> {
    let clone_dir = target.join(TEMPLATE_CLONE_DIR);
    output.verbose_ctx(
        "new",
        &format!(
            "Cloning {} into {}",
            config.template.repository,
            clone_dir.display()
        ),
    );
    git.clone_shallow(&config.template.repository, &clone_dir)?;

    let moved = adopt_template(&clone_dir, target)?;
    output.verbose_ctx("new", &format!("Copied {} template entries", moved));

    output.verbose_ctx("new", "Initializing git repository");
    git.init(target)?;
    git.add_all(target)?;
    git.commit(target, &config.template.commit_message)?;

    if options.install {
        install_dependencies(output, &config.package_manager, target)?;
    } else {
        output.verbose_ctx("new", "Skipping dependency installation");
    }

    Ok(())
}

/// Moves the cloned template's contents (minus `.git`) into `target` and
/// removes the clone. Returns the number of entries moved.
fn adopt_template(clone_dir: &Path, target: &Path) -> Result<usize> {
    let mut moved = 0;

    for entry in fs::read_dir(clone_dir)
        .with_context(|| format!("Failed to read template: {}", clone_dir.display()))?
    {
        let entry = entry?;
        if entry.file_name() == ".git" {
            continue;
        }

        let from = entry.path();
        let to = target.join(entry.file_name());
        if fs::rename(&from, &to).is_err() {
            if entry.file_type()?.is_dir() {
                copy_dir_all(&from, &to)?;
            } else {
                fs::copy(&from, &to).with_context(|| {
                    format!("Failed to copy {} -> {}", from.display(), to.display())
                })?;
            }
        }
        moved += 1;
    }

    fs::remove_dir_all(clone_dir)
        .with_context(|| format!("Failed to remove {}", clone_dir.display()))?;

    Ok(moved)
}

/// Recursively copies a directory
fn copy_dir_all(from: &Path, to: &Path) -> Result<()> {
    fs::create_dir_all(to).with_context(|| format!("Failed to create {}", to.display()))?;

    for entry in fs::read_dir(from)? {
        let entry = entry?;
        let fpath = entry.path();
        let tpath = to.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            copy_dir_all(&fpath, &tpath)?;
        } else {
            fs::copy(&fpath, &tpath).with_context(|| {
                format!("Failed to copy {} -> {}", fpath.display(), tpath.display())
            })?;
        }
    }
    Ok(())
}

fn install_dependencies(output: &Output, package_manager: &str, target: &Path) -> Result<()> {
    output.status("📦 Installing dependencies...");

    let failed = |reason: String| ScaffoldError::InstallFailed {
        package_manager: package_manager.to_string(),
        project: target.to_path_buf(),
        reason,
    };

    let status = Command::new(package_manager)
        .arg("install")
        .current_dir(target)
        .status()
        .map_err(|e| failed(e.to_string()))?;

    if !status.success() {
        return Err(failed(status.to_string()).into());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn adopt_template_skips_git_and_keeps_hidden_files() {
        let dir = TempDir::new().unwrap();
        let clone = dir.path().join(TEMPLATE_CLONE_DIR);
        fs::create_dir_all(clone.join(".git/objects")).unwrap();
        fs::create_dir_all(clone.join("content/projects")).unwrap();
        fs::write(clone.join("package.json"), "{}").unwrap();
        fs::write(clone.join(".gitignore"), "node_modules\n").unwrap();
        fs::write(clone.join("content/projects/one.md"), "# One").unwrap();

        let moved = adopt_template(&clone, dir.path()).unwrap();

        assert_eq!(moved, 3);
        assert!(dir.path().join("package.json").is_file());
        assert!(dir.path().join(".gitignore").is_file());
        assert!(dir.path().join("content/projects/one.md").is_file());
        assert!(!dir.path().join(".git").exists());
        assert!(!clone.exists());
    }

    #[test]
    fn copy_dir_all_copies_nested_files() {
        let dir = TempDir::new().unwrap();
        let from = dir.path().join("from");
        fs::create_dir_all(from.join("a/b")).unwrap();
        fs::write(from.join("a/b/c.txt"), "c").unwrap();
        fs::write(from.join("top.txt"), "top").unwrap();

        let to = dir.path().join("to");
        copy_dir_all(&from, &to).unwrap();

        assert_eq!(fs::read_to_string(to.join("a/b/c.txt")).unwrap(), "c");
        assert_eq!(fs::read_to_string(to.join("top.txt")).unwrap(), "top");
    }

    #[test]
    fn install_failure_carries_hint() {
        let dir = TempDir::new().unwrap();
        let output = Output::default();

        let err = install_dependencies(&output, "definitely-not-a-package-manager", dir.path())
            .unwrap_err();
        let scaffold_err = err.downcast_ref::<ScaffoldError>().unwrap();

        let hint = scaffold_err.hint().unwrap();
        assert!(hint.contains("definitely-not-a-package-manager install"));
        assert!(hint.contains(&dir.path().display().to_string()));
    }

    #[test]
    fn existing_directory_is_rejected() {
        let dir = TempDir::new().unwrap();
        let existing = dir.path().join("taken");
        fs::create_dir(&existing).unwrap();
        fs::write(existing.join("keep.txt"), "keep").unwrap();

        let err = new_project(
            &Output::default(),
            &Config::default(),
            &existing.display().to_string(),
            &ScaffoldOptions::default(),
        )
        .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<ProjectError>(),
            Some(ProjectError::AlreadyExists(_))
        ));
        assert_eq!(fs::read_to_string(existing.join("keep.txt")).unwrap(), "keep");
    }

    #[test]
    fn missing_git_does_not_create_directory() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("fresh");
        let config = Config {
            git: "definitely-not-a-git-binary".into(),
            ..Config::default()
        };

        let result = new_project(
            &Output::default(),
            &config,
            &target.display().to_string(),
            &ScaffoldOptions::default(),
        );

        assert!(result.is_err());
        assert!(!target.exists());
    }
}
