//! Thin wrapper around the `git` executable
//!
//! Only the handful of operations needed to seed a project from the
//! template: clone, init, add, commit.

use std::ffi::OsStr;
use std::path::Path;
use std::process::{Command, Output};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GitError {
    #[error("'{0}' is not installed or not on PATH")]
    NotFound(String),

    #[error("git {command} failed: {stderr}")]
    Failed { command: String, stderr: String },

    #[error("Failed to run git {command}: {source}")]
    Io {
        command: String,
        #[source]
        source: std::io::Error,
    },
}

/// Identity used for the initial commit when git has none configured
const FALLBACK_IDENTITY: [&str; 4] = [
    "-c",
    "user.name=microfolio",
    "-c",
    "user.email=microfolio@localhost",
];

/// Runs git commands with a configurable executable
#[derive(Debug, Clone)]
pub struct Git {
    program: String,
}

impl Git {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Checks that the executable can be run
    pub fn check_available(&self) -> Result<(), GitError> {
        let output = Command::new(&self.program)
            .arg("--version")
            .output()
            .map_err(|_| GitError::NotFound(self.program.clone()))?;

        if !output.status.success() {
            return Err(GitError::NotFound(self.program.clone()));
        }

        Ok(())
    }

    /// Shallow-clones `source` into `dest`
    pub fn clone_shallow(&self, source: &str, dest: &Path) -> Result<(), GitError> {
        let mut cmd = Command::new(&self.program);
        cmd.args(["clone", "--quiet", "--depth", "1", source])
            .arg(dest);
        self.run("clone", cmd).map(|_| ())
    }

    /// Initializes a fresh repository in `dir`
    pub fn init(&self, dir: &Path) -> Result<(), GitError> {
        self.run_in(dir, "init", ["init", "--quiet"])
    }

    /// Stages everything in `dir`
    pub fn add_all(&self, dir: &Path) -> Result<(), GitError> {
        self.run_in(dir, "add", ["add", "."])
    }

    /// Creates a commit in `dir`
    ///
    /// Falls back to a placeholder author when `user.name` or `user.email`
    /// is not configured. `GIT_AUTHOR_*` / `GIT_COMMITTER_*`
    /// variables still take precedence.
    pub fn commit(&self, dir: &Path, message: &str) -> Result<(), GitError> {
        let mut args: Vec<&str> = Vec::new();
        if !self.has_identity(dir) {
            args.extend(FALLBACK_IDENTITY);
        }
        args.extend(["commit", "--quiet", "-m", message]);
        self.run_in(dir, "commit", args)
    }

    /// Returns true if both `user.name` and `user.email` are configured for `dir`
    pub fn has_identity(&self, dir: &Path) -> bool {
        ["user.name", "user.email"].into_iter().all(|key| {
            Command::new(&self.program)
                .args(["config", "--get", key])
                .current_dir(dir)
                .output()
                .map(|o| o.status.success())
                .unwrap_or(false)
        })
    }

    fn run_in<I, S>(&self, dir: &Path, name: &str, args: I) -> Result<(), GitError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let mut cmd = Command::new(&self.program);
        cmd.args(args).current_dir(dir);
        self.run(name, cmd).map(|_| ())
    }

    fn run(&self, name: &str, mut cmd: Command) -> Result<Output, GitError> {
        let output = cmd.output().map_err(|source| GitError::Io {
            command: name.to_string(),
            source,
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(GitError::Failed {
                command: name.to_string(),
                stderr,
            });
        }

        Ok(output)
    }
}

impl Default for Git {
    fn default() -> Self {
        Self::new("git")
    }
}
