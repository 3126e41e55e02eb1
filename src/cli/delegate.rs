//! Delegation of project commands to the package manager
//!
//! `dev`, `build`, `preview`, `optimize-images` and `clean-images` all end
//! the same way: `<package-manager> run <script>` in the project root. On
//! Unix the wrapper process is replaced, so the tool owns the terminal and
//! receives Ctrl+C directly.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitCode};

use anyhow::{bail, Context, Result};

use super::output::Output;
use crate::project::{Config, Project};

/// Package-manager scripts the CLI can hand off to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Script {
    Dev,
    Build,
    Preview,
    OptimizeImages,
    CleanImages,
}

impl Script {
    /// Script name as declared in `package.json`
    pub fn name(&self) -> &'static str {
        match self {
            Script::Dev => "dev",
            Script::Build => "build",
            Script::Preview => "preview",
            Script::OptimizeImages => "optimize-images",
            Script::CleanImages => "clean-images",
        }
    }

    /// Whether the script serves the site and runs until interrupted
    pub fn is_server(&self) -> bool {
        matches!(self, Script::Dev | Script::Preview)
    }
}

/// A fully resolved package-manager invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    program: String,
    args: Vec<String>,
    dir: PathBuf,
}

impl Invocation {
    pub fn new(package_manager: &str, script: Script, dir: &Path) -> Self {
        Self {
            program: package_manager.to_string(),
            args: vec!["run".to_string(), script.name().to_string()],
            dir: dir.to_path_buf(),
        }
    }

    /// Human-readable command line
    pub fn display(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args).current_dir(&self.dir);
        cmd
    }

    /// Replaces the current process with the invocation
    ///
    /// Only returns if the program could not be started.
    #[cfg(unix)]
    pub fn exec(&self) -> Result<ExitCode> {
        use std::os::unix::process::CommandExt;

        // Anything still buffered would be lost with the old process image
        std::io::stdout().flush().ok();

        let err = self.command().exec();
        bail!("Failed to launch {}: {}", self.program, err);
    }

    /// Runs the invocation to completion and mirrors its exit code
    #[cfg(not(unix))]
    pub fn exec(&self) -> Result<ExitCode> {
        std::io::stdout().flush().ok();

        let status = self
            .command()
            .status()
            .with_context(|| format!("Failed to launch {}", self.program))?;

        Ok(match status.code() {
            Some(code) => ExitCode::from(u8::try_from(code).unwrap_or(1)),
            None => ExitCode::FAILURE,
        })
    }
}

/// Validates the current project and hands off to the package manager
pub fn run(output: &Output, config: &Config, script: Script) -> Result<ExitCode> {
    let project = Project::open_current()?;
    output.verbose_ctx(
        script.name(),
        &format!("Project root: {}", project.root().display()),
    );

    if script == Script::Preview {
        let built = project.require_build_output()?;
        output.verbose_ctx(script.name(), &format!("Build output: {}", built.display()));
    }

    check_script_declared(output, &project, script);
    announce(output, config, script);

    let invocation = Invocation::new(&config.package_manager, script, project.root());
    output.verbose_ctx(script.name(), &format!("Running: {}", invocation.display()));

    invocation
        .exec()
        .with_context(|| format!("Could not start '{}'", script.name()))
}

/// Warns when `package.json` lists scripts but not the one we are about to run
fn check_script_declared(output: &Output, project: &Project, script: Script) {
    match project.manifest() {
        Ok(manifest) => {
            if let Some(name) = &manifest.name {
                output.verbose_ctx(script.name(), &format!("Package: {}", name));
            }
            if !manifest.scripts.is_empty() && !manifest.has_script(script.name()) {
                output.warn(&format!(
                    "package.json does not declare a '{}' script",
                    script.name()
                ));
            }
        }
        Err(e) => output.verbose_ctx(script.name(), &format!("Skipping script check: {:#}", e)),
    }
}

fn announce(output: &Output, config: &Config, script: Script) {
    match script {
        Script::Dev => {
            output.status("🚀 Starting development server...");
            output.status(&format!(
                "Your site will be available at {}",
                config.server.dev_url
            ));
        }
        Script::Build => output.status("🏗️  Building site..."),
        Script::Preview => {
            output.status("👀 Starting preview server for built site...");
            output.status(&format!(
                "Your production site will be available at {}",
                config.server.preview_url
            ));
        }
        Script::OptimizeImages => output.status("🖼️  Optimizing images..."),
        Script::CleanImages => output.status("🧹 Cleaning generated images..."),
    }

    if script.is_server() {
        output.status("Press Ctrl+C to stop the server");
        output.blank();
    }
}
