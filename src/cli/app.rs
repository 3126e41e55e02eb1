//! Main CLI application structure

use std::ffi::OsString;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::error::ErrorKind;
use clap::{Parser, Subcommand};
use thiserror::Error;

use super::delegate::{self, Script};
use super::output::Output;
use super::scaffold::{self, ScaffoldOptions};
use super::usage::{NEW_USAGE, USAGE};
use crate::project::Config;

/// Every word recognized as a command
pub const COMMAND_WORDS: [&str; 7] = [
    "new",
    "dev",
    "build",
    "preview",
    "optimize-images",
    "clean-images",
    "help",
];

#[derive(Parser, Debug)]
#[command(name = "microfolio")]
#[command(version, about = "Static portfolio generator for creatives")]
#[command(disable_help_flag = true, disable_help_subcommand = true)]
pub struct Cli {
    /// Show usage
    #[arg(long, short = 'h')]
    pub help: bool,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Config file to use instead of the global one
    #[arg(long, global = true, env = "MICROFOLIO_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Package manager used to install dependencies and run scripts
    #[arg(long, global = true, env = "MICROFOLIO_PACKAGE_MANAGER", value_name = "PM")]
    pub package_manager: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Create a new portfolio
    New {
        /// Name of the project directory to create
        name: Option<String>,

        /// Git URL or local path of the template to clone
        #[arg(long, env = "MICROFOLIO_TEMPLATE", value_name = "URL|PATH")]
        template: Option<String>,

        /// Skip dependency installation
        #[arg(long)]
        no_install: bool,
    },

    /// Start development server
    Dev,

    /// Build site for production
    Build,

    /// Preview built site locally
    Preview,

    /// Optimize project images
    OptimizeImages,

    /// Remove generated images
    CleanImages,

    /// Show usage
    Help {
        /// Ignored
        #[arg(trailing_var_arg = true, allow_hyphen_values = true, hide = true)]
        rest: Vec<String>,
    },

    /// Anything else
    #[command(external_subcommand)]
    Unknown(Vec<String>),
}

#[derive(Debug, Error)]
pub enum UsageError {
    #[error("Please specify a project name")]
    MissingProjectName,
}

impl UsageError {
    /// Usage line shown under the error message
    pub fn usage_line(&self) -> String {
        match self {
            UsageError::MissingProjectName => NEW_USAGE.to_string(),
        }
    }
}

/// Main entry point for the CLI
pub fn run() -> Result<ExitCode> {
    run_from(std::env::args_os())
}

/// Runs the CLI against an explicit argument list (`args[0]` is the program name)
pub fn run_from<I, T>(args: I) -> Result<ExitCode>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let args: Vec<OsString> = args.into_iter().map(Into::into).collect();

    // `microfolio ""` behaves like no argument at all
    if args.get(1).is_some_and(|arg| arg.is_empty()) {
        return Ok(show_help());
    }

    let cli = match Cli::try_parse_from(&args) {
        Ok(cli) => cli,
        Err(err) => return handle_parse_error(err, &args),
    };
    let output = Output::new(cli.verbose);

    output.verbose("microfolio starting");

    let command = match cli.command {
        _ if cli.help => Commands::Help { rest: Vec::new() },
        None => Commands::Help { rest: Vec::new() },
        Some(command) => command,
    };

    let code = match command {
        Commands::Help { .. } => show_help(),

        Commands::Unknown(words) => {
            let input = words.first().map(String::as_str).unwrap_or_default();
            unknown_command(input)
        }

        Commands::New {
            name,
            template,
            no_install,
        } => {
            let name = name
                .filter(|n| !n.trim().is_empty())
                .ok_or(UsageError::MissingProjectName)?;
            let config = load_config(&output, &cli.config, cli.package_manager, template)?;
            let options = ScaffoldOptions {
                install: config.template.install && !no_install,
            };

            output.verbose_ctx(
                "new",
                &format!("Creating '{}', install={}", name, options.install),
            );
            scaffold::new_project(&output, &config, &name, &options)?;
            ExitCode::SUCCESS
        }

        Commands::Dev => delegate_to(&output, &cli.config, cli.package_manager, Script::Dev)?,
        Commands::Build => delegate_to(&output, &cli.config, cli.package_manager, Script::Build)?,
        Commands::Preview => {
            delegate_to(&output, &cli.config, cli.package_manager, Script::Preview)?
        }
        Commands::OptimizeImages => delegate_to(
            &output,
            &cli.config,
            cli.package_manager,
            Script::OptimizeImages,
        )?,
        Commands::CleanImages => delegate_to(
            &output,
            &cli.config,
            cli.package_manager,
            Script::CleanImages,
        )?,
    };

    output.verbose("Command completed");
    Ok(code)
}

fn delegate_to(
    output: &Output,
    config_path: &Option<PathBuf>,
    package_manager: Option<String>,
    script: Script,
) -> Result<ExitCode> {
    let config = load_config(output, config_path, package_manager, None)?;
    delegate::run(output, &config, script)
}

fn load_config(
    output: &Output,
    path: &Option<PathBuf>,
    package_manager: Option<String>,
    template: Option<String>,
) -> Result<Config> {
    let (config, source) = Config::load(path.as_deref())?;
    output.verbose_ctx("config", &format!("Loaded from {}", source));

    let config = config.with_overrides(package_manager, template)?;
    output.verbose_ctx(
        "config",
        &format!(
            "package_manager={}, template={}",
            config.package_manager, config.template.repository
        ),
    );
    Ok(config)
}

fn show_help() -> ExitCode {
    print!("{}", USAGE);
    ExitCode::SUCCESS
}

fn unknown_command(input: &str) -> ExitCode {
    eprintln!("Unknown command: {}", input);
    println!();
    print!("{}", USAGE);
    ExitCode::FAILURE
}

/// Global options that may precede the command word
fn is_global_flag(word: &str) -> bool {
    let name = word.split('=').next().unwrap_or(word);
    matches!(name, "-v" | "--verbose" | "--config" | "--package-manager")
}

/// Maps clap errors onto the usage / unknown-command taxonomy
fn handle_parse_error(err: clap::Error, args: &[OsString]) -> Result<ExitCode> {
    if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
        err.print()?;
        return Ok(ExitCode::SUCCESS);
    }

    let words: Vec<String> = args
        .iter()
        .skip(1)
        .map(|arg| arg.to_string_lossy().into_owned())
        .collect();

    match words.first() {
        // A recognized command, or global options ahead of one, with bad
        // arguments is a usage error
        Some(first) if COMMAND_WORDS.contains(&first.as_str()) || is_global_flag(first) => {
            err.print()?;
            Ok(ExitCode::FAILURE)
        }
        Some(first) => Ok(unknown_command(first)),
        None => {
            err.print()?;
            Ok(ExitCode::FAILURE)
        }
    }
}
