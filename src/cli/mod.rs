//! # Command-Line Interface
//!
//! User-facing commands and output.
//!
//! ## Commands
//!
//! | Command | Purpose |
//! |---------|---------|
//! | `new <name>` | Scaffold a project from the template |
//! | `dev` | Start the development server |
//! | `build` | Build the site for production |
//! | `preview` | Serve the built site |
//! | `optimize-images` | Optimize project images |
//! | `clean-images` | Remove generated images |
//! | `help` | Show usage |
//!
//! Everything except `new` and `help` runs `<package-manager> run <script>`
//! in the current directory, after checking that it holds a `package.json`.
//!
//! ## Verbose Mode
//!
//! Use `--verbose` (or `-v`) for debug output:
//! ```bash
//! microfolio --verbose dev
//! ```
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and execute the appropriate command,
//! and [`report()`] to print an error it returned.

mod app;
mod delegate;
mod output;
mod scaffold;
mod usage;

pub use app::{run, run_from, Cli, Commands, UsageError, COMMAND_WORDS};
pub use delegate::{Invocation, Script};
pub use output::{hint_for, report, Output};
pub use scaffold::{new_project, ScaffoldError, ScaffoldOptions};
pub use usage::USAGE;
