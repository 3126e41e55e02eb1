//! # Project Layer
//!
//! Everything microfolio knows about the filesystem and the tools it drives.
//!
//! ## Conventions
//!
//! | Item | Location |
//! |------|----------|
//! | Project marker | `./package.json` |
//! | Build output | `./dist/` or `./build/` |
//! | Tool config | `~/.config/microfolio/config.toml` |
//!
//! ## Key Types
//!
//! - [`Project`] - A directory recognized as a microfolio project
//! - [`Config`] - Package manager, git and template settings
//! - [`Git`] - The git operations used to seed new projects

mod config;
mod git;
#[allow(clippy::module_inception)]
mod project;

pub use config::{
    Config, ConfigError, ConfigSource, ServerConfig, TemplateConfig, DEFAULT_TEMPLATE_REPOSITORY,
};
pub use git::{Git, GitError};
pub use project::{Manifest, Project, ProjectError, MARKER_FILE, OUTPUT_DIRS};
