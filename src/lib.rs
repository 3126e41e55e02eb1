//! microfolio - Scaffold and run static portfolio projects
//!
//! `microfolio new` seeds a project from the upstream template repository;
//! the remaining commands check that the current directory is a project and
//! hand off to its package-manager scripts.

pub mod cli;
pub mod project;

pub use project::{Config, Project, ProjectError};
