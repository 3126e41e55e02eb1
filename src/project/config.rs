//! Configuration handling for microfolio
//!
//! Configuration is read from `~/.config/microfolio/config.toml` (or the
//! platform equivalent), or from an explicit file passed with `--config` /
//! `MICROFOLIO_CONFIG`. Command-line overrides are applied on top.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Upstream template repository cloned by `microfolio new`
pub const DEFAULT_TEMPLATE_REPOSITORY: &str = "https://github.com/aker-dev/microfolio.git";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to parse configuration: {0}")]
    Parse(String),

    #[error("Config file not found: {0}")]
    NotFound(PathBuf),
}

/// Settings for scaffolding new projects
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateConfig {
    /// Git URL or local path of the template project
    pub repository: String,

    /// Message of the single commit in a freshly created project
    pub commit_message: String,

    /// Install dependencies after scaffolding
    pub install: bool,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            repository: DEFAULT_TEMPLATE_REPOSITORY.to_string(),
            commit_message: "Initial commit - microfolio project".to_string(),
            install: true,
        }
    }
}

/// Addresses announced when starting the dev and preview servers
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub dev_url: String,
    pub preview_url: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            dev_url: "http://localhost:5173".to_string(),
            preview_url: "http://localhost:4173".to_string(),
        }
    }
}

/// Tool configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Package manager used to install dependencies and run scripts
    pub package_manager: String,

    /// Git executable
    pub git: String,

    pub template: TemplateConfig,

    pub server: ServerConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            package_manager: "pnpm".to_string(),
            git: "git".to_string(),
            template: TemplateConfig::default(),
            server: ServerConfig::default(),
        }
    }
}

/// Where the effective configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    Defaults,
    Global(PathBuf),
    Explicit(PathBuf),
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::Defaults => write!(f, "built-in defaults"),
            ConfigSource::Global(path) => write!(f, "{}", path.display()),
            ConfigSource::Explicit(path) => write!(f, "{} (explicit)", path.display()),
        }
    }
}

impl Config {
    /// Loads configuration from an explicit file, or from the global location
    ///
    /// An explicit file must exist. A missing global file falls back to the
    /// built-in defaults.
    pub fn load(explicit: Option<&Path>) -> Result<(Self, ConfigSource)> {
        if let Some(path) = explicit {
            if !path.is_file() {
                return Err(ConfigError::NotFound(path.to_path_buf()).into());
            }
            let config = Self::from_file(path)?;
            return Ok((config, ConfigSource::Explicit(path.to_path_buf())));
        }

        match Self::global_config_path() {
            Some(path) if path.is_file() => {
                let config = Self::from_file(&path)?;
                Ok((config, ConfigSource::Global(path)))
            }
            _ => Ok((Self::default(), ConfigSource::Defaults)),
        }
    }

    /// Returns the global config directory
    pub fn global_config_dir() -> Option<PathBuf> {
        ProjectDirs::from("dev", "microfolio", "microfolio")
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Returns the global config file path
    pub fn global_config_path() -> Option<PathBuf> {
        Self::global_config_dir().map(|dir| dir.join("config.toml"))
    }

    /// Reads and validates a config file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;

        let config = Self::parse(&content)
            .with_context(|| format!("Failed to load config: {}", path.display()))?;
        Ok(config)
    }

    /// Parses and validates TOML config text
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Config =
            toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Applies command-line (or environment) overrides
    pub fn with_overrides(
        mut self,
        package_manager: Option<String>,
        template: Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(pm) = package_manager {
            self.package_manager = pm;
        }
        if let Some(repo) = template {
            self.template.repository = repo;
        }
        self.validate()?;
        Ok(self)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.package_manager.trim().is_empty() {
            return Err(ConfigError::Invalid("package_manager must not be empty".into()));
        }
        if self.git.trim().is_empty() {
            return Err(ConfigError::Invalid("git must not be empty".into()));
        }
        if self.template.repository.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "template.repository must not be empty".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config() {
        let config = Config::default();

        assert_eq!(config.package_manager, "pnpm");
        assert_eq!(config.git, "git");
        assert_eq!(config.template.repository, DEFAULT_TEMPLATE_REPOSITORY);
        assert!(config.template.install);
        assert_eq!(config.server.dev_url, "http://localhost:5173");
        assert_eq!(config.server.preview_url, "http://localhost:4173");
    }

    #[test]
    fn parse_partial_config() {
        let toml = r#"
package_manager = "npm"

[template]
install = false
"#;

        let config = Config::parse(toml).unwrap();
        assert_eq!(config.package_manager, "npm");
        assert!(!config.template.install);
        // Untouched fields keep their defaults
        assert_eq!(config.template.repository, DEFAULT_TEMPLATE_REPOSITORY);
        assert_eq!(config.server.preview_url, "http://localhost:4173");
    }

    #[test]
    fn parse_rejects_blank_package_manager() {
        let err = Config::parse("package_manager = \"  \"").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn parse_rejects_malformed_toml() {
        let err = Config::parse("package_manager = ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn overrides_take_precedence() {
        let config = Config::default()
            .with_overrides(Some("bun".into()), Some("/tmp/template".into()))
            .unwrap();

        assert_eq!(config.package_manager, "bun");
        assert_eq!(config.template.repository, "/tmp/template");
    }

    #[test]
    fn overrides_are_validated() {
        let result = Config::default().with_overrides(None, Some(String::new()));
        assert!(result.is_err());
    }

    #[test]
    fn load_explicit_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "package_manager = \"yarn\"\n").unwrap();

        let (config, source) = Config::load(Some(&path)).unwrap();
        assert_eq!(config.package_manager, "yarn");
        assert_eq!(source, ConfigSource::Explicit(path));
    }

    #[test]
    fn load_missing_explicit_file_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nope.toml");

        let err = Config::load(Some(&path)).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::NotFound(_))
        ));
    }
}
