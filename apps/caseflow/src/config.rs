//! # Configuration
//!
//! Settings are layered, later layers win:
//!
//! 1. Built-in defaults
//! 2. `caseflow.toml` (or the file passed with `--config`)
//! 3. Environment: `CASEFLOW_PAGE_SIZE`, `CASEFLOW_LOG_FORMAT`
//! 4. Command line flags (applied by the CLI)
//!
//! ```toml
//! default_page_size = 20
//! log_format = "json"
//! ```

use caseflow_core::{CaseflowError, primitives::DEFAULT_PAGE_SIZE};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// File looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "caseflow.toml";

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl LogFormat {
    fn parse(s: &str) -> Option<Self> {
        match s {
            "text" => Some(Self::Text),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Resolved application settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Page size for `list` when `--page-size` is not given.
    pub default_page_size: usize,
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_page_size: DEFAULT_PAGE_SIZE,
            log_format: LogFormat::Text,
        }
    }
}

impl Config {
    /// Load configuration from `path`, or from `caseflow.toml` if present.
    ///
    /// An explicit path must exist. The implicit default file is optional.
    pub fn load(path: Option<&Path>) -> Result<Self, CaseflowError> {
        let config = match path {
            Some(p) => Self::from_file(p)?,
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.is_file() {
                    Self::from_file(&default_path)?
                } else {
                    Self::default()
                }
            }
        };

        config.with_env_overrides(
            std::env::var("CASEFLOW_PAGE_SIZE").ok().as_deref(),
            std::env::var("CASEFLOW_LOG_FORMAT").ok().as_deref(),
        )
    }

    /// Parse a configuration file.
    pub fn from_file(path: &Path) -> Result<Self, CaseflowError> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            CaseflowError::ConfigError(format!("Cannot read '{}': {}", path.display(), e))
        })?;
        Self::from_toml_str(&text)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, CaseflowError> {
        let config: Self =
            toml::from_str(text).map_err(|e| CaseflowError::ConfigError(e.to_string()))?;
        config.validated()
    }

    /// Apply environment values. Unset variables leave the setting alone.
    pub fn with_env_overrides(
        mut self,
        page_size: Option<&str>,
        log_format: Option<&str>,
    ) -> Result<Self, CaseflowError> {
        if let Some(raw) = page_size {
            self.default_page_size = raw.trim().parse().map_err(|_| {
                CaseflowError::ConfigError(format!("CASEFLOW_PAGE_SIZE is not a number: '{}'", raw))
            })?;
        }
        if let Some(raw) = log_format {
            self.log_format = LogFormat::parse(raw.trim()).ok_or_else(|| {
                CaseflowError::ConfigError(format!(
                    "CASEFLOW_LOG_FORMAT must be 'text' or 'json', got '{}'",
                    raw
                ))
            })?;
        }
        self.validated()
    }

    fn validated(self) -> Result<Self, CaseflowError> {
        if self.default_page_size == 0 {
            return Err(CaseflowError::ConfigError(
                "default_page_size must be at least 1".to_string(),
            ));
        }
        Ok(self)
    }
}
