//! Host configuration loaded from TOML.
//!
//! ```toml
//! [logging]
//! level = "info"
//! dir = "/var/log/planner"
//!
//! [views]
//! sort_by = "priority"
//! show_completed = true
//! selected_areas = []
//! ```
//!
//! Every key is optional; missing keys take their defaults.

use crate::logging::{default_log_level, normalize_level, LogTarget};
use crate::view::ViewParams;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    pub logging: LoggingConfig,
    /// Initial view parameters for hosts that do not keep their own.
    pub views: ViewParams,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// Absent means stderr.
    pub dir: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level().to_string(),
            dir: None,
        }
    }
}

impl LoggingConfig {
    pub fn target(&self) -> LogTarget {
        match &self.dir {
            Some(dir) => LogTarget::Directory(dir.clone()),
            None => LogTarget::Stderr,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse {
        path: Option<PathBuf>,
        message: String,
    },
    InvalidLogLevel(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read config `{}`: {source}", path.display())
            }
            Self::Parse {
                path: Some(path),
                message,
            } => write!(f, "invalid config `{}`: {message}", path.display()),
            Self::Parse {
                path: None,
                message,
            } => write!(f, "invalid config: {message}"),
            Self::InvalidLogLevel(message) => write!(f, "{message}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse { .. } | Self::InvalidLogLevel(_) => None,
        }
    }
}

impl PlannerConfig {
    /// Parses and validates a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content).map_err(|err| ConfigError::Parse {
            path: None,
            message: err.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        normalize_level(&self.logging.level).map_err(ConfigError::InvalidLogLevel)?;
        Ok(())
    }
}

/// Reads and parses a config file.
pub fn load_config(path: &Path) -> Result<PlannerConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    PlannerConfig::from_toml_str(&content).map_err(|err| match err {
        ConfigError::Parse { message, .. } => ConfigError::Parse {
            path: Some(path.to_path_buf()),
            message,
        },
        other => other,
    })
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, PlannerConfig};
    use crate::logging::{default_log_level, LogTarget};
    use crate::view::SortBy;

    #[test]
    fn empty_document_uses_defaults() {
        let config = PlannerConfig::from_toml_str("").unwrap();
        assert_eq!(config.logging.level, default_log_level());
        assert_eq!(config.logging.target(), LogTarget::Stderr);
        assert_eq!(config.views.sort_by, SortBy::None);
        assert!(!config.views.show_completed);
    }

    #[test]
    fn parses_view_section() {
        let config = PlannerConfig::from_toml_str(
            "[views]\nsort_by = \"date\"\nshow_completed = true\n",
        )
        .unwrap();
        assert_eq!(config.views.sort_by, SortBy::Date);
        assert!(config.views.show_completed);
    }

    #[test]
    fn rejects_unknown_level() {
        let err = PlannerConfig::from_toml_str("[logging]\nlevel = \"loud\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidLogLevel(_)));
    }
}
