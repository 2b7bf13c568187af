//! The `panguan.toml` configuration file.

use panguan_pipeline::stages::research::ResearchConfig;
use serde::{Deserialize, Serialize};
use std::{fs, io, path::{Path, PathBuf}};
use thiserror::Error;

/// The configuration file read when `--config` is not given.
pub const DEFAULT_CONFIG_PATH: &str = "panguan.toml";

/// An error reading the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file `{}`", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config file `{}`", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// The configuration of the CLI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// The default log filter. `RUST_LOG` takes precedence when set.
    pub log_level: String,

    /// The directory batch reports are written to.
    pub reports_dir: PathBuf,

    /// The `[research]` section.
    pub research: ResearchConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "warn".to_owned(),
            reports_dir: PathBuf::from("reports"),
            research: ResearchConfig::default(),
        }
    }
}

impl Config {
    /// Parses the configuration from TOML text.
    pub fn from_toml(path: &Path, text: &str) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_owned(),
            source,
        })
    }

    /// Loads the configuration file at the given path.
    ///
    /// If `required` is false, a missing file gives the default configuration.
    pub fn load(path: &Path, required: bool) -> Result<Self, ConfigError> {
        match fs::read_to_string(path) {
            Ok(text) => Self::from_toml(path, &text),
            Err(err) if err.kind() == io::ErrorKind::NotFound && !required => Ok(Self::default()),
            Err(source) => Err(ConfigError::Read { path: path.to_owned(), source }),
        }
    }
}

#[cfg(test)]
mod tests {
    use panguan_pipeline::stages::research::BackendKind;
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn full_file() {
        let config = Config::from_toml(Path::new("panguan.toml"), r#"
            log_level = "debug"
            reports_dir = "out/reports"

            [research]
            backend = "offline"
        "#).unwrap();
        assert_eq!(config, Config {
            log_level: "debug".to_owned(),
            reports_dir: PathBuf::from("out/reports"),
            research: ResearchConfig { backend: BackendKind::Offline },
        });
    }

    #[test]
    fn missing_keys_use_defaults() {
        let config = Config::from_toml(Path::new("panguan.toml"), "log_level = \"info\"").unwrap();
        assert_eq!(config.reports_dir, PathBuf::from("reports"));
        assert_eq!(config.research, ResearchConfig::default());
    }

    #[test]
    fn unknown_backend() {
        let err = Config::from_toml(Path::new("panguan.toml"), "[research]\nbackend = \"web\"").unwrap_err();
        assert_eq!(err.to_string(), "invalid config file `panguan.toml`");
    }

    #[test]
    fn missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        assert_eq!(Config::load(&path, false).unwrap(), Config::default());
        assert!(matches!(Config::load(&path, true), Err(ConfigError::Read { .. })));
    }
}
