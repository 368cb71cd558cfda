use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Region that is always selected unless configured otherwise.
pub const DEFAULT_MANDATORY_REGION: &str = "global";

const DEFAULT_REGIONS: [&str; 6] = [
    "global",
    "us-east-1",
    "us-west-2",
    "ap-northeast-2",
    "ap-northeast-1",
    "eu-west-1",
];

const DEFAULT_CLOUD_GROUPS: [&str; 5] = ["AWS-Group", "DEV-Group", "PROD-Group", "AZURE-Group", "GCP-Group"];

const DEFAULT_LOAD_TIMEOUT_MS: u64 = 5_000;

const DEFAULT_MAX_LATENCY_MS: u64 = 500;

/// Project-level configuration loaded from `.cloudform.toml`.
///
/// Every key is optional. A missing file yields the built-in region and
/// group catalogues with `global` as the mandatory region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Region that can never be deselected.
    pub mandatory_region: String,

    /// Regions that may be added to a record.
    ///
    /// The mandatory region is always selectable even when omitted here.
    pub regions: Vec<String>,

    /// Cloud groups that may be added to a record.
    pub cloud_groups: Vec<String>,

    /// Upper bound on an edit-mode load, in milliseconds.
    pub load_timeout_ms: u64,

    /// Upper bound on the mock store's simulated latency, in milliseconds.
    pub max_latency_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mandatory_region: DEFAULT_MANDATORY_REGION.to_string(),
            regions: DEFAULT_REGIONS.map(String::from).to_vec(),
            cloud_groups: DEFAULT_CLOUD_GROUPS.map(String::from).to_vec(),
            load_timeout_ms: DEFAULT_LOAD_TIMEOUT_MS,
            max_latency_ms: DEFAULT_MAX_LATENCY_MS,
        }
    }
}

impl Config {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a `.cloudform.toml` file.
    ///
    /// Returns the default configuration if the file does not exist.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::new());
        }

        let content = read_file(path)?;
        parse_toml(path, &content)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        parse_toml(Path::new("<inline>"), content)
    }

    /// Atomically writes this configuration to a `.cloudform.toml` file.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = serialise_toml(self)?;
        write_file(path, &content)
    }

    /// Serialises this configuration to a pretty-printed TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        serialise_toml(self)
    }

    /// Returns the edit-mode load timeout.
    #[must_use]
    pub const fn load_timeout(&self) -> Duration {
        Duration::from_millis(self.load_timeout_ms)
    }

    /// Returns the maximum simulated store latency.
    #[must_use]
    pub const fn max_latency(&self) -> Duration {
        Duration::from_millis(self.max_latency_ms)
    }
}

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn write_file(path: &Path, content: &str) -> Result<(), ConfigError> {
    crate::fs_util::atomic_write(path, content).map_err(|source| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    })
}

fn parse_toml(path: &Path, content: &str) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    if config.mandatory_region.trim().is_empty() {
        return Err(ConfigError::Invalid {
            path: path.to_path_buf(),
            reason: "mandatory_region must not be blank".into(),
        });
    }
    if config.load_timeout_ms == 0 {
        return Err(ConfigError::Invalid {
            path: path.to_path_buf(),
            reason: "load_timeout_ms must be positive".into(),
        });
    }

    Ok(config)
}

fn serialise_toml(config: &Config) -> Result<String, ConfigError> {
    toml::to_string_pretty(config).map_err(|source| ConfigError::Serialize { source })
}

/// Errors that can occur when reading, parsing, serialising, or writing
/// a `.cloudform.toml` configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config file could not be read from disk.
    #[error("failed to read config '{path}': {source}")]
    Read {
        /// Path to the config file that could not be read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The config file contained invalid TOML or unexpected values.
    #[error("failed to parse config '{path}': {source}")]
    Parse {
        /// Path to the config file that could not be parsed.
        path: PathBuf,
        /// The underlying TOML deserialization error.
        #[source]
        source: toml::de::Error,
    },

    /// The config file parsed but a value is out of range.
    #[error("invalid config '{path}': {reason}")]
    Invalid {
        /// Path to the offending config file.
        path: PathBuf,
        /// What was wrong with it.
        reason: String,
    },

    /// The in-memory configuration could not be serialised to TOML.
    #[error("failed to serialise config: {source}")]
    Serialize {
        /// The underlying TOML serialization error.
        #[source]
        source: toml::ser::Error,
    },

    /// The config file could not be written to disk.
    #[error("failed to write config '{path}': {source}")]
    Write {
        /// Path to the config file that could not be written.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl ConfigError {
    /// Returns the file path associated with this error, if any.
    ///
    /// `ConfigError::Serialize` errors have no associated path.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Read { path, .. } | Self::Parse { path, .. } | Self::Invalid { path, .. } | Self::Write { path, .. } => {
                Some(path)
            }
            Self::Serialize { .. } => None,
        }
    }
}
