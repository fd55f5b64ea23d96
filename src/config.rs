/// Merge configuration: which solver runs to scan and join by name.
///
/// ```toml
/// [[runs]]
/// path = "results/mallob"
/// prefix = "mallob"
///
/// [[runs]]
/// path = "results/gimsatul"
/// prefix = "gimsatul"
/// memory_series = true
/// ```
use serde::Deserialize;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Default)]
pub struct MergeConfig {
    #[serde(default)]
    pub runs: Vec<RunSource>,
}

/// One solver run root and the column prefix namespacing its metrics.
#[derive(Debug, Deserialize)]
pub struct RunSource {
    pub path: PathBuf,
    pub prefix: String,
    /// Emit the per-sample memory series instead of peak memory.
    #[serde(default)]
    pub memory_series: bool,
}

#[derive(Debug)]
pub enum ConfigError {
    Io(io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
        }
    }
}

/// Load a merge config from a TOML file.
pub fn load(path: &Path) -> Result<MergeConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
    toml::from_str(&content).map_err(ConfigError::Parse)
}
