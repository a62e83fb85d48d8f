//! Configuration system for PressForge.
//!
//! Load batch configuration from TOML (or YAML) files to control the worker
//! pool, the live progress display and search options without code changes.
//!
//! # Examples
//!
//! Load configuration from TOML string:
//!
//! ```
//! use pressforge_config::{BatchConfig, RendererKind, WorkerCount};
//! use std::time::Duration;
//!
//! let config = BatchConfig::from_toml_str(r#"
//!     [workers]
//!     count = { fixed = 4 }
//!
//!     [progress]
//!     refresh_millis = 250
//!     renderer = "log"
//! "#).unwrap();
//!
//! assert_eq!(config.workers.count, WorkerCount::Fixed(4));
//! assert_eq!(config.progress.refresh_interval(), Duration::from_millis(250));
//! assert_eq!(config.progress.renderer, RendererKind::Log);
//! ```
//!
//! Use default config when file is missing:
//!
//! ```
//! use pressforge_config::BatchConfig;
//!
//! let config = BatchConfig::load("pressforge.toml").unwrap_or_default();
//! // Proceeds with defaults if file doesn't exist
//! ```

use std::fmt;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main batch configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct BatchConfig {
    /// Worker pool configuration.
    #[serde(default)]
    pub workers: WorkerConfig,

    /// Live progress display configuration.
    #[serde(default)]
    pub progress: ProgressConfig,

    /// Search options applied to every machine.
    #[serde(default)]
    pub search: SearchConfig,
}

impl BatchConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist, contains invalid TOML, or fails
    /// [`validate`](Self::validate).
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks values that deserialize fine but cannot drive a batch.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.workers.count == WorkerCount::Fixed(0) {
            return Err(ConfigError::Invalid(
                "workers.count must be at least 1".to_string(),
            ));
        }
        self.progress.validate()
    }

    /// Sets the worker count.
    pub fn with_worker_count(mut self, count: WorkerCount) -> Self {
        self.workers.count = count;
        self
    }

    /// Enables or disables the progress display.
    pub fn with_progress(mut self, enabled: bool) -> Self {
        self.progress.enabled = enabled;
        self
    }

    /// Sets the progress refresh interval.
    pub fn with_refresh_interval(mut self, interval: Duration) -> Self {
        self.progress.refresh_millis = interval.as_millis().max(1) as u64;
        self
    }

    /// Sets the progress renderer.
    pub fn with_renderer(mut self, renderer: RendererKind) -> Self {
        self.progress.renderer = renderer;
        self
    }

    /// Enables or disables pruning against the best total found so far.
    pub fn with_incumbent_pruning(mut self, enabled: bool) -> Self {
        self.search.prune_by_incumbent = enabled;
        self
    }
}

/// Worker pool configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct WorkerConfig {
    /// How many machines are searched concurrently.
    #[serde(default)]
    pub count: WorkerCount,
}

/// Worker count configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkerCount {
    /// One worker per machine.
    #[default]
    PerMachine,

    /// Available CPU cores, capped at the machine count.
    Auto,

    /// A specific number of workers, capped at the machine count.
    Fixed(usize),
}

impl WorkerCount {
    /// Resolves to an actual worker count for a batch of `machine_count`
    /// machines. Always at least 1.
    ///
    /// # Examples
    ///
    /// ```
    /// use pressforge_config::WorkerCount;
    ///
    /// assert_eq!(WorkerCount::PerMachine.resolve(12), 12);
    /// assert_eq!(WorkerCount::Fixed(4).resolve(12), 4);
    /// assert_eq!(WorkerCount::Fixed(40).resolve(12), 12);
    /// assert_eq!(WorkerCount::PerMachine.resolve(0), 1);
    /// ```
    pub fn resolve(&self, machine_count: usize) -> usize {
        let count = match self {
            WorkerCount::PerMachine => machine_count,
            WorkerCount::Auto => {
                let cpus = std::thread::available_parallelism()
                    .map(|p| p.get())
                    .unwrap_or(1);
                std::cmp::min(cpus, machine_count)
            }
            WorkerCount::Fixed(n) => std::cmp::min(*n, machine_count),
        };
        count.max(1)
    }
}

impl fmt::Display for WorkerCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkerCount::PerMachine => write!(f, "PerMachine"),
            WorkerCount::Auto => write!(f, "Auto"),
            WorkerCount::Fixed(n) => write!(f, "{}", n),
        }
    }
}

/// Live progress display configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct ProgressConfig {
    /// Whether the progress monitor runs at all.
    pub enabled: bool,

    /// Milliseconds between frames.
    pub refresh_millis: u64,

    /// Number of grid columns.
    pub columns: usize,

    /// Total frame width in characters.
    pub width: usize,

    /// Which renderer draws the frames.
    pub renderer: RendererKind,
}

impl ProgressConfig {
    /// Returns the refresh interval as a Duration.
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_millis(self.refresh_millis)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.refresh_millis == 0 {
            return Err(ConfigError::Invalid(
                "progress.refresh_millis must be positive".to_string(),
            ));
        }
        if self.columns == 0 {
            return Err(ConfigError::Invalid(
                "progress.columns must be at least 1".to_string(),
            ));
        }
        if self.width < self.columns {
            return Err(ConfigError::Invalid(format!(
                "progress.width ({}) is narrower than progress.columns ({})",
                self.width, self.columns
            )));
        }
        Ok(())
    }
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            refresh_millis: 5_000,
            columns: 3,
            width: 160,
            renderer: RendererKind::Terminal,
        }
    }
}

/// Progress renderer selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RendererKind {
    /// Redraws a grid in the terminal with ANSI escape codes.
    #[default]
    Terminal,

    /// Emits one `tracing` event per frame.
    Log,

    /// Draws nothing.
    None,
}

impl fmt::Display for RendererKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RendererKind::Terminal => write!(f, "Terminal"),
            RendererKind::Log => write!(f, "Log"),
            RendererKind::None => write!(f, "None"),
        }
    }
}

/// Search options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct SearchConfig {
    /// Abandon a branch once its running total reaches the best total found
    /// so far. Off by default: the plain search prunes only on overshoot and
    /// exact match.
    pub prune_by_incumbent: bool,
}
