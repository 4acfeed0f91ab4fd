//! Dataflow facade configuration
//!
//! Three sections, each with its own validation:
//! - `cache`: result memoization
//! - `blocking`: how requesters wait on an in-flight computation
//! - `analysis`: orchestration switches
//!
//! YAML files carry a `version: 1` header:
//!
//! ```yaml
//! version: 1
//! cache:
//!   enabled: true
//! blocking:
//!   max_blocked_waiters: 8
//!   poll_interval_ms: 10
//! analysis:
//!   stitch_constructors: true
//! ```

use super::error::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Supported YAML schema versions
pub const SUPPORTED_VERSIONS: &[u32] = &[1];

// ============================================================================
// Cache
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CacheConfig {
    /// Memoize results per container; when off every lookup re-runs dataflow
    pub enabled: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

// ============================================================================
// Blocking
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BlockingConfig {
    /// Threads allowed to block on another thread's computation at once
    /// (0 = never block, always compute directly)
    pub max_blocked_waiters: usize,

    /// Wait granularity between pool yields, in milliseconds (1..=1000)
    pub poll_interval_ms: u64,
}

impl Default for BlockingConfig {
    fn default() -> Self {
        Self {
            max_blocked_waiters: num_cpus::get(),
            poll_interval_ms: 10,
        }
    }
}

impl BlockingConfig {
    pub fn validate(&self) -> ConfigResult<()> {
        if self.poll_interval_ms == 0 || self.poll_interval_ms > 1000 {
            return Err(ConfigError::range_with_hint(
                "blocking.poll_interval_ms",
                self.poll_interval_ms,
                1,
                1000,
                "Waiters need a non-zero poll interval",
            ));
        }
        Ok(())
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

// ============================================================================
// Analysis
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisConfig {
    /// Re-run constructors of class units on top of the initializer states
    pub stitch_constructors: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            stitch_constructors: true,
        }
    }
}

// ============================================================================
// Facade configuration
// ============================================================================

/// Complete facade configuration
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DataflowConfig {
    pub cache: CacheConfig,
    pub blocking: BlockingConfig,
    pub analysis: AnalysisConfig,
}

/// On-disk layout (YAML v1)
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFileV1 {
    version: Option<u32>,
    #[serde(default)]
    cache: CacheConfig,
    #[serde(default)]
    blocking: BlockingConfig,
    #[serde(default)]
    analysis: AnalysisConfig,
}

impl DataflowConfig {
    /// Parse and validate a YAML document
    pub fn from_yaml_str(content: &str) -> ConfigResult<Self> {
        let file: ConfigFileV1 = serde_yaml::from_str(content)?;

        let version = file.version.ok_or(ConfigError::MissingVersion)?;
        if !SUPPORTED_VERSIONS.contains(&version) {
            return Err(ConfigError::UnsupportedVersion {
                found: version,
                supported: SUPPORTED_VERSIONS.to_vec(),
            });
        }

        let config = Self {
            cache: file.cache,
            blocking: file.blocking,
            analysis: file.analysis,
        };
        config.validate()?;
        Ok(config)
    }

    /// Load, parse and validate a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        self.blocking.validate()
    }

    pub fn with_cache_enabled(mut self, enabled: bool) -> Self {
        self.cache.enabled = enabled;
        self
    }

    pub fn with_max_blocked_waiters(mut self, waiters: usize) -> Self {
        self.blocking.max_blocked_waiters = waiters;
        self
    }

    pub fn with_poll_interval_ms(mut self, millis: u64) -> Self {
        self.blocking.poll_interval_ms = millis;
        self
    }

    pub fn with_stitch_constructors(mut self, enabled: bool) -> Self {
        self.analysis.stitch_constructors = enabled;
        self
    }
}
