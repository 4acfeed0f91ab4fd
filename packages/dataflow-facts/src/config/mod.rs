//! Configuration
//!
//! `DataflowConfig` is built in code (defaults + `with_*` builders) or loaded
//! from a versioned YAML file. Both paths end in `validate()`.
//!
//! # Examples
//!
//! ```rust,ignore
//! use dataflow_facts::config::DataflowConfig;
//!
//! let config = DataflowConfig::default().with_max_blocked_waiters(4);
//! let config = DataflowConfig::from_yaml_file("dataflow.yaml")?;
//! ```

pub mod dataflow_config;
pub mod error;

pub use dataflow_config::{
    AnalysisConfig, BlockingConfig, CacheConfig, DataflowConfig, SUPPORTED_VERSIONS,
};
pub use error::{ConfigError, ConfigResult};
