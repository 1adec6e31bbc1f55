//! Core types shared by every module: keys, errors, configuration, logging.

pub mod config;
pub mod error;
pub mod key;
pub mod logging;

pub use config::{EngineConfig, LogConfig, MergeConfig, ViewConfig};
pub use error::{Result, VoxelError};
pub use key::{NamespacedKey, BUILTIN_NAMESPACE};
pub use logging::{init_tracing, init_tracing_default};
