//! # marksort-config
//!
//! Configuration management for marksort.

mod error;
mod loader;
mod schema;

pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use schema::{ClassifierSettings, Config, StorageConfig};
