//! Configuration Management
//!
//! Unified configuration system with hierarchical resolution:
//! 1. Built-in defaults
//! 2. Global config (platform config directory)
//! 3. Project config (.openwiki/config.toml)
//! 4. Environment variables (OPENWIKI_*)
//! 5. CLI arguments (highest priority)
//!
//! The resolved [`Config`] is an immutable value handed to the pipeline at
//! construction; nothing downstream reads configuration from the environment.

mod loader;
mod types;

pub use loader::{API_KEY_ENV, ConfigLoader};
pub use types::*;
