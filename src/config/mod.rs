//! Configuration module for weibo-pictures.
//!
//! This module handles:
//! - Loading configuration from TOML files
//! - Configuration validation

pub mod loader;
pub mod validation;

pub use loader::{AccountConfig, Config, OptionsConfig};
pub use validation::validate_config;
