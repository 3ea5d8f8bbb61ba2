//! Configuration module for metcalfe
//!
//! This module handles:
//! - Synergy and integration coefficient tables
//! - Project-level configuration (metcalfe.toml)
//! - CLI defaults

mod coefficients;
mod project_config;

pub use coefficients::{Coefficients, IntegrationCoefficients, SynergyCoefficients};
pub(crate) use project_config::has_extension;
pub use project_config::{
    load_config_file, load_project_config, CliDefaults, ProjectConfig, CONFIG_FILE_NAMES,
    EXAMPLE_CONFIG,
};
