//! Project-level configuration support
//!
//! Loads configuration from `metcalfe.toml` or `.metcalferc.json` in a
//! directory, or from an explicit file.
//!
//! # Configuration Format
//!
//! ```toml
//! # metcalfe.toml
//!
//! [coefficients.synergy]
//! standard = 1.0
//! good = 1.2
//! excellent = 1.5
//!
//! [coefficients.integration]
//! simple = 1.0
//! moderate = 1.3
//! full = 1.5
//!
//! [defaults]
//! integration = "moderate"
//! format = "json"
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, warn};

use super::coefficients::Coefficients;
use crate::error::Result;
use crate::models::IntegrationLevel;

/// File names searched by `load_project_config`, in order
pub const CONFIG_FILE_NAMES: [&str; 2] = ["metcalfe.toml", ".metcalferc.json"];

/// Commented config written by `metcalfe init`. Parses to the defaults.
pub const EXAMPLE_CONFIG: &str = r#"# metcalfe configuration

# Synergy coefficient per connection quality.
# A connected group uses the mean over its connections.
[coefficients.synergy]
standard = 1.0
good = 1.2
excellent = 1.5

# Integration coefficient applied to every connected group.
# Unconnected single nodes never receive it.
[coefficients.integration]
simple = 1.0    # cross-promotion only
moderate = 1.3  # shared auth/payment
full = 1.5      # fully merged systems

[defaults]
# integration = "simple"
# format = "text"
"#;

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectConfig {
    #[serde(default)]
    pub coefficients: Coefficients,

    #[serde(default)]
    pub defaults: CliDefaults,
}

/// Default CLI flags that can be set in the config file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CliDefaults {
    /// Default integration level
    #[serde(default)]
    pub integration: Option<IntegrationLevel>,

    /// Default output format (text, json)
    #[serde(default)]
    pub format: Option<String>,
}

impl ProjectConfig {
    /// Parse TOML and validate the coefficient tables
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: ProjectConfig = toml::from_str(content)?;
        config.coefficients.validate()?;
        Ok(config)
    }

    /// Parse JSON and validate the coefficient tables
    pub fn from_json_str(content: &str) -> Result<Self> {
        let config: ProjectConfig = serde_json::from_str(content)?;
        config.coefficients.validate()?;
        Ok(config)
    }
}

/// Load configuration from an explicit file.
///
/// `.json` files are parsed as JSON, everything else as TOML. Unlike
/// `load_project_config`, any failure is returned to the caller.
pub fn load_config_file(path: &Path) -> Result<ProjectConfig> {
    let content = std::fs::read_to_string(path)?;
    let config = if has_extension(path, "json") {
        ProjectConfig::from_json_str(&content)?
    } else {
        ProjectConfig::from_toml_str(&content)?
    };
    debug!("Loaded config from {}", path.display());
    Ok(config)
}

/// Load configuration from a directory.
///
/// Searches for configuration files in this order:
/// 1. `metcalfe.toml`
/// 2. `.metcalferc.json`
///
/// A file that fails to parse or validate is skipped with a warning.
/// Returns default configuration if no usable config file is found.
pub fn load_project_config(dir: &Path) -> ProjectConfig {
    for name in CONFIG_FILE_NAMES {
        let path = dir.join(name);
        if !path.exists() {
            continue;
        }
        match load_config_file(&path) {
            Ok(config) => return config,
            Err(e) => warn!("Failed to load {}: {}", path.display(), e),
        }
    }

    debug!("No project config found in {}, using defaults", dir.display());
    ProjectConfig::default()
}

pub(crate) fn has_extension(path: &Path, ext: &str) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(ext))
}
