//! Error types for the metcalfe crate.
//!
//! The valuation engine itself is infallible. Errors only come from the
//! boundaries: parsing level names, loading canvases and config files,
//! and editing a canvas.

use thiserror::Error;

/// Errors that can occur outside the pure valuation engine
#[derive(Error, Debug)]
pub enum MetcalfeError {
    #[error("Unknown synergy level '{0}'. Valid levels: standard, good, excellent")]
    UnknownSynergy(String),

    #[error("Unknown integration level '{0}'. Valid levels: simple, moderate, full")]
    UnknownIntegration(String),

    #[error("Unknown format '{0}'. Valid formats: text, json")]
    UnknownFormat(String),

    #[error("Invalid {table} coefficient for '{level}': {value} (must be finite and >= 0)")]
    InvalidCoefficient {
        table: &'static str,
        level: String,
        value: f64,
    },

    #[error("Node not found: {0}")]
    NodeNotFound(String),

    #[error("Connection not found: {0}")]
    ConnectionNotFound(String),

    #[error("Node id already exists: {0}")]
    DuplicateNode(String),

    #[error("Cannot connect node '{0}' to itself")]
    SelfConnection(String),

    #[error("Nodes '{source_id}' and '{target_id}' are already connected")]
    DuplicateConnection { source_id: String, target_id: String },

    #[error("Unknown preset '{0}'. Run `metcalfe presets` to list them")]
    UnknownPreset(String),

    #[error("Invalid canvas: {0}")]
    InvalidCanvas(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, MetcalfeError>;
