//! Output reporters for valuation results
//!
//! Supports two output formats:
//! - `text` - Terminal output with colors
//! - `json` - Machine-readable JSON (camelCase fields)

mod json;
mod text;

use serde::Serialize;
use std::str::FromStr;

use crate::error::{MetcalfeError, Result};
use crate::graph::NetworkStats;
use crate::models::{IntegrationLevel, NetworkValue};
use crate::valuation::{GroupValuation, LevelComparison, ValuationBreakdown};

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = MetcalfeError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" | "txt" | "terminal" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(MetcalfeError::UnknownFormat(s.to_string())),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Result of the `value` command
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub integration: IntegrationLevel,
    #[serde(flatten)]
    pub value: NetworkValue,
    /// Per-group figures, present when an explanation was requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub groups: Option<Vec<GroupValuation>>,
}

impl ValueReport {
    pub fn new(name: Option<String>, breakdown: ValuationBreakdown, explain: bool) -> Self {
        Self {
            name,
            integration: breakdown.integration,
            value: breakdown.value,
            groups: explain.then_some(breakdown.groups),
        }
    }
}

/// Result of the `groups` command
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupsReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub integration: IntegrationLevel,
    pub groups: Vec<GroupValuation>,
}

/// Result of the `compare` command
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompareReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub levels: Vec<LevelComparison>,
}

/// Result of the `stats` command
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub stats: NetworkStats,
}

/// Anything a command can print
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Report {
    Value(ValueReport),
    Groups(GroupsReport),
    Compare(CompareReport),
    Stats(StatsReport),
}

/// Render a report using an OutputFormat enum
pub fn report_with_format(report: &Report, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(text::render(report)),
        OutputFormat::Json => json::render(report),
    }
}
