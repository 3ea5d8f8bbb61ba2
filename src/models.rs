//! Core data models for metcalfe
//!
//! These models describe a network snapshot (nodes and connections), the
//! closed coefficient levels, and the valuation result.

use crate::error::MetcalfeError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Active rate assumed for nodes stored before the field existed
pub const DEFAULT_ACTIVE_RATE: f64 = 0.5;

fn default_active_rate() -> f64 {
    DEFAULT_ACTIVE_RATE
}

/// Canvas position of a node (presentation only)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A participant in the network: a service, a user group or a location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub position: Position,
    /// Primary scale metric (e.g. user count)
    pub value: f64,
    #[serde(default)]
    pub value_label: String,
    /// Fraction of `value` that is active, 0-1
    #[serde(default = "default_active_rate")]
    pub active_rate: f64,
}

impl Node {
    /// Create a node carrying only the attributes the engine reads
    pub fn new(id: impl Into<String>, value: f64, active_rate: f64) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            icon: String::new(),
            color: String::new(),
            position: Position::default(),
            value,
            value_label: String::new(),
            active_rate,
        }
    }

    /// `value * activeRate`, always finite and non-negative.
    ///
    /// Negative, NaN or infinite values count as 0. The active rate is
    /// clamped into [0, 1] with NaN treated as 0.
    pub fn effective_value(&self) -> f64 {
        sanitized_value(self.value) * sanitized_rate(self.active_rate)
    }

    /// True when `effective_value` had to clamp or zero an input
    pub fn is_degenerate(&self) -> bool {
        sanitized_value(self.value) != self.value
            || sanitized_rate(self.active_rate) != self.active_rate
    }
}

fn sanitized_value(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// Clamp a non-negative figure into the finite range.
///
/// Overflow to infinity becomes `f64::MAX`, NaN becomes 0.
pub(crate) fn saturate(x: f64) -> f64 {
    if x.is_nan() {
        0.0
    } else {
        x.min(f64::MAX)
    }
}

fn sanitized_rate(rate: f64) -> f64 {
    if rate.is_nan() {
        0.0
    } else {
        rate.clamp(0.0, 1.0)
    }
}

/// Input for creating a node on a canvas
#[derive(Debug, Clone, PartialEq)]
pub struct NodeInput {
    pub name: String,
    pub icon: String,
    pub color: String,
    pub position: Position,
    pub value: f64,
    pub value_label: String,
    pub active_rate: f64,
}

impl Default for NodeInput {
    fn default() -> Self {
        Self {
            name: String::new(),
            icon: "📍".to_string(),
            color: "#4ECDC4".to_string(),
            position: Position::default(),
            value: 10_000.0,
            value_label: "Users".to_string(),
            active_rate: DEFAULT_ACTIVE_RATE,
        }
    }
}

/// Per-connection quality multiplier
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum SynergyLevel {
    #[default]
    Standard,
    Good,
    Excellent,
}

impl SynergyLevel {
    pub const ALL: [SynergyLevel; 3] = [
        SynergyLevel::Standard,
        SynergyLevel::Good,
        SynergyLevel::Excellent,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SynergyLevel::Standard => "standard",
            SynergyLevel::Good => "good",
            SynergyLevel::Excellent => "excellent",
        }
    }
}

impl std::fmt::Display for SynergyLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SynergyLevel {
    type Err = MetcalfeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "standard" => Ok(SynergyLevel::Standard),
            "good" => Ok(SynergyLevel::Good),
            "excellent" => Ok(SynergyLevel::Excellent),
            _ => Err(MetcalfeError::UnknownSynergy(s.to_string())),
        }
    }
}

/// How deeply the connected systems are merged. Applies to every connected group.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum IntegrationLevel {
    /// Cross-promotion only
    #[default]
    Simple,
    /// Shared auth/payment
    Moderate,
    /// Fully merged systems
    Full,
}

impl IntegrationLevel {
    pub const ALL: [IntegrationLevel; 3] = [
        IntegrationLevel::Simple,
        IntegrationLevel::Moderate,
        IntegrationLevel::Full,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            IntegrationLevel::Simple => "simple",
            IntegrationLevel::Moderate => "moderate",
            IntegrationLevel::Full => "full",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            IntegrationLevel::Simple => "cross-promotion only",
            IntegrationLevel::Moderate => "shared auth/payment",
            IntegrationLevel::Full => "fully merged systems",
        }
    }
}

impl std::fmt::Display for IntegrationLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for IntegrationLevel {
    type Err = MetcalfeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "simple" => Ok(IntegrationLevel::Simple),
            "moderate" => Ok(IntegrationLevel::Moderate),
            "full" => Ok(IntegrationLevel::Full),
            _ => Err(MetcalfeError::UnknownIntegration(s.to_string())),
        }
    }
}

/// An undirected edge between two nodes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    pub id: String,
    pub source_id: String,
    pub target_id: String,
    /// Missing in data stored before synergy existed
    #[serde(default)]
    pub synergy: SynergyLevel,
}

impl Connection {
    pub fn new(
        id: impl Into<String>,
        source_id: impl Into<String>,
        target_id: impl Into<String>,
        synergy: SynergyLevel,
    ) -> Self {
        Self {
            id: id.into(),
            source_id: source_id.into(),
            target_id: target_id.into(),
            synergy,
        }
    }

    pub fn is_self_loop(&self) -> bool {
        self.source_id == self.target_id
    }

    /// True if this connection joins `a` and `b`, in either direction
    pub fn links(&self, a: &str, b: &str) -> bool {
        (self.source_id == a && self.target_id == b) || (self.source_id == b && self.target_id == a)
    }

    pub fn touches(&self, node_id: &str) -> bool {
        self.source_id == node_id || self.target_id == node_id
    }
}

/// Result of one valuation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkValue {
    /// Σ effectiveValue² over every node on its own
    pub standalone_value: f64,
    /// Σ group values after connectivity bonuses
    pub connected_value: f64,
    /// connected / standalone, or 1 without a baseline
    pub multiplier: f64,
}

impl NetworkValue {
    /// `{0, 0, 1}`, the result for an empty network
    pub const NEUTRAL: NetworkValue = NetworkValue {
        standalone_value: 0.0,
        connected_value: 0.0,
        multiplier: 1.0,
    };

    /// Totals are saturated to `f64::MAX`, so the multiplier stays finite
    /// even for inputs whose squares overflow.
    pub fn from_totals(standalone_value: f64, connected_value: f64) -> Self {
        let standalone_value = saturate(standalone_value);
        let connected_value = saturate(connected_value);
        let multiplier = if standalone_value > 0.0 {
            saturate(connected_value / standalone_value)
        } else {
            1.0
        };
        Self {
            standalone_value,
            connected_value,
            multiplier,
        }
    }

    /// Whether connecting nodes added value over the standalone baseline
    pub fn network_effect(&self) -> bool {
        self.multiplier > 1.0
    }
}

impl Default for NetworkValue {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

/// A complete network snapshot as stored or shared
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FlowState {
    /// Optional canvas name (absent in older data)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub nodes: Vec<Node>,
    pub connections: Vec<Connection>,
}
