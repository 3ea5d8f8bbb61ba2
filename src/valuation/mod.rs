//! Extended Metcalfe's Law valuation
//!
//! Classic Metcalfe's Law values a network by the square of its participants.
//! This module extends it with per-node activity, per-connection synergy and
//! a global integration level.
//!
//! # Valuation Formula
//!
//! ```text
//! effective(node)   = value × activeRate
//! Standalone Value  = Σ effective(node)²              over every node
//! Connected Value   = Σ groupValue                    over connected groups
//!
//! groupValue = (Σ effective)² × avgSynergy × integration   if the group has connections
//! groupValue = (Σ effective)²                              otherwise
//!
//! Multiplier = Connected / Standalone   (1 when Standalone is 0)
//! ```
//!
//! `avgSynergy` is the mean synergy coefficient over the connections inside
//! the group, each connection counted once.
//!
//! # Example
//!
//! Two nodes of 100 active users joined by one `excellent` connection at
//! `full` integration:
//!
//! - Standalone = 100² + 100² = 20,000
//! - Connected = 200² × 1.5 × 1.5 = 90,000
//! - Multiplier = 4.5

mod engine;

pub use engine::{
    compute_network_value, GroupValuation, LevelComparison, NetworkValueEngine, Scenario,
    ValuationBreakdown,
};
