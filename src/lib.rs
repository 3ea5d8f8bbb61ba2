//! Metcalfe - network value engine
//!
//! Values a network of services or user groups with an extended form of
//! Metcalfe's Law. Nodes are grouped by connectivity, each group is valued as
//! the square of its active users weighted by connection synergy and
//! integration depth, and the result is compared with the nodes standing
//! alone.
//!
//! ```
//! use metcalfe::{compute_network_value, Connection, IntegrationLevel, Node, SynergyLevel};
//!
//! let nodes = vec![Node::new("chat", 100.0, 1.0), Node::new("pay", 100.0, 1.0)];
//! let connections = vec![Connection::new("c1", "chat", "pay", SynergyLevel::Excellent)];
//!
//! let value = compute_network_value(&nodes, &connections, IntegrationLevel::Full);
//! assert_eq!(value.standalone_value, 20_000.0);
//! assert_eq!(value.connected_value, 90_000.0);
//! assert_eq!(value.multiplier, 4.5);
//! ```

pub mod canvas;
pub mod config;
pub mod error;
pub mod format;
pub mod graph;
pub mod models;
pub mod presets;
pub mod reporters;
pub mod valuation;

pub use canvas::Canvas;
pub use config::Coefficients;
pub use error::{MetcalfeError, Result};
pub use graph::{compute_connected_groups, network_stats, NetworkStats};
pub use models::{
    Connection, FlowState, IntegrationLevel, NetworkValue, Node, NodeInput, Position,
    SynergyLevel,
};
pub use valuation::{compute_network_value, NetworkValueEngine, ValuationBreakdown};
