//! Graph layer: connectivity grouping and structural statistics

mod topology;
mod union_find;

pub use topology::{network_stats, HubNode, NetworkStats};
pub use union_find::{compute_connected_groups, Partition, UnionFind};
