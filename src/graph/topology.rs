//! Structural statistics over a network snapshot
//!
//! Builds an undirected petgraph view of the valid connections and reports
//! counts the presentation layer shows next to the valuation.

use petgraph::algo::connected_components;
use petgraph::graph::{NodeIndex, UnGraph};
use rustc_hash::FxHashMap;
use serde::Serialize;

use super::union_find::Partition;
use crate::models::{Connection, Node};

/// Shape of a snapshot
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkStats {
    pub node_count: usize,
    /// Connections between two distinct, known nodes
    pub connection_count: usize,
    /// Distinct undirected node pairs that are connected
    pub linked_pairs: usize,
    pub dangling_connections: usize,
    pub self_loops: usize,
    pub duplicate_node_ids: usize,
    pub group_count: usize,
    pub isolated_nodes: usize,
    pub largest_group: usize,
    /// linked_pairs / possible pairs, 0 for fewer than two nodes
    pub density: f64,
    pub average_degree: f64,
    /// Node with the most distinct neighbours, ties broken by input order
    pub hub: Option<HubNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HubNode {
    pub id: String,
    pub name: String,
    pub degree: usize,
}

/// Compute structural statistics for a snapshot.
pub fn network_stats(nodes: &[Node], connections: &[Connection]) -> NetworkStats {
    let partition = Partition::build(nodes, connections);
    let unique = partition.nodes();

    let mut graph: UnGraph<usize, ()> = UnGraph::with_capacity(unique.len(), connections.len());
    let mut index: FxHashMap<&str, NodeIndex> = FxHashMap::default();
    for (i, node) in unique.iter().enumerate() {
        index.insert(node.id.as_str(), graph.add_node(i));
    }

    let mut connection_count = 0;
    let mut dangling_connections = 0;
    let mut self_loops = 0;
    for conn in connections {
        if conn.is_self_loop() {
            self_loops += 1;
            continue;
        }
        match (
            index.get(conn.source_id.as_str()),
            index.get(conn.target_id.as_str()),
        ) {
            (Some(&a), Some(&b)) => {
                connection_count += 1;
                // update_edge keeps one edge per undirected pair
                graph.update_edge(a, b, ());
            }
            _ => dangling_connections += 1,
        }
    }

    let node_count = graph.node_count();
    let linked_pairs = graph.edge_count();

    let mut isolated_nodes = 0;
    let mut hub: Option<HubNode> = None;
    for idx in graph.node_indices() {
        let degree = graph.neighbors(idx).count();
        if degree == 0 {
            isolated_nodes += 1;
            continue;
        }
        if hub.as_ref().map_or(true, |h| degree > h.degree) {
            let node = unique[graph[idx]];
            hub = Some(HubNode {
                id: node.id.clone(),
                name: node.name.clone(),
                degree,
            });
        }
    }

    let possible_pairs = node_count.saturating_sub(1) * node_count / 2;
    let density = if possible_pairs > 0 {
        linked_pairs as f64 / possible_pairs as f64
    } else {
        0.0
    };
    let average_degree = if node_count > 0 {
        2.0 * linked_pairs as f64 / node_count as f64
    } else {
        0.0
    };

    let group_count = connected_components(&graph);
    debug_assert_eq!(group_count, partition.group_count());

    NetworkStats {
        node_count,
        connection_count,
        linked_pairs,
        dangling_connections,
        self_loops,
        duplicate_node_ids: nodes.len() - node_count,
        group_count,
        isolated_nodes,
        largest_group: partition.groups().iter().map(Vec::len).max().unwrap_or(0),
        density,
        average_degree,
        hub,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SynergyLevel;

    fn nodes(ids: &[&str]) -> Vec<Node> {
        ids.iter().map(|id| Node::new(*id, 10.0, 1.0)).collect()
    }

    fn conn(id: &str, a: &str, b: &str) -> Connection {
        Connection::new(id, a, b, SynergyLevel::Good)
    }

    #[test]
    fn test_empty_stats() {
        let stats = network_stats(&[], &[]);
        assert_eq!(stats.node_count, 0);
        assert_eq!(stats.group_count, 0);
        assert_eq!(stats.largest_group, 0);
        assert_eq!(stats.density, 0.0);
        assert_eq!(stats.average_degree, 0.0);
        assert!(stats.hub.is_none());
    }

    #[test]
    fn test_triangle_plus_isolated() {
        let stats = network_stats(
            &nodes(&["a", "b", "c", "d"]),
            &[conn("c1", "a", "b"), conn("c2", "b", "c"), conn("c3", "c", "a")],
        );
        assert_eq!(stats.node_count, 4);
        assert_eq!(stats.connection_count, 3);
        assert_eq!(stats.linked_pairs, 3);
        assert_eq!(stats.group_count, 2);
        assert_eq!(stats.isolated_nodes, 1);
        assert_eq!(stats.largest_group, 3);
        assert!((stats.density - 0.5).abs() < 1e-9);
        assert!((stats.average_degree - 1.5).abs() < 1e-9);
        let hub = stats.hub.unwrap();
        assert_eq!(hub.id, "a");
        assert_eq!(hub.degree, 2);
    }

    #[test]
    fn test_invalid_connections_are_counted_separately() {
        let mut ns = nodes(&["a", "b"]);
        ns.push(Node::new("a", 1.0, 1.0));
        let stats = network_stats(
            &ns,
            &[
                conn("c1", "a", "b"),
                conn("c2", "b", "a"),
                conn("c3", "a", "a"),
                conn("c4", "a", "ghost"),
            ],
        );
        assert_eq!(stats.node_count, 2);
        assert_eq!(stats.duplicate_node_ids, 1);
        assert_eq!(stats.connection_count, 2);
        assert_eq!(stats.linked_pairs, 1);
        assert_eq!(stats.self_loops, 1);
        assert_eq!(stats.dangling_connections, 1);
        assert_eq!(stats.group_count, 1);
        assert!((stats.density - 1.0).abs() < 1e-9);
    }
}
