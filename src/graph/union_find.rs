// Connectivity grouping for network valuation
//
// Partitions the nodes of a snapshot into connected groups. Connections are
// undirected here: source/target labels only matter to the presentation layer.
//
// INPUT TOLERANCE:
// Grouping never fails. Connections that reference unknown node ids (dangling)
// or join a node to itself (self-loops) are skipped. When a node id appears
// more than once, the first occurrence wins and later ones are ignored.

use rustc_hash::FxHashMap;
use tracing::{debug, trace, warn};

use crate::models::{Connection, Node};

// ============================================================================
// DISJOINT-SET UNION
// ============================================================================
//
// Every node starts in its own set. Each connection merges the sets of its two
// endpoints. After all connections are processed, nodes that share a root are
// mutually reachable.
//
// Example:
//   A - B, B - C, D  ->  {A, B, C}, {D}
//
// Path halving in `find` plus union by rank keeps every operation close to
// O(α(N)), so grouping is near-linear in N + M.
// ============================================================================

/// Call-scoped disjoint-set forest over node indices `0..n`.
#[derive(Debug, Clone)]
pub struct UnionFind {
    parent: Vec<usize>,
    rank: Vec<u8>,
}

impl UnionFind {
    /// Create `n` singleton sets.
    pub fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            rank: vec![0; n],
        }
    }

    pub fn len(&self) -> usize {
        self.parent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Root of the set containing `x`.
    pub fn find(&mut self, mut x: usize) -> usize {
        while self.parent[x] != x {
            // Path halving: point x at its grandparent as we walk up
            self.parent[x] = self.parent[self.parent[x]];
            x = self.parent[x];
        }
        x
    }

    /// Merge the sets containing `a` and `b`. Returns false if they were already joined.
    pub fn union(&mut self, a: usize, b: usize) -> bool {
        let root_a = self.find(a);
        let root_b = self.find(b);
        if root_a == root_b {
            return false;
        }

        match self.rank[root_a].cmp(&self.rank[root_b]) {
            std::cmp::Ordering::Less => self.parent[root_a] = root_b,
            std::cmp::Ordering::Greater => self.parent[root_b] = root_a,
            std::cmp::Ordering::Equal => {
                self.parent[root_b] = root_a;
                self.rank[root_a] += 1;
            }
        }
        true
    }

    /// All sets as index lists.
    ///
    /// Sets are ordered by their smallest member and members are ascending,
    /// so the output depends only on the partition, not on union order.
    pub fn groups(&mut self) -> Vec<Vec<usize>> {
        let n = self.len();
        let mut slot_of_root: Vec<Option<usize>> = vec![None; n];
        let mut groups: Vec<Vec<usize>> = Vec::new();

        for x in 0..n {
            let root = self.find(x);
            let slot = *slot_of_root[root].get_or_insert_with(|| {
                groups.push(Vec::new());
                groups.len() - 1
            });
            groups[slot].push(x);
        }

        groups
    }
}

// ============================================================================
// PARTITION OF A SNAPSHOT
// ============================================================================

/// Connected groups of a node snapshot.
///
/// Holds references to the unique input nodes (first occurrence of each id,
/// input order) and the groups as indices into that list.
#[derive(Debug, Clone)]
pub struct Partition<'a> {
    nodes: Vec<&'a Node>,
    index: FxHashMap<&'a str, usize>,
    groups: Vec<Vec<usize>>,
    group_of: Vec<usize>,
}

impl<'a> Partition<'a> {
    /// Group `nodes` by the undirected `connections` between them.
    pub fn build(nodes: &'a [Node], connections: &[Connection]) -> Self {
        let mut unique: Vec<&'a Node> = Vec::with_capacity(nodes.len());
        let mut index: FxHashMap<&'a str, usize> = FxHashMap::default();

        for node in nodes {
            if index.contains_key(node.id.as_str()) {
                warn!("Duplicate node id '{}' ignored (first occurrence wins)", node.id);
                continue;
            }
            index.insert(node.id.as_str(), unique.len());
            unique.push(node);
        }

        let mut uf = UnionFind::new(unique.len());
        for conn in connections {
            if conn.is_self_loop() {
                debug!("Skipping self-loop connection '{}' on '{}'", conn.id, conn.source_id);
                continue;
            }
            match (
                index.get(conn.source_id.as_str()),
                index.get(conn.target_id.as_str()),
            ) {
                (Some(&a), Some(&b)) => {
                    uf.union(a, b);
                }
                _ => debug!(
                    "Skipping dangling connection '{}' ({} -> {})",
                    conn.id, conn.source_id, conn.target_id
                ),
            }
        }

        let groups = uf.groups();
        let mut group_of = vec![0; unique.len()];
        for (g, members) in groups.iter().enumerate() {
            for &m in members {
                group_of[m] = g;
            }
        }
        trace!("Partitioned {} nodes into {} groups", unique.len(), groups.len());

        Self {
            nodes: unique,
            index,
            groups,
            group_of,
        }
    }

    /// Unique nodes in input order.
    pub fn nodes(&self) -> &[&'a Node] {
        &self.nodes
    }

    /// Groups as indices into `nodes()`.
    pub fn groups(&self) -> &[Vec<usize>] {
        &self.groups
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Group index of a node id, `None` for unknown ids.
    pub fn group_of(&self, node_id: &str) -> Option<usize> {
        self.index.get(node_id).map(|&i| self.group_of[i])
    }

    /// Group index that fully contains `conn`.
    ///
    /// `None` for dangling connections and self-loops. Because groups are
    /// maximal, both endpoints of any other connection share a group.
    pub fn group_containing(&self, conn: &Connection) -> Option<usize> {
        if conn.is_self_loop() {
            return None;
        }
        let source = self.group_of(&conn.source_id)?;
        let target = self.group_of(&conn.target_id)?;
        (source == target).then_some(source)
    }

    /// Groups as lists of node ids.
    pub fn id_groups(&self) -> Vec<Vec<String>> {
        self.groups
            .iter()
            .map(|members| members.iter().map(|&i| self.nodes[i].id.clone()).collect())
            .collect()
    }
}

/// Partition node ids into maximal connected groups.
///
/// Every id in `nodes` appears in exactly one group; isolated nodes form
/// singleton groups. Groups are ordered by the first appearance of any member
/// in `nodes`, and members keep input order. Empty input gives empty output.
pub fn compute_connected_groups(nodes: &[Node], connections: &[Connection]) -> Vec<Vec<String>> {
    if nodes.is_empty() {
        return vec![];
    }
    Partition::build(nodes, connections).id_groups()
}
