//! Network value engine
//!
//! Pure functions over an immutable snapshot. The engine holds only its
//! coefficient tables, so one instance can be shared freely across threads.

use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, trace};

use crate::config::Coefficients;
use crate::graph::Partition;
use crate::models::{saturate, Connection, IntegrationLevel, NetworkValue, Node};

/// Valuation of one connected group
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupValuation {
    pub node_ids: Vec<String>,
    /// Σ effective value of the members
    pub total_effective: f64,
    /// Connections with both endpoints in the group
    pub connection_count: usize,
    /// Mean synergy coefficient, 1.0 without connections
    pub avg_synergy: f64,
    /// Integration coefficient applied, 1.0 for unconnected groups
    pub integration_coefficient: f64,
    pub value: f64,
}

impl GroupValuation {
    /// True if the group received the synergy and integration bonus
    pub fn is_connected(&self) -> bool {
        self.connection_count > 0
    }
}

/// Full valuation with one entry per connected group
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValuationBreakdown {
    pub integration: IntegrationLevel,
    pub groups: Vec<GroupValuation>,
    #[serde(flatten)]
    pub value: NetworkValue,
}

/// Valuation of the same snapshot at one integration level
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelComparison {
    pub integration: IntegrationLevel,
    pub coefficient: f64,
    #[serde(flatten)]
    pub value: NetworkValue,
}

/// One independent input for `NetworkValueEngine::value_batch`
#[derive(Debug, Clone, Copy)]
pub struct Scenario<'a> {
    pub nodes: &'a [Node],
    pub connections: &'a [Connection],
    pub integration: IntegrationLevel,
}

/// Running totals for one group before the formula is applied
#[derive(Debug, Default)]
struct GroupTotals {
    effective: Vec<f64>,
    synergy: Vec<f64>,
}

impl GroupTotals {
    /// Apply the group formula.
    ///
    /// Connected: (Σ effective)² × mean synergy × integration.
    /// Unconnected: (Σ effective)², with no synergy and no integration bonus
    /// even when the integration coefficient is not 1.
    fn finish(self, integration_coefficient: f64, node_ids: Vec<String>) -> GroupValuation {
        let total_effective = stable_sum(self.effective);
        let connection_count = self.synergy.len();
        let base = saturate(total_effective * total_effective);

        let (avg_synergy, integration_coefficient, value) = if connection_count > 0 {
            let avg = stable_sum(self.synergy) / connection_count as f64;
            (avg, integration_coefficient, saturate(base * avg * integration_coefficient))
        } else {
            (1.0, 1.0, base)
        };

        GroupValuation {
            node_ids,
            total_effective,
            connection_count,
            avg_synergy,
            integration_coefficient,
            value,
        }
    }
}

/// Sum independent of input order.
///
/// Terms are added in ascending order so permuting the snapshot yields
/// bit-identical totals. Overflow saturates at `f64::MAX`.
fn stable_sum(mut values: Vec<f64>) -> f64 {
    values.sort_by(f64::total_cmp);
    saturate(values.into_iter().sum())
}

/// Extended Metcalfe valuation over nodes, connections and an integration level
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NetworkValueEngine {
    coefficients: Coefficients,
}

impl NetworkValueEngine {
    pub fn new(coefficients: Coefficients) -> Self {
        Self { coefficients }
    }

    pub fn coefficients(&self) -> &Coefficients {
        &self.coefficients
    }

    /// Standalone value, connected value and multiplier.
    pub fn value(
        &self,
        nodes: &[Node],
        connections: &[Connection],
        integration: IntegrationLevel,
    ) -> NetworkValue {
        self.breakdown(nodes, connections, integration).value
    }

    /// Valuation with every group's intermediate figures.
    pub fn breakdown(
        &self,
        nodes: &[Node],
        connections: &[Connection],
        integration: IntegrationLevel,
    ) -> ValuationBreakdown {
        if nodes.is_empty() {
            return ValuationBreakdown {
                integration,
                groups: vec![],
                value: NetworkValue::NEUTRAL,
            };
        }

        let integration_coefficient = self.coefficients.integration(integration);
        let partition = Partition::build(nodes, connections);
        let unique = partition.nodes();

        for node in unique.iter().filter(|n| n.is_degenerate()) {
            debug!(
                "Node '{}' has out-of-range input (value={}, activeRate={}); clamped",
                node.id, node.value, node.active_rate
            );
        }

        // 1. Standalone: every node on its own
        let standalone_value = stable_sum(
            unique
                .iter()
                .map(|n| {
                    let e = n.effective_value();
                    saturate(e * e)
                })
                .collect(),
        );

        // 2. Per-group effective values
        let mut totals: Vec<GroupTotals> = partition
            .groups()
            .iter()
            .map(|members| GroupTotals {
                effective: members.iter().map(|&i| unique[i].effective_value()).collect(),
                synergy: Vec::new(),
            })
            .collect();

        // 3. Intra-group connections by membership of both endpoints
        for conn in connections {
            if let Some(g) = partition.group_containing(conn) {
                totals[g].synergy.push(self.coefficients.synergy(conn.synergy));
            }
        }

        // 4. Group values
        let groups: Vec<GroupValuation> = totals
            .into_iter()
            .zip(partition.id_groups())
            .map(|(t, ids)| t.finish(integration_coefficient, ids))
            .collect();

        let connected_value = stable_sum(groups.iter().map(|g| g.value).collect());
        let value = NetworkValue::from_totals(standalone_value, connected_value);
        trace!(
            "Valued {} nodes in {} groups at {}: {:?}",
            unique.len(),
            groups.len(),
            integration,
            value
        );

        ValuationBreakdown {
            integration,
            groups,
            value,
        }
    }

    /// Value a single group given as a list of node ids.
    ///
    /// Node ids are looked up in `nodes` (first occurrence wins, unknown ids
    /// contribute nothing). Connections count when both endpoints are members
    /// of the group.
    pub fn value_group(
        &self,
        group: &[String],
        nodes: &[Node],
        connections: &[Connection],
        integration: IntegrationLevel,
    ) -> GroupValuation {
        let is_member = |id: &str| group.iter().any(|m| m == id);

        let effective = group
            .iter()
            .filter_map(|id| nodes.iter().find(|n| &n.id == id))
            .map(Node::effective_value)
            .collect();
        let synergy = connections
            .iter()
            .filter(|c| !c.is_self_loop() && is_member(&c.source_id) && is_member(&c.target_id))
            .map(|c| self.coefficients.synergy(c.synergy))
            .collect();

        GroupTotals { effective, synergy }
            .finish(self.coefficients.integration(integration), group.to_vec())
    }

    /// The same snapshot valued at every integration level.
    pub fn compare_levels(
        &self,
        nodes: &[Node],
        connections: &[Connection],
    ) -> Vec<LevelComparison> {
        IntegrationLevel::ALL
            .iter()
            .map(|&integration| LevelComparison {
                integration,
                coefficient: self.coefficients.integration(integration),
                value: self.value(nodes, connections, integration),
            })
            .collect()
    }

    /// Value independent scenarios in parallel. Output order matches input.
    pub fn value_batch(&self, scenarios: &[Scenario<'_>]) -> Vec<NetworkValue> {
        scenarios
            .par_iter()
            .map(|s| self.value(s.nodes, s.connections, s.integration))
            .collect()
    }
}

/// Value a snapshot with the default coefficient tables.
pub fn compute_network_value(
    nodes: &[Node],
    connections: &[Connection],
    integration: IntegrationLevel,
) -> NetworkValue {
    NetworkValueEngine::default().value(nodes, connections, integration)
}
