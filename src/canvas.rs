//! Editable network canvas
//!
//! Owns a `FlowState` and enforces the editing rules: node ids are unique,
//! a node cannot connect to itself, a pair of nodes is connected at most once
//! (in either direction), and removing a node removes its connections.
//!
//! Canvases load from JSON or TOML. Data saved before `activeRate` and
//! `synergy` existed loads with their defaults.

use rustc_hash::FxHashSet;
use std::path::Path;
use tracing::{debug, warn};

use crate::config::has_extension;
use crate::error::{MetcalfeError, Result};
use crate::models::{
    Connection, FlowState, IntegrationLevel, NetworkValue, Node, NodeInput, Position, SynergyLevel,
};
use crate::valuation::{NetworkValueEngine, ValuationBreakdown};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Canvas {
    state: FlowState,
    next_id: u64,
}

impl Canvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(name: impl Into<String>) -> Self {
        Self {
            state: FlowState {
                name: Some(name.into()),
                ..Default::default()
            },
            next_id: 0,
        }
    }

    /// Wrap an existing snapshot.
    ///
    /// Rejects duplicate node or connection ids. Connections to unknown
    /// nodes are kept (the engine ignores them) but logged.
    pub fn from_state(state: FlowState) -> Result<Self> {
        let mut seen: FxHashSet<&str> = FxHashSet::default();
        for node in &state.nodes {
            if !seen.insert(node.id.as_str()) {
                return Err(MetcalfeError::InvalidCanvas(format!(
                    "duplicate node id '{}'",
                    node.id
                )));
            }
        }
        let mut conn_ids: FxHashSet<&str> = FxHashSet::default();
        for conn in &state.connections {
            if !conn_ids.insert(conn.id.as_str()) {
                return Err(MetcalfeError::InvalidCanvas(format!(
                    "duplicate connection id '{}'",
                    conn.id
                )));
            }
            if !seen.contains(conn.source_id.as_str()) || !seen.contains(conn.target_id.as_str()) {
                warn!(
                    "Connection '{}' references a missing node ({} -> {})",
                    conn.id, conn.source_id, conn.target_id
                );
            }
        }

        Ok(Self { state, next_id: 0 })
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        Self::from_state(serde_json::from_str(content)?)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Self::from_state(toml::from_str(content)?)
    }

    /// Load a canvas file. `.toml` is parsed as TOML, anything else as JSON.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let canvas = if has_extension(path, "toml") {
            Self::from_toml_str(&content)?
        } else {
            Self::from_json_str(&content)?
        };
        debug!(
            "Loaded canvas from {} ({} nodes, {} connections)",
            path.display(),
            canvas.state.nodes.len(),
            canvas.state.connections.len()
        );
        Ok(canvas)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.state)?)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_json_pretty()?)?;
        Ok(())
    }

    pub fn name(&self) -> Option<&str> {
        self.state.name.as_deref()
    }

    pub fn state(&self) -> &FlowState {
        &self.state
    }

    pub fn into_state(self) -> FlowState {
        self.state
    }

    pub fn nodes(&self) -> &[Node] {
        &self.state.nodes
    }

    pub fn connections(&self) -> &[Connection] {
        &self.state.connections
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.state.nodes.iter().find(|n| n.id == id)
    }

    pub fn connection(&self, id: &str) -> Option<&Connection> {
        self.state.connections.iter().find(|c| c.id == id)
    }

    // ------------------------------------------------------------------------
    // Nodes
    // ------------------------------------------------------------------------

    /// Add a node with a generated id and return the id.
    pub fn add_node(&mut self, input: NodeInput) -> String {
        let id = self.generate_id("node");
        self.state.nodes.push(Node {
            id: id.clone(),
            name: input.name,
            icon: input.icon,
            color: input.color,
            position: input.position,
            value: input.value,
            value_label: input.value_label,
            active_rate: input.active_rate,
        });
        id
    }

    /// Add a node that carries its own id.
    pub fn insert_node(&mut self, node: Node) -> Result<()> {
        if self.node(&node.id).is_some() {
            return Err(MetcalfeError::DuplicateNode(node.id));
        }
        self.state.nodes.push(node);
        Ok(())
    }

    pub fn set_node_value(&mut self, id: &str, value: f64) -> Result<()> {
        self.node_mut(id)?.value = value;
        Ok(())
    }

    pub fn set_node_active_rate(&mut self, id: &str, active_rate: f64) -> Result<()> {
        self.node_mut(id)?.active_rate = active_rate;
        Ok(())
    }

    pub fn move_node(&mut self, id: &str, position: Position) -> Result<()> {
        self.node_mut(id)?.position = position;
        Ok(())
    }

    /// Remove a node together with every connection touching it.
    pub fn remove_node(&mut self, id: &str) -> Result<Node> {
        let pos = self
            .state
            .nodes
            .iter()
            .position(|n| n.id == id)
            .ok_or_else(|| MetcalfeError::NodeNotFound(id.to_string()))?;
        let node = self.state.nodes.remove(pos);
        self.state.connections.retain(|c| !c.touches(id));
        Ok(node)
    }

    // ------------------------------------------------------------------------
    // Connections
    // ------------------------------------------------------------------------

    /// Connect two nodes with `standard` synergy and return the connection id.
    pub fn connect(&mut self, source_id: &str, target_id: &str) -> Result<String> {
        self.connect_with(source_id, target_id, SynergyLevel::default())
    }

    pub fn connect_with(
        &mut self,
        source_id: &str,
        target_id: &str,
        synergy: SynergyLevel,
    ) -> Result<String> {
        if source_id == target_id {
            return Err(MetcalfeError::SelfConnection(source_id.to_string()));
        }
        for id in [source_id, target_id] {
            if self.node(id).is_none() {
                return Err(MetcalfeError::NodeNotFound(id.to_string()));
            }
        }
        if self
            .state
            .connections
            .iter()
            .any(|c| c.links(source_id, target_id))
        {
            return Err(MetcalfeError::DuplicateConnection {
                source_id: source_id.to_string(),
                target_id: target_id.to_string(),
            });
        }

        let id = self.generate_id("conn");
        self.state
            .connections
            .push(Connection::new(id.clone(), source_id, target_id, synergy));
        Ok(id)
    }

    pub fn set_synergy(&mut self, connection_id: &str, synergy: SynergyLevel) -> Result<()> {
        let conn = self
            .state
            .connections
            .iter_mut()
            .find(|c| c.id == connection_id)
            .ok_or_else(|| MetcalfeError::ConnectionNotFound(connection_id.to_string()))?;
        conn.synergy = synergy;
        Ok(())
    }

    pub fn remove_connection(&mut self, connection_id: &str) -> Result<Connection> {
        let pos = self
            .state
            .connections
            .iter()
            .position(|c| c.id == connection_id)
            .ok_or_else(|| MetcalfeError::ConnectionNotFound(connection_id.to_string()))?;
        Ok(self.state.connections.remove(pos))
    }

    /// Remove every node and connection. The canvas name is kept.
    pub fn clear(&mut self) {
        self.state.nodes.clear();
        self.state.connections.clear();
    }

    // ------------------------------------------------------------------------
    // Valuation
    // ------------------------------------------------------------------------

    pub fn value(&self, engine: &NetworkValueEngine, integration: IntegrationLevel) -> NetworkValue {
        engine.value(&self.state.nodes, &self.state.connections, integration)
    }

    pub fn breakdown(
        &self,
        engine: &NetworkValueEngine,
        integration: IntegrationLevel,
    ) -> ValuationBreakdown {
        engine.breakdown(&self.state.nodes, &self.state.connections, integration)
    }

    fn node_mut(&mut self, id: &str) -> Result<&mut Node> {
        self.state
            .nodes
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or_else(|| MetcalfeError::NodeNotFound(id.to_string()))
    }

    /// Next `{prefix}-{n}` not used by any node or connection
    fn generate_id(&mut self, prefix: &str) -> String {
        loop {
            self.next_id += 1;
            let id = format!("{}-{}", prefix, self.next_id);
            let taken = self.state.nodes.iter().any(|n| n.id == id)
                || self.state.connections.iter().any(|c| c.id == id);
            if !taken {
                return id;
            }
        }
    }
}
