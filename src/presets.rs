//! Built-in example networks
//!
//! Four real-world networks with published user counts, useful as a
//! starting canvas or for trying the CLI without writing a file.

use serde::Serialize;

use crate::error::{MetcalfeError, Result};
use crate::models::{Connection, FlowState, Node, Position, SynergyLevel};

use SynergyLevel::{Excellent, Good, Standard};

/// A named, ready-to-value canvas
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Preset {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub data: FlowState,
}

struct NodeSpec {
    id: &'static str,
    name: &'static str,
    icon: &'static str,
    color: &'static str,
    at: (f64, f64),
    value: f64,
    label: &'static str,
    active_rate: f64,
}

impl NodeSpec {
    fn build(&self) -> Node {
        Node {
            id: self.id.to_string(),
            name: self.name.to_string(),
            icon: self.icon.to_string(),
            color: self.color.to_string(),
            position: Position::new(self.at.0, self.at.1),
            value: self.value,
            value_label: self.label.to_string(),
            active_rate: self.active_rate,
        }
    }
}

fn flow(name: &str, nodes: &[NodeSpec], links: &[(&str, &str, SynergyLevel)]) -> FlowState {
    FlowState {
        name: Some(name.to_string()),
        nodes: nodes.iter().map(NodeSpec::build).collect(),
        connections: links
            .iter()
            .enumerate()
            .map(|(i, &(a, b, synergy))| Connection::new(format!("c{}", i + 1), a, b, synergy))
            .collect(),
    }
}

/// Messaging app with groups, stickers and payments
pub fn line() -> Preset {
    #[rustfmt::skip]
    let nodes = [
        NodeSpec { id: "line-users", name: "Users", icon: "👥", color: "#06C755", at: (150.0, 200.0), value: 95_000_000.0, label: "Users", active_rate: 0.7 },
        NodeSpec { id: "line-groups", name: "Groups", icon: "💬", color: "#00B900", at: (450.0, 100.0), value: 50_000_000.0, label: "Groups", active_rate: 0.6 },
        NodeSpec { id: "line-stickers", name: "Stickers", icon: "🎨", color: "#FFE033", at: (450.0, 300.0), value: 1_000_000.0, label: "Creators", active_rate: 0.4 },
        NodeSpec { id: "line-pay", name: "LINE Pay", icon: "💳", color: "#1DB446", at: (700.0, 200.0), value: 40_000_000.0, label: "Registered", active_rate: 0.3 },
    ];
    let links = [
        ("line-users", "line-groups", Excellent),
        ("line-users", "line-stickers", Good),
        ("line-groups", "line-pay", Good),
        ("line-stickers", "line-pay", Standard),
    ];
    Preset {
        id: "line",
        name: "LINE",
        description: "Network effect of a messaging app",
        icon: "💬",
        data: flow("LINE", &nodes, &links),
    }
}

/// Two-sided flea market
pub fn mercari() -> Preset {
    #[rustfmt::skip]
    let nodes = [
        NodeSpec { id: "mercari-sellers", name: "Sellers", icon: "🏪", color: "#FF0211", at: (150.0, 150.0), value: 20_000_000.0, label: "Sellers", active_rate: 0.5 },
        NodeSpec { id: "mercari-buyers", name: "Buyers", icon: "🛍️", color: "#4A90D9", at: (150.0, 350.0), value: 23_000_000.0, label: "Buyers", active_rate: 0.6 },
        NodeSpec { id: "mercari-listings", name: "Listings", icon: "📦", color: "#FF6B6B", at: (450.0, 250.0), value: 2_500_000_000.0, label: "Total listings", active_rate: 0.8 },
        NodeSpec { id: "mercari-logistics", name: "Shipping", icon: "🚚", color: "#00C2B8", at: (700.0, 150.0), value: 170_000.0, label: "Drop-off points", active_rate: 0.9 },
        NodeSpec { id: "mercari-payment", name: "Merpay", icon: "💰", color: "#FF4655", at: (700.0, 350.0), value: 15_000_000.0, label: "Registered", active_rate: 0.4 },
    ];
    let links = [
        ("mercari-sellers", "mercari-listings", Excellent),
        ("mercari-buyers", "mercari-listings", Excellent),
        ("mercari-listings", "mercari-logistics", Good),
        ("mercari-listings", "mercari-payment", Good),
        ("mercari-sellers", "mercari-buyers", Excellent),
    ];
    Preset {
        id: "mercari",
        name: "Mercari",
        description: "Two-sided marketplace effect of a flea market app",
        icon: "🛒",
        data: flow("Mercari", &nodes, &links),
    }
}

/// Ride sharing plus food delivery
pub fn uber() -> Preset {
    #[rustfmt::skip]
    let nodes = [
        NodeSpec { id: "uber-drivers", name: "Drivers", icon: "🚘", color: "#000000", at: (150.0, 200.0), value: 5_000_000.0, label: "Drivers", active_rate: 0.6 },
        NodeSpec { id: "uber-riders", name: "Riders", icon: "🧑", color: "#276EF1", at: (450.0, 100.0), value: 130_000_000.0, label: "Users", active_rate: 0.4 },
        NodeSpec { id: "uber-eats", name: "Uber Eats", icon: "🍔", color: "#06C167", at: (450.0, 300.0), value: 900_000.0, label: "Merchants", active_rate: 0.7 },
        NodeSpec { id: "uber-merchants", name: "Restaurants", icon: "🍽️", color: "#FF5A5F", at: (700.0, 200.0), value: 900_000.0, label: "Merchants", active_rate: 0.65 },
    ];
    let links = [
        ("uber-drivers", "uber-riders", Excellent),
        ("uber-drivers", "uber-eats", Excellent),
        ("uber-riders", "uber-eats", Good),
        ("uber-eats", "uber-merchants", Excellent),
    ];
    Preset {
        id: "uber",
        name: "Uber",
        description: "Two-sided marketplace effect of ride sharing",
        icon: "🚗",
        data: flow("Uber", &nodes, &links),
    }
}

/// The textbook telephone network across four cities
pub fn phone() -> Preset {
    #[rustfmt::skip]
    let nodes = [
        NodeSpec { id: "phone-tokyo", name: "Tokyo", icon: "📍", color: "#E53935", at: (300.0, 150.0), value: 14_000_000.0, label: "Population", active_rate: 0.8 },
        NodeSpec { id: "phone-osaka", name: "Osaka", icon: "🏙️", color: "#1E88E5", at: (550.0, 150.0), value: 8_800_000.0, label: "Population", active_rate: 0.75 },
        NodeSpec { id: "phone-nagoya", name: "Nagoya", icon: "🌆", color: "#43A047", at: (300.0, 350.0), value: 2_300_000.0, label: "Population", active_rate: 0.7 },
        NodeSpec { id: "phone-fukuoka", name: "Fukuoka", icon: "🌉", color: "#FB8C00", at: (550.0, 350.0), value: 1_600_000.0, label: "Population", active_rate: 0.65 },
    ];
    let links = [
        ("phone-tokyo", "phone-osaka", Excellent),
        ("phone-tokyo", "phone-nagoya", Good),
        ("phone-osaka", "phone-nagoya", Good),
        ("phone-osaka", "phone-fukuoka", Good),
        ("phone-nagoya", "phone-fukuoka", Standard),
        ("phone-tokyo", "phone-fukuoka", Standard),
    ];
    Preset {
        id: "phone",
        name: "Telephone network",
        description: "The classic Metcalfe's Law example",
        icon: "📞",
        data: flow("Telephone network", &nodes, &links),
    }
}

/// Every preset in display order.
pub fn all() -> Vec<Preset> {
    vec![line(), mercari(), uber(), phone()]
}

/// Look up a preset by id (case-insensitive).
pub fn find(id: &str) -> Result<Preset> {
    let wanted = id.trim().to_lowercase();
    all()
        .into_iter()
        .find(|p| p.id == wanted)
        .ok_or_else(|| MetcalfeError::UnknownPreset(id.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::Canvas;
    use crate::models::IntegrationLevel;
    use crate::valuation::compute_network_value;

    #[test]
    fn test_ids_are_unique() {
        let ids: Vec<&str> = all().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec!["line", "mercari", "uber", "phone"]);
    }

    #[test]
    fn test_find() {
        assert_eq!(find("Uber").unwrap().id, "uber");
        assert!(matches!(
            find("myspace"),
            Err(MetcalfeError::UnknownPreset(id)) if id == "myspace"
        ));
    }

    #[test]
    fn test_presets_are_valid_canvases() {
        for preset in all() {
            let canvas = Canvas::from_state(preset.data.clone()).unwrap();
            for conn in canvas.connections() {
                assert!(canvas.node(&conn.source_id).is_some(), "{}", preset.id);
                assert!(canvas.node(&conn.target_id).is_some(), "{}", preset.id);
                assert!(!conn.is_self_loop());
            }
        }
    }

    #[test]
    fn test_presets_show_network_effect() {
        for preset in all() {
            let v = compute_network_value(
                &preset.data.nodes,
                &preset.data.connections,
                IntegrationLevel::Simple,
            );
            assert!(v.network_effect(), "{} multiplier {}", preset.id, v.multiplier);
        }
    }

    #[test]
    fn test_phone_is_one_group() {
        let p = phone();
        let groups = crate::graph::compute_connected_groups(&p.data.nodes, &p.data.connections);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].len(), 4);
    }
}
