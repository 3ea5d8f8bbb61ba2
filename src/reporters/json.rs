//! JSON reporter
//!
//! Outputs a report as pretty-printed JSON with camelCase field names,
//! matching the canvas file format.

use super::Report;
use crate::error::Result;

/// Render report as JSON
pub fn render(report: &Report) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::network_stats;
    use crate::models::Node;
    use crate::reporters::tests::test_breakdown;
    use crate::reporters::{StatsReport, ValueReport};

    #[test]
    fn test_value_render_is_flat() {
        let report = Report::Value(ValueReport::new(Some("demo".into()), test_breakdown(), false));
        let json_str = render(&report).expect("render JSON");
        let parsed: serde_json::Value = serde_json::from_str(&json_str).expect("parse JSON");
        assert_eq!(parsed["name"], "demo");
        assert_eq!(parsed["integration"], "full");
        assert_eq!(parsed["standaloneValue"], 30_000.0);
        assert_eq!(parsed["connectedValue"], 100_000.0);
        assert!(parsed.get("groups").is_none());
    }

    #[test]
    fn test_explained_value_lists_groups() {
        let report = Report::Value(ValueReport::new(None, test_breakdown(), true));
        let parsed: serde_json::Value =
            serde_json::from_str(&render(&report).expect("render JSON")).expect("parse JSON");
        let groups = parsed["groups"].as_array().expect("groups array");
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0]["nodeIds"], serde_json::json!(["a", "b"]));
        assert_eq!(groups[0]["connectionCount"], 1);
        assert!(parsed.get("name").is_none());
    }

    #[test]
    fn test_stats_render() {
        let stats = network_stats(&[Node::new("a", 1.0, 1.0)], &[]);
        let report = Report::Stats(StatsReport { name: None, stats });
        let json_str = render(&report).expect("render JSON");
        let parsed: serde_json::Value = serde_json::from_str(&json_str).expect("parse JSON");
        assert_eq!(parsed["nodeCount"], 1);
        assert_eq!(parsed["hub"], serde_json::Value::Null);
    }
}
