//! Text (terminal) reporter with colors and formatting

use super::{CompareReport, GroupsReport, Report, StatsReport, ValueReport};
use crate::format::{format_multiplier, format_number, format_value};
use crate::valuation::GroupValuation;

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const GREEN: &str = "\x1b[32m";
const CYAN: &str = "\x1b[36m";

const RULE: &str = "──────────────────────────────────────";

/// Render report as formatted terminal output
pub fn render(report: &Report) -> String {
    match report {
        Report::Value(r) => render_value(r),
        Report::Groups(r) => render_groups(r),
        Report::Compare(r) => render_compare(r),
        Report::Stats(r) => render_stats(r),
    }
}

fn header(out: &mut String, title: &str, name: Option<&str>) {
    match name {
        Some(name) => out.push_str(&format!("\n{BOLD}{title}{RESET}  {DIM}{name}{RESET}\n")),
        None => out.push_str(&format!("\n{BOLD}{title}{RESET}\n")),
    }
    out.push_str(&format!("{DIM}{RULE}{RESET}\n"));
}

/// Multiplier highlighted in green when connecting adds value
fn multiplier_cell(multiplier: f64) -> String {
    let color = if multiplier > 1.0 { GREEN } else { DIM };
    format!("{color}{BOLD}{}{RESET}", format_multiplier(multiplier))
}

fn render_value(r: &ValueReport) -> String {
    let mut out = String::new();
    header(&mut out, "Network Value", r.name.as_deref());

    out.push_str(&format!(
        "Integration: {CYAN}{}{RESET} {DIM}({}){RESET}\n",
        r.integration,
        r.integration.description()
    ));
    out.push_str(&format!(
        "Standalone:  {}\n",
        format_value(r.value.standalone_value)
    ));
    out.push_str(&format!(
        "Connected:   {BOLD}{}{RESET}\n",
        format_value(r.value.connected_value)
    ));
    out.push_str(&format!(
        "Multiplier:  {}\n",
        multiplier_cell(r.value.multiplier)
    ));

    if let Some(groups) = &r.groups {
        out.push_str(&format!("\n{BOLD}GROUPS{RESET} ({})\n", groups.len()));
        push_group_table(&mut out, groups);
    }

    if !r.value.network_effect() {
        out.push_str(&format!(
            "\n{DIM}No network effect yet. Connect nodes to see the multiplier grow.{RESET}\n"
        ));
    }
    out
}

fn render_groups(r: &GroupsReport) -> String {
    let mut out = String::new();
    header(&mut out, "Connected Groups", r.name.as_deref());
    out.push_str(&format!(
        "{} group(s) at {CYAN}{}{RESET} integration\n\n",
        r.groups.len(),
        r.integration
    ));
    push_group_table(&mut out, &r.groups);
    out
}

fn push_group_table(out: &mut String, groups: &[GroupValuation]) {
    if groups.is_empty() {
        out.push_str(&format!("  {DIM}(no nodes){RESET}\n"));
        return;
    }
    out.push_str(&format!(
        "{DIM}  #   NODES  LINKS  ACTIVE    SYNERGY  VALUE{RESET}\n"
    ));
    for (i, g) in groups.iter().enumerate() {
        let synergy = if g.is_connected() {
            format!("{:.2}", g.avg_synergy)
        } else {
            "-".to_string()
        };
        out.push_str(&format!(
            "  {DIM}{:>3}{RESET} {:>6} {:>6}  {:<8}  {:<7}  {BOLD}{}{RESET}\n",
            i + 1,
            g.node_ids.len(),
            g.connection_count,
            format_number(g.total_effective),
            synergy,
            format_value(g.value)
        ));
        out.push_str(&format!("      {DIM}{}{RESET}\n", g.node_ids.join(", ")));
    }
}

fn render_compare(r: &CompareReport) -> String {
    let mut out = String::new();
    header(&mut out, "Integration Levels", r.name.as_deref());
    out.push_str(&format!(
        "{DIM}  LEVEL      COEF  CONNECTED   MULTIPLIER{RESET}\n"
    ));
    for row in &r.levels {
        out.push_str(&format!(
            "  {:<9} {:>5.1}  {:<10}  {}\n",
            row.integration.as_str(),
            row.coefficient,
            format_value(row.value.connected_value),
            multiplier_cell(row.value.multiplier)
        ));
    }
    out
}

fn render_stats(r: &StatsReport) -> String {
    let s = &r.stats;
    let mut out = String::new();
    header(&mut out, "Network Statistics", r.name.as_deref());
    out.push_str(&format!("  Nodes:          {BOLD}{}{RESET}\n", s.node_count));
    out.push_str(&format!(
        "  Connections:    {BOLD}{}{RESET} {DIM}({} distinct pairs){RESET}\n",
        s.connection_count, s.linked_pairs
    ));
    out.push_str(&format!("  Groups:         {BOLD}{}{RESET}\n", s.group_count));
    out.push_str(&format!("  Largest group:  {}\n", s.largest_group));
    out.push_str(&format!("  Isolated nodes: {}\n", s.isolated_nodes));
    out.push_str(&format!("  Density:        {:.3}\n", s.density));
    out.push_str(&format!("  Avg degree:     {:.2}\n", s.average_degree));
    if let Some(hub) = &s.hub {
        out.push_str(&format!(
            "  Hub:            {CYAN}{}{RESET} {DIM}({} links){RESET}\n",
            hub.name, hub.degree
        ));
    }

    let skipped = s.dangling_connections + s.self_loops + s.duplicate_node_ids;
    if skipped > 0 {
        out.push_str(&format!(
            "\n{DIM}Ignored: {} dangling connection(s), {} self-loop(s), {} duplicate node id(s){RESET}\n",
            s.dangling_connections, s.self_loops, s.duplicate_node_ids
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::network_stats;
    use crate::models::{Connection, IntegrationLevel, Node, SynergyLevel};
    use crate::reporters::tests::test_breakdown;
    use crate::valuation::NetworkValueEngine;

    #[test]
    fn test_value_text() {
        let report = Report::Value(ValueReport::new(Some("demo".into()), test_breakdown(), true));
        let out = render(&report);
        assert!(out.contains("Network Value"));
        assert!(out.contains("demo"));
        assert!(out.contains("30.0K"));
        assert!(out.contains("100.0K"));
        assert!(out.contains("3.3x"));
        assert!(out.contains("a, b"));
        assert!(!out.contains("No network effect"));
    }

    #[test]
    fn test_value_text_without_effect() {
        let nodes = vec![Node::new("a", 100.0, 1.0)];
        let breakdown = NetworkValueEngine::default().breakdown(&nodes, &[], IntegrationLevel::Simple);
        let out = render(&Report::Value(ValueReport::new(None, breakdown, false)));
        assert!(out.contains("1.0x"));
        assert!(out.contains("No network effect"));
        assert!(!out.contains("GROUPS"));
    }

    #[test]
    fn test_compare_text_lists_every_level() {
        let nodes = vec![Node::new("a", 100.0, 1.0), Node::new("b", 100.0, 1.0)];
        let conns = vec![Connection::new("c1", "a", "b", SynergyLevel::Standard)];
        let levels = NetworkValueEngine::default().compare_levels(&nodes, &conns);
        let out = render(&Report::Compare(CompareReport { name: None, levels }));
        for level in IntegrationLevel::ALL {
            assert!(out.contains(level.as_str()));
        }
        assert!(out.contains("2.0x"));
        assert!(out.contains("3.0x"));
    }

    #[test]
    fn test_stats_text_mentions_ignored_input() {
        let nodes = vec![Node::new("a", 1.0, 1.0), Node::new("b", 1.0, 1.0)];
        let conns = vec![
            Connection::new("c1", "a", "b", SynergyLevel::Standard),
            Connection::new("c2", "a", "ghost", SynergyLevel::Standard),
        ];
        let stats = network_stats(&nodes, &conns);
        let out = render(&Report::Stats(StatsReport { name: None, stats }));
        assert!(out.contains("Network Statistics"));
        assert!(out.contains("1 dangling connection(s)"));
    }
}
