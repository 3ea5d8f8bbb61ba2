//! Preset commands - list and export the built-in networks

use anyhow::{Context, Result};
use console::style;
use serde::Serialize;
use std::path::Path;

use super::resolve_format;
use metcalfe::config::ProjectConfig;
use metcalfe::format::format_multiplier;
use metcalfe::models::IntegrationLevel;
use metcalfe::presets::{self, Preset};
use metcalfe::reporters::OutputFormat;
use metcalfe::{Canvas, NetworkValueEngine};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PresetSummary<'a> {
    id: &'a str,
    name: &'a str,
    description: &'a str,
    icon: &'a str,
    node_count: usize,
    connection_count: usize,
    /// Multiplier at `simple` integration
    multiplier: f64,
}

impl<'a> PresetSummary<'a> {
    fn new(preset: &'a Preset, engine: &NetworkValueEngine) -> Self {
        let value = engine.value(
            &preset.data.nodes,
            &preset.data.connections,
            IntegrationLevel::Simple,
        );
        Self {
            id: preset.id,
            name: preset.name,
            description: preset.description,
            icon: preset.icon,
            node_count: preset.data.nodes.len(),
            connection_count: preset.data.connections.len(),
            multiplier: value.multiplier,
        }
    }
}

/// Run the presets command
pub fn list(config: &ProjectConfig, format: Option<&str>) -> Result<()> {
    let engine = NetworkValueEngine::new(config.coefficients);
    let all = presets::all();
    let summaries: Vec<PresetSummary> = all.iter().map(|p| PresetSummary::new(p, &engine)).collect();

    match resolve_format(config, format)? {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summaries)?),
        OutputFormat::Text => {
            println!("\n{}\n", style("Built-in presets").bold());
            for s in &summaries {
                println!(
                    "  {} {:<8} {}  {}",
                    s.icon,
                    style(s.id).cyan(),
                    style(s.name).bold(),
                    style(s.description).dim()
                );
                println!(
                    "             {} nodes, {} connections, {} at simple integration",
                    s.node_count,
                    s.connection_count,
                    style(format_multiplier(s.multiplier)).green()
                );
            }
            println!(
                "\n{}",
                style("Use `metcalfe value --preset <id>` or `metcalfe export-preset <id>`").dim()
            );
        }
    }
    Ok(())
}

/// Run the export-preset command
pub fn export(id: &str, output: Option<&Path>) -> Result<()> {
    let preset = presets::find(id)?;
    let json = Canvas::from_state(preset.data)?.to_json_pretty()?;

    match output {
        Some(path) => {
            std::fs::write(path, &json)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!(
                "{} Wrote preset {} to {}",
                style("✓").green(),
                style(preset.id).cyan(),
                style(path.display()).cyan()
            );
        }
        None => println!("{}", json),
    }
    Ok(())
}
