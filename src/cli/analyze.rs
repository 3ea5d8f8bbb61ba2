//! Analysis commands: value, groups, compare, stats

use anyhow::Result;
use tracing::info;

use super::{load_source, resolve_format, resolve_integration, IntegrationArg, SourceArgs};
use metcalfe::config::ProjectConfig;
use metcalfe::reporters::{
    report_with_format, CompareReport, GroupsReport, Report, StatsReport, ValueReport,
};
use metcalfe::{network_stats, NetworkValueEngine};

fn engine(config: &ProjectConfig) -> NetworkValueEngine {
    NetworkValueEngine::new(config.coefficients)
}

fn print(config: &ProjectConfig, source: &SourceArgs, report: Report) -> Result<()> {
    let format = resolve_format(config, source.format.as_deref())?;
    println!("{}", report_with_format(&report, format)?);
    Ok(())
}

pub fn value(
    config: &ProjectConfig,
    source: &SourceArgs,
    integration: &IntegrationArg,
    explain: bool,
) -> Result<()> {
    let level = resolve_integration(config, integration)?;
    let (canvas, name) = load_source(source)?;
    let breakdown = canvas.breakdown(&engine(config), level);
    info!(
        "Valued {} nodes at {}: multiplier {:.3}",
        canvas.nodes().len(),
        level,
        breakdown.value.multiplier
    );
    print(
        config,
        source,
        Report::Value(ValueReport::new(name, breakdown, explain)),
    )
}

pub fn groups(config: &ProjectConfig, source: &SourceArgs, integration: &IntegrationArg) -> Result<()> {
    let level = resolve_integration(config, integration)?;
    let (canvas, name) = load_source(source)?;
    let breakdown = canvas.breakdown(&engine(config), level);
    print(
        config,
        source,
        Report::Groups(GroupsReport {
            name,
            integration: level,
            groups: breakdown.groups,
        }),
    )
}

pub fn compare(config: &ProjectConfig, source: &SourceArgs) -> Result<()> {
    let (canvas, name) = load_source(source)?;
    let levels = engine(config).compare_levels(canvas.nodes(), canvas.connections());
    print(config, source, Report::Compare(CompareReport { name, levels }))
}

pub fn stats(config: &ProjectConfig, source: &SourceArgs) -> Result<()> {
    let (canvas, name) = load_source(source)?;
    let stats = network_stats(canvas.nodes(), canvas.connections());
    print(config, source, Report::Stats(StatsReport { name, stats }))
}
