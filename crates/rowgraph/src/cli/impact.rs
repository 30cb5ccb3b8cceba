//! `rowgraph impact` command implementation.

use std::path::Path;

use colored::Colorize;
use rowgraph::{analyze_impact_in, AdjacencyIndex, Dataset, Error, ImpactAnalysisResult, Settings};

use super::display::{format_list, format_route, print_entities, print_json};
use super::entity_ids;

/// Run the impact command.
pub fn run(
    settings: &Settings,
    dataset: &Path,
    from: &[String],
    max_depth: Option<usize>,
    json: bool,
) -> Result<(), Error> {
    let sources = entity_ids("--from", from)?;
    let max_depth = max_depth.unwrap_or(settings.analysis.max_depth);

    let dataset = Dataset::load(dataset)?;
    let index = AdjacencyIndex::build(&dataset);
    let result = analyze_impact_in(&index, &sources, max_depth);

    if json {
        return print_json(&result);
    }

    println!(
        "Impact analysis for {}:",
        format_list(&sources).cyan().bold()
    );
    print_impact_analysis(&dataset, &result);
    Ok(())
}

/// Display impact analysis results.
fn print_impact_analysis(dataset: &Dataset, result: &ImpactAnalysisResult) {
    println!();

    println!(
        "  {} ({}):",
        "Direct impact".white().bold(),
        result.direct_impact.len().to_string().green()
    );
    print_entities(dataset, &result.direct_impact, "(none)");

    println!();

    println!(
        "  {} ({}):",
        "Indirect impact".white().bold(),
        result.indirect_impact.len().to_string().yellow()
    );
    print_entities(dataset, &result.indirect_impact, "(none beyond direct)");

    let critical = &result.metrics.critical_paths;
    if !critical.is_empty() {
        println!();
        println!(
            "  {} ({}):",
            "Critical nodes".white().bold(),
            critical.len().to_string().red()
        );
        for path in critical {
            println!(
                "    {} {} {}",
                "•".dimmed(),
                format_route(&path.nodes),
                format!("(fan-out {})", path.fan_out).dimmed()
            );
        }
    }

    if !result.skipped_sources.is_empty() {
        println!();
        println!(
            "  {}: {}",
            "Unknown sources".yellow(),
            format_list(&result.skipped_sources)
        );
    }

    println!();
    println!(
        "{}: {} entities impacted, depth reached {}",
        "Summary".dimmed(),
        result.metrics.total_impacted_nodes.to_string().green(),
        result.depth_reached
    );
}
