//! `rowgraph paths` command implementation.

use std::path::Path;

use colored::Colorize;
use rowgraph::{find_paths_in, AdjacencyIndex, Dataset, Error, PathAnalysisResult, Settings};

use super::display::{format_route, print_json};
use super::entity_ids;

/// Maximum paths to display.
const MAX_PATHS: usize = 25;

/// Run the paths command.
pub fn run(
    settings: &Settings,
    dataset: &Path,
    from: &[String],
    to: &[String],
    max_length: Option<usize>,
    json: bool,
) -> Result<(), Error> {
    let sources = entity_ids("--from", from)?;
    let targets = entity_ids("--to", to)?;
    let max_length = max_length.unwrap_or(settings.analysis.max_path_length);

    let dataset = Dataset::load(dataset)?;
    let index = AdjacencyIndex::build(&dataset);
    let result = find_paths_in(
        &index,
        &sources,
        &targets,
        max_length,
        settings.work_budget(),
    );

    if json {
        print_json(&result)
    } else {
        print_path_result(&result, max_length);
        Ok(())
    }
}

/// Display paths, metrics and skipped pairs.
fn print_path_result(result: &PathAnalysisResult, max_length: usize) {
    if result.is_empty() {
        println!("No paths found (max length: {max_length})");
    } else {
        println!(
            "{} ({}):",
            "Paths".white().bold(),
            result.metrics.total_paths.to_string().green()
        );
        for path in result.paths.iter().take(MAX_PATHS) {
            println!("  {} {}", "•".dimmed(), format_route(path.nodes()));
        }
        if result.paths.len() > MAX_PATHS {
            println!(
                "  {} ... and {} more",
                "•".dimmed(),
                result.paths.len() - MAX_PATHS
            );
        }
        println!();
        println!(
            "{}: shortest {} nodes, longest {} nodes",
            "Summary".dimmed(),
            result.metrics.shortest_path_length,
            result.metrics.longest_path_length
        );
    }

    if result.truncated {
        println!(
            "{}: expansion budget exhausted, results are partial",
            "warning".yellow()
        );
    }

    for pair in &result.skipped_pairs {
        println!(
            "  {} skipped {} -> {} ({:?})",
            "•".dimmed(),
            pair.source,
            pair.target,
            pair.reason
        );
    }
}
