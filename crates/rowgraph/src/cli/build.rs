//! `rowgraph build` command implementation.

use std::path::Path;

use colored::Colorize;
use rowgraph::{BuildOutput, Error, GraphBuilder, MappingConfiguration, RawData, Settings};

use super::display::{print_dataset_summary, print_json};

/// Run the build command.
pub fn run(
    settings: &Settings,
    data: &Path,
    mapping: &Path,
    out: Option<&Path>,
    json: bool,
) -> Result<(), Error> {
    let raw = RawData::load(data)?;
    let mapping = MappingConfiguration::load(mapping)?;

    let output = GraphBuilder::with_palette(settings.palette()).build(&raw, &mapping);

    if let Some(path) = out {
        output.dataset.save(path)?;
    }

    if json {
        print_json(&output)?;
    } else {
        print_build_output(&output);
        if let Some(path) = out {
            println!();
            println!("{} {}", "Wrote".dimmed(), path.display());
        }
    }

    Ok(())
}

/// Display build counts, the type legend and skipped rows.
fn print_build_output(output: &BuildOutput) {
    let report = &output.report;
    print_dataset_summary("Built dataset", &output.dataset);

    if report.duplicate_entities > 0 || report.duplicate_relationships > 0 {
        println!(
            "  {} {} entities, {} relationships",
            "Duplicates merged:".dimmed(),
            report.duplicate_entities,
            report.duplicate_relationships
        );
    }

    if !output.legend.is_empty() {
        println!();
        println!("  {}:", "Legend".white().bold());
        for (entity_type, color) in &output.legend {
            println!("    {} {entity_type} {}", "•".dimmed(), color.dimmed());
        }
    }

    println!();
    if report.is_clean() {
        println!("  {}", "No rows skipped".green());
        return;
    }

    println!(
        "  {} ({}):",
        "Skipped rows".white().bold(),
        report.skips.len().to_string().yellow()
    );
    for (kind, count) in report.tally() {
        println!("    {} {kind}: {count}", "•".dimmed());
    }
}
