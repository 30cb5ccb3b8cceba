//! `rowgraph reachable` command implementation.

use std::path::Path;

use rowgraph::{extract_reachable_subgraph, Dataset, Error, Settings};

use super::display::emit_dataset;
use super::entity_ids;

/// Run the reachable command.
pub fn run(
    settings: &Settings,
    dataset: &Path,
    from: &[String],
    max_depth: Option<usize>,
    out: Option<&Path>,
    json: bool,
) -> Result<(), Error> {
    let sources = entity_ids("--from", from)?;
    let max_depth = max_depth.unwrap_or(settings.analysis.max_depth);
    let dataset = Dataset::load(dataset)?;

    let reachable = extract_reachable_subgraph(&dataset, &sources, max_depth);
    emit_dataset("Reachable subgraph", &reachable, out, json)
}
