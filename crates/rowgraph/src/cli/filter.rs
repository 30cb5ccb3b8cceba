//! `rowgraph filter` command implementation.

use std::path::Path;

use colored::Colorize;
use rowgraph::{
    filter_by_node_types_in, filter_dataset_in, AdjacencyIndex, Dataset, Error, Settings,
};

use super::display::emit_dataset;
use super::entity_ids;

/// What the filter keeps paths towards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Targets {
    /// No targets: impact from the sources
    None,
    /// Explicit entity ids
    Ids(Vec<String>),
    /// Every entity of these types
    Types(Vec<String>),
}

impl Targets {
    /// Targets from the mutually exclusive `--to` and `--to-type` flags.
    pub fn from_args(to: Vec<String>, to_type: Vec<String>) -> Self {
        if !to.is_empty() {
            Self::Ids(to)
        } else if !to_type.is_empty() {
            Self::Types(to_type)
        } else {
            Self::None
        }
    }
}

/// Run the filter command.
pub fn run(
    settings: &Settings,
    dataset: &Path,
    targets: &Targets,
    from: &[String],
    max_depth: Option<usize>,
    out: Option<&Path>,
    json: bool,
) -> Result<(), Error> {
    let sources = entity_ids("--from", from)?;
    let max_depth = max_depth.unwrap_or(settings.analysis.max_depth);
    let dataset = Dataset::load(dataset)?;
    let index = AdjacencyIndex::build(&dataset);
    let budget = settings.work_budget();

    let output = match targets {
        Targets::None => filter_dataset_in(&dataset, &index, &sources, &[], max_depth, budget),
        Targets::Ids(to) => {
            let targets = entity_ids("--to", to)?;
            filter_dataset_in(&dataset, &index, &sources, &targets, max_depth, budget)
        }
        Targets::Types(types) => {
            let types: Vec<&str> = types
                .iter()
                .map(|t| t.trim())
                .filter(|t| !t.is_empty())
                .collect();
            filter_by_node_types_in(&dataset, &index, &sources, &types, max_depth, budget)
        }
    };

    // stderr keeps --json output parseable
    if output.truncated {
        eprintln!(
            "{}: expansion budget exhausted, filtered dataset is partial",
            "warning".yellow()
        );
    }

    emit_dataset("Filtered dataset", &output.dataset, out, json)
}
