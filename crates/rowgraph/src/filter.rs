//! Sub-datasets derived from analysis results.
//!
//! Every function here is pure: it returns a new [`Dataset`] whose entities
//! and relationships are a subset of the input's, in input order, and whose
//! relationships only connect surviving entities. The result can be fed
//! straight back into analysis or visualization.

use crate::adjacency::AdjacencyIndex;
use crate::analysis::{analyze_impact_in, find_paths_in, WorkBudget};
use crate::domain::{Dataset, EntityId, RelationshipId};
use std::collections::{HashSet, VecDeque};
use tracing::{debug, warn};

/// A filtered dataset and whether path enumeration was cut short.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterOutput {
    /// The filtered dataset
    pub dataset: Dataset,
    /// `true` if the work budget ran out, so paths (and the entities on
    /// them) may be missing
    pub truncated: bool,
}

/// Reduce `dataset` to what is relevant between `source_ids` and
/// `target_ids`.
///
/// - Sources and targets given: path analysis with `max_depth` as the
///   maximum path length (in nodes); keeps the entities and relationships
///   on any returned path.
/// - Only sources given: impact analysis within `max_depth` hops; keeps the
///   sources, every impacted entity, and the relationships between them.
/// - No sources: returns the dataset unchanged.
///
/// Uses the default [`WorkBudget`]; a truncated result is logged at warn
/// level. Use [`filter_dataset_in`] to choose the budget and see the flag.
#[must_use]
pub fn filter_dataset(
    dataset: &Dataset,
    source_ids: &[EntityId],
    target_ids: &[EntityId],
    max_depth: usize,
) -> Dataset {
    let index = AdjacencyIndex::build(dataset);
    filter_dataset_in(
        dataset,
        &index,
        source_ids,
        target_ids,
        max_depth,
        WorkBudget::default(),
    )
    .dataset
}

/// Like [`filter_dataset`], over an index the caller built for `dataset`
/// and with an explicit path enumeration budget.
#[must_use]
pub fn filter_dataset_in(
    dataset: &Dataset,
    index: &AdjacencyIndex,
    source_ids: &[EntityId],
    target_ids: &[EntityId],
    max_depth: usize,
    budget: WorkBudget,
) -> FilterOutput {
    if source_ids.is_empty() {
        debug!("No sources given, dataset left unfiltered");
        return FilterOutput {
            dataset: dataset.clone(),
            truncated: false,
        };
    }

    let output = if target_ids.is_empty() {
        let impact = analyze_impact_in(index, source_ids, max_depth);
        let nodes: HashSet<&str> = source_ids
            .iter()
            .chain(impact.impacted())
            .map(EntityId::as_str)
            .collect();
        FilterOutput {
            dataset: dataset.induced_subgraph(&nodes),
            truncated: false,
        }
    } else {
        let result = find_paths_in(index, source_ids, target_ids, max_depth, budget);
        let nodes: HashSet<&str> = result
            .paths
            .iter()
            .flat_map(|p| p.nodes())
            .map(EntityId::as_str)
            .collect();
        let edges: HashSet<&str> = result
            .paths
            .iter()
            .flat_map(|p| p.edges())
            .map(RelationshipId::as_str)
            .collect();
        if result.truncated {
            warn!(
                paths = result.paths.len(),
                "Path budget exhausted, filtered dataset is partial"
            );
        }
        FilterOutput {
            dataset: dataset.select(&nodes, &edges),
            truncated: result.truncated,
        }
    };

    debug!(
        entities = output.dataset.entities.len(),
        relationships = output.dataset.relationships.len(),
        truncated = output.truncated,
        "Filtered dataset"
    );
    output
}

/// Like [`filter_dataset`], with targets given as entity types: every
/// entity whose type is in `target_types` becomes a target.
///
/// When no entity matches, the target list is empty and the filter falls
/// back to impact analysis from the sources.
#[must_use]
pub fn filter_by_node_types<S: AsRef<str>>(
    dataset: &Dataset,
    source_ids: &[EntityId],
    target_types: &[S],
    max_depth: usize,
) -> Dataset {
    let index = AdjacencyIndex::build(dataset);
    filter_by_node_types_in(
        dataset,
        &index,
        source_ids,
        target_types,
        max_depth,
        WorkBudget::default(),
    )
    .dataset
}

/// Like [`filter_by_node_types`], over a prebuilt index and with an
/// explicit budget.
#[must_use]
pub fn filter_by_node_types_in<S: AsRef<str>>(
    dataset: &Dataset,
    index: &AdjacencyIndex,
    source_ids: &[EntityId],
    target_types: &[S],
    max_depth: usize,
    budget: WorkBudget,
) -> FilterOutput {
    let target_ids = dataset.entity_ids_of_types(target_types);
    debug!(
        types = target_types.len(),
        targets = target_ids.len(),
        "Resolved target types"
    );
    filter_dataset_in(dataset, index, source_ids, &target_ids, max_depth, budget)
}

/// Subgraph induced on everything reachable from `source_ids` along
/// outgoing edges within `max_depth` hops, sources included.
///
/// Unknown source ids are ignored.
#[must_use]
pub fn extract_reachable_subgraph(
    dataset: &Dataset,
    source_ids: &[EntityId],
    max_depth: usize,
) -> Dataset {
    let index = AdjacencyIndex::build(dataset);

    let mut reached: HashSet<&str> = HashSet::new();
    let mut queue: VecDeque<(&str, usize)> = VecDeque::new();
    for source in source_ids {
        if index.contains(source.as_str()) && reached.insert(source.as_str()) {
            queue.push_back((source.as_str(), 0));
        }
    }

    while let Some((node, depth)) = queue.pop_front() {
        if depth >= max_depth {
            continue;
        }
        for link in index.outgoing(node) {
            if reached.insert(link.node.as_str()) {
                queue.push_back((link.node.as_str(), depth + 1));
            }
        }
    }

    debug!(
        sources = source_ids.len(),
        reached = reached.len(),
        max_depth,
        "Extracted reachable subgraph"
    );
    dataset.induced_subgraph(&reached)
}
