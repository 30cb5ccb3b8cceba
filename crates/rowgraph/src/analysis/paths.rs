//! Simple-path enumeration between entity sets.

use super::types::{GraphPath, PairSkipReason, PathAnalysisResult, PathMetrics, SkippedPair};
use super::{dedup_ids, WorkBudget};
use crate::adjacency::{AdjacencyIndex, Link};
use crate::domain::{Dataset, EntityId, RelationshipId};
use std::collections::HashSet;
use tracing::{debug, warn};

/// Enumerate every simple path from any of `source_ids` to any of
/// `target_ids` with at most `max_length` nodes.
///
/// Builds a fresh [`AdjacencyIndex`] for `dataset` and uses the default
/// [`WorkBudget`].
#[must_use]
pub fn find_paths(
    dataset: &Dataset,
    source_ids: &[EntityId],
    target_ids: &[EntityId],
    max_length: usize,
) -> PathAnalysisResult {
    let index = AdjacencyIndex::build(dataset);
    find_paths_in(
        &index,
        source_ids,
        target_ids,
        max_length,
        WorkBudget::default(),
    )
}

/// Enumerate simple paths over an index the caller already built.
///
/// Pairs are searched in `source_ids × target_ids` order. A pair is skipped
/// (and listed in `skipped_pairs`) when source and target are the same
/// entity or either one is not in the index. A path never continues past its
/// target. When `budget` runs out the paths found so far are returned with
/// `truncated` set.
#[must_use]
pub fn find_paths_in(
    index: &AdjacencyIndex,
    source_ids: &[EntityId],
    target_ids: &[EntityId],
    max_length: usize,
    budget: WorkBudget,
) -> PathAnalysisResult {
    let sources = dedup_ids(source_ids);
    let targets = dedup_ids(target_ids);
    let mut result = PathAnalysisResult::default();
    let mut spent = 0;

    'pairs: for &source in &sources {
        for &target in &targets {
            let skip = if source == target {
                Some(PairSkipReason::SameNode)
            } else if !index.contains(source.as_str()) {
                Some(PairSkipReason::UnknownSource)
            } else if !index.contains(target.as_str()) {
                Some(PairSkipReason::UnknownTarget)
            } else {
                None
            };

            if let Some(reason) = skip {
                if reason == PairSkipReason::SameNode {
                    debug!(%source, "Skipping pair with identical source and target");
                } else {
                    warn!(%source, %target, ?reason, "Skipping pair with unknown entity");
                }
                result.skipped_pairs.push(SkippedPair {
                    source: source.clone(),
                    target: target.clone(),
                    reason,
                });
                continue;
            }

            let completed = enumerate_pair(
                index,
                source,
                target,
                max_length,
                budget,
                &mut spent,
                &mut result.paths,
            );
            if !completed {
                warn!(
                    max_expansions = budget.max_expansions(),
                    paths = result.paths.len(),
                    "Path enumeration budget exhausted, returning partial result"
                );
                result.truncated = true;
                break 'pairs;
            }
        }
    }

    result.metrics = PathMetrics::from_paths(&result.paths);
    debug!(
        sources = sources.len(),
        targets = targets.len(),
        paths = result.metrics.total_paths,
        expansions = spent,
        "Path analysis complete"
    );
    result
}

/// A node on the DFS stack and the position of its next outgoing edge.
struct Frame<'a> {
    links: &'a [Link],
    next: usize,
}

/// Depth-first backtracking search from `source` to `target`.
///
/// The stack holds one frame per node of the current path; popping a frame
/// unmarks its node, which is what keeps every recorded path simple.
/// Returns `false` if the budget ran out.
fn enumerate_pair<'a>(
    index: &'a AdjacencyIndex,
    source: &'a EntityId,
    target: &EntityId,
    max_length: usize,
    budget: WorkBudget,
    spent: &mut usize,
    paths: &mut Vec<GraphPath>,
) -> bool {
    // A path needs at least two nodes.
    if max_length < 2 {
        return true;
    }

    let mut nodes: Vec<&'a EntityId> = vec![source];
    let mut edges: Vec<&'a RelationshipId> = Vec::new();
    let mut visited: HashSet<&'a str> = HashSet::from([source.as_str()]);
    let mut stack = vec![Frame {
        links: index.outgoing(source.as_str()),
        next: 0,
    }];

    while let Some(frame) = stack.last_mut() {
        let links = frame.links;
        let Some(link) = links.get(frame.next) else {
            stack.pop();
            if let Some(node) = nodes.pop() {
                visited.remove(node.as_str());
            }
            edges.pop();
            continue;
        };
        frame.next += 1;

        if visited.contains(link.node.as_str()) {
            continue;
        }
        if budget.is_exhausted(*spent) {
            return false;
        }
        *spent += 1;

        if link.node == *target {
            let path_nodes = nodes
                .iter()
                .map(|n| (*n).clone())
                .chain([link.node.clone()])
                .collect();
            let path_edges = edges
                .iter()
                .map(|e| (*e).clone())
                .chain([link.edge.clone()])
                .collect();
            paths.extend(GraphPath::new(path_nodes, path_edges));
            continue;
        }

        // Stepping onto this node would already use up the length bound
        // without reaching the target.
        if nodes.len() + 1 >= max_length {
            continue;
        }

        nodes.push(&link.node);
        edges.push(&link.edge);
        visited.insert(link.node.as_str());
        stack.push(Frame {
            links: index.outgoing(link.node.as_str()),
            next: 0,
        });
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Entity, Metadata, Relationship};
    use rstest::rstest;

    fn dataset(nodes: &[&str], edges: &[(&str, &str)]) -> Dataset {
        let entities = nodes
            .iter()
            .map(|id| Entity {
                id: EntityId::from(*id),
                entity_type: "node".to_string(),
                label: (*id).to_string(),
                metadata: Metadata::new(),
            })
            .collect();
        let relationships = edges
            .iter()
            .map(|(s, t)| Relationship {
                id: RelationshipId::new(format!("{s}->{t}")),
                source: EntityId::from(*s),
                target: EntityId::from(*t),
                relationship_type: "link".to_string(),
                metadata: Metadata::new(),
            })
            .collect();
        Dataset::new(entities, relationships)
    }

    fn ids(raw: &[&str]) -> Vec<EntityId> {
        raw.iter().map(|s| EntityId::from(*s)).collect()
    }

    fn node_lists(result: &PathAnalysisResult) -> Vec<Vec<&str>> {
        result
            .paths
            .iter()
            .map(|p| p.nodes().iter().map(EntityId::as_str).collect())
            .collect()
    }

    /// ```text
    /// a -> b -> d
    /// a -> c -> d
    /// b -> c
    /// ```
    fn diamond() -> Dataset {
        dataset(
            &["a", "b", "c", "d"],
            &[("a", "b"), ("a", "c"), ("b", "d"), ("c", "d"), ("b", "c")],
        )
    }

    #[test]
    fn enumerates_all_simple_paths_in_edge_order() {
        let result = find_paths(&diamond(), &ids(&["a"]), &ids(&["d"]), 10);

        assert_eq!(
            node_lists(&result),
            vec![vec!["a", "b", "d"], vec!["a", "b", "c", "d"], vec!["a", "c", "d"]]
        );
        assert_eq!(result.metrics.total_paths, 3);
        assert_eq!(result.metrics.shortest_path_length, 3);
        assert_eq!(result.metrics.longest_path_length, 4);
        assert!(!result.truncated);
    }

    #[rstest]
    #[case::too_short_for_any_path(1, 0)]
    #[case::direct_edges_only(2, 0)]
    #[case::two_hops(3, 2)]
    #[case::three_hops(4, 3)]
    fn max_length_bounds_node_count(#[case] max_length: usize, #[case] expected: usize) {
        let result = find_paths(&diamond(), &ids(&["a"]), &ids(&["d"]), max_length);

        assert_eq!(result.metrics.total_paths, expected);
        assert!(result.paths.iter().all(|p| p.len() <= max_length));
    }

    #[test]
    fn cycles_do_not_loop() {
        let ds = dataset(&["a", "b", "c"], &[("a", "b"), ("b", "a"), ("b", "c"), ("c", "a")]);

        let result = find_paths(&ds, &ids(&["a"]), &ids(&["c"]), 20);

        assert_eq!(node_lists(&result), vec![vec!["a", "b", "c"]]);
    }

    #[test]
    fn path_stops_at_its_target() {
        let ds = dataset(&["a", "b", "c"], &[("a", "b"), ("b", "c")]);

        let result = find_paths(&ds, &ids(&["a"]), &ids(&["b", "c"]), 10);

        assert_eq!(node_lists(&result), vec![vec!["a", "b"], vec!["a", "b", "c"]]);
    }

    #[test]
    fn edges_follow_nodes() {
        let result = find_paths(&diamond(), &ids(&["a"]), &ids(&["d"]), 3);
        let first = &result.paths[0];

        let edge_ids: Vec<&str> = first.edges().iter().map(RelationshipId::as_str).collect();
        assert_eq!(edge_ids, vec!["a->b", "b->d"]);
        assert_eq!(first.metadata().hops, 2);
    }

    #[test]
    fn unknown_and_identical_pairs_are_reported() {
        let result = find_paths(&diamond(), &ids(&["a", "ghost"]), &ids(&["a", "nowhere"]), 10);

        let reasons: Vec<PairSkipReason> = result.skipped_pairs.iter().map(|p| p.reason).collect();
        assert_eq!(
            reasons,
            vec![
                PairSkipReason::SameNode,
                PairSkipReason::UnknownTarget,
                PairSkipReason::UnknownSource,
                PairSkipReason::UnknownSource,
            ]
        );
        assert!(result.is_empty());
    }

    #[test]
    fn repeated_ids_do_not_duplicate_paths() {
        let result = find_paths(&diamond(), &ids(&["a", "a"]), &ids(&["d", "d"]), 3);

        assert_eq!(result.metrics.total_paths, 2);
    }

    #[test]
    fn budget_exhaustion_truncates() {
        let index = AdjacencyIndex::build(&diamond());

        let result = find_paths_in(
            &index,
            &ids(&["a"]),
            &ids(&["d"]),
            10,
            WorkBudget::new(2),
        );

        assert!(result.truncated);
        assert_eq!(node_lists(&result), vec![vec!["a", "b", "d"]]);
    }

    #[test]
    fn empty_inputs_give_zero_result() {
        let result = find_paths(&diamond(), &[], &ids(&["d"]), 10);

        assert_eq!(result, PathAnalysisResult::default());
    }
}
