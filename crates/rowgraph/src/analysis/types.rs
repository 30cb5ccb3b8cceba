//! Result types for path and impact analysis.
//!
//! Field names serialize in camelCase (`totalPaths`, `directImpact`, ...)
//! because these results are handed to the visualization layer as JSON.

use crate::domain::{EntityId, RelationshipId};
use serde::{Deserialize, Serialize};

/// Per-path facts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathMetadata {
    /// Number of nodes in the path
    pub length: usize,
    /// Number of edges in the path (`length - 1`)
    pub hops: usize,
}

/// A simple path through the graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphPath {
    nodes: Vec<EntityId>,
    edges: Vec<RelationshipId>,
    metadata: PathMetadata,
}

impl GraphPath {
    /// Create a new path, validating invariants.
    ///
    /// Returns `None` if:
    /// - `nodes` is empty
    /// - `edges.len()` does not equal `nodes.len() - 1`
    #[must_use]
    pub fn new(nodes: Vec<EntityId>, edges: Vec<RelationshipId>) -> Option<Self> {
        if nodes.is_empty() || edges.len() != nodes.len() - 1 {
            return None;
        }
        let metadata = PathMetadata {
            length: nodes.len(),
            hops: edges.len(),
        };
        Some(Self {
            nodes,
            edges,
            metadata,
        })
    }

    /// Entities from source to target.
    #[must_use]
    pub fn nodes(&self) -> &[EntityId] {
        &self.nodes
    }

    /// Relationships between consecutive nodes.
    #[must_use]
    pub fn edges(&self) -> &[RelationshipId] {
        &self.edges
    }

    /// Length and hop count.
    #[must_use]
    pub fn metadata(&self) -> PathMetadata {
        self.metadata
    }

    /// Number of nodes in the path.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the path has no nodes.
    ///
    /// Paths from [`GraphPath::new`] always have at least one node; a
    /// deserialized path is not validated and may be empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Aggregate path statistics. Lengths count nodes, not hops.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathMetrics {
    /// Number of paths found
    pub total_paths: usize,
    /// Fewest nodes in any path, 0 if none
    pub shortest_path_length: usize,
    /// Most nodes in any path, 0 if none
    pub longest_path_length: usize,
}

impl PathMetrics {
    /// Compute metrics over `paths`.
    #[must_use]
    pub fn from_paths(paths: &[GraphPath]) -> Self {
        Self {
            total_paths: paths.len(),
            shortest_path_length: paths.iter().map(GraphPath::len).min().unwrap_or(0),
            longest_path_length: paths.iter().map(GraphPath::len).max().unwrap_or(0),
        }
    }
}

/// Why a `(source, target)` pair was not searched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PairSkipReason {
    /// Source and target are the same entity
    SameNode,
    /// The source is not an entity of the dataset
    UnknownSource,
    /// The target is not an entity of the dataset
    UnknownTarget,
}

/// A `(source, target)` pair left out of path enumeration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedPair {
    /// Requested source
    pub source: EntityId,
    /// Requested target
    pub target: EntityId,
    /// Why it was skipped
    pub reason: PairSkipReason,
}

/// Result of [`find_paths`](super::find_paths).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathAnalysisResult {
    /// Every simple path found, grouped by `(source, target)` pair in
    /// request order
    pub paths: Vec<GraphPath>,
    /// Aggregate statistics
    pub metrics: PathMetrics,
    /// Pairs that were not searched
    #[serde(default)]
    pub skipped_pairs: Vec<SkippedPair>,
    /// `true` if the work budget ran out before enumeration finished
    #[serde(default)]
    pub truncated: bool,
}

impl PathAnalysisResult {
    /// Returns `true` if no path was found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

/// A node with more than [`CRITICAL_FAN_OUT`](super::CRITICAL_FAN_OUT)
/// outgoing edges, and how the traversal reached it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CriticalPath {
    /// Entities from a source to the critical node, inclusive
    pub nodes: Vec<EntityId>,
    /// Out-degree of the critical node
    pub fan_out: usize,
}

impl CriticalPath {
    /// The critical node itself.
    #[must_use]
    pub fn critical_node(&self) -> Option<&EntityId> {
        self.nodes.last()
    }

    /// Hops from the source to the critical node.
    #[must_use]
    pub fn hops(&self) -> usize {
        self.nodes.len().saturating_sub(1)
    }
}

/// Aggregate impact statistics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImpactMetrics {
    /// `directImpact.len() + indirectImpact.len()`
    pub total_impacted_nodes: usize,
    /// Hops of the longest critical path, 0 if none was recorded.
    ///
    /// This reports where critical nodes were observed; it is not the
    /// requested depth bound.
    pub max_depth: usize,
    /// Critical nodes in the order they were expanded
    pub critical_paths: Vec<CriticalPath>,
}

/// Result of [`analyze_impact`](super::analyze_impact).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImpactAnalysisResult {
    /// Entities one hop downstream of the sources
    pub direct_impact: Vec<EntityId>,
    /// Entities two or more hops downstream, within the depth bound
    pub indirect_impact: Vec<EntityId>,
    /// Aggregate statistics
    pub metrics: ImpactMetrics,
    /// Hops from the sources to the farthest impacted entity
    #[serde(default)]
    pub depth_reached: usize,
    /// Requested sources that are not entities of the dataset
    #[serde(default)]
    pub skipped_sources: Vec<EntityId>,
}

impl ImpactAnalysisResult {
    /// Every impacted entity, direct first.
    pub fn impacted(&self) -> impl Iterator<Item = &EntityId> {
        self.direct_impact.iter().chain(&self.indirect_impact)
    }

    /// Returns `true` if nothing downstream was reached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.direct_impact.is_empty() && self.indirect_impact.is_empty()
    }
}
