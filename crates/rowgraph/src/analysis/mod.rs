//! Graph analysis over a [`Dataset`](crate::domain::Dataset).
//!
//! | Operation | Algorithm |
//! |-----------|-----------|
//! | Path analysis | Iterative depth-first backtracking, bounded by path length and a work budget |
//! | Impact analysis | Layered breadth-first search from all sources at once |
//!
//! Both take the dataset (and build a fresh [`AdjacencyIndex`]) or an index
//! the caller already built for the same dataset. Neither ever fails:
//! unknown ids are skipped and reported in the result.
//!
//! [`AdjacencyIndex`]: crate::adjacency::AdjacencyIndex

mod impact;
mod paths;
mod types;

pub use impact::{analyze_impact, analyze_impact_in};
pub use paths::{find_paths, find_paths_in};
pub use types::{
    CriticalPath, GraphPath, ImpactAnalysisResult, ImpactMetrics, PairSkipReason,
    PathAnalysisResult, PathMetadata, PathMetrics, SkippedPair,
};

use crate::domain::EntityId;
use std::collections::HashSet;

/// A node with more outgoing edges than this is flagged as critical during
/// impact analysis.
pub const CRITICAL_FAN_OUT: usize = 5;

/// Default number of edge expansions path enumeration may perform.
pub const DEFAULT_MAX_PATH_EXPANSIONS: usize = 1_000_000;

/// Upper bound on the edges path enumeration may follow.
///
/// Simple-path enumeration is exponential on dense graphs; the budget keeps
/// caller-supplied lengths from turning into unbounded work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkBudget {
    max_expansions: Option<usize>,
}

impl WorkBudget {
    /// Budget of at most `max_expansions` edge expansions.
    #[must_use]
    pub fn new(max_expansions: usize) -> Self {
        Self {
            max_expansions: Some(max_expansions),
        }
    }

    /// No limit besides the path length.
    #[must_use]
    pub fn unlimited() -> Self {
        Self {
            max_expansions: None,
        }
    }

    /// The configured limit, `None` when unlimited.
    #[must_use]
    pub fn max_expansions(&self) -> Option<usize> {
        self.max_expansions
    }

    /// Returns `true` once `spent` expansions use up the budget.
    #[must_use]
    pub(crate) fn is_exhausted(&self, spent: usize) -> bool {
        self.max_expansions.is_some_and(|max| spent >= max)
    }
}

impl Default for WorkBudget {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_PATH_EXPANSIONS)
    }
}

impl From<Option<usize>> for WorkBudget {
    fn from(max_expansions: Option<usize>) -> Self {
        Self { max_expansions }
    }
}

/// Collapse repeated ids, keeping the first occurrence.
fn dedup_ids(ids: &[EntityId]) -> Vec<&EntityId> {
    let mut seen = HashSet::new();
    ids.iter().filter(|id| seen.insert(id.as_str())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn budget_exhaustion() {
        let budget = WorkBudget::new(3);

        assert!(!budget.is_exhausted(2));
        assert!(budget.is_exhausted(3));
        assert!(!WorkBudget::unlimited().is_exhausted(usize::MAX));
    }

    #[test]
    fn dedup_ids_keeps_first_occurrence_order() {
        let ids: Vec<EntityId> = ["b", "a", "b", "c", "a"]
            .into_iter()
            .map(EntityId::from)
            .collect();

        let unique: Vec<&str> = dedup_ids(&ids).into_iter().map(EntityId::as_str).collect();

        assert_eq!(unique, vec!["b", "a", "c"]);
    }
}
