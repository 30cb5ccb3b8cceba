//! Directed adjacency index over a [`Dataset`].
//!
//! The index is derived and ephemeral: build it from the dataset you are
//! about to query and drop it with the dataset. Path analysis, impact
//! analysis and the reachable-subgraph filter all go through
//! [`AdjacencyIndex::build`], so they agree on what an edge is.

use crate::domain::{Dataset, EntityId, RelationshipId};
use std::collections::HashMap;
use tracing::warn;

/// One end of an edge as seen from an entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    /// The entity at the other end
    pub node: EntityId,
    /// The relationship carrying the edge
    pub edge: RelationshipId,
}

/// Outgoing and incoming edges of one entity, in relationship order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Adjacency {
    /// Edges leaving the entity: `(target, edge)`
    pub outgoing: Vec<Link>,
    /// Edges arriving at the entity: `(source, edge)`
    pub incoming: Vec<Link>,
}

/// Entity id to [`Adjacency`], with a record for every entity.
#[derive(Debug, Clone, Default)]
pub struct AdjacencyIndex {
    entries: HashMap<EntityId, Adjacency>,
    skipped_edges: usize,
}

impl AdjacencyIndex {
    /// Build the index for `dataset`.
    ///
    /// Every entity gets a record, including isolated ones. Relationships
    /// with an endpoint that is not an entity of the dataset are skipped
    /// and counted in [`skipped_edges`](Self::skipped_edges).
    #[must_use]
    pub fn build(dataset: &Dataset) -> Self {
        let mut entries: HashMap<EntityId, Adjacency> = dataset
            .entities
            .iter()
            .map(|e| (e.id.clone(), Adjacency::default()))
            .collect();
        let mut skipped_edges = 0;

        for relationship in &dataset.relationships {
            if !entries.contains_key(&relationship.source)
                || !entries.contains_key(&relationship.target)
            {
                warn!(
                    relationship = %relationship.id,
                    source = %relationship.source,
                    target = %relationship.target,
                    "Skipping relationship with unknown endpoint"
                );
                skipped_edges += 1;
                continue;
            }

            if let Some(source) = entries.get_mut(&relationship.source) {
                source.outgoing.push(Link {
                    node: relationship.target.clone(),
                    edge: relationship.id.clone(),
                });
            }
            if let Some(target) = entries.get_mut(&relationship.target) {
                target.incoming.push(Link {
                    node: relationship.source.clone(),
                    edge: relationship.id.clone(),
                });
            }
        }

        Self {
            entries,
            skipped_edges,
        }
    }

    /// The record for `id`, if it is an entity of the indexed dataset.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Adjacency> {
        self.entries.get(id)
    }

    /// Returns `true` if `id` is an entity of the indexed dataset.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    /// Outgoing edges of `id`; empty for unknown ids.
    #[must_use]
    pub fn outgoing(&self, id: &str) -> &[Link] {
        self.entries
            .get(id)
            .map(|a| a.outgoing.as_slice())
            .unwrap_or_default()
    }

    /// Incoming edges of `id`; empty for unknown ids.
    #[must_use]
    pub fn incoming(&self, id: &str) -> &[Link] {
        self.entries
            .get(id)
            .map(|a| a.incoming.as_slice())
            .unwrap_or_default()
    }

    /// Number of entities in the index.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the index has no entities.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Relationships left out because an endpoint was unknown.
    #[must_use]
    pub fn skipped_edges(&self) -> usize {
        self.skipped_edges
    }
}
