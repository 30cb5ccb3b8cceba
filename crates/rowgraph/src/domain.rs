//! Domain types for entity/relationship graphs.
//!
//! A [`Dataset`] is an immutable snapshot: the builder and the filters
//! produce new datasets, and consumers that need a derived view (such as the
//! [`AdjacencyIndex`](crate::adjacency::AdjacencyIndex)) build it fresh.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::fs;
use std::path::Path;

/// Scalar metadata copied from row columns, keyed by column name.
pub type Metadata = BTreeMap<String, serde_json::Value>;

/// Unique identifier for an entity (`classId:sourceValue` when built from rows)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(pub String);

impl EntityId {
    /// Create a new entity ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the ID as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Unique identifier for a relationship (`relId:source-target` when built from rows)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RelationshipId(pub String);

impl RelationshipId {
    /// Create a new relationship ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the ID as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

macro_rules! impl_id_conversions {
    ($ty:ident) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $ty {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $ty {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl AsRef<str> for $ty {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl Borrow<str> for $ty {
            fn borrow(&self) -> &str {
                &self.0
            }
        }
    };
}

impl_id_conversions!(EntityId);
impl_id_conversions!(RelationshipId);

/// A typed node in the graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// Globally unique identifier
    pub id: EntityId,

    /// Class tag (the id of the class definition that produced the entity)
    #[serde(rename = "type")]
    pub entity_type: String,

    /// Display name
    pub label: String,

    /// Values copied from the class's metadata columns
    #[serde(default)]
    pub metadata: Metadata,
}

/// A typed directed edge between two entities
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relationship {
    /// Unique identifier
    pub id: RelationshipId,

    /// Entity the edge starts from
    pub source: EntityId,

    /// Entity the edge points to
    pub target: EntityId,

    /// Relationship type
    #[serde(rename = "type")]
    pub relationship_type: String,

    /// Values copied from the definition's metadata columns
    #[serde(default)]
    pub metadata: Metadata,
}

impl Relationship {
    /// Returns `true` if the edge starts and ends at the same entity.
    #[must_use]
    pub fn is_self_loop(&self) -> bool {
        self.source == self.target
    }
}

/// An entity/relationship graph.
///
/// Entities are unique by id, relationships are unique by id. Datasets built
/// by [`GraphBuilder`](crate::builder::GraphBuilder) and the
/// [`filter`](crate::filter) functions also guarantee that every
/// relationship's endpoints are present; datasets assembled by hand may not,
/// and every consumer in this crate tolerates that.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    /// Entities in build order
    pub entities: Vec<Entity>,

    /// Relationships in build order
    pub relationships: Vec<Relationship>,
}

impl Dataset {
    /// Create a dataset from its parts.
    #[must_use]
    pub fn new(entities: Vec<Entity>, relationships: Vec<Relationship>) -> Self {
        Self {
            entities,
            relationships,
        }
    }

    /// Load a dataset from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a dataset
    /// document.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Write the dataset to `path` as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Returns `true` if the dataset has no entities and no relationships.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty() && self.relationships.is_empty()
    }

    /// Look up an entity by id.
    #[must_use]
    pub fn entity(&self, id: &str) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id.as_str() == id)
    }

    /// Look up a relationship by id.
    #[must_use]
    pub fn relationship(&self, id: &str) -> Option<&Relationship> {
        self.relationships.iter().find(|r| r.id.as_str() == id)
    }

    /// Ids of every entity whose type is in `types`, in dataset order.
    #[must_use]
    pub fn entity_ids_of_types<S: AsRef<str>>(&self, types: &[S]) -> Vec<EntityId> {
        self.entities
            .iter()
            .filter(|e| types.iter().any(|t| t.as_ref() == e.entity_type))
            .map(|e| e.id.clone())
            .collect()
    }

    /// Relationships whose source or target is not an entity of this dataset.
    #[must_use]
    pub fn dangling_relationships(&self) -> Vec<&Relationship> {
        let ids: HashSet<&str> = self.entities.iter().map(|e| e.id.as_str()).collect();
        self.relationships
            .iter()
            .filter(|r| !ids.contains(r.source.as_str()) || !ids.contains(r.target.as_str()))
            .collect()
    }

    /// Subgraph induced on `nodes`: the entities in `nodes` and every
    /// relationship whose endpoints are both in `nodes`.
    #[must_use]
    pub fn induced_subgraph(&self, nodes: &HashSet<&str>) -> Dataset {
        let entities = self
            .entities
            .iter()
            .filter(|e| nodes.contains(e.id.as_str()))
            .cloned()
            .collect();
        let relationships = self
            .relationships
            .iter()
            .filter(|r| nodes.contains(r.source.as_str()) && nodes.contains(r.target.as_str()))
            .cloned()
            .collect();
        Dataset::new(entities, relationships)
    }

    /// The entities in `nodes` and the relationships in `edges`, in dataset order.
    #[must_use]
    pub fn select(&self, nodes: &HashSet<&str>, edges: &HashSet<&str>) -> Dataset {
        let entities = self
            .entities
            .iter()
            .filter(|e| nodes.contains(e.id.as_str()))
            .cloned()
            .collect();
        let relationships = self
            .relationships
            .iter()
            .filter(|r| edges.contains(r.id.as_str()))
            .cloned()
            .collect();
        Dataset::new(entities, relationships)
    }
}
