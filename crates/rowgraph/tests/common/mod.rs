//! Common test utilities shared across integration tests.

#![allow(dead_code)]

use rowgraph::{Dataset, Entity, EntityId, Metadata, Relationship, RelationshipId};
use std::path::Path;
use std::process::{Command, Output};

/// Entity with `id` as its label.
pub fn entity(id: &str, entity_type: &str) -> Entity {
    Entity {
        id: EntityId::from(id),
        entity_type: entity_type.to_string(),
        label: id.to_string(),
        metadata: Metadata::new(),
    }
}

/// Relationship `source -> target` with id `"source->target"`.
pub fn edge(source: &str, target: &str) -> Relationship {
    Relationship {
        id: RelationshipId::new(format!("{source}->{target}")),
        source: EntityId::from(source),
        target: EntityId::from(target),
        relationship_type: "link".to_string(),
        metadata: Metadata::new(),
    }
}

/// Dataset of `node`-typed entities and the given edges.
pub fn dataset(nodes: &[&str], edges: &[(&str, &str)]) -> Dataset {
    Dataset::new(
        nodes.iter().map(|id| entity(id, "node")).collect(),
        edges.iter().map(|(s, t)| edge(s, t)).collect(),
    )
}

pub fn ids(raw: &[&str]) -> Vec<EntityId> {
    raw.iter().map(|s| EntityId::from(*s)).collect()
}

pub fn strs(ids: &[EntityId]) -> Vec<&str> {
    ids.iter().map(EntityId::as_str).collect()
}

/// Run the rowgraph binary in `dir`, without picking up ambient settings.
pub fn run_rowgraph_in_dir(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_rowgraph"))
        .args(args)
        .current_dir(dir)
        .env_remove("ROWGRAPH_MAX_PATH_LENGTH")
        .env_remove("ROWGRAPH_MAX_DEPTH")
        .env_remove("ROWGRAPH_MAX_PATH_EXPANSIONS")
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1")
        .output()
        .expect("Failed to execute rowgraph binary")
}
