//! Graph construction from tabular rows.
//!
//! [`GraphBuilder`] applies a [`MappingConfiguration`] to [`RawData`]:
//!
//! 1. Every class definition turns rows into entities with id
//!    `classId:sourceValue`. The set of emitted ids is shared across all
//!    classes; the first row to produce an id wins.
//! 2. Every relationship definition turns rows into edges with id
//!    `relId:sourceValue-targetValue`, but only when both endpoints were
//!    emitted in step 1 and the edge is not a self-loop.
//!
//! Output order is deterministic: classes in mapping order, rows in input
//! order; then relationship definitions in mapping order, rows in input
//! order. Nothing here fails: rows that do not fit are recorded in the
//! [`BuildReport`].

use crate::domain::{Dataset, Entity, EntityId, Metadata, Relationship, RelationshipId};
use crate::mapping::{
    read_cell, Cell, ClassDefinition, MappingConfiguration, RawData, RelationshipDefinition, Row,
};
use crate::palette::{CyclingPalette, Palette};
use crate::report::{BuildReport, SkipReason};
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};
use tracing::{info, warn};

/// Everything produced by one build.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildOutput {
    /// The built graph
    pub dataset: Dataset,
    /// Skipped rows and duplicate counts
    pub report: BuildReport,
    /// Entity type to display color, for every class in the mapping
    pub legend: BTreeMap<String, String>,
}

/// Builds [`Dataset`]s from rows, owning the palette used for type colors.
#[derive(Debug, Clone, Default)]
pub struct GraphBuilder<P = CyclingPalette> {
    palette: P,
}

impl GraphBuilder<CyclingPalette> {
    /// Create a builder with the default palette.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<P: Palette> GraphBuilder<P> {
    /// Create a builder that colors types with `palette`.
    pub fn with_palette(palette: P) -> Self {
        Self { palette }
    }

    /// The palette used for classes without an explicit color.
    pub fn palette(&self) -> &P {
        &self.palette
    }

    /// Display color for a class: its own color when set, otherwise the
    /// palette's color for the class id.
    pub fn color_for(&mut self, class: &ClassDefinition) -> String {
        match class.color.as_deref().map(str::trim) {
            Some(color) if !color.is_empty() => color.to_string(),
            _ => self.palette.color_for(&class.id),
        }
    }

    /// Build a dataset from `raw` under `mapping`.
    pub fn build(&mut self, raw: &RawData, mapping: &MappingConfiguration) -> BuildOutput {
        let mut report = BuildReport::default();
        let mut legend = BTreeMap::new();

        for class in &mapping.classes {
            if !legend.contains_key(&class.id) {
                let color = self.color_for(class);
                legend.insert(class.id.clone(), color);
            }
        }

        let mut entity_ids: HashSet<EntityId> = HashSet::new();
        let mut entities = Vec::new();
        for class in &mapping.classes {
            for (index, row) in raw.rows.iter().enumerate() {
                if let Some(entity) = build_entity(class, index, row, &entity_ids, &mut report) {
                    entity_ids.insert(entity.id.clone());
                    entities.push(entity);
                }
            }
        }

        let mut relationship_ids: HashSet<RelationshipId> = HashSet::new();
        let mut relationships = Vec::new();
        for definition in &mapping.relationships {
            for (index, row) in raw.rows.iter().enumerate() {
                let Some(relationship) =
                    build_relationship(definition, index, row, &entity_ids, &mut report)
                else {
                    continue;
                };
                if relationship_ids.insert(relationship.id.clone()) {
                    relationships.push(relationship);
                } else {
                    report.duplicate_relationships += 1;
                }
            }
        }

        report.entities_created = entities.len();
        report.relationships_created = relationships.len();

        info!(
            rows = raw.rows.len(),
            entities = report.entities_created,
            relationships = report.relationships_created,
            skipped = report.skips.len(),
            "Built dataset"
        );
        let dangling = report.dangling_count();
        if dangling > 0 {
            warn!(
                dangling,
                "Dropped relationships whose endpoints were never built"
            );
        }

        BuildOutput {
            dataset: Dataset::new(entities, relationships),
            report,
            legend,
        }
    }
}

/// Build a dataset with a fresh default builder, discarding the report.
#[must_use]
pub fn build_dataset(raw: &RawData, mapping: &MappingConfiguration) -> Dataset {
    GraphBuilder::new().build(raw, mapping).dataset
}

/// Read a required identifying cell, recording a skip when it is unusable.
fn required_cell(
    row: &Row,
    column: &str,
    index: usize,
    definition: &str,
    report: &mut BuildReport,
) -> Option<String> {
    match read_cell(row, column) {
        Cell::Text(value) => Some(value),
        Cell::Missing => {
            report.skip(
                index,
                definition,
                SkipReason::MissingValue {
                    column: column.to_string(),
                },
            );
            None
        }
        Cell::NonScalar => {
            report.skip(
                index,
                definition,
                SkipReason::NonScalarValue {
                    column: column.to_string(),
                },
            );
            None
        }
    }
}

/// Copy every listed column present in the row, `null` included.
///
/// Arrays and objects are left out: metadata values are scalars.
fn copy_metadata(row: &Row, columns: &[String]) -> Metadata {
    columns
        .iter()
        .filter_map(|column| {
            let value = row.get(column)?;
            let is_scalar = !(value.is_array() || value.is_object());
            is_scalar.then(|| (column.clone(), value.clone()))
        })
        .collect()
}

fn build_entity(
    class: &ClassDefinition,
    index: usize,
    row: &Row,
    emitted: &HashSet<EntityId>,
    report: &mut BuildReport,
) -> Option<Entity> {
    let source_value = required_cell(row, &class.source_column, index, &class.id, report)?;

    let id = EntityId::new(format!("{}:{source_value}", class.id));
    if emitted.contains(&id) {
        report.duplicate_entities += 1;
        return None;
    }

    // Whitespace-only labels fall back; ids keep their raw text.
    let label = match read_cell(row, &class.label_column) {
        Cell::Text(label) if !label.trim().is_empty() => label,
        _ => source_value,
    };

    Some(Entity {
        id,
        entity_type: class.id.clone(),
        label,
        metadata: copy_metadata(row, &class.metadata_columns),
    })
}

fn build_relationship(
    definition: &RelationshipDefinition,
    index: usize,
    row: &Row,
    emitted: &HashSet<EntityId>,
    report: &mut BuildReport,
) -> Option<Relationship> {
    let source_value =
        required_cell(row, &definition.source_column, index, &definition.id, report)?;
    let target_value =
        required_cell(row, &definition.target_column, index, &definition.id, report)?;

    let source = EntityId::new(format!("{}:{source_value}", definition.source_class));
    let target = EntityId::new(format!("{}:{target_value}", definition.target_class));

    for endpoint in [&source, &target] {
        if !emitted.contains(endpoint) {
            report.skip(
                index,
                &definition.id,
                SkipReason::DanglingReference {
                    entity_id: endpoint.to_string(),
                },
            );
            return None;
        }
    }

    if source == target {
        report.skip(
            index,
            &definition.id,
            SkipReason::SelfLoop {
                entity_id: source.to_string(),
            },
        );
        return None;
    }

    Some(Relationship {
        id: RelationshipId::new(format!(
            "{}:{source_value}-{target_value}",
            definition.id
        )),
        source,
        target,
        relationship_type: definition.relationship_type().to_string(),
        metadata: copy_metadata(row, &definition.metadata_columns),
    })
}
