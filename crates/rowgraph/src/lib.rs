//! # Rowgraph: Typed Graphs from Tabular Rows
//!
//! Rowgraph turns rows of tabular data into a typed entity/relationship
//! graph under a user-authored mapping, then answers two questions about
//! it: which simple paths connect one set of entities to another, and what
//! lies downstream of a set of entities.
//!
//! ## Design Philosophy
//!
//! - **Never fail on data** - Rows that do not fit the mapping are skipped and reported
//! - **Deterministic** - Output order follows row order, mapping order and edge order
//! - **Immutable datasets** - Filters return new datasets; derived indexes are rebuilt
//! - **Library first, CLI second**
//!
//! ## Quick Start
//!
//! ```
//! use rowgraph::{analyze_impact, find_paths, GraphBuilder, EntityId};
//! use rowgraph::mapping::{ClassDefinition, MappingConfiguration, RawData, RelationshipDefinition};
//!
//! let rows = serde_json::json!([
//!     { "host": "web1", "app": "shop" },
//!     { "host": "web2", "app": "shop" },
//! ]);
//! let raw: RawData = serde_json::from_value(rows)?;
//!
//! let mapping = MappingConfiguration {
//!     classes: vec![
//!         ClassDefinition {
//!             id: "host".into(),
//!             source_column: "host".into(),
//!             ..Default::default()
//!         },
//!         ClassDefinition {
//!             id: "app".into(),
//!             source_column: "app".into(),
//!             ..Default::default()
//!         },
//!     ],
//!     relationships: vec![RelationshipDefinition {
//!         id: "runs".into(),
//!         source_class: "host".into(),
//!         target_class: "app".into(),
//!         source_column: "host".into(),
//!         target_column: "app".into(),
//!         ..Default::default()
//!     }],
//! };
//!
//! let output = GraphBuilder::new().build(&raw, &mapping);
//! assert_eq!(output.dataset.entities.len(), 3);
//! assert_eq!(output.dataset.relationships.len(), 2);
//!
//! let paths = find_paths(
//!     &output.dataset,
//!     &[EntityId::from("host:web1")],
//!     &[EntityId::from("app:shop")],
//!     10,
//! );
//! assert_eq!(paths.metrics.total_paths, 1);
//!
//! let impact = analyze_impact(&output.dataset, &[EntityId::from("host:web2")], 3);
//! assert_eq!(impact.direct_impact, vec![EntityId::from("app:shop")]);
//! # Ok::<(), serde_json::Error>(())
//! ```

#![forbid(unsafe_code)]

pub mod adjacency;
pub mod analysis;
pub mod builder;
pub mod config;
pub mod domain;
pub mod error;
pub mod filter;
pub mod mapping;
pub mod palette;
pub mod report;

pub use adjacency::AdjacencyIndex;
pub use analysis::{
    analyze_impact, analyze_impact_in, find_paths, find_paths_in, ImpactAnalysisResult,
    PathAnalysisResult, WorkBudget,
};
pub use builder::{build_dataset, BuildOutput, GraphBuilder};
pub use config::Settings;
pub use domain::{Dataset, Entity, EntityId, Metadata, Relationship, RelationshipId};
pub use error::{Error, Result};
pub use filter::{
    extract_reachable_subgraph, filter_by_node_types, filter_by_node_types_in, filter_dataset,
    filter_dataset_in, FilterOutput,
};
pub use mapping::{MappingConfiguration, RawData};
pub use report::BuildReport;
