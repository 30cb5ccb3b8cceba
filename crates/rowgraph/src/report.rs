//! Build report: what the builder skipped and why.
//!
//! Mapping configurations are user-authored and often imperfect. The builder
//! never fails on a bad row; instead every skipped row/definition pair is
//! recorded here as a [`Skip`], so callers can surface data-quality problems
//! without losing the partial graph.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Why a row did not produce an entity or relationship.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SkipReason {
    /// The column is absent, null, blank, or a missing-value literal.
    MissingValue {
        /// Column that was read
        column: String,
    },

    /// The column holds an array or object instead of a scalar.
    NonScalarValue {
        /// Column that was read
        column: String,
    },

    /// A relationship endpoint does not match any built entity.
    DanglingReference {
        /// The full id that was looked up
        entity_id: String,
    },

    /// A relationship would connect an entity to itself.
    SelfLoop {
        /// The entity on both ends
        entity_id: String,
    },
}

impl SkipReason {
    /// Returns a static string identifying the reason kind.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingValue { .. } => "missing_value",
            Self::NonScalarValue { .. } => "non_scalar_value",
            Self::DanglingReference { .. } => "dangling_reference",
            Self::SelfLoop { .. } => "self_loop",
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingValue { column } => write!(f, "no value in column '{column}'"),
            Self::NonScalarValue { column } => {
                write!(f, "column '{column}' does not hold a scalar")
            }
            Self::DanglingReference { entity_id } => {
                write!(f, "no entity '{entity_id}' was built")
            }
            Self::SelfLoop { entity_id } => write!(f, "self-loop on '{entity_id}'"),
        }
    }
}

/// One skipped row for one class or relationship definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skip {
    /// 0-based row index in the raw data
    pub row: usize,
    /// Id of the class or relationship definition being applied
    pub definition: String,
    /// Why the row was skipped
    pub reason: SkipReason,
}

impl fmt::Display for Skip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "row {} ({}): {}", self.row, self.definition, self.reason)
    }
}

/// Summary of one build.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildReport {
    /// Entities emitted
    pub entities_created: usize,
    /// Relationships emitted
    pub relationships_created: usize,
    /// Rows that resolved to an entity id that already existed
    pub duplicate_entities: usize,
    /// Rows that resolved to a relationship id that already existed
    pub duplicate_relationships: usize,
    /// Every skipped row/definition pair, in build order
    pub skips: Vec<Skip>,
}

impl BuildReport {
    /// Record a skipped row.
    pub fn skip(&mut self, row: usize, definition: &str, reason: SkipReason) {
        tracing::debug!(row, definition, reason = %reason, "Skipped row");
        self.skips.push(Skip {
            row,
            definition: definition.to_string(),
            reason,
        });
    }

    /// Number of skips per reason kind.
    #[must_use]
    pub fn tally(&self) -> BTreeMap<&'static str, usize> {
        let mut tally = BTreeMap::new();
        for skip in &self.skips {
            *tally.entry(skip.reason.kind()).or_insert(0) += 1;
        }
        tally
    }

    /// Number of relationships dropped because an endpoint was never built.
    #[must_use]
    pub fn dangling_count(&self) -> usize {
        self.skips
            .iter()
            .filter(|s| matches!(s.reason, SkipReason::DanglingReference { .. }))
            .count()
    }

    /// Returns `true` if no row was skipped.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.skips.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tally_groups_by_kind() {
        let mut report = BuildReport::default();
        report.skip(
            0,
            "server",
            SkipReason::MissingValue {
                column: "host".to_string(),
            },
        );
        report.skip(
            3,
            "server",
            SkipReason::MissingValue {
                column: "host".to_string(),
            },
        );
        report.skip(
            1,
            "runs",
            SkipReason::DanglingReference {
                entity_id: "app:x".to_string(),
            },
        );

        let tally = report.tally();

        assert_eq!(tally.get("missing_value"), Some(&2));
        assert_eq!(tally.get("dangling_reference"), Some(&1));
        assert_eq!(report.dangling_count(), 1);
        assert!(!report.is_clean());
    }

    #[test]
    fn skip_display_includes_row_definition_and_reason() {
        let skip = Skip {
            row: 7,
            definition: "runs".to_string(),
            reason: SkipReason::SelfLoop {
                entity_id: "server:a".to_string(),
            },
        };

        let display = skip.to_string();

        assert!(display.contains("row 7"));
        assert!(display.contains("runs"));
        assert!(display.contains("server:a"));
    }

    #[test]
    fn reason_serializes_with_kind_tag() {
        let json = serde_json::to_value(SkipReason::NonScalarValue {
            column: "tags".to_string(),
        })
        .unwrap();

        assert_eq!(json["kind"], "non_scalar_value");
        assert_eq!(json["column"], "tags");
    }
}
