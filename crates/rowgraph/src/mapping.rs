//! Tabular input and the user-authored mapping onto graph entities.
//!
//! File decoding (CSV, Excel) happens upstream; this module receives rows as
//! JSON objects and only interprets them through a [`MappingConfiguration`].
//! Column lookups are exact-match: no case folding or normalization.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::Path;

/// One data row: column name to value.
pub type Row = serde_json::Map<String, Value>;

/// Literal strings that upstream parsers emit for missing cells.
const MISSING_LITERALS: [&str; 2] = ["undefined", "null"];

/// Decoded tabular data handed over by the file parser.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawDataDocument")]
pub struct RawData {
    /// Column names in file order
    pub columns: Vec<String>,
    /// Rows in file order
    pub rows: Vec<Row>,
}

/// Accepted on-disk shapes for [`RawData`].
#[derive(Deserialize)]
#[serde(untagged)]
enum RawDataDocument {
    Table {
        #[serde(default)]
        columns: Option<Vec<String>>,
        rows: Vec<Row>,
    },
    Rows(Vec<Row>),
}

impl From<RawDataDocument> for RawData {
    fn from(doc: RawDataDocument) -> Self {
        match doc {
            RawDataDocument::Table {
                columns: Some(columns),
                rows,
            } => Self { columns, rows },
            RawDataDocument::Table { columns: None, rows } | RawDataDocument::Rows(rows) => {
                Self::from_rows(rows)
            }
        }
    }
}

impl RawData {
    /// Create raw data from rows, inferring columns in first-seen key order.
    #[must_use]
    pub fn from_rows(rows: Vec<Row>) -> Self {
        let mut columns: Vec<String> = Vec::new();
        for row in &rows {
            for key in row.keys() {
                if !columns.iter().any(|c| c == key) {
                    columns.push(key.clone());
                }
            }
        }
        Self { columns, rows }
    }

    /// Load raw data from a JSON file.
    ///
    /// The document is either `{"columns": [...], "rows": [...]}` or a bare
    /// array of row objects.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid JSON of
    /// either shape.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

/// Result of reading one cell for identity or label purposes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    /// Absent column, `null`, empty text, or a missing-value literal
    Missing,
    /// An array or object where a scalar was expected
    NonScalar,
    /// The value coerced to text
    Text(String),
}

impl Cell {
    /// The text value, if present.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Missing | Self::NonScalar => None,
        }
    }
}

/// Read `column` from `row`, coercing scalars to text.
///
/// Strings are taken as-is, without trimming. Integral numbers render
/// without a fraction (`1.0` reads as `1`), other numbers use their JSON
/// text, and booleans become `true`/`false`. Only an empty string or a
/// missing-value literal counts as missing.
#[must_use]
pub fn read_cell(row: &Row, column: &str) -> Cell {
    let text = match row.get(column) {
        None | Some(Value::Null) => return Cell::Missing,
        Some(Value::Array(_) | Value::Object(_)) => return Cell::NonScalar,
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => number_text(n),
        Some(Value::Bool(b)) => b.to_string(),
    };

    if text.is_empty() || MISSING_LITERALS.contains(&text.as_str()) {
        Cell::Missing
    } else {
        Cell::Text(text)
    }
}

/// Text of a JSON number, with integral floats written like integers.
fn number_text(n: &serde_json::Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() && f.is_finite() && f.fract() == 0.0 => {
            if f == 0.0 {
                "0".to_string()
            } else {
                format!("{f:.0}")
            }
        }
        _ => n.to_string(),
    }
}

/// How rows become entities of one type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassDefinition {
    /// Class id, used as the entity type and the id prefix
    pub id: String,
    /// Human-readable class name
    #[serde(default)]
    pub name: String,
    /// Column holding the entity's identifying value
    pub source_column: String,
    /// Column holding the display label (falls back to the source value)
    #[serde(default)]
    pub label_column: String,
    /// Columns copied into entity metadata
    #[serde(default)]
    pub metadata_columns: Vec<String>,
    /// Display color; the builder's palette is used when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// How one row becomes zero or one relationship.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationshipDefinition {
    /// Definition id, used as the relationship id prefix
    pub id: String,
    /// Relationship name, used as the relationship type
    #[serde(default)]
    pub name: String,
    /// Class id of the source entity
    pub source_class: String,
    /// Class id of the target entity
    pub target_class: String,
    /// Column holding the source entity's value
    pub source_column: String,
    /// Column holding the target entity's value
    pub target_column: String,
    /// Columns copied into relationship metadata
    #[serde(default)]
    pub metadata_columns: Vec<String>,
}

impl RelationshipDefinition {
    /// The relationship type: the name, or the id when the name is blank.
    #[must_use]
    pub fn relationship_type(&self) -> &str {
        if self.name.trim().is_empty() {
            &self.id
        } else {
            &self.name
        }
    }
}

/// User-authored mapping from columns to classes and relationships.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingConfiguration {
    /// Entity classes, applied in order
    #[serde(default)]
    pub classes: Vec<ClassDefinition>,
    /// Relationship definitions, applied in order
    #[serde(default)]
    pub relationships: Vec<RelationshipDefinition>,
}

impl MappingConfiguration {
    /// Load a mapping from a YAML or JSON file.
    ///
    /// Files with a `.json` extension are decoded as JSON, anything else as
    /// YAML.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or decoded.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        if is_json {
            serde_json::from_str(&content)
                .map_err(|e| Error::Mapping(format!("{}: {e}", path.display())))
        } else {
            serde_yaml::from_str(&content)
                .map_err(|e| Error::Mapping(format!("{}: {e}", path.display())))
        }
    }

    /// Look up a class definition by id.
    #[must_use]
    pub fn class(&self, id: &str) -> Option<&ClassDefinition> {
        self.classes.iter().find(|c| c.id == id)
    }
}
