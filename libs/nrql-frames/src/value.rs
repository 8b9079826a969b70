use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::FormatError;
use crate::reserved::{COUNT, DEFAULT_DIMENSION, FACET, is_time_marker};

/// One result row: field name → dynamically typed value.
///
/// Keys keep the order the executor produced them in. Different rows of the
/// same result may carry different keys and different value kinds.
pub type Row = Map<String, Value>;

/// Rows of one NRQL query plus its grouping metadata.
///
/// Deserializes from the NerdGraph `nrql` payload:
/// `{"results": [...], "metadata": {"facets": ["service", ...]}}`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "NrqlPayload")]
pub struct ResultSet {
    pub rows: Vec<Row>,
    /// Grouping dimension names, ordered like array-valued `facet` entries.
    pub facets: Vec<String>,
}

#[derive(Deserialize)]
struct NrqlPayload {
    #[serde(default)]
    results: Vec<Row>,
    #[serde(default)]
    metadata: Option<NrqlMetadata>,
}

#[derive(Deserialize)]
struct NrqlMetadata {
    #[serde(default)]
    facets: Option<Vec<String>>,
}

impl From<NrqlPayload> for ResultSet {
    fn from(payload: NrqlPayload) -> Self {
        let facets = payload
            .metadata
            .and_then(|m| m.facets)
            .unwrap_or_default();
        Self {
            rows: payload.results,
            facets,
        }
    }
}

impl ResultSet {
    pub fn new(rows: Vec<Row>, facets: Vec<String>) -> Self {
        Self { rows, facets }
    }

    /// Parse a NerdGraph `nrql` payload.
    pub fn from_json(json: &str) -> Result<Self, FormatError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_grouped(&self) -> bool {
        !self.facets.is_empty()
    }

    /// Dimension used to split faceted output: the first grouping name only.
    pub fn grouping_dimension(&self) -> &str {
        self.facets
            .first()
            .map(String::as_str)
            .unwrap_or(DEFAULT_DIMENSION)
    }

    /// Whether any row carries `beginTimeSeconds` or `endTimeSeconds`.
    pub fn has_time_markers(&self) -> bool {
        self.rows.iter().any(has_time_marker)
    }
}

pub(crate) fn has_time_marker(row: &Row) -> bool {
    row.keys().any(|k| is_time_marker(k))
}

pub(crate) fn has_count(row: &Row) -> bool {
    row.contains_key(COUNT)
}

/// `facet` holding an empty array. Such rows are plain data rows.
pub(crate) fn has_empty_facet(row: &Row) -> bool {
    matches!(row.get(FACET), Some(Value::Array(items)) if items.is_empty())
}
