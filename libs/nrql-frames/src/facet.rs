use std::collections::HashMap;

use serde_json::Value;

use crate::coerce::as_display_text;
use crate::reserved::FACET;
use crate::value::Row;

/// Rows sharing one facet value, in their original relative order.
#[derive(Debug, Clone, PartialEq)]
pub struct FacetGroup<'a> {
    pub key: String,
    pub rows: Vec<&'a Row>,
}

/// Group key of a row.
///
/// An array `facet` contributes its first element, a scalar contributes
/// itself. Absent, null and empty-array facets have no key.
pub fn facet_key(row: &Row) -> Option<String> {
    match row.get(FACET)? {
        Value::Null => None,
        Value::Array(items) => items
            .first()
            .filter(|v| !v.is_null())
            .map(as_display_text),
        other => Some(as_display_text(other)),
    }
}

/// Splits rows into per-dimension series.
#[derive(Debug, Clone)]
pub struct FacetGrouper {
    dimension: String,
}

impl FacetGrouper {
    pub fn new(dimension: impl Into<String>) -> Self {
        Self {
            dimension: dimension.into(),
        }
    }

    /// Dimension name used as the label key of grouped columns.
    pub fn dimension(&self) -> &str {
        &self.dimension
    }

    /// Groups ordered by first appearance of their key.
    ///
    /// Rows without a facet key are dropped from every group.
    pub fn group<'a>(&self, rows: &'a [Row]) -> Vec<FacetGroup<'a>> {
        let mut groups: Vec<FacetGroup<'a>> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();
        let mut dropped = 0usize;

        for row in rows {
            let Some(key) = facet_key(row) else {
                dropped += 1;
                continue;
            };
            match index.get(&key) {
                Some(&i) => groups[i].rows.push(row),
                None => {
                    index.insert(key.clone(), groups.len());
                    groups.push(FacetGroup {
                        key,
                        rows: vec![row],
                    });
                }
            }
        }

        if dropped > 0 {
            tracing::debug!(
                dimension = %self.dimension,
                dropped,
                "rows without a facet value excluded from grouping"
            );
        }
        groups
    }
}
