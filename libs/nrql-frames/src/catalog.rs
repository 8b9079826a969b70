//! Field discovery and per-field column type inference.
//!
//! Aggregation results are typed by their name (`percentile.duration`,
//! `histogram.duration`, ...). Every other field is typed by sampling all rows
//! and picking the first kind that occurred in the order
//! Number > String > Array > Object > Boolean. A single numeric row makes the
//! whole column numeric; rows that do not coerce become null cells.

use serde_json::Value;

use crate::coerce::{TimeUnit, as_bool, as_display_text, as_number, as_timestamp, parse_number};
use crate::frame::Column;
use crate::reserved::{
    EARLIEST_PREFIX, HISTOGRAM_PREFIX, LATEST_PREFIX, PERCENTILE_PREFIX, UNIQUES_PREFIX,
    is_aggregation, is_reserved,
};
use crate::value::Row;

/// Output type of a catalogued field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnType {
    Number,
    String,
    Boolean,
    Timestamp,
    ArrayAsText,
    ObjectAsText,
    /// Object of percentile → value, emitted as one number column per key.
    /// Without any object values it falls back to a single number column.
    PercentileExpansion,
}

/// Type a field by its aggregation naming convention, if it follows one.
pub fn convention_type(name: &str) -> Option<ColumnType> {
    if !is_aggregation(name) {
        return None;
    }
    if name.starts_with(HISTOGRAM_PREFIX) || name.starts_with(UNIQUES_PREFIX) {
        return Some(ColumnType::ArrayAsText);
    }
    if name.starts_with(PERCENTILE_PREFIX) {
        return Some(ColumnType::PercentileExpansion);
    }
    let selected = name
        .strip_prefix(EARLIEST_PREFIX)
        .or_else(|| name.strip_prefix(LATEST_PREFIX));
    if selected.is_some_and(|rest| rest.contains("timestamp")) {
        return Some(ColumnType::Timestamp);
    }
    Some(ColumnType::Number)
}

/// Value kinds seen for one field across all rows.
#[derive(Debug, Default, Clone, Copy)]
struct Sample {
    number: bool,
    numeric_string: bool,
    string: bool,
    array: bool,
    object: bool,
    boolean: bool,
}

impl Sample {
    fn record(&mut self, value: &Value) {
        match value {
            Value::Null => {}
            Value::Number(_) => self.number = true,
            Value::String(s) if parse_number(s).is_some() => self.numeric_string = true,
            Value::String(_) => self.string = true,
            Value::Array(_) => self.array = true,
            Value::Object(_) => self.object = true,
            Value::Bool(_) => self.boolean = true,
        }
    }

    fn resolve(&self) -> ColumnType {
        if self.number || self.numeric_string {
            ColumnType::Number
        } else if self.string {
            ColumnType::String
        } else if self.array {
            ColumnType::ArrayAsText
        } else if self.object {
            ColumnType::ObjectAsText
        } else if self.boolean {
            ColumnType::Boolean
        } else {
            // Present in some row, but null everywhere.
            ColumnType::String
        }
    }
}

/// One catalogued field.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogEntry {
    pub name: String,
    pub column_type: ColumnType,
    /// Union of object keys for `PercentileExpansion`, in first-seen order.
    pub percentile_keys: Vec<String>,
}

impl CatalogEntry {
    /// Names of the columns this entry projects to.
    pub fn column_names(&self) -> Vec<String> {
        match self.column_type {
            ColumnType::PercentileExpansion if !self.percentile_keys.is_empty() => self
                .percentile_keys
                .iter()
                .map(|key| expanded_name(&self.name, key))
                .collect(),
            _ => vec![self.name.clone()],
        }
    }
}

fn expanded_name(field: &str, key: &str) -> String {
    format!("{field}.{key}")
}

/// Non-reserved fields of a result set with their inferred column types.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldCatalog {
    entries: Vec<CatalogEntry>,
}

impl FieldCatalog {
    /// Catalogue every key present in any row, in first-seen order.
    ///
    /// Reserved time/facet names and `excluded` names are skipped.
    pub fn infer(rows: &[Row], excluded: &[String]) -> Self {
        let mut names: Vec<&str> = Vec::new();
        for row in rows {
            for key in row.keys() {
                if is_reserved(key) || excluded.iter().any(|e| e == key) {
                    continue;
                }
                if !names.contains(&key.as_str()) {
                    names.push(key);
                }
            }
        }

        let entries = names
            .into_iter()
            .map(|name| infer_entry(name, rows))
            .collect();
        Self { entries }
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn get(&self, name: &str) -> Option<&CatalogEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Output column names after percentile expansion.
    pub fn columns(&self) -> Vec<String> {
        self.entries.iter().flat_map(CatalogEntry::column_names).collect()
    }

    /// Materialize one column per output name over `rows`.
    ///
    /// Rows lacking a field, or holding a value that does not coerce to the
    /// column type, yield a null cell. Every column has `rows.len()` cells.
    pub fn project(&self, rows: &[&Row]) -> Vec<Column> {
        let mut columns = Vec::with_capacity(self.entries.len());
        for entry in &self.entries {
            project_entry(entry, rows, &mut columns);
        }
        columns
    }
}

fn infer_entry(name: &str, rows: &[Row]) -> CatalogEntry {
    let column_type = convention_type(name).unwrap_or_else(|| {
        let mut sample = Sample::default();
        for value in rows.iter().filter_map(|row| row.get(name)) {
            sample.record(value);
        }
        sample.resolve()
    });

    let percentile_keys = if column_type == ColumnType::PercentileExpansion {
        percentile_keys(name, rows)
    } else {
        Vec::new()
    };

    CatalogEntry {
        name: name.to_string(),
        column_type,
        percentile_keys,
    }
}

fn percentile_keys(name: &str, rows: &[Row]) -> Vec<String> {
    let mut keys: Vec<String> = Vec::new();
    for object in rows
        .iter()
        .filter_map(|row| row.get(name))
        .filter_map(Value::as_object)
    {
        for key in object.keys() {
            if !keys.contains(key) {
                keys.push(key.clone());
            }
        }
    }
    keys
}

fn project_entry(entry: &CatalogEntry, rows: &[&Row], out: &mut Vec<Column>) {
    let name = entry.name.as_str();
    let cells = || rows.iter().map(move |row| row.get(name).filter(|v| !v.is_null()));

    let column = match entry.column_type {
        ColumnType::Number => Column::number(name, cells().map(|v| v.and_then(as_number)).collect()),
        ColumnType::PercentileExpansion if entry.percentile_keys.is_empty() => {
            Column::number(name, cells().map(|v| v.and_then(as_number)).collect())
        }
        ColumnType::Boolean => Column::boolean(name, cells().map(|v| v.and_then(as_bool)).collect()),
        ColumnType::Timestamp => Column::time(
            name,
            cells()
                .map(|v| v.and_then(|v| as_timestamp(v, TimeUnit::Millis)))
                .collect(),
        ),
        ColumnType::String => {
            Column::text(name, cells().map(|v| v.map(as_display_text)).collect())
        }
        ColumnType::ArrayAsText => Column::text(
            name,
            cells()
                .map(|v| v.filter(|v| v.is_array()).map(as_display_text))
                .collect(),
        ),
        ColumnType::ObjectAsText => Column::text(
            name,
            cells()
                .map(|v| v.filter(|v| v.is_object()).map(as_display_text))
                .collect(),
        ),
        ColumnType::PercentileExpansion => {
            for key in &entry.percentile_keys {
                let values = cells()
                    .map(|v| v.and_then(|v| v.get(key.as_str())).and_then(as_number))
                    .collect();
                out.push(Column::number(expanded_name(name, key), values));
            }
            return;
        }
    };

    let degraded = column.values.null_count() - cells().filter(Option::is_none).count();
    if degraded > 0 {
        tracing::trace!(field = %name, degraded, "values not coercible to column type");
    }
    out.push(column);
}
