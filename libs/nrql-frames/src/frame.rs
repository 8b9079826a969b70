use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::FormatError;

/// Preferred panel type for a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visualization {
    Table,
    Graph,
}

/// Nullable values of one column, tagged by element type.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "values", rename_all = "lowercase")]
pub enum ColumnValues {
    Time(Vec<Option<DateTime<Utc>>>),
    Number(Vec<Option<f64>>),
    Text(Vec<Option<String>>),
    Bool(Vec<Option<bool>>),
}

impl ColumnValues {
    pub fn len(&self) -> usize {
        match self {
            ColumnValues::Time(v) => v.len(),
            ColumnValues::Number(v) => v.len(),
            ColumnValues::Text(v) => v.len(),
            ColumnValues::Bool(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of null cells.
    pub fn null_count(&self) -> usize {
        match self {
            ColumnValues::Time(v) => v.iter().filter(|x| x.is_none()).count(),
            ColumnValues::Number(v) => v.iter().filter(|x| x.is_none()).count(),
            ColumnValues::Text(v) => v.iter().filter(|x| x.is_none()).count(),
            ColumnValues::Bool(v) => v.iter().filter(|x| x.is_none()).count(),
        }
    }

    pub fn as_numbers(&self) -> Option<&[Option<f64>]> {
        match self {
            ColumnValues::Number(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_times(&self) -> Option<&[Option<DateTime<Utc>>]> {
        match self {
            ColumnValues::Time(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_texts(&self) -> Option<&[Option<String>]> {
        match self {
            ColumnValues::Text(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_bools(&self) -> Option<&[Option<bool>]> {
        match self {
            ColumnValues::Bool(v) => Some(v),
            _ => None,
        }
    }
}

/// A named column. Labels identify the facet group a series belongs to.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Column {
    pub name: String,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,
    #[serde(flatten)]
    pub values: ColumnValues,
}

impl Column {
    pub fn new(name: impl Into<String>, values: ColumnValues) -> Self {
        Self {
            name: name.into(),
            labels: BTreeMap::new(),
            values,
        }
    }

    pub fn time(name: impl Into<String>, values: Vec<Option<DateTime<Utc>>>) -> Self {
        Self::new(name, ColumnValues::Time(values))
    }

    pub fn number(name: impl Into<String>, values: Vec<Option<f64>>) -> Self {
        Self::new(name, ColumnValues::Number(values))
    }

    pub fn text(name: impl Into<String>, values: Vec<Option<String>>) -> Self {
        Self::new(name, ColumnValues::Text(values))
    }

    pub fn boolean(name: impl Into<String>, values: Vec<Option<bool>>) -> Self {
        Self::new(name, ColumnValues::Bool(values))
    }

    pub fn with_label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.labels.insert(key.into(), value.into());
        self
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// One renderable table or series: the unit handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    pub name: String,
    pub columns: Vec<Column>,
    pub visualization: Visualization,
    /// Free-form annotations (`shape`, `executedQueryString`).
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub meta: Map<String, Value>,
}

impl Frame {
    pub fn new(name: impl Into<String>, visualization: Visualization) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
            visualization,
            meta: Map::new(),
        }
    }

    pub fn with_column(mut self, column: Column) -> Self {
        self.columns.push(column);
        self
    }

    pub fn with_columns(mut self, columns: impl IntoIterator<Item = Column>) -> Self {
        self.columns.extend(columns);
        self
    }

    pub fn with_meta(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.meta.insert(key.into(), value.into());
        self
    }

    /// First column with the given name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Length of the first column; every column has it after [`Frame::check`].
    pub fn row_count(&self) -> usize {
        self.columns.first().map_or(0, Column::len)
    }

    /// Verify every column has the same number of rows.
    pub fn check(&self) -> Result<(), FormatError> {
        let expected = self.row_count();
        match self.columns.iter().find(|c| c.len() != expected) {
            Some(column) => Err(FormatError::ColumnLength {
                frame: self.name.clone(),
                column: column.name.clone(),
                expected,
                actual: column.len(),
            }),
            None => Ok(()),
        }
    }
}
