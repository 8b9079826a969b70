use std::fmt;

use serde::Serialize;
use serde_json::Value;

use crate::reserved::FACET;
use crate::value::{ResultSet, Row, has_count, has_empty_facet, has_time_marker};

/// Layout family of a query result, decided from its values alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryShape {
    /// No rows.
    Empty,
    /// A single `count` row without facet or bucket markers.
    SimpleCount,
    /// `FACET ... TIMESERIES`, any aggregation.
    FacetedAggregationTimeseries,
    /// `count` per facet, no time buckets.
    FacetedCount,
    /// Everything else.
    Standard,
}

impl QueryShape {
    pub fn as_str(&self) -> &'static str {
        match self {
            QueryShape::Empty => "empty",
            QueryShape::SimpleCount => "simple_count",
            QueryShape::FacetedAggregationTimeseries => "faceted_aggregation_timeseries",
            QueryShape::FacetedCount => "faceted_count",
            QueryShape::Standard => "standard",
        }
    }
}

impl fmt::Display for QueryShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a row belongs to a grouped series.
///
/// A non-empty `facet` value always counts; an empty array never does; an
/// absent or null one defers to the result's grouping metadata.
fn row_is_faceted(row: &Row, grouped: bool) -> bool {
    match row.get(FACET) {
        _ if has_empty_facet(row) => false,
        None | Some(Value::Null) => grouped,
        Some(_) => true,
    }
}

/// Classify a result set. First match wins:
/// Empty, SimpleCount, FacetedAggregationTimeseries, FacetedCount, Standard.
pub fn classify(result: &ResultSet) -> QueryShape {
    let Some(first) = result.rows.first() else {
        return QueryShape::Empty;
    };
    let grouped = result.is_grouped();

    if result.rows.len() == 1
        && has_count(first)
        && !first.contains_key(FACET)
        && !has_time_marker(first)
    {
        return QueryShape::SimpleCount;
    }

    if result
        .rows
        .iter()
        .any(|row| has_time_marker(row) && row_is_faceted(row, grouped))
    {
        return QueryShape::FacetedAggregationTimeseries;
    }

    if has_count(first) && row_is_faceted(first, grouped) && !result.has_time_markers() {
        return QueryShape::FacetedCount;
    }

    QueryShape::Standard
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn result(rows: Value, facets: &[&str]) -> ResultSet {
        let rows = rows
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_object().unwrap().clone())
            .collect();
        ResultSet::new(rows, facets.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn test_empty() {
        assert_eq!(classify(&result(json!([]), &[])), QueryShape::Empty);
        assert_eq!(classify(&result(json!([]), &["service"])), QueryShape::Empty);
    }

    #[test]
    fn test_simple_count() {
        assert_eq!(
            classify(&result(json!([{"count": 42.0}]), &[])),
            QueryShape::SimpleCount
        );
    }

    #[test]
    fn test_count_with_own_markers_is_standard() {
        let rs = result(
            json!([{"count": 42.0, "beginTimeSeconds": 1, "endTimeSeconds": 2}]),
            &[],
        );
        assert_eq!(classify(&rs), QueryShape::Standard);
    }

    #[test]
    fn test_two_count_rows_without_facet_are_standard() {
        let rs = result(json!([{"count": 1}, {"count": 2}]), &[]);
        assert_eq!(classify(&rs), QueryShape::Standard);
    }

    #[test]
    fn test_faceted_count() {
        let rs = result(
            json!([{"count": 42.0, "facet": ["s1"]}, {"count": 24.0, "facet": ["s2"]}]),
            &["service"],
        );
        assert_eq!(classify(&rs), QueryShape::FacetedCount);

        // Row-level facet alone is enough.
        let rs = result(json!([{"count": 1, "facet": "s1"}]), &[]);
        assert_eq!(classify(&rs), QueryShape::FacetedCount);
    }

    #[test]
    fn test_faceted_timeseries_any_aggregation() {
        let rs = result(
            json!([
                {"sum.duration": 1.0, "beginTimeSeconds": 10, "endTimeSeconds": 20, "facet": "a"},
                {"sum.duration": 2.0, "beginTimeSeconds": 10, "endTimeSeconds": 20, "facet": "b"},
            ]),
            &["service"],
        );
        assert_eq!(classify(&rs), QueryShape::FacetedAggregationTimeseries);

        let rs = result(
            json!([{"count": 3, "endTimeSeconds": 20, "facet": ["a"]}]),
            &[],
        );
        assert_eq!(classify(&rs), QueryShape::FacetedAggregationTimeseries);
    }

    #[test]
    fn test_metadata_without_row_facet_still_groups() {
        let rs = result(json!([{"count": 3, "beginTimeSeconds": 10}]), &["service"]);
        assert_eq!(classify(&rs), QueryShape::FacetedAggregationTimeseries);
    }

    #[test]
    fn test_empty_facet_array_degrades_to_standard() {
        let rs = result(json!([{"count": 1, "facet": []}, {"count": 2, "facet": []}]), &[]);
        assert_eq!(classify(&rs), QueryShape::Standard);

        let rs = result(
            json!([{"count": 1, "facet": [], "beginTimeSeconds": 5}]),
            &["service"],
        );
        assert_eq!(classify(&rs), QueryShape::Standard);

        let rs = result(json!([{"count": 1, "facet": []}]), &[]);
        assert_eq!(classify(&rs), QueryShape::Standard);
    }

    #[test]
    fn test_faceted_non_count_without_markers_is_standard() {
        let rs = result(
            json!([{"average.duration": 1.0, "facet": "a"}, {"average.duration": 2.0, "facet": "b"}]),
            &["appName"],
        );
        assert_eq!(classify(&rs), QueryShape::Standard);
    }

    #[test]
    fn test_shape_names() {
        assert_eq!(QueryShape::FacetedCount.to_string(), "faceted_count");
        assert_eq!(QueryShape::Standard.as_str(), "standard");
    }
}
