//! Result set → frames, one layout per [`QueryShape`].

use chrono::{DateTime, TimeDelta, Utc};

use crate::catalog::FieldCatalog;
use crate::coerce::{TimeUnit, as_number, as_timestamp};
use crate::config::BuildOptions;
use crate::facet::{FacetGroup, FacetGrouper};
use crate::frame::{Column, Frame, Visualization};
use crate::reserved::{BEGIN_TIME_SECONDS, COUNT, TIME_COLUMN, TIMESTAMP};
use crate::shape::{QueryShape, classify};
use crate::value::{ResultSet, Row};

/// Plotted instant of a row: `timestamp` (ms), else `beginTimeSeconds` (s),
/// else `default`. Never absent.
pub fn derive_time(row: &Row, default: DateTime<Utc>) -> DateTime<Utc> {
    row.get(TIMESTAMP)
        .and_then(|v| as_timestamp(v, TimeUnit::Millis))
        .or_else(|| {
            row.get(BEGIN_TIME_SECONDS)
                .and_then(|v| as_timestamp(v, TimeUnit::Seconds))
        })
        .unwrap_or(default)
}

/// Assembles frames from a result set.
///
/// Holds no state beyond its options, so one builder can serve any number
/// of result sets and yields identical output for identical input.
#[derive(Debug, Clone)]
pub struct FrameBuilder {
    options: BuildOptions,
    now: DateTime<Utc>,
}

impl Default for FrameBuilder {
    fn default() -> Self {
        Self::new(BuildOptions::default())
    }
}

impl FrameBuilder {
    pub fn new(options: BuildOptions) -> Self {
        let now = options.now.unwrap_or_else(Utc::now);
        Self { options, now }
    }

    /// Instant used for rows carrying no time value.
    pub fn default_time(&self) -> DateTime<Utc> {
        self.options.time_range.map_or(self.now, |r| r.to)
    }

    pub fn build(&self, result: &ResultSet) -> Vec<Frame> {
        let mut shape = classify(result);
        let mut frames = match shape {
            QueryShape::Empty => Vec::new(),
            QueryShape::SimpleCount => self.simple_count(&result.rows[0]),
            QueryShape::FacetedCount => self.faceted_count(result),
            QueryShape::FacetedAggregationTimeseries => self.faceted_timeseries(result),
            QueryShape::Standard => vec![self.standard(result)],
        };
        if frames.is_empty() && !result.is_empty() {
            // Grouping metadata without any row-level facet value.
            tracing::debug!(%shape, rows = result.len(), "no facet groups, degrading to standard");
            shape = QueryShape::Standard;
            frames = vec![self.standard(result)];
        }
        tracing::debug!(
            %shape,
            rows = result.rows.len(),
            frames = frames.len(),
            "built frames"
        );
        frames
            .into_iter()
            .map(|frame| self.annotate(frame, shape))
            .collect()
    }

    /// One graph frame per pre-grouped subset.
    ///
    /// Each frame has a time column followed by the catalogue's columns over
    /// the group's rows, every value column labelled `{dimension: key}`.
    pub fn build_groups(
        &self,
        groups: &[FacetGroup<'_>],
        dimension: &str,
        catalog: &FieldCatalog,
    ) -> Vec<Frame> {
        groups
            .iter()
            .map(|group| {
                let values = catalog
                    .project(&group.rows)
                    .into_iter()
                    .map(|c| c.with_label(dimension, group.key.as_str()));
                Frame::new(group.key.as_str(), Visualization::Graph)
                    .with_column(self.time_column(&group.rows))
                    .with_columns(values)
            })
            .collect()
    }

    fn time_column(&self, rows: &[&Row]) -> Column {
        let default = self.default_time();
        Column::time(
            TIME_COLUMN,
            rows.iter().map(|row| Some(derive_time(row, default))).collect(),
        )
    }

    /// A one-cell table for stat panels and a flat two-point series for graphs.
    fn simple_count(&self, row: &Row) -> Vec<Frame> {
        let value = row.get(COUNT).and_then(as_number);
        let (from, to) = match self.options.time_range {
            Some(range) => (range.from, range.to),
            None => (self.now - TimeDelta::hours(1), self.now),
        };

        let table = Frame::new(COUNT, Visualization::Table)
            .with_column(Column::number(COUNT, vec![value]));
        let graph = Frame::new(COUNT, Visualization::Graph)
            .with_column(Column::time(TIME_COLUMN, vec![Some(from), Some(to)]))
            .with_column(Column::number(COUNT, vec![value, value]));
        vec![table, graph]
    }

    fn faceted_count(&self, result: &ResultSet) -> Vec<Frame> {
        let grouper = FacetGrouper::new(result.grouping_dimension());
        grouper
            .group(&result.rows)
            .iter()
            .map(|group| {
                let counts = group
                    .rows
                    .iter()
                    .map(|row| row.get(COUNT).and_then(as_number))
                    .collect();
                Frame::new(group.key.as_str(), Visualization::Graph)
                    .with_column(self.time_column(&group.rows))
                    .with_column(
                        Column::number(COUNT, counts)
                            .with_label(grouper.dimension(), group.key.as_str()),
                    )
            })
            .collect()
    }

    fn faceted_timeseries(&self, result: &ResultSet) -> Vec<Frame> {
        let dimension = result.grouping_dimension();
        let mut excluded = result.facets.clone();
        excluded.push(TIME_COLUMN.to_string());
        let catalog = FieldCatalog::infer(&result.rows, &excluded);
        let groups = FacetGrouper::new(dimension).group(&result.rows);
        self.build_groups(&groups, dimension, &catalog)
    }

    fn standard(&self, result: &ResultSet) -> Frame {
        let catalog = FieldCatalog::infer(&result.rows, &[TIME_COLUMN.to_string()]);
        let rows: Vec<&Row> = result.rows.iter().collect();
        Frame::new(self.options.frame_name.as_str(), Visualization::Graph)
            .with_column(self.time_column(&rows))
            .with_columns(catalog.project(&rows))
    }

    fn annotate(&self, frame: Frame, shape: QueryShape) -> Frame {
        let frame = frame.with_meta("shape", shape.as_str());
        match &self.options.executed_query {
            Some(query) => frame.with_meta("executedQueryString", query.as_str()),
            None => frame,
        }
    }
}
