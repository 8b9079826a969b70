//! Field names with a fixed meaning in NRQL results.
//!
//! Every other module asks here instead of comparing string literals.

/// Result of `count(*)`.
pub const COUNT: &str = "count";
/// Facet value(s) of a grouped row: a scalar, or an array ordered like the
/// grouping metadata.
pub const FACET: &str = "facet";
/// Event timestamp, epoch milliseconds.
pub const TIMESTAMP: &str = "timestamp";
/// Start of a `TIMESERIES` bucket, epoch seconds.
pub const BEGIN_TIME_SECONDS: &str = "beginTimeSeconds";
/// End of a `TIMESERIES` bucket, epoch seconds.
pub const END_TIME_SECONDS: &str = "endTimeSeconds";

/// Time and facet names. Never catalogued as data columns.
pub const RESERVED_FIELDS: [&str; 4] = [FACET, TIMESTAMP, BEGIN_TIME_SECONDS, END_TIME_SECONDS];

/// Bucket markers of a `TIMESERIES` query.
pub const TIME_MARKERS: [&str; 2] = [BEGIN_TIME_SECONDS, END_TIME_SECONDS];

/// Key prefixes produced by NRQL aggregation functions, e.g. `average(duration)`
/// comes back as `average.duration`.
pub const AGGREGATION_PREFIXES: [&str; 18] = [
    "sum.",
    "average.",
    "min.",
    "max.",
    "median.",
    "percentile.",
    "histogram.",
    "uniques.",
    "earliest.",
    "latest.",
    "rate.",
    "stddev.",
    "variance.",
    "apdex.",
    "round.",
    "percentage.",
    "getField.",
    "uniqueCount.",
];

pub const HISTOGRAM_PREFIX: &str = "histogram.";
pub const UNIQUES_PREFIX: &str = "uniques.";
pub const PERCENTILE_PREFIX: &str = "percentile.";
pub const EARLIEST_PREFIX: &str = "earliest.";
pub const LATEST_PREFIX: &str = "latest.";

/// Name of the time column the engine prepends to graph frames.
pub const TIME_COLUMN: &str = "time";

/// Fallback grouping dimension when a result has facet values but no metadata.
pub const DEFAULT_DIMENSION: &str = FACET;

pub fn is_reserved(name: &str) -> bool {
    RESERVED_FIELDS.contains(&name)
}

pub fn is_time_marker(name: &str) -> bool {
    TIME_MARKERS.contains(&name)
}

/// `count`, or a name carrying one of [`AGGREGATION_PREFIXES`].
pub fn is_aggregation(name: &str) -> bool {
    name == COUNT || AGGREGATION_PREFIXES.iter().any(|p| name.starts_with(p))
}
