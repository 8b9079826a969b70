use chrono::DateTime;
use nrql_frames::{
    BuildOptions, ColumnValues, Frame, FrameBuilder, QueryShape, ResultSet, Visualization, classify,
};

fn builder() -> FrameBuilder {
    let now = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
    FrameBuilder::new(BuildOptions::default().with_now(now))
}

fn load(json: &str) -> ResultSet {
    ResultSet::from_json(json).unwrap()
}

fn numbers<'a>(frame: &'a Frame, name: &str) -> &'a [Option<f64>] {
    frame.column(name).unwrap().values.as_numbers().unwrap()
}

#[test]
fn simple_count_yields_table_and_two_point_graph() {
    let result = load(r#"{"results":[{"count":42.0}]}"#);
    assert_eq!(classify(&result), QueryShape::SimpleCount);

    let frames = builder().build(&result);
    assert_eq!(frames.len(), 2);

    assert_eq!(frames[0].visualization, Visualization::Table);
    assert_eq!(frames[0].row_count(), 1);
    assert_eq!(numbers(&frames[0], "count"), &[Some(42.0)]);

    assert_eq!(frames[1].visualization, Visualization::Graph);
    assert_eq!(frames[1].row_count(), 2);
    assert_eq!(numbers(&frames[1], "count"), &[Some(42.0), Some(42.0)]);
}

#[test]
fn faceted_count_yields_one_labelled_frame_per_facet() {
    let result = load(
        r#"{
            "results": [
                {"count": 42.0, "facet": ["s1"]},
                {"count": 24.0, "facet": ["s2"]}
            ],
            "metadata": {"facets": ["service"]}
        }"#,
    );
    assert_eq!(classify(&result), QueryShape::FacetedCount);

    let frames = builder().build(&result);
    assert_eq!(frames.len(), 2);
    for frame in &frames {
        assert!(frame.column("time").is_some());
        assert!(frame.column("count").is_some());
    }

    let s1 = frames
        .iter()
        .find(|f| {
            f.column("count").unwrap().labels.get("service").map(String::as_str) == Some("s1")
        })
        .unwrap();
    assert_eq!(numbers(s1, "count"), &[Some(42.0)]);
}

#[test]
fn faceted_timeseries_with_sum_is_split_and_time_ordered() {
    let result = load(
        r#"{
            "results": [
                {"beginTimeSeconds": 1000, "endTimeSeconds": 1060, "facet": "web", "sum.duration": 1.5},
                {"beginTimeSeconds": 1000, "endTimeSeconds": 1060, "facet": "worker", "sum.duration": 9.0},
                {"beginTimeSeconds": 1060, "endTimeSeconds": 1120, "facet": "web", "sum.duration": 2.5},
                {"beginTimeSeconds": 1060, "endTimeSeconds": 1120, "facet": "worker", "sum.duration": 8.0}
            ],
            "metadata": {"facets": ["appName"]}
        }"#,
    );
    assert_eq!(classify(&result), QueryShape::FacetedAggregationTimeseries);

    let frames = builder().build(&result);
    assert_eq!(frames.len(), 2);

    for (frame, expected) in frames.iter().zip([("web", [1.5, 2.5]), ("worker", [9.0, 8.0])]) {
        let (key, values) = expected;
        let column = frame.column("sum.duration").unwrap();
        assert_eq!(column.labels.get("appName").map(String::as_str), Some(key));
        assert_eq!(
            column.values,
            ColumnValues::Number(values.iter().map(|v| Some(*v)).collect())
        );

        let times: Vec<i64> = frame
            .column("time")
            .unwrap()
            .values
            .as_times()
            .unwrap()
            .iter()
            .map(|t| t.unwrap().timestamp())
            .collect();
        assert_eq!(times, vec![1000, 1060]);
    }
}

#[test]
fn type_drift_nulls_incompatible_rows() {
    let result = load(r#"{"results":[{"value":10.0},{"value":"oops"}]}"#);
    let frames = builder().build(&result);
    assert_eq!(frames.len(), 1);
    assert_eq!(numbers(&frames[0], "value"), &[Some(10.0), None]);
}

#[test]
fn rows_without_facet_are_left_out_of_groups() {
    let result = load(
        r#"{
            "results": [
                {"count": 1, "facet": ["a"]},
                {"count": 2},
                {"count": 3, "facet": ["b"]},
                {"count": 4, "facet": ["a"]}
            ],
            "metadata": {"facets": ["service"]}
        }"#,
    );
    let frames = builder().build(&result);
    let grouped: usize = frames.iter().map(Frame::row_count).sum();
    assert_eq!(grouped, 3);
    assert!(grouped < result.len());
}

#[test]
fn percentile_keys_expand_to_union_of_columns() {
    let result = load(
        r#"{"results":[
            {"percentile.duration": {"50": 10.0, "95": 20.0}},
            {"percentile.duration": {"50": 11.0, "99": 40.0}}
        ]}"#,
    );
    let frames = builder().build(&result);
    let frame = &frames[0];

    let expanded: Vec<&str> = frame
        .columns
        .iter()
        .map(|c| c.name.as_str())
        .filter(|n| n.starts_with("percentile.duration."))
        .collect();
    assert_eq!(
        expanded,
        vec![
            "percentile.duration.50",
            "percentile.duration.95",
            "percentile.duration.99"
        ]
    );
    assert_eq!(numbers(frame, "percentile.duration.50"), &[Some(10.0), Some(11.0)]);
    assert_eq!(numbers(frame, "percentile.duration.95"), &[Some(20.0), None]);
    assert_eq!(numbers(frame, "percentile.duration.99"), &[None, Some(40.0)]);
}

#[test]
fn empty_result_yields_no_frames() {
    let result = load(r#"{"results":[],"metadata":{"facets":["service"]}}"#);
    assert!(builder().build(&result).is_empty());
}

#[test]
fn frames_serialize_for_the_presentation_layer() {
    let result = load(r#"{"results":[{"count":7}]}"#);
    let frames = builder().build(&result);
    let json = serde_json::to_value(&frames).unwrap();
    assert_eq!(json[0]["visualization"], "table");
    assert_eq!(json[0]["columns"][0]["type"], "number");
    assert_eq!(json[1]["columns"][0]["type"], "time");
    assert_eq!(json[1]["meta"]["shape"], "simple_count");
}
