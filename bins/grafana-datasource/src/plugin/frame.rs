use grafana_plugin_sdk::data;
use grafana_plugin_sdk::prelude::*;
use nrql_frames::{ColumnValues, Frame, Visualization};

// ═══════════════════════════════════════════════════════════════
//  Engine frame → Grafana SDK frame
// ═══════════════════════════════════════════════════════════════

/// Convert an engine frame into a Grafana data frame.
///
/// Null cells become nullable field values; labels and the preferred
/// visualization carry over unchanged.
pub(crate) fn to_sdk_frame(frame: &Frame) -> data::Frame {
    let mut out = data::Frame::new(frame.name.clone());

    for column in &frame.columns {
        let name = column.name.clone();
        let mut field = match &column.values {
            ColumnValues::Time(v) => v.clone().into_opt_field(name),
            ColumnValues::Number(v) => v.clone().into_opt_field(name),
            ColumnValues::Text(v) => v.clone().into_opt_field(name),
            ColumnValues::Bool(v) => v.clone().into_opt_field(name),
        };
        field.labels = column.labels.clone();
        out = out.with_field(field);
    }

    let meta = out.meta.get_or_insert_with(data::Metadata::default);
    meta.preferred_visualisation = Some(match frame.visualization {
        Visualization::Table => data::VisType::Table,
        Visualization::Graph => data::VisType::Graph,
    });
    meta.executed_query_string = frame
        .meta
        .get("executedQueryString")
        .and_then(|v| v.as_str())
        .map(str::to_string);

    out
}
