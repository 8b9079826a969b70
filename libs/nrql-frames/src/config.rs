use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::FormatError;

/// Requested query window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

/// Options for one [`FrameBuilder`](crate::builder::FrameBuilder) run.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildOptions {
    /// Span of the synthetic count series, and its end is the fallback
    /// instant for rows without a time value.
    #[serde(default)]
    pub time_range: Option<TimeRange>,

    /// Fixed "now". Defaults to the wall clock at builder construction.
    #[serde(default)]
    pub now: Option<DateTime<Utc>>,

    /// Query text echoed into frame metadata.
    #[serde(default)]
    pub executed_query: Option<String>,

    /// Name of the single frame of a standard result.
    #[serde(default = "default_frame_name")]
    pub frame_name: String,
}

fn default_frame_name() -> String {
    "response".to_string()
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            time_range: None,
            now: None,
            executed_query: None,
            frame_name: default_frame_name(),
        }
    }
}

impl BuildOptions {
    /// Parse options from a JSON string.
    pub fn parse(json: &str) -> Result<Self, FormatError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_time_range(mut self, from: DateTime<Utc>, to: DateTime<Utc>) -> Self {
        self.time_range = Some(TimeRange { from, to });
        self
    }

    pub fn with_now(mut self, now: DateTime<Utc>) -> Self {
        self.now = Some(now);
        self
    }

    pub fn with_executed_query(mut self, query: impl Into<String>) -> Self {
        self.executed_query = Some(query.into());
        self
    }

    pub fn with_frame_name(mut self, name: impl Into<String>) -> Self {
        self.frame_name = name.into();
        self
    }
}
