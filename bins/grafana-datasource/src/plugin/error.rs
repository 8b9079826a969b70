use grafana_plugin_sdk::backend;

// ═══════════════════════════════════════════════════════════════
//  Error types
// ═══════════════════════════════════════════════════════════════

/// Grafana plugin error for individual queries.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct QueryError {
    pub ref_id: String,
    pub message: String,
}

impl QueryError {
    pub fn new(ref_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            ref_id: ref_id.into(),
            message: message.into(),
        }
    }
}

impl backend::DataQueryError for QueryError {
    fn ref_id(self) -> String {
        self.ref_id
    }
}

/// Data source settings that cannot produce a working executor.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SettingsError {
    #[error("data source settings are missing")]
    Missing,
    #[error("API key is not configured")]
    MissingApiKey,
}

/// Failure to obtain a result set from NerdGraph.
#[derive(Debug, thiserror::Error)]
pub enum ExecutorError {
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("NerdGraph HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("parse JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("NerdGraph: {0}")]
    GraphQl(String),
    #[error("NerdGraph response has no NRQL result")]
    MissingResult,
}
