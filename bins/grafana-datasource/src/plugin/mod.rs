mod query;
mod error;
mod executor;
mod frame;
mod settings;
mod data_service;

use grafana_plugin_sdk::prelude::*;

// ═══════════════════════════════════════════════════════════════
//  Plugin struct
// ═══════════════════════════════════════════════════════════════

/// New Relic NRQL data source.
///
/// Stateless apart from the pooled HTTP client; settings are read from
/// each request's plugin context.
#[derive(Clone, Debug, GrafanaPlugin)]
#[grafana_plugin(plugin_type = "datasource")]
pub struct NrqlPlugin {
    http: reqwest::Client,
}

impl NrqlPlugin {
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
        }
    }
}
