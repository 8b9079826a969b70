use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::settings::parse_account_id;

// ═══════════════════════════════════════════════════════════════
//  Query model: NRQL text plus optional account override
// ═══════════════════════════════════════════════════════════════

/// The query model sent from Grafana frontend.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NrqlQuery {
    #[serde(default)]
    pub query_text: String,
    /// Number or numeric string; falls back to the data source account.
    #[serde(default)]
    pub account_id: Option<serde_json::Value>,
}

impl NrqlQuery {
    pub fn account_id(&self) -> Option<i64> {
        parse_account_id(self.account_id.as_ref())
    }

    /// Query text with Grafana time macros substituted.
    ///
    /// - `$__timeFilter` → `SINCE <from ms> UNTIL <to ms>`
    /// - `$__from`, `$__to` → epoch milliseconds
    pub fn expand(&self, from: DateTime<Utc>, to: DateTime<Utc>) -> String {
        let from_ms = from.timestamp_millis();
        let to_ms = to.timestamp_millis();
        self.query_text
            .replace("$__timeFilter", &format!("SINCE {from_ms} UNTIL {to_ms}"))
            .replace("$__from", &from_ms.to_string())
            .replace("$__to", &to_ms.to_string())
            .trim()
            .to_string()
    }
}
