use grafana_plugin_sdk::backend;
use serde_json::Value;

use super::error::SettingsError;

const US_ENDPOINT: &str = "https://api.newrelic.com/graphql";
const EU_ENDPOINT: &str = "https://api.eu.newrelic.com/graphql";

// ═══════════════════════════════════════════════════════════════
//  DatasourceSettings: jsonData + decrypted secure jsonData
// ═══════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct DatasourceSettings {
    /// Default account for queries that do not name one.
    pub account_id: Option<i64>,
    /// NerdGraph URL: explicit `endpoint`, else derived from `region`.
    pub endpoint: String,
    pub api_key: String,
}

impl DatasourceSettings {
    pub fn from_instance(
        settings: Option<&backend::DataSourceInstanceSettings<Value, Value>>,
    ) -> Result<Self, SettingsError> {
        let settings = settings.ok_or(SettingsError::Missing)?;
        Self::from_json(&settings.json_data, &settings.decrypted_secure_json_data)
    }

    /// `jsonData`: `accountId`, `region` (`us` | `eu`), `endpoint`.
    /// Secure data: `apiKey`.
    pub fn from_json(json_data: &Value, secure: &Value) -> Result<Self, SettingsError> {
        let api_key = secure
            .get("apiKey")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or(SettingsError::MissingApiKey)?
            .to_string();

        let endpoint = json_data
            .get("endpoint")
            .and_then(Value::as_str)
            .filter(|e| !e.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| default_endpoint(json_data.get("region")).to_string());

        Ok(Self {
            account_id: parse_account_id(json_data.get("accountId")),
            endpoint,
            api_key,
        })
    }
}

fn default_endpoint(region: Option<&Value>) -> &'static str {
    match region.and_then(Value::as_str) {
        Some(r) if r.eq_ignore_ascii_case("eu") => EU_ENDPOINT,
        _ => US_ENDPOINT,
    }
}

/// Account ids arrive as numbers or, from form inputs, as strings.
pub(crate) fn parse_account_id(value: Option<&Value>) -> Option<i64> {
    match value? {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
