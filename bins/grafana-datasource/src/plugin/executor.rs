use nrql_frames::ResultSet;
use reqwest::header::CONTENT_TYPE;
use serde::Deserialize;

use super::error::ExecutorError;
use super::settings::DatasourceSettings;

const NRQL_DOCUMENT: &str = "query($accountId: Int!, $nrql: Nrql!) { \
actor { account(id: $accountId) { nrql(query: $nrql) { results metadata { facets } } } } }";

// ═══════════════════════════════════════════════════════════════
//  NerdGraph response envelope
// ═══════════════════════════════════════════════════════════════

#[derive(Debug, Deserialize)]
struct GraphQlResponse {
    #[serde(default)]
    data: Option<GraphQlData>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
struct GraphQlData {
    actor: Option<Actor>,
}

#[derive(Debug, Deserialize)]
struct Actor {
    account: Option<Account>,
}

#[derive(Debug, Deserialize)]
struct Account {
    nrql: Option<ResultSet>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

pub(crate) fn parse_response(body: &str) -> Result<ResultSet, ExecutorError> {
    let response: GraphQlResponse = serde_json::from_str(body)?;
    if !response.errors.is_empty() {
        let messages: Vec<&str> = response.errors.iter().map(|e| e.message.as_str()).collect();
        return Err(ExecutorError::GraphQl(messages.join("; ")));
    }
    response
        .data
        .and_then(|d| d.actor)
        .and_then(|a| a.account)
        .and_then(|a| a.nrql)
        .ok_or(ExecutorError::MissingResult)
}

// ═══════════════════════════════════════════════════════════════
//  NerdGraphExecutor: runs one NRQL query per call
// ═══════════════════════════════════════════════════════════════

#[derive(Debug, Clone)]
pub(crate) struct NerdGraphExecutor {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl NerdGraphExecutor {
    pub fn new(http: reqwest::Client, settings: &DatasourceSettings) -> Self {
        Self {
            http,
            endpoint: settings.endpoint.clone(),
            api_key: settings.api_key.clone(),
        }
    }

    pub async fn execute(&self, account_id: i64, nrql: &str) -> Result<ResultSet, ExecutorError> {
        let body = serde_json::json!({
            "query": NRQL_DOCUMENT,
            "variables": {"accountId": account_id, "nrql": nrql},
        });

        let resp = self
            .http
            .post(&self.endpoint)
            .header("API-Key", &self.api_key)
            .header(CONTENT_TYPE, "application/json")
            .body(serde_json::to_vec(&body)?)
            .send()
            .await?;

        let status = resp.status();
        let text = resp.text().await?;
        if !status.is_success() {
            return Err(ExecutorError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        parse_response(&text)
    }
}
