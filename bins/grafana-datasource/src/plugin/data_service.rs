use futures::stream::FuturesOrdered;
use grafana_plugin_sdk::backend::{self, async_trait, BoxDataResponseStream, DataResponse};
use nrql_frames::{BuildOptions, FrameBuilder};

use super::error::{QueryError, SettingsError};
use super::executor::NerdGraphExecutor;
use super::frame::to_sdk_frame;
use super::query::NrqlQuery;
use super::settings::DatasourceSettings;
use super::NrqlPlugin;

// ═══════════════════════════════════════════════════════════════
//  DataService
// ═══════════════════════════════════════════════════════════════

#[async_trait]
impl backend::DataService for NrqlPlugin {
    type Query = NrqlQuery;
    type QueryError = QueryError;
    type Stream = BoxDataResponseStream<Self::QueryError>;

    async fn query_data(
        &self,
        request: backend::QueryDataRequest<Self::Query, Self>,
    ) -> Self::Stream {
        let settings =
            DatasourceSettings::from_instance(request.plugin_context.instance_settings.as_ref());
        let http = self.http.clone();

        Box::pin(
            request
                .queries
                .into_iter()
                .map(|q| {
                    let settings = settings.clone();
                    let http = http.clone();
                    async move {
                        match settings {
                            Ok(settings) => handle_query(&http, &settings, &q).await,
                            Err(e) => Err(settings_error(&q.ref_id, e)),
                        }
                    }
                })
                .collect::<FuturesOrdered<_>>(),
        )
    }
}

fn settings_error(ref_id: &str, e: SettingsError) -> QueryError {
    QueryError::new(ref_id, format!("invalid data source settings: {e}"))
}

// ═══════════════════════════════════════════════════════════════
//  Query handler: execute, then project into frames
// ═══════════════════════════════════════════════════════════════

async fn handle_query(
    http: &reqwest::Client,
    settings: &DatasourceSettings,
    query: &backend::DataQuery<NrqlQuery>,
) -> Result<DataResponse, QueryError> {
    let ref_id = query.ref_id.clone();
    let from = query.time_range.from;
    let to = query.time_range.to;

    let nrql = query.query.expand(from, to);
    if nrql.is_empty() {
        return Err(QueryError::new(ref_id, "query text is required"));
    }

    let account_id = query
        .query
        .account_id()
        .or(settings.account_id)
        .ok_or_else(|| QueryError::new(ref_id.clone(), "account id is required"))?;

    let executor = NerdGraphExecutor::new(http.clone(), settings);
    let result = executor.execute(account_id, &nrql).await.map_err(|e| {
        tracing::warn!(ref_id = %ref_id, account_id, error = %e, "NRQL query failed");
        QueryError::new(ref_id.clone(), e.to_string())
    })?;

    let options = BuildOptions::default()
        .with_time_range(from, to)
        .with_executed_query(nrql.as_str())
        .with_frame_name(ref_id.as_str());
    let frames = FrameBuilder::new(options).build(&result);

    let sdk_frames = frames
        .iter()
        .map(|frame| {
            frame
                .check()
                .map_err(|e| QueryError::new(ref_id.clone(), format!("frame error: {e}")))?;
            let sdk_frame = to_sdk_frame(frame);
            sdk_frame
                .check()
                .map_err(|e| QueryError::new(ref_id.clone(), format!("frame error: {e}")))?;
            Ok(sdk_frame)
        })
        .collect::<Result<Vec<_>, QueryError>>()?;
    let checked = sdk_frames
        .iter()
        .map(|frame| {
            frame
                .check()
                .map_err(|e| QueryError::new(ref_id.clone(), format!("frame error: {e}")))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(DataResponse::new(ref_id, checked))
}
