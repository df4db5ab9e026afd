use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use tracing::{error, info, info_span, Instrument};
use uuid::Uuid;

use crate::{agent::OrchestrationResult, AppState};

type ApiError = (StatusCode, Json<Value>);

fn bad_request() -> ApiError {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({"error": "Prompt is required and must be a string"})),
    )
}

/// `POST /agent/message` with `{ prompt, isRootstock? }`.
pub async fn agent_message_handler(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<OrchestrationResult>, ApiError> {
    let Json(body) = body.map_err(|e| {
        info!("Rejected agent request body: {}", e);
        bad_request()
    })?;

    let prompt = body
        .get("prompt")
        .and_then(Value::as_str)
        .filter(|p| !p.is_empty())
        .ok_or_else(bad_request)?
        .to_string();
    let is_rootstock = body
        .get("isRootstock")
        .and_then(Value::as_bool)
        .unwrap_or(false);

    let span = info_span!("agent_message", request_id = %Uuid::new_v4());
    async move {
        info!("Received prompt ({} chars, isRootstock={})", prompt.len(), is_rootstock);
        match state.orchestrator.handle(&prompt, is_rootstock).await {
            Ok(result) => {
                info!("Answered after {} tool step(s)", result.tool_results.len());
                Ok(Json(result))
            }
            Err(e) => {
                error!("Error processing request: {}", e);
                Err((
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({"error": "Internal server error"})),
                ))
            }
        }
    }
    .instrument(span)
    .await
}
