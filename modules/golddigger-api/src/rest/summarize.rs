use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::Deserialize;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use golddigger_common::DigestError;

use crate::AppState;

#[derive(Deserialize)]
pub struct SummarizeRequest {
    url: String,
}

/// Map a pipeline error to its HTTP status.
pub fn status_for(err: &DigestError) -> StatusCode {
    match err {
        DigestError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        DigestError::NotFound(_) => StatusCode::NOT_FOUND,
        DigestError::DependencyFailure(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

pub async fn api_summarize(
    State(state): State<Arc<AppState>>,
    body: Result<Json<SummarizeRequest>, JsonRejection>,
) -> impl IntoResponse {
    let Json(body) = match body {
        Ok(body) => body,
        Err(rejection) => {
            warn!(error = %rejection, "Rejected summarize request body");
            return (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({"error": "Request body must be {\"url\": string}"})),
            )
                .into_response();
        }
    };

    // Dropping the handler future (client went away) cancels the model call.
    let cancel = CancellationToken::new();
    let _cancel_on_drop = cancel.clone().drop_guard();

    match state.digest.summarize(&body.url, &cancel).await {
        Ok(result) => (StatusCode::OK, Json(result)).into_response(),
        Err(e) => {
            match e {
                DigestError::DependencyFailure(ref cause) => {
                    warn!(error = %format!("{cause:#}"), "Summarize failed");
                }
                _ => info!(error = %e, "Summarize rejected"),
            }
            (
                status_for(&e),
                Json(serde_json::json!({"error": e.public_message()})),
            )
                .into_response()
        }
    }
}
