use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    routing::post,
    Json, Router,
};
use chrono::Local;
use orderpad_core::{ExportStatus, SubmissionReceipt};
use orderpad_order::{BuildOptions, FormState};
use orderpad_shared::DeviceType;
use serde::Serialize;

use crate::error::AppError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/v1/orders", post(submit_order))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSubmissionResponse {
    #[serde(flatten)]
    pub receipt: SubmissionReceipt,
    /// Links that download the exported files.
    pub downloads: Vec<String>,
}

/// POST /v1/orders
/// Build the order from the submitted form, export it and forward it to
/// the collector. Missing shop or date is a 400 prompt and nothing is written.
pub async fn submit_order(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(form): Json<FormState>,
) -> Result<(StatusCode, Json<OrderSubmissionResponse>), AppError> {
    let now = Local::now();

    let device_type = if state.form.record_device_type {
        let user_agent = headers
            .get(header::USER_AGENT)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default();
        Some(DeviceType::from_user_agent(user_agent))
    } else {
        None
    };

    let options = BuildOptions::new(now.date_naive())
        .default_date_to_today(state.form.default_order_date_to_today)
        .device_type(device_type);

    let receipt = state
        .pipeline
        .submit(&form, &options, now.time())
        .await
        .map_err(AppError::from_core)?;

    tracing::info!(
        submission_id = %receipt.submission_id,
        notice = %receipt.notice,
        "Order submission finished"
    );

    let downloads = match &receipt.export {
        ExportStatus::Saved { files } => files
            .iter()
            .map(|file| format!("/v1/exports/{}", file.file_name))
            .collect(),
        ExportStatus::Failed { .. } => Vec::new(),
    };

    Ok((
        StatusCode::CREATED,
        Json(OrderSubmissionResponse { receipt, downloads }),
    ))
}
