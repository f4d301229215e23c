use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Router,
};
use orderpad_core::ExportError;

use crate::error::AppError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/v1/exports/{file_name}", get(download_export))
}

/// GET /v1/exports/{file_name}
/// Serve an exported order file as a download.
pub async fn download_export(
    State(state): State<AppState>,
    Path(file_name): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let file = match state.exports.load(&file_name).await {
        Ok(Some(file)) => file,
        Ok(None) => return Err(AppError::NotFoundError(format!("No export named {}", file_name))),
        Err(ExportError::InvalidFileName(name)) => {
            return Err(AppError::ValidationError(format!("Invalid export file name: {}", name)))
        }
        Err(e) => return Err(AppError::InternalServerError(e.to_string())),
    };

    let content_disposition = format!("attachment; filename=\"{}\"", file.file_name);

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, file.content_type.to_string()),
            (header::CONTENT_DISPOSITION, content_disposition),
        ],
        file.contents,
    ))
}
