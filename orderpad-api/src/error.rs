use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use orderpad_core::CoreError;
use orderpad_order::OrderError;
use orderpad_shared::Notice;
use serde_json::json;

#[derive(Debug)]
pub enum AppError {
    ValidationError(String),
    NotFoundError(String),
    InternalServerError(String),
}

impl AppError {
    /// Map a pipeline failure to the prompt shown to the user.
    pub fn from_core(err: CoreError) -> Self {
        match err {
            CoreError::ValidationError(order_error) => match notice_for(&order_error) {
                Some(notice) => AppError::ValidationError(notice.message()),
                None => AppError::InternalServerError(order_error.to_string()),
            },
            CoreError::InternalError(msg) => AppError::InternalServerError(msg),
        }
    }
}

fn notice_for(err: &OrderError) -> Option<Notice> {
    match err {
        OrderError::MissingField("orderDate") => Some(Notice::SelectOrderDate),
        OrderError::MissingField(_) => Some(Notice::SelectShop),
        OrderError::InvalidDate(value) => Some(Notice::InvalidOrderDate(value.clone())),
        OrderError::Serialization(_) => None,
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFoundError(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::InternalServerError(msg) => {
                tracing::error!("Internal Server Error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error".to_string())
            },
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}
