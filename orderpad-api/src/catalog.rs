use axum::{extract::State, routing::get, Json, Router};
use orderpad_catalog::{render_form, OrderForm, Shop};
use orderpad_shared::Notice;
use serde::Serialize;

use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/shops", get(list_shops))
        .route("/v1/form", get(order_form))
}

#[derive(Debug, Serialize)]
pub struct ShopsResponse {
    pub shops: Vec<Shop>,
    pub error: Option<Notice>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum FormResponse {
    Ready { form: OrderForm },
    Unavailable { message: Notice },
}

/// GET /v1/shops
/// Shop selector entries; an unreadable list renders as empty.
pub async fn list_shops(State(state): State<AppState>) -> Json<ShopsResponse> {
    match state.catalog.load_shops().await {
        Ok(shops) => Json(ShopsResponse { shops, error: None }),
        Err(e) => {
            tracing::error!(error = %e, "Failed to load shops");
            Json(ShopsResponse {
                shops: Vec::new(),
                error: Some(Notice::ShopsUnavailable),
            })
        }
    }
}

/// GET /v1/form
/// Quantity selectors for every product variant in the catalog.
pub async fn order_form(State(state): State<AppState>) -> Json<FormResponse> {
    match state.catalog.load_catalog().await {
        Ok(catalog) => {
            let form = render_form(&catalog, &state.form.quantity_options);
            tracing::debug!(controls = form.control_count(), "Rendered order form");
            Json(FormResponse::Ready { form })
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to load products");
            Json(FormResponse::Unavailable {
                message: Notice::CatalogUnavailable,
            })
        }
    }
}
