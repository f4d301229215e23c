use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use orderpad_api::{app, AppState};
use orderpad_catalog::{Catalog, LoadError, Product, ProductImage, Shop, Variant};
use orderpad_core::{
    validate_file_name, Ack, CatalogSource, ExportError, ExportSink, ExportedFile, OrderTransmitter,
    TransmitError,
};
use orderpad_order::{ExportFile, ExportNaming, OrderRecord};
use orderpad_store::app_config::FormConfig;
use serde_json::{json, Value};
use tower::ServiceExt;

const IPHONE: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) AppleWebKit/605.1.15";

struct StubCatalog {
    available: bool,
}

#[async_trait]
impl CatalogSource for StubCatalog {
    async fn load_shops(&self) -> Result<Vec<Shop>, LoadError> {
        if !self.available {
            return Err(LoadError::unreachable("shops.json", "connection refused"));
        }
        Ok(vec![
            Shop { name: "Shop A".to_string() },
            Shop { name: "Shop B".to_string() },
        ])
    }

    async fn load_catalog(&self) -> Result<Catalog, LoadError> {
        if !self.available {
            return Err(LoadError::malformed("products.json", "expected value at line 1"));
        }
        Ok(Catalog::new(vec![Product {
            title: "Widget A".to_string(),
            images: vec![ProductImage { src: "https://cdn.example/widget-a.png".to_string() }],
            variants: vec![
                Variant { title: "12".to_string(), price: Some("4.50".to_string()), sku: None },
                Variant { title: "Red".to_string(), price: Some("5.00".to_string()), sku: Some("WA-R".to_string()) },
            ],
        }]))
    }
}

#[derive(Default)]
struct MemoryExports {
    files: Mutex<HashMap<String, ExportFile>>,
}

#[async_trait]
impl ExportSink for MemoryExports {
    async fn save(&self, file: &ExportFile) -> Result<ExportedFile, ExportError> {
        validate_file_name(&file.file_name)?;
        self.files.lock().unwrap().insert(file.file_name.clone(), file.clone());
        Ok(ExportedFile {
            file_name: file.file_name.clone(),
            location: format!("memory://{}", file.file_name),
            bytes: file.contents.len(),
        })
    }

    async fn load(&self, file_name: &str) -> Result<Option<ExportFile>, ExportError> {
        validate_file_name(file_name)?;
        Ok(self.files.lock().unwrap().get(file_name).cloned())
    }
}

struct StubCollector {
    fail: bool,
    received: Mutex<Vec<OrderRecord>>,
}

#[async_trait]
impl OrderTransmitter for StubCollector {
    async fn submit(&self, record: &OrderRecord) -> Result<Ack, TransmitError> {
        self.received.lock().unwrap().push(record.clone());
        if self.fail {
            Err(TransmitError::Status { status: 500, body: "Internal Server Error".to_string() })
        } else {
            Ok(Ack("Success".to_string()))
        }
    }
}

struct Harness {
    state: AppState,
    exports: Arc<MemoryExports>,
    collector: Arc<StubCollector>,
}

fn harness(catalog_available: bool, collector_fails: bool, naming: ExportNaming) -> Harness {
    let exports = Arc::new(MemoryExports::default());
    let collector = Arc::new(StubCollector { fail: collector_fails, received: Mutex::new(Vec::new()) });
    let form = FormConfig {
        quantity_options: vec![0, 6, 12, 24],
        default_order_date_to_today: false,
        record_device_type: true,
    };

    let state = AppState::new(
        Arc::new(StubCatalog { available: catalog_available }),
        exports.clone(),
        Some(collector.clone() as Arc<dyn OrderTransmitter>),
        form,
        naming,
    );

    Harness { state, exports, collector }
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn post_order(body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/v1/orders")
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::USER_AGENT, IPHONE)
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn reference_order() -> Value {
    json!({
        "shopName": "Shop A",
        "orderDate": "2024-01-15",
        "fields": [
            {"name": "WidgetA_12", "value": "24"},
            {"name": "WidgetB_Red", "value": "0"},
            {"name": "WidgetC", "value": "abc"}
        ]
    })
}

#[tokio::test]
async fn test_health() {
    let h = harness(true, false, ExportNaming::Fixed);
    let response = app(h.state)
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_shops_and_form_render_from_catalog() {
    let h = harness(true, false, ExportNaming::Fixed);

    let response = app(h.state.clone())
        .oneshot(Request::builder().uri("/v1/shops").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["shops"], json!([{"name": "Shop A"}, {"name": "Shop B"}]));
    assert_eq!(body["error"], Value::Null);

    let response = app(h.state)
        .oneshot(Request::builder().uri("/v1/form").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["status"], "ready");

    let section = &body["form"]["sections"][0];
    assert_eq!(section["title"], "Widget A");
    assert_eq!(section["image"], "https://cdn.example/widget-a.png");
    assert_eq!(section["controls"][0]["name"], "Widget_A_12");
    assert_eq!(section["controls"][1]["name"], "Widget_A_Red_WA-R");
    assert_eq!(section["controls"][0]["options"], json!([0, 6, 12, 24]));
}

#[tokio::test]
async fn test_catalog_failure_degrades_to_placeholders() {
    let h = harness(false, false, ExportNaming::Fixed);

    let response = app(h.state.clone())
        .oneshot(Request::builder().uri("/v1/shops").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["shops"], json!([]));
    assert_eq!(body["error"], "Shops could not be loaded");

    let response = app(h.state.clone())
        .oneshot(Request::builder().uri("/v1/form").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "unavailable");
    assert_eq!(body["message"], "Products could not be loaded");

    // Ordering still works without the catalog
    let response = app(h.state).oneshot(post_order(reference_order())).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn test_submit_reference_order() {
    let h = harness(true, false, ExportNaming::Fixed);

    let response = app(h.state).oneshot(post_order(reference_order())).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    assert_eq!(
        body["record"],
        json!({"shopName": "Shop A", "orderDate": "2024-01-15", "deviceType": "Mobile", "WidgetA_12": 24})
    );
    assert_eq!(body["notice"], "Order submitted");
    assert_eq!(body["remote"], json!({"status": "acknowledged", "ack": "Success"}));
    assert_eq!(body["export"]["status"], "saved");
    assert_eq!(body["downloads"], json!(["/v1/exports/order.json", "/v1/exports/order.csv"]));
    assert!(body["submissionId"].is_string());

    let files = h.exports.files.lock().unwrap();
    let csv = &files["order.csv"].contents;
    let product_rows: Vec<&str> = csv.split("Product,Quantity\n").nth(1).unwrap().lines().collect();
    assert_eq!(product_rows, vec!["WidgetA_12,24"]);
    assert!(csv.starts_with("Shop Name,Shop A\nOrder Date,2024-01-15\nDevice Type,Mobile\n\n"));

    let received = h.collector.received.lock().unwrap();
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].quantity("WidgetA_12"), Some(24));
}

#[tokio::test]
async fn test_missing_shop_is_rejected_without_side_effects() {
    let h = harness(true, false, ExportNaming::Fixed);

    let mut order = reference_order();
    order["shopName"] = json!("");

    let response = app(h.state).oneshot(post_order(order)).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Please select a shop");

    assert!(h.exports.files.lock().unwrap().is_empty());
    assert!(h.collector.received.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_missing_date_is_rejected() {
    let h = harness(true, false, ExportNaming::Fixed);

    let mut order = reference_order();
    order.as_object_mut().unwrap().remove("orderDate");

    let response = app(h.state).oneshot(post_order(order)).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "Please select an order date");
}

#[tokio::test]
async fn test_collector_failure_still_exports() {
    let h = harness(true, true, ExportNaming::Timestamped);

    let response = app(h.state).oneshot(post_order(reference_order())).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    assert_eq!(body["notice"], "Order submitted, but the sheet update failed");
    assert_eq!(body["remote"]["status"], "failed");
    assert_eq!(body["downloads"].as_array().unwrap().len(), 2);

    let files = h.exports.files.lock().unwrap();
    assert_eq!(files.len(), 2);
    assert!(files.keys().all(|name| name.starts_with("Shop_A-2024-01-15-")));
    assert!(files.keys().any(|name| name.ends_with(".csv")));
    assert!(files.keys().any(|name| name.ends_with(".json")));
}

#[tokio::test]
async fn test_exported_file_downloads_as_attachment() {
    let h = harness(true, false, ExportNaming::Fixed);

    let response = app(h.state.clone()).oneshot(post_order(reference_order())).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app(h.state.clone())
        .oneshot(Request::builder().uri("/v1/exports/order.json").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "application/json");
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"order.json\""
    );
    let body = body_json(response).await;
    assert_eq!(body["WidgetA_12"], 24);

    let response = app(h.state)
        .oneshot(Request::builder().uri("/v1/exports/nothing.csv").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_invalid_order_date_is_rejected() {
    let h = harness(true, false, ExportNaming::Fixed);

    let mut order = reference_order();
    order["orderDate"] = json!("15/01/2024");

    let response = app(h.state).oneshot(post_order(order)).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["error"],
        "Order date '15/01/2024' is not a valid YYYY-MM-DD date"
    );
    assert!(h.exports.files.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_invalid_export_name_is_rejected() {
    let h = harness(true, false, ExportNaming::Fixed);

    let response = app(h.state)
        .oneshot(Request::builder().uri("/v1/exports/..%2Fsecrets").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "Invalid export file name: ../secrets");
}

#[tokio::test]
async fn test_download_link_works_for_shop_with_url_delimiters() {
    let h = harness(true, false, ExportNaming::Timestamped);

    let mut order = reference_order();
    order["shopName"] = json!("Shop #1");

    let response = app(h.state.clone()).oneshot(post_order(order)).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    let link = body["downloads"][1].as_str().unwrap().to_string();
    assert!(link.starts_with("/v1/exports/Shop_1-2024-01-15-"), "{}", link);

    let response = app(h.state)
        .oneshot(Request::builder().uri(link.as_str()).body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let csv = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(csv.starts_with("Shop Name,Shop #1\n"));
    assert!(csv.ends_with("Product,Quantity\nWidgetA_12,24"));
}
