use std::net::SocketAddr;
use orderpad_api::{app, AppState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "orderpad_api=debug,orderpad_core=debug,orderpad_store=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = orderpad_store::app_config::Config::load().expect("Failed to load config");
    tracing::info!("Starting Orderpad API on port {}", config.server.port);
    tracing::info!(
        shops = %config.catalog.shops_source,
        products = %config.catalog.products_source,
        exports = %config.export.directory,
        "Catalog and export locations"
    );

    let app_state = AppState::from_config(&config).expect("Failed to build application state");
    let app = app(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listener");
    axum::serve(listener, app).await.expect("Server error");
}
