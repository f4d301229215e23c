use std::sync::Arc;
use std::time::Duration;

use orderpad_core::{CatalogSource, ExportSink, OrderTransmitter, SubmissionPipeline};
use orderpad_order::ExportNaming;
use orderpad_store::app_config::{Config, FormConfig};
use orderpad_store::{DirectoryExportSink, ScriptEndpointClient, StaticCatalogSource};

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<dyn CatalogSource>,
    pub exports: Arc<dyn ExportSink>,
    pub pipeline: Arc<SubmissionPipeline>,
    pub form: FormConfig,
}

impl AppState {
    pub fn new(
        catalog: Arc<dyn CatalogSource>,
        exports: Arc<dyn ExportSink>,
        transmitter: Option<Arc<dyn OrderTransmitter>>,
        form: FormConfig,
        naming: ExportNaming,
    ) -> Self {
        let pipeline = SubmissionPipeline::new(exports.clone(), transmitter, naming);
        Self {
            catalog,
            exports,
            pipeline: Arc::new(pipeline),
            form,
        }
    }

    /// Wire the production collaborators described by the configuration.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let timeout = Duration::from_secs(config.remote.timeout_seconds);

        let catalog = StaticCatalogSource::new(
            &config.catalog.shops_source,
            &config.catalog.products_source,
            timeout,
        )?;
        let exports = DirectoryExportSink::new(&config.export.directory);

        let transmitter: Option<Arc<dyn OrderTransmitter>> = match config.remote.endpoint() {
            Some(url) => {
                tracing::info!("Orders will be forwarded to {}", url);
                Some(Arc::new(ScriptEndpointClient::new(url, timeout)?))
            }
            None => {
                tracing::info!("No collector endpoint configured; remote delivery disabled");
                None
            }
        };

        Ok(Self::new(
            Arc::new(catalog),
            Arc::new(exports),
            transmitter,
            config.form.clone(),
            config.export.naming,
        ))
    }
}
