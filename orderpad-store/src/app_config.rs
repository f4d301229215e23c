use orderpad_catalog::DEFAULT_QUANTITY_OPTIONS;
use orderpad_order::ExportNaming;
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub form: FormConfig,
    pub export: ExportConfig,
    #[serde(default)]
    pub remote: RemoteConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CatalogConfig {
    /// Path or http(s) URL of the shop list document.
    pub shops_source: String,
    /// Path or http(s) URL of the product catalog document.
    pub products_source: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct FormConfig {
    #[serde(default = "default_quantity_options")]
    pub quantity_options: Vec<u32>,
    #[serde(default)]
    pub default_order_date_to_today: bool,
    #[serde(default = "default_true")]
    pub record_device_type: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ExportConfig {
    pub directory: String,
    #[serde(default)]
    pub naming: ExportNaming,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RemoteConfig {
    /// Collector script URL; transmission is skipped when unset.
    pub endpoint_url: Option<String>,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

fn default_quantity_options() -> Vec<u32> { DEFAULT_QUANTITY_OPTIONS.to_vec() }
fn default_true() -> bool { true }
fn default_timeout_seconds() -> u64 { 10 }

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            quantity_options: default_quantity_options(),
            default_order_date_to_today: false,
            record_device_type: true,
        }
    }
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            endpoint_url: None,
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

impl RemoteConfig {
    /// The configured endpoint, ignoring blank values left by env overrides.
    pub fn endpoint(&self) -> Option<&str> {
        self.endpoint_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            .add_source(config::File::with_name("config/default"))
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Machine-specific overrides, not checked in
            .add_source(config::File::with_name("config/local").required(false))
            // Eg. `ORDERPAD__REMOTE__ENDPOINT_URL=https://...`
            .add_source(
                config::Environment::with_prefix("ORDERPAD")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("form.quantity_options")
                    .try_parsing(true),
            )
            .build()?;

        s.try_deserialize()
    }
}
