use async_trait::async_trait;
use orderpad_catalog::{parse_shops, Catalog, LoadError, Shop};
use orderpad_core::CatalogSource;
use std::path::PathBuf;
use std::time::Duration;

/// Where a static document lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceLocation {
    File(PathBuf),
    Url(String),
}

impl SourceLocation {
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.starts_with("http://") || raw.starts_with("https://") {
            SourceLocation::Url(raw.to_string())
        } else {
            SourceLocation::File(PathBuf::from(raw))
        }
    }

    fn describe(&self) -> String {
        match self {
            SourceLocation::File(path) => path.display().to_string(),
            SourceLocation::Url(url) => url.clone(),
        }
    }
}

/// Catalog backed by two static JSON documents, re-read on every request
/// so edits show up without a restart.
pub struct StaticCatalogSource {
    shops: SourceLocation,
    products: SourceLocation,
    client: reqwest::Client,
}

impl StaticCatalogSource {
    pub fn new(shops: &str, products: &str, timeout: Duration) -> Result<Self, LoadError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LoadError::unreachable("http client", e))?;

        Ok(Self {
            shops: SourceLocation::parse(shops),
            products: SourceLocation::parse(products),
            client,
        })
    }

    async fn fetch(&self, location: &SourceLocation) -> Result<String, LoadError> {
        match location {
            SourceLocation::File(path) => tokio::fs::read_to_string(path)
                .await
                .map_err(|e| LoadError::unreachable(location.describe(), e)),
            SourceLocation::Url(url) => {
                let response = self
                    .client
                    .get(url)
                    .header("Accept", "application/json")
                    .send()
                    .await
                    .map_err(|e| LoadError::unreachable(url.as_str(), e))?;

                let status = response.status();
                if !status.is_success() {
                    return Err(LoadError::unreachable(
                        url.as_str(),
                        format!("HTTP {}", status.as_u16()),
                    ));
                }

                response
                    .text()
                    .await
                    .map_err(|e| LoadError::unreachable(url.as_str(), e))
            }
        }
    }
}

#[async_trait]
impl CatalogSource for StaticCatalogSource {
    async fn load_shops(&self) -> Result<Vec<Shop>, LoadError> {
        let body = self.fetch(&self.shops).await?;
        let shops = parse_shops(&self.shops.describe(), &body)?;
        tracing::debug!(count = shops.len(), source = %self.shops.describe(), "Loaded shops");
        Ok(shops)
    }

    async fn load_catalog(&self) -> Result<Catalog, LoadError> {
        let body = self.fetch(&self.products).await?;
        let catalog = Catalog::from_json(&self.products.describe(), &body)?;
        tracing::debug!(count = catalog.products.len(), source = %self.products.describe(), "Loaded catalog");
        Ok(catalog)
    }
}
