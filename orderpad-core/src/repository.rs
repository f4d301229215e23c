use async_trait::async_trait;
use orderpad_catalog::{Catalog, LoadError, Shop};
use orderpad_order::ExportFile;
use serde::Serialize;

/// Where the shop list and product catalog come from
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn load_shops(&self) -> Result<Vec<Shop>, LoadError>;

    async fn load_catalog(&self) -> Result<Catalog, LoadError>;
}

/// Destination for exported order files
#[async_trait]
pub trait ExportSink: Send + Sync {
    async fn save(&self, file: &ExportFile) -> Result<ExportedFile, ExportError>;

    /// Read back a previously saved file; `Ok(None)` when it does not exist.
    async fn load(&self, file_name: &str) -> Result<Option<ExportFile>, ExportError>;
}

/// Export names must be a single plain path component.
pub fn validate_file_name(file_name: &str) -> Result<(), ExportError> {
    let invalid = file_name.is_empty()
        || file_name == "."
        || file_name == ".."
        || file_name.contains(['/', '\\'])
        || file_name.chars().any(char::is_control);

    if invalid {
        Err(ExportError::InvalidFileName(file_name.to_string()))
    } else {
        Ok(())
    }
}

/// A file the sink accepted.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ExportedFile {
    pub file_name: String,
    pub location: String,
    pub bytes: usize,
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("Invalid export file name: {0}")]
    InvalidFileName(String),

    #[error("Failed to write {file_name}: {reason}")]
    WriteFailed {
        file_name: String,
        reason: String,
    },

    #[error("Failed to read {file_name}: {reason}")]
    ReadFailed {
        file_name: String,
        reason: String,
    },
}
