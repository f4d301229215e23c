pub mod app_config;
pub mod catalog_repo;
pub mod export_repo;
pub mod remote;

pub use catalog_repo::{SourceLocation, StaticCatalogSource};
pub use export_repo::DirectoryExportSink;
pub use remote::ScriptEndpointClient;
