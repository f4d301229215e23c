pub mod models;
pub mod builder;
pub mod export;

pub use models::{FieldValue, FormField, FormState, OrderRecord};
pub use builder::{build_order_data, parse_int, BuildOptions, OrderError};
pub use export::{csv_file_name, export_files, to_csv, to_json, ExportFile, ExportNaming};
