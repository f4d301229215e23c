pub mod repository;
pub mod transmit;
pub mod submission;

pub use repository::{validate_file_name, CatalogSource, ExportError, ExportSink, ExportedFile};
pub use transmit::{Ack, OrderTransmitter, TransmitError};
pub use submission::{ExportStatus, RemoteStatus, SubmissionPipeline, SubmissionReceipt};

use orderpad_order::OrderError;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    ValidationError(#[from] OrderError),
    #[error("Internal service error: {0}")]
    InternalError(String),
}

pub type CoreResult<T> = Result<T, CoreError>;
