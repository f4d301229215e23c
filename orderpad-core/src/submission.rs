use std::sync::Arc;

use chrono::NaiveTime;
use orderpad_order::{build_order_data, export_files, BuildOptions, ExportFile, ExportNaming, FormState, OrderRecord};
use orderpad_shared::Notice;
use serde::Serialize;
use tracing::Instrument;
use uuid::Uuid;

use crate::repository::{ExportSink, ExportedFile};
use crate::transmit::OrderTransmitter;
use crate::{CoreError, CoreResult};

/// Outcome of writing the export files.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ExportStatus {
    Saved { files: Vec<ExportedFile> },
    Failed { message: String },
}

/// Outcome of forwarding the order to the remote collector.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum RemoteStatus {
    Acknowledged { ack: String },
    Failed { message: String },
    Skipped,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionReceipt {
    pub submission_id: Uuid,
    pub record: OrderRecord,
    pub export: ExportStatus,
    pub remote: RemoteStatus,
    pub notice: Notice,
}

/// Build, export and forward one submitted order form.
///
/// Validation failures stop the submission before any file is written.
/// After that, export and remote delivery run side by side and neither
/// one's failure prevents the other.
pub struct SubmissionPipeline {
    export_sink: Arc<dyn ExportSink>,
    transmitter: Option<Arc<dyn OrderTransmitter>>,
    naming: ExportNaming,
}

impl SubmissionPipeline {
    pub fn new(
        export_sink: Arc<dyn ExportSink>,
        transmitter: Option<Arc<dyn OrderTransmitter>>,
        naming: ExportNaming,
    ) -> Self {
        Self {
            export_sink,
            transmitter,
            naming,
        }
    }

    pub async fn submit(
        &self,
        form: &FormState,
        options: &BuildOptions,
        time: NaiveTime,
    ) -> CoreResult<SubmissionReceipt> {
        let submission_id = Uuid::new_v4();
        let span = tracing::info_span!("submission", submission_id = %submission_id);

        self.run(submission_id, form, options, time)
            .instrument(span)
            .await
    }

    async fn run(
        &self,
        submission_id: Uuid,
        form: &FormState,
        options: &BuildOptions,
        time: NaiveTime,
    ) -> CoreResult<SubmissionReceipt> {
        let record = build_order_data(form, options)?;
        tracing::info!(
            shop = %record.shop_name(),
            order_date = %record.order_date(),
            products = record.product_count(),
            "Order built"
        );

        let files = export_files(&record, self.naming, time)
            .map_err(|e| CoreError::InternalError(e.to_string()))?;

        let (export, remote) = tokio::join!(self.export(&files), self.transmit(&record));

        let notice = match (&export, &remote) {
            (ExportStatus::Failed { .. }, _) => Notice::SubmittedExportFailed,
            (_, RemoteStatus::Failed { .. }) => Notice::SubmittedSheetUpdateFailed,
            _ => Notice::Submitted,
        };

        Ok(SubmissionReceipt {
            submission_id,
            record,
            export,
            remote,
            notice,
        })
    }

    async fn export(&self, files: &[ExportFile]) -> ExportStatus {
        let mut saved = Vec::with_capacity(files.len());
        for file in files {
            match self.export_sink.save(file).await {
                Ok(exported) => {
                    tracing::debug!(file = %exported.file_name, bytes = exported.bytes, "Export saved");
                    saved.push(exported);
                }
                Err(e) => {
                    tracing::error!(file = %file.file_name, error = %e, "Export failed");
                    return ExportStatus::Failed {
                        message: e.to_string(),
                    };
                }
            }
        }
        ExportStatus::Saved { files: saved }
    }

    async fn transmit(&self, record: &OrderRecord) -> RemoteStatus {
        let Some(transmitter) = &self.transmitter else {
            return RemoteStatus::Skipped;
        };

        match transmitter.submit(record).await {
            Ok(ack) => {
                tracing::info!(ack = %ack.0, "Collector acknowledged order");
                RemoteStatus::Acknowledged {
                    ack: ack.into_inner(),
                }
            }
            Err(e) => {
                tracing::error!(error = %e, "Sheet update failed");
                RemoteStatus::Failed {
                    message: e.to_string(),
                }
            }
        }
    }
}
