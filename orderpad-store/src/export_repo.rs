use async_trait::async_trait;
use orderpad_core::{validate_file_name, ExportError, ExportSink, ExportedFile};
use orderpad_order::ExportFile;
use std::io::ErrorKind;
use std::path::PathBuf;

/// Writes export files into a single directory, created on first use.
pub struct DirectoryExportSink {
    directory: PathBuf,
}

impl DirectoryExportSink {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    pub fn directory(&self) -> &PathBuf {
        &self.directory
    }
}

#[async_trait]
impl ExportSink for DirectoryExportSink {
    async fn save(&self, file: &ExportFile) -> Result<ExportedFile, ExportError> {
        validate_file_name(&file.file_name)?;

        let write_failed = |e: std::io::Error| ExportError::WriteFailed {
            file_name: file.file_name.clone(),
            reason: e.to_string(),
        };

        tokio::fs::create_dir_all(&self.directory)
            .await
            .map_err(write_failed)?;

        let path = self.directory.join(&file.file_name);
        tokio::fs::write(&path, file.contents.as_bytes())
            .await
            .map_err(write_failed)?;

        tracing::info!(path = %path.display(), "Order file written");

        Ok(ExportedFile {
            file_name: file.file_name.clone(),
            location: path.display().to_string(),
            bytes: file.contents.len(),
        })
    }

    async fn load(&self, file_name: &str) -> Result<Option<ExportFile>, ExportError> {
        validate_file_name(file_name)?;

        let path = self.directory.join(file_name);
        match tokio::fs::read_to_string(&path).await {
            Ok(contents) => Ok(Some(ExportFile {
                file_name: file_name.to_string(),
                content_type: ExportFile::content_type_for(file_name),
                contents,
            })),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(ExportError::ReadFailed {
                file_name: file_name.to_string(),
                reason: e.to_string(),
            }),
        }
    }
}
