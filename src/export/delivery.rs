use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Mutex;

use crate::errors::{ExportCoreResult, ExportError};
use crate::export::types::ExportFile;

/// Host-side "save file" collaborator. The service calls this exactly once
/// per successful encode; a failure here is folded into the failed-summary
/// path rather than surfaced as a crash.
#[async_trait]
pub trait FileDelivery: Send + Sync {
    async fn deliver(&self, file: &ExportFile) -> ExportCoreResult<()>;
}

/// Writes export files into a target directory.
pub struct FsDelivery {
    target_dir: PathBuf,
}

impl FsDelivery {
    pub fn new(target_dir: impl Into<PathBuf>) -> Self {
        Self {
            target_dir: target_dir.into(),
        }
    }
}

#[async_trait]
impl FileDelivery for FsDelivery {
    async fn deliver(&self, file: &ExportFile) -> ExportCoreResult<()> {
        tokio::fs::create_dir_all(&self.target_dir).await?;
        let path = self.target_dir.join(&file.filename);
        tokio::fs::write(&path, &file.content).await?;
        log::debug!(
            "wrote {} ({}, {} bytes) to {}",
            file.filename,
            file.mime_type,
            file.content.len(),
            path.display()
        );
        Ok(())
    }
}

/// Captures delivered files in memory. Used by tests to assert delivery
/// happened exactly once with the expected payload.
#[derive(Default)]
pub struct MemoryDelivery {
    delivered: Mutex<Vec<ExportFile>>,
}

impl MemoryDelivery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn delivered(&self) -> Vec<ExportFile> {
        self.delivered
            .lock()
            .map(|files| files.clone())
            .unwrap_or_default()
    }

    pub fn delivery_count(&self) -> usize {
        self.delivered.lock().map(|files| files.len()).unwrap_or(0)
    }
}

#[async_trait]
impl FileDelivery for MemoryDelivery {
    async fn deliver(&self, file: &ExportFile) -> ExportCoreResult<()> {
        self.delivered
            .lock()
            .map_err(|_| ExportError::Io("delivery buffer poisoned".to_string()))?
            .push(file.clone());
        Ok(())
    }
}

/// Always refuses the file. Used by tests covering the host-I/O failure path.
pub struct FailingDelivery;

#[async_trait]
impl FileDelivery for FailingDelivery {
    async fn deliver(&self, _file: &ExportFile) -> ExportCoreResult<()> {
        Err(ExportError::Io("disk full".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::types::ExportFormat;

    fn sample_file() -> ExportFile {
        ExportFile {
            filename: "export_2024-03-05.csv".to_string(),
            mime_type: ExportFormat::Csv.mime_type(),
            content: b"name\nAmina".to_vec(),
            size_hint: None,
        }
    }

    #[tokio::test]
    async fn test_fs_delivery_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let delivery = FsDelivery::new(dir.path());

        delivery.deliver(&sample_file()).await.unwrap();

        let written = std::fs::read(dir.path().join("export_2024-03-05.csv")).unwrap();
        assert_eq!(written, b"name\nAmina");
    }

    #[tokio::test]
    async fn test_memory_delivery_captures_files() {
        let delivery = MemoryDelivery::new();
        delivery.deliver(&sample_file()).await.unwrap();
        delivery.deliver(&sample_file()).await.unwrap();

        assert_eq!(delivery.delivery_count(), 2);
        assert_eq!(delivery.delivered()[0].filename, "export_2024-03-05.csv");
    }
}
