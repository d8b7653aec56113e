use chrono::Utc;
use std::sync::Arc;

use crate::errors::{ExportCoreResult, ExportError};
use crate::export::delivery::FileDelivery;
use crate::export::file_size::format_file_size;
use crate::export::types::{ExportFormat, ExportOptions, ExportRequest, ExportSummary, Record};
use crate::export::writers;

/// Logging capability injected into the service. Both hooks default to
/// no-ops, so a caller that wires no logger still gets a fully working
/// service.
pub trait ExportLogger: Send + Sync {
    fn log_info(&self, _message: &str) {}
    fn log_error(&self, _source: &str, _message: &str) {}
}

/// Forwards events to the `log` facade.
pub struct FacadeLogger;

impl ExportLogger for FacadeLogger {
    fn log_info(&self, message: &str) {
        log::info!("{message}");
    }

    fn log_error(&self, source: &str, message: &str) {
        log::error!("[{source}] {message}");
    }
}

/// Discards all events.
pub struct NoopLogger;

impl ExportLogger for NoopLogger {}

/// Turns record batches into export files and hands them to the delivery
/// collaborator. Holds no mutable state; concurrent calls are independent.
pub struct ExportService {
    delivery: Arc<dyn FileDelivery>,
    logger: Arc<dyn ExportLogger>,
}

impl ExportService {
    /// Service logging through the `log` facade.
    pub fn new(delivery: Arc<dyn FileDelivery>) -> Self {
        Self::with_logger(delivery, Arc::new(FacadeLogger))
    }

    pub fn with_logger(delivery: Arc<dyn FileDelivery>, logger: Arc<dyn ExportLogger>) -> Self {
        Self { delivery, logger }
    }

    /// Entry point for UI-shaped requests. An unknown format string yields a
    /// failed summary, never an error the caller has to catch.
    pub async fn export(&self, records: &[Record], request: &ExportRequest) -> ExportSummary {
        match request.format.parse::<ExportFormat>() {
            Ok(format) => self.export_with(records, format, &request.options).await,
            Err(err) => {
                self.logger.log_error("export", &err.to_string());
                ExportSummary::failed(&err)
            }
        }
    }

    /// Encode `records` as `format` and deliver the result. Every failure in
    /// validation, encoding, or delivery comes back as a failed summary;
    /// nothing propagates past this boundary.
    pub async fn export_with(
        &self,
        records: &[Record],
        format: ExportFormat,
        options: &ExportOptions,
    ) -> ExportSummary {
        match self.run(records, format, options).await {
            Ok(summary) => {
                self.logger.log_info(&format!(
                    "exported {} records to {}",
                    summary.records_count, format
                ));
                summary
            }
            Err(err) => {
                self.logger.log_error("export", &err.to_string());
                ExportSummary::failed(&err)
            }
        }
    }

    async fn run(
        &self,
        records: &[Record],
        format: ExportFormat,
        options: &ExportOptions,
    ) -> ExportCoreResult<ExportSummary> {
        if records.is_empty() {
            return Err(ExportError::NoData);
        }

        let filename = options
            .filename
            .clone()
            .unwrap_or_else(|| format.default_filename(Utc::now()));

        let file = writers::encode(format, records, options, filename)?;
        if file.content.is_empty() {
            return Err(ExportError::Serialization(
                "encoder produced an empty file".to_string(),
            ));
        }

        self.delivery.deliver(&file).await?;

        Ok(ExportSummary::succeeded(
            file.filename.clone(),
            records.len(),
            format_file_size(file.reported_size()),
        ))
    }
}
