use serde::Serialize;
use thiserror::Error;

/// Errors raised while producing an export file.
///
/// These never cross the service boundary as raw errors: [`crate::export::service::ExportService`]
/// folds every variant into a failed summary the caller can render.
#[derive(Debug, Clone, Error, Serialize)]
pub enum ExportError {
    /// The caller handed over an empty record set. An empty-but-valid
    /// file is never emitted; the export fails up front instead.
    #[error("no data to export")]
    NoData,

    /// The requested format string is not one of the supported values.
    #[error("unsupported export format: {0}")]
    UnsupportedFormat(String),

    /// A record could not be serialized into the target format.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Delivering the finished file to the host failed.
    #[error("I/O error: {0}")]
    Io(String),

    /// The export request itself is malformed.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl From<serde_json::Error> for ExportError {
    fn from(err: serde_json::Error) -> Self {
        ExportError::Serialization(err.to_string())
    }
}

impl From<std::io::Error> for ExportError {
    fn from(err: std::io::Error) -> Self {
        ExportError::Io(err.to_string())
    }
}

pub type ExportCoreResult<T> = Result<T, ExportError>;
