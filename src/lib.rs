//! Record-export core for the aid-distribution dashboard.
//!
//! Turns an ordered batch of uniform records into a downloadable file (CSV
//! and JSON fully; PDF and Excel as labeled previews), reports outcome
//! metadata, and hands the finished file to an injected delivery
//! collaborator. Callers filter and select records before exporting; this
//! crate performs no business filtering.

// Public modules
pub mod errors;
pub mod export;

// Convenience re-exports for UI callers
pub use errors::ExportError;
pub use export::delivery::{FileDelivery, FsDelivery, MemoryDelivery};
pub use export::file_size::format_file_size;
pub use export::service::{ExportLogger, ExportService, FacadeLogger, NoopLogger};
pub use export::types::{
    DateRange, ExportFile, ExportFormat, ExportOptions, ExportRequest, ExportSummary, Record,
};
