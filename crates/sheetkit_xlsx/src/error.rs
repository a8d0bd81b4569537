//! Writer error type.

use thiserror::Error;

/// Errors surfaced by [`crate::writer::XlsxWriter`] operations.
///
/// Nothing here is retried or recovered internally; every variant is a
/// programmer error to be fixed at the call site.
#[derive(Debug, Error)]
pub enum SheetError {
    /// A sheet-scoped operation was called before any sheet was added.
    #[error("no worksheet exists yet; call add_sheet() first")]
    NoActiveSheet,

    /// A 1-based row/column index was zero or exceeded the Excel limits.
    #[error("row/column index out of range: {0}")]
    IndexOutOfRange(String),

    /// Error surfaced as-is from the underlying XLSX engine.
    #[error(transparent)]
    Engine(#[from] rust_xlsxwriter::XlsxError),
}
