//! Report exporters. Each encoder is a pure function of its input; the only
//! failures are those of the output sink.

pub mod csv;
pub mod document;
pub mod json;
pub mod pdf;

use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

use crate::engine::ReportSnapshot;
use crate::window::DateRange;

pub use self::csv::{to_csv, write_csv};
pub use self::document::{render_report, DocumentBuilder, PageSetup, ReportDocument};
pub use self::json::{to_json, write_json};
pub use self::pdf::{encode_pdf, write_pdf};

pub type ExportResult<T> = Result<T, ExportError>;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Export IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV encoding error: {0}")]
    Csv(#[from] ::csv::Error),

    #[error("JSON encoding error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportKind {
    /// Lead table, one row per contact.
    Csv,
    /// Paginated analytics report.
    Pdf,
    /// Machine-readable snapshot.
    Json,
}

impl ExportKind {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Pdf => "pdf",
            Self::Json => "json",
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            Self::Csv => "text/csv;charset=utf-8",
            Self::Pdf => "application/pdf",
            Self::Json => "application/json",
        }
    }
}

/// Lays out the report on A4 pages and encodes it as PDF bytes.
pub fn to_document(snapshot: &ReportSnapshot, range_code: &str, title: &str) -> Vec<u8> {
    encode_pdf(&render_report(snapshot, range_code, title, PageSetup::default()))
}

/// `{product}-leads-{range}.csv`, `{product}-report-{range}.pdf|json`.
pub fn file_name(product: &str, kind: ExportKind, range: DateRange) -> String {
    let subject = match kind {
        ExportKind::Csv => "leads",
        ExportKind::Pdf | ExportKind::Json => "report",
    };
    format!("{product}-{subject}-{}.{}", range.code(), kind.extension())
}

/// Writes a finished export into `dir` under its deterministic name.
pub fn save(
    dir: &Path,
    product: &str,
    kind: ExportKind,
    range: DateRange,
    bytes: &[u8],
) -> ExportResult<PathBuf> {
    let path = dir.join(file_name(product, kind, range));
    let mut file = std::fs::File::create(&path)?;
    file.write_all(bytes)?;
    file.flush()?;
    info!(path = %path.display(), bytes = bytes.len(), "Export written");
    Ok(path)
}
