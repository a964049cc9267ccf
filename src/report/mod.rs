//! Report generation: the brand-ordered listing in, a finished document out.
//!
//! The exporters never query or sort anything themselves; they are handed a
//! fully materialized record sequence and return a complete in-memory buffer
//! or an error. There is no partial output.

mod columns;
mod pdf;
mod xlsx;

pub use columns::{render_row, CellValue, Column, ColumnFormat, COLUMNS};
pub use pdf::PdfExporter;
pub use xlsx::SpreadsheetExporter;

use thiserror::Error;

use crate::domain::Vehicle;

pub const SPREADSHEET_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
pub const PDF_CONTENT_TYPE: &str = "application/pdf";

pub const SPREADSHEET_FILENAME: &str = "cars.xlsx";
pub const PDF_FILENAME: &str = "cars.pdf";

/// The requested output document kind. The PDF variant carries the raw TTF
/// bytes for the document font; where they come from (disk, embedding, an
/// object store) is the caller's business.
pub enum ExportFormat {
    Spreadsheet,
    Pdf { font: Vec<u8> },
}

impl ExportFormat {
    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Spreadsheet => SPREADSHEET_CONTENT_TYPE,
            ExportFormat::Pdf { .. } => PDF_CONTENT_TYPE,
        }
    }

    pub fn filename(&self) -> &'static str {
        match self {
            ExportFormat::Spreadsheet => SPREADSHEET_FILENAME,
            ExportFormat::Pdf { .. } => PDF_FILENAME,
        }
    }
}

/// A finished document plus the envelope a download response needs.
pub struct ExportDocument {
    pub bytes: Vec<u8>,
    pub content_type: &'static str,
    pub filename: &'static str,
}

/// Failures while building a document. Every variant names the stage that
/// failed so a report can be diagnosed without re-running it; none of these
/// are transient, so nothing is retried.
#[derive(Debug, Error)]
pub enum ReportError {
    /// The supplied font bytes are not a usable TTF. Fatal precondition for
    /// the PDF path; the spreadsheet path never touches fonts.
    #[error("Invalid PDF font data: {0}")]
    Font(#[source] genpdf::error::Error),

    #[error("Spreadsheet build failed while {step}: {source}")]
    Spreadsheet {
        step: &'static str,
        #[source]
        source: rust_xlsxwriter::XlsxError,
    },

    #[error("PDF build failed while {step}: {source}")]
    Pdf {
        step: &'static str,
        #[source]
        source: genpdf::error::Error,
    },
}

/// Build the requested document for an already-fetched record sequence and
/// wrap it with its MIME type and suggested filename. Row order in the
/// output is exactly the input order.
pub fn export_listing(
    vehicles: &[Vehicle],
    format: ExportFormat,
) -> Result<ExportDocument, ReportError> {
    let content_type = format.content_type();
    let filename = format.filename();

    let bytes = match format {
        ExportFormat::Spreadsheet => SpreadsheetExporter::new().export(vehicles)?,
        ExportFormat::Pdf { font } => PdfExporter::new(font).export(vehicles)?,
    };

    Ok(ExportDocument {
        bytes,
        content_type,
        filename,
    })
}
