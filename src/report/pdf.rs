//! PDF export.
//!
//! A letter-size document holding one bordered, centered table: header row
//! plus one row per record in input order. Page breaks are the layout
//! engine's job; nothing here counts lines or pages. The document font is a
//! Unicode TTF handed in as raw bytes by the caller.

use genpdf::elements::{FrameCellDecorator, Paragraph, TableLayout};
use genpdf::fonts::{FontData, FontFamily};
use genpdf::style::Style;
use genpdf::{Alignment, Document, Element, PaperSize, SimplePageDecorator};

use crate::domain::Vehicle;

use super::columns::COLUMNS;
use super::ReportError;

const FONT_SIZE: u8 = 8;
const PAGE_MARGIN_MM: i32 = 10;

pub struct PdfExporter {
    font: Vec<u8>,
}

impl PdfExporter {
    /// The exporter has no opinion on where the font bytes come from; the
    /// caller reads them from its configured resource.
    pub fn new(font: Vec<u8>) -> Self {
        Self { font }
    }

    /// Build the table document and serialize it to an in-memory buffer.
    pub fn export(&self, vehicles: &[Vehicle]) -> Result<Vec<u8>, ReportError> {
        let mut doc = self.new_document()?;

        let weights: Vec<usize> = COLUMNS.iter().map(|c| c.width).collect();
        let mut table = TableLayout::new(weights);
        table.set_cell_decorator(FrameCellDecorator::new(true, true, false));

        let mut header = table.row();
        for column in &COLUMNS {
            header.push_element(
                Paragraph::new(column.header)
                    .aligned(Alignment::Center)
                    .styled(Style::new().bold())
                    .padded(1),
            );
        }
        header
            .push()
            .map_err(|e| step_error("building the header row", e))?;

        for vehicle in vehicles {
            let mut row = table.row();
            for column in &COLUMNS {
                row.push_element(
                    Paragraph::new(column.render(vehicle))
                        .aligned(Alignment::Center)
                        .padded(1),
                );
            }
            row.push()
                .map_err(|e| step_error("building a record row", e))?;
        }

        doc.push(table);

        let mut bytes = Vec::new();
        doc.render(&mut bytes)
            .map_err(|e| step_error("serializing the pages", e))?;
        Ok(bytes)
    }

    fn new_document(&self) -> Result<Document, ReportError> {
        let regular = FontData::new(self.font.clone(), None).map_err(ReportError::Font)?;
        // A single TTF serves all styles; a bold face would only change the
        // header glyphs.
        let family = FontFamily {
            regular: regular.clone(),
            bold: regular.clone(),
            italic: regular.clone(),
            bold_italic: regular,
        };

        let mut doc = Document::new(family);
        doc.set_title("Listado de vehículos");
        doc.set_paper_size(PaperSize::Letter);
        doc.set_font_size(FONT_SIZE);

        let mut decorator = SimplePageDecorator::new();
        decorator.set_margins(PAGE_MARGIN_MM);
        doc.set_page_decorator(decorator);

        Ok(doc)
    }
}

fn step_error(step: &'static str, source: genpdf::error::Error) -> ReportError {
    ReportError::Pdf { step, source }
}
