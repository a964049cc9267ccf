//! Spreadsheet export.
//!
//! One worksheet, headers on row 1 starting at column B (column A is left
//! as a margin), one record per row below in input order, the whole table
//! bordered and centered with display number formats on the odometer and
//! price columns, and an autofilter over the header row.

use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, Workbook, XlsxError};

use crate::domain::Vehicle;

use super::columns::{CellValue, ColumnFormat, COLUMNS, MODEL_WIDTH};
use super::ReportError;

const SHEET_NAME: &str = "Sheet1";
const FONT_FAMILY: &str = "Futura";

/// First data column: column A is reserved, the table spans B..G.
const FIRST_COL: u16 = 1;
const ROW_HEIGHT: f64 = 20.0;
const COLUMN_WIDTH: f64 = 20.0;
const MODEL_COLUMN_WIDTH: f64 = 60.0;

/// Display formats matching the shared rendering rules: grouped integers
/// for the odometer, `$`-prefixed grouped amounts for the price.
const KILOMETERS_NUM_FORMAT: &str = "#,##0";
const PRICE_NUM_FORMAT: &str = "\"$\"#,##0";

/// The style descriptors are constant across exports, so they are built
/// once per exporter and reused for every cell.
struct SheetStyles {
    header: Format,
    body: Format,
    kilometers: Format,
    price: Format,
}

impl SheetStyles {
    fn new() -> Self {
        let bordered_center = |format: Format| {
            format
                .set_font_name(FONT_FAMILY)
                .set_font_color(Color::Black)
                .set_align(FormatAlign::Center)
                .set_border(FormatBorder::Thin)
        };

        let header = bordered_center(Format::new().set_bold().set_font_size(16));
        let body = bordered_center(Format::new().set_font_size(12));
        let kilometers = body.clone().set_num_format(KILOMETERS_NUM_FORMAT);
        let price = body.clone().set_num_format(PRICE_NUM_FORMAT);

        Self {
            header,
            body,
            kilometers,
            price,
        }
    }
}

pub struct SpreadsheetExporter {
    styles: SheetStyles,
}

impl Default for SpreadsheetExporter {
    fn default() -> Self {
        Self::new()
    }
}

impl SpreadsheetExporter {
    pub fn new() -> Self {
        Self {
            styles: SheetStyles::new(),
        }
    }

    /// Build the workbook and serialize it to an in-memory buffer.
    /// Row order is the input order; the exporter never sorts.
    pub fn export(&self, vehicles: &[Vehicle]) -> Result<Vec<u8>, ReportError> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet
            .set_name(SHEET_NAME)
            .map_err(|e| step_error("creating the sheet", e))?;

        for (col, column) in COLUMNS.iter().enumerate() {
            worksheet
                .write_string_with_format(
                    0,
                    FIRST_COL + col as u16,
                    column.header,
                    &self.styles.header,
                )
                .map_err(|e| step_error("writing headers", e))?;
        }

        for (idx, vehicle) in vehicles.iter().enumerate() {
            let row = idx as u32 + 1;
            for (col, column) in COLUMNS.iter().enumerate() {
                let cell_format = match column.format {
                    ColumnFormat::GroupedInteger => &self.styles.kilometers,
                    ColumnFormat::GroupedCurrency => &self.styles.price,
                    _ => &self.styles.body,
                };
                let result = match column.value(vehicle) {
                    CellValue::Text(text) => worksheet.write_string_with_format(
                        row,
                        FIRST_COL + col as u16,
                        &text,
                        cell_format,
                    ),
                    CellValue::Integer(n) => worksheet.write_number_with_format(
                        row,
                        FIRST_COL + col as u16,
                        n as f64,
                        cell_format,
                    ),
                    CellValue::Money(amount, _) => worksheet.write_number_with_format(
                        row,
                        FIRST_COL + col as u16,
                        amount,
                        cell_format,
                    ),
                };
                result.map_err(|e| step_error("writing record rows", e))?;
            }
        }

        self.apply_layout(worksheet, vehicles.len())?;

        workbook
            .save_to_buffer()
            .map_err(|e| step_error("serializing the workbook", e))
    }

    /// Column widths, row heights, and the header autofilter.
    fn apply_layout(
        &self,
        worksheet: &mut rust_xlsxwriter::Worksheet,
        record_count: usize,
    ) -> Result<(), ReportError> {
        // Uniform width across the table plus margins (A..H), then widen
        // the model column for long trim names.
        for col in 0..=(FIRST_COL + COLUMNS.len() as u16) {
            worksheet
                .set_column_width(col, COLUMN_WIDTH)
                .map_err(|e| step_error("setting column widths", e))?;
        }
        let model_col = FIRST_COL
            + COLUMNS
                .iter()
                .position(|c| c.width == MODEL_WIDTH)
                .unwrap_or(1) as u16;
        worksheet
            .set_column_width(model_col, MODEL_COLUMN_WIDTH)
            .map_err(|e| step_error("setting column widths", e))?;

        for row in 0..=(record_count as u32) {
            worksheet
                .set_row_height(row, ROW_HEIGHT)
                .map_err(|e| step_error("setting row heights", e))?;
        }

        let last_col = FIRST_COL + COLUMNS.len() as u16 - 1;
        worksheet
            .autofilter(0, FIRST_COL, 0, last_col)
            .map_err(|e| step_error("setting the autofilter", e))?;

        Ok(())
    }
}

fn step_error(step: &'static str, source: XlsxError) -> ReportError {
    ReportError::Spreadsheet { step, source }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Currency;
    use uuid::Uuid;

    fn vehicle(brand: &str, model: &str) -> Vehicle {
        Vehicle {
            id: Uuid::new_v4(),
            online: true,
            category: "sedan".into(),
            brand: brand.into(),
            model: model.into(),
            year: 2019,
            kilometers: 52000,
            plate: "AB123CD".into(),
            price: 15000000.0,
            info_price: 0.0,
            currency: Currency::Local,
        }
    }

    #[test]
    fn test_export_produces_xlsx_bytes() {
        let vehicles = vec![vehicle("Toyota", "Corolla"), vehicle("Fiat", "Cronos")];
        let bytes = SpreadsheetExporter::new().export(&vehicles).unwrap();
        // xlsx is a zip container
        assert!(bytes.len() > 100);
        assert_eq!(&bytes[0..2], b"PK");
    }

    #[test]
    fn test_empty_listing_is_a_valid_workbook() {
        let bytes = SpreadsheetExporter::new().export(&[]).unwrap();
        assert!(bytes.len() > 100);
        assert_eq!(&bytes[0..2], b"PK");
    }

    #[test]
    fn test_large_listing() {
        let vehicles: Vec<Vehicle> = (0..500i64)
            .map(|i| {
                let mut v = vehicle("Toyota", "Corolla");
                v.kilometers = i * 1000;
                v
            })
            .collect();
        let bytes = SpreadsheetExporter::new().export(&vehicles).unwrap();
        assert!(bytes.len() > 1000);
    }

    #[test]
    fn test_unicode_cells() {
        let mut v = vehicle("Citroën", "Berlingo Multispació");
        v.plate = "AÑ999ZZ".into();
        let bytes = SpreadsheetExporter::new().export(&[v]).unwrap();
        assert!(!bytes.is_empty());
    }
}
