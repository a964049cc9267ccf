//! The shared column schema both exporters render from.
//!
//! One ordered array defines what the listing documents show; the
//! spreadsheet and the PDF only differ in chrome (workbook styling vs.
//! bordered table cells), never in column order or cell content.

use crate::domain::{format_currency, group_thousands, Currency, Vehicle};

/// How a column's value is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnFormat {
    /// Verbatim text.
    Text,
    /// Plain integer, no grouping (the model year).
    Integer,
    /// Thousands-grouped integer (the odometer).
    GroupedInteger,
    /// Thousands-grouped amount with currency prefix.
    GroupedCurrency,
}

/// A typed cell value as pulled from a record, before rendering.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Integer(i64),
    Money(f64, Currency),
}

/// One column of the exported listing.
pub struct Column {
    pub header: &'static str,
    /// Relative width shared by both exporters: the model column is wide,
    /// the rest uniform.
    pub width: usize,
    pub format: ColumnFormat,
    extract: fn(&Vehicle) -> CellValue,
}

impl Column {
    /// Pull this column's raw value out of a record.
    pub fn value(&self, vehicle: &Vehicle) -> CellValue {
        (self.extract)(vehicle)
    }

    /// Render this column's cell string for a record.
    pub fn render(&self, vehicle: &Vehicle) -> String {
        match self.value(vehicle) {
            CellValue::Text(text) => text,
            CellValue::Integer(n) => match self.format {
                ColumnFormat::GroupedInteger => group_thousands(n.max(0) as u64),
                _ => n.to_string(),
            },
            CellValue::Money(amount, currency) => format_currency(amount, currency),
        }
    }
}

pub const UNIFORM_WIDTH: usize = 25;
pub const MODEL_WIDTH: usize = 75;

/// The six exported columns, in their fixed order.
pub const COLUMNS: [Column; 6] = [
    Column {
        header: "Marca",
        width: UNIFORM_WIDTH,
        format: ColumnFormat::Text,
        extract: |v| CellValue::Text(v.brand.clone()),
    },
    Column {
        header: "Modelo",
        width: MODEL_WIDTH,
        format: ColumnFormat::Text,
        extract: |v| CellValue::Text(v.model.clone()),
    },
    Column {
        header: "Año",
        width: UNIFORM_WIDTH,
        format: ColumnFormat::Integer,
        extract: |v| CellValue::Integer(i64::from(v.year)),
    },
    Column {
        header: "Kilómetros",
        width: UNIFORM_WIDTH,
        format: ColumnFormat::GroupedInteger,
        extract: |v| CellValue::Integer(v.kilometers),
    },
    Column {
        header: "Patente",
        width: UNIFORM_WIDTH,
        format: ColumnFormat::Text,
        extract: |v| CellValue::Text(v.plate.clone()),
    },
    Column {
        header: "Precio",
        width: UNIFORM_WIDTH,
        format: ColumnFormat::GroupedCurrency,
        extract: |v| CellValue::Money(v.price, v.currency),
    },
];

/// The ordered cell strings for one record, identical for every consumer.
pub fn render_row(vehicle: &Vehicle) -> [String; 6] {
    std::array::from_fn(|i| COLUMNS[i].render(vehicle))
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn corolla() -> Vehicle {
        Vehicle {
            id: Uuid::new_v4(),
            online: true,
            category: "sedan".into(),
            brand: "Toyota".into(),
            model: "Corolla".into(),
            year: 2019,
            kilometers: 52000,
            plate: "AB123CD".into(),
            price: 15000000.0,
            info_price: 14000000.0,
            currency: Currency::Local,
        }
    }

    #[test]
    fn test_render_row() {
        let row = render_row(&corolla());
        assert_eq!(
            row,
            [
                "Toyota".to_string(),
                "Corolla".to_string(),
                "2019".to_string(),
                "52.000".to_string(),
                "AB123CD".to_string(),
                "$ 15.000.000".to_string(),
            ]
        );
    }

    #[test]
    fn test_foreign_currency_row() {
        let mut vehicle = corolla();
        vehicle.currency = Currency::Foreign;
        let row = render_row(&vehicle);
        assert_eq!(row[5], "USD 15.000.000");
    }

    #[test]
    fn test_headers_and_widths() {
        let headers: Vec<&str> = COLUMNS.iter().map(|c| c.header).collect();
        assert_eq!(
            headers,
            ["Marca", "Modelo", "Año", "Kilómetros", "Patente", "Precio"]
        );
        // Only the model column is wide.
        for (i, column) in COLUMNS.iter().enumerate() {
            let expected = if i == 1 { MODEL_WIDTH } else { UNIFORM_WIDTH };
            assert_eq!(column.width, expected, "column {}", column.header);
        }
    }

    #[test]
    fn test_year_is_not_grouped() {
        let row = render_row(&corolla());
        assert_eq!(row[2], "2019");
    }
}
