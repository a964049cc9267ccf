use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

pub type VehicleId = Uuid;

/// Currency tag attached to a price. Listings are priced either in the
/// local currency or in US dollars; there is no third option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Currency {
    /// Local currency, rendered with a `$` prefix.
    Local,
    /// Foreign (US dollar) pricing, rendered with a `USD` prefix.
    Foreign,
}

impl Currency {
    /// The tag as stored in the database and shown in documents.
    pub fn as_str(&self) -> &'static str {
        match self {
            Currency::Local => "$",
            Currency::Foreign => "USD",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim() {
            "$" | "ars" | "local" => Some(Currency::Local),
            "USD" | "usd" | "u$s" => Some(Currency::Foreign),
            _ => None,
        }
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One inventory row describing a vehicle for sale.
///
/// Instances are only built through [`VehicleDraft::validate`] or read back
/// from storage, so numeric fields are always within range.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: VehicleId,
    /// Whether the listing is currently published.
    pub online: bool,
    /// Body category, e.g. "sedan" or "pickup".
    pub category: String,
    pub brand: String,
    pub model: String,
    pub year: i32,
    /// Odometer reading in kilometers.
    pub kilometers: i64,
    /// Registration plate.
    pub plate: String,
    /// Asking price in `currency`.
    pub price: f64,
    /// Informational reference price, not shown in exports.
    pub info_price: f64,
    pub currency: Currency,
}

/// Validation failures for operator-supplied vehicle fields.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' must not be empty")]
    Empty { field: &'static str },

    #[error("Invalid number for field '{field}': '{value}'")]
    NotANumber { field: &'static str, value: String },

    #[error("Field '{field}' must not be negative (got {value})")]
    Negative { field: &'static str, value: String },

    #[error("Year {0} is out of range (expected 1900..=2100)")]
    YearOutOfRange(i32),

    #[error("Unknown currency tag '{0}' (expected '$' or 'USD')")]
    UnknownCurrency(String),
}

/// Operator input as it arrives from the outside: every numeric field is
/// still a string. [`VehicleDraft::validate`] is the only path from here to
/// a [`Vehicle`], so malformed input never reaches storage or the exporters.
#[derive(Debug, Clone, Default)]
pub struct VehicleDraft {
    pub category: String,
    pub brand: String,
    pub model: String,
    pub year: String,
    pub kilometers: String,
    pub plate: String,
    pub price: String,
    pub info_price: Option<String>,
    pub currency: String,
}

impl VehicleDraft {
    /// Parse and range-check every field, producing a publishable record.
    /// New listings start online, matching how they are created upstream.
    pub fn validate(self) -> Result<Vehicle, ValidationError> {
        let brand = required_text("brand", self.brand)?;
        let model = required_text("model", self.model)?;
        let plate = required_text("plate", self.plate)?;

        let year = parse_year(&self.year)?;
        let kilometers = parse_kilometers(&self.kilometers)?;
        let price = parse_price("price", &self.price)?;
        let info_price = match &self.info_price {
            Some(raw) => parse_price("info_price", raw)?,
            None => 0.0,
        };
        let currency = parse_currency(&self.currency)?;

        Ok(Vehicle {
            id: Uuid::new_v4(),
            online: true,
            category: self.category.trim().to_string(),
            brand,
            model,
            year,
            kilometers,
            plate,
            price,
            info_price,
            currency,
        })
    }
}

/// Partial update for an existing record. `None` fields keep their stored
/// value; provided fields go through the same parsing as a draft.
#[derive(Debug, Clone, Default)]
pub struct VehicleUpdate {
    pub category: Option<String>,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub year: Option<String>,
    pub kilometers: Option<String>,
    pub plate: Option<String>,
    pub price: Option<String>,
    pub info_price: Option<String>,
    pub currency: Option<String>,
}

impl VehicleUpdate {
    pub fn is_empty(&self) -> bool {
        self.category.is_none()
            && self.brand.is_none()
            && self.model.is_none()
            && self.year.is_none()
            && self.kilometers.is_none()
            && self.plate.is_none()
            && self.price.is_none()
            && self.info_price.is_none()
            && self.currency.is_none()
    }

    /// Overlay the provided fields on `current`, revalidating each one.
    pub fn apply(self, mut current: Vehicle) -> Result<Vehicle, ValidationError> {
        if let Some(category) = self.category {
            current.category = category.trim().to_string();
        }
        if let Some(brand) = self.brand {
            current.brand = required_text("brand", brand)?;
        }
        if let Some(model) = self.model {
            current.model = required_text("model", model)?;
        }
        if let Some(year) = self.year {
            current.year = parse_year(&year)?;
        }
        if let Some(kilometers) = self.kilometers {
            current.kilometers = parse_kilometers(&kilometers)?;
        }
        if let Some(plate) = self.plate {
            current.plate = required_text("plate", plate)?;
        }
        if let Some(price) = self.price {
            current.price = parse_price("price", &price)?;
        }
        if let Some(info_price) = self.info_price {
            current.info_price = parse_price("info_price", &info_price)?;
        }
        if let Some(currency) = self.currency {
            current.currency = parse_currency(&currency)?;
        }
        Ok(current)
    }
}

fn required_text(field: &'static str, value: String) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty { field });
    }
    Ok(trimmed.to_string())
}

fn parse_year(raw: &str) -> Result<i32, ValidationError> {
    let year: i32 = raw.trim().parse().map_err(|_| ValidationError::NotANumber {
        field: "year",
        value: raw.to_string(),
    })?;
    if !(1900..=2100).contains(&year) {
        return Err(ValidationError::YearOutOfRange(year));
    }
    Ok(year)
}

fn parse_kilometers(raw: &str) -> Result<i64, ValidationError> {
    let km: i64 = raw.trim().parse().map_err(|_| ValidationError::NotANumber {
        field: "kilometers",
        value: raw.to_string(),
    })?;
    if km < 0 {
        return Err(ValidationError::Negative {
            field: "kilometers",
            value: raw.trim().to_string(),
        });
    }
    Ok(km)
}

fn parse_price(field: &'static str, raw: &str) -> Result<f64, ValidationError> {
    let price: f64 = raw.trim().parse().map_err(|_| ValidationError::NotANumber {
        field,
        value: raw.to_string(),
    })?;
    if !price.is_finite() {
        return Err(ValidationError::NotANumber {
            field,
            value: raw.trim().to_string(),
        });
    }
    if price < 0.0 {
        return Err(ValidationError::Negative {
            field,
            value: raw.trim().to_string(),
        });
    }
    Ok(price)
}

fn parse_currency(raw: &str) -> Result<Currency, ValidationError> {
    Currency::from_str(raw).ok_or_else(|| ValidationError::UnknownCurrency(raw.trim().to_string()))
}
