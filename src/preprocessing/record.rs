use crate::dataset::{is_na, RawRecord};
use crate::preprocessing::error::RowError;
use crate::preprocessing::parse::{convert_sqft_to_num, parse_amount, parse_bhk, parse_count};

/// A listing that survived parsing.
///
/// `location` is stored as read until the location stage trims it and merges
/// rare values into the `"other"` category.
#[derive(Debug, Clone, PartialEq)]
pub struct CleanedRecord {
    pub location: String,
    pub total_sqft: f64,
    pub bhk: u32,
    pub bath: u32,
    /// Price in lakhs.
    pub price: f64,
}

impl CleanedRecord {
    /// Price in rupees per square foot.
    pub fn price_per_sqft(&self) -> f64 {
        self.price * 100_000.0 / self.total_sqft
    }

    /// Floor area per bedroom. Not finite when `bhk` is zero.
    pub fn sqft_per_bhk(&self) -> f64 {
        self.total_sqft / self.bhk as f64
    }
}

fn required<'a>(cell: &'a Option<String>, column: &'static str) -> Result<&'a str, RowError> {
    match cell.as_deref() {
        Some(v) if !is_na(v) => Ok(v),
        _ => Err(RowError::Missing(column)),
    }
}

impl TryFrom<&RawRecord> for CleanedRecord {
    type Error = RowError;

    /// Missing-value check over all used columns first, then bedroom count,
    /// then total area.
    fn try_from(raw: &RawRecord) -> Result<Self, Self::Error> {
        let location = required(&raw.location, "location")?;
        let size = required(&raw.size, "size")?;
        let total_sqft = required(&raw.total_sqft, "total_sqft")?;
        let bath = required(&raw.bath, "bath")?;
        let price = required(&raw.price, "price")?;

        let bath = parse_count("bath", bath)?;
        let price = parse_amount("price", price)?;
        let bhk = parse_bhk(size)?;
        let total_sqft = convert_sqft_to_num(total_sqft)?;

        Ok(Self {
            location: location.to_string(),
            total_sqft,
            bhk,
            bath,
            price,
        })
    }
}
