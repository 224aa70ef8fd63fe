//! Request and response bodies.

use crate::api::error::ApiError;
use serde::{Deserialize, Serialize};

/// A form or JSON value that may arrive as a number or as text.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Field {
    Number(f64),
    Text(String),
}

impl Field {
    fn describe(&self) -> String {
        match self {
            Field::Number(n) => n.to_string(),
            Field::Text(s) => s.clone(),
        }
    }
}

/// Body of `POST /api/predict`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PredictRequest {
    pub location: Option<String>,
    pub sqft: Option<Field>,
    pub bhk: Option<Field>,
    pub bath: Option<Field>,
}

/// Validated prediction inputs.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictInput {
    pub location: String,
    pub sqft: f64,
    pub bath: u32,
    pub bhk: u32,
}

fn required<'a>(field: &'a Option<Field>, name: &str) -> Result<&'a Field, ApiError> {
    field
        .as_ref()
        .ok_or_else(|| ApiError::Validation(format!("`{name}` is required")))
}

fn parse_area(field: &Field, name: &str) -> Result<f64, ApiError> {
    let value = match field {
        Field::Number(n) => Some(*n),
        Field::Text(s) => s.trim().parse::<f64>().ok(),
    };
    value.filter(|v| v.is_finite()).ok_or_else(|| {
        ApiError::Validation(format!("`{name}` must be a number, got `{}`", field.describe()))
    })
}

fn parse_count(field: &Field, name: &str) -> Result<u32, ApiError> {
    let value = match field {
        Field::Number(n) if n.fract() == 0.0 && *n >= 0.0 && *n <= u32::MAX as f64 => {
            Some(*n as u32)
        }
        Field::Number(_) => None,
        Field::Text(s) => s.trim().parse::<u32>().ok(),
    };
    value.ok_or_else(|| {
        ApiError::Validation(format!(
            "`{name}` must be a non-negative integer, got `{}`",
            field.describe()
        ))
    })
}

impl TryFrom<PredictRequest> for PredictInput {
    type Error = ApiError;

    fn try_from(req: PredictRequest) -> Result<Self, Self::Error> {
        let sqft = parse_area(required(&req.sqft, "sqft")?, "sqft")?;
        let bhk = parse_count(required(&req.bhk, "bhk")?, "bhk")?;
        let bath = parse_count(required(&req.bath, "bath")?, "bath")?;
        Ok(Self {
            location: req.location.unwrap_or_default(),
            sqft,
            bath,
            bhk,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictResponse {
    pub estimated_price_lakh: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationsResponse {
    pub locations: Vec<String>,
    pub no_locations: bool,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}
