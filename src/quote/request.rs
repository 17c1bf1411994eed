//! Client and vehicle details submitted for a quote

use crate::money::parse_brl_amount;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum QuoteInputError {
    #[error("required field '{0}' is missing")]
    MissingField(&'static str),

    #[error("vehicle value '{0}' is not a valid amount (e.g. 75000.50 or 75.000,50)")]
    InvalidAmount(String),

    #[error("model year '{0}' is not a valid year")]
    InvalidYear(String),
}

/// Raw form fields, as typed by the user
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuoteForm {
    pub client_name: Option<String>,
    pub plate: Option<String>,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub year: Option<String>,
    pub vehicle_value: Option<String>,
    pub category: Option<String>,
}

/// Validated quote input
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuoteRequest {
    pub client_name: String,
    pub plate: String,
    pub brand: String,
    pub model: String,
    pub year: i32,
    pub vehicle_value: f64,
    pub category: String,
}

fn required(value: &Option<String>, name: &'static str) -> Result<String, QuoteInputError> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .ok_or(QuoteInputError::MissingField(name))
}

impl QuoteForm {
    /// Check required fields and parse the numeric ones
    ///
    /// Category is optional. The vehicle value may be written in Brazilian
    /// format ("75.000,50") or plain ("75000").
    pub fn validate(&self) -> Result<QuoteRequest, QuoteInputError> {
        let client_name = required(&self.client_name, "client_name")?;
        let plate = required(&self.plate, "plate")?;
        let brand = required(&self.brand, "brand")?;
        let model = required(&self.model, "model")?;
        let year_text = required(&self.year, "year")?;
        let value_text = required(&self.vehicle_value, "vehicle_value")?;

        let year = year_text
            .parse::<i32>()
            .map_err(|_| QuoteInputError::InvalidYear(year_text.clone()))?;
        let vehicle_value = parse_brl_amount(&value_text).ok_or(QuoteInputError::InvalidAmount(value_text))?;

        Ok(QuoteRequest {
            client_name,
            plate,
            brand,
            model,
            year,
            vehicle_value,
            category: self.category.as_deref().map(str::trim).unwrap_or_default().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_form() -> QuoteForm {
        QuoteForm {
            client_name: Some("Maria Souza".to_string()),
            plate: Some("ABC-1D23".to_string()),
            brand: Some("Fiat".to_string()),
            model: Some("Argo 1.0".to_string()),
            year: Some("2021".to_string()),
            vehicle_value: Some("75.000,50".to_string()),
            category: None,
        }
    }

    #[test]
    fn test_valid_form() {
        let request = filled_form().validate().unwrap();
        assert_eq!(request.year, 2021);
        assert_eq!(request.vehicle_value, 75_000.5);
        assert_eq!(request.category, "");
    }

    #[test]
    fn test_blank_field_is_missing() {
        let mut form = filled_form();
        form.brand = Some("   ".to_string());
        assert_eq!(form.validate(), Err(QuoteInputError::MissingField("brand")));
    }

    #[test]
    fn test_bad_numbers() {
        let mut form = filled_form();
        form.vehicle_value = Some("setenta mil".to_string());
        assert_eq!(
            form.validate(),
            Err(QuoteInputError::InvalidAmount("setenta mil".to_string()))
        );

        let mut form = filled_form();
        form.year = Some("21/22".to_string());
        assert_eq!(form.validate(), Err(QuoteInputError::InvalidYear("21/22".to_string())));
    }
}
