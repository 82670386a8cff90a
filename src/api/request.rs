//! Request types for the Tax Calculator API.
//!
//! This module defines the JSON request bodies and query strings accepted by
//! the handlers. Employee registration and record updates deserialize
//! straight into [`NewEmployee`](crate::models::NewEmployee) and
//! [`TaxRecordUpdate`](crate::models::TaxRecordUpdate).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::RecordsConfig;
use crate::error::AppResult;
use crate::models::{
    validate_email, validate_gross_salary, validate_password, validate_tax_year,
    validate_username,
};

/// Request body for `POST /tax/calculate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculateTaxRequest {
    /// Annual gross salary.
    pub gross_salary: Decimal,
    /// Accepted for symmetry with record creation; does not affect the result.
    #[serde(default)]
    pub tax_year: Option<i32>,
}

/// Request body for `POST /tax/records`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTaxRecordRequest {
    /// Annual gross salary.
    pub gross_salary: Decimal,
    /// The tax year the salary belongs to.
    pub tax_year: i32,
}

impl CreateTaxRecordRequest {
    /// Checks the salary is positive and the year is in range.
    pub fn validate(&self, min_tax_year: i32, current_year: i32) -> AppResult<()> {
        validate_gross_salary(self.gross_salary)?;
        validate_tax_year(self.tax_year, min_tax_year, current_year)
    }
}

/// Request body for `POST /auth/register`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    /// Login name.
    pub username: String,
    /// Email address.
    pub email: String,
    /// Plain-text password; hashed before it is stored.
    pub password: String,
}

impl RegisterRequest {
    /// Validates username, email and password length.
    pub fn validate(&self, min_password_length: usize) -> AppResult<()> {
        validate_username(&self.username)?;
        validate_email(&self.email)?;
        validate_password(&self.password, min_password_length)
    }
}

/// Request body for `POST /auth/login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Login name.
    pub username: String,
    /// Plain-text password.
    pub password: String,
}

/// Paging query for `GET /tax/records`.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct PageQuery {
    /// Number of records to skip.
    #[serde(default)]
    pub skip: Option<usize>,
    /// Maximum number of records to return.
    #[serde(default)]
    pub limit: Option<usize>,
}

impl PageQuery {
    /// Resolves `(skip, limit)`, defaulting and capping `limit` from config.
    pub fn resolve(&self, records: &RecordsConfig) -> (usize, usize) {
        let skip = self.skip.unwrap_or(0);
        let limit = self
            .limit
            .unwrap_or(records.default_page_limit)
            .min(records.max_page_limit);
        (skip, limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TaxError;
    use rust_decimal_macros::dec;

    #[test]
    fn test_deserialize_calculate_request_accepts_number_or_string() {
        let from_number: CalculateTaxRequest =
            serde_json::from_str(r#"{"gross_salary": 300000}"#).unwrap();
        let from_string: CalculateTaxRequest =
            serde_json::from_str(r#"{"gross_salary": "300000.50", "tax_year": 2025}"#).unwrap();

        assert_eq!(from_number.gross_salary, dec!(300000));
        assert_eq!(from_number.tax_year, None);
        assert_eq!(from_string.gross_salary, dec!(300000.50));
        assert_eq!(from_string.tax_year, Some(2025));
    }

    #[test]
    fn test_create_record_request_validation() {
        let request = CreateTaxRecordRequest {
            gross_salary: dec!(500000),
            tax_year: 2025,
        };
        assert!(request.validate(2020, 2025).is_ok());

        let too_late = CreateTaxRecordRequest {
            tax_year: 2027,
            ..request.clone()
        };
        assert!(too_late.validate(2020, 2025).is_err());

        let zero = CreateTaxRecordRequest {
            gross_salary: Decimal::ZERO,
            ..request
        };
        match zero.validate(2020, 2025) {
            Err(TaxError::InvalidField { field, .. }) => assert_eq!(field, "gross_salary"),
            other => panic!("Expected InvalidField, got {:?}", other),
        }
    }

    #[test]
    fn test_register_request_validation() {
        let request = RegisterRequest {
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            password: "secret".to_string(),
        };
        assert!(request.validate(6).is_ok());

        let short = RegisterRequest {
            password: "abc".to_string(),
            ..request.clone()
        };
        assert!(short.validate(6).is_err());

        let bad_email = RegisterRequest {
            email: "not-an-email".to_string(),
            ..request
        };
        assert!(bad_email.validate(6).is_err());
    }

    #[test]
    fn test_page_query_defaults_and_caps() {
        let records = RecordsConfig {
            min_tax_year: 2020,
            default_page_limit: 100,
            max_page_limit: 500,
        };

        assert_eq!(PageQuery::default().resolve(&records), (0, 100));
        assert_eq!(
            PageQuery {
                skip: Some(5),
                limit: Some(10)
            }
            .resolve(&records),
            (5, 10)
        );
        assert_eq!(
            PageQuery {
                skip: None,
                limit: Some(10_000)
            }
            .resolve(&records),
            (0, 500)
        );
    }
}
