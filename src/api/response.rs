//! Response types for the Tax Calculator API.
//!
//! This module defines the success bodies returned by the handlers, the
//! error body, and the mapping from [`TaxError`] to HTTP responses.

use axum::{
    Json,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::TaxError;
use crate::models::{Bracket, BracketTax, Employee, EmployeeTax, TaxResult, User};

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
#[derive(Debug)]
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// Pairs an error body with a status.
    pub fn new(status: StatusCode, error: ApiError) -> Self {
        Self { status, error }
    }

    /// A 400 response with the given body.
    pub fn bad_request(error: ApiError) -> Self {
        Self::new(StatusCode::BAD_REQUEST, error)
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        let mut response = (self.status, Json(self.error)).into_response();
        if self.status == StatusCode::UNAUTHORIZED {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }
        response
    }
}

impl From<TaxError> for ApiErrorResponse {
    fn from(error: TaxError) -> Self {
        match error {
            TaxError::ConfigNotFound { path } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration error",
                    format!("Configuration file not found: {}", path),
                ),
            },
            TaxError::ConfigParseError { path, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration parse error",
                    format!("Failed to parse {}: {}", path, message),
                ),
            },
            TaxError::InvalidField { field, message } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "VALIDATION_ERROR",
                    message,
                    format!("Invalid value for field '{}'", field),
                ),
            },
            TaxError::UsernameTaken { .. } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::new("USERNAME_TAKEN", "Username already registered"),
            },
            TaxError::EmailTaken { .. } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::new("EMAIL_TAKEN", "Email already registered"),
            },
            TaxError::DuplicateTaxNumber { tax_number } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "DUPLICATE_TAX_NUMBER",
                    "Employee with this tax number already exists",
                    format!("Tax number '{}' is already registered", tax_number),
                ),
            },
            TaxError::InvalidCredentials => ApiErrorResponse {
                status: StatusCode::UNAUTHORIZED,
                error: ApiError::new("INVALID_CREDENTIALS", "Incorrect username or password"),
            },
            TaxError::Unauthorized { message } => ApiErrorResponse {
                status: StatusCode::UNAUTHORIZED,
                error: ApiError::with_details(
                    "UNAUTHORIZED",
                    "Could not validate credentials",
                    message,
                ),
            },
            TaxError::InactiveUser { .. } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::new("INACTIVE_USER", "Inactive user"),
            },
            TaxError::RecordNotFound { id } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::with_details(
                    "RECORD_NOT_FOUND",
                    "Tax record not found",
                    format!("No tax record with id {}", id),
                ),
            },
            TaxError::EmployeeNotFound { id } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::with_details(
                    "EMPLOYEE_NOT_FOUND",
                    "Employee not found",
                    format!("No employee with id {}", id),
                ),
            },
            TaxError::Internal { message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details("INTERNAL_ERROR", "Internal server error", message),
            },
        }
    }
}

/// Body of `GET /`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RootResponse {
    /// Service name.
    pub message: String,
    /// Crate version.
    pub version: String,
}

/// Body of `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `healthy` when the service answers.
    pub status: String,
    /// Human-readable status.
    pub message: String,
}

/// A plain confirmation message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// The message.
    pub message: String,
}

/// Body of a successful login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    /// The signed bearer token.
    pub access_token: String,
    /// Always `bearer`.
    pub token_type: String,
}

/// Public view of a user; never includes the password hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    /// User identifier.
    pub id: i64,
    /// Login name.
    pub username: String,
    /// Email address.
    pub email: String,
    /// Whether the user can authenticate.
    pub is_active: bool,
    /// When the user registered.
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        UserResponse {
            id: user.id,
            username: user.username,
            email: user.email,
            is_active: user.is_active,
            created_at: user.created_at,
        }
    }
}

/// Body of `POST /tax/calculate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxBreakdownResponse {
    /// The salary the calculation was run on.
    pub gross_salary: Decimal,
    /// Tax owed.
    pub tax_paid: Decimal,
    /// Salary after tax.
    pub net_salary: Decimal,
    /// Effective rate as a percentage.
    pub tax_rate: Decimal,
    /// The bracket table.
    pub tax_brackets: Vec<Bracket>,
    /// Per-bracket contributions.
    pub breakdown: Vec<BracketTax>,
}

impl TaxBreakdownResponse {
    /// Builds the response from a calculation result.
    pub fn new(gross_salary: Decimal, result: TaxResult) -> Self {
        TaxBreakdownResponse {
            gross_salary,
            tax_paid: result.tax_paid,
            net_salary: result.net_salary,
            tax_rate: result.tax_rate,
            tax_brackets: result.brackets,
            breakdown: result.breakdown,
        }
    }
}

/// An employee together with their latest tax entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeWithTax {
    /// The employee profile.
    pub employee: Employee,
    /// The latest tax entry, if any.
    pub tax: Option<EmployeeTax>,
}

impl From<(Employee, Option<EmployeeTax>)> for EmployeeWithTax {
    fn from((employee, tax): (Employee, Option<EmployeeTax>)) -> Self {
        EmployeeWithTax { employee, tax }
    }
}
