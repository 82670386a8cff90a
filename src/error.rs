//! Error types for the Tax Calculator.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every failure that can occur outside the pure tax calculation:
//! configuration, validation, authentication and record lookup.

use thiserror::Error;

/// The main error type for the Tax Calculator.
///
/// The tax calculation itself is total and never fails; every other
/// operation in the crate returns this error type.
///
/// # Example
///
/// ```
/// use tax_calculator::error::TaxError;
///
/// let error = TaxError::RecordNotFound { id: 42 };
/// assert_eq!(error.to_string(), "Tax record not found: 42");
/// ```
#[derive(Debug, Error)]
pub enum TaxError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A request field failed validation.
    #[error("Invalid field '{field}': {message}")]
    InvalidField {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// The username is already registered.
    #[error("Username already registered: {username}")]
    UsernameTaken {
        /// The conflicting username.
        username: String,
    },

    /// The email address is already registered.
    #[error("Email already registered: {email}")]
    EmailTaken {
        /// The conflicting email address.
        email: String,
    },

    /// An employee with the same tax number already exists.
    #[error("Employee with tax number '{tax_number}' already exists")]
    DuplicateTaxNumber {
        /// The conflicting tax number.
        tax_number: String,
    },

    /// Username or password did not match.
    #[error("Incorrect username or password")]
    InvalidCredentials,

    /// The request carried no valid bearer token.
    #[error("Could not validate credentials: {message}")]
    Unauthorized {
        /// Why the credentials were rejected.
        message: String,
    },

    /// The authenticated user has been deactivated.
    #[error("Inactive user: {username}")]
    InactiveUser {
        /// The deactivated user's name.
        username: String,
    },

    /// No tax record with this id is visible to the caller.
    #[error("Tax record not found: {id}")]
    RecordNotFound {
        /// The requested record id.
        id: i64,
    },

    /// No employee with this id exists.
    #[error("Employee not found: {id}")]
    EmployeeNotFound {
        /// The requested employee id.
        id: i64,
    },

    /// An unexpected internal failure.
    #[error("Internal error: {message}")]
    Internal {
        /// A description of the failure.
        message: String,
    },
}

impl TaxError {
    /// Shorthand for an [`TaxError::InvalidField`].
    pub fn invalid_field(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidField {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// A type alias for Results that return TaxError.
pub type AppResult<T> = Result<T, TaxError>;
