//! HTTP API module for the Tax Calculator.
//!
//! This module provides the REST endpoints for quick tax calculation,
//! user accounts, per-user tax records and employee registration.

mod auth;
mod employees;
mod handlers;
mod records;
mod request;
mod response;
mod state;

pub use auth::CurrentUser;
pub use handlers::create_router;
pub use request::{
    CalculateTaxRequest, CreateTaxRecordRequest, LoginRequest, PageQuery, RegisterRequest,
};
pub use response::{
    ApiError, ApiErrorResponse, EmployeeWithTax, HealthResponse, MessageResponse, RootResponse,
    TaxBreakdownResponse, TokenResponse, UserResponse,
};
pub use state::AppState;
