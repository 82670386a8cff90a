//! Core data models for the Tax Calculator.
//!
//! This module contains the calculation result types and the records the
//! store keeps: users, tax records, employees and employee taxes.

mod employee;
mod tax_record;
mod tax_result;
mod user;

pub use employee::{Employee, EmployeeTax, NewEmployee};
pub use tax_record::{TaxRecord, TaxRecordUpdate, validate_gross_salary, validate_tax_year};
pub use tax_result::{Bracket, BracketTax, TaxResult};
pub use user::{NewUser, User, validate_email, validate_password, validate_username};
