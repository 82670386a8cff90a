//! Calculation logic for the Tax Calculator.
//!
//! This module contains the fixed progressive bracket table, the pure
//! [`calculate`] function that applies it to a gross salary, and the
//! two-decimal monetary rounding used for its outputs.

mod brackets;
mod progressive;
mod rounding;

pub use brackets::{TAX_BRACKETS, TAX_FREE_THRESHOLD};
pub use progressive::calculate;
pub use rounding::round_money;
