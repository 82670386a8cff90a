//! Tax calculation result models.
//!
//! This module contains the [`TaxResult`] type returned by
//! [`calculate`](crate::calculation::calculate) together with the bracket
//! types it carries for client-side breakdown rendering.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A contiguous income range taxed at a single marginal rate.
///
/// `upper` is `None` for the open-ended top bracket.
///
/// # Example
///
/// ```
/// use tax_calculator::models::Bracket;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let bracket = Bracket {
///     lower: Decimal::from(250001),
///     upper: Some(Decimal::from(500000)),
///     rate: Decimal::from_str("0.05").unwrap(),
/// };
/// assert_eq!(bracket.taxable_amount(Decimal::from(300000)), Decimal::from(49999));
/// assert_eq!(bracket.taxable_amount(Decimal::from(900000)), Decimal::from(249999));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bracket {
    /// Lower bound; income strictly above it is taxed in this bracket.
    pub lower: Decimal,
    /// Upper bound, or `None` when unbounded.
    pub upper: Option<Decimal>,
    /// Marginal rate as a fraction in `[0, 1)`.
    pub rate: Decimal,
}

impl Bracket {
    /// Returns the portion of `gross_salary` that falls in this bracket.
    ///
    /// Zero when the salary does not exceed the lower bound.
    pub fn taxable_amount(&self, gross_salary: Decimal) -> Decimal {
        if gross_salary <= self.lower {
            return Decimal::ZERO;
        }
        let ceiling = match self.upper {
            Some(upper) => gross_salary.min(upper),
            None => gross_salary,
        };
        ceiling - self.lower
    }
}

/// The tax owed within a single bracket, before rounding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketTax {
    /// Lower bound of the bracket.
    pub lower: Decimal,
    /// Upper bound of the bracket, `None` when unbounded.
    pub upper: Option<Decimal>,
    /// Marginal rate as a fraction.
    pub rate: Decimal,
    /// Income taxed within this bracket.
    pub taxable_amount: Decimal,
    /// `taxable_amount * rate`, unrounded.
    pub tax: Decimal,
}

/// The outcome of a progressive tax calculation.
///
/// Never stored on its own; callers copy the fields they need onto a
/// [`TaxRecord`](super::TaxRecord) or [`EmployeeTax`](super::EmployeeTax).
///
/// # Example
///
/// ```
/// use tax_calculator::calculation::calculate;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let result = calculate(Decimal::from(300000));
/// assert_eq!(result.tax_paid, Decimal::from_str("2499.95").unwrap());
/// assert_eq!(result.net_salary, Decimal::from_str("297500.05").unwrap());
/// assert_eq!(result.tax_rate, Decimal::from_str("0.83").unwrap());
/// assert_eq!(result.brackets.len(), 4);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxResult {
    /// Total tax owed, rounded to two decimal places.
    pub tax_paid: Decimal,
    /// Gross salary minus `tax_paid`, rounded to two decimal places.
    pub net_salary: Decimal,
    /// Effective tax rate as a percentage, rounded to two decimal places.
    pub tax_rate: Decimal,
    /// The bracket table used for the calculation.
    pub brackets: Vec<Bracket>,
    /// Per-bracket contributions for every bracket the salary reaches.
    pub breakdown: Vec<BracketTax>,
}
