//! Progressive tax calculation.
//!
//! This module provides [`calculate`], which applies the marginal rates of
//! [`TAX_BRACKETS`] to a gross salary. Income is taxed at the rate of the
//! bracket it falls into, never at one flat rate over the whole amount.

use rust_decimal::Decimal;

use crate::models::{BracketTax, TaxResult};

use super::brackets::TAX_BRACKETS;
use super::rounding::round_money;

/// Calculates the tax owed on an annual gross salary.
///
/// For every bracket whose lower bound the salary exceeds, the slice
/// `min(gross_salary, upper) - lower` is taxed at the bracket's rate. The
/// per-bracket amounts are summed unrounded and the sum is rounded to two
/// decimal places once. That rounded tax is what both the net salary and
/// the effective rate are derived from.
///
/// The function is total: a zero salary yields a zero tax and a zero
/// effective rate, and a negative salary reaches no bracket. Callers that
/// treat positivity as a business rule validate before calling.
///
/// # Arguments
///
/// * `gross_salary` - Annual gross income
///
/// # Returns
///
/// A [`TaxResult`] with the rounded tax, net salary and effective rate, the
/// bracket table, and the per-bracket breakdown.
///
/// # Examples
///
/// ```
/// use tax_calculator::calculation::calculate;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let result = calculate(Decimal::from(600000));
/// assert_eq!(result.tax_paid, Decimal::from_str("32499.75").unwrap());
/// assert_eq!(result.breakdown.len(), 3);
/// ```
pub fn calculate(gross_salary: Decimal) -> TaxResult {
    let breakdown: Vec<BracketTax> = TAX_BRACKETS
        .iter()
        .filter(|bracket| gross_salary > bracket.lower)
        .map(|bracket| {
            let taxable_amount = bracket.taxable_amount(gross_salary);
            BracketTax {
                lower: bracket.lower,
                upper: bracket.upper,
                rate: bracket.rate,
                taxable_amount,
                tax: taxable_amount * bracket.rate,
            }
        })
        .collect();

    let total_tax: Decimal = breakdown.iter().map(|line| line.tax).sum();
    let tax_paid = round_money(total_tax);

    let tax_rate = if gross_salary > Decimal::ZERO {
        round_money(tax_paid / gross_salary * Decimal::ONE_HUNDRED)
    } else {
        Decimal::ZERO
    };

    TaxResult {
        tax_paid,
        net_salary: round_money(gross_salary - tax_paid),
        tax_rate,
        brackets: TAX_BRACKETS.to_vec(),
        breakdown,
    }
}
