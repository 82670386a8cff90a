//! Tax record model and its update semantics.
//!
//! A [`TaxRecord`] stores a user's gross salary for a tax year together with
//! the tax and net salary derived from it. The derived fields are only ever
//! produced by [`calculate`], both on creation and whenever the salary
//! changes, so they can always be reproduced from the stored salary.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::calculate;
use crate::error::{TaxError, AppResult};

/// A persisted salary and its computed tax.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxRecord {
    /// Record identifier.
    pub id: i64,
    /// The owning user.
    pub user_id: i64,
    /// Annual gross salary.
    pub gross_salary: Decimal,
    /// Tax owed on `gross_salary`.
    pub tax_paid: Decimal,
    /// `gross_salary - tax_paid`.
    pub net_salary: Decimal,
    /// The tax year the salary belongs to.
    pub tax_year: i32,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
    /// When the record was last modified.
    pub updated_at: DateTime<Utc>,
}

/// A partial update to a [`TaxRecord`]. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxRecordUpdate {
    /// New gross salary; triggers a full recalculation.
    #[serde(default)]
    pub gross_salary: Option<Decimal>,
    /// New tax year.
    #[serde(default)]
    pub tax_year: Option<i32>,
}

impl TaxRecord {
    /// Creates a record, deriving its tax fields from `gross_salary`.
    ///
    /// # Examples
    ///
    /// ```
    /// use tax_calculator::models::TaxRecord;
    /// use chrono::Utc;
    /// use rust_decimal::Decimal;
    /// use std::str::FromStr;
    ///
    /// let record = TaxRecord::new(1, 7, Decimal::from(300000), 2025, Utc::now());
    /// assert_eq!(record.tax_paid, Decimal::from_str("2499.95").unwrap());
    /// assert!(record.is_consistent());
    /// ```
    pub fn new(
        id: i64,
        user_id: i64,
        gross_salary: Decimal,
        tax_year: i32,
        now: DateTime<Utc>,
    ) -> Self {
        let result = calculate(gross_salary);
        Self {
            id,
            user_id,
            gross_salary,
            tax_paid: result.tax_paid,
            net_salary: result.net_salary,
            tax_year,
            created_at: now,
            updated_at: now,
        }
    }

    /// Applies a partial update.
    ///
    /// A new gross salary replaces `tax_paid` and `net_salary` with a fresh
    /// [`calculate`] of the new salary; the previous derived values play no
    /// part. `updated_at` is always set to `now`.
    pub fn apply_update(&mut self, update: &TaxRecordUpdate, now: DateTime<Utc>) {
        if let Some(gross_salary) = update.gross_salary {
            let result = calculate(gross_salary);
            self.gross_salary = gross_salary;
            self.tax_paid = result.tax_paid;
            self.net_salary = result.net_salary;
        }
        if let Some(tax_year) = update.tax_year {
            self.tax_year = tax_year;
        }
        self.updated_at = now;
    }

    /// Returns true if the derived fields match a fresh calculation.
    pub fn is_consistent(&self) -> bool {
        let result = calculate(self.gross_salary);
        self.tax_paid == result.tax_paid && self.net_salary == result.net_salary
    }
}

impl TaxRecordUpdate {
    /// Validates the fields that are present.
    pub fn validate(&self, min_tax_year: i32, current_year: i32) -> AppResult<()> {
        if let Some(gross_salary) = self.gross_salary {
            validate_gross_salary(gross_salary)?;
        }
        if let Some(tax_year) = self.tax_year {
            validate_tax_year(tax_year, min_tax_year, current_year)?;
        }
        Ok(())
    }
}

/// Rejects non-positive salaries.
pub fn validate_gross_salary(gross_salary: Decimal) -> AppResult<()> {
    if gross_salary <= Decimal::ZERO {
        return Err(TaxError::invalid_field(
            "gross_salary",
            "Gross salary must be positive",
        ));
    }
    Ok(())
}

/// Accepts tax years from `min_tax_year` up to the year after `current_year`.
pub fn validate_tax_year(tax_year: i32, min_tax_year: i32, current_year: i32) -> AppResult<()> {
    let max_tax_year = current_year + 1;
    if tax_year < min_tax_year || tax_year > max_tax_year {
        return Err(TaxError::invalid_field(
            "tax_year",
            format!("Tax year must be between {min_tax_year} and {max_tax_year}"),
        ));
    }
    Ok(())
}
