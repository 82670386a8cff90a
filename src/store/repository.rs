//! The service's record store.
//!
//! [`TaxStore`] owns the users, tax records, employees and employee taxes.
//! Tax fields are never written directly: records and employee taxes are
//! built through [`TaxRecord::new`], [`TaxRecord::apply_update`] and
//! [`EmployeeTax::compute`], which all go through the calculator.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tracing::debug;

use crate::error::{TaxError, AppResult};
use crate::models::{
    Employee, EmployeeTax, NewEmployee, NewUser, TaxRecord, TaxRecordUpdate, User,
};

use super::table::Table;

#[derive(Debug, Default)]
struct Tables {
    users: Table<User>,
    tax_records: Table<TaxRecord>,
    employees: Table<Employee>,
    employee_taxes: Table<EmployeeTax>,
}

/// Shared handle to the in-memory tables. Cloning is cheap.
#[derive(Debug, Clone, Default)]
pub struct TaxStore {
    tables: Arc<Tables>,
}

impl TaxStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    // ---------------------------------------------------------------------
    // Users
    // ---------------------------------------------------------------------

    /// Stores a new user.
    ///
    /// Fails with `UsernameTaken` or `EmailTaken`, checked in that order.
    pub fn create_user(&self, new_user: NewUser, now: DateTime<Utc>) -> AppResult<User> {
        let user = self.tables.users.try_insert_with(
            |mut rows| {
                if rows.clone().any(|u| u.username == new_user.username) {
                    return Err(TaxError::UsernameTaken {
                        username: new_user.username.clone(),
                    });
                }
                if rows.any(|u| u.email == new_user.email) {
                    return Err(TaxError::EmailTaken {
                        email: new_user.email.clone(),
                    });
                }
                Ok(())
            },
            |id| new_user.clone().into_user(id, now),
        )?;
        debug!(user_id = user.id, username = %user.username, "User created");
        Ok(user)
    }

    /// Looks up a user by username.
    pub fn user_by_username(&self, username: &str) -> Option<User> {
        self.tables.users.find(|u| u.username == username)
    }

    /// Marks a user active or inactive. Returns the updated user.
    #[cfg(test)]
    pub(crate) fn set_user_active(&self, id: i64, is_active: bool) -> Option<User> {
        self.tables
            .users
            .update_if(id, |_| true, |u| u.is_active = is_active)
    }

    // ---------------------------------------------------------------------
    // Tax records
    // ---------------------------------------------------------------------

    /// Stores a new tax record for `user_id` with its tax computed from
    /// `gross_salary`.
    pub fn create_tax_record(
        &self,
        user_id: i64,
        gross_salary: Decimal,
        tax_year: i32,
        now: DateTime<Utc>,
    ) -> TaxRecord {
        let record = self
            .tables
            .tax_records
            .insert_with(|id| TaxRecord::new(id, user_id, gross_salary, tax_year, now));
        debug!(record_id = record.id, user_id, "Tax record created");
        record
    }

    /// Lists a user's records in id order, skipping `skip` and returning at
    /// most `limit`.
    pub fn tax_records(&self, user_id: i64, skip: usize, limit: usize) -> Vec<TaxRecord> {
        self.tables
            .tax_records
            .filter(|r| r.user_id == user_id)
            .into_iter()
            .skip(skip)
            .take(limit)
            .collect()
    }

    /// Returns a record if it exists and belongs to `user_id`.
    pub fn tax_record(&self, id: i64, user_id: i64) -> AppResult<TaxRecord> {
        self.tables
            .tax_records
            .get(id)
            .filter(|r| r.user_id == user_id)
            .ok_or(TaxError::RecordNotFound { id })
    }

    /// Applies a partial update to one of `user_id`'s records.
    ///
    /// A changed salary is recalculated from scratch.
    pub fn update_tax_record(
        &self,
        id: i64,
        user_id: i64,
        update: &TaxRecordUpdate,
        now: DateTime<Utc>,
    ) -> AppResult<TaxRecord> {
        let record = self
            .tables
            .tax_records
            .update_if(
                id,
                |r| r.user_id == user_id,
                |r| r.apply_update(update, now),
            )
            .ok_or(TaxError::RecordNotFound { id })?;
        debug!(
            record_id = id,
            user_id,
            recalculated = update.gross_salary.is_some(),
            "Tax record updated"
        );
        Ok(record)
    }

    /// Deletes one of `user_id`'s records and returns it.
    pub fn delete_tax_record(&self, id: i64, user_id: i64) -> AppResult<TaxRecord> {
        let record = self
            .tables
            .tax_records
            .remove_if(id, |r| r.user_id == user_id)
            .ok_or(TaxError::RecordNotFound { id })?;
        debug!(record_id = id, user_id, "Tax record deleted");
        Ok(record)
    }

    // ---------------------------------------------------------------------
    // Employees
    // ---------------------------------------------------------------------

    /// Registers an employee and stores the tax computed from their salary.
    ///
    /// Fails with `DuplicateTaxNumber` if the tax number is already used.
    pub fn register_employee(
        &self,
        new_employee: NewEmployee,
        now: DateTime<Utc>,
    ) -> AppResult<(Employee, EmployeeTax)> {
        let mut tax = None;
        let employee = self.tables.employees.try_insert_with(
            |mut rows| {
                if rows.any(|e| e.tax_number == new_employee.tax_number) {
                    return Err(TaxError::DuplicateTaxNumber {
                        tax_number: new_employee.tax_number.clone(),
                    });
                }
                Ok(())
            },
            |id| {
                // The tax row lands while the employees lock is still held,
                // so no reader sees the employee without it.
                let employee = new_employee.clone().into_employee(id, now);
                tax = Some(self.record_employee_tax(&employee, now));
                employee
            },
        )?;
        let tax = tax.ok_or_else(|| TaxError::Internal {
            message: format!("no tax stored for employee {}", employee.employee_id),
        })?;
        debug!(
            employee_id = employee.employee_id,
            calculated_tax = %tax.calculated_tax,
            "Employee registered"
        );
        Ok((employee, tax))
    }

    /// Computes and stores a new tax entry for an existing employee.
    fn record_employee_tax(&self, employee: &Employee, now: DateTime<Utc>) -> EmployeeTax {
        self.tables
            .employee_taxes
            .insert_with(|id| EmployeeTax::compute(id, employee.employee_id, employee.salary, now))
    }

    /// Looks up an employee by id.
    pub fn employee(&self, employee_id: i64) -> AppResult<Employee> {
        self.tables
            .employees
            .get(employee_id)
            .ok_or(TaxError::EmployeeNotFound { id: employee_id })
    }

    /// Lists all employees in id order.
    pub fn employees(&self) -> Vec<Employee> {
        self.tables.employees.all()
    }

    /// Returns the most recent tax entry for an employee.
    ///
    /// Entries with equal timestamps are ordered by id.
    pub fn latest_employee_tax(&self, employee_id: i64) -> Option<EmployeeTax> {
        self.tables
            .employee_taxes
            .filter(|t| t.employee_id == employee_id)
            .into_iter()
            .max_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)))
    }

    /// Returns an employee with their latest tax entry.
    pub fn employee_with_tax(
        &self,
        employee_id: i64,
    ) -> AppResult<(Employee, Option<EmployeeTax>)> {
        let employee = self.employee(employee_id)?;
        let tax = self.latest_employee_tax(employee_id);
        Ok((employee, tax))
    }

    /// Returns every employee with their latest tax entry, in id order.
    pub fn employees_with_tax(&self) -> Vec<(Employee, Option<EmployeeTax>)> {
        self.employees()
            .into_iter()
            .map(|employee| {
                let tax = self.latest_employee_tax(employee.employee_id);
                (employee, tax)
            })
            .collect()
    }
}
