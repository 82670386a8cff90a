//! Employee model and related types.
//!
//! Employees are registered without authentication. Each registration also
//! stores an [`EmployeeTax`] computed from the employee's salary.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::calculate;
use crate::error::{TaxError, AppResult};

/// A registered employee profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub employee_id: i64,
    /// The employee's full name.
    pub full_name: String,
    /// The employee's tax number, unique across employees.
    pub tax_number: String,
    /// Years of professional experience.
    pub years_of_experience: u32,
    /// Comma-separated skills.
    #[serde(default)]
    pub skills: String,
    /// Annual gross salary.
    pub salary: Decimal,
    /// When the employee was registered.
    pub created_at: DateTime<Utc>,
}

/// The fields supplied when registering an employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewEmployee {
    /// The employee's full name.
    pub full_name: String,
    /// The employee's tax number.
    pub tax_number: String,
    /// Years of professional experience.
    pub years_of_experience: u32,
    /// Comma-separated skills.
    #[serde(default)]
    pub skills: String,
    /// Annual gross salary.
    pub salary: Decimal,
}

/// Tax computed for an employee at registration time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeTax {
    /// Identifier of this tax entry.
    pub id: i64,
    /// The employee this tax belongs to.
    pub employee_id: i64,
    /// Tax owed on the employee's salary.
    pub calculated_tax: Decimal,
    /// Effective tax rate as a percentage.
    pub tax_rate: Decimal,
    /// When the tax was computed.
    pub created_at: DateTime<Utc>,
}

impl NewEmployee {
    /// Checks that the required fields are present and the salary is positive.
    pub fn validate(&self) -> AppResult<()> {
        if self.full_name.trim().is_empty() {
            return Err(TaxError::invalid_field(
                "full_name",
                "Full name must not be empty",
            ));
        }
        if self.tax_number.trim().is_empty() {
            return Err(TaxError::invalid_field(
                "tax_number",
                "Tax number must not be empty",
            ));
        }
        if self.salary <= Decimal::ZERO {
            return Err(TaxError::invalid_field("salary", "Salary must be positive"));
        }
        Ok(())
    }

    /// Builds the stored employee under the given id.
    pub fn into_employee(self, employee_id: i64, now: DateTime<Utc>) -> Employee {
        Employee {
            employee_id,
            full_name: self.full_name,
            tax_number: self.tax_number,
            years_of_experience: self.years_of_experience,
            skills: self.skills,
            salary: self.salary,
            created_at: now,
        }
    }
}

impl EmployeeTax {
    /// Computes the tax entry for `salary`.
    ///
    /// # Examples
    ///
    /// ```
    /// use tax_calculator::models::EmployeeTax;
    /// use chrono::Utc;
    /// use rust_decimal::Decimal;
    /// use std::str::FromStr;
    ///
    /// let tax = EmployeeTax::compute(1, 1, Decimal::from(300000), Utc::now());
    /// assert_eq!(tax.calculated_tax, Decimal::from_str("2499.95").unwrap());
    /// assert_eq!(tax.tax_rate, Decimal::from_str("0.83").unwrap());
    /// ```
    pub fn compute(id: i64, employee_id: i64, salary: Decimal, now: DateTime<Utc>) -> Self {
        let result = calculate(salary);
        Self {
            id,
            employee_id,
            calculated_tax: result.tax_paid,
            tax_rate: result.tax_rate,
            created_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn create_new_employee(salary: Decimal) -> NewEmployee {
        NewEmployee {
            full_name: "Asha Verma".to_string(),
            tax_number: "TN-1001".to_string(),
            years_of_experience: 4,
            skills: "rust,sql".to_string(),
            salary,
        }
    }

    #[test]
    fn test_deserialize_new_employee() {
        let json = r#"{
            "full_name": "Asha Verma",
            "tax_number": "TN-1001",
            "years_of_experience": 4,
            "skills": "rust,sql",
            "salary": "600000"
        }"#;

        let employee: NewEmployee = serde_json::from_str(json).unwrap();
        assert_eq!(employee.full_name, "Asha Verma");
        assert_eq!(employee.years_of_experience, 4);
        assert_eq!(employee.salary, dec!(600000));
    }

    #[test]
    fn test_skills_default_to_empty() {
        let json = r#"{
            "full_name": "Asha Verma",
            "tax_number": "TN-1001",
            "years_of_experience": 0,
            "salary": 1000
        }"#;

        let employee: NewEmployee = serde_json::from_str(json).unwrap();
        assert!(employee.skills.is_empty());
    }

    #[test]
    fn test_validate_rejects_non_positive_salary() {
        assert!(create_new_employee(dec!(1)).validate().is_ok());
        assert!(create_new_employee(Decimal::ZERO).validate().is_err());
    }

    #[test]
    fn test_validate_rejects_blank_tax_number() {
        let mut employee = create_new_employee(dec!(1000));
        employee.tax_number = "  ".to_string();

        match employee.validate() {
            Err(TaxError::InvalidField { field, .. }) => assert_eq!(field, "tax_number"),
            other => panic!("Expected InvalidField, got {:?}", other),
        }
    }

    #[test]
    fn test_into_employee_keeps_fields() {
        let now = Utc::now();
        let employee = create_new_employee(dec!(1000)).into_employee(9, now);

        assert_eq!(employee.employee_id, 9);
        assert_eq!(employee.tax_number, "TN-1001");
        assert_eq!(employee.created_at, now);
    }

    #[test]
    fn test_employee_tax_matches_calculation() {
        let tax = EmployeeTax::compute(3, 9, dec!(1500000), Utc::now());

        assert_eq!(tax.employee_id, 9);
        assert_eq!(tax.calculated_tax, dec!(262499.45));
        assert_eq!(tax.tax_rate, dec!(17.50));
    }
}
