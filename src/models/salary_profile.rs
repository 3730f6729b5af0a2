//! Salary profile model.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::AdjustmentRule;

/// The input to a single breakdown computation.
///
/// List order is kept for display; it has no effect on totals.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SalaryProfile {
    /// The basic salary before any adjustment.
    pub base_salary: Decimal,
    /// Allowances added to the base salary.
    #[serde(default)]
    pub allowances: Vec<AdjustmentRule>,
    /// Deductions subtracted from the gross salary.
    #[serde(default)]
    pub deductions: Vec<AdjustmentRule>,
}

impl SalaryProfile {
    /// Creates a profile with no allowances or deductions.
    pub fn new(base_salary: Decimal) -> Self {
        Self {
            base_salary,
            allowances: Vec::new(),
            deductions: Vec::new(),
        }
    }

    /// Appends an allowance, returning the profile.
    pub fn with_allowance(mut self, rule: AdjustmentRule) -> Self {
        self.allowances.push(rule);
        self
    }

    /// Appends a deduction, returning the profile.
    pub fn with_deduction(mut self, rule: AdjustmentRule) -> Self {
        self.deductions.push(rule);
        self
    }
}

/// A salary profile together with the employee it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeSalary {
    /// The employee identifier.
    pub employee_id: String,
    /// The employee display name.
    pub employee_name: String,
    /// The salary profile.
    pub profile: SalaryProfile,
}
