//! Validation of user-edited salary profiles.
//!
//! The calculator accepts any profile and never reports errors. When a
//! profile comes from an edit form, callers run [`validate_profile`] first
//! and show the returned error to the user.

use rust_decimal::Decimal;
use std::collections::HashSet;

use crate::error::{EngineError, EngineResult};
use crate::models::{AdjustmentRule, SalaryProfile};

/// Checks a profile, returning the first failure.
///
/// # Examples
///
/// ```
/// use payroll_engine::error::EngineError;
/// use payroll_engine::models::SalaryProfile;
/// use payroll_engine::validation::validate_profile;
/// use rust_decimal::Decimal;
///
/// assert!(validate_profile(&SalaryProfile::new(Decimal::from(5000))).is_ok());
///
/// let err = validate_profile(&SalaryProfile::new(Decimal::ZERO)).unwrap_err();
/// assert!(matches!(err, EngineError::Validation { .. }));
/// ```
pub fn validate_profile(profile: &SalaryProfile) -> EngineResult<()> {
    match validate_profile_all(profile).into_iter().next() {
        Some(error) => Err(error),
        None => Ok(()),
    }
}

/// Checks a profile, returning every failure in field order.
///
/// Rules checked:
/// - base salary is strictly positive
/// - rule names are not blank
/// - rule values are not negative
/// - rule ids are unique within their list
pub fn validate_profile_all(profile: &SalaryProfile) -> Vec<EngineError> {
    let mut errors = Vec::new();

    if profile.base_salary <= Decimal::ZERO {
        errors.push(EngineError::Validation {
            field: "base_salary".to_string(),
            message: "base salary must be a positive number".to_string(),
        });
    }

    validate_rules(&profile.allowances, "allowances", &mut errors);
    validate_rules(&profile.deductions, "deductions", &mut errors);

    errors
}

fn validate_rules(rules: &[AdjustmentRule], list: &str, errors: &mut Vec<EngineError>) {
    let mut seen = HashSet::new();

    for (index, rule) in rules.iter().enumerate() {
        if rule.name.trim().is_empty() {
            errors.push(EngineError::Validation {
                field: format!("{}[{}].name", list, index),
                message: "name must not be blank".to_string(),
            });
        }

        if rule.value < Decimal::ZERO {
            errors.push(EngineError::Validation {
                field: format!("{}[{}].value", list, index),
                message: format!("value must not be negative, got {}", rule.value),
            });
        }

        if !seen.insert(rule.id.as_str()) {
            errors.push(EngineError::Validation {
                field: format!("{}[{}].id", list, index),
                message: format!("duplicate id '{}'", rule.id),
            });
        }
    }
}
