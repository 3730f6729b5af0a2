//! Configuration types for salary calculation.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;

use crate::calculation::CalculationOptions;
use crate::models::{AdjustmentRule, SalaryProfile};

/// Currency settings used when rounding exported amounts.
#[derive(Debug, Clone, Deserialize)]
pub struct CurrencyConfig {
    /// ISO currency code (e.g., "INR").
    pub code: String,
    /// Number of decimal places amounts are rounded to on export.
    pub decimal_places: u32,
}

/// Payroll metadata from payroll.yaml.
#[derive(Debug, Clone, Deserialize)]
pub struct PayrollMetadata {
    /// The organisation the configuration belongs to.
    pub organisation: String,
    /// Currency settings.
    pub currency: CurrencyConfig,
    /// Calculation options; defaults apply when omitted.
    #[serde(default)]
    pub calculation: CalculationOptions,
}

/// A named template of allowances and deductions.
///
/// Structures act as the rule catalogue when salary records list their
/// adjustments as toggles rather than full rules.
#[derive(Debug, Clone, Deserialize)]
pub struct SalaryStructure {
    /// The human-readable name of the structure.
    pub name: String,
    /// Allowance rules, in display order.
    #[serde(default)]
    pub allowances: Vec<AdjustmentRule>,
    /// Deduction rules, in display order.
    #[serde(default)]
    pub deductions: Vec<AdjustmentRule>,
}

impl SalaryStructure {
    /// Builds a salary profile from this structure for the given base salary.
    pub fn profile_for(&self, base_salary: Decimal) -> SalaryProfile {
        SalaryProfile {
            base_salary,
            allowances: self.allowances.clone(),
            deductions: self.deductions.clone(),
        }
    }

    /// Finds an allowance by toggle key. See [`rule_matches_key`].
    pub fn find_allowance(&self, key: &str) -> Option<&AdjustmentRule> {
        self.allowances.iter().find(|r| rule_matches_key(r, key))
    }

    /// Finds a deduction by toggle key. See [`rule_matches_key`].
    pub fn find_deduction(&self, key: &str) -> Option<&AdjustmentRule> {
        self.deductions.iter().find(|r| rule_matches_key(r, key))
    }
}

/// Returns true if a toggle key names the rule.
///
/// Keys match the rule id, or the rule name, case-insensitively and with
/// spaces, hyphens and underscores treated alike.
pub fn rule_matches_key(rule: &AdjustmentRule, key: &str) -> bool {
    let key = toggle_key(key);
    toggle_key(&rule.id) == key || toggle_key(&rule.name) == key
}

fn toggle_key(raw: &str) -> String {
    raw.trim()
        .chars()
        .map(|c| match c {
            ' ' | '-' => '_',
            c => c.to_ascii_lowercase(),
        })
        .collect()
}

/// Salary structures effective from a given date.
#[derive(Debug, Clone, Deserialize)]
pub struct StructureConfig {
    /// The effective date for these structures.
    pub effective_date: NaiveDate,
    /// Map of structure code to structure.
    pub structures: HashMap<String, SalaryStructure>,
}

/// The complete payroll configuration loaded from YAML files.
#[derive(Debug, Clone)]
pub struct PayrollConfig {
    /// Payroll metadata.
    metadata: PayrollMetadata,
    /// Structure configurations by effective date (sorted oldest first).
    structures: Vec<StructureConfig>,
}

impl PayrollConfig {
    /// Creates a new PayrollConfig from its component parts.
    pub fn new(metadata: PayrollMetadata, structures: Vec<StructureConfig>) -> Self {
        let mut sorted_structures = structures;
        sorted_structures.sort_by(|a, b| a.effective_date.cmp(&b.effective_date));
        Self {
            metadata,
            structures: sorted_structures,
        }
    }

    /// Returns the payroll metadata.
    pub fn metadata(&self) -> &PayrollMetadata {
        &self.metadata
    }

    /// Returns all structure configurations, oldest first.
    pub fn structures(&self) -> &[StructureConfig] {
        &self.structures
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::DeductionBasis;

    fn create_structure() -> SalaryStructure {
        serde_yaml::from_str(
            r#"
name: "Standard"
allowances:
  - { id: hra, name: "House Rent", value: 20, kind: percentage }
deductions:
  - { id: pf, name: "Provident Fund", value: 12, kind: percentage }
"#,
        )
        .unwrap()
    }

    #[test]
    fn test_profile_for_copies_rules() {
        let structure = create_structure();
        let profile = structure.profile_for(Decimal::from(9000));

        assert_eq!(profile.base_salary, Decimal::from(9000));
        assert_eq!(profile.allowances, structure.allowances);
        assert_eq!(profile.deductions, structure.deductions);
    }

    #[test]
    fn test_find_rule_by_id_or_name() {
        let structure = create_structure();

        assert_eq!(structure.find_allowance("HRA").unwrap().id, "hra");
        assert_eq!(structure.find_allowance("house_rent").unwrap().id, "hra");
        assert_eq!(structure.find_deduction("provident-fund").unwrap().id, "pf");
        assert!(structure.find_allowance("pf").is_none());
    }

    #[test]
    fn test_metadata_calculation_defaults() {
        let metadata: PayrollMetadata = serde_yaml::from_str(
            r#"
organisation: "Acme"
currency: { code: "USD", decimal_places: 2 }
"#,
        )
        .unwrap();

        assert_eq!(metadata.calculation.deduction_basis, DeductionBasis::Gross);
    }

    #[test]
    fn test_payroll_config_sorts_structures_by_date() {
        let metadata: PayrollMetadata = serde_yaml::from_str(
            "organisation: Acme\ncurrency: { code: USD, decimal_places: 2 }\n",
        )
        .unwrap();
        let later = StructureConfig {
            effective_date: NaiveDate::from_ymd_opt(2025, 7, 1).unwrap(),
            structures: HashMap::new(),
        };
        let earlier = StructureConfig {
            effective_date: NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
            structures: HashMap::new(),
        };

        let config = PayrollConfig::new(metadata, vec![later, earlier]);
        let dates: Vec<NaiveDate> = config.structures().iter().map(|s| s.effective_date).collect();
        assert_eq!(
            dates,
            vec![
                NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
                NaiveDate::from_ymd_opt(2025, 7, 1).unwrap(),
            ]
        );
    }
}
