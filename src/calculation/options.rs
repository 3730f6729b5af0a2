//! Options controlling a breakdown calculation.

use serde::{Deserialize, Serialize};

/// The salary figure that percentage deductions are taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeductionBasis {
    /// Percentage deductions apply to the gross salary.
    #[default]
    Gross,
    /// Percentage deductions apply to the base salary.
    Base,
}

impl DeductionBasis {
    /// Returns the snake_case name used in audit output.
    pub fn as_str(&self) -> &'static str {
        match self {
            DeductionBasis::Gross => "gross",
            DeductionBasis::Base => "base",
        }
    }
}

/// Options for [`crate::calculation::compute_breakdown_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CalculationOptions {
    /// The basis for percentage deductions.
    #[serde(default)]
    pub deduction_basis: DeductionBasis,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_basis_is_gross() {
        assert_eq!(CalculationOptions::default().deduction_basis, DeductionBasis::Gross);
    }

    #[test]
    fn test_basis_deserialization() {
        let basis: DeductionBasis = serde_json::from_str("\"base\"").unwrap();
        assert_eq!(basis, DeductionBasis::Base);

        let options: CalculationOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(options.deduction_basis, DeductionBasis::Gross);
    }
}
