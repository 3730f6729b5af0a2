//! Adjustment rule model and related types.
//!
//! An adjustment is a named allowance or deduction. Its value is either a
//! percentage of a basis salary or a fixed currency amount.

use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// How the value of an [`AdjustmentRule`] is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdjustmentKind {
    /// The value is a percentage of the basis salary (20 means 20%).
    Percentage,
    /// The value is an absolute currency amount.
    Fixed,
}

impl AdjustmentKind {
    /// Returns the snake_case name used in serialized output.
    pub fn as_str(&self) -> &'static str {
        match self {
            AdjustmentKind::Percentage => "percentage",
            AdjustmentKind::Fixed => "fixed",
        }
    }
}

/// A single named allowance or deduction entry.
///
/// The `id` is only used for stable ordering and display; it plays no part
/// in the computation. Percentage values above 100 are allowed and are
/// never clamped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdjustmentRule {
    /// Identifier, unique within the owning list.
    pub id: String,
    /// Display label (e.g., "HRA", "Transport").
    pub name: String,
    /// Non-negative magnitude interpreted according to `kind`.
    pub value: Decimal,
    /// Whether `value` is a percentage or a fixed amount.
    pub kind: AdjustmentKind,
}

impl AdjustmentRule {
    /// Creates a new rule.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        value: Decimal,
        kind: AdjustmentKind,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            value,
            kind,
        }
    }

    /// Creates a percentage rule.
    ///
    /// # Examples
    ///
    /// ```
    /// use payroll_engine::models::{AdjustmentKind, AdjustmentRule};
    /// use rust_decimal::Decimal;
    ///
    /// let hra = AdjustmentRule::percentage("a1", "HRA", Decimal::from(20));
    /// assert_eq!(hra.kind, AdjustmentKind::Percentage);
    /// ```
    pub fn percentage(id: impl Into<String>, name: impl Into<String>, value: Decimal) -> Self {
        Self::new(id, name, value, AdjustmentKind::Percentage)
    }

    /// Creates a fixed-amount rule.
    pub fn fixed(id: impl Into<String>, name: impl Into<String>, value: Decimal) -> Self {
        Self::new(id, name, value, AdjustmentKind::Fixed)
    }

    /// Creates a rule from a floating-point value.
    ///
    /// Values arriving from untyped sources may be `NaN` or infinite. Such
    /// values cannot be represented as a [`Decimal`] and are replaced by
    /// zero, so the rule later resolves to an amount of zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use payroll_engine::models::{AdjustmentKind, AdjustmentRule};
    /// use rust_decimal::Decimal;
    ///
    /// let broken = AdjustmentRule::from_f64("d1", "Tax", f64::NAN, AdjustmentKind::Percentage);
    /// assert_eq!(broken.value, Decimal::ZERO);
    /// ```
    pub fn from_f64(
        id: impl Into<String>,
        name: impl Into<String>,
        value: f64,
        kind: AdjustmentKind,
    ) -> Self {
        let id = id.into();
        let value = amount_from_f64(value).unwrap_or_else(|| {
            warn!(rule_id = %id, value = %value, "Non-finite rule value replaced with zero");
            Decimal::ZERO
        });
        Self::new(id, name, value, kind)
    }

    /// Returns true if the rule is a percentage rule.
    pub fn is_percentage(&self) -> bool {
        self.kind == AdjustmentKind::Percentage
    }
}

/// Converts a floating-point amount into a [`Decimal`].
///
/// Returns `None` for `NaN`, infinities, and magnitudes outside the
/// decimal range.
pub fn amount_from_f64(value: f64) -> Option<Decimal> {
    if !value.is_finite() {
        return None;
    }
    Decimal::from_f64(value)
}
