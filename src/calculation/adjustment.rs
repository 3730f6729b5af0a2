//! Adjustment rule resolution.
//!
//! This module turns a single allowance or deduction rule into a currency
//! amount against a basis salary, recording an audit step for the decision.

use rust_decimal::Decimal;
use tracing::warn;

use crate::models::{AdjustmentKind, AdjustmentRule, AuditStep, ResolvedAdjustment};

/// The result of resolving one rule, including the amount and audit step.
#[derive(Debug, Clone)]
pub struct AdjustmentResolution {
    /// The rule paired with its resolved amount.
    pub resolved: ResolvedAdjustment,
    /// The audit step recording this resolution.
    pub audit_step: AuditStep,
}

/// Returns `percent`% of `basis`, or `None` if the result overflows.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::percentage_of;
/// use rust_decimal::Decimal;
///
/// let amount = percentage_of(Decimal::from(10000), Decimal::from(10));
/// assert_eq!(amount, Some(Decimal::from(1000)));
/// ```
pub fn percentage_of(basis: Decimal, percent: Decimal) -> Option<Decimal> {
    basis
        .checked_mul(percent)?
        .checked_div(Decimal::ONE_HUNDRED)
}

/// Resolves a rule to a currency amount.
///
/// A fixed rule resolves to its value whatever the basis. A percentage rule
/// resolves to `basis * value / 100`; values over 100 are not clamped. An
/// amount that overflows the decimal range resolves to zero.
///
/// # Arguments
///
/// * `rule` - The rule to resolve
/// * `basis` - The salary figure percentage rules are taken from
/// * `basis_label` - Name of the basis for the audit trail (e.g., "base")
/// * `step_number` - The step number for audit trail sequencing
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::resolve_adjustment;
/// use payroll_engine::models::AdjustmentRule;
/// use rust_decimal::Decimal;
///
/// let hra = AdjustmentRule::percentage("a1", "HRA", Decimal::from(20));
/// let result = resolve_adjustment(&hra, Decimal::from(10000), "base", 1);
/// assert_eq!(result.resolved.amount, Decimal::from(2000));
/// ```
pub fn resolve_adjustment(
    rule: &AdjustmentRule,
    basis: Decimal,
    basis_label: &str,
    step_number: u32,
) -> AdjustmentResolution {
    let (amount, reasoning) = match rule.kind {
        AdjustmentKind::Fixed => (
            rule.value,
            format!("Fixed amount ${}", rule.value.normalize()),
        ),
        AdjustmentKind::Percentage => match percentage_of(basis, rule.value) {
            Some(amount) => (
                amount,
                format!(
                    "{}% of {} salary ${} = ${}",
                    rule.value.normalize(),
                    basis_label,
                    basis.normalize(),
                    amount.normalize()
                ),
            ),
            None => {
                warn!(
                    rule_id = %rule.id,
                    basis = %basis,
                    value = %rule.value,
                    "Percentage amount overflowed, resolved to zero"
                );
                (
                    Decimal::ZERO,
                    format!(
                        "{}% of {} salary ${} overflows - resolved to $0",
                        rule.value.normalize(),
                        basis_label,
                        basis.normalize()
                    ),
                )
            }
        },
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: rule.id.clone(),
        rule_name: rule.name.clone(),
        input: serde_json::json!({
            "kind": rule.kind.as_str(),
            "value": rule.value.normalize().to_string(),
            "basis": basis_label,
            "basis_amount": basis.normalize().to_string()
        }),
        output: serde_json::json!({
            "amount": amount.normalize().to_string()
        }),
        reasoning,
    };

    AdjustmentResolution {
        resolved: ResolvedAdjustment {
            rule: rule.clone(),
            amount,
        },
        audit_step,
    }
}
