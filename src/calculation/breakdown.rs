//! Salary breakdown calculation.
//!
//! This module provides [`compute_breakdown`], the pure transformation from
//! a [`SalaryProfile`] to a [`SalaryBreakdown`]. Allowances are resolved
//! against the base salary; deductions against the basis selected in
//! [`CalculationOptions`].

use rust_decimal::Decimal;
use tracing::debug;

use crate::models::{
    AdjustmentRule, AuditStep, ResolvedAdjustment, SalaryBreakdown, SalaryProfile,
};

use super::adjustment::resolve_adjustment;
use super::options::{CalculationOptions, DeductionBasis};

/// Computes the salary breakdown for a profile using default options.
///
/// Percentage allowances are always a percentage of the base salary.
/// Percentage deductions are not: by default they are a percentage of the
/// gross salary ([`DeductionBasis::Gross`]), so a 10% tax on base 10000 with
/// 2500 of allowances is 1250, not 1000. Pass [`DeductionBasis::Base`] to
/// [`compute_breakdown_with`] to take deductions from the base salary.
///
/// The function is total: it never fails and never mutates the profile.
/// Calling it twice with equal profiles yields equal breakdowns.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::compute_breakdown;
/// use payroll_engine::models::{AdjustmentRule, SalaryProfile};
/// use rust_decimal::Decimal;
///
/// let profile = SalaryProfile::new(Decimal::from(10000))
///     .with_allowance(AdjustmentRule::percentage("a1", "HRA", Decimal::from(20)))
///     .with_allowance(AdjustmentRule::fixed("a2", "Transport", Decimal::from(500)))
///     .with_deduction(AdjustmentRule::percentage("d1", "Tax", Decimal::from(10)));
///
/// let breakdown = compute_breakdown(&profile);
/// assert_eq!(breakdown.total_allowances(), Decimal::from(2500));
/// assert_eq!(breakdown.gross_salary(), Decimal::from(12500));
/// assert_eq!(breakdown.total_deductions(), Decimal::from(1250));
/// assert_eq!(breakdown.net_salary(), Decimal::from(11250));
/// ```
pub fn compute_breakdown(profile: &SalaryProfile) -> SalaryBreakdown {
    compute_breakdown_with(profile, &CalculationOptions::default())
}

/// Computes the salary breakdown for a profile with explicit options.
///
/// # Arguments
///
/// * `profile` - The base salary and adjustment rules
/// * `options` - Calculation options (deduction basis)
pub fn compute_breakdown_with(
    profile: &SalaryProfile,
    options: &CalculationOptions,
) -> SalaryBreakdown {
    let base_salary = profile.base_salary;
    let mut audit_steps = Vec::with_capacity(profile.allowances.len() + profile.deductions.len());

    let resolved_allowances =
        resolve_all(&profile.allowances, base_salary, "base", &mut audit_steps);
    let total_allowances = sum_amounts(&resolved_allowances);
    let gross_salary = base_salary.saturating_add(total_allowances);

    let deduction_basis = match options.deduction_basis {
        DeductionBasis::Gross => gross_salary,
        DeductionBasis::Base => base_salary,
    };
    let resolved_deductions = resolve_all(
        &profile.deductions,
        deduction_basis,
        options.deduction_basis.as_str(),
        &mut audit_steps,
    );
    let total_deductions = sum_amounts(&resolved_deductions);
    let net_salary = gross_salary.saturating_sub(total_deductions);

    debug!(
        base_salary = %base_salary,
        allowances = resolved_allowances.len(),
        deductions = resolved_deductions.len(),
        deduction_basis = options.deduction_basis.as_str(),
        gross_salary = %gross_salary,
        net_salary = %net_salary,
        "Computed salary breakdown"
    );

    SalaryBreakdown::new(
        base_salary,
        resolved_allowances,
        total_allowances,
        gross_salary,
        resolved_deductions,
        total_deductions,
        net_salary,
        audit_steps,
    )
}

/// Resolves every rule in order, appending one audit step per rule.
fn resolve_all(
    rules: &[AdjustmentRule],
    basis: Decimal,
    basis_label: &str,
    audit_steps: &mut Vec<AuditStep>,
) -> Vec<ResolvedAdjustment> {
    rules
        .iter()
        .map(|rule| {
            let step_number = audit_steps.len() as u32 + 1;
            let result = resolve_adjustment(rule, basis, basis_label, step_number);
            audit_steps.push(result.audit_step);
            result.resolved
        })
        .collect()
}

/// Left-to-right fold of resolved amounts.
fn sum_amounts(resolved: &[ResolvedAdjustment]) -> Decimal {
    resolved
        .iter()
        .fold(Decimal::ZERO, |total, entry| total.saturating_add(entry.amount))
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use crate::models::AdjustmentKind;
    use proptest::prelude::*;

    fn arb_rule() -> impl Strategy<Value = AdjustmentRule> {
        (
            "[a-z]{1,8}",
            0i64..=5_000_000,
            prop_oneof![Just(AdjustmentKind::Percentage), Just(AdjustmentKind::Fixed)],
        )
            .prop_map(|(id, cents, kind)| {
                AdjustmentRule::new(id.clone(), id, Decimal::new(cents, 2), kind)
            })
    }

    fn arb_profile() -> impl Strategy<Value = SalaryProfile> {
        (
            -100_000_000i64..=1_000_000_000,
            prop::collection::vec(arb_rule(), 0..12),
            prop::collection::vec(arb_rule(), 0..12),
        )
            .prop_map(|(cents, allowances, deductions)| SalaryProfile {
                base_salary: Decimal::new(cents, 2),
                allowances,
                deductions,
            })
    }

    fn arb_basis() -> impl Strategy<Value = DeductionBasis> {
        prop_oneof![Just(DeductionBasis::Gross), Just(DeductionBasis::Base)]
    }

    proptest! {
        #[test]
        fn totals_are_sums_of_resolved_amounts(
            profile in arb_profile(),
            basis in arb_basis(),
        ) {
            let options = CalculationOptions { deduction_basis: basis };
            let breakdown = compute_breakdown_with(&profile, &options);

            let allowances: Decimal =
                breakdown.resolved_allowances().iter().map(|r| r.amount).sum();
            let deductions: Decimal =
                breakdown.resolved_deductions().iter().map(|r| r.amount).sum();
            prop_assert_eq!(breakdown.total_allowances(), allowances);
            prop_assert_eq!(breakdown.total_deductions(), deductions);
        }

        #[test]
        fn gross_and_net_identities_hold(profile in arb_profile(), basis in arb_basis()) {
            let options = CalculationOptions { deduction_basis: basis };
            let breakdown = compute_breakdown_with(&profile, &options);

            prop_assert_eq!(
                breakdown.gross_salary(),
                breakdown.base_salary() + breakdown.total_allowances()
            );
            prop_assert_eq!(
                breakdown.net_salary(),
                breakdown.gross_salary() - breakdown.total_deductions()
            );
        }

        #[test]
        fn fixed_rules_resolve_to_their_value(profile in arb_profile()) {
            let breakdown = compute_breakdown(&profile);

            let entries = breakdown
                .resolved_allowances()
                .iter()
                .chain(breakdown.resolved_deductions());
            for entry in entries {
                if entry.rule.kind == AdjustmentKind::Fixed {
                    prop_assert_eq!(entry.amount, entry.rule.value);
                }
            }
        }

        #[test]
        fn percentage_allowances_scale_base(profile in arb_profile()) {
            let breakdown = compute_breakdown(&profile);

            for entry in breakdown.resolved_allowances() {
                if entry.rule.kind == AdjustmentKind::Percentage {
                    let expected = profile.base_salary * entry.rule.value / Decimal::ONE_HUNDRED;
                    prop_assert_eq!(entry.amount, expected);
                }
            }
        }

        #[test]
        fn percentage_deductions_scale_selected_basis(
            profile in arb_profile(),
            basis in arb_basis(),
        ) {
            let options = CalculationOptions { deduction_basis: basis };
            let breakdown = compute_breakdown_with(&profile, &options);

            let basis_amount = match basis {
                DeductionBasis::Gross => breakdown.gross_salary(),
                DeductionBasis::Base => breakdown.base_salary(),
            };
            for entry in breakdown.resolved_deductions() {
                if entry.rule.kind == AdjustmentKind::Percentage {
                    let expected = basis_amount * entry.rule.value / Decimal::ONE_HUNDRED;
                    prop_assert_eq!(entry.amount, expected);
                }
            }
        }

        #[test]
        fn order_and_length_are_preserved(profile in arb_profile()) {
            let breakdown = compute_breakdown(&profile);

            let allowance_rules: Vec<&AdjustmentRule> =
                breakdown.resolved_allowances().iter().map(|r| &r.rule).collect();
            let deduction_rules: Vec<&AdjustmentRule> =
                breakdown.resolved_deductions().iter().map(|r| &r.rule).collect();
            prop_assert_eq!(allowance_rules, profile.allowances.iter().collect::<Vec<_>>());
            prop_assert_eq!(deduction_rules, profile.deductions.iter().collect::<Vec<_>>());
        }

        #[test]
        fn computation_is_repeatable(profile in arb_profile()) {
            prop_assert_eq!(compute_breakdown(&profile), compute_breakdown(&profile));
        }
    }
}
