//! Salary breakdown models for the Payroll Engine.
//!
//! This module contains the [`SalaryBreakdown`] type produced by a
//! calculation, together with the resolved adjustment entries and the audit
//! steps recording how each amount was reached.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::AdjustmentRule;

/// An adjustment rule paired with the amount it resolved to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedAdjustment {
    /// The rule as supplied in the profile.
    pub rule: AdjustmentRule,
    /// The resolved currency amount.
    pub amount: Decimal,
}

/// A single step in the audit trail recording one rule resolution.
///
/// Each step captures the input, output, and reasoning for a rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The identifier of the rule that was resolved.
    pub rule_id: String,
    /// The display name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// The headline figures of a breakdown, as consumed by export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakdownSummary {
    /// The base salary.
    pub base_salary: Decimal,
    /// Sum of all allowance amounts.
    pub total_allowances: Decimal,
    /// Sum of all deduction amounts.
    pub total_deductions: Decimal,
    /// Base salary plus total allowances.
    pub gross_salary: Decimal,
    /// Gross salary minus total deductions.
    pub net_salary: Decimal,
}

/// The computed result of one salary calculation.
///
/// A breakdown is immutable: its fields can only be read through accessors,
/// and it is only ever built by [`crate::calculation::compute_breakdown`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SalaryBreakdown {
    base_salary: Decimal,
    resolved_allowances: Vec<ResolvedAdjustment>,
    total_allowances: Decimal,
    gross_salary: Decimal,
    resolved_deductions: Vec<ResolvedAdjustment>,
    total_deductions: Decimal,
    net_salary: Decimal,
    audit_steps: Vec<AuditStep>,
}

impl SalaryBreakdown {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        base_salary: Decimal,
        resolved_allowances: Vec<ResolvedAdjustment>,
        total_allowances: Decimal,
        gross_salary: Decimal,
        resolved_deductions: Vec<ResolvedAdjustment>,
        total_deductions: Decimal,
        net_salary: Decimal,
        audit_steps: Vec<AuditStep>,
    ) -> Self {
        Self {
            base_salary,
            resolved_allowances,
            total_allowances,
            gross_salary,
            resolved_deductions,
            total_deductions,
            net_salary,
            audit_steps,
        }
    }

    /// Returns the base salary copied from the profile.
    pub fn base_salary(&self) -> Decimal {
        self.base_salary
    }

    /// Returns the resolved allowances, in profile order.
    pub fn resolved_allowances(&self) -> &[ResolvedAdjustment] {
        &self.resolved_allowances
    }

    /// Returns the sum of all allowance amounts.
    pub fn total_allowances(&self) -> Decimal {
        self.total_allowances
    }

    /// Returns base salary plus total allowances.
    pub fn gross_salary(&self) -> Decimal {
        self.gross_salary
    }

    /// Returns the resolved deductions, in profile order.
    pub fn resolved_deductions(&self) -> &[ResolvedAdjustment] {
        &self.resolved_deductions
    }

    /// Returns the sum of all deduction amounts.
    pub fn total_deductions(&self) -> Decimal {
        self.total_deductions
    }

    /// Returns gross salary minus total deductions.
    pub fn net_salary(&self) -> Decimal {
        self.net_salary
    }

    /// Returns the audit steps, allowances first and then deductions.
    pub fn audit_steps(&self) -> &[AuditStep] {
        &self.audit_steps
    }

    /// Returns the headline figures of this breakdown.
    pub fn summary(&self) -> BreakdownSummary {
        BreakdownSummary {
            base_salary: self.base_salary,
            total_allowances: self.total_allowances,
            total_deductions: self.total_deductions,
            gross_salary: self.gross_salary,
            net_salary: self.net_salary,
        }
    }
}
