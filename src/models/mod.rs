//! Core data models for the Payroll Engine.
//!
//! This module contains the domain models used throughout the engine:
//! adjustment rules, the salary profile fed into a calculation, and the
//! breakdown produced by it.

mod adjustment;
mod breakdown;
mod salary_profile;

pub use adjustment::{AdjustmentKind, AdjustmentRule, amount_from_f64};
pub use breakdown::{AuditStep, BreakdownSummary, ResolvedAdjustment, SalaryBreakdown};
pub use salary_profile::{EmployeeSalary, SalaryProfile};
