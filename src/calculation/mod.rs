//! Calculation logic for the Payroll Engine.
//!
//! This module contains the salary breakdown calculator: resolution of
//! percentage and fixed adjustment rules, aggregation of allowance and
//! deduction totals, and derivation of gross and net salary.

mod adjustment;
mod breakdown;
mod options;

pub use adjustment::{AdjustmentResolution, percentage_of, resolve_adjustment};
pub use breakdown::{compute_breakdown, compute_breakdown_with};
pub use options::{CalculationOptions, DeductionBasis};
