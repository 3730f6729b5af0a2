//! Export of salary breakdowns as delimited text.
//!
//! An [`ExportRow`] carries the headline figures of one employee's
//! breakdown, rounded to the configured currency precision. A
//! [`PayrollRun`] groups the rows for a pay month into one downloadable
//! file.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::calculation::{CalculationOptions, compute_breakdown_with};
use crate::config::CurrencyConfig;
use crate::models::{EmployeeSalary, SalaryBreakdown};

/// Column names, in output order.
pub const EXPORT_COLUMNS: [&str; 7] = [
    "employee_id",
    "employee_name",
    "base_salary",
    "total_allowances",
    "total_deductions",
    "gross_salary",
    "net_salary",
];

/// Rounds an amount to `decimal_places`, midpoint away from zero, and
/// fixes its scale so it always prints with that many places.
///
/// # Examples
///
/// ```
/// use payroll_engine::export::round_amount;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let rounded = round_amount(Decimal::from_str("1234.565").unwrap(), 2);
/// assert_eq!(rounded.to_string(), "1234.57");
/// assert_eq!(round_amount(Decimal::from(2000), 2).to_string(), "2000.00");
/// ```
pub fn round_amount(amount: Decimal, decimal_places: u32) -> Decimal {
    let mut rounded =
        amount.round_dp_with_strategy(decimal_places, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(decimal_places);
    rounded
}

/// One employee's line in a payroll export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportRow {
    /// The employee identifier.
    pub employee_id: String,
    /// The employee display name.
    pub employee_name: String,
    /// The base salary.
    pub base_salary: Decimal,
    /// Sum of all allowances.
    pub total_allowances: Decimal,
    /// Sum of all deductions.
    pub total_deductions: Decimal,
    /// Base salary plus allowances.
    pub gross_salary: Decimal,
    /// Gross salary minus deductions.
    pub net_salary: Decimal,
}

impl ExportRow {
    /// Builds a row from a breakdown, rounding every amount.
    pub fn from_breakdown(
        employee_id: impl Into<String>,
        employee_name: impl Into<String>,
        breakdown: &SalaryBreakdown,
        decimal_places: u32,
    ) -> Self {
        let summary = breakdown.summary();
        Self {
            employee_id: employee_id.into(),
            employee_name: employee_name.into(),
            base_salary: round_amount(summary.base_salary, decimal_places),
            total_allowances: round_amount(summary.total_allowances, decimal_places),
            total_deductions: round_amount(summary.total_deductions, decimal_places),
            gross_salary: round_amount(summary.gross_salary, decimal_places),
            net_salary: round_amount(summary.net_salary, decimal_places),
        }
    }

    /// Returns the header line for the given delimiter.
    pub fn header(delimiter: char) -> String {
        EXPORT_COLUMNS.join(delimiter.to_string().as_str())
    }

    /// Returns this row as one line of delimited text.
    pub fn to_delimited(&self, delimiter: char) -> String {
        let separator = delimiter.to_string();
        [
            escape_field(&self.employee_id, delimiter),
            escape_field(&self.employee_name, delimiter),
            self.base_salary.to_string(),
            self.total_allowances.to_string(),
            self.total_deductions.to_string(),
            self.gross_salary.to_string(),
            self.net_salary.to_string(),
        ]
        .join(separator.as_str())
    }
}

/// Quotes a field when it contains the delimiter, a quote, or a line break.
fn escape_field(field: &str, delimiter: char) -> String {
    let needs_quotes = field
        .chars()
        .any(|c| c == delimiter || c == '"' || c == '\n' || c == '\r');
    if needs_quotes {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// A payroll export for one pay month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PayrollRun {
    /// Unique identifier for this run.
    pub run_id: Uuid,
    /// When the run was generated.
    pub generated_at: DateTime<Utc>,
    /// The first day of the pay month.
    pub period: NaiveDate,
    /// The currency code amounts are expressed in.
    pub currency: String,
    /// One row per employee, in input order.
    pub rows: Vec<ExportRow>,
}

impl PayrollRun {
    /// Computes breakdowns for every employee and collects the export rows.
    ///
    /// `period` may be any day of the pay month.
    pub fn generate(
        period: NaiveDate,
        employees: &[EmployeeSalary],
        options: &CalculationOptions,
        currency: &CurrencyConfig,
    ) -> Self {
        let rows: Vec<ExportRow> = employees
            .iter()
            .map(|employee| {
                let breakdown = compute_breakdown_with(&employee.profile, options);
                ExportRow::from_breakdown(
                    employee.employee_id.clone(),
                    employee.employee_name.clone(),
                    &breakdown,
                    currency.decimal_places,
                )
            })
            .collect();

        let run = Self {
            run_id: Uuid::new_v4(),
            generated_at: Utc::now(),
            period: period.with_day(1).unwrap_or(period),
            currency: currency.code.clone(),
            rows,
        };

        info!(
            run_id = %run.run_id,
            period = %run.period,
            employees = run.rows.len(),
            total_net = %run.total_net_salary(),
            "Generated payroll run"
        );

        run
    }

    /// Returns the sum of net salary across all rows.
    pub fn total_net_salary(&self) -> Decimal {
        self.rows.iter().map(|row| row.net_salary).sum()
    }

    /// Returns the suggested download file name (e.g., `payroll_2025-07.csv`).
    pub fn file_name(&self) -> String {
        format!("payroll_{}.csv", self.period.format("%Y-%m"))
    }

    /// Returns the header line followed by one line per row.
    pub fn to_delimited(&self, delimiter: char) -> String {
        let mut output = ExportRow::header(delimiter);
        output.push('\n');
        for row in &self.rows {
            output.push_str(&row.to_delimited(delimiter));
            output.push('\n');
        }
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::compute_breakdown;
    use crate::models::{AdjustmentRule, SalaryProfile};
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn currency() -> CurrencyConfig {
        CurrencyConfig {
            code: "INR".to_string(),
            decimal_places: 2,
        }
    }

    fn create_profile() -> SalaryProfile {
        SalaryProfile::new(dec("10000"))
            .with_allowance(AdjustmentRule::percentage("a1", "HRA", dec("20")))
            .with_allowance(AdjustmentRule::fixed("a2", "Transport", dec("500")))
            .with_deduction(AdjustmentRule::percentage("d1", "Tax", dec("10")))
    }

    fn create_employee(id: &str, name: &str, profile: SalaryProfile) -> EmployeeSalary {
        EmployeeSalary {
            employee_id: id.to_string(),
            employee_name: name.to_string(),
            profile,
        }
    }

    #[test]
    fn test_round_amount_midpoint_away_from_zero() {
        assert_eq!(round_amount(dec("0.005"), 2), dec("0.01"));
        assert_eq!(round_amount(dec("-0.005"), 2), dec("-0.01"));
        assert_eq!(round_amount(dec("1.004"), 2), dec("1.00"));
        assert_eq!(round_amount(dec("7"), 0).to_string(), "7");
    }

    #[test]
    fn test_row_from_breakdown() {
        let breakdown = compute_breakdown(&create_profile());
        let row = ExportRow::from_breakdown("EMP-1", "Asha Rao", &breakdown, 2);

        assert_eq!(row.base_salary.to_string(), "10000.00");
        assert_eq!(row.total_allowances.to_string(), "2500.00");
        assert_eq!(row.total_deductions.to_string(), "1250.00");
        assert_eq!(row.gross_salary.to_string(), "12500.00");
        assert_eq!(row.net_salary.to_string(), "11250.00");
    }

    #[test]
    fn test_row_rounds_fractional_amounts() {
        let profile = SalaryProfile::new(dec("3333.33"))
            .with_deduction(AdjustmentRule::percentage("d1", "Tax", dec("7.5")));
        let breakdown = compute_breakdown(&profile);
        let row = ExportRow::from_breakdown("EMP-2", "Ravi", &breakdown, 2);

        // 3333.33 * 7.5% = 249.99975
        assert_eq!(row.total_deductions.to_string(), "250.00");
        assert_eq!(row.net_salary.to_string(), "3083.33");
    }

    #[test]
    fn test_header_and_row_lines() {
        let breakdown = compute_breakdown(&create_profile());
        let row = ExportRow::from_breakdown("EMP-1", "Rao, Asha", &breakdown, 2);

        assert_eq!(
            ExportRow::header(','),
            "employee_id,employee_name,base_salary,total_allowances,total_deductions,gross_salary,net_salary"
        );
        assert_eq!(
            row.to_delimited(','),
            "EMP-1,\"Rao, Asha\",10000.00,2500.00,1250.00,12500.00,11250.00"
        );
        assert_eq!(
            row.to_delimited(';'),
            "EMP-1;Rao, Asha;10000.00;2500.00;1250.00;12500.00;11250.00"
        );
    }

    #[test]
    fn test_quotes_are_doubled() {
        assert_eq!(escape_field("Ann \"AJ\" Lee", ','), "\"Ann \"\"AJ\"\" Lee\"");
        assert_eq!(escape_field("plain", ','), "plain");
    }

    #[test]
    fn test_payroll_run_collects_rows_in_order() {
        let employees = vec![
            create_employee("EMP-1", "Asha", create_profile()),
            create_employee("EMP-2", "Ravi", SalaryProfile::new(dec("5000"))),
        ];

        let run = PayrollRun::generate(
            NaiveDate::from_ymd_opt(2025, 7, 19).unwrap(),
            &employees,
            &CalculationOptions::default(),
            &currency(),
        );

        assert_eq!(run.period, NaiveDate::from_ymd_opt(2025, 7, 1).unwrap());
        assert_eq!(run.currency, "INR");
        assert_eq!(run.rows.len(), 2);
        assert_eq!(run.rows[0].employee_id, "EMP-1");
        assert_eq!(run.rows[1].net_salary, dec("5000"));
        assert_eq!(run.total_net_salary(), dec("16250"));
        assert_eq!(run.file_name(), "payroll_2025-07.csv");
    }

    #[test]
    fn test_payroll_run_to_delimited() {
        let employees = vec![create_employee("EMP-1", "Asha", create_profile())];
        let run = PayrollRun::generate(
            NaiveDate::from_ymd_opt(2025, 7, 1).unwrap(),
            &employees,
            &CalculationOptions::default(),
            &currency(),
        );

        let text = run.to_delimited(',');
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("employee_id,"));
        assert_eq!(lines[1], "EMP-1,Asha,10000.00,2500.00,1250.00,12500.00,11250.00");
    }

    #[test]
    fn test_empty_run_has_header_only() {
        let run = PayrollRun::generate(
            NaiveDate::from_ymd_opt(2025, 7, 1).unwrap(),
            &[],
            &CalculationOptions::default(),
            &currency(),
        );

        assert_eq!(run.to_delimited(',').lines().count(), 1);
        assert_eq!(run.total_net_salary(), Decimal::ZERO);
    }

    #[test]
    fn test_payroll_run_serializes_to_json() {
        let employees = vec![create_employee("EMP-1", "Asha", create_profile())];
        let run = PayrollRun::generate(
            NaiveDate::from_ymd_opt(2025, 7, 1).unwrap(),
            &employees,
            &CalculationOptions::default(),
            &currency(),
        );

        let json = serde_json::to_value(&run).unwrap();
        assert_eq!(json["period"], "2025-07-01");
        assert_eq!(json["rows"][0]["net_salary"], "11250.00");
        assert!(json["run_id"].is_string());
    }
}
