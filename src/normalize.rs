//! Normalization of fetched salary records.
//!
//! Salary records arrive from the HR service as loosely-typed JSON: field
//! names vary (`basicSalary` vs `basic_salary`), numbers may be strings,
//! and adjustments come either as an array of rules or as an object map of
//! toggle flags. This module is the single place where that shape is
//! turned into a typed [`SalaryProfile`]. Missing or unusable numbers
//! default to zero; nothing past this boundary sees untyped data.

use rust_decimal::Decimal;
use serde_json::{Map, Value};
use std::str::FromStr;
use tracing::warn;

use crate::config::{SalaryStructure, rule_matches_key};
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AdjustmentKind, AdjustmentRule, EmployeeSalary, SalaryProfile, amount_from_f64,
};

const BASE_SALARY_KEYS: &[&str] = &[
    "basicSalary",
    "basic_salary",
    "baseSalary",
    "base_salary",
    "salary",
];
const EMPLOYEE_ID_KEYS: &[&str] = &["employeeId", "employee_id", "empId", "id", "_id"];
const EMPLOYEE_NAME_KEYS: &[&str] = &[
    "employeeName",
    "employee_name",
    "fullName",
    "full_name",
    "name",
];
const RULE_ID_KEYS: &[&str] = &["id", "_id"];
const RULE_NAME_KEYS: &[&str] = &["name", "title", "label"];
const RULE_VALUE_KEYS: &[&str] = &["value", "amount", "percentage"];
const RULE_KIND_KEYS: &[&str] = &["type", "kind", "valueType", "value_type"];

/// Which adjustment list of a record is being read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RuleList {
    Allowances,
    Deductions,
}

impl RuleList {
    fn field(self) -> &'static str {
        match self {
            RuleList::Allowances => "allowances",
            RuleList::Deductions => "deductions",
        }
    }

    fn id_prefix(self) -> &'static str {
        match self {
            RuleList::Allowances => "allowance",
            RuleList::Deductions => "deduction",
        }
    }

    fn catalogue_rules(self, catalogue: &SalaryStructure) -> &[AdjustmentRule] {
        match self {
            RuleList::Allowances => &catalogue.allowances,
            RuleList::Deductions => &catalogue.deductions,
        }
    }

    fn find(self, catalogue: &SalaryStructure, key: &str) -> Option<AdjustmentRule> {
        match self {
            RuleList::Allowances => catalogue.find_allowance(key).cloned(),
            RuleList::Deductions => catalogue.find_deduction(key).cloned(),
        }
    }
}

/// Maps a fetched salary record into a [`SalaryProfile`].
///
/// # Arguments
///
/// * `record` - The record as fetched (must be a JSON object)
/// * `catalogue` - The salary structure used to resolve toggle-style
///   adjustments; toggles are dropped when `None`
///
/// # Errors
///
/// Returns [`EngineError::InvalidSalaryRecord`] if the record is not a JSON
/// object. Every other irregularity is repaired with a default.
///
/// # Examples
///
/// ```
/// use payroll_engine::normalize::normalize_salary_record;
/// use rust_decimal::Decimal;
/// use serde_json::json;
///
/// let record = json!({
///     "basicSalary": "10000",
///     "allowances": [{ "id": "a1", "name": "HRA", "value": 20, "type": "percentage" }],
///     "deductions": []
/// });
///
/// let profile = normalize_salary_record(&record, None)?;
/// assert_eq!(profile.base_salary, Decimal::from(10000));
/// assert_eq!(profile.allowances.len(), 1);
/// # Ok::<(), payroll_engine::error::EngineError>(())
/// ```
pub fn normalize_salary_record(
    record: &Value,
    catalogue: Option<&SalaryStructure>,
) -> EngineResult<SalaryProfile> {
    let object = record
        .as_object()
        .ok_or_else(|| EngineError::InvalidSalaryRecord {
            message: format!("expected a JSON object, found {}", json_type_name(record)),
        })?;

    Ok(SalaryProfile {
        base_salary: read_amount(first_present(object, BASE_SALARY_KEYS), "base_salary"),
        allowances: read_rules(object.get("allowances"), RuleList::Allowances, catalogue),
        deductions: read_rules(object.get("deductions"), RuleList::Deductions, catalogue),
    })
}

/// Maps a fetched employee salary record into an [`EmployeeSalary`].
///
/// The employee id is required; the name falls back to `firstName` plus
/// `lastName` and finally to the id.
pub fn normalize_employee_record(
    record: &Value,
    catalogue: Option<&SalaryStructure>,
) -> EngineResult<EmployeeSalary> {
    let profile = normalize_salary_record(record, catalogue)?;
    let object = record
        .as_object()
        .ok_or_else(|| EngineError::InvalidSalaryRecord {
            message: "expected a JSON object".to_string(),
        })?;

    let employee_id = first_present(object, EMPLOYEE_ID_KEYS)
        .and_then(read_text)
        .ok_or_else(|| EngineError::InvalidSalaryRecord {
            message: "missing employee id".to_string(),
        })?;

    let employee_name = first_present(object, EMPLOYEE_NAME_KEYS)
        .and_then(read_text)
        .or_else(|| joined_name(object))
        .unwrap_or_else(|| employee_id.clone());

    Ok(EmployeeSalary {
        employee_id,
        employee_name,
        profile,
    })
}

/// Returns the first key's value that is present and not null.
fn first_present<'a>(object: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    first_present_entry(object, keys).map(|(_, value)| value)
}

/// Like [`first_present`], also returning the key that supplied the value.
fn first_present_entry<'a, 'k>(
    object: &'a Map<String, Value>,
    keys: &[&'k str],
) -> Option<(&'k str, &'a Value)> {
    keys.iter()
        .filter_map(|key| object.get(*key).map(|value| (*key, value)))
        .find(|(_, value)| !value.is_null())
}

fn read_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn joined_name(object: &Map<String, Value>) -> Option<String> {
    let parts: Vec<String> = ["firstName", "lastName"]
        .iter()
        .filter_map(|key| object.get(*key).and_then(read_text))
        .collect();
    (!parts.is_empty()).then(|| parts.join(" "))
}

/// Reads a numeric field, defaulting to zero when missing or unusable.
fn read_amount(value: Option<&Value>, field: &str) -> Decimal {
    let Some(value) = value else {
        return Decimal::ZERO;
    };

    let amount = match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Some(Decimal::from(i))
            } else if let Some(u) = n.as_u64() {
                Some(Decimal::from(u))
            } else {
                n.as_f64().and_then(amount_from_f64)
            }
        }
        Value::String(s) => parse_amount(s),
        _ => None,
    };

    amount.unwrap_or_else(|| {
        warn!(field, value = %value, "Unusable numeric value replaced with zero");
        Decimal::ZERO
    })
}

/// Parses a numeric string such as `"1,200.50"`, `" 300 "` or `"1e3"`.
fn parse_amount(raw: &str) -> Option<Decimal> {
    let cleaned: String = raw.trim().chars().filter(|c| *c != ',').collect();
    if cleaned.is_empty() {
        return None;
    }
    Decimal::from_str(&cleaned)
        .ok()
        .or_else(|| cleaned.parse::<f64>().ok().and_then(amount_from_f64))
}

fn parse_kind(raw: &str) -> Option<AdjustmentKind> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "percentage" | "percent" | "%" | "pct" => Some(AdjustmentKind::Percentage),
        "fixed" | "amount" | "flat" => Some(AdjustmentKind::Fixed),
        _ => None,
    }
}

fn read_rules(
    value: Option<&Value>,
    list: RuleList,
    catalogue: Option<&SalaryStructure>,
) -> Vec<AdjustmentRule> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .enumerate()
            .filter_map(|(index, item)| read_rule_item(item, index, list, catalogue))
            .collect(),
        Some(Value::Object(toggles)) => read_toggles(toggles, list, catalogue),
        Some(Value::Null) | None => Vec::new(),
        Some(other) => {
            warn!(
                field = list.field(),
                found = json_type_name(other),
                "Unsupported adjustment list shape ignored"
            );
            Vec::new()
        }
    }
}

fn read_rule_item(
    item: &Value,
    index: usize,
    list: RuleList,
    catalogue: Option<&SalaryStructure>,
) -> Option<AdjustmentRule> {
    match item {
        Value::Object(object) => Some(read_rule_object(object, index, list)),
        Value::String(key) => {
            let rule = catalogue.and_then(|c| list.find(c, key));
            if rule.is_none() {
                warn!(field = list.field(), key = %key, "Unknown adjustment key ignored");
            }
            rule
        }
        other => {
            warn!(
                field = list.field(),
                index,
                found = json_type_name(other),
                "Unsupported adjustment entry ignored"
            );
            None
        }
    }
}

fn read_rule_object(object: &Map<String, Value>, index: usize, list: RuleList) -> AdjustmentRule {
    let id = first_present(object, RULE_ID_KEYS)
        .and_then(read_text)
        .unwrap_or_else(|| format!("{}_{}", list.id_prefix(), index + 1));
    let name = first_present(object, RULE_NAME_KEYS)
        .and_then(read_text)
        .unwrap_or_else(|| id.clone());

    let explicit_kind = first_present(object, RULE_KIND_KEYS)
        .and_then(Value::as_str)
        .and_then(parse_kind);
    let value_entry = first_present_entry(object, RULE_VALUE_KEYS);
    // Without an explicit kind, a value supplied under `percentage` is a percentage.
    let kind = explicit_kind.unwrap_or(match value_entry {
        Some(("percentage", _)) => AdjustmentKind::Percentage,
        _ => AdjustmentKind::Fixed,
    });

    let mut value = read_amount(value_entry.map(|(_, value)| value), "value");
    if value.is_sign_negative() && !value.is_zero() {
        warn!(
            field = list.field(),
            rule_id = %id,
            value = %value,
            "Negative rule value clamped to zero"
        );
        value = Decimal::ZERO;
    }

    AdjustmentRule::new(id, name, value, kind)
}

fn read_toggles(
    toggles: &Map<String, Value>,
    list: RuleList,
    catalogue: Option<&SalaryStructure>,
) -> Vec<AdjustmentRule> {
    let enabled: Vec<&str> = toggles
        .iter()
        .filter(|(_, flag)| is_enabled(flag))
        .map(|(key, _)| key.as_str())
        .collect();

    let Some(catalogue) = catalogue else {
        if !enabled.is_empty() {
            warn!(
                field = list.field(),
                enabled = enabled.len(),
                "Toggle-style adjustments need a salary structure; none applied"
            );
        }
        return Vec::new();
    };

    for key in &enabled {
        let known = list
            .catalogue_rules(catalogue)
            .iter()
            .any(|rule| rule_matches_key(rule, key));
        if !known {
            warn!(field = list.field(), key = %key, "Unknown adjustment key ignored");
        }
    }

    list.catalogue_rules(catalogue)
        .iter()
        .filter(|rule| enabled.iter().any(|key| rule_matches_key(rule, key)))
        .cloned()
        .collect()
}

fn is_enabled(flag: &Value) -> bool {
    match flag {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|v| v != 0.0),
        Value::String(s) => matches!(s.trim().to_ascii_lowercase().as_str(), "true" | "yes" | "on"),
        _ => false,
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
