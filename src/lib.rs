//! Payroll Engine
//!
//! This crate computes salary breakdowns: it resolves percentage and fixed
//! allowance and deduction rules against a base salary and derives gross
//! and net salary. Around the calculator it provides normalization of
//! loosely-typed salary records, profile validation, YAML salary structure
//! configuration, and delimited-text export.

#![warn(missing_docs)]

pub mod calculation;
pub mod config;
pub mod error;
pub mod export;
pub mod models;
pub mod normalize;
pub mod validation;
