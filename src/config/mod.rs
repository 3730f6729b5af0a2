//! Configuration loading and management for the Payroll Engine.
//!
//! This module provides functionality to load payroll configurations from
//! YAML files, including currency settings, calculation options, and
//! effective-dated salary structures.
//!
//! # Example
//!
//! ```no_run
//! use payroll_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Loaded payroll config for: {}", config.metadata().organisation);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    CurrencyConfig, PayrollConfig, PayrollMetadata, SalaryStructure, StructureConfig,
    rule_matches_key,
};
