//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading payroll
//! configurations from YAML files.

use chrono::NaiveDate;
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::calculation::CalculationOptions;
use crate::error::{EngineError, EngineResult};

use super::types::{
    CurrencyConfig, PayrollConfig, PayrollMetadata, SalaryStructure, StructureConfig,
};

/// Loads and provides access to payroll configuration.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// ├── payroll.yaml          # Organisation, currency, calculation options
/// └── structures/
///     └── 2025-07-01.yaml   # Salary structures effective from this date
/// ```
///
/// # Example
///
/// ```no_run
/// use payroll_engine::config::ConfigLoader;
/// use chrono::NaiveDate;
///
/// let loader = ConfigLoader::load("./config/default")?;
/// let date = NaiveDate::from_ymd_opt(2025, 8, 1).unwrap();
/// let structure = loader.get_structure("standard", date)?;
/// println!("Structure: {}", structure.name);
/// # Ok::<(), payroll_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: PayrollConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Returns an error if a required file is missing, a file contains
    /// invalid YAML, or the structures directory holds no YAML files.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let metadata = Self::load_yaml::<PayrollMetadata>(&path.join("payroll.yaml"))?;
        let structures = Self::load_structures(&path.join("structures"))?;

        debug!(
            path = %path.display(),
            organisation = %metadata.organisation,
            structure_files = structures.len(),
            "Loaded payroll configuration"
        );

        Ok(Self {
            config: PayrollConfig::new(metadata, structures),
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Loads all structure files from the structures directory.
    fn load_structures(structures_dir: &Path) -> EngineResult<Vec<StructureConfig>> {
        let dir_str = structures_dir.display().to_string();

        let entries = fs::read_dir(structures_dir).map_err(|_| EngineError::ConfigNotFound {
            path: dir_str.clone(),
        })?;

        let mut structures = Vec::new();

        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: dir_str.clone(),
            })?;

            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "yaml") {
                structures.push(Self::load_yaml::<StructureConfig>(&path)?);
            }
        }

        if structures.is_empty() {
            return Err(EngineError::ConfigNotFound {
                path: format!("{} (no structure files found)", dir_str),
            });
        }

        Ok(structures)
    }

    /// Returns the underlying payroll configuration.
    pub fn config(&self) -> &PayrollConfig {
        &self.config
    }

    /// Returns the payroll metadata.
    pub fn metadata(&self) -> &PayrollMetadata {
        self.config.metadata()
    }

    /// Returns the currency settings.
    pub fn currency(&self) -> &CurrencyConfig {
        &self.config.metadata().currency
    }

    /// Returns the configured calculation options.
    pub fn calculation_options(&self) -> CalculationOptions {
        self.config.metadata().calculation
    }

    /// Gets a salary structure by code for a given date.
    ///
    /// The structure is taken from the most recent structure file that is
    /// effective on or before the date.
    pub fn get_structure(&self, code: &str, date: NaiveDate) -> EngineResult<&SalaryStructure> {
        let not_found = || EngineError::StructureNotFound {
            code: code.to_string(),
            date,
        };

        let structure_config = self
            .config
            .structures()
            .iter()
            .rev()
            .find(|sc| sc.effective_date <= date)
            .ok_or_else(not_found)?;

        structure_config.structures.get(code).ok_or_else(not_found)
    }
}
