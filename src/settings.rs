//! # Settings Module
//!
//! ## Purpose
//! Numerical settings of GasMix kept in one serializable place: composition tolerance,
//! reference pressure and the controls of the equilibrium iteration.
//!
//! ## Configuration Format
//! ```json
//! {
//!   "composition_tolerance": 1e-9,
//!   "reference_pressure": 100000.0,
//!   "equilibrium_max_iterations": 10,
//!   "equilibrium_tolerance": 1e-6,
//!   "mole_fraction_floor": 1e-16
//! }
//! ```
//! Missing keys take their default values.
//!
//! ## Usage Pattern
//! ```rust
//! use GasMix::settings::GasSettings;
//!
//! let settings = GasSettings::default();
//! assert_eq!(settings.equilibrium_max_iterations, 10);
//! let tight = GasSettings { equilibrium_tolerance: 1e-10, ..GasSettings::default() };
//! assert!(tight.validate().is_ok());
//! ```

use crate::Thermodynamics::constants::P_REF;
use crate::Thermodynamics::gas_errors::GasError;
use log::info;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Numerical settings for mixtures and the equilibrium solver.
///
/// # Fields
/// * `composition_tolerance` - admissible |sum of fractions - 1|
/// * `reference_pressure` - standard-state pressure of the entropy, Pa
/// * `equilibrium_max_iterations` - iteration budget of the equilibrium solver
/// * `equilibrium_tolerance` - 2-norm of the mole fraction update that counts as converged
/// * `mole_fraction_floor` - lower clamp of mole fractions inside the equilibrium iteration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GasSettings {
    pub composition_tolerance: f64,
    pub reference_pressure: f64,
    pub equilibrium_max_iterations: usize,
    pub equilibrium_tolerance: f64,
    pub mole_fraction_floor: f64,
}

impl Default for GasSettings {
    fn default() -> Self {
        Self {
            composition_tolerance: 1e-9,
            reference_pressure: P_REF,
            equilibrium_max_iterations: 10,
            equilibrium_tolerance: 1e-6,
            mole_fraction_floor: 1e-16,
        }
    }
}

impl GasSettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads settings from a JSON file and validates them.
    ///
    /// # Arguments
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    /// * `Ok(GasSettings)` - loaded settings, absent keys filled with defaults
    /// * `Err(GasError)` - I/O, JSON or validation failure
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, GasError> {
        let content = fs::read_to_string(path.as_ref())?;
        let settings: GasSettings = serde_json::from_str(&content)?;
        settings.validate()?;
        info!("settings loaded from {}", path.as_ref().display());
        Ok(settings)
    }

    /// Writes the settings to a pretty-printed JSON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), GasError> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// All tolerances, pressures and the floor must be positive and finite, at least one iteration
    pub fn validate(&self) -> Result<(), GasError> {
        let positive = [
            ("composition_tolerance", self.composition_tolerance),
            ("reference_pressure", self.reference_pressure),
            ("equilibrium_tolerance", self.equilibrium_tolerance),
            ("mole_fraction_floor", self.mole_fraction_floor),
        ];
        for (key, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(GasError::NumericDomain(format!(
                    "setting '{}' must be positive, got {}",
                    key, value
                )));
            }
        }
        if self.equilibrium_max_iterations == 0 {
            return Err(GasError::NumericDomain(
                "setting 'equilibrium_max_iterations' must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
