//! # NASA-7 Thermodynamic Data Handler
//!
//! Two sets of 7 dimensionless coefficients per species, the low-temperature set is used
//! below 1000 K and the high-temperature set at and above 1000 K:
//! - Cp/R  = a1 + a2 T + a3 T^2 + a4 T^3 + a5 T^4
//! - H/RT  = a1 + a2 T/2 + a3 T^2/3 + a4 T^3/4 + a5 T^4/5 + a6/T
//! - S°/R  = a1 ln T + a2 T + a3 T^2/2 + a4 T^3/3 + a5 T^4/4 + a7
//!
//! Results are in J/kmol/K and J/kmol.
#![allow(non_snake_case)]
use crate::Thermodynamics::constants::{R, T_SWITCH};
use serde::{Deserialize, Serialize};

pub type Coeffs = [f64; 7];

/// heat capacity at constant pressure, J/kmol/K
pub fn Cp(t: f64, a: &Coeffs) -> f64 {
    R * (a[0] + a[1] * t + a[2] * t.powi(2) + a[3] * t.powi(3) + a[4] * t.powi(4))
}
/// enthalpy, J/kmol
pub fn dh(t: f64, a: &Coeffs) -> f64 {
    R * t
        * (a[0]
            + a[1] * t / 2.0
            + a[2] * t.powi(2) / 3.0
            + a[3] * t.powi(3) / 4.0
            + a[4] * t.powi(4) / 5.0
            + a[5] / t)
}
/// standard-state entropy at the reference pressure, J/kmol/K
pub fn ds(t: f64, a: &Coeffs) -> f64 {
    R * (a[0] * t.ln()
        + a[1] * t
        + a[2] * t.powi(2) / 2.0
        + a[3] * t.powi(3) / 3.0
        + a[4] * t.powi(4) / 4.0
        + a[6])
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct NASAcoeffs {
    /// coefficients valid below 1000 K
    pub low: Coeffs,
    /// coefficients valid at and above 1000 K
    pub high: Coeffs,
}

impl NASAcoeffs {
    pub fn new(low: Coeffs, high: Coeffs) -> Self {
        Self { low, high }
    }
    /// hard switch at exactly 1000 K
    pub fn coefficients_at(&self, t: f64) -> &Coeffs {
        if t < T_SWITCH { &self.low } else { &self.high }
    }
    pub fn Cp(&self, t: f64) -> f64 {
        Cp(t, self.coefficients_at(t))
    }
    pub fn dh(&self, t: f64) -> f64 {
        dh(t, self.coefficients_at(t))
    }
    pub fn ds(&self, t: f64) -> f64 {
        ds(t, self.coefficients_at(t))
    }
}
