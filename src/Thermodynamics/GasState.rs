use crate::Thermodynamics::gas_errors::GasError;
use serde::{Deserialize, Serialize};

/// Temperature (K) and pressure (Pa) of a gas. Immutable: a new state is created
/// for every change and handed to species or mixtures through their `update_gas_state`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawGasState")]
pub struct GasState {
    T: f64,
    P: f64,
}

#[derive(Deserialize)]
struct RawGasState {
    T: f64,
    P: f64,
}

impl TryFrom<RawGasState> for GasState {
    type Error = GasError;

    fn try_from(raw: RawGasState) -> Result<Self, Self::Error> {
        GasState::new(raw.T, raw.P)
    }
}

impl GasState {
    /// both values must be finite and strictly positive
    pub fn new(T: f64, P: f64) -> Result<Self, GasError> {
        if !(T.is_finite() && P.is_finite() && T > 0.0 && P > 0.0) {
            return Err(GasError::InvalidState(T, P));
        }
        Ok(Self { T, P })
    }

    pub fn temperature(&self) -> f64 {
        self.T
    }

    pub fn pressure(&self) -> f64 {
        self.P
    }

    pub fn with_temperature(&self, T: f64) -> Result<Self, GasError> {
        Self::new(T, self.P)
    }

    pub fn with_pressure(&self, P: f64) -> Result<Self, GasError> {
        Self::new(self.T, P)
    }
}
