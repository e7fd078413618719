//! Contracts of the data sources the property engine is built on: NASA-7 thermodynamic
//! coefficients, Lennard-Jones transport parameters, element stoichiometry and the
//! reduced collision integrals. `GasDatabase` implements the first three from JSON,
//! `NeufeldCollisionIntegrals` implements the last one.
use crate::Thermodynamics::DBhandlers::NASAdata::NASAcoeffs;
use crate::Thermodynamics::DBhandlers::TRANSPORTdata::TransportInput;
use std::fmt;
use thiserror::Error;

/// ordered element symbol -> number of atoms, in order of first appearance in the formula
pub type ElementComposition = Vec<(String, usize)>;

/// error types of the data handlers
#[derive(Debug, Error)]
pub enum DataError {
    #[error("{what} '{key}' not found")]
    NotFound { what: &'static str, key: String },
    #[error("Failed to deserialize gas data: {0}")]
    SerdeError(#[from] serde_json::Error),
    #[error("Failed to read gas data: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    ParseError(String),
}

impl DataError {
    pub fn species_not_found(name: &str) -> Self {
        DataError::NotFound {
            what: "species",
            key: name.to_string(),
        }
    }
}

pub trait ThermoCoefficientProvider {
    /// low- and high-temperature NASA-7 coefficient sets of a species
    fn thermo_coefficients(&self, name: &str) -> Result<NASAcoeffs, DataError>;
}

pub trait TransportCoefficientProvider {
    /// geometry, Lennard-Jones parameters, dipole, polarizability, Zrot(298) and molar mass
    fn transport_parameters(&self, name: &str) -> Result<TransportInput, DataError>;
}

pub trait StoichiometryProvider {
    fn element_composition(&self, name: &str) -> Result<ElementComposition, DataError>;
}

/// reduced collision integrals as functions of reduced temperature T* = T/(eps/k)
/// and reduced dipole parameter delta*
pub trait CollisionIntegralProvider: fmt::Debug {
    fn omega11(&self, t_star: f64, delta_star: f64) -> f64;
    fn omega22(&self, t_star: f64, delta_star: f64) -> f64;
}

/// everything needed to build species and mixtures by name
pub trait GasLibrary:
    ThermoCoefficientProvider + TransportCoefficientProvider + StoichiometryProvider
{
}

impl<T> GasLibrary for T where
    T: ThermoCoefficientProvider + TransportCoefficientProvider + StoichiometryProvider + ?Sized
{
}
