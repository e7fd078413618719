use crate::Thermodynamics::DBhandlers::data_api::DataError;
use thiserror::Error;

/// error types for species, composition, mixture and equilibrium calculations
#[derive(Debug, Error)]
pub enum GasError {
    /// unknown species or element key
    #[error("Not found: {0}")]
    NotFound(String),
    /// fractions that do not add up, negative amounts, empty or duplicated species lists
    #[error("Invalid composition: {0}")]
    InvalidComposition(String),
    /// the equilibrium linear system could not be factorized
    #[error("Singular matrix in equilibrium iteration {0}")]
    SingularMatrix(usize),
    /// a numerical input or intermediate result outside the admissible domain
    #[error("Numeric domain error: {0}")]
    NumericDomain(String),
    /// non-positive or non-finite temperature/pressure
    #[error("Invalid gas state: T = {0} K, P = {1} Pa")]
    InvalidState(f64, f64),
    #[error("Serde error: {0}")]
    Serde(serde_json::Error),
    #[error("IO error: {0}")]
    Io(std::io::Error),
    /// malformed chemical formula or data record
    #[error("Parse error: {0}")]
    Parse(String),
}

impl From<DataError> for GasError {
    fn from(err: DataError) -> Self {
        match err {
            DataError::NotFound { what, key } => GasError::NotFound(format!("{} '{}'", what, key)),
            DataError::SerdeError(e) => GasError::Serde(e),
            DataError::IoError(e) => GasError::Io(e),
            DataError::ParseError(msg) => GasError::Parse(msg),
        }
    }
}

impl From<serde_json::Error> for GasError {
    fn from(err: serde_json::Error) -> Self {
        GasError::Serde(err)
    }
}

impl From<std::io::Error> for GasError {
    fn from(err: std::io::Error) -> Self {
        GasError::Io(err)
    }
}
