//! # Gas Database Module
//!
//! ## Purpose
//! JSON-backed library of gas species: NASA-7 coefficients, Lennard-Jones transport
//! parameters, chemical formula and a human readable name per species key.
//! A built-in library of common combustion gases is embedded in the binary.
//!
//! ## Record Format
//! ```json
//! {
//!   "H2": {
//!     "formula": "H2",
//!     "chemical_name": "Hydrogen",
//!     "thermo": { "low": [7 numbers], "high": [7 numbers] },
//!     "transport": { "geometry": "linear", "well_depth": 38.0, "diam": 2.92,
//!                    "dipole": 0.0, "polar": 0.79, "rot_relax": 280.0, "molar_mass": 2.01588 }
//!   }
//! }
//! ```
//!
//! ## Usage
//! ```rust
//! use GasMix::Thermodynamics::DBhandlers::gas_database::GasDatabase;
//! use GasMix::Thermodynamics::DBhandlers::data_api::StoichiometryProvider;
//!
//! let db = GasDatabase::builtin().unwrap();
//! assert!(db.available_species().contains(&"CO2".to_string()));
//! let composition = db.element_composition("CO2").unwrap();
//! assert_eq!(composition, vec![("C".to_string(), 1), ("O".to_string(), 2)]);
//! ```
use crate::Thermodynamics::DBhandlers::NASAdata::NASAcoeffs;
use crate::Thermodynamics::DBhandlers::TRANSPORTdata::TransportInput;
use crate::Thermodynamics::DBhandlers::data_api::{
    DataError, ElementComposition, StoichiometryProvider, ThermoCoefficientProvider,
    TransportCoefficientProvider,
};
use crate::Thermodynamics::DBhandlers::molmass::parse_formula;
use log::info;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

const BUILTIN_GAS_BASE: &str = include_str!("gas_base.json");

/// one species entry of the library
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GasRecord {
    pub formula: String,
    pub chemical_name: String,
    pub thermo: NASAcoeffs,
    pub transport: TransportInput,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GasDatabase {
    records: BTreeMap<String, GasRecord>,
}

impl GasDatabase {
    /// Empty library, fill it with `insert`
    pub fn new() -> Self {
        Self::default()
    }

    /// Library of common combustion gases shipped with the crate
    /// (H2, O2, N2, CO, CO2, H2O, AR, HE, H, O, OH, CH4, NO)
    pub fn builtin() -> Result<Self, DataError> {
        Self::from_json_str(BUILTIN_GAS_BASE)
    }

    /// Parses a library from a JSON string. Every formula is validated by the parser.
    ///
    /// # Arguments
    /// * `json` - JSON object keyed by species name
    ///
    /// # Returns
    /// * `Ok(GasDatabase)` - parsed library
    /// * `Err(DataError)` - malformed JSON or a formula that can not be parsed
    pub fn from_json_str(json: &str) -> Result<Self, DataError> {
        let db: GasDatabase = serde_json::from_str(json)?;
        for record in db.records.values() {
            parse_formula(&record.formula)?;
        }
        Ok(db)
    }

    /// Reads a library from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, DataError> {
        let content = fs::read_to_string(path.as_ref())?;
        let db = Self::from_json_str(&content)?;
        info!(
            "loaded {} gas species from {}",
            db.records.len(),
            path.as_ref().display()
        );
        Ok(db)
    }

    /// Writes the library to a pretty-printed JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), DataError> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Adds or replaces a species record, returns the previous record if there was one
    pub fn insert(
        &mut self,
        name: &str,
        record: GasRecord,
    ) -> Result<Option<GasRecord>, DataError> {
        parse_formula(&record.formula)?;
        Ok(self.records.insert(name.to_string(), record))
    }

    /// Adds all records of another library, records of `other` take precedence
    pub fn merge(&mut self, other: GasDatabase) {
        self.records.extend(other.records);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.records.contains_key(name)
    }

    pub fn record(&self, name: &str) -> Result<&GasRecord, DataError> {
        self.records
            .get(name)
            .ok_or_else(|| DataError::species_not_found(name))
    }

    /// sorted list of species keys
    pub fn available_species(&self) -> Vec<String> {
        self.records.keys().cloned().collect()
    }

    pub fn formula(&self, name: &str) -> Result<&str, DataError> {
        Ok(self.record(name)?.formula.as_str())
    }

    pub fn chemical_name(&self, name: &str) -> Result<&str, DataError> {
        Ok(self.record(name)?.chemical_name.as_str())
    }

    /// species key by chemical name, case insensitive
    pub fn name_from_chemical_name(&self, chemical_name: &str) -> Result<&str, DataError> {
        self.records
            .iter()
            .find(|(_, r)| r.chemical_name.eq_ignore_ascii_case(chemical_name.trim()))
            .map(|(k, _)| k.as_str())
            .ok_or_else(|| DataError::NotFound {
                what: "chemical name",
                key: chemical_name.to_string(),
            })
    }
}

impl ThermoCoefficientProvider for GasDatabase {
    fn thermo_coefficients(&self, name: &str) -> Result<NASAcoeffs, DataError> {
        Ok(self.record(name)?.thermo.clone())
    }
}

impl TransportCoefficientProvider for GasDatabase {
    fn transport_parameters(&self, name: &str) -> Result<TransportInput, DataError> {
        Ok(self.record(name)?.transport.clone())
    }
}

impl StoichiometryProvider for GasDatabase {
    fn element_composition(&self, name: &str) -> Result<ElementComposition, DataError> {
        parse_formula(self.formula(name)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Thermodynamics::DBhandlers::TRANSPORTdata::Geometry;
    use crate::Thermodynamics::DBhandlers::molmass::calculate_molar_mass;
    use approx::assert_relative_eq;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const ONE_SPECIES: &str = r#"{
        "AR": {
            "formula": "Ar",
            "chemical_name": "Argon",
            "thermo": { "low": [2.5, 0, 0, 0, 0, -745.375, 4.366],
                        "high": [2.5, 0, 0, 0, 0, -745.375, 4.366] },
            "transport": { "geometry": "monatomic", "well_depth": 136.5, "diam": 3.33,
                           "molar_mass": 39.948 }
        }
    }"#;

    #[test]
    fn test_builtin_library() {
        let db = GasDatabase::builtin().unwrap();
        assert_eq!(db.len(), 13);
        for name in [
            "H2", "O2", "N2", "CO", "CO2", "H2O", "AR", "HE", "H", "O", "OH", "CH4", "NO",
        ] {
            assert!(db.contains(name), "{} missing", name);
        }
        let h2o = db.transport_parameters("H2O").unwrap();
        assert_eq!(h2o.geometry, Geometry::Nonlinear);
        assert!(h2o.is_polar());
        let h2 = db.thermo_coefficients("H2").unwrap();
        assert_relative_eq!(h2.low[0], 2.34433112);
    }

    #[test]
    fn test_molar_masses_match_formulas() {
        let db = GasDatabase::builtin().unwrap();
        for name in db.available_species() {
            let (m, _) = calculate_molar_mass(db.formula(&name).unwrap()).unwrap();
            let stored = db.transport_parameters(&name).unwrap().molar_mass;
            assert_relative_eq!(m, stored, max_relative = 1e-4);
        }
    }

    #[test]
    fn test_unknown_species() {
        let db = GasDatabase::builtin().unwrap();
        assert!(matches!(
            db.thermo_coefficients("XYZ"),
            Err(DataError::NotFound { what: "species", .. })
        ));
        assert!(db.transport_parameters("XYZ").is_err());
        assert!(db.element_composition("XYZ").is_err());
    }

    #[test]
    fn test_registry_metadata() {
        let db = GasDatabase::builtin().unwrap();
        assert_eq!(db.formula("AR").unwrap(), "Ar");
        assert_eq!(db.chemical_name("CO2").unwrap(), "Carbon dioxide");
        assert_eq!(db.name_from_chemical_name("carbon monoxide").unwrap(), "CO");
        assert!(db.name_from_chemical_name("unobtainium").is_err());
        let species = db.available_species();
        let mut sorted = species.clone();
        sorted.sort();
        assert_eq!(species, sorted);
    }

    #[test]
    fn test_element_composition_order() {
        let db = GasDatabase::builtin().unwrap();
        assert_eq!(
            db.element_composition("CH4").unwrap(),
            vec![("C".to_string(), 1), ("H".to_string(), 4)]
        );
        assert_eq!(
            db.element_composition("OH").unwrap(),
            vec![("O".to_string(), 1), ("H".to_string(), 1)]
        );
    }

    #[test]
    fn test_defaults_and_file_roundtrip() {
        let db = GasDatabase::from_json_str(ONE_SPECIES).unwrap();
        let ar = db.transport_parameters("AR").unwrap();
        assert_eq!(ar.dipole, 0.0);
        assert_eq!(ar.rot_relax, 0.0);

        let mut file = NamedTempFile::new().unwrap();
        file.write_all(ONE_SPECIES.as_bytes()).unwrap();
        let loaded = GasDatabase::from_file(file.path()).unwrap();
        assert_eq!(loaded, db);

        let out = NamedTempFile::new().unwrap();
        db.save_to_file(out.path()).unwrap();
        assert_eq!(GasDatabase::from_file(out.path()).unwrap(), db);
    }

    #[test]
    fn test_bad_input() {
        let bad_formula = ONE_SPECIES.replace("\"Ar\"", "\"Qq\"");
        assert!(matches!(
            GasDatabase::from_json_str(&bad_formula),
            Err(DataError::ParseError(_))
        ));
        assert!(matches!(
            GasDatabase::from_json_str("{ not json"),
            Err(DataError::SerdeError(_))
        ));
        assert!(matches!(
            GasDatabase::from_file("/definitely/not/here.json"),
            Err(DataError::IoError(_))
        ));
    }

    #[test]
    fn test_insert_and_merge() {
        let mut db = GasDatabase::new();
        assert!(db.is_empty());
        let other = GasDatabase::from_json_str(ONE_SPECIES).unwrap();
        let record = other.record("AR").unwrap().clone();
        assert!(db.insert("ARGON", record.clone()).unwrap().is_none());
        db.merge(other);
        assert_eq!(db.len(), 2);
        let mut broken = record;
        broken.formula = "(Ar".to_string();
        assert!(db.insert("BROKEN", broken).is_err());
    }
}
