//! # Gas Composition
//!
//! Ordered list of species with their amounts on mole or mass basis. Mole fractions, mass
//! fractions, mixture molar mass and the species x elements stoichiometry matrix are derived
//! once at construction; a composition is rebuilt, never mutated, when the amounts change.
use crate::Thermodynamics::DBhandlers::data_api::{
    ElementComposition, GasLibrary, StoichiometryProvider,
};
use crate::Thermodynamics::DBhandlers::molmass::create_elem_composition_matrix;
use crate::Thermodynamics::GasSpecies::Species;
use crate::Thermodynamics::GasState::GasState;
use crate::Thermodynamics::gas_errors::GasError;
use log::debug;
use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FractionBasis {
    Mole,
    Mass,
}

/// NS x NE matrix of atom counts, row i = species i, column j = element j
#[derive(Debug, Clone, PartialEq)]
pub struct StoichiometryMatrix {
    matrix: DMatrix<u32>,
    elements: Vec<String>,
}

impl StoichiometryMatrix {
    /// elements are ordered by first appearance, species by position in `compositions`
    pub fn new(compositions: &[ElementComposition]) -> Self {
        let (matrix, elements) = create_elem_composition_matrix(compositions);
        Self { matrix, elements }
    }
    pub fn matrix(&self) -> &DMatrix<u32> {
        &self.matrix
    }
    pub fn elements(&self) -> &[String] {
        &self.elements
    }
    pub fn n_species(&self) -> usize {
        self.matrix.nrows()
    }
    pub fn n_elements(&self) -> usize {
        self.matrix.ncols()
    }
    /// number of atoms of element j in species i
    pub fn atoms(&self, i: usize, j: usize) -> u32 {
        self.matrix[(i, j)]
    }
    pub fn to_f64(&self) -> DMatrix<f64> {
        self.matrix.map(|n| n as f64)
    }
}

#[derive(Debug, Clone)]
pub struct GasComposition {
    species: Vec<Species>,
    basis: FractionBasis,
    mole_fractions: Vec<f64>,
    mass_fractions: Vec<f64>,
    molar_mass: f64,
    element_compositions: Vec<ElementComposition>,
    stoichiometry: StoichiometryMatrix,
}

fn check_amounts(names: &[&str], amounts: &[f64], tolerance: f64) -> Result<(), GasError> {
    if names.is_empty() {
        return Err(GasError::InvalidComposition(
            "composition must contain at least one species".to_string(),
        ));
    }
    let mut seen = HashSet::new();
    for name in names {
        if !seen.insert(*name) {
            return Err(GasError::InvalidComposition(format!(
                "species '{}' is listed more than once",
                name
            )));
        }
    }
    for (name, amount) in names.iter().zip(amounts) {
        if !(amount.is_finite() && *amount >= 0.0) {
            return Err(GasError::InvalidComposition(format!(
                "amount of '{}' must be finite and non-negative, got {}",
                name, amount
            )));
        }
    }
    let sum: f64 = amounts.iter().sum();
    if (sum - 1.0).abs() > tolerance {
        return Err(GasError::InvalidComposition(format!(
            "fractions sum to {} instead of 1 (tolerance {})",
            sum, tolerance
        )));
    }
    Ok(())
}

impl GasComposition {
    /// Builds a composition from species and their amounts
    ///
    /// # Arguments
    /// * `entries` - species with their mole (or mass) fractions, order is kept
    /// * `basis` - whether the amounts are mole or mass fractions
    /// * `stoich` - element composition of every species
    /// * `tolerance` - admissible absolute deviation of the fraction sum from 1
    ///
    /// # Errors
    /// `InvalidComposition` for an empty list, duplicated species, negative amounts or a
    /// fraction sum off by more than `tolerance`; `NotFound`/`Parse` from the provider
    pub fn build<S>(
        entries: Vec<(Species, f64)>,
        basis: FractionBasis,
        stoich: &S,
        tolerance: f64,
    ) -> Result<Self, GasError>
    where
        S: StoichiometryProvider + ?Sized,
    {
        let element_compositions = entries
            .iter()
            .map(|(s, _)| stoich.element_composition(s.name()))
            .collect::<Result<Vec<_>, _>>()?;
        Self::assemble(entries, basis, element_compositions, tolerance)
    }

    /// Builds the species from a library and then the composition
    pub fn from_names<L>(
        entries: &[(&str, f64)],
        basis: FractionBasis,
        state: GasState,
        lib: &L,
        tolerance: f64,
    ) -> Result<Self, GasError>
    where
        L: GasLibrary + ?Sized,
    {
        let species = entries
            .iter()
            .map(|(name, amount)| Ok((Species::new(name, state, lib)?, *amount)))
            .collect::<Result<Vec<_>, GasError>>()?;
        Self::build(species, basis, lib, tolerance)
    }

    fn assemble(
        entries: Vec<(Species, f64)>,
        basis: FractionBasis,
        element_compositions: Vec<ElementComposition>,
        tolerance: f64,
    ) -> Result<Self, GasError> {
        let names: Vec<&str> = entries.iter().map(|(s, _)| s.name()).collect();
        let amounts: Vec<f64> = entries.iter().map(|(_, a)| *a).collect();
        check_amounts(&names, &amounts, tolerance)?;
        let molar_masses: Vec<f64> = entries.iter().map(|(s, _)| s.molar_mass()).collect();

        let (mole_fractions, mass_fractions, molar_mass) = match basis {
            FractionBasis::Mole => {
                let mw: f64 = amounts.iter().zip(&molar_masses).map(|(x, m)| x * m).sum();
                let y = amounts
                    .iter()
                    .zip(&molar_masses)
                    .map(|(x, m)| x * m / mw)
                    .collect();
                (amounts.clone(), y, mw)
            }
            FractionBasis::Mass => {
                let inv_mw: f64 = amounts.iter().zip(&molar_masses).map(|(y, m)| y / m).sum();
                let mw = 1.0 / inv_mw;
                let x = amounts
                    .iter()
                    .zip(&molar_masses)
                    .map(|(y, m)| y / m * mw)
                    .collect();
                (x, amounts.clone(), mw)
            }
        };

        let mut species = Vec::with_capacity(entries.len());
        for ((mut s, _), x) in entries.into_iter().zip(&mole_fractions) {
            s.update_mole_fraction(x.clamp(0.0, 1.0))?;
            species.push(s);
        }
        let stoichiometry = StoichiometryMatrix::new(&element_compositions);
        debug!(
            "composition of {} species and {} elements, MW = {}",
            species.len(),
            stoichiometry.n_elements(),
            molar_mass
        );
        Ok(Self {
            species,
            basis,
            mole_fractions,
            mass_fractions,
            molar_mass,
            element_compositions,
            stoichiometry,
        })
    }

    /// Same species (and species states) with new mole fractions
    pub fn with_mole_fractions(&self, x: &[f64], tolerance: f64) -> Result<Self, GasError> {
        if x.len() != self.species.len() {
            return Err(GasError::InvalidComposition(format!(
                "expected {} mole fractions, got {}",
                self.species.len(),
                x.len()
            )));
        }
        let entries = self.species.iter().cloned().zip(x.iter().copied()).collect();
        Self::assemble(
            entries,
            FractionBasis::Mole,
            self.element_compositions.clone(),
            tolerance,
        )
    }

    pub fn species(&self) -> &[Species] {
        &self.species
    }
    pub(crate) fn species_mut(&mut self) -> &mut [Species] {
        &mut self.species
    }
    pub fn species_names(&self) -> Vec<String> {
        self.species.iter().map(|s| s.name().to_string()).collect()
    }
    pub fn n_species(&self) -> usize {
        self.species.len()
    }
    pub fn basis(&self) -> FractionBasis {
        self.basis
    }
    pub fn mole_fractions(&self) -> &[f64] {
        &self.mole_fractions
    }
    pub fn mass_fractions(&self) -> &[f64] {
        &self.mass_fractions
    }
    /// kg/kmol
    pub fn molar_mass(&self) -> f64 {
        self.molar_mass
    }
    pub fn stoichiometry(&self) -> &StoichiometryMatrix {
        &self.stoichiometry
    }
    pub fn elements(&self) -> &[String] {
        self.stoichiometry.elements()
    }
    pub fn n_elements(&self) -> usize {
        self.stoichiometry.n_elements()
    }
    /// element -> atom count per species name
    pub fn element_compositions(&self) -> HashMap<String, ElementComposition> {
        self.species
            .iter()
            .zip(&self.element_compositions)
            .map(|(s, c)| (s.name().to_string(), c.clone()))
            .collect()
    }
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.species.iter().position(|s| s.name() == name)
    }
}
