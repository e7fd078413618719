//! # Ideal Gas Mixture
//!
//! ## Aim
//! Mixture properties of a `GasComposition` at a `GasState` from the properties of its species.
//!
//! ## Mixing rules
//! - thermo: mole-fraction weighted sums of molar species values, mass-fraction weighted sums
//!   of mass species values; species with zero mole fraction do not add to the entropy
//! - viscosity: Wilke rule
//!   mu = sum_k x_k mu_k / sum_j x_j Phi_kj,
//!   Phi_kj = (1 + M_k/M_j)^(-1/2) (1 + (mu_k/mu_j)^(1/2) (M_j/M_k)^(1/4))^2 / sqrt(8)
//! - binary diffusion: Chapman-Enskog with combined Lennard-Jones parameters of each pair
//!   (see `PairParameters::combine`), upper triangle computed and mirrored
//! - mixture diffusion: D_i = sum_{j!=i} x_j M_j / (MW sum_{j!=i} x_j/D_ji); a species with no
//!   partners present falls back to its self-diffusion coefficient
//! - conductivity: lambda = (sum x_i lambda_i + 1/sum x_i/lambda_i)/2
//!
//! All mixture values are memoized in `OnceCell`s and dropped when the state changes.
//!
//! ## Example
//! ```rust
//! use GasMix::Thermodynamics::DBhandlers::gas_database::GasDatabase;
//! use GasMix::Thermodynamics::GasComposition::FractionBasis;
//! use GasMix::Thermodynamics::GasMixture::GasMixture;
//! use GasMix::Thermodynamics::GasState::GasState;
//! use GasMix::settings::GasSettings;
//!
//! let db = GasDatabase::builtin().unwrap();
//! let state = GasState::new(393.15, 4e5).unwrap();
//! let mixture = GasMixture::from_names(
//!     &[("H2", 0.1), ("O2", 0.2), ("N2", 0.7)],
//!     FractionBasis::Mole,
//!     state,
//!     &db,
//!     &GasSettings::default(),
//! )
//! .unwrap();
//! assert!((mixture.molar_mass() - 26.2108).abs() < 1e-4);
//! assert!((mixture.viscosity() - 2.271e-5).abs() < 1e-7);
//! ```
use crate::Thermodynamics::ChemEquilibrium::ElementPotentialSolver::{
    EquilibriumResult, EquilibriumSolver,
};
use crate::Thermodynamics::DBhandlers::TRANSPORTdata::{PairParameters, binary_diffusion};
use crate::Thermodynamics::DBhandlers::data_api::{ElementComposition, GasLibrary};
use crate::Thermodynamics::GasComposition::{FractionBasis, GasComposition, StoichiometryMatrix};
use crate::Thermodynamics::GasSpecies::Species;
use crate::Thermodynamics::GasState::GasState;
use crate::Thermodynamics::constants::R;
use crate::Thermodynamics::gas_errors::GasError;
use crate::settings::GasSettings;
use log::debug;
use nalgebra::DMatrix;
use std::cell::OnceCell;
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
struct MixtureStateCache {
    cp: OnceCell<f64>,
    h: OnceCell<f64>,
    mass_cp: OnceCell<f64>,
    mass_h: OnceCell<f64>,
    viscosity: OnceCell<f64>,
    conductivity: OnceCell<f64>,
    binary_diffusion: OnceCell<DMatrix<f64>>,
    mixture_diffusion: OnceCell<Vec<f64>>,
}

#[derive(Debug, Clone, Default)]
struct MixtureMixingCache {
    s: OnceCell<f64>,
}

#[derive(Debug, Clone)]
pub struct GasMixture {
    composition: GasComposition,
    state: GasState,
    reference_pressure: f64,
    composition_tolerance: f64,
    state_cache: MixtureStateCache,
    mixing_cache: MixtureMixingCache,
}

impl GasMixture {
    /// Binds a composition to a state; every species is moved to `state` and gets the
    /// reference pressure of `settings`
    pub fn new(
        composition: GasComposition,
        state: GasState,
        settings: &GasSettings,
    ) -> Result<Self, GasError> {
        settings.validate()?;
        let mut mixture = Self {
            composition,
            state,
            reference_pressure: settings.reference_pressure,
            composition_tolerance: settings.composition_tolerance,
            state_cache: MixtureStateCache::default(),
            mixing_cache: MixtureMixingCache::default(),
        };
        for s in mixture.composition.species_mut() {
            s.update_gas_state(state);
            s.set_reference_pressure(settings.reference_pressure)?;
        }
        Ok(mixture)
    }

    /// Looks all species up in a library and builds the mixture
    pub fn from_names<L>(
        entries: &[(&str, f64)],
        basis: FractionBasis,
        state: GasState,
        lib: &L,
        settings: &GasSettings,
    ) -> Result<Self, GasError>
    where
        L: GasLibrary + ?Sized,
    {
        settings.validate()?;
        let composition = GasComposition::from_names(
            entries,
            basis,
            state,
            lib,
            settings.composition_tolerance,
        )?;
        Self::new(composition, state, settings)
    }

    /// New mixture of the same species at the same state with other mole fractions,
    /// e.g. the composition returned by the equilibrium solver
    pub fn with_mole_fractions(&self, x: &[f64]) -> Result<Self, GasError> {
        let composition = self
            .composition
            .with_mole_fractions(x, self.composition_tolerance)?;
        Ok(Self {
            composition,
            state: self.state,
            reference_pressure: self.reference_pressure,
            composition_tolerance: self.composition_tolerance,
            state_cache: MixtureStateCache::default(),
            mixing_cache: MixtureMixingCache::default(),
        })
    }

    /// Sets new T and P for the mixture and all its species
    pub fn update_gas_state(&mut self, state: GasState) {
        if state == self.state {
            return;
        }
        debug!(
            "mixture state changed to T = {} K, P = {} Pa",
            state.temperature(),
            state.pressure()
        );
        self.state = state;
        for s in self.composition.species_mut() {
            s.update_gas_state(state);
        }
        self.state_cache = MixtureStateCache::default();
        self.mixing_cache = MixtureMixingCache::default();
    }

    pub fn set_reference_pressure(&mut self, p_ref: f64) -> Result<(), GasError> {
        for s in self.composition.species_mut() {
            s.set_reference_pressure(p_ref)?;
        }
        if p_ref != self.reference_pressure {
            self.reference_pressure = p_ref;
            self.mixing_cache = MixtureMixingCache::default();
        }
        Ok(())
    }

    /// Element-potential equilibrium at the current T and P
    pub fn calculate_chemical_equilibrium_TP(
        &self,
        solver: &EquilibriumSolver,
    ) -> Result<EquilibriumResult, GasError> {
        solver.solve(self)
    }

    /// Equilibrium composition as a new mixture together with the solver report
    pub fn equilibrate(
        &self,
        solver: &EquilibriumSolver,
    ) -> Result<(GasMixture, EquilibriumResult), GasError> {
        let mut result = solver.solve(self)?;
        result.mole_fractions = clear_round_off(&result.mole_fractions, self.composition_tolerance);
        let mixture = self.with_mole_fractions(&result.mole_fractions)?;
        Ok((mixture, result))
    }

    ////////////////////////////DATA////////////////////////////////////

    pub fn composition(&self) -> &GasComposition {
        &self.composition
    }
    pub fn species(&self) -> &[Species] {
        self.composition.species()
    }
    pub fn species_names(&self) -> Vec<String> {
        self.composition.species_names()
    }
    pub fn n_species(&self) -> usize {
        self.composition.n_species()
    }
    pub fn elements(&self) -> &[String] {
        self.composition.elements()
    }
    pub fn n_elements(&self) -> usize {
        self.composition.n_elements()
    }
    pub fn element_compositions(&self) -> HashMap<String, ElementComposition> {
        self.composition.element_compositions()
    }
    pub fn stoichiometry(&self) -> &StoichiometryMatrix {
        self.composition.stoichiometry()
    }
    pub fn basis(&self) -> FractionBasis {
        self.composition.basis()
    }
    pub fn mole_fractions(&self) -> &[f64] {
        self.composition.mole_fractions()
    }
    pub fn mass_fractions(&self) -> &[f64] {
        self.composition.mass_fractions()
    }
    /// kg/kmol
    pub fn molar_mass(&self) -> f64 {
        self.composition.molar_mass()
    }
    pub fn state(&self) -> GasState {
        self.state
    }
    pub fn temperature(&self) -> f64 {
        self.state.temperature()
    }
    pub fn pressure(&self) -> f64 {
        self.state.pressure()
    }
    pub fn reference_pressure(&self) -> f64 {
        self.reference_pressure
    }
    pub fn composition_tolerance(&self) -> f64 {
        self.composition_tolerance
    }
    /// kg/m3
    pub fn density(&self) -> f64 {
        self.molar_mass() * self.pressure() / (R * self.temperature())
    }

    ////////////////////////////PER SPECIES////////////////////////////////////

    /// any species property in composition order
    pub fn species_vector<F: Fn(&Species) -> f64>(&self, property: F) -> Vec<f64> {
        self.species().iter().map(property).collect()
    }
    pub fn species_molar_cp(&self) -> Vec<f64> {
        self.species_vector(Species::molar_cp)
    }
    pub fn species_molar_enthalpy(&self) -> Vec<f64> {
        self.species_vector(Species::molar_enthalpy)
    }
    /// entropies at the species' mole fractions
    pub fn species_molar_entropy(&self) -> Vec<f64> {
        self.species_vector(Species::molar_entropy)
    }
    pub fn species_molar_internal_energy(&self) -> Vec<f64> {
        self.species_vector(Species::molar_internal_energy)
    }
    pub fn species_molar_gibbs_free_energy(&self) -> Vec<f64> {
        self.species_vector(Species::molar_gibbs_free_energy)
    }
    pub fn species_standard_molar_gibbs_free_energy(&self) -> Vec<f64> {
        self.species_vector(Species::standard_molar_gibbs_free_energy)
    }
    pub fn species_mass_cp(&self) -> Vec<f64> {
        self.species_vector(Species::mass_cp)
    }
    pub fn species_mass_enthalpy(&self) -> Vec<f64> {
        self.species_vector(Species::mass_enthalpy)
    }
    pub fn species_mass_entropy(&self) -> Vec<f64> {
        self.species_vector(Species::mass_entropy)
    }
    pub fn species_mass_internal_energy(&self) -> Vec<f64> {
        self.species_vector(Species::mass_internal_energy)
    }
    pub fn species_mass_gibbs_free_energy(&self) -> Vec<f64> {
        self.species_vector(Species::mass_gibbs_free_energy)
    }
    pub fn species_viscosity(&self) -> Vec<f64> {
        self.species_vector(Species::viscosity)
    }
    pub fn species_self_diffusion_coefficient(&self) -> Vec<f64> {
        self.species_vector(Species::self_diffusion_coefficient)
    }
    pub fn species_thermal_conductivity(&self) -> Vec<f64> {
        self.species_vector(Species::thermal_conductivity)
    }
    pub fn species_mean_thermal_speed(&self) -> Vec<f64> {
        self.species_vector(Species::mean_thermal_speed)
    }
    pub fn species_mean_free_path(&self) -> Vec<f64> {
        self.species_vector(Species::mean_free_path)
    }
    pub fn species_molar_mass(&self) -> Vec<f64> {
        self.species_vector(Species::molar_mass)
    }

    ////////////////////////////THERMO////////////////////////////////////

    fn mole_weighted<F: Fn(&Species) -> f64>(&self, property: F) -> f64 {
        self.species()
            .iter()
            .zip(self.mole_fractions())
            .map(|(s, x)| x * property(s))
            .sum()
    }

    fn mass_weighted<F: Fn(&Species) -> f64>(&self, property: F) -> f64 {
        self.species()
            .iter()
            .zip(self.mass_fractions())
            .map(|(s, y)| y * property(s))
            .sum()
    }

    /// J/kmol/K
    pub fn molar_cp(&self) -> f64 {
        *self
            .state_cache
            .cp
            .get_or_init(|| self.mole_weighted(Species::molar_cp))
    }
    /// J/kmol
    pub fn molar_enthalpy(&self) -> f64 {
        *self
            .state_cache
            .h
            .get_or_init(|| self.mole_weighted(Species::molar_enthalpy))
    }
    /// J/kmol/K, includes the ideal mixing entropy
    pub fn molar_entropy(&self) -> f64 {
        *self.mixing_cache.s.get_or_init(|| {
            self.species()
                .iter()
                .zip(self.mole_fractions())
                .filter(|(_, x)| **x > 0.0)
                .map(|(s, x)| x * s.molar_entropy())
                .sum()
        })
    }
    /// J/kmol
    pub fn molar_internal_energy(&self) -> f64 {
        self.molar_enthalpy() - R * self.temperature()
    }
    /// J/kmol
    pub fn molar_gibbs_free_energy(&self) -> f64 {
        self.molar_enthalpy() - self.temperature() * self.molar_entropy()
    }
    /// J/kg/K
    pub fn mass_cp(&self) -> f64 {
        *self
            .state_cache
            .mass_cp
            .get_or_init(|| self.mass_weighted(Species::mass_cp))
    }
    /// J/kg
    pub fn mass_enthalpy(&self) -> f64 {
        *self
            .state_cache
            .mass_h
            .get_or_init(|| self.mass_weighted(Species::mass_enthalpy))
    }
    /// J/kg/K
    pub fn mass_entropy(&self) -> f64 {
        self.molar_entropy() / self.molar_mass()
    }
    /// J/kg
    pub fn mass_internal_energy(&self) -> f64 {
        self.mass_enthalpy() - R * self.temperature() / self.molar_mass()
    }
    /// J/kg
    pub fn mass_gibbs_free_energy(&self) -> f64 {
        self.mass_enthalpy() - self.temperature() * self.mass_entropy()
    }

    ////////////////////////////TRANSPORT////////////////////////////////////

    /// Wilke mixture viscosity, Pa*s
    pub fn viscosity(&self) -> f64 {
        *self.state_cache.viscosity.get_or_init(|| {
            let mu = self.species_viscosity();
            let m = self.species_molar_mass();
            let x = self.mole_fractions();
            let n = mu.len();
            let mut viscosity = 0.0;
            for k in 0..n {
                let mut sum = 0.0;
                for j in 0..n {
                    let phi = (1.0 / 8.0_f64.sqrt()) * (1.0 + m[k] / m[j]).powf(-0.5)
                        * (1.0 + (mu[k] / mu[j]).sqrt() * (m[j] / m[k]).powf(0.25)).powi(2);
                    sum += x[j] * phi;
                }
                viscosity += x[k] * mu[k] / sum;
            }
            viscosity
        })
    }

    /// symmetric matrix of binary diffusion coefficients D_ij, m2/s
    pub fn binary_diffusion_coefficients(&self) -> &DMatrix<f64> {
        self.state_cache.binary_diffusion.get_or_init(|| {
            let species = self.species();
            let n = species.len();
            let (T, P) = (self.temperature(), self.pressure());
            let mut d = DMatrix::zeros(n, n);
            for i in 0..n {
                for j in i..n {
                    let pair = PairParameters::combine(
                        species[i].transport_parameters(),
                        species[j].transport_parameters(),
                    );
                    let omega_11 = species[i]
                        .collision_integrals()
                        .omega11(T / pair.well_depth, pair.reduced_dipole());
                    let d_ij = binary_diffusion(pair.molar_mass, T, P, pair.diam, omega_11);
                    d[(i, j)] = d_ij;
                    d[(j, i)] = d_ij;
                }
            }
            d
        })
    }

    /// effective diffusion coefficient of every species in the mixture, m2/s
    pub fn mixture_diffusion_coefficients(&self) -> &[f64] {
        self.state_cache.mixture_diffusion.get_or_init(|| {
            let d = self.binary_diffusion_coefficients();
            let x = self.mole_fractions();
            let m = self.species_molar_mass();
            let mw = self.molar_mass();
            let n = x.len();
            (0..n)
                .map(|i| {
                    let (num, den) = (0..n).filter(|&j| j != i).fold((0.0, 0.0), |acc, j| {
                        (acc.0 + x[j] * m[j], acc.1 + x[j] / d[(j, i)])
                    });
                    if den > 0.0 { num / (mw * den) } else { d[(i, i)] }
                })
                .collect()
        })
    }

    /// W/m/K
    pub fn thermal_conductivity(&self) -> f64 {
        *self.state_cache.conductivity.get_or_init(|| {
            let lambda = self.species_thermal_conductivity();
            let x = self.mole_fractions();
            let a: f64 = x.iter().zip(&lambda).map(|(x, l)| x * l).sum();
            let b: f64 = x.iter().zip(&lambda).map(|(x, l)| x / l).sum();
            0.5 * (a + 1.0 / b)
        })
    }
}

/// Sets negatives within `tolerance` of zero to zero and renormalizes.
/// Larger negatives are left for the composition check to reject.
pub(crate) fn clear_round_off(x: &[f64], tolerance: f64) -> Vec<f64> {
    let cleaned: Vec<f64> = x
        .iter()
        .map(|v| if *v < 0.0 && -v <= tolerance { 0.0 } else { *v })
        .collect();
    let sum: f64 = cleaned.iter().sum();
    if sum > 0.0 {
        cleaned.iter().map(|v| v / sum).collect()
    } else {
        cleaned
    }
}
