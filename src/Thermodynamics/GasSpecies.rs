//! # Ideal Gas Species
//!
//! ## Aim
//! Temperature/pressure dependent properties of a single ideal-gas species built from
//! its NASA-7 coefficients and Lennard-Jones transport parameters.
//!
//! ## Main Data Structures and Logic
//! - `Species` holds immutable data fetched once from the providers, the current `GasState`,
//!   a contextual mole fraction (1.0 = pure species) and a reference pressure.
//! - Every derived property is computed lazily on first access and memoized in a `OnceCell`.
//!   `update_gas_state` drops all cached values, `update_mole_fraction` and
//!   `set_reference_pressure` drop only the entropy-dependent ones.
//! - `OnceCell` makes `Species` `Send` but not `Sync`: move it between threads, do not share it.
//!
//! ## Units
//! Molar properties per kmol (J/kmol, J/kmol/K), mass properties per kg, molar mass kg/kmol.
//!
//! ## Example
//! ```rust
//! use GasMix::Thermodynamics::DBhandlers::gas_database::GasDatabase;
//! use GasMix::Thermodynamics::GasSpecies::Species;
//! use GasMix::Thermodynamics::GasState::GasState;
//!
//! let db = GasDatabase::builtin().unwrap();
//! let state = GasState::new(393.15, 4e5).unwrap();
//! let mut h2 = Species::new("H2", state, &db).unwrap();
//! let mu = h2.viscosity();
//! assert!(mu > 1.0e-5 && mu < 1.1e-5);
//! h2.update_gas_state(GasState::new(1500.0, 4e5).unwrap());
//! assert!(h2.viscosity() > mu);
//! ```
use crate::Thermodynamics::DBhandlers::NASAdata::NASAcoeffs;
use crate::Thermodynamics::DBhandlers::TRANSPORTdata::{
    Geometry, NeufeldCollisionIntegrals, TransportInput, binary_diffusion, calculate_Lambda_,
    mean_free_path, mean_thermal_speed, visc,
};
use crate::Thermodynamics::DBhandlers::data_api::{
    CollisionIntegralProvider, ThermoCoefficientProvider, TransportCoefficientProvider,
};
use crate::Thermodynamics::GasState::GasState;
use crate::Thermodynamics::constants::{P_REF, R};
use crate::Thermodynamics::gas_errors::GasError;
use std::cell::OnceCell;
use std::sync::Arc;

/// collision integral correlation shared between species
pub type SharedCollisionIntegrals = Arc<dyn CollisionIntegralProvider + Send + Sync>;

/// values depending on T and P only
#[derive(Debug, Clone, Default)]
struct StateCache {
    cp: OnceCell<f64>,
    h: OnceCell<f64>,
    s_standard: OnceCell<f64>,
    viscosity: OnceCell<f64>,
    self_diffusion: OnceCell<f64>,
    conductivity: OnceCell<f64>,
    mean_free_path: OnceCell<f64>,
    mean_thermal_speed: OnceCell<f64>,
}

/// values depending on the contextual mole fraction and the reference pressure as well
#[derive(Debug, Clone, Default)]
struct MixingCache {
    s: OnceCell<f64>,
}

#[derive(Debug, Clone)]
pub struct Species {
    name: String,
    thermo: NASAcoeffs,
    transport: TransportInput,
    omega: SharedCollisionIntegrals,
    state: GasState,
    mole_fraction: f64,
    reference_pressure: f64,
    state_cache: StateCache,
    mixing_cache: MixingCache,
}

impl Species {
    /// Looks the species up in a library, collision integrals are the Neufeld fits
    ///
    /// # Errors
    /// `GasError::NotFound` if the library has no thermo or transport record for `name`
    pub fn new<L>(name: &str, state: GasState, lib: &L) -> Result<Self, GasError>
    where
        L: ThermoCoefficientProvider + TransportCoefficientProvider + ?Sized,
    {
        Self::from_providers(name, state, lib, lib, Arc::new(NeufeldCollisionIntegrals))
    }

    /// Builds the species from separate providers
    pub fn from_providers<Th, Tr>(
        name: &str,
        state: GasState,
        thermo: &Th,
        transport: &Tr,
        omega: SharedCollisionIntegrals,
    ) -> Result<Self, GasError>
    where
        Th: ThermoCoefficientProvider + ?Sized,
        Tr: TransportCoefficientProvider + ?Sized,
    {
        let thermo = thermo.thermo_coefficients(name)?;
        let transport = transport.transport_parameters(name)?;
        Self::from_data(name, state, thermo, transport, omega)
    }

    /// Builds the species from raw data
    pub fn from_data(
        name: &str,
        state: GasState,
        thermo: NASAcoeffs,
        transport: TransportInput,
        omega: SharedCollisionIntegrals,
    ) -> Result<Self, GasError> {
        if !(transport.molar_mass > 0.0 && transport.well_depth > 0.0 && transport.diam > 0.0) {
            return Err(GasError::NumericDomain(format!(
                "species '{}': molar mass, well depth and collision diameter must be positive",
                name
            )));
        }
        Ok(Self {
            name: name.to_string(),
            thermo,
            transport,
            omega,
            state,
            mole_fraction: 1.0,
            reference_pressure: P_REF,
            state_cache: StateCache::default(),
            mixing_cache: MixingCache::default(),
        })
    }

    ////////////////////////////STATE////////////////////////////////////

    /// Sets new T and P. All cached properties are dropped unless the state is unchanged.
    pub fn update_gas_state(&mut self, state: GasState) {
        if state != self.state {
            self.state = state;
            self.state_cache = StateCache::default();
            self.mixing_cache = MixingCache::default();
        }
    }

    /// Sets the mole fraction the species has in its mixture, 1.0 is the pure species.
    /// Only entropy and Gibbs energy depend on it.
    pub fn update_mole_fraction(&mut self, x: f64) -> Result<(), GasError> {
        if !(0.0..=1.0).contains(&x) {
            return Err(GasError::InvalidComposition(format!(
                "mole fraction of '{}' must be within [0, 1], got {}",
                self.name, x
            )));
        }
        if x != self.mole_fraction {
            self.mole_fraction = x;
            self.mixing_cache = MixingCache::default();
        }
        Ok(())
    }

    pub fn set_reference_pressure(&mut self, p_ref: f64) -> Result<(), GasError> {
        if !(p_ref.is_finite() && p_ref > 0.0) {
            return Err(GasError::NumericDomain(format!(
                "reference pressure must be positive, got {}",
                p_ref
            )));
        }
        if p_ref != self.reference_pressure {
            self.reference_pressure = p_ref;
            self.mixing_cache = MixingCache::default();
        }
        Ok(())
    }

    ////////////////////////////DATA////////////////////////////////////

    pub fn name(&self) -> &str {
        &self.name
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
    pub fn mole_fraction(&self) -> f64 {
        self.mole_fraction
    }
    pub fn reference_pressure(&self) -> f64 {
        self.reference_pressure
    }
    /// kg/kmol
    pub fn molar_mass(&self) -> f64 {
        self.transport.molar_mass
    }
    pub fn geometry(&self) -> Geometry {
        self.transport.geometry
    }
    /// eps/k, K
    pub fn well_depth(&self) -> f64 {
        self.transport.well_depth
    }
    /// sigma, Angstrom
    pub fn collision_diameter(&self) -> f64 {
        self.transport.diam
    }
    /// Debye
    pub fn dipole_moment(&self) -> f64 {
        self.transport.dipole
    }
    /// Angstrom^3
    pub fn polarizability(&self) -> f64 {
        self.transport.polar
    }
    pub fn rotational_relaxation(&self) -> f64 {
        self.transport.rot_relax
    }
    pub fn thermo_coefficients(&self) -> &NASAcoeffs {
        &self.thermo
    }
    pub fn transport_parameters(&self) -> &TransportInput {
        &self.transport
    }
    pub fn collision_integrals(&self) -> &SharedCollisionIntegrals {
        &self.omega
    }

    /// kg/m3
    pub fn density(&self) -> f64 {
        self.molar_mass() * self.pressure() / (R * self.temperature())
    }

    fn t_star(&self) -> f64 {
        self.temperature() / self.transport.well_depth
    }

    ////////////////////////////THERMO////////////////////////////////////

    /// J/kmol/K
    pub fn molar_cp(&self) -> f64 {
        *self
            .state_cache
            .cp
            .get_or_init(|| self.thermo.Cp(self.temperature()))
    }

    /// J/kmol
    pub fn molar_enthalpy(&self) -> f64 {
        *self
            .state_cache
            .h
            .get_or_init(|| self.thermo.dh(self.temperature()))
    }

    /// entropy of the pure species at P_ref, J/kmol/K
    pub fn standard_molar_entropy(&self) -> f64 {
        *self
            .state_cache
            .s_standard
            .get_or_init(|| self.thermo.ds(self.temperature()))
    }

    /// S = S°(T) - R ln(P/P_ref) - R ln(x), J/kmol/K. Infinite for x = 0.
    pub fn molar_entropy(&self) -> f64 {
        *self.mixing_cache.s.get_or_init(|| {
            self.standard_molar_entropy()
                - R * (self.pressure() / self.reference_pressure).ln()
                - R * self.mole_fraction.ln()
        })
    }

    /// U = H - RT, J/kmol
    pub fn molar_internal_energy(&self) -> f64 {
        self.molar_enthalpy() - R * self.temperature()
    }

    /// G = H - TS, J/kmol
    pub fn molar_gibbs_free_energy(&self) -> f64 {
        self.molar_enthalpy() - self.temperature() * self.molar_entropy()
    }

    /// Gibbs energy of the pure species (x = 1) at the current T and P, J/kmol
    pub fn standard_molar_gibbs_free_energy(&self) -> f64 {
        let s =
            self.standard_molar_entropy() - R * (self.pressure() / self.reference_pressure).ln();
        self.molar_enthalpy() - self.temperature() * s
    }

    /// J/kg/K
    pub fn mass_cp(&self) -> f64 {
        self.molar_cp() / self.molar_mass()
    }
    /// J/kg
    pub fn mass_enthalpy(&self) -> f64 {
        self.molar_enthalpy() / self.molar_mass()
    }
    /// J/kg/K
    pub fn mass_entropy(&self) -> f64 {
        self.molar_entropy() / self.molar_mass()
    }
    /// u = h - RT/M, J/kg
    pub fn mass_internal_energy(&self) -> f64 {
        self.mass_enthalpy() - R * self.temperature() / self.molar_mass()
    }
    /// g = h - Ts, J/kg
    pub fn mass_gibbs_free_energy(&self) -> f64 {
        self.mass_enthalpy() - self.temperature() * self.mass_entropy()
    }

    ////////////////////////////TRANSPORT////////////////////////////////////

    /// Pa*s
    pub fn viscosity(&self) -> f64 {
        *self.state_cache.viscosity.get_or_init(|| {
            let omega_22 = self
                .omega
                .omega22(self.t_star(), self.transport.reduced_dipole());
            visc(
                self.molar_mass(),
                self.temperature(),
                self.transport.diam,
                omega_22,
            )
        })
    }

    /// self-diffusion coefficient, m2/s
    pub fn self_diffusion_coefficient(&self) -> f64 {
        *self.state_cache.self_diffusion.get_or_init(|| {
            let omega_11 = self
                .omega
                .omega11(self.t_star(), self.transport.reduced_dipole());
            binary_diffusion(
                self.molar_mass() / 2.0,
                self.temperature(),
                self.pressure(),
                self.transport.diam,
                omega_11,
            )
        })
    }

    /// W/m/K
    pub fn thermal_conductivity(&self) -> f64 {
        *self.state_cache.conductivity.get_or_init(|| {
            calculate_Lambda_(
                &self.transport,
                self.molar_cp(),
                self.density(),
                self.self_diffusion_coefficient(),
                self.viscosity(),
                self.temperature(),
            )
        })
    }

    /// m
    pub fn mean_free_path(&self) -> f64 {
        *self.state_cache.mean_free_path.get_or_init(|| {
            mean_free_path(self.temperature(), self.pressure(), self.transport.diam)
        })
    }

    /// m/s
    pub fn mean_thermal_speed(&self) -> f64 {
        *self
            .state_cache
            .mean_thermal_speed
            .get_or_init(|| mean_thermal_speed(self.molar_mass(), self.temperature()))
    }
}
