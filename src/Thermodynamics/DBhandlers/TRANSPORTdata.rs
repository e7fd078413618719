//! # Transport Properties Data Handler Module
//!
//! ## Aim
//! Lennard-Jones transport parameters of a gas species and the kinetic theory formulas built
//! on them: Chapman-Enskog viscosity and binary diffusion, mean free path and mean thermal
//! speed, and the Eucken-type thermal conductivity with rotational relaxation correction.
//!
//! ## Main Data Structures and Logic
//! - `TransportInput`: molecular parameters as stored in the database (geometry, well depth,
//!   collision diameter, dipole moment, polarizability, Zrot(298), molar mass)
//! - `Geometry`: monatomic, linear or nonlinear molecule
//! - `NeufeldCollisionIntegrals`: reduced collision integrals Ω(1,1)* and Ω(2,2)*
//! - `PairParameters`: combined Lennard-Jones parameters of an unlike pair
//!
//! ## Units
//! T in K, P in Pa, M in kg/kmol, sigma in Angstrom, dipole in Debye, polarizability in A^3.
//! Viscosity comes out in Pa*s, diffusivity in m2/s, conductivity in W/m/K, mean free path in m.
//! The powers of ten of the Boltzmann constant, the atomic mass unit and the Angstrom are
//! folded into the numerical prefactors.
#![allow(non_snake_case)]
use crate::Thermodynamics::DBhandlers::data_api::CollisionIntegralProvider;
use crate::Thermodynamics::constants::{AMU, K_B, PI, R, T_ROT_RELAX, T_STAR_MAX, T_STAR_MIN};
use log::warn;
use serde::{Deserialize, Serialize};

/// Form of the molecule, stored in lowercase in the database
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Geometry {
    Monatomic,
    Linear,
    Nonlinear,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct TransportInput {
    pub geometry: Geometry,
    /// Lennard-Jones well depth eps/k in Kelvin
    pub well_depth: f64,
    ///  Lennard-Jones collision diameter in angstroms
    pub diam: f64,
    ///  dipole moment in Debye. Default: 0.0
    #[serde(default)]
    pub dipole: f64,
    ///  Polarizability in A^3. Default: 0.0
    #[serde(default)]
    pub polar: f64,
    ///  Number of rotational relaxation collisions at 298 K.  Dimensionless. Default: 0.0
    #[serde(default)]
    pub rot_relax: f64,
    /// molar mass, kg/kmol
    pub molar_mass: f64,
}

impl TransportInput {
    pub fn is_polar(&self) -> bool {
        self.dipole > 0.0
    }
    pub fn reduced_dipole(&self) -> f64 {
        reduced_dipole(self.well_depth, self.diam, self.dipole)
    }
}

/// reduced dipole moment mu* = mu/sqrt(eps*sigma^3), CGS units
pub fn reduced_dipole_moment(e_k: f64, sigma_k: f64, mu: f64) -> f64 {
    1e2 * mu / (e_k * K_B * sigma_k.powi(3)).sqrt()
}

/// reduced dipole parameter delta* = mu*^2/2 used by the polar collision integrals
pub fn reduced_dipole(e_k: f64, sigma_k: f64, mu: f64) -> f64 {
    0.5 * reduced_dipole_moment(e_k, sigma_k, mu).powi(2)
}

// Collision integral
// Гиршфельдер. Молекулярная теория газов и жидкостей
//Hirschfelder. The Molecular Theory of Gases and Liquids
fn omega_22_calc(T1: f64, delta: f64) -> f64 {
    let a1 = 1.16145;
    let b1 = 0.14874;
    let c1 = 0.52487;
    let d1 = 0.77320;
    let e1 = 2.16178;
    let f1 = 2.43787;
    a1 / T1.powf(b1) + c1 / (d1 * T1).exp() + e1 / (f1 * T1).exp() + 0.2 * delta.powi(2) / T1
}

// collision integral for diffusion
fn omega_11_calc(T1: f64, delta: f64) -> f64 {
    let a = 1.06036;
    let b = 0.15610;
    let c = 0.19300;
    let d = 0.47635;
    let e = 1.03587;
    let f = 1.52996;
    let g = 1.76474;
    let h = 3.89411;
    a / T1.powf(b)
        + c / (d * T1).exp()
        + e / (f * T1).exp()
        + g / (h * T1).exp()
        + 0.19 * delta.powi(2) / T1
}

/// Neufeld-Janzen-Aziz fits of the reduced collision integrals with the Brokaw polar term.
/// Outside 0.3 <= T* <= 100 the fits are extrapolated and a warning is logged.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeufeldCollisionIntegrals;

impl NeufeldCollisionIntegrals {
    fn check_range(t_star: f64) {
        if !(T_STAR_MIN..=T_STAR_MAX).contains(&t_star) {
            warn!(
                "reduced temperature T* = {} is outside the collision integral fit range [{}, {}], extrapolating",
                t_star, T_STAR_MIN, T_STAR_MAX
            );
        }
    }
}

impl CollisionIntegralProvider for NeufeldCollisionIntegrals {
    fn omega11(&self, t_star: f64, delta_star: f64) -> f64 {
        Self::check_range(t_star);
        omega_11_calc(t_star, delta_star)
    }
    fn omega22(&self, t_star: f64, delta_star: f64) -> f64 {
        Self::check_range(t_star);
        omega_22_calc(t_star, delta_star)
    }
}

/// Chapman-Enskog viscosity, Pa*s
pub fn visc(M: f64, T: f64, sigma_k: f64, omega_22: f64) -> f64 {
    1e-5 * (5.0 / 16.0) * (PI * K_B * T * M * AMU).sqrt() / (PI * omega_22 * sigma_k.powi(2))
}

/// Chapman-Enskog binary diffusion coefficient for reduced molar mass M_ij, m2/s
pub fn binary_diffusion(M_ij: f64, T: f64, P: f64, sigma_ij: f64, omega_11: f64) -> f64 {
    0.1 * (3.0 / 16.0) * (2.0 * PI * (K_B * T).powi(3) / (M_ij * AMU)).sqrt()
        / (P * PI * sigma_ij.powi(2) * omega_11)
}

/// mean free path, m
pub fn mean_free_path(T: f64, P: f64, sigma_k: f64) -> f64 {
    K_B * 1e-3 * T / (2.0_f64.sqrt() * P * sigma_k.powi(2))
}

/// arithmetic mean thermal speed, m/s
pub fn mean_thermal_speed(M: f64, T: f64) -> f64 {
    (8.0 * R * T / (PI * M)).sqrt()
}

/// temperature dependence of the rotational relaxation number (Parker)
pub fn rot_relax_factor(e_k: f64, T: f64) -> f64 {
    let ratio = e_k / T;
    1.0 + 0.5 * (PI.powi(3) * ratio).sqrt()
        + (0.25 * PI.powi(2) + 2.0) * ratio
        + (PI * ratio).powf(1.5)
}

/// Eucken-type thermal conductivity with Mason-Monchick translational/rotational coupling, W/m/K
/// Cp - molar heat capacity, J/kmol/K; ro - density, kg/m3;
/// D_kk - self-diffusion, m2/s; eta - viscosity, Pa*s
pub fn calculate_Lambda_(
    p: &TransportInput,
    Cp: f64,
    ro: f64,
    D_kk: f64,
    eta: f64,
    T: f64,
) -> f64 {
    let C_trans = (3.0 / 2.0) * R;
    let (C_rot, C_vib) = match p.geometry {
        Geometry::Monatomic => (0.0, 0.0),
        Geometry::Linear => (R, Cp - R - (5.0 / 2.0) * R),
        Geometry::Nonlinear => ((3.0 / 2.0) * R, Cp - R - 3.0 * R),
    };
    let z_rot = p.rot_relax * rot_relax_factor(p.well_depth, T_ROT_RELAX)
        / rot_relax_factor(p.well_depth, T);
    let rho_d_eta = ro * D_kk / eta;
    let a = (5.0 / 2.0) - rho_d_eta;
    let b = z_rot + (2.0 / PI) * ((5.0 / 3.0) * (C_rot / R) + rho_d_eta);
    let f_trans = (5.0 / 2.0) * (1.0 - 2.0 * C_rot * a / (PI * C_trans * b));
    let f_rot = rho_d_eta * (1.0 + 2.0 * a / (PI * b));
    let f_vib = rho_d_eta;
    eta * (f_trans * C_trans + f_rot * C_rot + f_vib * C_vib) / p.molar_mass
}

/// combined Lennard-Jones parameters of a species pair
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PairParameters {
    pub well_depth: f64,
    pub diam: f64,
    pub dipole: f64,
    /// reduced molar mass M_i*M_j/(M_i+M_j)
    pub molar_mass: f64,
}

impl PairParameters {
    /// Like pairs (both polar or both nonpolar) use geometric means of eps and mu and the
    /// arithmetic mean of sigma. Unlike pairs get the Brokaw induced-dipole correction
    /// chi = 1 + alpha_n* mu_p* sqrt(eps_p/eps_n)/4 with eps*chi^2, sigma*chi^(-1/6), mu = 0.
    pub fn combine(a: &TransportInput, b: &TransportInput) -> Self {
        let molar_mass = a.molar_mass * b.molar_mass / (a.molar_mass + b.molar_mass);
        let eps = (a.well_depth * b.well_depth).sqrt();
        let sigma = 0.5 * (a.diam + b.diam);
        if a.is_polar() == b.is_polar() {
            return Self {
                well_depth: eps,
                diam: sigma,
                dipole: (a.dipole * b.dipole).sqrt(),
                molar_mass,
            };
        }
        let (polar, nonpolar) = if a.is_polar() { (a, b) } else { (b, a) };
        let alpha_n = nonpolar.polar / nonpolar.diam.powi(3);
        let mu_p = reduced_dipole_moment(polar.well_depth, polar.diam, polar.dipole);
        let chi = 1.0 + 0.25 * alpha_n * mu_p * (polar.well_depth / nonpolar.well_depth).sqrt();
        Self {
            well_depth: chi.powi(2) * eps,
            diam: sigma * chi.powf(-1.0 / 6.0),
            dipole: 0.0,
            molar_mass,
        }
    }
    pub fn reduced_dipole(&self) -> f64 {
        reduced_dipole(self.well_depth, self.diam, self.dipole)
    }
}
