//! Physical constants in the unit system used throughout the crate:
//! energies per kmol, molar masses in kg/kmol (numerically g/mol), pressures in Pa,
//! Lennard-Jones diameters in Angstrom and dipole moments in Debye.

/// universal gas constant, J/(kmol K)
pub const R: f64 = 8314.0;
/// pi
pub const PI: f64 = std::f64::consts::PI;
/// Boltzmann constant mantissa, the 1e-23 J/K exponent is folded into the transport formulas
pub const K_B: f64 = 1.3806488;
/// atomic mass unit mantissa, the 1e-27 kg exponent is folded into the transport formulas
pub const AMU: f64 = 1.66054;
/// standard-state reference pressure, Pa
pub const P_REF: f64 = 1e5;
/// switch temperature between the low- and high-temperature NASA-7 coefficient sets, K
pub const T_SWITCH: f64 = 1000.0;
/// temperature at which rotational relaxation collision numbers are tabulated, K
pub const T_ROT_RELAX: f64 = 298.0;
/// validity range of the reduced-temperature collision integral fits
pub const T_STAR_MIN: f64 = 0.3;
pub const T_STAR_MAX: f64 = 100.0;
