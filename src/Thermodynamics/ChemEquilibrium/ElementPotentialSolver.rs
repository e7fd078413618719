//! # Element Potential Equilibrium Solver
//!
//! Gibbs energy minimization of an ideal-gas mixture at fixed T and P under conservation of
//! the element inventory, linearized around the current mole fractions (RAND-type scheme with
//! Lagrange multipliers, the "element potentials").
//!
//! With U the NS x NE stoichiometry matrix, g_i = G°_i/(RT) at x = 1, ntot = P/(RT) and N the
//! current moles of mixture per mole of the initial mixture (N = 1 at the start), each
//! iteration solves the (NS+NE) x (NS+NE) linear system
//! ```text
//! | U        diag(-1/x)  | | lambda |   | ln x + g - 1 |
//! | 0        N ntot U^T  | | x_new  | = | b            |
//! ```
//! where b = ntot U^T x0 is the element inventory of the initial mixture. The sum s of the new
//! mole fractions updates N <- N s, then they are renormalized to sum to 1 and the loop stops
//! when ||x_new - x|| < tolerance. Tracking N keeps the element balance consistent with the
//! change of the number of moles, so the converged point is a fixed point of the iteration.
use crate::Thermodynamics::GasMixture::GasMixture;
use crate::Thermodynamics::constants::R;
use crate::Thermodynamics::gas_errors::GasError;
use crate::settings::GasSettings;
use log::{debug, info, warn};
use nalgebra::{DMatrix, DVector};

/// outcome of the equilibrium iteration
#[derive(Debug, Clone, PartialEq)]
pub struct EquilibriumResult {
    /// species names in mixture order
    pub species: Vec<String>,
    /// element symbols in stoichiometry matrix order
    pub elements: Vec<String>,
    /// equilibrium (or last iterate) mole fractions, sum to 1
    pub mole_fractions: Vec<f64>,
    /// Lagrange multipliers of the element balances of the last solve
    pub element_potentials: Vec<f64>,
    /// true if the update norm fell below the tolerance
    pub converged: bool,
    /// number of linear solves performed
    pub iterations: usize,
    /// 2-norm of the last mole fraction update
    pub residual: f64,
    /// moles of the equilibrium mixture per mole of the initial mixture
    pub total_moles: f64,
}

impl EquilibriumResult {
    pub fn mole_fraction_of(&self, name: &str) -> Option<f64> {
        self.species
            .iter()
            .position(|s| s == name)
            .map(|i| self.mole_fractions[i])
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EquilibriumSolver {
    pub max_iterations: usize,
    pub tolerance: f64,
    /// mole fractions are clamped from below to this value before ln(x) and 1/x
    pub mole_fraction_floor: f64,
}

impl Default for EquilibriumSolver {
    fn default() -> Self {
        Self::from_settings(&GasSettings::default())
    }
}

impl EquilibriumSolver {
    pub fn new(max_iterations: usize, tolerance: f64) -> Self {
        Self {
            max_iterations,
            tolerance,
            mole_fraction_floor: GasSettings::default().mole_fraction_floor,
        }
    }

    pub fn from_settings(settings: &GasSettings) -> Self {
        Self {
            max_iterations: settings.equilibrium_max_iterations,
            tolerance: settings.equilibrium_tolerance,
            mole_fraction_floor: settings.mole_fraction_floor,
        }
    }

    /// Equilibrium composition of `mixture` at its T and P, starting from its mole fractions.
    ///
    /// Running out of iterations is reported through `converged = false`, not as an error.
    ///
    /// # Errors
    /// * `SingularMatrix` - the linear system of an iteration can not be solved
    /// * `NumericDomain` - invalid solver controls or a non-finite iterate
    pub fn solve(&self, mixture: &GasMixture) -> Result<EquilibriumResult, GasError> {
        if self.max_iterations == 0 || !(self.tolerance > 0.0) || !(self.mole_fraction_floor > 0.0)
        {
            return Err(GasError::NumericDomain(format!(
                "invalid equilibrium solver controls: {:?}",
                self
            )));
        }
        let T = mixture.temperature();
        let P = mixture.pressure();
        let u = mixture.stoichiometry().to_f64();
        let ns = u.nrows();
        let ne = u.ncols();
        let n = ns + ne;

        let g: Vec<f64> = mixture
            .species()
            .iter()
            .map(|s| s.standard_molar_gibbs_free_energy() / (R * T))
            .collect();
        let ntot = P / (R * T);
        let mut x = DVector::from_column_slice(mixture.mole_fractions());
        let b = u.transpose() * &x * ntot;
        let l = u.transpose() * ntot;
        let mut total_moles = 1.0;

        let mut converged = false;
        let mut iterations = 0;
        let mut residual = f64::INFINITY;
        let mut element_potentials = vec![0.0; ne];
        while iterations < self.max_iterations {
            iterations += 1;
            let x_clamped = x.map(|v| v.max(self.mole_fraction_floor));

            let mut a = DMatrix::<f64>::zeros(n, n);
            a.view_mut((0, 0), (ns, ne)).copy_from(&u);
            for i in 0..ns {
                a[(i, ne + i)] = -1.0 / x_clamped[i];
            }
            a.view_mut((ns, ne), (ne, ns)).copy_from(&(&l * total_moles));
            let mut rhs = DVector::<f64>::zeros(n);
            for i in 0..ns {
                rhs[i] = x_clamped[i].ln() + g[i] - 1.0;
            }
            for j in 0..ne {
                rhs[ns + j] = b[j];
            }

            let solution = a
                .lu()
                .solve(&rhs)
                .ok_or(GasError::SingularMatrix(iterations))?;
            element_potentials = solution.rows(0, ne).iter().copied().collect();
            let x_new = solution.rows(ne, ns).into_owned();
            let sum = x_new.sum();
            if !sum.is_finite() || sum == 0.0 {
                return Err(GasError::NumericDomain(format!(
                    "equilibrium iteration {} produced mole numbers summing to {}",
                    iterations, sum
                )));
            }
            total_moles *= sum;
            let x_new = x_new / sum;
            residual = (&x_new - &x).norm();
            debug!("equilibrium iteration {}: ||dx|| = {:e}", iterations, residual);
            x = x_new;
            if residual < self.tolerance {
                converged = true;
                break;
            }
        }

        if converged {
            info!(
                "equilibrium at T = {} K, P = {} Pa converged in {} iterations",
                T, P, iterations
            );
        } else {
            warn!(
                "equilibrium at T = {} K, P = {} Pa did not converge in {} iterations, ||dx|| = {:e}",
                T, P, iterations, residual
            );
        }
        let names = mixture.species_names();
        for (name, v) in names.iter().zip(x.iter()) {
            if *v < -mixture.composition_tolerance() {
                warn!("negative equilibrium mole fraction of {}: {:e}", name, v);
            } else if *v < 0.0 {
                debug!("round-off negative mole fraction of {}: {:e}", name, v);
            }
        }
        Ok(EquilibriumResult {
            species: names,
            elements: mixture.elements().to_vec(),
            mole_fractions: x.iter().copied().collect(),
            element_potentials,
            converged,
            iterations,
            residual,
            total_moles,
        })
    }
}
