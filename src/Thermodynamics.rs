/// module for chemical equilibrium of gas mixtures
pub mod ChemEquilibrium;
#[allow(non_snake_case)]
/// handlers for thermodynamics and heat-mass transfer data of gases
pub mod DBhandlers;
/// thermodynamic state: temperature and pressure
pub mod GasState;
/// ideal gas species: thermo and transport properties at a state
/// # Examples
/// ```
/// use GasMix::Thermodynamics::DBhandlers::gas_database::GasDatabase;
/// use GasMix::Thermodynamics::GasSpecies::Species;
/// use GasMix::Thermodynamics::GasState::GasState;
/// let db = GasDatabase::builtin().unwrap();
/// let mut h2 = Species::new("H2", GasState::new(393.15, 4e5).unwrap(), &db).unwrap();
/// println!("Cp = {} J/kmol/K", h2.molar_cp());
/// println!("viscosity = {} Pa*s", h2.viscosity());
/// println!("D = {} m2/s", h2.self_diffusion_coefficient());
/// // new state drops all cached values
/// h2.update_gas_state(GasState::new(1500.0, 1e5).unwrap());
/// assert!(h2.viscosity() > 1.0743e-5);
/// ```
pub mod GasSpecies;
/// species list with mole/mass fractions and element composition matrix
pub mod GasComposition;
/// ideal gas mixture: mixing rules for thermo and transport properties
pub mod GasMixture;
mod GasMixtureOutput;
/// physical constants and unit conventions
pub mod constants;
pub mod gas_errors;
