///module for chemical equilibrium of ideal gas mixtures by the element potential method
/// # Examples
/// ```
/// use GasMix::Thermodynamics::ChemEquilibrium::ElementPotentialSolver::EquilibriumSolver;
/// use GasMix::Thermodynamics::DBhandlers::gas_database::GasDatabase;
/// use GasMix::Thermodynamics::GasComposition::FractionBasis;
/// use GasMix::Thermodynamics::GasMixture::GasMixture;
/// use GasMix::Thermodynamics::GasState::GasState;
/// use GasMix::settings::GasSettings;
/// let db = GasDatabase::builtin().unwrap();
/// let settings = GasSettings::default();
/// let gas = GasMixture::from_names(
///     &[("CO", 0.1), ("CO2", 0.2), ("O2", 0.7)],
///     FractionBasis::Mole,
///     GasState::new(3000.0, 4e5).unwrap(),
///     &db,
///     &settings,
/// )
/// .unwrap();
/// let solver = EquilibriumSolver::from_settings(&settings);
/// // equilibrium composition as a new mixture at the same T and P
/// let (equilibrium, report) = gas.equilibrate(&solver).unwrap();
/// assert!(report.converged);
/// let x_co = report.mole_fraction_of("CO").unwrap();
/// assert!((x_co - 0.05112).abs() < 1e-4);
/// assert_eq!(equilibrium.mole_fractions()[0], x_co);
/// report.print_summary();
/// ```
pub mod ElementPotentialSolver;
mod ElementPotentialSolver_tests;
mod EquilibriumOutput;
