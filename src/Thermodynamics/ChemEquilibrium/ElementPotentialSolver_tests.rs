#[cfg(test)]
mod tests {
    use crate::Thermodynamics::ChemEquilibrium::ElementPotentialSolver::EquilibriumSolver;
    use crate::Thermodynamics::DBhandlers::gas_database::GasDatabase;
    use crate::Thermodynamics::GasComposition::FractionBasis;
    use crate::Thermodynamics::GasMixture::GasMixture;
    use crate::Thermodynamics::GasState::GasState;
    use crate::Thermodynamics::gas_errors::GasError;
    use crate::Utils::logger::init_logger;
    use crate::settings::GasSettings;
    use approx::assert_relative_eq;
    use log::LevelFilter;

    fn mixture(entries: &[(&str, f64)], T: f64, P: f64) -> GasMixture {
        let db = GasDatabase::builtin().unwrap();
        GasMixture::from_names(
            entries,
            FractionBasis::Mole,
            GasState::new(T, P).unwrap(),
            &db,
            &GasSettings::default(),
        )
        .unwrap()
    }

    fn co_co2_o2() -> GasMixture {
        mixture(&[("CO", 0.1), ("CO2", 0.2), ("O2", 0.7)], 3000.0, 4e5)
    }

    /// atoms of each element per mole of mixture times total moles
    fn element_amounts(mixture: &GasMixture, x: &[f64], total_moles: f64) -> Vec<f64> {
        let u = mixture.stoichiometry();
        (0..u.n_elements())
            .map(|j| {
                (0..u.n_species())
                    .map(|i| u.atoms(i, j) as f64 * x[i] * total_moles)
                    .sum()
            })
            .collect()
    }

    #[test]
    fn test_co_co2_o2_at_3000K() {
        init_logger(LevelFilter::Debug);
        let gas = co_co2_o2();
        let result = EquilibriumSolver::default().solve(&gas).unwrap();
        assert!(result.converged);
        assert!(result.iterations <= 10);
        assert!(result.residual < 1e-6);
        assert_eq!(result.species, vec!["CO", "CO2", "O2"]);
        assert_eq!(result.elements, vec!["C", "O"]);

        let co = result.mole_fraction_of("CO").unwrap();
        let co2 = result.mole_fraction_of("CO2").unwrap();
        let o2 = result.mole_fraction_of("O2").unwrap();
        assert!((co - 0.05112).abs() < 5e-5);
        assert!((co2 - 0.25660).abs() < 5e-5);
        assert!((o2 - 0.69228).abs() < 5e-5);
        assert_relative_eq!(co + co2 + o2, 1.0, epsilon = 1e-12);
        // CO + 1/2 O2 -> CO2 reduces the number of moles
        assert_relative_eq!(result.total_moles, 0.974915, max_relative = 1e-4);
        assert_relative_eq!(result.element_potentials[0], -20.544, max_relative = 1e-3);
        assert_relative_eq!(result.element_potentials[1], -14.634, max_relative = 1e-3);
        assert!(result.mole_fraction_of("N2").is_none());
    }

    #[test]
    fn test_element_inventory_is_conserved() {
        let gas = co_co2_o2();
        let result = gas
            .calculate_chemical_equilibrium_TP(&EquilibriumSolver::default())
            .unwrap();
        let initial = element_amounts(&gas, gas.mole_fractions(), 1.0);
        let final_ = element_amounts(&gas, &result.mole_fractions, result.total_moles);
        assert_relative_eq!(initial[0], 0.3, epsilon = 1e-12);
        assert_relative_eq!(initial[1], 1.9, epsilon = 1e-12);
        for (a, b) in initial.iter().zip(&final_) {
            assert_relative_eq!(*a, *b, max_relative = 1e-6);
        }
        // O/C ratio does not depend on the total number of moles
        let ratio = element_amounts(&gas, &result.mole_fractions, 1.0);
        assert_relative_eq!(ratio[1] / ratio[0], 1.9 / 0.3, max_relative = 1e-6);
    }

    #[test]
    fn test_equilibrium_is_a_fixed_point() {
        let gas = co_co2_o2();
        let solver = EquilibriumSolver::default();
        let (equilibrium, first) = gas.equilibrate(&solver).unwrap();
        assert_eq!(equilibrium.mole_fractions(), first.mole_fractions.as_slice());
        assert_eq!(equilibrium.temperature(), 3000.0);
        assert_eq!(equilibrium.pressure(), 4e5);

        let second = solver.solve(&equilibrium).unwrap();
        assert!(second.converged);
        assert!(second.iterations <= 2);
        for (a, b) in first.mole_fractions.iter().zip(&second.mole_fractions) {
            assert!((a - b).abs() < 1e-5);
        }
        assert_relative_eq!(second.total_moles, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_h2_o2_h2o_at_3000K() {
        let gas = mixture(&[("H2", 0.3), ("O2", 0.2), ("H2O", 0.5)], 3000.0, 1e5);
        let result = EquilibriumSolver::default().solve(&gas).unwrap();
        assert!(result.converged);
        assert!((result.mole_fraction_of("H2").unwrap() - 0.106497).abs() < 1e-4);
        assert!((result.mole_fraction_of("O2").unwrap() - 0.108940).abs() < 1e-4);
        assert!((result.mole_fraction_of("H2O").unwrap() - 0.784563).abs() < 1e-4);
        let amounts = element_amounts(&gas, &result.mole_fractions, 1.0);
        assert_relative_eq!(amounts[0] / amounts[1], 1.6 / 0.9, max_relative = 1e-6);
    }

    #[test]
    fn test_inert_species_keeps_its_moles() {
        let gas = mixture(
            &[("CO", 0.1), ("CO2", 0.2), ("O2", 0.4), ("N2", 0.3)],
            3000.0,
            4e5,
        );
        let result = EquilibriumSolver::default().solve(&gas).unwrap();
        assert!(result.converged);
        let n2 = result.mole_fraction_of("N2").unwrap();
        assert_relative_eq!(n2 * result.total_moles, 0.3, max_relative = 1e-6);
        assert!((result.mole_fraction_of("CO").unwrap() - 0.064189).abs() < 1e-4);
    }

    #[test]
    fn test_low_temperature_drives_co_to_zero() {
        let gas = mixture(&[("CO", 0.1), ("CO2", 0.2), ("O2", 0.7)], 1500.0, 4e5);
        let solver = EquilibriumSolver::new(30, 1e-6);
        let result = solver.solve(&gas).unwrap();
        assert!(result.converged);
        assert!(result.mole_fraction_of("CO").unwrap() < 1e-10);
        assert_relative_eq!(
            result.mole_fraction_of("CO2").unwrap(),
            0.3 / 0.95,
            max_relative = 1e-6
        );
        assert_relative_eq!(result.total_moles, 0.95, max_relative = 1e-6);
    }

    #[test]
    fn test_equilibrate_drops_round_off_negatives() {
        // oxygen is used up: x_O2 ends a few 1e-15 below zero
        let gas = mixture(
            &[
                ("CH4", 0.1),
                ("O2", 0.2),
                ("CO2", 0.05),
                ("H2O", 0.05),
                ("CO", 0.05),
                ("H2", 0.05),
                ("N2", 0.5),
            ],
            800.0,
            1e5,
        );
        let solver = EquilibriumSolver::new(50, 1e-8);
        let (equilibrium, result) = gas.equilibrate(&solver).unwrap();
        assert!(result.converged);
        assert!(equilibrium.mole_fractions().iter().all(|x| *x >= 0.0));
        assert_eq!(equilibrium.mole_fractions(), result.mole_fractions.as_slice());
        assert_relative_eq!(
            equilibrium.mole_fractions().iter().sum::<f64>(),
            1.0,
            epsilon = 1e-12
        );
        assert!(result.mole_fraction_of("O2").unwrap() < 1e-10);
        assert_relative_eq!(result.mole_fraction_of("N2").unwrap(), 0.5, max_relative = 1e-6);
        let initial = element_amounts(&gas, gas.mole_fractions(), 1.0);
        let final_ = element_amounts(&gas, &result.mole_fractions, result.total_moles);
        for (a, b) in initial.iter().zip(&final_) {
            assert_relative_eq!(*a, *b, max_relative = 1e-6);
        }
    }

    #[test]
    fn test_iteration_budget_is_reported_not_raised() {
        let gas = co_co2_o2();
        let solver = EquilibriumSolver::new(1, 1e-12);
        let result = solver.solve(&gas).unwrap();
        assert!(!result.converged);
        assert_eq!(result.iterations, 1);
        assert!(result.residual > 1e-12);
        assert_relative_eq!(result.mole_fractions.iter().sum::<f64>(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_single_species_is_singular() {
        let gas = mixture(&[("CO", 1.0)], 3000.0, 4e5);
        let err = EquilibriumSolver::default().solve(&gas).unwrap_err();
        assert!(matches!(err, GasError::SingularMatrix(1)));
    }

    #[test]
    fn test_invalid_solver_controls() {
        let gas = co_co2_o2();
        for solver in [
            EquilibriumSolver::new(0, 1e-6),
            EquilibriumSolver::new(10, 0.0),
            EquilibriumSolver::new(10, f64::NAN),
            EquilibriumSolver {
                mole_fraction_floor: -1.0,
                ..EquilibriumSolver::default()
            },
        ] {
            assert!(matches!(solver.solve(&gas), Err(GasError::NumericDomain(_))));
        }
    }

    #[test]
    fn test_solver_from_settings() {
        let settings = GasSettings {
            equilibrium_max_iterations: 25,
            equilibrium_tolerance: 1e-9,
            ..GasSettings::default()
        };
        let solver = EquilibriumSolver::from_settings(&settings);
        assert_eq!(solver.max_iterations, 25);
        assert_eq!(solver.tolerance, 1e-9);
        assert_eq!(solver.mole_fraction_floor, 1e-16);
        assert_eq!(EquilibriumSolver::default().max_iterations, 10);
        let result = solver.solve(&co_co2_o2()).unwrap();
        assert!(result.converged);
        assert!(result.residual < 1e-9);
    }

    #[test]
    fn test_pretty_print() {
        let result = EquilibriumSolver::default().solve(&co_co2_o2()).unwrap();
        let table = result.pretty_print();
        // header, 3 species, header, 2 elements, convergence, moles
        assert_eq!(table.len(), 9);
        let text = table.to_string();
        assert!(text.contains("CO2"));
        assert!(text.contains("converged"));
    }
}
