use super::ElementPotentialSolver::EquilibriumResult;
use prettytable::{Cell, Row, Table, row};

impl EquilibriumResult {
    /// Equilibrium mole fractions, element potentials and convergence report
    pub fn pretty_print(&self) -> Table {
        let mut table = Table::new();
        table.add_row(row!["species", "x"]);
        for (name, x) in self.species.iter().zip(&self.mole_fractions) {
            table.add_row(row![name, format!("{:.6e}", x)]);
        }
        table.add_row(row!["element", "potential"]);
        for (el, lambda) in self.elements.iter().zip(&self.element_potentials) {
            table.add_row(row![el, format!("{:.6e}", lambda)]);
        }
        table.add_row(Row::new(vec![
            Cell::new("converged"),
            Cell::new(&format!(
                "{} ({} iterations, ||dx|| = {:.3e})",
                self.converged, self.iterations, self.residual
            )),
        ]));
        table.add_row(row!["moles/initial mole", format!("{:.6}", self.total_moles)]);
        table
    }

    pub fn print_summary(&self) {
        println!("___________________CHEMICAL EQUILIBRIUM________________________");
        self.pretty_print().printstd();
        println!("_____________________________________________________________");
    }
}
