use crate::Thermodynamics::GasMixture::GasMixture;
use prettytable::{Cell, Row, Table, row};

impl GasMixture {
    ////////////////////////INPUT/OUTPUT////////////////////////////////////////////////////////

    /// Table of species properties at the current state, one row per species
    pub fn pretty_print(&self) -> Table {
        let mut table = Table::new();
        table.add_row(row![
            "species", "x", "y", "M", "Cp", "H", "S", "G", "mu", "lambda", "D_mix",
        ]);
        let d_mix = self.mixture_diffusion_coefficients();
        for (i, s) in self.species().iter().enumerate() {
            table.add_row(Row::new(vec![
                Cell::new(s.name()),
                Cell::new(&format!("{:.6}", self.mole_fractions()[i])),
                Cell::new(&format!("{:.6}", self.mass_fractions()[i])),
                Cell::new(&format!("{:.4}", s.molar_mass())),
                Cell::new(&format!("{:.6e}", s.molar_cp())),
                Cell::new(&format!("{:.6e}", s.molar_enthalpy())),
                Cell::new(&format!("{:.6e}", s.molar_entropy())),
                Cell::new(&format!("{:.6e}", s.molar_gibbs_free_energy())),
                Cell::new(&format!("{:.6e}", s.viscosity())),
                Cell::new(&format!("{:.6e}", s.thermal_conductivity())),
                Cell::new(&format!("{:.6e}", d_mix[i])),
            ]));
        }
        table
    }

    /// Table of mixture-level properties
    pub fn mixture_table(&self) -> Table {
        let mut table = Table::new();
        table.add_row(row!["property", "value", "units"]);
        let rows = [
            ("T", self.temperature(), "K"),
            ("P", self.pressure(), "Pa"),
            ("M", self.molar_mass(), "kg/kmol"),
            ("density", self.density(), "kg/m3"),
            ("Cp", self.molar_cp(), "J/kmol/K"),
            ("H", self.molar_enthalpy(), "J/kmol"),
            ("S", self.molar_entropy(), "J/kmol/K"),
            ("U", self.molar_internal_energy(), "J/kmol"),
            ("G", self.molar_gibbs_free_energy(), "J/kmol"),
            ("cp", self.mass_cp(), "J/kg/K"),
            ("h", self.mass_enthalpy(), "J/kg"),
            ("s", self.mass_entropy(), "J/kg/K"),
            ("viscosity", self.viscosity(), "Pa*s"),
            ("conductivity", self.thermal_conductivity(), "W/m/K"),
        ];
        for (name, value, units) in rows {
            table.add_row(row![name, format!("{:.6e}", value), units]);
        }
        table
    }

    /// Species x elements matrix of atom counts
    pub fn element_table(&self) -> Table {
        let mut table = Table::new();
        let mut header_row = vec![Cell::new("Substances/Elements")];
        for el in self.elements() {
            header_row.push(Cell::new(el));
        }
        table.add_row(Row::new(header_row));
        let u = self.stoichiometry();
        for (i, s) in self.species().iter().enumerate() {
            let mut row = vec![Cell::new(s.name())];
            for j in 0..u.n_elements() {
                row.push(Cell::new(&u.atoms(i, j).to_string()));
            }
            table.add_row(Row::new(row));
        }
        table
    }

    /// Prints all tables to stdout
    pub fn print_summary(&self) {
        println!(
            "__________gas mixture at T = {} K, P = {} Pa__________",
            self.temperature(),
            self.pressure()
        );
        self.pretty_print().printstd();
        self.mixture_table().printstd();
        println!("___________________ELEMENT COMPOSITION MATRIX________________________");
        self.element_table().printstd();
        println!("_____________________________________________________________");
    }
}
