use crate::Thermodynamics::DBhandlers::data_api::{DataError, ElementComposition};
use nalgebra::DMatrix;
/// Module to calculate the atomic composition and molar mass of a chemical formula
///
/// Formulas may contain parenthesised groups with multipliers, e.g. Ca(NO3)2, and a phase mark
/// at the end, e.g. H2O(g). Elements are reported in order of their first appearance.
use regex::Regex;
use std::sync::LazyLock;

// Define a struct to hold element data
pub struct Element {
    name: &'static str,
    atomic_mass: f64,
}

// Define a list of elements and their atomic masses
const ELEMENTS: &[Element] = &[
    Element {
        name: "H",
        atomic_mass: 1.00794,
    },
    Element {
        name: "He",
        atomic_mass: 4.002602,
    },
    Element {
        name: "Li",
        atomic_mass: 6.94,
    },
    Element {
        name: "Be",
        atomic_mass: 9.0122,
    },
    Element {
        name: "B",
        atomic_mass: 10.81,
    },
    Element {
        name: "C",
        atomic_mass: 12.0107,
    },
    Element {
        name: "N",
        atomic_mass: 14.0067,
    },
    Element {
        name: "O",
        atomic_mass: 15.9994,
    },
    Element {
        name: "F",
        atomic_mass: 18.998,
    },
    Element {
        name: "Ne",
        atomic_mass: 20.18,
    },
    Element {
        name: "Na",
        atomic_mass: 22.99,
    },
    Element {
        name: "Mg",
        atomic_mass: 24.305,
    },
    Element {
        name: "Al",
        atomic_mass: 26.98,
    },
    Element {
        name: "Si",
        atomic_mass: 28.085,
    },
    Element {
        name: "P",
        atomic_mass: 30.974,
    },
    Element {
        name: "S",
        atomic_mass: 32.065,
    },
    Element {
        name: "Cl",
        atomic_mass: 35.45,
    },
    Element {
        name: "Ar",
        atomic_mass: 39.948,
    },
    Element {
        name: "K",
        atomic_mass: 39.102,
    },
    Element {
        name: "Ca",
        atomic_mass: 40.08,
    },
    Element {
        name: "Ti",
        atomic_mass: 47.867,
    },
    Element {
        name: "Cr",
        atomic_mass: 51.9961,
    },
    Element {
        name: "Fe",
        atomic_mass: 55.845,
    },
    Element {
        name: "Ni",
        atomic_mass: 58.69,
    },
    Element {
        name: "Cu",
        atomic_mass: 63.546,
    },
    Element {
        name: "Kr",
        atomic_mass: 83.798,
    },
    Element {
        name: "Xe",
        atomic_mass: 131.293,
    },
];

/// element with optional count, open bracket, close bracket with optional multiplier
static FORMULA_TOKEN: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"([A-Z][a-z]?)(\d*)|(\()|(\))(\d*)"));

pub fn atomic_mass(symbol: &str) -> Option<f64> {
    ELEMENTS
        .iter()
        .find(|e| e.name == symbol)
        .map(|e| e.atomic_mass)
}

fn parse_error(formula: &str, what: &str) -> DataError {
    DataError::ParseError(format!("formula '{}': {}", formula, what))
}

fn filter_phases_marks(formula: &str) -> String {
    let formula: String = formula.chars().filter(|c| !c.is_whitespace()).collect();
    for phase in ["(g)", "(G)", "(l)", "(L)", "(s)", "(c)", "(C)"] {
        if let Some(stripped) = formula.strip_suffix(phase) {
            return stripped.to_string();
        }
    }
    formula
}

/// adds `count` atoms of `element` keeping first-appearance order
fn add_atoms(counts: &mut ElementComposition, element: &str, count: usize) {
    match counts.iter_mut().find(|(el, _)| el == element) {
        Some((_, n)) => *n += count,
        None => counts.push((element.to_string(), count)),
    }
}

fn multiplier(digits: &str) -> Result<usize, std::num::ParseIntError> {
    if digits.is_empty() { Ok(1) } else { digits.parse() }
}

/// Parses a chemical formula into an ordered list of (element, number of atoms)
pub fn parse_formula(formula: &str) -> Result<ElementComposition, DataError> {
    let cleaned = filter_phases_marks(formula);
    if cleaned.is_empty() {
        return Err(parse_error(formula, "empty formula"));
    }
    let re = FORMULA_TOKEN
        .as_ref()
        .map_err(|e| DataError::ParseError(e.to_string()))?;
    // one composition per open bracket level
    let mut stack: Vec<ElementComposition> = vec![Vec::new()];
    let mut position = 0;
    for caps in re.captures_iter(&cleaned) {
        let Some(whole) = caps.get(0) else { continue };
        if whole.start() != position {
            return Err(parse_error(
                formula,
                &format!("unexpected symbol at position {}", position),
            ));
        }
        position = whole.end();
        if let Some(el) = caps.get(1) {
            let symbol = el.as_str();
            if atomic_mass(symbol).is_none() {
                return Err(parse_error(formula, &format!("unknown element '{}'", symbol)));
            }
            let n = multiplier(caps.get(2).map_or("", |m| m.as_str()))
                .map_err(|e| parse_error(formula, &e.to_string()))?;
            if let Some(top) = stack.last_mut() {
                add_atoms(top, symbol, n);
            }
        } else if caps.get(3).is_some() {
            stack.push(Vec::new());
        } else {
            let n = multiplier(caps.get(5).map_or("", |m| m.as_str()))
                .map_err(|e| parse_error(formula, &e.to_string()))?;
            if stack.len() < 2 {
                return Err(parse_error(formula, "unbalanced ')'"));
            }
            let group = stack.pop().unwrap_or_default();
            if let Some(top) = stack.last_mut() {
                for (el, count) in group {
                    add_atoms(top, &el, count * n);
                }
            }
        }
    }
    if position != cleaned.len() {
        return Err(parse_error(
            formula,
            &format!("unexpected symbol at position {}", position),
        ));
    }
    if stack.len() != 1 {
        return Err(parse_error(formula, "unbalanced '('"));
    }
    let counts = stack.pop().unwrap_or_default();
    if counts.is_empty() {
        return Err(parse_error(formula, "no elements found"));
    }
    Ok(counts)
}

// Function to calculate the molar mass of a substance given its chemical formula
pub fn calculate_molar_mass(formula: &str) -> Result<(f64, ElementComposition), DataError> {
    let counts = parse_formula(formula)?;
    let mut molar_mass = 0.0;
    for (element, count) in counts.iter() {
        let m = atomic_mass(element).ok_or_else(|| DataError::NotFound {
            what: "element",
            key: element.clone(),
        })?;
        molar_mass += m * *count as f64;
    }
    Ok((molar_mass, counts))
}

/// species x elements matrix of atom counts; element columns in order of first appearance
/// across the list of compositions
pub fn create_elem_composition_matrix(
    compositions: &[ElementComposition],
) -> (DMatrix<u32>, Vec<String>) {
    let mut unique_vec_of_elems: Vec<String> = Vec::new();
    for composition in compositions {
        for (el, _) in composition {
            if !unique_vec_of_elems.contains(el) {
                unique_vec_of_elems.push(el.clone());
            }
        }
    }
    let mut matrix = DMatrix::<u32>::zeros(compositions.len(), unique_vec_of_elems.len());
    for (substance_i, composition) in compositions.iter().enumerate() {
        for (el, count) in composition {
            if let Some(j) = unique_vec_of_elems.iter().position(|e| e == el) {
                matrix[(substance_i, j)] += *count as u32;
            }
        }
    }
    (matrix, unique_vec_of_elems)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn comp(pairs: &[(&str, usize)]) -> ElementComposition {
        pairs.iter().map(|(e, n)| (e.to_string(), *n)).collect()
    }

    #[test]
    fn test_parse_formula() {
        assert_eq!(
            parse_formula("C6H8O6").unwrap(),
            comp(&[("C", 6), ("H", 8), ("O", 6)])
        );
        assert_eq!(
            parse_formula("Na(NO3)2").unwrap(),
            comp(&[("Na", 1), ("N", 2), ("O", 6)])
        );
        assert_eq!(parse_formula("H2O").unwrap(), comp(&[("H", 2), ("O", 1)]));
        assert_eq!(
            parse_formula("C5H6OOH").unwrap(),
            comp(&[("C", 5), ("H", 7), ("O", 2)])
        );
        assert_eq!(parse_formula("CO2").unwrap(), comp(&[("C", 1), ("O", 2)]));
        assert_eq!(parse_formula("Ar").unwrap(), comp(&[("Ar", 1)]));
    }

    #[test]
    fn test_nested_groups_and_phase_marks() {
        assert_eq!(
            parse_formula("C(OOH)2N(ClO)3").unwrap(),
            comp(&[("C", 1), ("O", 7), ("H", 2), ("N", 1), ("Cl", 3)])
        );
        assert_eq!(
            parse_formula("Ca((OH)2)2").unwrap(),
            comp(&[("Ca", 1), ("O", 4), ("H", 4)])
        );
        assert_eq!(parse_formula("H2O(g)").unwrap(), comp(&[("H", 2), ("O", 1)]));
    }

    #[test]
    fn test_formula_token_is_shared() {
        let first = FORMULA_TOKEN.as_ref().unwrap() as *const Regex;
        for _ in 0..3 {
            assert_eq!(parse_formula("CH4").unwrap(), comp(&[("C", 1), ("H", 4)]));
        }
        assert_eq!(FORMULA_TOKEN.as_ref().unwrap() as *const Regex, first);
        // failures do not poison the compiled pattern
        assert!(parse_formula("Q").is_err());
        assert_eq!(parse_formula("N2").unwrap(), comp(&[("N", 2)]));
    }

    #[test]
    fn test_bad_formulas() {
        assert!(matches!(parse_formula(""), Err(DataError::ParseError(_))));
        assert!(matches!(parse_formula("Xx2"), Err(DataError::ParseError(_))));
        assert!(matches!(parse_formula("H2(O"), Err(DataError::ParseError(_))));
        assert!(matches!(parse_formula("H2)O"), Err(DataError::ParseError(_))));
        assert!(matches!(parse_formula("h2o"), Err(DataError::ParseError(_))));
    }

    #[test]
    fn test_calculate_molar_mass() {
        let (m, _) = calculate_molar_mass("H2O(g)").unwrap();
        assert!((m - 18.01528).abs() < 1e-2);
        let (m, _) = calculate_molar_mass("NaCl").unwrap();
        assert!((m - 58.44).abs() < 1e-2);
        let (m, _) = calculate_molar_mass("C6H8O6").unwrap();
        assert!((m - 176.12).abs() < 1e-2);
        let (m, _) = calculate_molar_mass("Ca(NO3)2").unwrap();
        assert!((m - 164.093).abs() < 1e-2);
        let (m, _) = calculate_molar_mass("N2").unwrap();
        assert!((m - 28.0134).abs() < 1e-3);
    }

    #[test]
    fn test_element_matrix() {
        let compositions: Vec<ElementComposition> = ["CO", "CO2", "O2", "H2O"]
            .iter()
            .map(|f| parse_formula(f).unwrap())
            .collect();
        let (matrix, elements) = create_elem_composition_matrix(&compositions);
        assert_eq!(elements, vec!["C", "O", "H"]);
        assert_eq!(matrix.nrows(), 4);
        assert_eq!(matrix.ncols(), 3);
        assert_eq!(matrix[(1, 1)], 2);
        assert_eq!(matrix[(2, 0)], 0);
        assert_eq!(matrix[(3, 2)], 2);
    }
}
