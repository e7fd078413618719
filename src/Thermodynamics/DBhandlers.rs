/// contracts of the data sources: thermo, transport, stoichiometry, collision integrals
pub mod data_api;
/// NASA-7 polynomials
pub mod NASAdata;

pub mod TRANSPORTdata;
/// chemical formula parser and molar masses
pub mod molmass;

pub mod gas_database;
