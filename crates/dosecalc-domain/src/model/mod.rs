//! Domain model types

pub mod calculation;
pub mod drug;
pub mod weight;

pub use calculation::{CalculationRequest, CalculationResult, DoseRow, LoadingDoseResult};
pub use drug::{Concentration, DrugEntry, LoadingDoseRule};
pub use weight::WeightPolicy;
