//! Domain services

pub mod dose_calculator;
pub mod form;
pub mod weight;

pub use dose_calculator::{calculate, calculate_from_input, calculate_rate, round2};
pub use form::{DoseForm, FormAction, FormOutcome};
pub use weight::parse_weight;
