//! Use cases for hosting shells

pub mod dose_service;

pub use dose_service::{DoseOptions, DoseService};
