//! Domain layer for dosecalc
//!
//! Reference data (drug catalog), the dose-table calculation and the form
//! state machine that hosting shells drive.

pub mod catalog;
pub mod model;
pub mod repository;
pub mod service;

pub use catalog::DrugCatalog;
pub use model::*;
pub use repository::DrugCatalogRepository;
pub use service::{calculate, calculate_from_input, parse_weight};
