//! Application service layer - config, catalog source, export

pub mod app;
pub mod config;
pub mod export;
pub mod repository;

pub use app::{DoseOptions, DoseService};
pub use config::Config;
