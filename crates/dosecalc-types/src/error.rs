//! Error types for dosecalc

use thiserror::Error;

/// Reasons a weight entry is rejected
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WeightError {
    #[error("weight is missing")]
    Missing,

    #[error("weight is not a number: {0:?}")]
    NotANumber(String),

    #[error("weight must be greater than zero, got {0}")]
    NotPositive(f64),
}

impl WeightError {
    /// Message shown to the person entering the weight
    pub fn user_message(&self) -> &'static str {
        match self {
            WeightError::Missing => "Please enter the patient's weight",
            WeightError::NotANumber(_) => "Weight must be a number, e.g. 60.00",
            WeightError::NotPositive(_) => "Weight must be greater than zero",
        }
    }
}

/// Drug catalog loading and validation errors
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to parse drug catalog: {0}")]
    ParseError(String),

    #[error("Drug catalog is empty")]
    Empty,

    #[error("Duplicate drug in catalog: {0}")]
    DuplicateDrug(String),

    #[error("Drug {0} has no concentrations")]
    NoConcentrations(String),

    #[error("Drug {0} has no dose steps")]
    NoDoseSteps(String),

    #[error("Drug {drug} lists concentration {label} more than once")]
    DuplicateConcentration { drug: String, label: String },

    #[error("Drug {drug}: invalid value for {field}: {value}")]
    InvalidValue {
        drug: String,
        field: String,
        value: f64,
    },
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration directory not found")]
    NotFound,

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid weight: {0}")]
    InvalidWeight(#[from] WeightError),

    #[error("Unknown drug: {0}")]
    UnknownDrug(String),

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Export error: {0}")]
    Export(String),
}

impl Error {
    /// Message suitable for showing in a form next to the inputs
    pub fn user_message(&self) -> String {
        match self {
            Error::InvalidWeight(e) => e.user_message().to_string(),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
