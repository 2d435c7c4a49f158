//! Drug catalog: concentrations, dose steps and loading-dose rules per drug
//!
//! The built-in catalog is compiled in from `drug-catalog.toml`. Alternative
//! catalogs with the same schema can be loaded from TOML text.

use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use dosecalc_types::{CatalogError, Error, Result};
use serde::{Deserialize, Serialize};

use crate::model::{Concentration, DrugEntry, LoadingDoseRule};

/// Container for parsing drug-catalog.toml
#[derive(Debug, Deserialize)]
struct RawCatalog {
    #[serde(default)]
    drugs: Vec<RawDrug>,
}

#[derive(Debug, Deserialize)]
struct RawDrug {
    name: String,
    #[serde(default)]
    concentrations: Vec<Concentration>,
    #[serde(default)]
    dose_steps: Vec<f64>,
    #[serde(default)]
    loading_dose: Option<LoadingDoseRule>,
}

/// Parsed built-in catalog
static BUILTIN: LazyLock<DrugCatalog> = LazyLock::new(|| {
    let raw = include_str!("../drug-catalog.toml");
    DrugCatalog::from_toml_str(raw).expect("Failed to parse built-in drug-catalog.toml")
});

/// Ordered, immutable set of drugs
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DrugCatalog {
    drugs: Vec<DrugEntry>,
}

impl DrugCatalog {
    /// Build a catalog from validated entries
    pub fn new(drugs: Vec<DrugEntry>) -> std::result::Result<Self, CatalogError> {
        if drugs.is_empty() {
            return Err(CatalogError::Empty);
        }
        for (i, drug) in drugs.iter().enumerate() {
            if drugs[..i].iter().any(|d| d.name() == drug.name()) {
                return Err(CatalogError::DuplicateDrug(drug.name().to_string()));
            }
        }
        Ok(Self { drugs })
    }

    /// The catalog shipped with the application
    pub fn builtin() -> &'static DrugCatalog {
        &BUILTIN
    }

    /// Load a catalog from TOML text
    pub fn from_toml_str(content: &str) -> std::result::Result<Self, CatalogError> {
        let raw: RawCatalog =
            toml::from_str(content).map_err(|e| CatalogError::ParseError(e.to_string()))?;

        let drugs = raw
            .drugs
            .into_iter()
            .map(|d| DrugEntry::new(d.name, d.concentrations, d.dose_steps, d.loading_dose))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Self::new(drugs)
    }

    /// Load a catalog from a TOML file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(Self::from_toml_str(&content)?)
    }

    pub fn drugs(&self) -> &[DrugEntry] {
        &self.drugs
    }

    pub fn drug_names(&self) -> impl Iterator<Item = &str> {
        self.drugs.iter().map(|d| d.name())
    }

    /// Default selection for a fresh form
    pub fn first_drug(&self) -> &DrugEntry {
        &self.drugs[0]
    }

    /// Exact-name lookup
    pub fn drug(&self, name: &str) -> Option<&DrugEntry> {
        self.drugs.iter().find(|d| d.name() == name)
    }

    /// Lookup for free-text input: exact match first, then case-insensitive
    pub fn find_drug(&self, name: &str) -> Result<&DrugEntry> {
        let name = name.trim();
        self.drug(name)
            .or_else(|| self.drugs.iter().find(|d| d.name().eq_ignore_ascii_case(name)))
            .ok_or_else(|| Error::UnknownDrug(name.to_string()))
    }

    pub fn len(&self) -> usize {
        self.drugs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drugs.is_empty()
    }
}
