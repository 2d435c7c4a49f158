//! Repository trait definitions for reference data

use dosecalc_types::Error;

use crate::catalog::DrugCatalog;

/// Source of the drug catalog used for calculations
pub trait DrugCatalogRepository {
    /// Load the full catalog
    fn load_catalog(&self) -> Result<DrugCatalog, Error>;

    /// Short description of where the catalog comes from, for display
    fn describe(&self) -> String;
}
