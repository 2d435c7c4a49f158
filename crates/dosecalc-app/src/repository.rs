//! Drug catalog repositories

use std::path::PathBuf;

use dosecalc_domain::{DrugCatalog, DrugCatalogRepository};
use dosecalc_types::{Error, Result};

use crate::config::Config;

/// Catalog compiled into the application
#[derive(Debug, Default, Clone, Copy)]
pub struct BuiltinCatalogRepository;

impl DrugCatalogRepository for BuiltinCatalogRepository {
    fn load_catalog(&self) -> std::result::Result<DrugCatalog, Error> {
        Ok(DrugCatalog::builtin().clone())
    }

    fn describe(&self) -> String {
        "built-in".to_string()
    }
}

/// File-based drug catalog repository (TOML)
#[derive(Debug, Clone)]
pub struct FileCatalogRepository {
    toml_path: PathBuf,
}

impl FileCatalogRepository {
    pub fn new(toml_path: PathBuf) -> Self {
        Self { toml_path }
    }
}

impl DrugCatalogRepository for FileCatalogRepository {
    fn load_catalog(&self) -> std::result::Result<DrugCatalog, Error> {
        DrugCatalog::load_from_file(&self.toml_path)
    }

    fn describe(&self) -> String {
        self.toml_path.display().to_string()
    }
}

/// Open the catalog repository selected by the config
pub fn open_catalog_repo(config: &Config) -> Box<dyn DrugCatalogRepository> {
    match &config.catalog_path {
        Some(path) => Box::new(FileCatalogRepository::new(path.clone())),
        None => Box::new(BuiltinCatalogRepository),
    }
}

/// Load the catalog selected by the config
pub fn load_catalog(config: &Config) -> Result<DrugCatalog> {
    let repo = open_catalog_repo(config);
    let catalog = repo.load_catalog()?;
    tracing::debug!(source = %repo.describe(), drugs = catalog.len(), "drug catalog loaded");
    Ok(catalog)
}
