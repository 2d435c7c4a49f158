//! Dose Service - dose-table use case for the CLI and GUI
//!
//! Holds the loaded catalog and the weight policy from config, resolves
//! free-text drug selections, and drives the form state machine.

use dosecalc_domain::service::form::{DoseForm, FormAction, FormOutcome};
use dosecalc_domain::{calculate_from_input, CalculationResult, DrugCatalog, WeightPolicy};
use dosecalc_types::Result;

use crate::config::Config;
use crate::repository::load_catalog;

/// Selection for a one-shot calculation
#[derive(Debug, Clone, Default)]
pub struct DoseOptions {
    /// Drug name; first catalog drug when unset
    pub drug: Option<String>,

    /// Concentration label; drug's first label when unset or not valid
    pub concentration: Option<String>,
}

impl DoseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_drug(mut self, drug: impl Into<String>) -> Self {
        self.drug = Some(drug.into());
        self
    }

    pub fn with_concentration(mut self, label: impl Into<String>) -> Self {
        self.concentration = Some(label.into());
        self
    }
}

pub struct DoseService {
    catalog: DrugCatalog,
    weight_policy: WeightPolicy,
}

impl DoseService {
    pub fn new(catalog: DrugCatalog, weight_policy: WeightPolicy) -> Self {
        Self {
            catalog,
            weight_policy,
        }
    }

    /// Build the service from config: catalog source and weight policy
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(load_catalog(config)?, config.weight_policy))
    }

    pub fn catalog(&self) -> &DrugCatalog {
        &self.catalog
    }

    pub fn weight_policy(&self) -> WeightPolicy {
        self.weight_policy
    }

    /// Calculate a dose table from raw weight text and an optional selection
    pub fn calculate(&self, weight_text: &str, options: &DoseOptions) -> Result<CalculationResult> {
        let drug = match options.drug.as_deref() {
            Some(name) => self.catalog.find_drug(name)?,
            None => self.catalog.first_drug(),
        };
        let label = options
            .concentration
            .as_deref()
            .unwrap_or_else(|| drug.first_concentration().label.as_str());

        let result = calculate_from_input(
            &self.catalog,
            weight_text,
            drug.name(),
            label,
            self.weight_policy,
        )?;

        if result.concentration_fallback {
            tracing::warn!(
                drug = %result.drug,
                requested = %label,
                used = %result.concentration_label,
                "concentration not available for drug, using first listed"
            );
        }
        tracing::debug!(
            drug = %result.drug,
            concentration = %result.concentration_label,
            weight_kg = result.weight_kg,
            rows = result.rows.len(),
            "dose table calculated"
        );

        Ok(result)
    }

    /// Fresh form with the catalog defaults
    pub fn new_form(&self) -> DoseForm {
        DoseForm::new(&self.catalog)
    }

    /// Apply a user action to a form
    pub fn apply(&self, form: &mut DoseForm, action: FormAction) -> FormOutcome {
        tracing::trace!(?action, "form action");
        let outcome = form.apply(action, &self.catalog, self.weight_policy);
        if let FormOutcome::Rejected(ref message) = outcome {
            tracing::info!(weight_input = %form.weight_input, "calculation rejected: {}", message);
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dosecalc_types::Error;

    fn service() -> DoseService {
        DoseService::new(DrugCatalog::builtin().clone(), WeightPolicy::default())
    }

    #[test]
    fn test_defaults_to_first_drug_and_label() {
        let result = service().calculate("60", &DoseOptions::new()).unwrap();
        assert_eq!(result.drug, "NTG");
        assert_eq!(result.concentration_label, "1:1");
        assert_eq!(result.rows[0].rate_ml_per_hr, 1.8);
    }

    #[test]
    fn test_options_available_from_crate_root() {
        let options = crate::DoseOptions::new().with_drug("Levophed");
        let result = crate::DoseService::new(DrugCatalog::builtin().clone(), WeightPolicy::default())
            .calculate("80", &options)
            .unwrap();
        assert_eq!(result.drug, "Levophed");
    }

    #[test]
    fn test_drug_name_case_insensitive() {
        let options = DoseOptions::new().with_drug("primacor");
        let result = service().calculate("70", &options).unwrap();
        assert_eq!(result.drug, "Primacor");
        assert!(result.loading_dose.is_some());
    }

    #[test]
    fn test_foreign_label_falls_back() {
        let options = DoseOptions::new()
            .with_drug("Dopamine")
            .with_concentration("1:10");
        let result = service().calculate("60", &options).unwrap();
        assert_eq!(result.concentration_label, "1:1");
        assert!(result.concentration_fallback);
    }

    #[test]
    fn test_unknown_drug_is_error() {
        let options = DoseOptions::new().with_drug("Heparin");
        let err = service().calculate("60", &options).unwrap_err();
        assert!(matches!(err, Error::UnknownDrug(_)));
    }

    #[test]
    fn test_policy_applies() {
        let strict = service();
        assert!(strict.calculate("0", &DoseOptions::new()).is_err());

        let lenient = DoseService::new(DrugCatalog::builtin().clone(), WeightPolicy::AllowNonPositive);
        assert!(lenient.calculate("0", &DoseOptions::new()).is_ok());
    }

    #[test]
    fn test_form_roundtrip_through_service() {
        let service = service();
        let mut form = service.new_form();
        service.apply(&mut form, FormAction::DrugChanged("Levophed".to_string()));
        service.apply(&mut form, FormAction::WeightEdited("80".to_string()));
        match service.apply(&mut form, FormAction::Calculate) {
            FormOutcome::Calculated(result) => assert_eq!(result.concentration_label, "2:50"),
            other => panic!("unexpected outcome: {:?}", other),
        }
    }
}
