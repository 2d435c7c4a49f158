//! Dose form state machine
//!
//! Hosting shells keep one `DoseForm` per page and feed it user actions. The
//! concentration label is revalidated on every drug change, so the form never
//! holds a label that does not belong to the selected drug.

use serde::{Deserialize, Serialize};

use crate::catalog::DrugCatalog;
use crate::model::{CalculationResult, WeightPolicy};
use crate::service::dose_calculator::calculate_from_input;

/// Current values of the three form inputs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoseForm {
    pub drug: String,
    pub concentration: String,
    /// Raw weight text; empty means not yet provided
    pub weight_input: String,
}

/// User actions on the form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormAction {
    DrugChanged(String),
    ConcentrationChanged(String),
    WeightEdited(String),
    Calculate,
    Reset,
}

/// What the shell should render after an action
#[derive(Debug, Clone, PartialEq)]
pub enum FormOutcome {
    /// Inputs changed, nothing to render
    Updated,
    /// Drug or concentration changed; any shown table is stale
    SelectionChanged,
    /// Calculation succeeded
    Calculated(CalculationResult),
    /// Calculation skipped; message for the user
    Rejected(String),
    /// Form restored to defaults
    Cleared,
}

impl DoseForm {
    /// First drug of the catalog, its first concentration, empty weight
    pub fn new(catalog: &DrugCatalog) -> Self {
        let drug = catalog.first_drug();
        Self {
            drug: drug.name().to_string(),
            concentration: drug.first_concentration().label.clone(),
            weight_input: String::new(),
        }
    }

    /// Labels valid for the currently selected drug
    pub fn concentration_options<'a>(&self, catalog: &'a DrugCatalog) -> Vec<&'a str> {
        catalog
            .drug(&self.drug)
            .map(|d| d.labels().collect())
            .unwrap_or_default()
    }

    pub fn apply(&mut self, action: FormAction, catalog: &DrugCatalog, policy: WeightPolicy) -> FormOutcome {
        match action {
            FormAction::DrugChanged(name) => {
                let Some(drug) = catalog.drug(&name) else {
                    return FormOutcome::Updated;
                };
                if name == self.drug {
                    return FormOutcome::Updated;
                }
                if !drug.has_label(&self.concentration) {
                    self.concentration = drug.first_concentration().label.clone();
                }
                self.drug = name;
                FormOutcome::SelectionChanged
            }
            FormAction::ConcentrationChanged(label) => {
                if label == self.concentration
                    || !catalog.drug(&self.drug).is_some_and(|d| d.has_label(&label))
                {
                    return FormOutcome::Updated;
                }
                self.concentration = label;
                FormOutcome::SelectionChanged
            }
            FormAction::WeightEdited(text) => {
                self.weight_input = text;
                FormOutcome::Updated
            }
            FormAction::Calculate => match calculate_from_input(
                catalog,
                &self.weight_input,
                &self.drug,
                &self.concentration,
                policy,
            ) {
                Ok(result) => FormOutcome::Calculated(result),
                Err(e) => FormOutcome::Rejected(e.user_message()),
            },
            FormAction::Reset => {
                *self = Self::new(catalog);
                FormOutcome::Cleared
            }
        }
    }
}
