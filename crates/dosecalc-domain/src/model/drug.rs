//! Drug reference data type definitions

use dosecalc_types::CatalogError;
use serde::{Deserialize, Serialize};

/// A named dilution of a drug
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Concentration {
    /// Display label (e.g., "1:2", "4:50", "1mg/ml")
    pub label: String,
    /// Concentration in mcg/ml
    pub mcg_per_ml: f64,
}

/// Bolus given before the maintenance infusion starts
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoadingDoseRule {
    /// Bolus amount in mcg per kg of body weight
    pub dose_mcg_per_kg: f64,
    /// Concentration of the bolus preparation in mcg/ml
    pub preparation_mcg_per_ml: f64,
}

/// One drug of the catalog with its dilutions and dose steps
///
/// Always holds at least one concentration and one dose step.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DrugEntry {
    name: String,
    concentrations: Vec<Concentration>,
    dose_steps: Vec<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    loading_dose: Option<LoadingDoseRule>,
}

impl DrugEntry {
    pub fn new(
        name: impl Into<String>,
        concentrations: Vec<Concentration>,
        dose_steps: Vec<f64>,
        loading_dose: Option<LoadingDoseRule>,
    ) -> Result<Self, CatalogError> {
        let name = name.into();

        if concentrations.is_empty() {
            return Err(CatalogError::NoConcentrations(name));
        }
        if dose_steps.is_empty() {
            return Err(CatalogError::NoDoseSteps(name));
        }

        for (i, conc) in concentrations.iter().enumerate() {
            if concentrations[..i].iter().any(|c| c.label == conc.label) {
                return Err(CatalogError::DuplicateConcentration {
                    drug: name,
                    label: conc.label.clone(),
                });
            }
            check_positive(&name, "mcg_per_ml", conc.mcg_per_ml)?;
        }

        if let Some(&step) = dose_steps.iter().find(|d| !d.is_finite()) {
            return Err(invalid(&name, "dose_steps", step));
        }

        if let Some(rule) = &loading_dose {
            check_positive(&name, "dose_mcg_per_kg", rule.dose_mcg_per_kg)?;
            check_positive(&name, "preparation_mcg_per_ml", rule.preparation_mcg_per_ml)?;
        }

        Ok(Self {
            name,
            concentrations,
            dose_steps,
            loading_dose,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn concentrations(&self) -> &[Concentration] {
        &self.concentrations
    }

    /// Dose steps in mcg/kg/min, in evaluation order
    pub fn dose_steps(&self) -> &[f64] {
        &self.dose_steps
    }

    pub fn loading_dose(&self) -> Option<&LoadingDoseRule> {
        self.loading_dose.as_ref()
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.concentrations.iter().map(|c| c.label.as_str())
    }

    pub fn has_label(&self, label: &str) -> bool {
        self.concentration(label).is_some()
    }

    pub fn concentration(&self, label: &str) -> Option<&Concentration> {
        self.concentrations.iter().find(|c| c.label == label)
    }

    pub fn first_concentration(&self) -> &Concentration {
        &self.concentrations[0]
    }

    /// Look up a concentration by label, falling back to the first one
    ///
    /// Returns the concentration and whether the fallback was taken.
    pub fn resolve_concentration(&self, label: &str) -> (&Concentration, bool) {
        match self.concentration(label) {
            Some(c) => (c, false),
            None => (self.first_concentration(), true),
        }
    }
}

fn invalid(drug: &str, field: &str, value: f64) -> CatalogError {
    CatalogError::InvalidValue {
        drug: drug.to_string(),
        field: field.to_string(),
        value,
    }
}

fn check_positive(drug: &str, field: &str, value: f64) -> Result<(), CatalogError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(drug, field, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn conc(label: &str, mcg_per_ml: f64) -> Concentration {
        Concentration {
            label: label.to_string(),
            mcg_per_ml,
        }
    }

    fn ntg() -> DrugEntry {
        DrugEntry::new(
            "NTG",
            vec![conc("1:1", 1000.0), conc("1:2", 500.0)],
            vec![0.5, 1.0],
            None,
        )
        .unwrap()
    }

    #[test]
    fn test_resolve_known_label() {
        let drug = ntg();
        let (c, fallback) = drug.resolve_concentration("1:2");
        assert_eq!(c.mcg_per_ml, 500.0);
        assert!(!fallback);
    }

    #[test]
    fn test_resolve_unknown_label_falls_back_to_first() {
        let drug = ntg();
        let (c, fallback) = drug.resolve_concentration("4:50");
        assert_eq!(c.label, "1:1");
        assert!(fallback);
    }

    #[test]
    fn test_labels_keep_order() {
        let drug = ntg();
        let labels: Vec<&str> = drug.labels().collect();
        assert_eq!(labels, vec!["1:1", "1:2"]);
    }

    #[test]
    fn test_rejects_empty_concentrations() {
        let err = DrugEntry::new("X", vec![], vec![1.0], None).unwrap_err();
        assert!(matches!(err, CatalogError::NoConcentrations(name) if name == "X"));
    }

    #[test]
    fn test_rejects_empty_dose_steps() {
        let err = DrugEntry::new("X", vec![conc("1:1", 1.0)], vec![], None).unwrap_err();
        assert!(matches!(err, CatalogError::NoDoseSteps(_)));
    }

    #[test]
    fn test_rejects_duplicate_label() {
        let err = DrugEntry::new(
            "X",
            vec![conc("1:1", 1000.0), conc("1:1", 500.0)],
            vec![1.0],
            None,
        )
        .unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateConcentration { label, .. } if label == "1:1"));
    }

    #[test]
    fn test_rejects_zero_concentration() {
        let err = DrugEntry::new("X", vec![conc("1:1", 0.0)], vec![1.0], None).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidValue { field, .. } if field == "mcg_per_ml"));
    }

    #[test]
    fn test_rejects_bad_loading_rule() {
        let rule = LoadingDoseRule {
            dose_mcg_per_kg: 50.0,
            preparation_mcg_per_ml: -1.0,
        };
        let err = DrugEntry::new("X", vec![conc("1:1", 1.0)], vec![1.0], Some(rule)).unwrap_err();
        assert!(
            matches!(err, CatalogError::InvalidValue { field, .. } if field == "preparation_mcg_per_ml")
        );
    }
}
