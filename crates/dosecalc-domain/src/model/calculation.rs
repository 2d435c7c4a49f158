//! Calculation request and result types

use serde::{Deserialize, Serialize};

/// Input to a single dose-table calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationRequest {
    /// Patient weight in kg
    pub weight_kg: f64,
    /// Drug name as listed in the catalog
    pub drug: String,
    /// Concentration label; replaced by the drug's first label when not valid for it
    pub concentration_label: String,
}

impl CalculationRequest {
    pub fn new(weight_kg: f64, drug: impl Into<String>, concentration_label: impl Into<String>) -> Self {
        Self {
            weight_kg,
            drug: drug.into(),
            concentration_label: concentration_label.into(),
        }
    }
}

/// One row of the dose table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DoseRow {
    /// Dose rate in mcg/kg/min
    pub dose_mcg_per_kg_min: f64,
    /// Pump rate in ml/hr, rounded to 2 decimals
    pub rate_ml_per_hr: f64,
}

/// Computed bolus for drugs with a loading-dose rule
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoadingDoseResult {
    /// Total bolus in mcg
    pub loading_mcg: f64,
    /// Volume of the preparation to draw up, rounded to 2 decimals
    pub volume_ml: f64,
    /// Concentration of the preparation in mcg/ml
    pub preparation_mcg_per_ml: f64,
}

impl LoadingDoseResult {
    /// Preparation strength as shown to users, e.g. "1 mg/ml"
    pub fn preparation_label(&self) -> String {
        format!("{} mg/ml", self.preparation_mcg_per_ml / 1000.0)
    }

    /// Summary lines for the loading-dose block
    pub fn summary_lines(&self) -> [String; 2] {
        [
            format!("Loading dose via pump = {:.0} mcg", self.loading_mcg),
            format!(
                "Volume to prepare ({}) = {} ml",
                self.preparation_label(),
                self.volume_ml
            ),
        ]
    }
}

/// Dose table for one drug, concentration and weight
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationResult {
    pub drug: String,
    /// Label actually used for the calculation
    pub concentration_label: String,
    pub concentration_mcg_per_ml: f64,
    pub weight_kg: f64,
    /// Rows in the drug's dose-step order
    pub rows: Vec<DoseRow>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loading_dose: Option<LoadingDoseResult>,
    /// Set when the requested label was not valid for the drug
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub concentration_fallback: bool,
}

impl CalculationResult {
    /// Heading for the result table, e.g. "Results for NTG (1:1)"
    pub fn title(&self) -> String {
        format!("Results for {} ({})", self.drug, self.concentration_label)
    }

    /// Rows formatted to 2 decimals as (dose, rate) cells
    pub fn formatted_rows(&self) -> Vec<(String, String)> {
        self.rows
            .iter()
            .map(|r| {
                (
                    format!("{:.2}", r.dose_mcg_per_kg_min),
                    format!("{:.2}", r.rate_ml_per_hr),
                )
            })
            .collect()
    }
}
