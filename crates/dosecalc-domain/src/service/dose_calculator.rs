//! Dose-table calculation
//!
//! # Formula
//! rate (ml/hr) = weight (kg) x dose (mcg/kg/min) x 60 / concentration (mcg/ml)

use dosecalc_types::{Result, WeightError};

use crate::catalog::DrugCatalog;
use crate::model::{
    CalculationRequest, CalculationResult, DoseRow, DrugEntry, LoadingDoseResult, LoadingDoseRule,
    WeightPolicy,
};
use crate::service::weight::parse_weight;

const MINUTES_PER_HOUR: f64 = 60.0;

/// Round to 2 decimals on the exact binary value, ties to even
///
/// Matches the 2-decimal text shown to the user, so `5.625` becomes `5.62`.
pub fn round2(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }
    format!("{:.2}", value).parse().unwrap_or(value)
}

/// Unrounded pump rate in ml/hr
pub fn calculate_rate(weight_kg: f64, dose_mcg_per_kg_min: f64, mcg_per_ml: f64) -> f64 {
    weight_kg * dose_mcg_per_kg_min * MINUTES_PER_HOUR / mcg_per_ml
}

pub fn calculate_loading_dose(weight_kg: f64, rule: &LoadingDoseRule) -> LoadingDoseResult {
    let loading_mcg = weight_kg * rule.dose_mcg_per_kg;
    LoadingDoseResult {
        loading_mcg,
        volume_ml: round2(loading_mcg / rule.preparation_mcg_per_ml),
        preparation_mcg_per_ml: rule.preparation_mcg_per_ml,
    }
}

/// Build the dose table for one drug entry
pub fn calculate_for_drug(weight_kg: f64, drug: &DrugEntry, concentration_label: &str) -> CalculationResult {
    let (concentration, fallback) = drug.resolve_concentration(concentration_label);

    let rows = drug
        .dose_steps()
        .iter()
        .map(|&dose| DoseRow {
            dose_mcg_per_kg_min: round2(dose),
            rate_ml_per_hr: round2(calculate_rate(weight_kg, dose, concentration.mcg_per_ml)),
        })
        .collect();

    CalculationResult {
        drug: drug.name().to_string(),
        concentration_label: concentration.label.clone(),
        concentration_mcg_per_ml: concentration.mcg_per_ml,
        weight_kg,
        rows,
        loading_dose: drug
            .loading_dose()
            .map(|rule| calculate_loading_dose(weight_kg, rule)),
        concentration_fallback: fallback,
    }
}

/// Calculate the dose table for a request
///
/// Fails with `InvalidWeight` for a non-finite weight and `UnknownDrug` when
/// the drug is not in the catalog. An unknown concentration label falls back
/// to the drug's first label.
pub fn calculate(catalog: &DrugCatalog, request: &CalculationRequest) -> Result<CalculationResult> {
    if !request.weight_kg.is_finite() {
        return Err(WeightError::NotANumber(request.weight_kg.to_string()).into());
    }
    let drug = catalog.find_drug(&request.drug)?;
    Ok(calculate_for_drug(
        request.weight_kg,
        drug,
        &request.concentration_label,
    ))
}

/// Parse the weight text and calculate; no table is produced on a bad weight
pub fn calculate_from_input(
    catalog: &DrugCatalog,
    weight_text: &str,
    drug: &str,
    concentration_label: &str,
    policy: WeightPolicy,
) -> Result<CalculationResult> {
    let weight_kg = parse_weight(weight_text, policy)?;
    let request = CalculationRequest::new(weight_kg, drug, concentration_label);
    calculate(catalog, &request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dosecalc_types::Error;

    fn builtin() -> &'static DrugCatalog {
        DrugCatalog::builtin()
    }

    fn run(weight: f64, drug: &str, label: &str) -> CalculationResult {
        calculate(builtin(), &CalculationRequest::new(weight, drug, label)).unwrap()
    }

    // ==========================================
    // Reference cases
    // ==========================================

    #[test]
    fn test_ntg_first_row() {
        // 60 x 0.5 x 60 / 1000 = 1.80 ml/hr
        let result = run(60.0, "NTG", "1:1");
        assert_eq!(result.rows[0].dose_mcg_per_kg_min, 0.5);
        assert!((result.rows[0].rate_ml_per_hr - 1.8).abs() < f64::EPSILON);
        assert!(result.loading_dose.is_none());
    }

    #[test]
    fn test_primacor_loading_dose() {
        // 70 x 50 = 3500 mcg, 3.5 ml of 1 mg/ml
        let result = run(70.0, "Primacor", "1mg/ml");
        let loading = result.loading_dose.unwrap();
        assert!((loading.loading_mcg - 3500.0).abs() < f64::EPSILON);
        assert!((loading.volume_ml - 3.5).abs() < f64::EPSILON);

        // 70 x 0.25 x 60 / 1000 = 1.05 ml/hr
        assert!((result.rows[0].rate_ml_per_hr - 1.05).abs() < 1e-9);
    }

    #[test]
    fn test_adrenaline_4_50() {
        // 80 x 0.05 x 60 / 80 = 3.00 ml/hr
        let result = run(80.0, "Adrenaline", "4:50");
        let row = result.rows[4];
        assert_eq!(row.dose_mcg_per_kg_min, 0.05);
        assert!((row.rate_ml_per_hr - 3.0).abs() < 1e-9);
        assert_eq!(result.formatted_rows()[4], ("0.05".to_string(), "3.00".to_string()));
    }

    // ==========================================
    // Formula and ordering
    // ==========================================

    #[test]
    fn test_every_drug_and_label_matches_formula() {
        let weight = 63.7;
        for drug in builtin().drugs() {
            for conc in drug.concentrations() {
                let result = run(weight, drug.name(), &conc.label);
                assert_eq!(result.rows.len(), drug.dose_steps().len());
                for (row, &dose) in result.rows.iter().zip(drug.dose_steps()) {
                    let expected = round2(weight * dose * 60.0 / conc.mcg_per_ml);
                    assert_eq!(row.dose_mcg_per_kg_min, round2(dose));
                    assert_eq!(row.rate_ml_per_hr, expected);
                }
                assert_eq!(result.concentration_label, conc.label);
                assert!(!result.concentration_fallback);
            }
        }
    }

    #[test]
    fn test_rows_keep_table_order() {
        let result = run(50.0, "Primacor", "1mg/ml");
        let doses: Vec<f64> = result.rows.iter().map(|r| r.dose_mcg_per_kg_min).collect();
        assert_eq!(doses, vec![0.25, 0.35, 0.5, 0.75, 1.0, 1.2, 1.5]);
    }

    #[test]
    fn test_rates_rounded_to_two_decimals() {
        // 55 x 0.07 x 60 / 160 = 1.44375 -> 1.44
        let result = run(55.0, "Levophed", "8:50");
        assert_eq!(result.rows[6].rate_ml_per_hr, 1.44);
    }

    #[test]
    fn test_calculation_is_idempotent() {
        let first = run(72.0, "Dopamine", "2:1");
        let second = run(72.0, "Dopamine", "2:1");
        assert_eq!(first, second);
    }

    // ==========================================
    // Concentration fallback
    // ==========================================

    #[test]
    fn test_invalid_label_falls_back_to_first() {
        let result = run(60.0, "Dobutamine", "1:10");
        assert_eq!(result.concentration_label, "1:1");
        assert_eq!(result.concentration_mcg_per_ml, 1000.0);
        assert!(result.concentration_fallback);
    }

    // ==========================================
    // Errors
    // ==========================================

    #[test]
    fn test_empty_weight_text() {
        let err = calculate_from_input(builtin(), "", "NTG", "1:1", WeightPolicy::default()).unwrap_err();
        assert!(matches!(err, Error::InvalidWeight(WeightError::Missing)));
    }

    #[test]
    fn test_non_numeric_weight_text() {
        let err =
            calculate_from_input(builtin(), "abc", "NTG", "1:1", WeightPolicy::default()).unwrap_err();
        assert!(matches!(err, Error::InvalidWeight(WeightError::NotANumber(_))));
    }

    #[test]
    fn test_unknown_drug() {
        let err = calculate(builtin(), &CalculationRequest::new(60.0, "Heparin", "1:1")).unwrap_err();
        assert!(matches!(err, Error::UnknownDrug(_)));
    }

    #[test]
    fn test_nan_weight_request() {
        let err = calculate(builtin(), &CalculationRequest::new(f64::NAN, "NTG", "1:1")).unwrap_err();
        assert!(matches!(err, Error::InvalidWeight(_)));
    }

    // ==========================================
    // Non-positive weights (permissive policy)
    // ==========================================

    #[test]
    fn test_zero_weight_allowed_gives_zero_rates() {
        let result =
            calculate_from_input(builtin(), "0", "NTG", "1:1", WeightPolicy::AllowNonPositive).unwrap();
        assert!(result.rows.iter().all(|r| r.rate_ml_per_hr == 0.0));
    }

    #[test]
    fn test_negative_weight_allowed_gives_negative_rates() {
        let result =
            calculate_from_input(builtin(), "-60", "NTG", "1:1", WeightPolicy::AllowNonPositive).unwrap();
        assert_eq!(result.rows[0].rate_ml_per_hr, -1.8);
    }

    #[test]
    fn test_negative_weight_rejected_by_default() {
        let err =
            calculate_from_input(builtin(), "-60", "NTG", "1:1", WeightPolicy::default()).unwrap_err();
        assert!(matches!(err, Error::InvalidWeight(WeightError::NotPositive(_))));
    }

    // ==========================================
    // Helpers
    // ==========================================

    #[test]
    fn test_round2_exact_ties_go_to_even() {
        assert_eq!(round2(1.125), 1.12);
        assert_eq!(round2(-1.125), -1.12);
        assert_eq!(round2(5.625), 5.62);
        assert_eq!(round2(2.0), 2.0);
    }

    #[test]
    fn test_round2_non_tie_rounds_to_nearest() {
        assert_eq!(round2(1.126), 1.13);
        assert_eq!(round2(13.3333), 13.33);
    }

    #[test]
    fn test_tie_rates_match_displayed_text() {
        // 62.5 kg at 4000 mcg/ml: 6 -> 5.625, 14 -> 13.125 (exact binary ties)
        let result = calculate(
            builtin(),
            &CalculationRequest::new(62.5, "Dobutamine", "4:1"),
        )
        .unwrap();
        let rates: Vec<String> = result.formatted_rows().into_iter().map(|(_, r)| r).collect();
        assert_eq!(rates[5], "5.62");
        assert_eq!(rates[13], "13.12");
        assert_eq!(result.rows[5].rate_ml_per_hr, 5.62);
        assert_eq!(result.rows[13].rate_ml_per_hr, 13.12);
    }

    #[test]
    fn test_loading_dose_rounds_volume() {
        let rule = LoadingDoseRule {
            dose_mcg_per_kg: 50.0,
            preparation_mcg_per_ml: 1000.0,
        };
        // 63.417 x 50 = 3170.85 mcg -> 3.17085 ml -> 3.17
        let loading = calculate_loading_dose(63.417, &rule);
        assert_eq!(loading.volume_ml, 3.17);
    }
}
