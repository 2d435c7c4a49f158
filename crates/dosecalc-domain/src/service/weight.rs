//! Weight entry parsing

use dosecalc_types::WeightError;

use crate::model::WeightPolicy;

/// Parse a weight typed by the user into kilograms
///
/// Surrounding whitespace is ignored. Empty text means the weight has not
/// been entered yet.
pub fn parse_weight(text: &str, policy: WeightPolicy) -> Result<f64, WeightError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(WeightError::Missing);
    }

    let weight_kg: f64 = trimmed
        .parse()
        .map_err(|_| WeightError::NotANumber(trimmed.to_string()))?;

    // "inf" and "NaN" parse as f64 but are not weights
    if !weight_kg.is_finite() {
        return Err(WeightError::NotANumber(trimmed.to_string()));
    }

    if !policy.accepts(weight_kg) {
        return Err(WeightError::NotPositive(weight_kg));
    }

    Ok(weight_kg)
}
