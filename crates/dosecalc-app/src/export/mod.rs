//! Export of dose tables to printable files

mod csv_table;
mod excel;

pub use self::csv_table::{export_to_csv, write_csv};
pub use self::excel::export_to_excel;

use dosecalc_domain::CalculationResult;
use dosecalc_types::{ExportFormat, Result};
use std::path::Path;

/// Column headers of the dose table
pub const TABLE_HEADERS: [&str; 2] = ["mcg/kg/min", "ml/hr"];

/// Write a result in the given format
pub fn export_result(result: &CalculationResult, path: &Path, format: ExportFormat) -> Result<()> {
    match format {
        ExportFormat::Csv => export_to_csv(result, path)?,
        ExportFormat::Xlsx => export_to_excel(result, path)?,
    }
    tracing::info!(path = %path.display(), %format, "dose table exported");
    Ok(())
}

/// Suggested file name, e.g. "NTG_1-2_60kg.xlsx"
pub fn default_file_name(result: &CalculationResult, format: ExportFormat) -> String {
    let sanitize = |s: &str| -> String {
        s.chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '.' { c } else { '-' })
            .collect()
    };
    format!(
        "{}_{}_{}kg.{}",
        sanitize(&result.drug),
        sanitize(&result.concentration_label),
        result.weight_kg,
        format.extension()
    )
}
