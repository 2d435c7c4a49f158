//! CSV export

use dosecalc_domain::CalculationResult;
use dosecalc_types::{Error, Result};
use std::io::Write;
use std::path::Path;

use super::TABLE_HEADERS;

fn csv_error(e: impl std::fmt::Display) -> Error {
    Error::Export(e.to_string())
}

/// Write the dose table, followed by loading-dose rows when present
pub fn write_csv<W: Write>(result: &CalculationResult, writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);

    wtr.write_record(TABLE_HEADERS).map_err(csv_error)?;
    for (dose, rate) in result.formatted_rows() {
        wtr.write_record([dose.as_str(), rate.as_str()]).map_err(csv_error)?;
    }

    if let Some(loading) = &result.loading_dose {
        wtr.write_record([
            "Loading dose (mcg)".to_string(),
            format!("{:.0}", loading.loading_mcg),
        ])
        .map_err(csv_error)?;
        wtr.write_record([
            format!("Volume to prepare at {} (ml)", loading.preparation_label()),
            loading.volume_ml.to_string(),
        ])
        .map_err(csv_error)?;
    }

    wtr.flush()?;
    Ok(())
}

pub fn export_to_csv(result: &CalculationResult, output_path: &Path) -> Result<()> {
    let file = std::fs::File::create(output_path)?;
    write_csv(result, file)
}
