//! Excel export functionality

use dosecalc_domain::CalculationResult;
use dosecalc_types::{Error, Result};
use rust_xlsxwriter::{Format, Workbook, Worksheet};
use std::path::Path;

use super::TABLE_HEADERS;

/// Export a dose table to an Excel file laid out for printing
pub fn export_to_excel(result: &CalculationResult, output_path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();

    let sheet = workbook.add_worksheet();
    write_dose_sheet(sheet, result)?;

    workbook
        .save(output_path)
        .map_err(|e| Error::Export(e.to_string()))?;

    Ok(())
}

fn write_dose_sheet(sheet: &mut Worksheet, result: &CalculationResult) -> Result<()> {
    sheet
        .set_name("Dose Table")
        .map_err(|e| Error::Export(e.to_string()))?;

    let header_format = Format::new().set_bold();
    let number_format = Format::new().set_num_format("0.00");

    sheet
        .write_string_with_format(0, 0, "Infusion Rate Table (mcg/kg/min → ml/hr)", &header_format)
        .map_err(|e| Error::Export(e.to_string()))?;

    let generated = chrono::Local::now().format("%Y-%m-%d %H:%M").to_string();
    let info = [
        ("Generated:", generated),
        ("Weight (kg):", result.weight_kg.to_string()),
        ("Drug:", result.drug.clone()),
        (
            "Concentration:",
            format!(
                "{} ({} mcg/ml)",
                result.concentration_label, result.concentration_mcg_per_ml
            ),
        ),
    ];

    let mut row: u32 = 2;
    for (label, value) in &info {
        sheet
            .write_string(row, 0, *label)
            .map_err(|e| Error::Export(e.to_string()))?;
        sheet
            .write_string(row, 1, value)
            .map_err(|e| Error::Export(e.to_string()))?;
        row += 1;
    }

    // Dose table
    row += 1;
    sheet
        .write_string_with_format(row, 0, result.title(), &header_format)
        .map_err(|e| Error::Export(e.to_string()))?;
    row += 1;

    for (col, header) in TABLE_HEADERS.iter().enumerate() {
        sheet
            .write_string_with_format(row, col as u16, *header, &header_format)
            .map_err(|e| Error::Export(e.to_string()))?;
    }
    row += 1;

    for dose_row in &result.rows {
        sheet
            .write_number_with_format(row, 0, dose_row.dose_mcg_per_kg_min, &number_format)
            .map_err(|e| Error::Export(e.to_string()))?;
        sheet
            .write_number_with_format(row, 1, dose_row.rate_ml_per_hr, &number_format)
            .map_err(|e| Error::Export(e.to_string()))?;
        row += 1;
    }

    if let Some(loading) = &result.loading_dose {
        row += 1;
        sheet
            .write_string_with_format(row, 0, format!("{} Loading Dose", result.drug), &header_format)
            .map_err(|e| Error::Export(e.to_string()))?;
        row += 1;

        for line in loading.summary_lines() {
            sheet
                .write_string(row, 0, line)
                .map_err(|e| Error::Export(e.to_string()))?;
            row += 1;
        }
    }

    sheet
        .set_column_width(0, 28)
        .map_err(|e| Error::Export(e.to_string()))?;
    sheet
        .set_column_width(1, 18)
        .map_err(|e| Error::Export(e.to_string()))?;

    Ok(())
}
