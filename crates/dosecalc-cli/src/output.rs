//! Output formatting module

use dosecalc_app::export::TABLE_HEADERS;
use dosecalc_domain::{CalculationResult, DrugCatalog};
use dosecalc_types::{OutputFormat, Result};
use std::fmt::Write;

pub fn output_result(output_format: OutputFormat, result: &CalculationResult) -> Result<()> {
    if output_format == OutputFormat::Json {
        let content = serde_json::to_string_pretty(result)?;
        println!("{}", content);
    } else {
        print!("{}", render_result(result));
    }
    Ok(())
}

pub fn output_catalog(output_format: OutputFormat, catalog: &DrugCatalog) -> Result<()> {
    if output_format == OutputFormat::Json {
        let content = serde_json::to_string_pretty(catalog)?;
        println!("{}", content);
    } else {
        print!("{}", render_catalog(catalog));
    }
    Ok(())
}

/// Table format of a dose table
pub fn render_result(result: &CalculationResult) -> String {
    let mut out = String::new();
    let title = result.title();

    let _ = writeln!(out, "\n{}", title);
    let _ = writeln!(out, "{}", "=".repeat(title.chars().count()));
    let _ = writeln!(out, "Weight:          {} kg", result.weight_kg);
    let _ = writeln!(
        out,
        "Concentration:   {} mcg/ml",
        result.concentration_mcg_per_ml
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "{:>12}  {:>12}", TABLE_HEADERS[0], TABLE_HEADERS[1]);
    let _ = writeln!(out, "{}  {}", "-".repeat(12), "-".repeat(12));
    for (dose, rate) in result.formatted_rows() {
        let _ = writeln!(out, "{:>12}  {:>12}", dose, rate);
    }

    if let Some(loading) = &result.loading_dose {
        let _ = writeln!(out, "\n--- {} Loading Dose ---", result.drug);
        for line in loading.summary_lines() {
            let _ = writeln!(out, "- {}", line);
        }
    }

    out
}

/// Table format of the drug catalog
pub fn render_catalog(catalog: &DrugCatalog) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\nDrug Catalog");
    let _ = writeln!(out, "============");

    for drug in catalog.drugs() {
        let _ = writeln!(out, "\n{}", drug.name());

        let concentrations: Vec<String> = drug
            .concentrations()
            .iter()
            .map(|c| format!("{} ({} mcg/ml)", c.label, c.mcg_per_ml))
            .collect();
        let _ = writeln!(out, "  Concentrations: {}", concentrations.join(", "));

        let steps: Vec<String> = drug.dose_steps().iter().map(|d| format!("{:.2}", d)).collect();
        let _ = writeln!(out, "  Dose steps:     {} mcg/kg/min", steps.join(", "));

        if let Some(rule) = drug.loading_dose() {
            let _ = writeln!(
                out,
                "  Loading dose:   {} mcg/kg at {} mcg/ml",
                rule.dose_mcg_per_kg, rule.preparation_mcg_per_ml
            );
        }
    }

    out
}
