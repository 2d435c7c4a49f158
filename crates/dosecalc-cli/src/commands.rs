//! Command handlers

use crate::cli::{Cli, Commands};
use crate::output::{output_catalog, output_result};
use dosecalc_app::export::export_result;
use dosecalc_app::{Config, DoseOptions, DoseService};
use dosecalc_domain::WeightPolicy;
use dosecalc_types::{ExportFormat, OutputFormat, Result};
use std::path::PathBuf;

/// Execute CLI command
pub fn execute(cli: Cli) -> Result<()> {
    // Load config
    let mut config = Config::load()?;

    // Override from CLI args
    if let Some(ref catalog) = cli.catalog {
        config.catalog_path = Some(catalog.clone());
    }
    let output_format = cli.format.unwrap_or(config.output_format);

    match cli.command {
        Commands::Calc {
            weight,
            drug,
            concentration,
            export,
            export_format,
        } => {
            let mut options = DoseOptions::new();
            options.drug = drug;
            options.concentration = concentration;
            cmd_calc(&config, &weight, &options, export, export_format, output_format)
        }

        Commands::Drugs => cmd_drugs(&config, output_format),

        Commands::Config {
            show,
            set_output,
            set_export_format,
            set_catalog,
            clear_catalog,
            set_allow_non_positive_weight,
            reset,
        } => cmd_config(
            show,
            set_output,
            set_export_format,
            set_catalog,
            clear_catalog,
            set_allow_non_positive_weight,
            reset,
        ),
    }
}

fn cmd_calc(
    config: &Config,
    weight: &str,
    options: &DoseOptions,
    export: Option<PathBuf>,
    export_format: Option<ExportFormat>,
    output_format: OutputFormat,
) -> Result<()> {
    let service = DoseService::from_config(config)?;
    let result = service.calculate(weight, options)?;

    output_result(output_format, &result)?;

    if let Some(path) = export {
        let format = export_format
            .or_else(|| ExportFormat::from_path(&path))
            .unwrap_or(config.export_format);
        export_result(&result, &path, format)?;
        eprintln!("Exported to {}", path.display());
    }

    Ok(())
}

fn cmd_drugs(config: &Config, output_format: OutputFormat) -> Result<()> {
    let service = DoseService::from_config(config)?;
    output_catalog(output_format, service.catalog())
}

fn cmd_config(
    show: bool,
    set_output: Option<OutputFormat>,
    set_export_format: Option<ExportFormat>,
    set_catalog: Option<PathBuf>,
    clear_catalog: bool,
    set_allow_non_positive_weight: Option<bool>,
    reset: bool,
) -> Result<()> {
    if reset {
        let config = Config::default();
        config.save()?;
        println!("Configuration reset to defaults");
        println!("\n{}", config);
        return Ok(());
    }

    let mut config = Config::load()?;
    let mut modified = false;

    if let Some(output_format) = set_output {
        config.output_format = output_format;
        modified = true;
    }

    if let Some(export_format) = set_export_format {
        config.export_format = export_format;
        modified = true;
    }

    if let Some(path) = set_catalog {
        // Catalog must load before it is saved
        dosecalc_domain::DrugCatalog::load_from_file(&path)?;
        config.catalog_path = Some(path);
        modified = true;
    }

    if clear_catalog {
        config.catalog_path = None;
        modified = true;
    }

    if let Some(allow) = set_allow_non_positive_weight {
        config.weight_policy = if allow {
            WeightPolicy::AllowNonPositive
        } else {
            WeightPolicy::RequirePositive
        };
        modified = true;
    }

    if modified {
        config.save()?;
        println!("Configuration updated");
    }

    if show || !modified {
        println!("{}", config);
    }

    Ok(())
}
