//! CLI definition using clap

use clap::{Parser, Subcommand};
use dosecalc_types::{ExportFormat, OutputFormat};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "dosecalc")]
#[command(version)]
#[command(about = "Infusion rate calculator: mcg/kg/min to ml/hr")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (json, table). Uses config value if not specified.
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Drug catalog TOML file (overrides config)
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,

    /// Verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Calculate the infusion rate table for a patient
    Calc {
        /// Patient weight in kg (e.g., "60.00")
        #[arg(long, short = 'w', allow_hyphen_values = true)]
        weight: String,

        /// Drug name (e.g., "NTG", "Primacor"). Defaults to the first catalog drug.
        #[arg(long, short = 'd')]
        drug: Option<String>,

        /// Concentration label (e.g., "1:2", "4:50"). Defaults to the drug's first label.
        #[arg(long, short = 'c')]
        concentration: Option<String>,

        /// Write the table to a printable file
        #[arg(long, short = 'o')]
        export: Option<PathBuf>,

        /// Export file format. Guessed from the file extension, then config.
        #[arg(long)]
        export_format: Option<ExportFormat>,
    },

    /// List drugs, concentrations and dose steps
    Drugs,

    /// Manage configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,

        /// Set default output format
        #[arg(long)]
        set_output: Option<OutputFormat>,

        /// Set default export format
        #[arg(long)]
        set_export_format: Option<ExportFormat>,

        /// Use a drug catalog TOML file
        #[arg(long)]
        set_catalog: Option<PathBuf>,

        /// Go back to the built-in drug catalog
        #[arg(long)]
        clear_catalog: bool,

        /// Accept zero and negative weights
        #[arg(long)]
        set_allow_non_positive_weight: Option<bool>,

        /// Reset to defaults
        #[arg(long)]
        reset: bool,
    },
}
