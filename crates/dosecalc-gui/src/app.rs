//! Main application structure

use dosecalc_app::{Config, DoseService};
use dosecalc_domain::DrugCatalog;
use eframe::egui;

use crate::calculator_panel::CalculatorPanel;

/// Main application state
pub struct DoseCalcApp {
    /// Calculator page state
    calculator_panel: CalculatorPanel,
    /// Loaded catalog and weight policy
    service: DoseService,
    /// Application configuration
    config: Config,
}

impl DoseCalcApp {
    /// Create a new application instance
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        // Larger text for bedside use
        cc.egui_ctx.set_zoom_factor(1.3);

        let mut style = (*cc.egui_ctx.style()).clone();
        style.animation_time = 0.1;
        cc.egui_ctx.set_style(style);

        // Load configuration
        let config = Config::load().unwrap_or_else(|e| {
            tracing::warn!("failed to load config, using defaults: {}", e);
            Config::default()
        });

        // Fall back to the built-in catalog if the configured one cannot be read
        let (service, startup_error) = match DoseService::from_config(&config) {
            Ok(service) => (service, None),
            Err(e) => {
                tracing::error!("failed to load drug catalog: {}", e);
                let service = DoseService::new(DrugCatalog::builtin().clone(), config.weight_policy);
                (service, Some(format!("{} (using built-in catalog)", e)))
            }
        };

        let calculator_panel = CalculatorPanel::new(&service, startup_error);

        Self {
            calculator_panel,
            service,
            config,
        }
    }
}

impl eframe::App for DoseCalcApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("title_bar").show(ctx, |ui| {
            ui.add_space(4.0);
            ui.heading("Infusion Rate (mcg/kg/min → ml/hr)");
            ui.add_space(4.0);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.calculator_panel.ui(ui, &self.service, &self.config);
        });
    }
}
