//! Calculator page: drug and concentration selection, weight entry, dose table

use dosecalc_app::export::{default_file_name, export_result};
use dosecalc_app::{Config, DoseService};
use dosecalc_domain::service::form::{DoseForm, FormAction, FormOutcome};
use dosecalc_domain::CalculationResult;
use dosecalc_types::ExportFormat;
use eframe::egui::{self, Color32, RichText, Ui};

const WEIGHT_MAX_CHARS: usize = 10;

/// Calculator panel
pub struct CalculatorPanel {
    /// Current form inputs
    form: DoseForm,
    /// Text buffer bound to the weight field
    weight_buffer: String,
    /// Last successful calculation
    result: Option<CalculationResult>,
    /// Status message
    status_message: Option<(String, bool)>, // (message, is_error)
}

impl CalculatorPanel {
    pub fn new(service: &DoseService, startup_error: Option<String>) -> Self {
        Self {
            form: service.new_form(),
            weight_buffer: String::new(),
            result: None,
            status_message: startup_error.map(|msg| (msg, true)),
        }
    }

    pub fn ui(&mut self, ui: &mut Ui, service: &DoseService, config: &Config) {
        let mut pending: Vec<FormAction> = Vec::new();

        egui::ScrollArea::vertical().show(ui, |ui| {
            self.render_inputs(ui, service, &mut pending);

            ui.add_space(10.0);

            ui.horizontal(|ui| {
                let calculate = egui::Button::new(RichText::new("Calculate").strong())
                    .fill(Color32::from_rgb(255, 165, 0))
                    .min_size(egui::vec2(180.0, 36.0));
                if ui.add(calculate).clicked() {
                    pending.push(FormAction::WeightEdited(self.weight_buffer.clone()));
                    pending.push(FormAction::Calculate);
                }

                let clear = egui::Button::new(RichText::new("Clear").strong())
                    .fill(Color32::from_rgb(255, 153, 151))
                    .min_size(egui::vec2(80.0, 36.0));
                if ui.add(clear).clicked() {
                    pending.push(FormAction::Reset);
                }
            });

            if let Some((ref msg, is_error)) = self.status_message {
                ui.add_space(8.0);
                let color = if is_error {
                    Color32::from_rgb(220, 80, 60)
                } else {
                    Color32::from_rgb(60, 160, 60)
                };
                ui.colored_label(color, msg.as_str());
            }

            if let Some(result) = &self.result {
                ui.add_space(15.0);
                ui.separator();
                render_result(ui, result);

                ui.add_space(15.0);
                if ui.button("Export / Print…").clicked() {
                    self.status_message = Some(export_dialog(result, config));
                }
            }
        });

        for action in pending {
            self.handle(action, service);
        }
    }

    fn render_inputs(&mut self, ui: &mut Ui, service: &DoseService, pending: &mut Vec<FormAction>) {
        let catalog = service.catalog();

        egui::Grid::new("dose_form")
            .num_columns(2)
            .spacing([12.0, 10.0])
            .show(ui, |ui| {
                ui.label(RichText::new("Drug").strong());
                egui::ComboBox::from_id_salt("drug_select")
                    .selected_text(self.form.drug.as_str())
                    .show_ui(ui, |ui| {
                        for name in catalog.drug_names() {
                            if ui.selectable_label(self.form.drug == name, name).clicked() {
                                pending.push(FormAction::DrugChanged(name.to_string()));
                            }
                        }
                    });
                ui.end_row();

                ui.label(RichText::new("Concentration").strong());
                egui::ComboBox::from_id_salt("concentration_select")
                    .selected_text(self.form.concentration.as_str())
                    .show_ui(ui, |ui| {
                        for label in self.form.concentration_options(catalog) {
                            if ui
                                .selectable_label(self.form.concentration == label, label)
                                .clicked()
                            {
                                pending.push(FormAction::ConcentrationChanged(label.to_string()));
                            }
                        }
                    });
                ui.end_row();

                ui.label(RichText::new("Patient weight (kg)").strong());
                let edit = egui::TextEdit::singleline(&mut self.weight_buffer)
                    .char_limit(WEIGHT_MAX_CHARS)
                    .hint_text("e.g. 60.00")
                    .desired_width(140.0);
                let response = ui.add(edit);
                if response.changed() {
                    pending.push(FormAction::WeightEdited(self.weight_buffer.clone()));
                }
                if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                    pending.push(FormAction::Calculate);
                }
                ui.end_row();
            });
    }

    fn handle(&mut self, action: FormAction, service: &DoseService) {
        match service.apply(&mut self.form, action) {
            FormOutcome::Updated => {}
            FormOutcome::SelectionChanged => {
                self.result = None;
                self.status_message = None;
            }
            FormOutcome::Calculated(result) => {
                self.result = Some(result);
                self.status_message = None;
            }
            FormOutcome::Rejected(message) => {
                self.result = None;
                self.status_message = Some((message, true));
            }
            FormOutcome::Cleared => {
                self.weight_buffer.clear();
                self.result = None;
                self.status_message = None;
            }
        }
    }
}

fn render_result(ui: &mut Ui, result: &CalculationResult) {
    ui.heading(result.title());
    ui.add_space(6.0);

    egui::Grid::new("dose_table")
        .num_columns(2)
        .striped(true)
        .min_col_width(140.0)
        .show(ui, |ui| {
            ui.label(RichText::new("mcg/kg/min").strong());
            ui.label(RichText::new("ml/hr").strong());
            ui.end_row();

            for (dose, rate) in result.formatted_rows() {
                ui.label(dose);
                ui.label(rate);
                ui.end_row();
            }
        });

    if let Some(loading) = &result.loading_dose {
        ui.add_space(10.0);
        ui.separator();
        ui.label(RichText::new(format!("{} Loading Dose", result.drug)).strong().size(18.0));
        for line in loading.summary_lines() {
            ui.label(format!("• {}", line));
        }
    }
}

/// Ask for a destination and write the table; returns the status message
fn export_dialog(result: &CalculationResult, config: &Config) -> (String, bool) {
    let file_name = default_file_name(result, config.export_format);
    let Some(path) = rfd::FileDialog::new()
        .set_file_name(file_name.as_str())
        .add_filter("Excel", &["xlsx"])
        .add_filter("CSV", &["csv"])
        .save_file()
    else {
        return ("Export cancelled".to_string(), false);
    };

    let format = ExportFormat::from_path(&path).unwrap_or(config.export_format);
    match export_result(result, &path, format) {
        Ok(()) => (format!("Saved {}", path.display()), false),
        Err(e) => {
            tracing::error!("export failed: {}", e);
            (format!("Export failed: {}", e), true)
        }
    }
}
