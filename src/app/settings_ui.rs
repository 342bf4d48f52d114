//! Settings tab.

use egui_phosphor::regular::{FLOPPY_DISK, FOLDER_OPEN};

use crate::config::MIN_POLL_INTERVAL_MS;

use super::ReadoutApp;

impl ReadoutApp {
    pub(super) fn settings_ui(&mut self, ui: &mut egui::Ui) {
        let running = self.is_running();

        ui.group(|ui| {
            ui.label(egui::RichText::new("Backend / Recording").strong());
            egui::Grid::new("settings_backend")
                .num_columns(3)
                .spacing([8.0, 6.0])
                .show(ui, |ui| {
                    ui.label("sigrok-cli:");
                    ui.add_enabled(
                        !running,
                        egui::TextEdit::singleline(&mut self.sigrok_path_text).desired_width(360.0),
                    );
                    if ui.add_enabled(!running, egui::Button::new("Browse…")).clicked() {
                        let mut dlg = rfd::FileDialog::new().set_title("Select sigrok-cli");
                        if cfg!(windows) {
                            dlg = dlg.add_filter("Executable", &["exe"]);
                        }
                        if let Some(path) = dlg.pick_file() {
                            self.sigrok_path_text = path.display().to_string();
                        }
                    }
                    ui.end_row();

                    ui.add_enabled(
                        !running,
                        egui::Checkbox::new(&mut self.config.record_enabled, "Record CSV to file"),
                    );
                    let record_editable = self.config.record_enabled && !running;
                    ui.add_enabled(
                        record_editable,
                        egui::TextEdit::singleline(&mut self.record_path_text)
                            .hint_text("CSV path (write while recording)")
                            .desired_width(360.0),
                    );
                    if ui.add_enabled(record_editable, egui::Button::new("…")).clicked() {
                        if let Some(path) = rfd::FileDialog::new()
                            .set_title("Choose CSV output file")
                            .add_filter("CSV", &["csv"])
                            .save_file()
                        {
                            self.record_path_text = path.display().to_string();
                        }
                    }
                    ui.end_row();
                });
        });

        ui.add_space(8.0);

        ui.group(|ui| {
            ui.label(egui::RichText::new("Acquisition").strong());
            ui.add_enabled_ui(!running, |ui| {
                egui::Grid::new("settings_acquisition")
                    .num_columns(2)
                    .spacing([8.0, 6.0])
                    .show(ui, |ui| {
                        ui.label("Driver:");
                        ui.text_edit_singleline(&mut self.config.driver);
                        ui.end_row();

                        ui.label("Channel:");
                        ui.text_edit_singleline(&mut self.config.channel);
                        ui.end_row();

                        ui.label("Poll interval:");
                        ui.add(
                            egui::DragValue::new(&mut self.config.poll_interval_ms)
                                .range(MIN_POLL_INTERVAL_MS..=10_000)
                                .speed(10.0)
                                .suffix(" ms"),
                        );
                        ui.end_row();
                    });
            });
        });

        ui.add_space(8.0);

        ui.horizontal(|ui| {
            if ui.button(format!("{FLOPPY_DISK} Save settings…")).clicked() {
                if let Some(path) = rfd::FileDialog::new()
                    .set_file_name("dmm-readout.json")
                    .add_filter("JSON", &["json"])
                    .save_file()
                {
                    self.save_settings(path);
                }
            }
            if ui
                .add_enabled(!running, egui::Button::new(format!("{FOLDER_OPEN} Load settings…")))
                .clicked()
            {
                if let Some(path) = rfd::FileDialog::new()
                    .add_filter("JSON", &["json"])
                    .pick_file()
                {
                    self.load_settings(path);
                }
            }
        });
    }
}
