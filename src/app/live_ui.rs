//! Live tab.

use egui_phosphor::regular::{ARROWS_CLOCKWISE, PLAY, STOP};

use super::ReadoutApp;

impl ReadoutApp {
    pub(super) fn live_ui(&mut self, ui: &mut egui::Ui) {
        let running = self.is_running();

        ui.group(|ui| {
            ui.label(egui::RichText::new("Connection").strong());
            ui.horizontal(|ui| {
                ui.label("Port:");
                ui.add_enabled_ui(!running, |ui| {
                    let selected = self.config.port.clone().unwrap_or_default();
                    let selected_label = self
                        .ports
                        .iter()
                        .find(|p| p.device == selected)
                        .map(|p| p.label.clone())
                        .unwrap_or(selected);
                    egui::ComboBox::from_id_salt("serial_port")
                        .width(220.0)
                        .selected_text(selected_label)
                        .show_ui(ui, |ui| {
                            for port in &self.ports {
                                ui.selectable_value(
                                    &mut self.config.port,
                                    Some(port.device.clone()),
                                    port.label.as_str(),
                                );
                            }
                        });
                });
                if ui
                    .add_enabled(!running, egui::Button::new(format!("{ARROWS_CLOCKWISE} Refresh ports")))
                    .clicked()
                {
                    self.refresh_ports();
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui
                        .add_enabled(running, egui::Button::new(format!("{STOP} Stop")))
                        .clicked()
                    {
                        self.stop();
                    }
                    if ui
                        .add_enabled(!running, egui::Button::new(format!("{PLAY} Start")))
                        .clicked()
                    {
                        self.start();
                    }
                });
            });
        });

        ui.add_space(8.0);

        let session = self.readout.session();
        let (label, mode, stamp) = match session.last_reading() {
            Some(r) => (
                r.label.clone(),
                r.mode.clone(),
                r.timestamp.format("%H:%M:%S").to_string(),
            ),
            None => (String::new(), String::new(), String::new()),
        };
        let value = session.value_text().to_string();

        ui.group(|ui| {
            ui.set_width(ui.available_width());
            ui.vertical_centered(|ui| {
                ui.add_space(16.0);
                ui.label(egui::RichText::new(value).size(56.0).strong());
                ui.add_space(6.0);
                ui.label(egui::RichText::new(label).size(18.0));
                ui.label(egui::RichText::new(mode).size(10.0));
                if !stamp.is_empty() {
                    ui.label(egui::RichText::new(format!("Last sample {stamp}")).weak());
                }
                if let Some(path) = self.readout.recording_path() {
                    ui.label(
                        egui::RichText::new(format!("Recording to {}", path.display())).weak(),
                    );
                }
                ui.add_space(16.0);
            });
        });

        #[cfg(feature = "trend")]
        self.trend_ui(ui);
    }

    #[cfg(feature = "trend")]
    fn trend_ui(&self, ui: &mut egui::Ui) {
        use egui_plot::{Line, Plot, PlotPoints};

        let history = self.readout.history();
        if history.is_empty() {
            return;
        }
        ui.add_space(8.0);
        let name = history.label().to_string();
        let points: PlotPoints = history.points().into();
        Plot::new("trend")
            .height(ui.available_height().max(120.0))
            .allow_scroll(false)
            .x_axis_label("s")
            .y_axis_label(name.clone())
            .show(ui, |plot_ui| {
                plot_ui.line(Line::new(name, points));
            });
    }
}
