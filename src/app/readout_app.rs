//! [`ReadoutApp`]: application state and the per-frame loop.

use std::path::PathBuf;
use std::time::Duration;

use tracing::{error, info};

use crate::acquisition::{list_serial_ports, SerialPortInfo};
use crate::config::ReadoutConfig;
use crate::error::ReadoutError;
use crate::readout::Readout;

use super::Tab;

/// How often the UI wakes up while polling to drain new output.
const ACTIVE_REPAINT: Duration = Duration::from_millis(50);

/// Standalone readout application implementing [`eframe::App`].
pub struct ReadoutApp {
    pub config: ReadoutConfig,
    pub(super) readout: Readout,
    pub(super) tab: Tab,
    pub(super) ports: Vec<SerialPortInfo>,

    // Text buffers for the path fields, synced into `config` on start / save.
    pub(super) sigrok_path_text: String,
    pub(super) record_path_text: String,

    /// `(title, message)` of the error window, if one is open.
    pub(super) error: Option<(String, String)>,
}

impl ReadoutApp {
    pub fn new(mut config: ReadoutConfig) -> Self {
        config.resolve_sigrok_path();
        let readout = Readout::new(&config);
        let mut app = Self {
            sigrok_path_text: path_text(config.sigrok_path.as_ref()),
            record_path_text: path_text(config.record_path.as_ref()),
            config,
            readout,
            tab: Tab::Live,
            ports: Vec::new(),
            error: None,
        };
        app.refresh_ports();
        app
    }

    pub fn is_running(&self) -> bool {
        self.readout.is_running()
    }

    /// Re-scan serial ports, keeping the current selection when it still exists.
    pub fn refresh_ports(&mut self) {
        self.ports = list_serial_ports();
        let keep = self
            .config
            .port
            .as_ref()
            .is_some_and(|cur| self.ports.iter().any(|p| &p.device == cur));
        if !keep {
            self.config.port = self.ports.first().map(|p| p.device.clone());
        }
    }

    /// Copy the text fields into `config`.
    pub(super) fn sync_text_fields(&mut self) {
        self.config.sigrok_path = non_empty_path(&self.sigrok_path_text);
        self.config.record_path = non_empty_path(&self.record_path_text);
    }

    pub fn start(&mut self) {
        self.sync_text_fields();
        match self.readout.start(&self.config) {
            Ok(Some(path)) => {
                self.record_path_text = path.display().to_string();
                self.config.record_path = Some(path);
            }
            Ok(None) => {}
            Err(e) => self.show_error(e),
        }
    }

    pub fn stop(&mut self) {
        self.readout.stop();
    }

    pub(super) fn show_error(&mut self, e: ReadoutError) {
        error!("{e}");
        self.error = Some((error_title(&e).to_string(), e.to_string()));
    }

    pub(super) fn save_settings(&mut self, path: PathBuf) {
        self.sync_text_fields();
        match self.config.save(&path) {
            Ok(()) => info!(path = %path.display(), "settings saved"),
            Err(e) => self.show_error(e),
        }
    }

    pub(super) fn load_settings(&mut self, path: PathBuf) {
        match ReadoutConfig::load(&path) {
            Ok(cfg) => {
                info!(path = %path.display(), "settings loaded");
                self.sigrok_path_text = path_text(cfg.sigrok_path.as_ref());
                self.record_path_text = path_text(cfg.record_path.as_ref());
                self.config = cfg;
                self.refresh_ports();
            }
            Err(e) => self.show_error(e),
        }
    }

    fn render_error_window(&mut self, ctx: &egui::Context) {
        let Some((title, message)) = &self.error else {
            return;
        };
        let mut close = false;
        egui::Window::new(title.as_str())
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .show(ctx, |ui| {
                ui.label(message.as_str());
                ui.add_space(8.0);
                if ui.button("OK").clicked() {
                    close = true;
                }
            });
        if close {
            self.error = None;
        }
    }
}

impl eframe::App for ReadoutApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Ingest output from the acquisition tool before drawing.
        if let Err(e) = self.readout.pump() {
            self.show_error(e);
        }

        egui::TopBottomPanel::top("readout_tabs").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.selectable_value(&mut self.tab, Tab::Live, "Live");
                ui.selectable_value(&mut self.tab, Tab::Settings, "Settings");
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| match self.tab {
            Tab::Live => self.live_ui(ui),
            Tab::Settings => self.settings_ui(ui),
        });

        self.render_error_window(ctx);

        if self.is_running() {
            ctx.request_repaint_after(ACTIVE_REPAINT);
        }
    }
}

/// Dialog title for an error shown to the user.
pub fn error_title(e: &ReadoutError) -> &'static str {
    match e {
        ReadoutError::ToolNotFound(_) => "sigrok-cli not found",
        ReadoutError::NoPort => "No serial port",
        ReadoutError::RecorderOpen { .. } => "Cannot open CSV file",
        ReadoutError::Spawn { .. } | ReadoutError::ToolExited { .. } => "sigrok-cli error",
        ReadoutError::Io(_) | ReadoutError::SettingsFormat(_) => "Settings error",
    }
}

fn path_text(p: Option<&PathBuf>) -> String {
    p.map(|p| p.display().to_string()).unwrap_or_default()
}

fn non_empty_path(s: &str) -> Option<PathBuf> {
    let s = s.trim();
    (!s.is_empty()).then(|| PathBuf::from(s))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_titles() {
        assert_eq!(error_title(&ReadoutError::NoPort), "No serial port");
        assert_eq!(
            error_title(&ReadoutError::ToolExited { code: 1 }),
            "sigrok-cli error"
        );
    }

    #[test]
    fn start_without_tool_opens_error_window() {
        let mut app = ReadoutApp::new(ReadoutConfig::default());
        app.sigrok_path_text = "/nonexistent/sigrok-cli".into();
        app.start();
        assert!(!app.is_running());
        let (title, _) = app.error.clone().unwrap();
        assert_eq!(title, "sigrok-cli not found");
    }

    #[test]
    fn refresh_selects_a_port() {
        let mut app = ReadoutApp::new(ReadoutConfig::default());
        app.config.port = Some("definitely-not-a-port".into());
        app.refresh_ports();
        assert_ne!(app.config.port.as_deref(), Some("definitely-not-a-port"));
        assert!(app.config.port.is_some());
    }

    #[test]
    fn blank_path_fields_become_none() {
        assert_eq!(non_empty_path("   "), None);
        assert_eq!(non_empty_path(" a.csv "), Some(PathBuf::from("a.csv")));
    }
}
