//! Configuration for the readout: acquisition, recording, and window settings.
//!
//! The same struct is edited in the Settings tab, merged with command-line
//! flags, and persisted as pretty JSON.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::acquisition::command::{DEFAULT_CHANNEL, DEFAULT_DRIVER};
use crate::acquisition::SigrokCommand;
use crate::error::{ReadoutError, Result};

/// Lower bound for the poll interval; sigrok-cli needs time to open the port.
pub const MIN_POLL_INTERVAL_MS: u64 = 50;

/// Top-level configuration.
///
/// | Field group      | Purpose |
/// |------------------|---------|
/// | acquisition      | tool path, driver, port, channel, poll interval |
/// | recording        | raw CSV recording toggle and file |
/// | window / trend   | title, initial size, trend plot extent |
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReadoutConfig {
    // ── Acquisition ──────────────────────────────────────────────────────────
    /// Path to the sigrok-cli executable. `None` = auto-detect.
    pub sigrok_path: Option<PathBuf>,
    /// libsigrok driver name.
    pub driver: String,
    /// Serial port (`COM3`, `/dev/ttyUSB0`).
    pub port: Option<String>,
    /// Channel to acquire.
    pub channel: String,
    /// Delay between polls in milliseconds.
    pub poll_interval_ms: u64,

    // ── Recording ────────────────────────────────────────────────────────────
    pub record_enabled: bool,
    /// Target file; a timestamped name in the working directory when `None`.
    pub record_path: Option<PathBuf>,

    // ── Window / trend ───────────────────────────────────────────────────────
    /// Native window title.
    pub title: String,
    /// Initial inner window size in points.
    pub window_size: [f32; 2],
    /// Seconds of history kept in the trend plot.
    pub trend_window_secs: f64,
    /// Maximum number of points kept in the trend plot.
    pub trend_max_points: usize,
}

impl Default for ReadoutConfig {
    fn default() -> Self {
        Self {
            sigrok_path: None,
            driver: DEFAULT_DRIVER.to_string(),
            port: None,
            channel: DEFAULT_CHANNEL.to_string(),
            poll_interval_ms: 250,

            record_enabled: false,
            record_path: None,

            title: format!("DMM Readout v{}", env!("CARGO_PKG_VERSION")),
            window_size: [860.0, 520.0],
            trend_window_secs: 120.0,
            trend_max_points: 2_000,
        }
    }
}

impl ReadoutConfig {
    /// Read a settings file written by [`save`](Self::save). Missing fields take defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let text = serde_json::to_string_pretty(self)?;
        std::fs::write(path, text)?;
        Ok(())
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(MIN_POLL_INTERVAL_MS))
    }

    /// Fill in the tool path from the usual locations when it is not set.
    pub fn resolve_sigrok_path(&mut self) {
        if self.sigrok_path.is_none() {
            self.sigrok_path = crate::acquisition::find_sigrok_default();
        }
    }

    /// Validate the acquisition settings and build the per-poll command.
    pub fn command(&self) -> Result<SigrokCommand> {
        let program = self
            .sigrok_path
            .clone()
            .filter(|p| !p.as_os_str().is_empty())
            .ok_or_else(|| ReadoutError::ToolNotFound(PathBuf::new()))?;
        if !program.is_file() {
            return Err(ReadoutError::ToolNotFound(program));
        }
        let port = self
            .port
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .ok_or(ReadoutError::NoPort)?;
        Ok(SigrokCommand::new(program, port)
            .with_driver(self.driver.trim())
            .with_channel(self.channel.trim()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_file(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("dmm_cfg_{}_{name}", std::process::id()))
    }

    #[test]
    fn defaults_match_one_sample_polling() {
        let cfg = ReadoutConfig::default();
        assert_eq!(cfg.driver, "fluke-dmm");
        assert_eq!(cfg.channel, "P1");
        assert_eq!(cfg.poll_interval(), Duration::from_millis(250));
        assert!(!cfg.record_enabled);
    }

    #[test]
    fn poll_interval_is_clamped() {
        let cfg = ReadoutConfig {
            poll_interval_ms: 1,
            ..Default::default()
        };
        assert_eq!(cfg.poll_interval(), Duration::from_millis(MIN_POLL_INTERVAL_MS));
    }

    #[test]
    fn save_then_load_preserves_settings() {
        let path = temp_file("roundtrip.json");
        let cfg = ReadoutConfig {
            port: Some("COM7".into()),
            record_enabled: true,
            record_path: Some(PathBuf::from("out.csv")),
            ..Default::default()
        };
        cfg.save(&path).unwrap();
        assert_eq!(ReadoutConfig::load(&path).unwrap(), cfg);
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn partial_file_uses_defaults() {
        let path = temp_file("partial.json");
        std::fs::write(&path, r#"{ "port": "/dev/ttyUSB0" }"#).unwrap();
        let cfg = ReadoutConfig::load(&path).unwrap();
        assert_eq!(cfg.port.as_deref(), Some("/dev/ttyUSB0"));
        assert_eq!(cfg.driver, "fluke-dmm");
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn malformed_file_is_a_format_error() {
        let path = temp_file("bad.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            ReadoutConfig::load(&path),
            Err(ReadoutError::SettingsFormat(_))
        ));
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn command_requires_tool_and_port() {
        let mut cfg = ReadoutConfig::default();
        assert!(matches!(cfg.command(), Err(ReadoutError::ToolNotFound(_))));

        let tool = temp_file("sigrok-cli");
        std::fs::write(&tool, b"").unwrap();
        cfg.sigrok_path = Some(tool.clone());
        assert!(matches!(cfg.command(), Err(ReadoutError::NoPort)));

        cfg.port = Some(" COM4 ".into());
        let cmd = cfg.command().unwrap();
        assert_eq!(cmd.port, "COM4");
        assert_eq!(cmd.program, tool);
        std::fs::remove_file(&tool).unwrap();
    }
}
