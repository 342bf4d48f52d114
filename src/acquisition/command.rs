//! The per-poll `sigrok-cli` invocation.

use std::path::PathBuf;
use std::process::{Command, Stdio};

pub const DEFAULT_DRIVER: &str = "fluke-dmm";
pub const DEFAULT_CHANNEL: &str = "P1";

/// One-shot acquisition command.
///
/// Each poll asks for a single sample in CSV form, which makes `sigrok-cli`
/// print the function/unit header every time. A continuous stream only prints
/// it once and misses dial changes on some meters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SigrokCommand {
    pub program: PathBuf,
    pub driver: String,
    pub port: String,
    pub channel: String,
    pub samples: u32,
}

impl SigrokCommand {
    pub fn new(program: impl Into<PathBuf>, port: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            driver: DEFAULT_DRIVER.to_string(),
            port: port.into(),
            channel: DEFAULT_CHANNEL.to_string(),
            samples: 1,
        }
    }

    pub fn with_driver(mut self, driver: impl Into<String>) -> Self {
        self.driver = driver.into();
        self
    }

    pub fn with_channel(mut self, channel: impl Into<String>) -> Self {
        self.channel = channel.into();
        self
    }

    /// `-d <driver>:conn=<port> -C <channel> --samples <n> -O csv`
    pub fn args(&self) -> Vec<String> {
        vec![
            "-d".to_string(),
            format!("{}:conn={}", self.driver, self.port),
            "-C".to_string(),
            self.channel.clone(),
            "--samples".to_string(),
            self.samples.to_string(),
            "-O".to_string(),
            "csv".to_string(),
        ]
    }

    /// A ready-to-spawn [`Command`] with both output pipes captured.
    pub fn to_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(self.args())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        cmd
    }
}
