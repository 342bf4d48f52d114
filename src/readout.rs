//! Glue between the polling engine, the parser, the recorder, and the trend history.
//!
//! [`Readout`] owns everything one acquisition session needs and is driven by
//! calling [`Readout::pump`] from the consumer's loop (each egui frame, or the
//! headless loop in `main`).

use std::io;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{Receiver, TryRecvError};

use chrono::Local;
use tracing::{info, warn};

use crate::acquisition::{AcquisitionEvent, Poller};
use crate::config::ReadoutConfig;
use crate::data::history::ReadingHistory;
use crate::data::session::{Reading, ReadoutSession};
use crate::error::{ReadoutError, Result};
use crate::recorder::{default_record_path, LineRecorder};

#[derive(Default)]
pub struct Readout {
    session: ReadoutSession,
    history: ReadingHistory,
    recorder: Option<LineRecorder>,
    poller: Option<Poller>,
    rx: Option<Receiver<AcquisitionEvent>>,
    program: PathBuf,
}

impl Readout {
    pub fn new(cfg: &ReadoutConfig) -> Self {
        let mut readout = Self::default();
        readout.history = ReadingHistory::new(cfg.trend_max_points, cfg.trend_window_secs);
        readout
    }

    /// Validate `cfg`, open the recording file if enabled, reset the display
    /// state, and start polling.
    ///
    /// Returns the recording path actually used, so callers can show it.
    pub fn start(&mut self, cfg: &ReadoutConfig) -> Result<Option<PathBuf>> {
        self.stop();
        let command = cfg.command()?;

        let record_path = if cfg.record_enabled {
            let path = cfg
                .record_path
                .clone()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| default_record_path(Local::now()));
            self.recorder = Some(LineRecorder::open(&path)?);
            Some(path)
        } else {
            None
        };

        self.session.reset();
        self.history.max_points = cfg.trend_max_points;
        self.history.time_window = cfg.trend_window_secs;
        self.history.clear();

        self.program = command.program.clone();
        let (poller, rx) = Poller::start(command, cfg.poll_interval());
        self.poller = Some(poller);
        self.rx = Some(rx);
        info!(port = cfg.port.as_deref().unwrap_or(""), "readout started");
        Ok(record_path)
    }

    /// Stop polling, terminate the in-flight process, and close the recording.
    pub fn stop(&mut self) {
        if let Some(mut poller) = self.poller.take() {
            poller.stop();
        }
        self.rx = None;
        self.recorder = None;
    }

    pub fn is_running(&self) -> bool {
        self.poller.as_ref().is_some_and(|p| p.is_running())
    }

    pub fn session(&self) -> &ReadoutSession {
        &self.session
    }

    pub fn history(&self) -> &ReadingHistory {
        &self.history
    }

    pub fn recording_path(&self) -> Option<&Path> {
        self.recorder.as_ref().map(|r| r.path())
    }

    /// Handle one raw output line: record it, parse it, and extend the history.
    pub fn ingest_line(&mut self, line: &str) -> Option<Reading> {
        if let Some(rec) = self.recorder.as_mut() {
            rec.record(line);
        }
        let reading = self.session.feed_line(line)?;
        self.history.push(&reading);
        Some(reading)
    }

    /// Drain all pending acquisition events.
    ///
    /// Returns the readings produced. A failed poll stops the session and is
    /// returned as an error once; the next call returns `Ok` with no readings.
    pub fn pump(&mut self) -> Result<Vec<Reading>> {
        let mut readings = Vec::new();
        loop {
            let event = match self.rx.as_ref().map(|rx| rx.try_recv()) {
                Some(Ok(event)) => event,
                Some(Err(TryRecvError::Empty)) | None => break,
                Some(Err(TryRecvError::Disconnected)) => {
                    self.rx = None;
                    break;
                }
            };
            match event {
                AcquisitionEvent::Line(line) => readings.extend(self.ingest_line(&line)),
                AcquisitionEvent::Finished { code: Some(0) } => {}
                AcquisitionEvent::Finished { code } => {
                    warn!(?code, "acquisition tool failed, stopping");
                    self.stop();
                    return Err(ReadoutError::ToolExited {
                        code: code.unwrap_or(-1),
                    });
                }
                AcquisitionEvent::SpawnFailed(msg) => {
                    self.stop();
                    return Err(ReadoutError::Spawn {
                        program: self.program.clone(),
                        source: io::Error::new(io::ErrorKind::Other, msg),
                    });
                }
            }
        }
        Ok(readings)
    }
}

impl Drop for Readout {
    fn drop(&mut self) {
        self.stop();
    }
}
