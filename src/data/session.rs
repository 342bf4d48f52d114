//! Readout session: the header-then-value protocol as an explicit two-slot record.

use chrono::{DateTime, Local};
use tracing::{debug, trace};

use super::classify::{classify_line, LineKind};
use super::header::{compose_label, display_unit, parse_header, short_mode};
use super::scaling::{format_value, scale_for_unit, OVERLOAD_TEXT};

/// Placeholder shown before the first sample of a session.
pub const NO_VALUE: &str = "—";

/// One displayed measurement.
#[derive(Debug, Clone, PartialEq)]
pub struct Reading {
    /// Four-decimal magnitude or `OL`.
    pub value_text: String,
    /// Prefixed unit plus mode, e.g. `mV DC`.
    pub label: String,
    /// Mode alone, e.g. `DC`; empty when there is none.
    pub mode: String,
    /// Scaled magnitude matching `value_text`; `None` for overload.
    pub scaled: Option<f64>,
    /// Value as reported by the tool, in base units; `None` for overload.
    pub raw: Option<f64>,
    pub timestamp: DateTime<Local>,
}

impl Reading {
    pub fn is_overload(&self) -> bool {
        self.value_text == OVERLOAD_TEXT
    }

    /// `"1.5000 MΩ"`, or just the value when the label is empty.
    pub fn display_text(&self) -> String {
        if self.label.is_empty() {
            self.value_text.clone()
        } else {
            format!("{} {}", self.value_text, self.label)
        }
    }
}

/// Parser state for one acquisition session.
///
/// Holds the most recent raw header and the last reading produced. Header
/// lines only update the pending header; value lines combine it with the
/// sample into a [`Reading`].
#[derive(Debug, Default, Clone)]
pub struct ReadoutSession {
    pending_header: String,
    last: Option<Reading>,
}

impl ReadoutSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget the header and last reading (start of a new session).
    pub fn reset(&mut self) {
        self.pending_header.clear();
        self.last = None;
    }

    /// Raw header that will apply to the next value line.
    pub fn header(&self) -> &str {
        &self.pending_header
    }

    pub fn last_reading(&self) -> Option<&Reading> {
        self.last.as_ref()
    }

    /// Text for the big readout: the last value, or [`NO_VALUE`].
    pub fn value_text(&self) -> &str {
        self.last
            .as_ref()
            .map(|r| r.value_text.as_str())
            .unwrap_or(NO_VALUE)
    }

    /// Feed one output line. Returns a reading for numeric and overload lines.
    pub fn feed_line(&mut self, line: &str) -> Option<Reading> {
        let kind = classify_line(line);
        let token = line.trim();
        trace!(?kind, line = token, "classified line");
        let reading = match kind {
            LineKind::Blank | LineKind::DriverNoise | LineKind::Comment => None,
            LineKind::Header => {
                if token != self.pending_header {
                    debug!(header = token, "header changed");
                }
                self.pending_header = token.to_string();
                None
            }
            LineKind::Overload => Some(self.overload_reading()),
            LineKind::Numeric => match token.parse::<f64>() {
                Ok(v) => Some(self.numeric_reading(v)),
                Err(_) => None,
            },
        }?;
        self.last = Some(reading.clone());
        Some(reading)
    }

    /// Feed a raw output chunk (lossy UTF-8) and return every reading it produced.
    pub fn feed_chunk(&mut self, chunk: &[u8]) -> Vec<Reading> {
        let text = String::from_utf8_lossy(chunk);
        text.lines().filter_map(|l| self.feed_line(l)).collect()
    }

    fn overload_reading(&self) -> Reading {
        let (unit, mode) = parse_header(&self.pending_header);
        let mut unit_disp = display_unit(&unit).to_string();
        if unit_disp.is_empty() {
            unit_disp = self.pending_header.clone();
        }
        Reading {
            value_text: format_value(None, true),
            label: compose_label(&unit_disp, &mode),
            mode: short_mode(&unit_disp, &mode),
            scaled: None,
            raw: None,
            timestamp: Local::now(),
        }
    }

    fn numeric_reading(&self, v: f64) -> Reading {
        let (unit, mode) = parse_header(&self.pending_header);
        let (scaled, mut unit_disp) = scale_for_unit(v, display_unit(&unit));
        if unit_disp.is_empty() {
            unit_disp = if unit.is_empty() {
                self.pending_header.clone()
            } else {
                unit.clone()
            };
        }
        Reading {
            value_text: format_value(Some(scaled), false),
            label: compose_label(&unit_disp, &mode),
            mode: short_mode(&unit_disp, &mode),
            scaled: Some(scaled),
            raw: Some(v),
            timestamp: Local::now(),
        }
    }
}
