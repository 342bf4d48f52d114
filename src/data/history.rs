//! Rolling buffer of recent readings for the trend plot.

use std::collections::VecDeque;

use chrono::{DateTime, Local};

use super::session::Reading;

/// Recent `[seconds_since_first, scaled_value]` points for a single label.
///
/// The buffer is emptied whenever the label changes (e.g. the meter dial moves
/// from V to Ω) so one plot never mixes units.
#[derive(Debug, Clone)]
pub struct ReadingHistory {
    points: VecDeque<[f64; 2]>,
    label: String,
    origin: Option<DateTime<Local>>,
    pub max_points: usize,
    /// Visible time window in seconds.
    pub time_window: f64,
}

impl Default for ReadingHistory {
    fn default() -> Self {
        Self::new(2_000, 120.0)
    }
}

impl ReadingHistory {
    pub fn new(max_points: usize, time_window: f64) -> Self {
        Self {
            points: VecDeque::new(),
            label: String::new(),
            origin: None,
            max_points,
            time_window,
        }
    }

    /// Add a reading. Overload readings are skipped; a label change restarts the buffer.
    pub fn push(&mut self, reading: &Reading) {
        let Some(y) = reading.scaled else {
            return;
        };
        if reading.label != self.label {
            self.clear();
            self.label = reading.label.clone();
        }
        let origin = *self.origin.get_or_insert(reading.timestamp);
        let t = (reading.timestamp - origin).num_microseconds().unwrap_or(0) as f64 * 1e-6;

        self.points.push_back([t, y]);
        while self.points.len() > self.max_points {
            self.points.pop_front();
        }
        let cutoff = t - self.time_window;
        while let Some(&[t0, _]) = self.points.front() {
            if t0 < cutoff {
                self.points.pop_front();
            } else {
                break;
            }
        }
    }

    pub fn clear(&mut self) {
        self.points.clear();
        self.label.clear();
        self.origin = None;
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> Vec<[f64; 2]> {
        self.points.iter().copied().collect()
    }
}
