//! dmm-readout crate root: re-exports and module wiring.
//!
//! Polls `sigrok-cli` once per tick for a single multimeter sample, parses
//! its CSV output, and shows the latest value with SI-prefix scaling.
//!
//! - `data`: line classification, header parsing, scaling, the readout session
//! - `acquisition`: the per-poll command, polling engine, port and tool discovery
//! - `recorder`: raw line recording
//! - `readout`: glue driving one acquisition session
//! - `config`: persisted settings
//! - `app`: egui/eframe window

pub mod acquisition;
pub mod app;
pub mod config;
pub mod data;
pub mod error;
pub mod readout;
pub mod recorder;

// Public re-exports for a compact external API
pub use acquisition::{AcquisitionEvent, Poller, SigrokCommand};
pub use app::{run_readout, ReadoutApp};
pub use config::ReadoutConfig;
pub use data::classify::{classify_line, LineKind};
pub use data::header::parse_header;
pub use data::session::{Reading, ReadoutSession};
pub use error::{ReadoutError, Result};
pub use readout::Readout;
