//! Desktop application for the readout.
//!
//! | Sub-module        | Responsibility |
//! | ----------------- | -------------- |
//! | [`readout_app`]   | [`ReadoutApp`] state and its [`eframe::App`] frame loop |
//! | [`live_ui`]       | Live tab: connection controls, big readout, trend plot |
//! | [`settings_ui`]   | Settings tab: tool path, recording, polling, save/load |
//! | [`run`]           | [`run_readout()`] entry point and icon loading |

mod live_ui;
mod readout_app;
mod run;
mod settings_ui;

pub use readout_app::ReadoutApp;
pub use run::run_readout;

/// Top-level tabs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Live,
    Settings,
}
