//! Running `sigrok-cli` and collecting its output.

pub mod command;
pub mod locate;
pub mod poller;
pub mod ports;

pub use command::SigrokCommand;
pub use locate::find_sigrok_default;
pub use poller::{AcquisitionEvent, Poller};
pub use ports::{list_serial_ports, SerialPortInfo};
