//! Serial port listing.

use serialport::SerialPortType;
use tracing::{debug, warn};

/// A selectable serial port: the device passed to the driver and a label for the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerialPortInfo {
    pub device: String,
    pub label: String,
}

impl SerialPortInfo {
    pub fn new(device: impl Into<String>) -> Self {
        let device = device.into();
        Self {
            label: device.clone(),
            device,
        }
    }

    /// `"<device> - <description>"`, or just the device without a description.
    pub fn described(device: impl Into<String>, description: Option<&str>) -> Self {
        let device = device.into();
        match description.map(str::trim).filter(|d| !d.is_empty()) {
            Some(desc) => Self {
                label: format!("{device} - {desc}"),
                device,
            },
            None => Self::new(device),
        }
    }
}

/// `COM1`..`COM32`, used when enumeration fails or finds nothing.
pub fn fallback_ports() -> Vec<SerialPortInfo> {
    (1..=32).map(|i| SerialPortInfo::new(format!("COM{i}"))).collect()
}

/// Human-readable description of a port, from USB product/manufacturer strings.
pub fn port_description(port_type: &SerialPortType) -> Option<String> {
    match port_type {
        SerialPortType::UsbPort(usb) => match (&usb.product, &usb.manufacturer) {
            (Some(product), _) if !product.trim().is_empty() => Some(product.clone()),
            (_, Some(manufacturer)) if !manufacturer.trim().is_empty() => {
                Some(format!("{manufacturer} USB serial"))
            }
            _ => Some(format!("USB serial {:04x}:{:04x}", usb.vid, usb.pid)),
        },
        SerialPortType::BluetoothPort => Some("Bluetooth".to_string()),
        SerialPortType::PciPort => Some("PCI serial".to_string()),
        SerialPortType::Unknown => None,
    }
}

/// List the serial ports present on this machine, sorted by device name.
pub fn list_serial_ports() -> Vec<SerialPortInfo> {
    match serialport::available_ports() {
        Ok(found) if !found.is_empty() => {
            let mut ports: Vec<SerialPortInfo> = found
                .iter()
                .map(|p| {
                    SerialPortInfo::described(
                        p.port_name.as_str(),
                        port_description(&p.port_type).as_deref(),
                    )
                })
                .collect();
            ports.sort_by(|a, b| a.device.cmp(&b.device));
            debug!(count = ports.len(), "serial ports enumerated");
            ports
        }
        Ok(_) => {
            debug!("no serial ports found, offering COM1..COM32");
            fallback_ports()
        }
        Err(e) => {
            warn!("serial port enumeration failed: {e}");
            fallback_ports()
        }
    }
}
