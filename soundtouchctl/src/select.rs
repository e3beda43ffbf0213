//! Target selection: picking one speaker out of the discovery results.
//!
//! Discovery order is whatever the network yields, so "first" is only a
//! sensible default for single-speaker homes; `--device` and `--index` make
//! the choice explicit.

use thiserror::Error;

use soundtouch_discovery::Device;

/// How to pick the target speaker from the discovered list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// First device in discovery order (the default)
    First,
    /// Device at a fixed position in discovery order
    Index(usize),
    /// Device with a matching name, case-insensitive
    Name(String),
}

/// Errors that can occur during target selection.
#[derive(Debug, Error)]
pub enum SelectionError {
    #[error("No SoundTouch devices found on the network. Check that the speakers are powered and on this network.")]
    NoDevicesFound,

    #[error("Device '{name}' not found. Available devices:\n{available}")]
    DeviceNotFound { name: String, available: String },

    #[error("Device index {index} is out of range; {count} device(s) discovered")]
    IndexOutOfRange { index: usize, count: usize },
}

/// Pick one device from the discovery results.
///
/// An empty result set always fails with
/// [`SelectionError::NoDevicesFound`], whichever strategy is in use.
pub fn select(selection: &Selection, devices: Vec<Device>) -> Result<Device, SelectionError> {
    if devices.is_empty() {
        return Err(SelectionError::NoDevicesFound);
    }

    match selection {
        Selection::First => Ok(devices.into_iter().next().expect("checked non-empty")),
        Selection::Index(index) => {
            let count = devices.len();
            devices
                .into_iter()
                .nth(*index)
                .ok_or(SelectionError::IndexOutOfRange { index: *index, count })
        }
        Selection::Name(name) => {
            let available = format_device_list(&devices);
            devices
                .into_iter()
                .find(|device| device.name.eq_ignore_ascii_case(name))
                .ok_or(SelectionError::DeviceNotFound {
                    name: name.clone(),
                    available,
                })
        }
    }
}

/// Human-readable listing of discovered devices, one per line.
pub fn format_device_list(devices: &[Device]) -> String {
    if devices.is_empty() {
        return "  (none)".to_string();
    }

    devices
        .iter()
        .map(|device| format!("  - {} at {} [{}]", device.name, device.ip_address, device.model_name))
        .collect::<Vec<_>>()
        .join("\n")
}
