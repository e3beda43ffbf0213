//! SoundTouch speaker discovery library
//!
//! This crate discovers Bose SoundTouch speakers on the local network using
//! SSDP (Simple Service Discovery Protocol) and UPnP device descriptions.
//!
//! # Quick Start
//!
//! ```no_run
//! use soundtouch_discovery::discover;
//!
//! let devices = discover()?;
//! for device in devices {
//!     println!("Found {} at {}", device.name, device.ip_address);
//! }
//! # Ok::<(), soundtouch_discovery::DiscoveryError>(())
//! ```
//!
//! A failed network search is reported as an error; a search that completes
//! without finding any speakers returns an empty `Vec`. Callers that need to
//! tell "the network query broke" apart from "nothing answered" can rely on
//! that distinction.
//!
//! # Iterator-based Discovery
//!
//! For streaming processing or early termination, use the iterator API:
//!
//! ```no_run
//! use soundtouch_discovery::{discover_iter, DeviceEvent};
//!
//! for event in discover_iter()? {
//!     match event {
//!         DeviceEvent::Found(device) => {
//!             println!("Found: {}", device.name);
//!             // Can break early if needed
//!         }
//!     }
//! }
//! # Ok::<(), soundtouch_discovery::DiscoveryError>(())
//! ```

mod error;
mod ssdp;
pub mod device;
mod discovery;

pub use error::{DiscoveryError, Result};
pub use discovery::DiscoveryIterator;

use std::time::Duration;

/// Port of the SoundTouch WebServer API on every speaker.
///
/// The UPnP description is served from whatever port the speaker advertises
/// in its SSDP LOCATION header; the control API always lives on 8090.
pub const API_PORT: u16 = 8090;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(3);

/// A discovered SoundTouch speaker.
///
/// Contains the metadata needed to identify the speaker and connect to its
/// WebServer API.
#[derive(Debug, Clone)]
pub struct Device {
    /// Unique device identifier (UDN), e.g. "uuid:BO5EBO5E-F00D-F00D-FEED-000C8A0B1C2D"
    pub id: String,
    /// Friendly name of the speaker
    pub name: String,
    /// IP address of the speaker
    pub ip_address: String,
    /// WebServer API port (always 8090)
    pub port: u16,
    /// Model name (e.g. "SoundTouch 20", "SoundTouch 300")
    pub model_name: String,
}

/// Events emitted during device discovery.
#[derive(Debug, Clone)]
pub enum DeviceEvent {
    /// A SoundTouch speaker was found on the network
    Found(Device),
}

/// Discover all SoundTouch speakers on the local network with a default
/// 3-second timeout.
pub fn discover() -> Result<Vec<Device>> {
    discover_with_timeout(DEFAULT_TIMEOUT)
}

/// Discover all SoundTouch speakers on the local network with a custom timeout.
///
/// The timeout bounds both the SSDP response window and the per-device
/// description fetch.
///
/// # Errors
///
/// Returns `DiscoveryError` when the underlying network search cannot be
/// performed (socket setup or the multicast send failed). Zero discovered
/// devices is not an error.
pub fn discover_with_timeout(timeout: Duration) -> Result<Vec<Device>> {
    Ok(discover_iter_with_timeout(timeout)?
        .map(|event| match event {
            DeviceEvent::Found(device) => device,
        })
        .collect())
}

/// Get an iterator over discovered speakers with a default 3-second timeout.
pub fn discover_iter() -> Result<DiscoveryIterator> {
    discover_iter_with_timeout(DEFAULT_TIMEOUT)
}

/// Get an iterator over discovered speakers with a custom timeout.
///
/// Constructing the iterator performs the SSDP search, so this call blocks
/// for up to `timeout` while responses are collected. Iteration then fetches
/// and validates one device description per yielded event, which allows early
/// termination before every responder has been inspected.
pub fn discover_iter_with_timeout(timeout: Duration) -> Result<DiscoveryIterator> {
    DiscoveryIterator::new(timeout)
}
