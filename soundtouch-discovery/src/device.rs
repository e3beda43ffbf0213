//! Device description parsing and validation.
//!
//! SoundTouch speakers answer SSDP as generic UPnP MediaRenderers, so the
//! description XML fetched from the LOCATION URL is what tells a Bose speaker
//! apart from every other renderer on the network.

use serde::Deserialize;

use crate::error::{DiscoveryError, Result};
use crate::{Device, API_PORT};

/// UPnP device description root element.
#[derive(Debug, Deserialize)]
pub struct Root {
    pub device: DeviceDescription,
}

/// Device description parsed from UPnP XML.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceDescription {
    pub device_type: String,
    pub friendly_name: String,
    pub manufacturer: String,
    pub model_name: String,
    pub model_description: Option<String>,
    pub serial_number: Option<String>,
    #[serde(rename = "UDN")]
    pub udn: String,
}

impl DeviceDescription {
    /// Parse a device description from XML.
    ///
    /// # Errors
    ///
    /// Returns `DiscoveryError::ParseError` if the XML is malformed or
    /// missing required fields.
    pub fn from_xml(xml: &str) -> Result<Self> {
        let root: Root = quick_xml::de::from_str(xml)
            .map_err(|e| DiscoveryError::ParseError(format!("Failed to parse device XML: {}", e)))?;

        Ok(root.device)
    }

    /// Check whether this description belongs to a SoundTouch speaker.
    pub fn is_soundtouch_device(&self) -> bool {
        self.manufacturer.to_lowercase().contains("bose")
            || self.model_name.to_lowercase().contains("soundtouch")
    }

    /// Convert to the public `Device` type, or reject a non-SoundTouch
    /// responder.
    ///
    /// `ip_address` comes from the SSDP LOCATION URL. The port is always the
    /// WebServer API port, not the one the description was served from.
    pub fn into_device(self, ip_address: String) -> Result<Device> {
        if !self.is_soundtouch_device() {
            return Err(DiscoveryError::InvalidDevice(format!(
                "'{}' by '{}' is not a SoundTouch speaker",
                self.friendly_name, self.manufacturer
            )));
        }

        Ok(Device {
            id: self.udn,
            name: self.friendly_name,
            ip_address,
            port: API_PORT,
            model_name: self.model_name,
        })
    }
}

/// Extract the host portion of a URL such as
/// "http://192.168.1.48:8091/XD/BO5EBO5E...".
pub fn extract_ip_from_url(url: &str) -> Option<String> {
    url.split("//")
        .nth(1)?
        .split(['/', ':'])
        .next()
        .filter(|host| !host.is_empty())
        .map(|host| host.to_string())
}
