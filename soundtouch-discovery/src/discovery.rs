//! Core discovery logic and iterator implementation.
//!
//! Discovery runs in two stages:
//! 1. An SSDP M-SEARCH for UPnP MediaRenderers, collected up front while the
//!    iterator is constructed.
//! 2. A per-responder HTTP fetch of the UPnP device description, performed
//!    lazily as the iterator is advanced, keeping only validated SoundTouch
//!    speakers.

use std::collections::HashSet;
use std::time::Duration;

use crate::device::{extract_ip_from_url, DeviceDescription};
use crate::error::{DiscoveryError, Result};
use crate::ssdp::{SsdpClient, SsdpResponse};
use crate::DeviceEvent;

/// SoundTouch speakers register as plain UPnP MediaRenderers; the Bose
/// identity only shows up in headers and the device description.
const SEARCH_TARGET: &str = "urn:schemas-upnp-org:device:MediaRenderer:1";

/// Iterator that yields SoundTouch speakers found on the local network.
///
/// Handles deduplication, filtering of non-Bose renderers, and fetch/parse
/// failures (which skip the responder rather than abort the search).
pub struct DiscoveryIterator {
    responses: std::vec::IntoIter<SsdpResponse>,
    seen_locations: HashSet<String>,
    http_client: reqwest::blocking::Client,
}

impl DiscoveryIterator {
    /// Run the SSDP search and return an iterator over the responders.
    ///
    /// Blocks for up to `timeout` collecting SSDP responses; description
    /// fetches happen during iteration and use the same timeout.
    pub(crate) fn new(timeout: Duration) -> Result<Self> {
        let ssdp_client = SsdpClient::new(timeout)?;
        let responses = ssdp_client.search(SEARCH_TARGET)?;

        let http_client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DiscoveryError::NetworkError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            responses: responses.into_iter(),
            seen_locations: HashSet::new(),
            http_client,
        })
    }

    /// Cheap pre-filter on SSDP headers, so obviously foreign renderers are
    /// skipped without an HTTP round trip.
    fn is_likely_soundtouch(response: &SsdpResponse) -> bool {
        if let Some(ref server) = response.server {
            let server = server.to_lowercase();
            if server.contains("soundtouch") || server.contains("bose") {
                return true;
            }
            // A SERVER header that names another vendor is disqualifying.
            return false;
        }

        // Without a SERVER header the description has to decide.
        response.search_target.contains("MediaRenderer") || response.usn.contains("BO5EBO5E")
    }

    fn fetch_device_description(&self, location: &str) -> Result<DeviceDescription> {
        let response = self
            .http_client
            .get(location)
            .send()
            .map_err(|e| DiscoveryError::NetworkError(format!("Failed to fetch device description: {}", e)))?;

        let xml = response
            .text()
            .map_err(|e| DiscoveryError::NetworkError(format!("Failed to read response body: {}", e)))?;

        DeviceDescription::from_xml(&xml)
    }
}

impl Iterator for DiscoveryIterator {
    type Item = DeviceEvent;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let response = self.responses.next()?;

            if !self.seen_locations.insert(response.location.clone()) {
                continue;
            }

            if !Self::is_likely_soundtouch(&response) {
                continue;
            }

            let Some(ip_address) = extract_ip_from_url(&response.location) else {
                continue;
            };

            // Responders that cannot be fetched, parsed, or validated as Bose
            // hardware are skipped, not surfaced as errors.
            let Ok(description) = self.fetch_device_description(&response.location) else {
                continue;
            };
            let Ok(device) = description.into_device(ip_address) else {
                continue;
            };

            return Some(DeviceEvent::Found(device));
        }
    }
}
