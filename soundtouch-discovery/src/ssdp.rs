//! SSDP (Simple Service Discovery Protocol) search for UPnP devices.
//!
//! Internal to the crate: sends a single M-SEARCH and collects the unicast
//! responses that arrive before the read timeout expires.

use std::net::UdpSocket;
use std::time::Duration;

use crate::error::{DiscoveryError, Result};

const SSDP_MULTICAST_ADDR: &str = "239.255.255.250:1900";

/// One parsed M-SEARCH response.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SsdpResponse {
    pub location: String,
    pub search_target: String,
    pub usn: String,
    pub server: Option<String>,
}

/// Single-shot SSDP search client.
pub(crate) struct SsdpClient {
    socket: UdpSocket,
}

impl SsdpClient {
    /// Bind a UDP socket whose read timeout bounds the whole response window.
    pub fn new(timeout: Duration) -> Result<Self> {
        let socket = UdpSocket::bind("0.0.0.0:0")
            .map_err(|e| DiscoveryError::NetworkError(format!("Failed to bind UDP socket: {}", e)))?;

        socket
            .set_read_timeout(Some(timeout))
            .map_err(|e| DiscoveryError::NetworkError(format!("Failed to set read timeout: {}", e)))?;

        socket
            .set_multicast_loop_v4(true)
            .map_err(|e| DiscoveryError::NetworkError(format!("Failed to set multicast loop: {}", e)))?;

        Ok(Self { socket })
    }

    /// Send an M-SEARCH for `search_target` and collect every response that
    /// arrives before the timeout. Malformed or non-UTF-8 datagrams are
    /// skipped.
    pub fn search(&self, search_target: &str) -> Result<Vec<SsdpResponse>> {
        let request = format!(
            "M-SEARCH * HTTP/1.1\r\n\
             HOST: {SSDP_MULTICAST_ADDR}\r\n\
             MAN: \"ssdp:discover\"\r\n\
             MX: 2\r\n\
             ST: {search_target}\r\n\
             USER-AGENT: soundtouchctl/0.1 UPnP/1.0\r\n\
             \r\n"
        );

        self.socket
            .send_to(request.as_bytes(), SSDP_MULTICAST_ADDR)
            .map_err(|e| DiscoveryError::NetworkError(format!("Failed to send M-SEARCH: {}", e)))?;

        let mut responses = Vec::new();
        let mut buffer = [0u8; 2048];

        loop {
            match self.socket.recv_from(&mut buffer) {
                Ok((size, _)) => {
                    let Ok(text) = std::str::from_utf8(&buffer[..size]) else {
                        continue;
                    };
                    if let Some(response) = parse_ssdp_response(text) {
                        responses.push(response);
                    }
                }
                Err(e)
                    if e.kind() == std::io::ErrorKind::WouldBlock
                        || e.kind() == std::io::ErrorKind::TimedOut =>
                {
                    // Response window closed.
                    break;
                }
                Err(e) => {
                    return Err(DiscoveryError::NetworkError(format!("Socket error: {}", e)));
                }
            }
        }

        Ok(responses)
    }
}

/// Parse the headers of one SSDP response datagram.
///
/// LOCATION, ST and USN are required; SERVER is carried along when present
/// because it is the cheapest way to spot a SoundTouch responder.
fn parse_ssdp_response(response: &str) -> Option<SsdpResponse> {
    let mut location = None;
    let mut search_target = None;
    let mut usn = None;
    let mut server = None;

    for line in response.lines() {
        let line = line.trim();

        if let Some(value) = header_value(line, "LOCATION") {
            location = Some(value);
        } else if let Some(value) = header_value(line, "ST") {
            search_target = Some(value);
        } else if let Some(value) = header_value(line, "USN") {
            usn = Some(value);
        } else if let Some(value) = header_value(line, "SERVER") {
            server = Some(value);
        }
    }

    Some(SsdpResponse {
        location: location?,
        search_target: search_target?,
        usn: usn?,
        server,
    })
}

/// Extract the value of `name` from a "NAME: value" header line,
/// case-insensitively.
fn header_value(line: &str, name: &str) -> Option<String> {
    let (key, value) = line.split_once(':')?;
    if key.trim().eq_ignore_ascii_case(name) {
        Some(value.trim().to_string())
    } else {
        None
    }
}
