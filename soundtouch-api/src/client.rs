//! Blocking HTTP client for one speaker's WebServer API.

use std::time::Duration;

use serde::de::DeserializeOwned;

use soundtouch_discovery::Device;

use crate::error::{ApiError, Result};
use crate::key::Key;
use crate::model::{Info, NowPlaying, Volume};

/// Sender attribute the device requires on `/key` posts. Any stable string
/// works; "Gabbo" is the value the official apps use, and some firmware
/// revisions reject other senders.
const KEY_SENDER: &str = "Gabbo";

/// A client for the WebServer API of a single SoundTouch speaker.
///
/// Cheap to clone; every method is one or two blocking HTTP round trips with
/// no retries.
#[derive(Debug, Clone)]
pub struct SoundTouchClient {
    agent: ureq::Agent,
    base_url: String,
}

impl SoundTouchClient {
    /// Create a client for the API at `ip:port`.
    pub fn new(ip: &str, port: u16) -> Self {
        Self {
            agent: ureq::AgentBuilder::new()
                .timeout_connect(Duration::from_secs(5))
                .timeout_read(Duration::from_secs(10))
                .build(),
            base_url: format!("http://{}:{}", ip, port),
        }
    }

    /// Create a client for a discovered speaker.
    pub fn for_device(device: &Device) -> Self {
        Self::new(&device.ip_address, device.port)
    }

    /// Query static device information (`GET /info`).
    pub fn info(&self) -> Result<Info> {
        self.get("/info")
    }

    /// Query the current playback source (`GET /now_playing`).
    pub fn now_playing(&self) -> Result<NowPlaying> {
        self.get("/now_playing")
    }

    /// Query the current volume state (`GET /volume`).
    pub fn volume(&self) -> Result<Volume> {
        self.get("/volume")
    }

    /// Set the absolute volume level (`POST /volume`).
    ///
    /// The level is forwarded exactly as given; the device decides what it
    /// accepts and rejects out-of-range values with an HTTP error.
    pub fn set_volume(&self, level: i32) -> Result<()> {
        self.post("/volume", &format!("<volume>{}</volume>", level))
    }

    /// Send a hardware key as a press/release pair (`POST /key` twice).
    pub fn press_key(&self, key: Key) -> Result<()> {
        for state in ["press", "release"] {
            let body = format!(
                r#"<key state="{}" sender="{}">{}</key>"#,
                state,
                KEY_SENDER,
                key.as_str()
            );
            self.post("/key", &body)?;
        }
        Ok(())
    }

    /// Wake the speaker from standby.
    ///
    /// POWER is a toggle key, so the current source is checked first and the
    /// key is only sent when the speaker is actually in standby.
    pub fn power_on(&self) -> Result<()> {
        if self.now_playing()?.is_standby() {
            self.press_key(Key::Power)?;
        }
        Ok(())
    }

    /// Put the speaker into standby, unless it already is.
    pub fn power_off(&self) -> Result<()> {
        if !self.now_playing()?.is_standby() {
            self.press_key(Key::Power)?;
        }
        Ok(())
    }

    fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        let xml = self.agent.get(&url).call()?.into_string()?;

        quick_xml::de::from_str(&xml)
            .map_err(|e| ApiError::Parse(format!("{} response: {}", path, e)))
    }

    fn post(&self, path: &str, body: &str) -> Result<()> {
        let url = format!("{}{}", self.base_url, path);
        self.agent
            .post(&url)
            .set("Content-Type", "text/xml; charset=\"utf-8\"")
            .send_string(body)?;
        Ok(())
    }
}
