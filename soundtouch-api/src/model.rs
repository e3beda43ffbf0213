//! Response models for the WebServer API endpoints.
//!
//! Each type mirrors one endpoint's XML document. Unknown child elements are
//! ignored, so firmware additions do not break parsing.

use serde::Deserialize;

/// Source name a speaker reports while powered down.
const STANDBY_SOURCE: &str = "STANDBY";

/// Response of `GET /info`.
///
/// ```xml
/// <info deviceID="000C8A0B1C2D">
///   <name>Living Room</name>
///   <type>SoundTouch 20</type>
/// </info>
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct Info {
    #[serde(rename = "@deviceID")]
    pub device_id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub device_type: String,
}

/// Response of `GET /now_playing`, reduced to what power handling needs.
#[derive(Debug, Clone, Deserialize)]
pub struct NowPlaying {
    #[serde(rename = "@deviceID")]
    pub device_id: String,
    #[serde(rename = "@source")]
    pub source: String,
}

impl NowPlaying {
    /// Whether the speaker is powered down.
    pub fn is_standby(&self) -> bool {
        self.source == STANDBY_SOURCE
    }
}

/// Response of `GET /volume`.
///
/// `target_volume` is the level the device is moving toward;
/// `actual_volume` lags behind it while the hardware ramps.
#[derive(Debug, Clone, Deserialize)]
pub struct Volume {
    #[serde(rename = "targetvolume")]
    pub target_volume: i32,
    #[serde(rename = "actualvolume")]
    pub actual_volume: i32,
    #[serde(rename = "muteenabled")]
    pub mute_enabled: bool,
}
