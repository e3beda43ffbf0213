//! Device gateway: the minimal speaker contract the rest of the tool
//! programs against, plus its real SoundTouch-backed implementation.

use soundtouch_api::{ApiError, SoundTouchClient};
use soundtouch_discovery::Device;

/// The operations this tool needs from a speaker.
///
/// The trait is the seam between the transition scheduler and the network:
/// production code drives a [`SoundTouchSpeaker`], tests drive a recording
/// double.
pub trait Speaker {
    fn name(&self) -> &str;
    fn power_on(&self) -> Result<(), ApiError>;
    fn power_off(&self) -> Result<(), ApiError>;
    fn set_volume(&self, level: i32) -> Result<(), ApiError>;
}

/// A discovered speaker driven over its WebServer API.
///
/// Every command announces itself on stdout before it is sent, so a user
/// watching the console sees intent before effect.
pub struct SoundTouchSpeaker {
    device: Device,
    client: SoundTouchClient,
}

impl SoundTouchSpeaker {
    pub fn new(device: Device) -> Self {
        let client = SoundTouchClient::for_device(&device);
        Self { device, client }
    }

    /// Direct access to the underlying API client, for reads that are not
    /// part of the gateway contract (e.g. the `status` command).
    pub fn client(&self) -> &SoundTouchClient {
        &self.client
    }
}

impl Speaker for SoundTouchSpeaker {
    fn name(&self) -> &str {
        &self.device.name
    }

    fn power_on(&self) -> Result<(), ApiError> {
        println!("Turning on");
        self.client.power_on()
    }

    fn power_off(&self) -> Result<(), ApiError> {
        println!("Turning off");
        self.client.power_off()
    }

    fn set_volume(&self, level: i32) -> Result<(), ApiError> {
        println!("Setting volume to: {}", level);
        self.client.set_volume(level)
    }
}
