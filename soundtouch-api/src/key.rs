//! Hardware key identifiers accepted by the `/key` endpoint.

/// Remote-control keys a speaker accepts.
///
/// Each key is sent as a press/release pair; see
/// [`SoundTouchClient::press_key`](crate::SoundTouchClient::press_key).
/// `Power` is a toggle, not an absolute on/off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Power,
    Play,
    Pause,
    PlayPause,
    Mute,
    VolumeUp,
    VolumeDown,
}

impl Key {
    /// Wire name of the key as the device expects it.
    pub fn as_str(&self) -> &'static str {
        match self {
            Key::Power => "POWER",
            Key::Play => "PLAY",
            Key::Pause => "PAUSE",
            Key::PlayPause => "PLAY_PAUSE",
            Key::Mute => "MUTE",
            Key::VolumeUp => "VOLUME_UP",
            Key::VolumeDown => "VOLUME_DOWN",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Key::Power, "POWER")]
    #[case(Key::PlayPause, "PLAY_PAUSE")]
    #[case(Key::VolumeUp, "VOLUME_UP")]
    #[case(Key::VolumeDown, "VOLUME_DOWN")]
    fn wire_names(#[case] key: Key, #[case] expected: &str) {
        assert_eq!(key.as_str(), expected);
    }
}
