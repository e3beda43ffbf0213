//! HTTP-level tests for `SoundTouchClient` against a mock WebServer API.

use mockito::{Matcher, Server, ServerGuard};
use soundtouch_api::{ApiError, Key, SoundTouchClient};

const INFO_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" ?>
<info deviceID="000C8A0B1C2D">
  <name>Living Room</name>
  <type>SoundTouch 20</type>
</info>"#;

fn standby_xml(standby: bool) -> String {
    let source = if standby { "STANDBY" } else { "INTERNET_RADIO" };
    format!(r#"<nowPlaying deviceID="000C8A0B1C2D" source="{source}"></nowPlaying>"#)
}

fn client_for(server: &ServerGuard) -> SoundTouchClient {
    let host_with_port = server.host_with_port();
    let (host, port) = host_with_port
        .split_once(':')
        .expect("mockito host should be host:port");
    SoundTouchClient::new(host, port.parse().expect("mockito port"))
}

#[test]
fn info_is_fetched_and_parsed() {
    let mut server = Server::new();
    let mock = server
        .mock("GET", "/info")
        .with_status(200)
        .with_header("content-type", "text/xml")
        .with_body(INFO_XML)
        .create();

    let info = client_for(&server).info().unwrap();

    assert_eq!(info.device_id, "000C8A0B1C2D");
    assert_eq!(info.name, "Living Room");
    assert_eq!(info.device_type, "SoundTouch 20");
    mock.assert();
}

#[test]
fn set_volume_posts_the_level_verbatim() {
    let mut server = Server::new();
    let mock = server
        .mock("POST", "/volume")
        .match_body(Matcher::Exact("<volume>42</volume>".to_string()))
        .with_status(200)
        .create();

    client_for(&server).set_volume(42).unwrap();
    mock.assert();
}

#[test]
fn out_of_range_volume_is_forwarded_not_clamped() {
    let mut server = Server::new();
    let mock = server
        .mock("POST", "/volume")
        .match_body(Matcher::Exact("<volume>250</volume>".to_string()))
        .with_status(400)
        .create();

    let err = client_for(&server).set_volume(250).unwrap_err();

    assert!(matches!(err, ApiError::Status(400)));
    mock.assert();
}

#[test]
fn press_key_sends_press_then_release() {
    let mut server = Server::new();
    let press = server
        .mock("POST", "/key")
        .match_body(Matcher::Exact(
            r#"<key state="press" sender="Gabbo">POWER</key>"#.to_string(),
        ))
        .with_status(200)
        .create();
    let release = server
        .mock("POST", "/key")
        .match_body(Matcher::Exact(
            r#"<key state="release" sender="Gabbo">POWER</key>"#.to_string(),
        ))
        .with_status(200)
        .create();

    client_for(&server).press_key(Key::Power).unwrap();

    press.assert();
    release.assert();
}

#[test]
fn power_on_toggles_only_from_standby() {
    let mut server = Server::new();
    let now_playing = server
        .mock("GET", "/now_playing")
        .with_status(200)
        .with_body(standby_xml(true))
        .create();
    let key_posts = server
        .mock("POST", "/key")
        .match_body(Matcher::Regex("POWER".to_string()))
        .with_status(200)
        .expect(2)
        .create();

    client_for(&server).power_on().unwrap();
    now_playing.assert();
    key_posts.assert();
}

#[test]
fn power_on_is_a_no_op_while_playing() {
    let mut server = Server::new();
    let now_playing = server
        .mock("GET", "/now_playing")
        .with_status(200)
        .with_body(standby_xml(false))
        .create();
    let key_posts = server.mock("POST", "/key").expect(0).create();

    client_for(&server).power_on().unwrap();
    now_playing.assert();
    key_posts.assert();
}

#[test]
fn power_off_toggles_only_while_playing() {
    let mut server = Server::new();
    let now_playing = server
        .mock("GET", "/now_playing")
        .with_status(200)
        .with_body(standby_xml(false))
        .create();
    let key_posts = server
        .mock("POST", "/key")
        .match_body(Matcher::Regex("POWER".to_string()))
        .with_status(200)
        .expect(2)
        .create();

    client_for(&server).power_off().unwrap();
    now_playing.assert();
    key_posts.assert();
}

#[test]
fn power_off_is_a_no_op_in_standby() {
    let mut server = Server::new();
    let now_playing = server
        .mock("GET", "/now_playing")
        .with_status(200)
        .with_body(standby_xml(true))
        .create();
    let key_posts = server.mock("POST", "/key").expect(0).create();

    client_for(&server).power_off().unwrap();
    now_playing.assert();
    key_posts.assert();
}

#[test]
fn device_rejection_surfaces_http_status() {
    let mut server = Server::new();
    let mock = server.mock("POST", "/volume").with_status(500).create();

    let err = client_for(&server).set_volume(20).unwrap_err();
    assert!(matches!(err, ApiError::Status(500)));
    mock.assert();
}

#[test]
fn garbled_response_is_a_parse_error() {
    let mut server = Server::new();
    let mock = server
        .mock("GET", "/volume")
        .with_status(200)
        .with_body("<volume><targetvolume>not-a-number</targetvolume>")
        .create();

    let err = client_for(&server).volume().unwrap_err();
    assert!(matches!(err, ApiError::Parse(_)));
    mock.assert();
}

#[test]
fn volume_state_is_parsed() {
    let mut server = Server::new();
    let _mock = server
        .mock("GET", "/volume")
        .with_status(200)
        .with_body(
            r#"<volume deviceID="000C8A0B1C2D">
  <targetvolume>30</targetvolume>
  <actualvolume>30</actualvolume>
  <muteenabled>true</muteenabled>
</volume>"#,
        )
        .create();

    let volume = client_for(&server).volume().unwrap();
    assert_eq!(volume.target_volume, 30);
    assert_eq!(volume.actual_volume, 30);
    assert!(volume.mute_enabled);
}
