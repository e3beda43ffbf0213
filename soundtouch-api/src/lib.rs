//! SoundTouch device control API
//!
//! This crate provides a blocking client for the WebServer API that every
//! Bose SoundTouch speaker exposes on port 8090. Requests and responses are
//! small XML documents over plain HTTP; there is no session state.
//!
//! ```no_run
//! use soundtouch_api::SoundTouchClient;
//!
//! let client = SoundTouchClient::new("192.168.1.48", 8090);
//! let info = client.info()?;
//! println!("Speaker: {}", info.name);
//! client.set_volume(25)?;
//! # Ok::<(), soundtouch_api::ApiError>(())
//! ```
//!
//! Commands are not retried. Every failure — transport, HTTP status, or
//! response parsing — surfaces as an [`ApiError`] for the caller to handle.

pub mod client;
pub mod error;
pub mod key;
pub mod model;

pub use client::SoundTouchClient;
pub use error::{ApiError, Result};
pub use key::Key;
pub use model::{Info, NowPlaying, Volume};
