//! Outbound call placement through the Twilio REST API.
//!
//! The only operation this service needs is "dial a number and stream the
//! call's audio somewhere". [`stream_twiml`] renders the bridging
//! instruction and [`TwilioClient::place_call`] submits it.

pub mod client;
pub mod config;
pub mod error;
pub mod twiml;

pub use client::{PlacedCall, TwilioClient};
pub use config::{TwilioConfig, DEFAULT_API_BASE};
pub use error::TelephonyError;
pub use twiml::stream_twiml;
