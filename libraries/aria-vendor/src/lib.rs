//! Aria Player - Stream Vendors
//!
//! HTTP fetching of remote audio streams and the default
//! [`aria_core::StreamResolver`] implementation.
//!
//! The playback core asks a resolver for two things: a playable URL for a
//! track, and the raw bytes behind a URL. [`DirectResolver`] covers the common
//! case where the catalog layer has already attached a short-lived stream URL
//! to the track; [`HttpStreamFetcher`] does the byte transfer with sane
//! timeouts.

mod error;
mod fetch;

pub use error::{Result, VendorError};
pub use fetch::{DirectResolver, HttpStreamFetcher};
