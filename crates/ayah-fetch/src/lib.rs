//! Client for the AlQuran.cloud verse API.
//!
//! One verse is one GET for the Arabic text and, optionally, one more for a
//! translation edition. Nothing is cached or retried.

pub mod client;
pub mod error;

pub use client::{ClientConfig, FetchOutcome, VerseClient, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
pub use error::UpstreamError;
