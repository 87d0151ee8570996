//! Pure building blocks for the WebSocket opening handshake.
//!
//! This crate holds the I/O-free half of the upgrade path:
//!
//! - [`Headers`] — a case-insensitive header map for the already-parsed
//!   upgrade request
//! - [`derive_accept_key`] — the `Sec-WebSocket-Key` →
//!   `Sec-WebSocket-Accept` derivation (RFC 6455 §4.2.2)
//!
//! The negotiator that consumes these and talks to the network lives in
//! `wsock-http`.
//!
//! # Design Principles
//!
//! - No I/O, no observable side effects — everything here is testable
//!   against fixed vectors without standing up a connection
//! - Minimal dependencies (SHA-1 and base64 implemented locally)

#![forbid(unsafe_code)]
// Pedantic clippy lints allowed (style suggestions, not correctness issues)
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::must_use_candidate)]

pub mod accept;
pub mod headers;

pub use accept::{WS_GUID, derive_accept_key};
pub use headers::Headers;
