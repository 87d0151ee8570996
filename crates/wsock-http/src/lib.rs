//! Server-side WebSocket opening-handshake negotiation (RFC 6455 §4.2).
//!
//! This crate turns an already-parsed HTTP upgrade request into a
//! [`WebSocketSession`]: it validates the handshake headers, negotiates
//! an optional sub-protocol, writes the `101` response over the
//! connection, and hands the upgraded stream back to the caller. Frame
//! encoding, masking, fragmentation, and keep-alive all belong to the
//! downstream frame layer, not to this crate.
//!
//! # Example
//!
//! ```ignore
//! use wsock_http::{Headers, NegotiationOutcome, negotiate};
//!
//! async fn upgrade(headers: &Headers, stream: asupersync::net::TcpStream) {
//!     match negotiate(headers, stream, Some("chat")).await {
//!         NegotiationOutcome::Upgraded(session) => {
//!             // hand session.into_stream() to the frame layer
//!         }
//!         NegotiationOutcome::Rejected { error, connection } => {
//!             // the negotiator wrote nothing; send your own 400 over
//!             // `connection` and close it
//!             let _ = (error, connection);
//!         }
//!     }
//! }
//! ```

#![forbid(unsafe_code)]
// Pedantic clippy lints allowed (style suggestions, not correctness issues)
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::must_use_candidate)]

pub mod handshake;
pub mod session;

pub use handshake::{
    HandshakeError, Negotiation, NegotiationOutcome, SUPPORTED_VERSION, build_switching_response,
    negotiate, validate,
};
pub use session::{Role, WebSocketSession};

// Re-export the pure layer so callers need a single dependency.
pub use wsock_core::{Headers, WS_GUID, derive_accept_key};
