//! Handshake negotiation: ordered validation, sub-protocol selection,
//! and the single response write that completes the upgrade.
//!
//! Validation short-circuits on the first failing check. No failure
//! path writes to or closes the connection; the caller keeps the stream
//! and decides its own error response policy.

use asupersync::io::AsyncWrite;
use asupersync::net::TcpStream;
use std::future::poll_fn;
use std::io;
use std::pin::Pin;

use wsock_core::{Headers, derive_accept_key};

use crate::session::WebSocketSession;

/// The only handshake version this negotiator accepts.
pub const SUPPORTED_VERSION: &str = "13";

/// Why a handshake attempt was rejected.
///
/// Every variant carries enough context for the caller to log the
/// specific cause; none of them are retried.
#[derive(Debug)]
pub enum HandshakeError {
    /// `sec-websocket-version` missing or not `"13"`.
    UnsupportedVersion {
        /// The value the client sent, if any.
        found: Option<String>,
    },
    /// `sec-websocket-key` header absent.
    MissingKey,
    /// The server requires a sub-protocol the client did not offer.
    ProtocolNotOffered { required: String },
    /// The client offered sub-protocols but the server supports none.
    ProtocolNotSupported,
    /// None of the client's offered sub-protocols matched.
    ProtocolMismatch { required: String },
    /// The response write failed at the transport layer.
    Write(io::Error),
}

impl std::fmt::Display for HandshakeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnsupportedVersion { found: Some(v) } => {
                write!(f, "unsupported websocket version {v:?} (only version 13 is supported)")
            }
            Self::UnsupportedVersion { found: None } => {
                write!(f, "missing sec-websocket-version header (only version 13 is supported)")
            }
            Self::MissingKey => write!(f, "missing sec-websocket-key header"),
            Self::ProtocolNotOffered { required } => {
                write!(f, "server requires sub-protocol {required:?} but the client offered none")
            }
            Self::ProtocolNotSupported => {
                write!(f, "client requested a sub-protocol but the server supports none")
            }
            Self::ProtocolMismatch { required } => {
                write!(f, "none of the offered sub-protocols match the required {required:?}")
            }
            Self::Write(e) => write!(f, "failed to write handshake response: {e}"),
        }
    }
}

impl std::error::Error for HandshakeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Write(e) => Some(e),
            _ => None,
        }
    }
}

/// Outcome of a negotiation attempt.
///
/// Exactly one variant is ever produced. `Rejected` hands the
/// connection back: ownership transfers to the session only on success.
#[derive(Debug)]
pub enum NegotiationOutcome {
    /// Handshake complete; the `101` response has been written.
    Upgraded(WebSocketSession),
    /// Validation or the response write failed. Nothing useful was
    /// written; the caller disposes of the connection.
    Rejected {
        error: HandshakeError,
        connection: TcpStream,
    },
}

/// A validated handshake, ready to be written to the peer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Negotiation {
    /// Derived `Sec-WebSocket-Accept` value.
    pub accept_key: String,
    /// Sub-protocol both sides agreed on, in the server's canonical
    /// casing. `None` when no protocol was negotiated.
    pub protocol: Option<String>,
}

/// Run the ordered handshake checks without touching the connection.
///
/// Checks run in a fixed order — version, key, sub-protocol — and the
/// first failure wins. An empty `server_protocol` string is treated the
/// same as `None`.
pub fn validate(
    headers: &Headers,
    server_protocol: Option<&str>,
) -> Result<Negotiation, HandshakeError> {
    let server_protocol = server_protocol.filter(|p| !p.is_empty());

    // The version must be the exact literal "13"; anything else
    // (including a padded "13 ") is rejected.
    match headers.get("sec-websocket-version") {
        Some(v) if v == SUPPORTED_VERSION => {}
        found => {
            return Err(HandshakeError::UnsupportedVersion {
                found: found.map(str::to_owned),
            });
        }
    }

    // Presence only; the value is opaque input to the key derivation.
    let key = headers
        .get("sec-websocket-key")
        .ok_or(HandshakeError::MissingKey)?;

    let protocol = negotiate_subprotocol(headers.get("sec-websocket-protocol"), server_protocol)?;

    Ok(Negotiation {
        accept_key: derive_accept_key(key),
        protocol,
    })
}

/// Match the client's offered sub-protocols against the one the server
/// supports.
///
/// The offer list uses the literal `", "` separator; tokens are trimmed
/// and compared ASCII-case-insensitively. A match yields the server's
/// canonical-cased name, not the client's token.
fn negotiate_subprotocol(
    offered: Option<&str>,
    supported: Option<&str>,
) -> Result<Option<String>, HandshakeError> {
    match (offered, supported) {
        (None, None) => Ok(None),
        (None, Some(required)) => Err(HandshakeError::ProtocolNotOffered {
            required: required.to_owned(),
        }),
        // A client that asks for a protocol when the server has none
        // configured is a hard failure, not "accept none".
        (Some(_), None) => Err(HandshakeError::ProtocolNotSupported),
        (Some(list), Some(required)) => {
            let matched = list
                .split(", ")
                .any(|token| token.trim().eq_ignore_ascii_case(required));
            if matched {
                Ok(Some(required.to_owned()))
            } else {
                Err(HandshakeError::ProtocolMismatch {
                    required: required.to_owned(),
                })
            }
        }
    }
}

/// Build the `101` response bytes.
///
/// Line order and CRLF termination are fixed by the wire contract; the
/// `Sec-Websocket-Protocol` header appears only when a sub-protocol was
/// negotiated.
pub fn build_switching_response(accept_key: &str, protocol: Option<&str>) -> Vec<u8> {
    let mut response = format!(
        "HTTP/1.1 101 Web Socket Protocol Handshake\r\n\
         Sec-Websocket-Accept: {accept_key}\r\n\
         Connection: Upgrade\r\n\
         Upgrade: websocket\r\n"
    );
    if let Some(proto) = protocol {
        response.push_str(&format!("Sec-Websocket-Protocol: {proto}\r\n"));
    }
    response.push_str("\r\n");
    response.into_bytes()
}

/// Negotiate a WebSocket upgrade over `connection`.
///
/// Validates `headers`, and on success writes the `101` response and
/// wraps the connection in a server-role [`WebSocketSession`]. The
/// write is awaited to completion (or failure) before the outcome is
/// returned; a write failure surfaces as [`HandshakeError::Write`].
///
/// One negotiation per connection: the caller must not run concurrent
/// attempts on the same stream.
pub async fn negotiate(
    headers: &Headers,
    mut connection: TcpStream,
    server_protocol: Option<&str>,
) -> NegotiationOutcome {
    let negotiation = match validate(headers, server_protocol) {
        Ok(negotiation) => negotiation,
        Err(error) => return NegotiationOutcome::Rejected { error, connection },
    };

    let response =
        build_switching_response(&negotiation.accept_key, negotiation.protocol.as_deref());
    if let Err(e) = write_response(&mut connection, &response).await {
        return NegotiationOutcome::Rejected {
            error: HandshakeError::Write(e),
            connection,
        };
    }

    NegotiationOutcome::Upgraded(WebSocketSession::server(connection, negotiation.protocol))
}

async fn write_response(stream: &mut TcpStream, mut buf: &[u8]) -> io::Result<()> {
    while !buf.is_empty() {
        let n = poll_fn(|cx| Pin::new(&mut *stream).poll_write(cx, buf)).await?;
        if n == 0 {
            return Err(io::Error::new(
                io::ErrorKind::WriteZero,
                "connection closed while writing handshake response",
            ));
        }
        buf = &buf[n..];
    }
    poll_fn(|cx| Pin::new(&mut *stream).poll_flush(cx)).await
}
