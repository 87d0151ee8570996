//! The upgraded session handle.

use asupersync::net::TcpStream;

/// Which side of the connection a session represents.
///
/// This crate only negotiates server-side upgrades, so every session it
/// constructs is [`Role::Server`]; `Client` exists for the frame layer
/// that handles both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Server,
    Client,
}

/// A connection that has completed the opening handshake.
///
/// Created only by a successful negotiation. The session owns the
/// underlying stream; the frame layer that drives the connection from
/// here on takes it via [`into_stream`](Self::into_stream). The session
/// ends when the underlying connection is closed.
#[derive(Debug)]
pub struct WebSocketSession {
    role: Role,
    stream: TcpStream,
    protocol: Option<String>,
}

impl WebSocketSession {
    pub(crate) fn server(stream: TcpStream, protocol: Option<String>) -> Self {
        Self {
            role: Role::Server,
            stream,
            protocol,
        }
    }

    /// Which end of the connection this session is.
    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }

    /// The sub-protocol both sides agreed on, if any.
    ///
    /// `Some` only when the client offered the protocol and the server
    /// named it as its supported protocol.
    #[must_use]
    pub fn protocol(&self) -> Option<&str> {
        self.protocol.as_deref()
    }

    /// Borrow the underlying connection.
    pub fn stream_mut(&mut self) -> &mut TcpStream {
        &mut self.stream
    }

    /// Hand the underlying connection to the frame layer.
    #[must_use]
    pub fn into_stream(self) -> TcpStream {
        self.stream
    }
}
