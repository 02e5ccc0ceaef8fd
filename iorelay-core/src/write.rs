//! Write requests carried by `WRITE` and `MESSAGE_SENT` events.

use crate::payload::{Parameter, Payload, parameter};
use std::{fmt, net::SocketAddr};

/// A request to write a message to a session.
///
/// The same request travels outbound as a `WRITE` event and comes back as
/// `MESSAGE_SENT` once the transport has flushed it.
#[derive(Debug, Clone)]
pub struct WriteRequest {
    message: Parameter,
    destination: Option<SocketAddr>,
}

impl WriteRequest {
    /// Create a request for `message` to the session's connected peer.
    pub fn new<P: Payload>(message: P) -> Self {
        Self::from_parameter(parameter(message))
    }

    /// Create a request from an already shared message.
    pub fn from_parameter(message: Parameter) -> Self {
        Self {
            message,
            destination: None,
        }
    }

    /// Address the request to an explicit destination (datagram transports).
    pub fn with_destination(mut self, destination: SocketAddr) -> Self {
        self.destination = Some(destination);
        self
    }

    /// The message to write.
    pub fn message(&self) -> &Parameter {
        &self.message
    }

    /// The explicit destination, if any.
    pub fn destination(&self) -> Option<SocketAddr> {
        self.destination
    }
}

impl fmt::Display for WriteRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.destination {
            Some(destination) => write!(f, "{} => {}", self.message, destination),
            None => write!(f, "{}", self.message),
        }
    }
}
