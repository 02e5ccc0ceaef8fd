//! The closed set of I/O event kinds.
//!
//! Every kind fixes the payload it expects and the pipeline entry it is
//! delivered to:
//!
//! | Kind | Payload | Entry |
//! |---|---|---|
//! | `MESSAGE_RECEIVED` | any decoded message | inbound |
//! | `MESSAGE_SENT` | [`WriteRequest`] | outbound |
//! | `WRITE` | [`WriteRequest`] | outbound |
//! | `SESSION_CREATED` | none | inbound |
//! | `SESSION_OPENED` | none | inbound |
//! | `SESSION_CLOSED` | none | inbound |
//! | `SESSION_IDLE` | [`IdleStatus`] | inbound |
//! | `EXCEPTION_CAUGHT` | [`Fault`] | inbound |
//! | `CLOSE` | none | inbound |
//! | `SET_TRAFFIC_MASK` | [`TrafficMask`] | reserved, not delivered |
//!
//! [`WriteRequest`]: crate::WriteRequest
//! [`IdleStatus`]: crate::IdleStatus
//! [`Fault`]: crate::Fault
//! [`TrafficMask`]: crate::TrafficMask

use crate::error::ParseEventTypeError;
use std::{fmt, str::FromStr};

/// The category of an I/O event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IoEventType {
    /// A decoded inbound message arrived. Payload: any message.
    MessageReceived,
    /// A previously requested write completed. Payload: `WriteRequest`.
    MessageSent,
    /// A write was requested. Payload: `WriteRequest`.
    Write,
    /// The session object was created. No payload.
    SessionCreated,
    /// The connection was opened. No payload.
    SessionOpened,
    /// The connection was closed. No payload.
    SessionClosed,
    /// The session went idle. Payload: `IdleStatus`.
    SessionIdle,
    /// A failure was raised for the session. Payload: `Fault`.
    ExceptionCaught,
    /// Closing the session was requested. No payload.
    Close,
    /// Read/write interest change. Payload: `TrafficMask`.
    ///
    /// Reserved: accepted and checked, never delivered to a pipeline.
    SetTrafficMask,
}

/// The pipeline entry point an event kind is delivered to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Entry {
    /// The session's inbound filter.
    Inbound,
    /// The session's outbound filter.
    Outbound,
}

impl IoEventType {
    /// Every kind, in declaration order.
    pub const ALL: [IoEventType; 10] = [
        IoEventType::MessageReceived,
        IoEventType::MessageSent,
        IoEventType::Write,
        IoEventType::SessionCreated,
        IoEventType::SessionOpened,
        IoEventType::SessionClosed,
        IoEventType::SessionIdle,
        IoEventType::ExceptionCaught,
        IoEventType::Close,
        IoEventType::SetTrafficMask,
    ];

    /// The upper-snake name used when rendering events.
    pub const fn name(self) -> &'static str {
        match self {
            IoEventType::MessageReceived => "MESSAGE_RECEIVED",
            IoEventType::MessageSent => "MESSAGE_SENT",
            IoEventType::Write => "WRITE",
            IoEventType::SessionCreated => "SESSION_CREATED",
            IoEventType::SessionOpened => "SESSION_OPENED",
            IoEventType::SessionClosed => "SESSION_CLOSED",
            IoEventType::SessionIdle => "SESSION_IDLE",
            IoEventType::ExceptionCaught => "EXCEPTION_CAUGHT",
            IoEventType::Close => "CLOSE",
            IoEventType::SetTrafficMask => "SET_TRAFFIC_MASK",
        }
    }

    /// The pipeline entry this kind is delivered to, `None` when reserved.
    pub const fn entry(self) -> Option<Entry> {
        match self {
            IoEventType::MessageSent | IoEventType::Write => Some(Entry::Outbound),
            IoEventType::SetTrafficMask => None,
            IoEventType::MessageReceived
            | IoEventType::SessionCreated
            | IoEventType::SessionOpened
            | IoEventType::SessionClosed
            | IoEventType::SessionIdle
            | IoEventType::ExceptionCaught
            | IoEventType::Close => Some(Entry::Inbound),
        }
    }

    /// Returns `true` if events of this kind are never delivered.
    pub const fn is_reserved(self) -> bool {
        self.entry().is_none()
    }
}

impl fmt::Display for IoEventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for IoEventType {
    type Err = ParseEventTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        IoEventType::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| ParseEventTypeError(s.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip() {
        for kind in IoEventType::ALL {
            assert_eq!(kind.name().parse::<IoEventType>(), Ok(kind));
            assert_eq!(kind.to_string(), kind.name());
        }
    }

    #[test]
    fn test_unknown_name() {
        let err = "SESSION_RESUMED".parse::<IoEventType>().unwrap_err();
        assert_eq!(err.to_string(), "unknown event type: SESSION_RESUMED");
        assert!("session_opened".parse::<IoEventType>().is_err());
    }

    #[test]
    fn test_entries() {
        assert_eq!(IoEventType::Write.entry(), Some(Entry::Outbound));
        assert_eq!(IoEventType::MessageSent.entry(), Some(Entry::Outbound));
        assert_eq!(IoEventType::Close.entry(), Some(Entry::Inbound));
        assert_eq!(IoEventType::SetTrafficMask.entry(), None);

        let reserved: Vec<_> = IoEventType::ALL
            .into_iter()
            .filter(|kind| kind.is_reserved())
            .collect();
        assert_eq!(reserved, vec![IoEventType::SetTrafficMask]);
    }
}
