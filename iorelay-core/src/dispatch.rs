//! # Dispatch
//!
//! Maps an event to exactly one pipeline entry call.
//!
//! Dispatch happens in two steps. [`Invocation::decode`] checks the opaque
//! payload against the kind's contract and produces a strongly-typed
//! [`Invocation`]; [`Invocation::invoke`] then performs the single call on the
//! session's pipeline. Both steps match every kind explicitly, so adding a
//! kind does not compile until it is routed here.
//!
//! Neither step locks or touches shared state; concurrent dispatch of
//! different events needs no coordination.

use crate::{
    error::EventError,
    fault::Fault,
    idle::IdleStatus,
    kind::IoEventType,
    payload::{Parameter, Payload},
    session::IoSession,
    traffic::TrafficMask,
    write::WriteRequest,
};
use std::{any::type_name, sync::Arc};

/// What firing an event did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// Delivered to the session's inbound filter.
    Inbound(IoEventType),
    /// Delivered to the session's outbound filter.
    Outbound(IoEventType),
    /// Accepted but not delivered: the kind is reserved (`SET_TRAFFIC_MASK`).
    Reserved,
    /// `SESSION_CLOSED` fired after its session was finalized; nothing to deliver to.
    Orphaned,
}

impl Delivery {
    /// Returns `true` if a pipeline entry was called.
    pub fn is_delivered(self) -> bool {
        matches!(self, Delivery::Inbound(_) | Delivery::Outbound(_))
    }
}

/// An event decoded against its kind's payload contract.
#[derive(Debug, Clone, Copy)]
pub enum Invocation<'a> {
    /// `MESSAGE_RECEIVED` with the message exactly as stored.
    MessageReceived(Option<&'a Parameter>),
    /// `MESSAGE_SENT`
    MessageSent(&'a WriteRequest),
    /// `WRITE`
    Write(&'a WriteRequest),
    /// `SESSION_CREATED`
    SessionCreated,
    /// `SESSION_OPENED`
    SessionOpened,
    /// `SESSION_CLOSED`
    SessionClosed,
    /// `SESSION_IDLE`
    SessionIdle(IdleStatus),
    /// `EXCEPTION_CAUGHT`
    ExceptionCaught(&'a Fault),
    /// `CLOSE`
    Close,
    /// `SET_TRAFFIC_MASK`, with the mask if one was supplied.
    SetTrafficMask(Option<TrafficMask>),
}

impl<'a> Invocation<'a> {
    /// Check `payload` against the contract of `kind`.
    ///
    /// Kinds without a payload ignore whatever is stored. Typed kinds fail
    /// with [`EventError::TypeMismatch`] on a wrong payload and
    /// [`EventError::MissingPayload`] on none. An absent payload is never
    /// forwarded to a typed entry as a null value.
    pub fn decode(kind: IoEventType, payload: Option<&'a Parameter>) -> Result<Self, EventError> {
        let invocation = match kind {
            IoEventType::MessageReceived => Invocation::MessageReceived(payload),
            IoEventType::MessageSent => Invocation::MessageSent(require(kind, payload)?),
            IoEventType::Write => Invocation::Write(require(kind, payload)?),
            IoEventType::SessionCreated => Invocation::SessionCreated,
            IoEventType::SessionOpened => Invocation::SessionOpened,
            IoEventType::SessionClosed => Invocation::SessionClosed,
            IoEventType::SessionIdle => {
                Invocation::SessionIdle(*require::<IdleStatus>(kind, payload)?)
            }
            IoEventType::ExceptionCaught => Invocation::ExceptionCaught(require(kind, payload)?),
            IoEventType::Close => Invocation::Close,
            IoEventType::SetTrafficMask => {
                let mask = payload.map(|p| cast::<TrafficMask>(kind, p)).transpose()?;
                Invocation::SetTrafficMask(mask.copied())
            }
        };
        Ok(invocation)
    }

    /// The kind this invocation was decoded from.
    pub fn kind(&self) -> IoEventType {
        match self {
            Invocation::MessageReceived(_) => IoEventType::MessageReceived,
            Invocation::MessageSent(_) => IoEventType::MessageSent,
            Invocation::Write(_) => IoEventType::Write,
            Invocation::SessionCreated => IoEventType::SessionCreated,
            Invocation::SessionOpened => IoEventType::SessionOpened,
            Invocation::SessionClosed => IoEventType::SessionClosed,
            Invocation::SessionIdle(_) => IoEventType::SessionIdle,
            Invocation::ExceptionCaught(_) => IoEventType::ExceptionCaught,
            Invocation::Close => IoEventType::Close,
            Invocation::SetTrafficMask(_) => IoEventType::SetTrafficMask,
        }
    }

    /// Perform the pipeline call on `session`.
    ///
    /// A failure of the pipeline stage is returned as [`EventError::Pipeline`]
    /// wrapping the stage's error untouched.
    pub fn invoke(self, session: &Arc<dyn IoSession>) -> Result<Delivery, EventError> {
        let kind = self.kind();
        let inbound = session.inbound();
        let outbound = session.outbound();

        let delivery = match self {
            Invocation::MessageReceived(message) => {
                inbound.message_received(session, message)?;
                Delivery::Inbound(kind)
            }
            Invocation::MessageSent(request) => {
                outbound.message_sent(session, request)?;
                Delivery::Outbound(kind)
            }
            Invocation::Write(request) => {
                outbound.filter_write(session, request)?;
                Delivery::Outbound(kind)
            }
            Invocation::SessionCreated => {
                inbound.session_created(session)?;
                Delivery::Inbound(kind)
            }
            Invocation::SessionOpened => {
                inbound.session_opened(session)?;
                Delivery::Inbound(kind)
            }
            Invocation::SessionClosed => {
                inbound.session_closed(session)?;
                Delivery::Inbound(kind)
            }
            Invocation::SessionIdle(status) => {
                inbound.session_idle(session, status)?;
                Delivery::Inbound(kind)
            }
            Invocation::ExceptionCaught(cause) => {
                inbound.exception_caught(session, cause)?;
                Delivery::Inbound(kind)
            }
            Invocation::Close => {
                inbound.filter_close(session)?;
                Delivery::Inbound(kind)
            }
            // Traffic mask changes are not wired into pipelines yet.
            Invocation::SetTrafficMask(_) => Delivery::Reserved,
        };
        Ok(delivery)
    }
}

fn cast<'a, T: Payload>(kind: IoEventType, payload: &'a Parameter) -> Result<&'a T, EventError> {
    let payload: &dyn Payload = &**payload;
    payload
        .downcast_ref::<T>()
        .ok_or_else(|| EventError::TypeMismatch {
            kind,
            expected: type_name::<T>(),
            actual: payload.type_name(),
        })
}

fn require<'a, T: Payload>(
    kind: IoEventType,
    payload: Option<&'a Parameter>,
) -> Result<&'a T, EventError> {
    let payload = payload.ok_or(EventError::MissingPayload {
        kind,
        expected: type_name::<T>(),
    })?;
    cast(kind, payload)
}
