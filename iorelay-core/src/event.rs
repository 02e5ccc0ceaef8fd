//! # The event value
//!
//! An [`IoEvent`] records that something happened on a session: which kind of
//! occurrence, which session, and an optional payload. It never changes after
//! construction and can be fired inline or shipped to another thread first.
//!
//! The payload is stored opaquely so that relay code can build events without
//! knowing each kind's contract; the contract is checked when the event is
//! fired. Code that does know the kind should prefer the typed constructors
//! ([`IoEvent::write`], [`IoEvent::session_idle`], ...), which cannot produce
//! a mistyped payload.

use crate::{
    dispatch::{Delivery, Invocation},
    error::EventError,
    fault::Fault,
    idle::IdleStatus,
    kind::IoEventType,
    payload::{Parameter, Payload, parameter},
    session::SessionRef,
    traffic::TrafficMask,
    write::WriteRequest,
};
use std::fmt;

/// An I/O event bound to a session.
#[derive(Clone)]
pub struct IoEvent {
    kind: IoEventType,
    session: SessionRef,
    payload: Option<Parameter>,
}

impl IoEvent {
    /// Create an event. The payload is not checked against `kind` here.
    pub fn new(kind: IoEventType, session: SessionRef, payload: Option<Parameter>) -> Self {
        Self {
            kind,
            session,
            payload,
        }
    }

    /// Create an event from possibly absent parts.
    ///
    /// Fails with [`EventError::InvalidArgument`] naming the first missing
    /// mandatory field.
    pub fn try_new(
        kind: Option<IoEventType>,
        session: Option<SessionRef>,
        payload: Option<Parameter>,
    ) -> Result<Self, EventError> {
        let kind = kind.ok_or(EventError::InvalidArgument("kind"))?;
        let session = session.ok_or(EventError::InvalidArgument("session"))?;
        Ok(Self::new(kind, session, payload))
    }

    /// Start building an event field by field.
    pub fn builder() -> IoEventBuilder {
        IoEventBuilder::default()
    }

    /// `MESSAGE_RECEIVED` carrying a decoded message.
    pub fn message_received<P: Payload>(session: SessionRef, message: P) -> Self {
        Self::new(
            IoEventType::MessageReceived,
            session,
            Some(parameter(message)),
        )
    }

    /// `MESSAGE_SENT` for a flushed write request.
    pub fn message_sent(session: SessionRef, request: WriteRequest) -> Self {
        Self::new(IoEventType::MessageSent, session, Some(parameter(request)))
    }

    /// `WRITE` for a new write request.
    pub fn write(session: SessionRef, request: WriteRequest) -> Self {
        Self::new(IoEventType::Write, session, Some(parameter(request)))
    }

    /// `SESSION_CREATED`
    pub fn session_created(session: SessionRef) -> Self {
        Self::new(IoEventType::SessionCreated, session, None)
    }

    /// `SESSION_OPENED`
    pub fn session_opened(session: SessionRef) -> Self {
        Self::new(IoEventType::SessionOpened, session, None)
    }

    /// `SESSION_CLOSED`
    pub fn session_closed(session: SessionRef) -> Self {
        Self::new(IoEventType::SessionClosed, session, None)
    }

    /// `SESSION_IDLE` with the idle direction.
    pub fn session_idle(session: SessionRef, status: IdleStatus) -> Self {
        Self::new(IoEventType::SessionIdle, session, Some(parameter(status)))
    }

    /// `EXCEPTION_CAUGHT` with the failure.
    pub fn exception_caught(session: SessionRef, cause: Fault) -> Self {
        Self::new(IoEventType::ExceptionCaught, session, Some(parameter(cause)))
    }

    /// `CLOSE`
    pub fn close(session: SessionRef) -> Self {
        Self::new(IoEventType::Close, session, None)
    }

    /// `SET_TRAFFIC_MASK` with the requested mask.
    pub fn set_traffic_mask(session: SessionRef, mask: TrafficMask) -> Self {
        Self::new(IoEventType::SetTrafficMask, session, Some(parameter(mask)))
    }

    /// The kind of occurrence.
    pub fn kind(&self) -> IoEventType {
        self.kind
    }

    /// The session the event belongs to.
    pub fn session(&self) -> &SessionRef {
        &self.session
    }

    /// The payload, if any.
    pub fn payload(&self) -> Option<&Parameter> {
        self.payload.as_ref()
    }

    /// Human-readable rendering, `[<session>] <KIND>` or `[<session>] <KIND>: <payload>`.
    pub fn describe(&self) -> String {
        self.to_string()
    }

    /// Check the payload against the kind's contract without firing.
    pub fn decode(&self) -> Result<Invocation<'_>, EventError> {
        Invocation::decode(self.kind, self.payload.as_ref())
    }

    /// Deliver the event to its session's pipeline.
    ///
    /// Exactly one pipeline entry is called, except for `SET_TRAFFIC_MASK`
    /// ([`Delivery::Reserved`]) and for `SESSION_CLOSED` arriving after its
    /// session was finalized ([`Delivery::Orphaned`]). Any other kind fired
    /// for a finalized session fails with [`EventError::SessionGone`].
    ///
    /// Firing the same event twice delivers it twice.
    pub fn fire(&self) -> Result<Delivery, EventError> {
        let invocation = self.decode()?;

        let Some(session) = self.session.upgrade() else {
            if self.kind == IoEventType::SessionClosed {
                #[cfg(feature = "tracing")]
                {
                    tracing::debug!(
                        event = %self,
                        "session already finalized, close notification orphaned"
                    );
                }
                return Ok(Delivery::Orphaned);
            }
            return Err(EventError::SessionGone {
                session: self.session.id().clone(),
                kind: self.kind,
            });
        };

        #[cfg(feature = "tracing")]
        {
            tracing::trace!(event = %self, "firing event");
        }

        let delivery = invocation.invoke(&session)?;

        #[cfg(feature = "tracing")]
        {
            if delivery == Delivery::Reserved {
                tracing::debug!(event = %self, "reserved event kind, not delivered");
            }
        }

        Ok(delivery)
    }
}

impl fmt::Display for IoEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.payload {
            Some(payload) => write!(f, "[{}] {}: {}", self.session, self.kind, payload),
            None => write!(f, "[{}] {}", self.session, self.kind),
        }
    }
}

impl fmt::Debug for IoEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IoEvent")
            .field("kind", &self.kind)
            .field("session", &self.session)
            .field("payload", &self.payload)
            .finish()
    }
}

/// Incremental construction of an [`IoEvent`].
///
/// `build` fails with [`EventError::InvalidArgument`] when the kind or the
/// session was never set.
#[derive(Debug, Default, Clone)]
pub struct IoEventBuilder {
    kind: Option<IoEventType>,
    session: Option<SessionRef>,
    payload: Option<Parameter>,
}

impl IoEventBuilder {
    /// Set the kind.
    pub fn kind(mut self, kind: IoEventType) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Set the session.
    pub fn session(mut self, session: SessionRef) -> Self {
        self.session = Some(session);
        self
    }

    /// Set the payload from an owned value.
    pub fn payload<P: Payload>(self, payload: P) -> Self {
        self.parameter(parameter(payload))
    }

    /// Set the payload from an already shared value.
    pub fn parameter(mut self, payload: Parameter) -> Self {
        self.payload = Some(payload);
        self
    }

    /// Finish the event.
    pub fn build(self) -> Result<IoEvent, EventError> {
        IoEvent::try_new(self.kind, self.session, self.payload)
    }
}

/// A unit of work that fires when run.
///
/// This is the shape schedulers take: no arguments, no result beyond
/// success or failure.
pub trait Runnable: Send + Sync {
    /// Run the work.
    fn run(&self) -> Result<(), EventError>;
}

impl Runnable for IoEvent {
    fn run(&self) -> Result<(), EventError> {
        self.fire().map(drop)
    }
}

/// A one-shot boxed unit of work.
pub type Task = Box<dyn FnOnce() -> Result<(), EventError> + Send + 'static>;

impl IoEvent {
    /// Turn the event into a task for a work queue.
    pub fn into_task(self) -> Task {
        Box::new(move || self.run())
    }
}
