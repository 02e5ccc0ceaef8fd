//! Testing utilities for iorelay.
//!
//! This module provides utilities to make testing pipelines and schedulers easier.
//!
//! # Features
//!
//! - [`RecordingFilter`]: A pipeline stage that records every entry call
//! - [`Call`]: One recorded entry call, with the exact arguments it received

use iorelay_core::{
    BoxError, Fault, IdleStatus, InboundFilter, IoEventType, IoSession, OutboundFilter,
    Parameter, SessionId, WriteRequest,
};
use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

// ============================================================================
// Recorded Calls
// ============================================================================

/// One pipeline entry call as received by a [`RecordingFilter`].
#[derive(Debug, Clone)]
pub enum Call {
    /// `session_created`
    SessionCreated(SessionId),
    /// `session_opened`
    SessionOpened(SessionId),
    /// `session_closed`
    SessionClosed(SessionId),
    /// `session_idle`
    SessionIdle(SessionId, IdleStatus),
    /// `exception_caught`
    ExceptionCaught(SessionId, Fault),
    /// `message_received`, holding the very parameter that was passed in.
    MessageReceived(SessionId, Option<Parameter>),
    /// `filter_close`
    FilterClose(SessionId),
    /// `message_sent`
    MessageSent(SessionId, WriteRequest),
    /// `filter_write`
    FilterWrite(SessionId, WriteRequest),
}

impl Call {
    /// The event kind that maps to this entry call.
    pub fn kind(&self) -> IoEventType {
        match self {
            Call::SessionCreated(_) => IoEventType::SessionCreated,
            Call::SessionOpened(_) => IoEventType::SessionOpened,
            Call::SessionClosed(_) => IoEventType::SessionClosed,
            Call::SessionIdle(..) => IoEventType::SessionIdle,
            Call::ExceptionCaught(..) => IoEventType::ExceptionCaught,
            Call::MessageReceived(..) => IoEventType::MessageReceived,
            Call::FilterClose(_) => IoEventType::Close,
            Call::MessageSent(..) => IoEventType::MessageSent,
            Call::FilterWrite(..) => IoEventType::Write,
        }
    }

    /// The session the call was made for.
    pub fn session(&self) -> &SessionId {
        match self {
            Call::SessionCreated(id)
            | Call::SessionOpened(id)
            | Call::SessionClosed(id)
            | Call::SessionIdle(id, _)
            | Call::ExceptionCaught(id, _)
            | Call::MessageReceived(id, _)
            | Call::FilterClose(id)
            | Call::MessageSent(id, _)
            | Call::FilterWrite(id, _) => id,
        }
    }
}

// ============================================================================
// Recording Filter
// ============================================================================

/// A pipeline stage that records every entry call it receives.
///
/// Clones share the same record, so a clone can be handed to a session while
/// the test keeps the original for inspection.
///
/// # Example
///
/// ```rust,ignore
/// let recorder = RecordingFilter::new();
/// let session = BasicSession::builder("sess-1")
///     .inbound(recorder.clone())
///     .outbound(recorder.clone())
///     .build();
///
/// IoEvent::session_opened(session.session_ref()).fire()?;
///
/// assert_eq!(recorder.kinds(), vec![IoEventType::SessionOpened]);
/// ```
#[derive(Clone, Default)]
pub struct RecordingFilter {
    calls: Arc<Mutex<Vec<Call>>>,
    failures: Arc<Mutex<HashMap<IoEventType, String>>>,
}

impl RecordingFilter {
    /// Create a new recording filter that accepts every call.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail every call for `kind` with `message`, after recording it.
    pub fn fail_on(&self, kind: IoEventType, message: impl Into<String>) {
        self.failures.lock().unwrap().insert(kind, message.into());
    }

    /// Fail every call, after recording it.
    pub fn fail_all(&self, message: impl Into<String>) {
        let message = message.into();
        let mut failures = self.failures.lock().unwrap();
        for kind in IoEventType::ALL {
            failures.insert(kind, message.clone());
        }
    }

    /// Stop failing calls.
    pub fn clear_error(&self) {
        self.failures.lock().unwrap().clear();
    }

    /// Get a clone of the recorded calls.
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    /// Get the kinds of the recorded calls, in order.
    pub fn kinds(&self) -> Vec<IoEventType> {
        self.calls.lock().unwrap().iter().map(Call::kind).collect()
    }

    /// Get the number of recorded calls.
    pub fn count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Clear all recorded calls.
    pub fn clear(&self) {
        self.calls.lock().unwrap().clear();
    }

    fn record(&self, call: Call) -> Result<(), BoxError> {
        let kind = call.kind();
        self.calls.lock().unwrap().push(call);

        match self.failures.lock().unwrap().get(&kind) {
            Some(message) => Err(message.clone().into()),
            None => Ok(()),
        }
    }
}

impl InboundFilter for RecordingFilter {
    fn session_created(&self, session: &Arc<dyn IoSession>) -> Result<(), BoxError> {
        self.record(Call::SessionCreated(session.id().clone()))
    }

    fn session_opened(&self, session: &Arc<dyn IoSession>) -> Result<(), BoxError> {
        self.record(Call::SessionOpened(session.id().clone()))
    }

    fn session_closed(&self, session: &Arc<dyn IoSession>) -> Result<(), BoxError> {
        self.record(Call::SessionClosed(session.id().clone()))
    }

    fn session_idle(
        &self,
        session: &Arc<dyn IoSession>,
        status: IdleStatus,
    ) -> Result<(), BoxError> {
        self.record(Call::SessionIdle(session.id().clone(), status))
    }

    fn exception_caught(
        &self,
        session: &Arc<dyn IoSession>,
        cause: &Fault,
    ) -> Result<(), BoxError> {
        self.record(Call::ExceptionCaught(session.id().clone(), cause.clone()))
    }

    fn message_received(
        &self,
        session: &Arc<dyn IoSession>,
        message: Option<&Parameter>,
    ) -> Result<(), BoxError> {
        self.record(Call::MessageReceived(
            session.id().clone(),
            message.cloned(),
        ))
    }

    fn filter_close(&self, session: &Arc<dyn IoSession>) -> Result<(), BoxError> {
        self.record(Call::FilterClose(session.id().clone()))
    }
}

impl OutboundFilter for RecordingFilter {
    fn message_sent(
        &self,
        session: &Arc<dyn IoSession>,
        request: &WriteRequest,
    ) -> Result<(), BoxError> {
        self.record(Call::MessageSent(session.id().clone(), request.clone()))
    }

    fn filter_write(
        &self,
        session: &Arc<dyn IoSession>,
        request: &WriteRequest,
    ) -> Result<(), BoxError> {
        self.record(Call::FilterWrite(session.id().clone(), request.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::BasicSession;
    use iorelay_core::IoEvent;

    #[test]
    fn test_records_and_fails_on_demand() {
        let recorder = RecordingFilter::new();
        let session = BasicSession::builder("sess-1")
            .inbound(recorder.clone())
            .build();

        recorder.fail_on(IoEventType::SessionOpened, "refused");
        assert!(IoEvent::session_created(session.session_ref()).fire().is_ok());
        let err = IoEvent::session_opened(session.session_ref())
            .fire()
            .unwrap_err();
        assert_eq!(err.to_string(), "refused");

        // Failed calls are still recorded.
        assert_eq!(
            recorder.kinds(),
            vec![IoEventType::SessionCreated, IoEventType::SessionOpened]
        );
        assert!(recorder.calls().iter().all(|call| call.session().as_str() == "sess-1"));

        recorder.clear_error();
        recorder.clear();
        assert!(IoEvent::session_opened(session.session_ref()).fire().is_ok());
        assert_eq!(recorder.count(), 1);
    }

    #[test]
    fn test_fail_all() {
        let recorder = RecordingFilter::new();
        recorder.fail_all("down");
        let session = BasicSession::builder("sess-1")
            .inbound(recorder.clone())
            .outbound(recorder.clone())
            .build();

        for event in [
            IoEvent::close(session.session_ref()),
            IoEvent::write(session.session_ref(), WriteRequest::new("x")),
        ] {
            assert_eq!(event.fire().unwrap_err().to_string(), "down");
        }
    }
}
