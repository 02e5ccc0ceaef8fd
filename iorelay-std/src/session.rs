//! A ready-made session.

use crate::filters::NoopFilter;
use iorelay_core::{InboundFilter, IoSession, OutboundFilter, SessionId, SessionRef};
use std::{fmt, sync::Arc};

/// A session that owns its two pipeline entry stages.
///
/// # Example
///
/// ```rust,ignore
/// let session = BasicSession::builder("sess-1")
///     .inbound(ProtocolDecoder::new())
///     .outbound(ProtocolEncoder::new())
///     .build();
///
/// IoEvent::session_opened(session.session_ref()).fire()?;
/// ```
pub struct BasicSession {
    id: SessionId,
    inbound: Arc<dyn InboundFilter>,
    outbound: Arc<dyn OutboundFilter>,
}

impl BasicSession {
    /// Start building a session with the given id.
    pub fn builder(id: impl Into<SessionId>) -> BasicSessionBuilder {
        BasicSessionBuilder {
            id: id.into(),
            inbound: None,
            outbound: None,
        }
    }

    /// A non-owning handle for building events.
    pub fn session_ref(self: &Arc<Self>) -> SessionRef {
        SessionRef::new(self)
    }
}

impl IoSession for BasicSession {
    fn id(&self) -> &SessionId {
        &self.id
    }

    fn inbound(&self) -> &dyn InboundFilter {
        &*self.inbound
    }

    fn outbound(&self) -> &dyn OutboundFilter {
        &*self.outbound
    }
}

impl fmt::Debug for BasicSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BasicSession").field("id", &self.id).finish()
    }
}

/// Builder for [`BasicSession`].
///
/// Entry stages that are not set default to [`NoopFilter`].
pub struct BasicSessionBuilder {
    id: SessionId,
    inbound: Option<Arc<dyn InboundFilter>>,
    outbound: Option<Arc<dyn OutboundFilter>>,
}

impl BasicSessionBuilder {
    /// Set the inbound entry stage.
    pub fn inbound<F: InboundFilter + 'static>(self, filter: F) -> Self {
        self.inbound_shared(Arc::new(filter))
    }

    /// Set the inbound entry stage from a shared stage.
    pub fn inbound_shared(mut self, filter: Arc<dyn InboundFilter>) -> Self {
        self.inbound = Some(filter);
        self
    }

    /// Set the outbound entry stage.
    pub fn outbound<F: OutboundFilter + 'static>(self, filter: F) -> Self {
        self.outbound_shared(Arc::new(filter))
    }

    /// Set the outbound entry stage from a shared stage.
    pub fn outbound_shared(mut self, filter: Arc<dyn OutboundFilter>) -> Self {
        self.outbound = Some(filter);
        self
    }

    /// Finish the session.
    pub fn build(self) -> Arc<BasicSession> {
        Arc::new(BasicSession {
            id: self.id,
            inbound: self.inbound.unwrap_or_else(|| Arc::new(NoopFilter)),
            outbound: self.outbound.unwrap_or_else(|| Arc::new(NoopFilter)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingFilter;
    use iorelay_core::{Delivery, IoEvent, IoEventType, WriteRequest};

    #[test]
    fn test_defaults_accept_everything() {
        let session = BasicSession::builder("sess-1").build();
        let delivery = IoEvent::write(session.session_ref(), WriteRequest::new("x"))
            .fire()
            .unwrap();
        assert_eq!(delivery, Delivery::Outbound(IoEventType::Write));
        assert_eq!(session.id().as_str(), "sess-1");
    }

    #[test]
    fn test_session_ref_does_not_keep_session_alive() {
        let recorder = RecordingFilter::new();
        let session = BasicSession::builder("sess-1")
            .inbound(recorder.clone())
            .build();
        let handle = session.session_ref();
        assert!(handle.is_alive());

        drop(session);
        assert!(!handle.is_alive());
        assert_eq!(handle.to_string(), "sess-1");
        assert_eq!(recorder.count(), 0);
    }
}
