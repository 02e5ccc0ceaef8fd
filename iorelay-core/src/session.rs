//! Session identity and the non-owning session handle carried by events.

use crate::filter::{InboundFilter, OutboundFilter};
use std::{
    fmt,
    sync::{Arc, Weak},
};

/// Identity of a session, used when rendering events.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(Arc<str>);

impl SessionId {
    /// Create an id from its textual form.
    pub fn new(id: impl Into<Arc<str>>) -> Self {
        Self(id.into())
    }

    /// The textual form of the id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SessionId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for SessionId {
    fn from(id: String) -> Self {
        Self::new(id)
    }
}

/// A logical connection that owns a processing pipeline.
///
/// The pipeline is exposed through two entry points: the inbound filter
/// receives everything detected on the connection, the outbound filter
/// receives write traffic.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not an `IoSession`",
    label = "missing `IoSession` implementation",
    note = "Sessions must expose an id and both pipeline entry points."
)]
pub trait IoSession: Send + Sync + 'static {
    /// The session's identity.
    fn id(&self) -> &SessionId;

    /// First stage of the inbound pipeline.
    fn inbound(&self) -> &dyn InboundFilter;

    /// First stage of the outbound pipeline.
    fn outbound(&self) -> &dyn OutboundFilter;
}

/// A non-owning handle to a session.
///
/// Holding a `SessionRef` does not keep the session alive. The id is cached so
/// events can still be rendered after the session is gone.
#[derive(Clone)]
pub struct SessionRef {
    id: SessionId,
    session: Weak<dyn IoSession>,
}

impl SessionRef {
    /// Create a handle to a concrete session.
    pub fn new<S: IoSession>(session: &Arc<S>) -> Self {
        let weak = Arc::downgrade(session);
        let weak: Weak<dyn IoSession> = weak;
        Self {
            id: session.id().clone(),
            session: weak,
        }
    }

    /// Create a handle to a type-erased session.
    pub fn from_dyn(session: &Arc<dyn IoSession>) -> Self {
        Self {
            id: session.id().clone(),
            session: Arc::downgrade(session),
        }
    }

    /// The cached id of the session.
    pub fn id(&self) -> &SessionId {
        &self.id
    }

    /// The live session, or `None` once it has been finalized.
    pub fn upgrade(&self) -> Option<Arc<dyn IoSession>> {
        self.session.upgrade()
    }

    /// Returns `true` while the session is alive.
    pub fn is_alive(&self) -> bool {
        self.session.strong_count() > 0
    }
}

impl PartialEq for SessionRef {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && Weak::ptr_eq(&self.session, &other.session)
    }
}

impl Eq for SessionRef {}

impl fmt::Debug for SessionRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionRef")
            .field("id", &self.id)
            .field("alive", &self.is_alive())
            .finish()
    }
}

impl fmt::Display for SessionRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.id, f)
    }
}
