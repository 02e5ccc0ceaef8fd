//! Logging stage - observability for pipeline entry calls.

use crate::filters::NoopFilter;
use iorelay_core::{
    BoxError, Fault, IdleStatus, InboundFilter, IoEventType, IoSession, OutboundFilter,
    Parameter, WriteRequest,
};
use std::{fmt::Display, sync::Arc};

/// A pipeline stage that logs every entry call, then forwards it.
///
/// Uses the `tracing` crate when the `tracing` feature is enabled and is a
/// plain pass-through otherwise.
///
/// # Example
///
/// ```rust,ignore
/// use iorelay_std::{filters::LoggingFilter, session::BasicSession};
///
/// let stage = Arc::new(LoggingFilter::named("codec", CodecFilter::new()));
/// let session = BasicSession::builder("sess-1")
///     .inbound_shared(stage.clone())
///     .outbound_shared(stage)
///     .build();
/// ```
#[derive(Debug, Clone)]
pub struct LoggingFilter<N = NoopFilter> {
    name: &'static str,
    next: N,
}

impl LoggingFilter {
    /// Create a logging stage that ends the pipeline.
    pub fn new() -> Self {
        Self::named("pipeline", NoopFilter)
    }
}

impl Default for LoggingFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl<N> LoggingFilter<N> {
    /// Create a logging stage in front of `next`.
    ///
    /// The name is used in log records to identify the stage.
    pub fn named(name: &'static str, next: N) -> Self {
        Self { name, next }
    }

    /// The stage name used in log records.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The stage calls are forwarded to.
    pub fn next(&self) -> &N {
        &self.next
    }

    fn log(&self, session: &Arc<dyn IoSession>, kind: IoEventType, detail: Option<&dyn Display>) {
        #[cfg(feature = "tracing")]
        {
            match detail {
                Some(detail) => tracing::debug!(
                    stage = %self.name,
                    session = %session.id(),
                    kind = %kind,
                    %detail,
                    "entry call"
                ),
                None => tracing::debug!(
                    stage = %self.name,
                    session = %session.id(),
                    kind = %kind,
                    "entry call"
                ),
            }
        }

        #[cfg(not(feature = "tracing"))]
        {
            let _ = (self.name, session, kind, detail); // Suppress unused warnings
        }
    }
}

impl<N: InboundFilter> InboundFilter for LoggingFilter<N> {
    fn session_created(&self, session: &Arc<dyn IoSession>) -> Result<(), BoxError> {
        self.log(session, IoEventType::SessionCreated, None);
        self.next.session_created(session)
    }

    fn session_opened(&self, session: &Arc<dyn IoSession>) -> Result<(), BoxError> {
        self.log(session, IoEventType::SessionOpened, None);
        self.next.session_opened(session)
    }

    fn session_closed(&self, session: &Arc<dyn IoSession>) -> Result<(), BoxError> {
        self.log(session, IoEventType::SessionClosed, None);
        self.next.session_closed(session)
    }

    fn session_idle(
        &self,
        session: &Arc<dyn IoSession>,
        status: IdleStatus,
    ) -> Result<(), BoxError> {
        self.log(session, IoEventType::SessionIdle, Some(&status));
        self.next.session_idle(session, status)
    }

    fn exception_caught(
        &self,
        session: &Arc<dyn IoSession>,
        cause: &Fault,
    ) -> Result<(), BoxError> {
        self.log(session, IoEventType::ExceptionCaught, Some(cause));
        self.next.exception_caught(session, cause)
    }

    fn message_received(
        &self,
        session: &Arc<dyn IoSession>,
        message: Option<&Parameter>,
    ) -> Result<(), BoxError> {
        let detail = message.map(|m| m as &dyn Display);
        self.log(session, IoEventType::MessageReceived, detail);
        self.next.message_received(session, message)
    }

    fn filter_close(&self, session: &Arc<dyn IoSession>) -> Result<(), BoxError> {
        self.log(session, IoEventType::Close, None);
        self.next.filter_close(session)
    }
}

impl<N: OutboundFilter> OutboundFilter for LoggingFilter<N> {
    fn message_sent(
        &self,
        session: &Arc<dyn IoSession>,
        request: &WriteRequest,
    ) -> Result<(), BoxError> {
        self.log(session, IoEventType::MessageSent, Some(request));
        self.next.message_sent(session, request)
    }

    fn filter_write(
        &self,
        session: &Arc<dyn IoSession>,
        request: &WriteRequest,
    ) -> Result<(), BoxError> {
        self.log(session, IoEventType::Write, Some(request));
        self.next.filter_write(session, request)
    }
}
