//! # Pipeline entry points
//!
//! A session's pipeline is reached through two filters. How stages behind the
//! entry are chained is up to the pipeline; dispatch only ever calls the first
//! stage.
//!
//! Every method receives the live session and the kind's typed payload, and
//! returns the stage's own error unmodified.

use crate::{
    error::BoxError, fault::Fault, idle::IdleStatus, payload::Parameter, session::IoSession,
    write::WriteRequest,
};
use std::sync::Arc;

/// Entry point for events detected on a connection.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not an `InboundFilter`",
    label = "missing `InboundFilter` implementation",
    note = "Inbound filters handle every inbound event kind."
)]
pub trait InboundFilter: Send + Sync {
    /// `SESSION_CREATED`
    fn session_created(&self, session: &Arc<dyn IoSession>) -> Result<(), BoxError>;

    /// `SESSION_OPENED`
    fn session_opened(&self, session: &Arc<dyn IoSession>) -> Result<(), BoxError>;

    /// `SESSION_CLOSED`
    fn session_closed(&self, session: &Arc<dyn IoSession>) -> Result<(), BoxError>;

    /// `SESSION_IDLE`
    fn session_idle(&self, session: &Arc<dyn IoSession>, status: IdleStatus)
    -> Result<(), BoxError>;

    /// `EXCEPTION_CAUGHT`
    fn exception_caught(&self, session: &Arc<dyn IoSession>, cause: &Fault)
    -> Result<(), BoxError>;

    /// `MESSAGE_RECEIVED`. The message is passed exactly as stored in the event.
    fn message_received(
        &self,
        session: &Arc<dyn IoSession>,
        message: Option<&Parameter>,
    ) -> Result<(), BoxError>;

    /// `CLOSE`
    fn filter_close(&self, session: &Arc<dyn IoSession>) -> Result<(), BoxError>;
}

/// Entry point for write traffic.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not an `OutboundFilter`",
    label = "missing `OutboundFilter` implementation",
    note = "Outbound filters handle `WRITE` and `MESSAGE_SENT`."
)]
pub trait OutboundFilter: Send + Sync {
    /// `MESSAGE_SENT`
    fn message_sent(
        &self,
        session: &Arc<dyn IoSession>,
        request: &WriteRequest,
    ) -> Result<(), BoxError>;

    /// `WRITE`
    fn filter_write(
        &self,
        session: &Arc<dyn IoSession>,
        request: &WriteRequest,
    ) -> Result<(), BoxError>;
}
