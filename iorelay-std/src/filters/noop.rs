//! A stage that accepts everything.

use iorelay_core::{
    BoxError, Fault, IdleStatus, InboundFilter, IoSession, OutboundFilter, Parameter,
    WriteRequest,
};
use std::sync::Arc;

/// A pipeline stage that accepts every entry call and does nothing.
///
/// Used as the default entry of a [`BasicSession`] and as the end of a
/// [`LoggingFilter`] chain.
///
/// [`BasicSession`]: crate::session::BasicSession
/// [`LoggingFilter`]: crate::filters::LoggingFilter
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopFilter;

impl InboundFilter for NoopFilter {
    fn session_created(&self, _session: &Arc<dyn IoSession>) -> Result<(), BoxError> {
        Ok(())
    }

    fn session_opened(&self, _session: &Arc<dyn IoSession>) -> Result<(), BoxError> {
        Ok(())
    }

    fn session_closed(&self, _session: &Arc<dyn IoSession>) -> Result<(), BoxError> {
        Ok(())
    }

    fn session_idle(
        &self,
        _session: &Arc<dyn IoSession>,
        _status: IdleStatus,
    ) -> Result<(), BoxError> {
        Ok(())
    }

    fn exception_caught(
        &self,
        _session: &Arc<dyn IoSession>,
        _cause: &Fault,
    ) -> Result<(), BoxError> {
        Ok(())
    }

    fn message_received(
        &self,
        _session: &Arc<dyn IoSession>,
        _message: Option<&Parameter>,
    ) -> Result<(), BoxError> {
        Ok(())
    }

    fn filter_close(&self, _session: &Arc<dyn IoSession>) -> Result<(), BoxError> {
        Ok(())
    }
}

impl OutboundFilter for NoopFilter {
    fn message_sent(
        &self,
        _session: &Arc<dyn IoSession>,
        _request: &WriteRequest,
    ) -> Result<(), BoxError> {
        Ok(())
    }

    fn filter_write(
        &self,
        _session: &Arc<dyn IoSession>,
        _request: &WriteRequest,
    ) -> Result<(), BoxError> {
        Ok(())
    }
}
