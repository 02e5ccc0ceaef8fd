//! Error types for iorelay.
//!
//! This module provides a structured error hierarchy using `thiserror`:
//!
//! - [`EventError`] - Errors raised while building or firing an [`IoEvent`]
//! - [`ParseEventTypeError`] - Unknown event type names
//!
//! [`IoEvent`]: crate::IoEvent

use crate::{kind::IoEventType, session::SessionId};
use thiserror::Error;

/// A boxed error type for pipeline stage failures.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can occur while constructing or dispatching an event.
#[derive(Error, Debug)]
pub enum EventError {
    /// A mandatory field was absent at construction.
    #[error("invalid argument: `{0}` is required")]
    InvalidArgument(&'static str),

    /// The payload does not have the type the event kind requires.
    #[error("{kind} expects a `{expected}` payload, got `{actual}`")]
    TypeMismatch {
        /// The kind being dispatched.
        kind: IoEventType,
        /// The payload type the kind requires.
        expected: &'static str,
        /// The payload type that was actually stored.
        actual: &'static str,
    },

    /// The event kind requires a payload but none was stored.
    #[error("{kind} expects a `{expected}` payload, got none")]
    MissingPayload {
        /// The kind being dispatched.
        kind: IoEventType,
        /// The payload type the kind requires.
        expected: &'static str,
    },

    /// The session was finalized before a non-terminal event could be fired.
    #[error("session {session} is gone, cannot fire {kind}")]
    SessionGone {
        /// Identity of the finalized session.
        session: SessionId,
        /// The kind that could not be delivered.
        kind: IoEventType,
    },

    /// The invoked pipeline stage failed.
    #[error(transparent)]
    Pipeline(#[from] BoxError),
}

impl EventError {
    /// Returns `true` for errors caused by a caller breaking the event contract.
    ///
    /// These are programming errors: retrying or re-routing them only hands a
    /// wrong value to another stage.
    pub fn is_contract_violation(&self) -> bool {
        matches!(
            self,
            EventError::InvalidArgument(_)
                | EventError::TypeMismatch { .. }
                | EventError::MissingPayload { .. }
        )
    }

    /// Returns the pipeline stage's own error, if this is a pipeline failure.
    pub fn into_pipeline_error(self) -> Option<BoxError> {
        match self {
            EventError::Pipeline(err) => Some(err),
            _ => None,
        }
    }
}

/// Error returned when parsing an unknown event type name.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown event type: {0}")]
pub struct ParseEventTypeError(pub(crate) String);
