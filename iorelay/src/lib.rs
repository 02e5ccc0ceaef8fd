//! # iorelay - I/O event values and dispatch
//!
//! `iorelay` is the seam between the thread that detects network I/O and the
//! threads that process it. A detector records each occurrence as an
//! immutable [`IoEvent`]; firing the event, inline or later from a queue,
//! calls exactly one entry point of the session's pipeline.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use iorelay::prelude::*;
//!
//! let session = BasicSession::builder("sess-1")
//!     .inbound(LoggingFilter::named("app", MyHandler))
//!     .build();
//!
//! // Inline
//! IoEvent::session_opened(session.session_ref()).fire()?;
//!
//! // Queued
//! let (mut queue, worker) = EventQueue::unbounded();
//! tokio::spawn(worker.run());
//! queue.try_submit(IoEvent::message_received(session.session_ref(), "hello"))?;
//! ```

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

pub use iorelay_core::{
    // Error types
    BoxError,
    // Dispatch
    Delivery,
    Entry,
    EventError,
    // Payloads
    Fault,
    IdleStatus,
    // Pipeline entry points
    InboundFilter,
    Invocation,
    // Event value
    IoEvent,
    IoEventBuilder,
    IoEventType,
    // Sessions
    IoSession,
    OutboundFilter,
    Parameter,
    ParseEventTypeError,
    Payload,
    Runnable,
    SessionId,
    SessionRef,
    Task,
    TrafficMask,
    WriteRequest,
    parameter,
};

pub use iorelay_std::{
    filters::{LoggingFilter, NoopFilter},
    queue::{EventQueue, EventWorker, QueueError, WorkerStats},
    session::{BasicSession, BasicSessionBuilder},
};

/// Standard pipeline stages.
pub mod filters {
    pub use iorelay_std::filters::{LoggingFilter, NoopFilter};
}

/// Testing utilities.
pub mod testing {
    pub use iorelay_std::testing::{Call, RecordingFilter};
}

/// Prelude module - common imports for iorelay.
///
/// # Usage
///
/// ```rust,ignore
/// use iorelay::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        // Sessions
        BasicSession,
        // Errors
        BoxError,
        Delivery,
        EventError,
        // Scheduling
        EventQueue,
        Fault,
        IdleStatus,
        // Pipeline
        InboundFilter,
        // Core
        IoEvent,
        IoEventType,
        IoSession,
        LoggingFilter,
        OutboundFilter,
        Parameter,
        Runnable,
        SessionRef,
        TrafficMask,
        WriteRequest,
    };
}
