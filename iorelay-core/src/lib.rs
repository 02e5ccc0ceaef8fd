//! # iorelay-core
//!
//! The event value and dispatch layer of the iorelay network I/O framework.
//!
//! A transport loop, a timer or a pipeline stage (a *detector*) notices that
//! something happened on a connection and records it as an [`IoEvent`]. The
//! event can be fired on the spot or handed to a scheduler and fired later on
//! another thread; either way, firing calls exactly one entry point of the
//! session's pipeline.
//!
//! This crate has minimal dependencies and is meant to be imported by
//! transports and pipeline stages that don't need `iorelay-std`.
//!
//! # Pieces
//!
//! - [`IoEventType`] - The closed set of occurrence kinds and their contracts
//! - [`IoEvent`] - The immutable event value
//! - [`Invocation`] / [`Delivery`] - Decoding and dispatching an event
//! - [`IoSession`], [`InboundFilter`], [`OutboundFilter`] - What a session must provide
//! - [`WriteRequest`], [`IdleStatus`], [`Fault`], [`TrafficMask`] - Typed payloads
//!
//! # Scheduling
//!
//! Nothing here decides when or where an event fires. [`IoEvent`] is
//! `Send + Sync`, implements [`Runnable`], and converts into a boxed [`Task`],
//! so any executor can run it. Per-session ordering is the scheduler's job.
//!
//! # Error Types
//!
//! - [`EventError`] - Construction, contract and pipeline failures
//! - [`ParseEventTypeError`] - Unknown kind names

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod dispatch;
mod error;
mod event;
mod fault;
mod filter;
mod idle;
mod kind;
mod payload;
mod session;
mod traffic;
mod write;

// Re-exports
pub use dispatch::{Delivery, Invocation};
pub use error::{BoxError, EventError, ParseEventTypeError};
pub use event::{IoEvent, IoEventBuilder, Runnable, Task};
pub use fault::Fault;
pub use filter::{InboundFilter, OutboundFilter};
pub use idle::IdleStatus;
pub use kind::{Entry, IoEventType};
pub use payload::{Parameter, Payload, parameter};
pub use session::{IoSession, SessionId, SessionRef};
pub use traffic::TrafficMask;
pub use write::WriteRequest;
