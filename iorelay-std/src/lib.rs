//! # iorelay-std
//!
//! Standard collaborators for the iorelay event core.
//!
//! This crate provides:
//! - **Sessions**: [`BasicSession`], a session owning its two entry stages
//! - **Pipeline stages**: [`NoopFilter`], [`LoggingFilter`]
//! - **Scheduling**: [`EventQueue`] / [`EventWorker`], a FIFO reference scheduler
//! - **Testing**: [`RecordingFilter`] and the [`Call`] record
//!
//! [`BasicSession`]: session::BasicSession
//! [`NoopFilter`]: filters::NoopFilter
//! [`LoggingFilter`]: filters::LoggingFilter
//! [`EventQueue`]: queue::EventQueue
//! [`EventWorker`]: queue::EventWorker
//! [`RecordingFilter`]: testing::RecordingFilter
//! [`Call`]: testing::Call

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

// Re-export core traits
pub use iorelay_core;

// Modules
pub mod filters;
pub mod queue;
pub mod session;
pub mod testing;
