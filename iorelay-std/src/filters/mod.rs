//! Standard pipeline stages.

pub mod logging;
pub mod noop;

pub use logging::LoggingFilter;
pub use noop::NoopFilter;
