//! Idle directions reported by `SESSION_IDLE` events.

use std::fmt;

/// Which direction of a session has gone idle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdleStatus {
    /// Nothing was read for the configured interval.
    ReaderIdle,
    /// Nothing was written for the configured interval.
    WriterIdle,
    /// Neither reads nor writes happened for the configured interval.
    BothIdle,
}

impl fmt::Display for IdleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            IdleStatus::ReaderIdle => "reader idle",
            IdleStatus::WriterIdle => "writer idle",
            IdleStatus::BothIdle => "both idle",
        })
    }
}
