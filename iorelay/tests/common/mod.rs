#![allow(dead_code)]

use iorelay::{BasicSession, testing::RecordingFilter};
use std::sync::Arc;

// ============================================================================
// Test Sessions
// ============================================================================

/// A session whose inbound and outbound entries both record into `recorder`.
pub struct Recorded {
    pub session: Arc<BasicSession>,
    pub recorder: RecordingFilter,
}

pub fn recorded_session(id: &str) -> Recorded {
    let recorder = RecordingFilter::new();
    let session = BasicSession::builder(id)
        .inbound(recorder.clone())
        .outbound(recorder.clone())
        .build();
    Recorded { session, recorder }
}

// ============================================================================
// Test Payloads
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub seq: u32,
    pub body: String,
}

impl std::fmt::Display for Frame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "frame#{} {}", self.seq, self.body)
    }
}

#[derive(Debug)]
pub struct PeerReset;

impl std::fmt::Display for PeerReset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "connection reset by peer")
    }
}

impl std::error::Error for PeerReset {}
