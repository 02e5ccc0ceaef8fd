//! # Event queue
//!
//! A FIFO hand-off between the thread that detects events and a worker that
//! fires them. Events are fired in submission order; nothing is reordered or
//! fired twice.
//!
//! The worker applies one policy on top of plain firing:
//!
//! - events for a session that has been finalized are dropped, except
//!   `SESSION_CLOSED`, which is fired and reported as orphaned;
//! - when a pipeline stage fails, the failure is routed back to the same
//!   session once as an `EXCEPTION_CAUGHT` event;
//! - contract violations (wrong or missing payload) are logged and counted,
//!   never re-routed.
//!
//! # Example
//!
//! ```rust,ignore
//! let (mut queue, worker) = EventQueue::bounded(64);
//! let handle = tokio::spawn(worker.run());
//!
//! queue.submit(IoEvent::session_opened(session.session_ref())).await?;
//! drop(queue);
//!
//! let stats = handle.await?;
//! ```

use futures::{StreamExt, channel::mpsc, stream::BoxStream};
use iorelay_core::{BoxError, EventError, Fault, IoEvent, IoEventType};
use std::future::poll_fn;
use thiserror::Error;

/// Errors returned when submitting an event.
///
/// Both variants hand the rejected event back.
#[derive(Error, Debug)]
pub enum QueueError {
    /// A bounded queue is at capacity.
    #[error("event queue is full")]
    Full(IoEvent),

    /// The worker has been dropped.
    #[error("event queue is closed")]
    Closed(IoEvent),
}

impl QueueError {
    /// Recover the rejected event.
    pub fn into_event(self) -> IoEvent {
        match self {
            QueueError::Full(event) | QueueError::Closed(event) => event,
        }
    }
}

fn rejected(err: mpsc::TrySendError<IoEvent>) -> QueueError {
    if err.is_full() {
        QueueError::Full(err.into_inner())
    } else {
        QueueError::Closed(err.into_inner())
    }
}

#[derive(Clone)]
enum Sender {
    Bounded(mpsc::Sender<IoEvent>),
    Unbounded(mpsc::UnboundedSender<IoEvent>),
}

/// The submitting side of an event queue.
///
/// Clones feed the same worker. The worker stops once every clone is dropped.
#[derive(Clone)]
pub struct EventQueue {
    sender: Sender,
}

impl EventQueue {
    /// Create a queue that holds at most `capacity` pending events.
    pub fn bounded(capacity: usize) -> (EventQueue, EventWorker) {
        let (tx, rx) = mpsc::channel(capacity);
        let queue = EventQueue {
            sender: Sender::Bounded(tx),
        };
        (queue, EventWorker::new(rx.boxed()))
    }

    /// Create a queue without a capacity limit.
    pub fn unbounded() -> (EventQueue, EventWorker) {
        let (tx, rx) = mpsc::unbounded();
        let queue = EventQueue {
            sender: Sender::Unbounded(tx),
        };
        (queue, EventWorker::new(rx.boxed()))
    }

    /// Enqueue an event, waiting for room in a bounded queue.
    pub async fn submit(&mut self, event: IoEvent) -> Result<(), QueueError> {
        match &mut self.sender {
            Sender::Bounded(tx) => {
                if poll_fn(|cx| tx.poll_ready(cx)).await.is_err() {
                    return Err(QueueError::Closed(event));
                }
                tx.try_send(event).map_err(rejected)
            }
            Sender::Unbounded(tx) => tx
                .unbounded_send(event)
                .map_err(|err| QueueError::Closed(err.into_inner())),
        }
    }

    /// Enqueue an event without waiting.
    pub fn try_submit(&mut self, event: IoEvent) -> Result<(), QueueError> {
        match &mut self.sender {
            Sender::Bounded(tx) => tx.try_send(event).map_err(rejected),
            Sender::Unbounded(tx) => tx
                .unbounded_send(event)
                .map_err(|err| QueueError::Closed(err.into_inner())),
        }
    }

    /// Returns `true` once the worker has been dropped.
    pub fn is_closed(&self) -> bool {
        match &self.sender {
            Sender::Bounded(tx) => tx.is_closed(),
            Sender::Unbounded(tx) => tx.is_closed(),
        }
    }
}

/// Counters reported by [`EventWorker::run`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorkerStats {
    /// Events that reached a pipeline entry.
    pub delivered: usize,
    /// Events accepted without delivery (reserved kinds, orphaned closes).
    pub skipped: usize,
    /// Events dropped because their session was finalized.
    pub dropped: usize,
    /// Events whose pipeline stage failed.
    pub failed: usize,
    /// Failures delivered back to their session as `EXCEPTION_CAUGHT`.
    pub rerouted: usize,
    /// Failures that could not be routed back.
    pub unrouted: usize,
    /// Events rejected for breaking the payload contract.
    pub violations: usize,
}

/// The firing side of an event queue.
pub struct EventWorker {
    events: BoxStream<'static, IoEvent>,
    stats: WorkerStats,
}

impl EventWorker {
    fn new(events: BoxStream<'static, IoEvent>) -> Self {
        Self {
            events,
            stats: WorkerStats::default(),
        }
    }

    /// Fire queued events in order until every [`EventQueue`] is dropped.
    pub async fn run(mut self) -> WorkerStats {
        while let Some(event) = self.events.next().await {
            self.process(&event);
        }
        self.stats
    }

    fn process(&mut self, event: &IoEvent) {
        if !event.session().is_alive() && event.kind() != IoEventType::SessionClosed {
            self.drop_event(event);
            return;
        }

        match event.fire() {
            Ok(delivery) if delivery.is_delivered() => self.stats.delivered += 1,
            Ok(_) => self.stats.skipped += 1,
            // The session went away between the check above and firing.
            Err(EventError::SessionGone { .. }) => self.drop_event(event),
            Err(EventError::Pipeline(cause)) => {
                self.stats.failed += 1;
                self.route_failure(event, cause);
            }
            Err(err) => {
                self.stats.violations += 1;
                #[cfg(feature = "tracing")]
                {
                    tracing::error!(
                        event = %event,
                        error = %err,
                        "event breaks its payload contract"
                    );
                }
                #[cfg(not(feature = "tracing"))]
                {
                    let _ = err;
                }
            }
        }
    }

    fn drop_event(&mut self, event: &IoEvent) {
        self.stats.dropped += 1;
        #[cfg(feature = "tracing")]
        {
            tracing::debug!(event = %event, "session finalized, dropping event");
        }
        #[cfg(not(feature = "tracing"))]
        {
            let _ = event;
        }
    }

    fn route_failure(&mut self, event: &IoEvent, cause: BoxError) {
        // A failing exception handler would otherwise feed itself.
        if event.kind() == IoEventType::ExceptionCaught {
            self.unrouted(event, &*cause);
            return;
        }

        let fault = Fault::from_boxed(cause);
        let caught = IoEvent::exception_caught(event.session().clone(), fault.clone());
        match caught.fire() {
            Ok(_) => self.stats.rerouted += 1,
            Err(_) => self.unrouted(event, &fault),
        }
    }

    fn unrouted(&mut self, event: &IoEvent, cause: &(dyn std::error::Error + 'static)) {
        self.stats.unrouted += 1;
        #[cfg(feature = "tracing")]
        {
            tracing::error!(
                event = %event,
                error = %cause,
                "pipeline failure could not be routed"
            );
        }
        #[cfg(not(feature = "tracing"))]
        {
            let _ = (event, cause);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{session::BasicSession, testing::RecordingFilter};
    use iorelay_core::{IdleStatus, TrafficMask, WriteRequest, parameter};

    #[tokio::test]
    async fn test_fires_in_submission_order() {
        let recorder = RecordingFilter::new();
        let session = BasicSession::builder("sess-1")
            .inbound(recorder.clone())
            .outbound(recorder.clone())
            .build();

        let (mut queue, worker) = EventQueue::bounded(4);
        let handle = tokio::spawn(worker.run());

        queue
            .submit(IoEvent::session_created(session.session_ref()))
            .await
            .unwrap();
        queue
            .submit(IoEvent::session_opened(session.session_ref()))
            .await
            .unwrap();
        queue
            .submit(IoEvent::write(session.session_ref(), WriteRequest::new("a")))
            .await
            .unwrap();
        queue
            .submit(IoEvent::set_traffic_mask(session.session_ref(), TrafficMask::READ))
            .await
            .unwrap();
        queue
            .submit(IoEvent::session_idle(session.session_ref(), IdleStatus::ReaderIdle))
            .await
            .unwrap();
        drop(queue);

        let stats = handle.await.unwrap();
        assert_eq!(stats.delivered, 4);
        assert_eq!(stats.skipped, 1);
        assert_eq!(
            recorder.kinds(),
            vec![
                IoEventType::SessionCreated,
                IoEventType::SessionOpened,
                IoEventType::Write,
                IoEventType::SessionIdle,
            ]
        );
    }

    #[tokio::test]
    async fn test_drops_events_of_finalized_sessions() {
        let recorder = RecordingFilter::new();
        let session = BasicSession::builder("sess-1")
            .inbound(recorder.clone())
            .build();
        let handle_ref = session.session_ref();

        let (mut queue, worker) = EventQueue::unbounded();
        queue
            .try_submit(IoEvent::message_received(handle_ref.clone(), "late"))
            .unwrap();
        queue
            .try_submit(IoEvent::session_closed(handle_ref))
            .unwrap();
        drop(session);
        drop(queue);

        let stats = worker.run().await;
        assert_eq!(stats.dropped, 1);
        assert_eq!(stats.skipped, 1);
        assert_eq!(stats.delivered, 0);
        assert_eq!(recorder.count(), 0);
    }

    #[tokio::test]
    async fn test_routes_pipeline_failure_as_exception() {
        let recorder = RecordingFilter::new();
        recorder.fail_on(IoEventType::MessageReceived, "decode failed");
        let session = BasicSession::builder("sess-1")
            .inbound(recorder.clone())
            .build();

        let (mut queue, worker) = EventQueue::unbounded();
        queue
            .try_submit(IoEvent::message_received(session.session_ref(), "garbage"))
            .unwrap();
        drop(queue);

        let stats = worker.run().await;
        assert_eq!(stats.failed, 1);
        assert_eq!(stats.rerouted, 1);

        let calls = recorder.calls();
        assert_eq!(calls.len(), 2);
        match &calls[1] {
            crate::testing::Call::ExceptionCaught(id, fault) => {
                assert_eq!(id.as_str(), "sess-1");
                assert_eq!(fault.to_string(), "decode failed");
            }
            other => panic!("expected exception_caught, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_failing_exception_handler_is_not_rerouted() {
        let recorder = RecordingFilter::new();
        recorder.fail_all("down");
        let session = BasicSession::builder("sess-1")
            .inbound(recorder.clone())
            .build();

        let (mut queue, worker) = EventQueue::unbounded();
        queue
            .try_submit(IoEvent::session_opened(session.session_ref()))
            .unwrap();
        drop(queue);

        let stats = worker.run().await;
        assert_eq!(stats.failed, 1);
        assert_eq!(stats.rerouted, 0);
        assert_eq!(stats.unrouted, 1);
        // The original call plus one routed exception, no loop.
        assert_eq!(recorder.count(), 2);
    }

    #[tokio::test]
    async fn test_contract_violations_are_counted() {
        let recorder = RecordingFilter::new();
        let session = BasicSession::builder("sess-1")
            .outbound(recorder.clone())
            .build();

        let (mut queue, worker) = EventQueue::unbounded();
        let bogus = IoEvent::new(
            IoEventType::Write,
            session.session_ref(),
            Some(parameter("not a request")),
        );
        queue.try_submit(bogus).unwrap();
        drop(queue);

        let stats = worker.run().await;
        assert_eq!(stats.violations, 1);
        assert_eq!(stats.rerouted, 0);
        assert_eq!(recorder.count(), 0);
    }

    #[test]
    fn test_closed_queue_returns_event() {
        let session = BasicSession::builder("sess-1").build();
        let (mut queue, worker) = EventQueue::bounded(1);
        drop(worker);

        assert!(queue.is_closed());
        let err = queue
            .try_submit(IoEvent::close(session.session_ref()))
            .unwrap_err();
        assert!(matches!(err, QueueError::Closed(_)));
        assert_eq!(err.into_event().kind(), IoEventType::Close);
    }
}
