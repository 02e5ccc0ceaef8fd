use iorelay::{
    EventQueue, IdleStatus, IoEvent, IoEventType, QueueError, WorkerStats, WriteRequest,
    testing::Call,
};
use std::thread;

mod common;
use common::{Frame, recorded_session};

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_detector_thread_feeds_worker() {
    let recorded = recorded_session("sess-1");
    let handle = recorded.session.session_ref();
    let (queue, worker) = EventQueue::unbounded();
    let worker = tokio::spawn(worker.run());

    let detector = thread::spawn(move || {
        let mut queue = queue;
        queue.try_submit(IoEvent::session_created(handle.clone()))?;
        queue.try_submit(IoEvent::session_opened(handle.clone()))?;
        for seq in 0..10 {
            queue.try_submit(IoEvent::message_received(
                handle.clone(),
                Frame {
                    seq,
                    body: "payload".into(),
                },
            ))?;
        }
        queue.try_submit(IoEvent::session_idle(handle.clone(), IdleStatus::ReaderIdle))?;
        queue.try_submit(IoEvent::write(handle.clone(), WriteRequest::new("reply")))?;
        queue.try_submit(IoEvent::session_closed(handle))?;
        Ok::<_, QueueError>(())
    });

    detector.join().unwrap().unwrap();
    let stats = worker.await.unwrap();

    assert_eq!(
        stats,
        WorkerStats {
            delivered: 15,
            ..WorkerStats::default()
        }
    );

    let calls = recorded.recorder.calls();
    assert_eq!(calls.first().map(Call::kind), Some(IoEventType::SessionCreated));
    assert_eq!(calls.last().map(Call::kind), Some(IoEventType::SessionClosed));

    let seqs: Vec<u32> = calls
        .iter()
        .filter_map(|call| match call {
            Call::MessageReceived(_, Some(message)) => {
                (**message).downcast_ref::<Frame>().map(|frame| frame.seq)
            }
            _ => None,
        })
        .collect();
    assert_eq!(seqs, (0..10).collect::<Vec<_>>());
}

#[tokio::test]
async fn test_bounded_queue_applies_backpressure() {
    let recorded = recorded_session("sess-1");
    let (mut queue, worker) = EventQueue::bounded(0);

    // Capacity zero still admits one event per sender.
    queue
        .try_submit(IoEvent::session_opened(recorded.session.session_ref()))
        .unwrap();
    let rejected = queue
        .try_submit(IoEvent::close(recorded.session.session_ref()))
        .unwrap_err();
    assert!(matches!(rejected, QueueError::Full(_)));
    let event = rejected.into_event();
    assert_eq!(event.kind(), IoEventType::Close);

    let worker = tokio::spawn(worker.run());
    queue.submit(event).await.unwrap();
    drop(queue);

    let stats = worker.await.unwrap();
    assert_eq!(stats.delivered, 2);
    assert_eq!(
        recorded.recorder.kinds(),
        vec![IoEventType::SessionOpened, IoEventType::Close]
    );
}

#[tokio::test]
async fn test_failures_are_reported_to_the_session() {
    let recorded = recorded_session("sess-1");
    recorded
        .recorder
        .fail_on(IoEventType::MessageReceived, "decoder rejected frame");
    let (mut queue, worker) = EventQueue::unbounded();

    queue
        .try_submit(IoEvent::message_received(recorded.session.session_ref(), "bad"))
        .unwrap();
    drop(queue);

    let stats = worker.run().await;
    assert_eq!(stats.failed, 1);
    assert_eq!(stats.rerouted, 1);

    let calls = recorded.recorder.calls();
    let Call::ExceptionCaught(_, cause) = &calls[1] else {
        panic!("expected exception, got {:?}", calls[1]);
    };
    assert_eq!(cause.to_string(), "decoder rejected frame");
}
