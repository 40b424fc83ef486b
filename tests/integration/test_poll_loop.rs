//! End-to-end tests for the hwpoll control loop.
//!
//! These drive [`Poller::tick`] directly against scripted responses and
//! an in-memory messenger, so whole multi-cycle scenarios run without a
//! network or wall-clock delay.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use hwpoll_api::{ApiError, StatusSource};
use hwpoll_notify::{Messenger, NotifyError};
use hwpoll_poller::{CycleOutcome, Poller};
use serde_json::{json, Value};

/// Status source that replays a fixed script of responses.
struct ScriptedSource {
    replies: Mutex<VecDeque<hwpoll_api::Result<Value>>>,
}

impl ScriptedSource {
    fn new(replies: Vec<hwpoll_api::Result<Value>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
        }
    }
}

#[async_trait]
impl StatusSource for ScriptedSource {
    async fn poll(&self, _from_date: i64) -> hwpoll_api::Result<Value> {
        self.replies
            .lock()
            .expect("script lock poisoned")
            .pop_front()
            .expect("script exhausted")
    }
}

/// Messenger that records every send in memory.
struct RecordingMessenger {
    sent: Mutex<Vec<String>>,
    fail: bool,
}

impl RecordingMessenger {
    fn new() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail: false,
        }
    }

    fn failing() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    fn sent(&self) -> Vec<String> {
        self.sent.lock().expect("sent lock poisoned").clone()
    }
}

#[async_trait]
impl Messenger for RecordingMessenger {
    async fn send(&self, text: &str) -> hwpoll_notify::Result<()> {
        self.sent
            .lock()
            .expect("sent lock poisoned")
            .push(text.to_string());
        if self.fail {
            return Err(NotifyError::Rejected {
                description: "chat not found".to_string(),
            });
        }
        Ok(())
    }
}

fn payload(name: &str, status: &str) -> Value {
    json!({
        "homeworks": [{"homework_name": name, "status": status}],
        "current_date": 1_700_000_000,
    })
}

fn poller(
    replies: Vec<hwpoll_api::Result<Value>>,
) -> Poller<ScriptedSource, RecordingMessenger> {
    Poller::new(ScriptedSource::new(replies), RecordingMessenger::new(), 0)
}

/// A full run: reviewing, repeat, approved. One notification per
/// maximal run of identical status messages, with the exact text.
#[tokio::test]
async fn test_notification_per_status_run() {
    let mut poller = poller(vec![
        Ok(payload("hw1", "reviewing")),
        Ok(payload("hw1", "reviewing")),
        Ok(payload("hw1", "approved")),
        Ok(payload("hw1", "approved")),
    ]);

    let reviewing =
        "Review status changed for \"hw1\". The work was taken up for review.";
    let approved = "Review status changed for \"hw1\". \
                    The reviewer checked the work and liked everything. Hooray!";

    assert_eq!(
        poller.tick().await,
        CycleOutcome::Notified(reviewing.to_string())
    );
    assert_eq!(poller.tick().await, CycleOutcome::Unchanged);
    assert_eq!(
        poller.tick().await,
        CycleOutcome::Notified(approved.to_string())
    );
    assert_eq!(poller.tick().await, CycleOutcome::Unchanged);
}

/// A response without the homework collection fails the cycle and sends
/// no status notification, only one failure relay.
#[tokio::test]
async fn test_missing_collection_field() {
    let mut poller = poller(vec![Ok(json!({"current_date": 5}))]);

    let outcome = poller.tick().await;
    assert!(matches!(
        outcome,
        CycleOutcome::Failed { notified: true, .. }
    ));

    let sent = poller_sent(&poller);
    assert_eq!(sent.len(), 1);
    assert!(sent[0].contains("no 'homeworks' field"));
    assert!(!sent[0].contains("Review status changed"));
}

/// An empty collection is a distinct malformed-response failure.
#[tokio::test]
async fn test_empty_collection() {
    let mut poller = poller(vec![Ok(json!({"homeworks": []}))]);

    let outcome = poller.tick().await;
    assert!(outcome.is_failure());

    let sent = poller_sent(&poller);
    assert_eq!(sent.len(), 1);
    assert!(sent[0].contains("homework list is empty"));
}

/// A status code outside the known set fails the cycle; no notification
/// text is generated for it.
#[tokio::test]
async fn test_unknown_status_code() {
    let mut poller = poller(vec![Ok(payload("hw1", "graded"))]);

    let outcome = poller.tick().await;
    assert!(outcome.is_failure());

    let sent = poller_sent(&poller);
    assert_eq!(sent.len(), 1);
    assert!(sent[0].contains("unknown homework status 'graded'"));
    assert!(!sent[0].contains("Review status changed"));
}

/// Identical consecutive failures relay once; a different failure
/// message relays again.
#[tokio::test]
async fn test_failure_dedup_channel() {
    let mut poller = poller(vec![
        Err(ApiError::bad_status(503)),
        Err(ApiError::bad_status(503)),
        Err(ApiError::MissingHomeworks),
    ]);

    assert!(matches!(
        poller.tick().await,
        CycleOutcome::Failed { notified: true, .. }
    ));
    assert!(matches!(
        poller.tick().await,
        CycleOutcome::Failed {
            notified: false,
            ..
        }
    ));
    assert!(matches!(
        poller.tick().await,
        CycleOutcome::Failed { notified: true, .. }
    ));

    assert_eq!(poller_sent(&poller).len(), 2);
}

/// Status and failure dedup are separate channels: a failure between
/// two identical statuses does not cause a duplicate status send.
#[tokio::test]
async fn test_channels_are_independent() {
    let mut poller = poller(vec![
        Ok(payload("hw1", "rejected")),
        Err(ApiError::bad_status(500)),
        Ok(payload("hw1", "rejected")),
        Err(ApiError::bad_status(500)),
    ]);

    assert!(matches!(poller.tick().await, CycleOutcome::Notified(_)));
    assert!(matches!(
        poller.tick().await,
        CycleOutcome::Failed { notified: true, .. }
    ));
    assert_eq!(poller.tick().await, CycleOutcome::Unchanged);
    // Same failure again after a good cycle: still remembered
    assert!(matches!(
        poller.tick().await,
        CycleOutcome::Failed {
            notified: false,
            ..
        }
    ));

    // One status message plus one failure message in total
    assert_eq!(poller_sent(&poller).len(), 2);
}

/// A dropped Telegram send never fails the cycle, and the dedup state
/// still advances so the message is not re-sent next cycle.
#[tokio::test]
async fn test_transport_failure_is_best_effort() {
    let mut poller = Poller::new(
        ScriptedSource::new(vec![
            Ok(payload("hw1", "approved")),
            Ok(payload("hw1", "approved")),
        ]),
        RecordingMessenger::failing(),
        0,
    );

    assert!(matches!(poller.tick().await, CycleOutcome::Notified(_)));
    assert_eq!(poller.tick().await, CycleOutcome::Unchanged);
    assert_eq!(poller_sent(&poller).len(), 1);
}

/// The cursor advances to the response's `current_date` after a
/// successfully validated cycle.
#[tokio::test]
async fn test_cursor_follows_server_date() {
    let mut poller = poller(vec![Ok(payload("hw1", "reviewing"))]);
    assert_eq!(poller.cursor(), 0);

    poller.tick().await;
    assert_eq!(poller.cursor(), 1_700_000_000);
}

/// Pulls the recorded sends back out of a poller.
fn poller_sent(poller: &Poller<ScriptedSource, RecordingMessenger>) -> Vec<String> {
    poller.messenger().sent()
}
