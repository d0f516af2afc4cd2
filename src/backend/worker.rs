//! Background calls to the classifier.
//!
//! Every call runs on its own thread and reports back over one channel that
//! the UI loop drains between frames, so the current tickets stay on screen
//! while a refresh is in flight. At most one refresh runs at a time.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use super::client::TriageBackend;
use crate::triage::{normalize_response, Category, Ticket};

#[derive(Debug, Clone, PartialEq)]
pub enum RefreshOutcome {
    /// Replace the collection with these
    Loaded(Vec<Ticket>),
    /// Backend answered with no records; keep what we have
    Empty,
    /// Backend unreachable or refused; fall back to the sample set
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum BackendEvent {
    Refreshed(RefreshOutcome),
    ReplySent {
        ticket_id: String,
        result: Result<(), String>,
    },
    FeedbackSent {
        ticket_id: String,
        category: Category,
        result: Result<(), String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshRequest {
    Started,
    AlreadyRunning,
}

pub struct Worker {
    backend: Arc<dyn TriageBackend>,
    tx: Sender<BackendEvent>,
    rx: Receiver<BackendEvent>,
    refresh_in_flight: Arc<AtomicBool>,
}

impl Worker {
    pub fn new(backend: Arc<dyn TriageBackend>) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            backend,
            tx,
            rx,
            refresh_in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn is_refreshing(&self) -> bool {
        self.refresh_in_flight.load(Ordering::Acquire)
    }

    /// Start a refresh unless one is already running
    pub fn request_refresh(&self) -> RefreshRequest {
        if self.refresh_in_flight.swap(true, Ordering::AcqRel) {
            tracing::debug!("refresh already in flight");
            return RefreshRequest::AlreadyRunning;
        }

        let backend = Arc::clone(&self.backend);
        let tx = self.tx.clone();
        thread::spawn(move || {
            let outcome = match backend.fetch_tickets() {
                Ok(body) => {
                    let tickets = normalize_response(body);
                    if tickets.is_empty() {
                        tracing::info!("refresh returned no tickets");
                        RefreshOutcome::Empty
                    } else {
                        tracing::info!(count = tickets.len(), "refresh loaded tickets");
                        RefreshOutcome::Loaded(tickets)
                    }
                }
                Err(e) => {
                    tracing::warn!(error = %e, "refresh failed");
                    RefreshOutcome::Failed(e.to_string())
                }
            };
            let _ = tx.send(BackendEvent::Refreshed(outcome));
        });

        RefreshRequest::Started
    }

    pub fn send_auto_reply(&self, ticket_id: String, reply_text: Option<String>) {
        let backend = Arc::clone(&self.backend);
        let tx = self.tx.clone();
        thread::spawn(move || {
            let result = backend
                .send_auto_reply(&ticket_id, reply_text.as_deref())
                .map(|_| ())
                .map_err(|e| e.to_string());
            if let Err(e) = &result {
                tracing::warn!(ticket = %ticket_id, error = %e, "auto-reply failed");
            }
            let _ = tx.send(BackendEvent::ReplySent { ticket_id, result });
        });
    }

    pub fn submit_feedback(&self, ticket_id: String, category: Category) {
        let backend = Arc::clone(&self.backend);
        let tx = self.tx.clone();
        thread::spawn(move || {
            let result = backend
                .submit_feedback(&ticket_id, category)
                .map(|_| ())
                .map_err(|e| e.to_string());
            if let Err(e) = &result {
                tracing::warn!(ticket = %ticket_id, error = %e, "feedback failed");
            }
            let _ = tx.send(BackendEvent::FeedbackSent {
                ticket_id,
                category,
                result,
            });
        });
    }

    /// Next finished call, if any. Never blocks.
    pub fn try_recv(&self) -> Option<BackendEvent> {
        self.rx.try_recv().ok().map(|event| self.settle(event))
    }

    /// Wait up to `timeout` for the next finished call
    pub fn recv_timeout(&self, timeout: Duration) -> Option<BackendEvent> {
        match self.rx.recv_timeout(timeout) {
            Ok(event) => Some(self.settle(event)),
            Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => None,
        }
    }

    // The in-flight flag drops only once the outcome is handed to the caller,
    // so two refresh outcomes can never be pending together.
    fn settle(&self, event: BackendEvent) -> BackendEvent {
        if matches!(event, BackendEvent::Refreshed(_)) {
            self.refresh_in_flight.store(false, Ordering::Release);
        }
        event
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::client::BackendError;
    use crate::backend::types::ApiResponse;
    use serde_json::{json, Value};
    use std::sync::Mutex;

    /// Answers every fetch with `body` once the test opens the gate
    struct FakeBackend {
        body: Mutex<Option<Value>>,
        gate: Mutex<Receiver<()>>,
    }

    impl FakeBackend {
        fn new(body: Option<Value>) -> (Arc<Self>, Sender<()>) {
            let (open, gate) = mpsc::channel();
            let fake = Arc::new(Self {
                body: Mutex::new(body),
                gate: Mutex::new(gate),
            });
            (fake, open)
        }
    }

    impl TriageBackend for FakeBackend {
        fn fetch_tickets(&self) -> Result<Value, BackendError> {
            let _ = self.gate.lock().unwrap().recv();
            self.body
                .lock()
                .unwrap()
                .clone()
                .ok_or_else(|| BackendError::Rejected("offline".to_string()))
        }

        fn send_auto_reply(
            &self,
            ticket_id: &str,
            _reply_text: Option<&str>,
        ) -> Result<ApiResponse, BackendError> {
            if ticket_id == "bad" {
                Err(BackendError::Rejected("no such ticket".to_string()))
            } else {
                Ok(ApiResponse::default())
            }
        }

        fn submit_feedback(
            &self,
            _ticket_id: &str,
            _category: Category,
        ) -> Result<ApiResponse, BackendError> {
            Ok(ApiResponse::default())
        }
    }

    const WAIT: Duration = Duration::from_secs(5);

    #[test]
    fn test_refresh_is_single_flight() {
        let (fake, open) = FakeBackend::new(Some(json!({"data": [{"ticket_id": "A"}]})));
        let worker = Worker::new(fake);

        assert_eq!(worker.request_refresh(), RefreshRequest::Started);
        assert!(worker.is_refreshing());
        assert_eq!(worker.request_refresh(), RefreshRequest::AlreadyRunning);

        open.send(()).unwrap();
        match worker.recv_timeout(WAIT) {
            Some(BackendEvent::Refreshed(RefreshOutcome::Loaded(tickets))) => {
                assert_eq!(tickets.len(), 1);
                assert_eq!(tickets[0].id, "A");
            }
            other => panic!("unexpected event: {:?}", other),
        }
        assert!(!worker.is_refreshing());

        assert_eq!(worker.request_refresh(), RefreshRequest::Started);
        open.send(()).unwrap();
        assert!(worker.recv_timeout(WAIT).is_some());
        // the rejected second request never produced an outcome
        assert!(worker.try_recv().is_none());
    }

    #[test]
    fn test_refresh_failure_and_empty() {
        let (fake, open) = FakeBackend::new(None);
        let worker = Worker::new(fake.clone());
        worker.request_refresh();
        open.send(()).unwrap();
        assert!(matches!(
            worker.recv_timeout(WAIT),
            Some(BackendEvent::Refreshed(RefreshOutcome::Failed(_)))
        ));

        *fake.body.lock().unwrap() = Some(json!({"data": []}));
        worker.request_refresh();
        open.send(()).unwrap();
        assert_eq!(
            worker.recv_timeout(WAIT),
            Some(BackendEvent::Refreshed(RefreshOutcome::Empty))
        );
    }

    #[test]
    fn test_auto_reply_job_reports_result() {
        let (fake, _open) = FakeBackend::new(None);
        let worker = Worker::new(fake);
        worker.send_auto_reply("bad".to_string(), None);
        match worker.recv_timeout(WAIT) {
            Some(BackendEvent::ReplySent { ticket_id, result }) => {
                assert_eq!(ticket_id, "bad");
                assert!(result.is_err());
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[test]
    fn test_feedback_job_does_not_touch_refresh_flag() {
        let (fake, _open) = FakeBackend::new(None);
        let worker = Worker::new(fake);
        worker.submit_feedback("T-1".to_string(), Category::Finance);
        assert_eq!(
            worker.recv_timeout(WAIT),
            Some(BackendEvent::FeedbackSent {
                ticket_id: "T-1".to_string(),
                category: Category::Finance,
                result: Ok(()),
            })
        );
        assert!(!worker.is_refreshing());
    }
}
