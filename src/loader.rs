//! One-shot background fetch
//!
//! The worker thread performs the single request and hands the outcome back over a
//! channel. A lifecycle token shared with the [`FetchHandle`] is checked before the
//! result is published, so a view that has gone away is never written to.

use crate::api::{DogRecord, DogSource};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{channel, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tracing::{debug, error, info};

/// Messages from the fetch worker
#[derive(Debug)]
pub enum LoadMessage {
    Loaded(Vec<DogRecord>),
    Failed(String),
}

/// Owner side of an in-flight fetch. Dropping it marks the requester as gone.
pub struct FetchHandle {
    receiver: Receiver<LoadMessage>,
    alive: Arc<AtomicBool>,
}

/// Start the fetch on a background thread.
pub fn spawn_fetch(source: Arc<dyn DogSource>) -> FetchHandle {
    let (tx, rx) = channel();
    let alive = Arc::new(AtomicBool::new(true));
    let token = Arc::clone(&alive);

    thread::spawn(move || {
        run_fetch(source.as_ref(), &token, &tx);
    });

    FetchHandle {
        receiver: rx,
        alive,
    }
}

/// Perform the fetch and publish the outcome if the requester is still alive.
/// Returns whether a message was delivered.
fn run_fetch(source: &dyn DogSource, alive: &AtomicBool, tx: &Sender<LoadMessage>) -> bool {
    let message = match source.fetch() {
        Ok(records) => {
            info!(count = records.len(), "dog images loaded");
            LoadMessage::Loaded(records)
        }
        Err(e) => {
            error!(error = %e, transient = e.is_transient(), "failed to load dog images");
            LoadMessage::Failed(e.to_string())
        }
    };

    if !alive.load(Ordering::Acquire) {
        debug!("view was closed before the fetch finished; discarding result");
        return false;
    }
    tx.send(message).is_ok()
}

impl FetchHandle {
    /// Non-blocking poll, for frame loops.
    pub fn try_recv(&self) -> Option<LoadMessage> {
        match self.receiver.try_recv() {
            Ok(msg) => Some(msg),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                Some(LoadMessage::Failed("fetch worker exited without a result".into()))
            }
        }
    }

    /// Block until the outcome arrives or `timeout` elapses.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<LoadMessage> {
        match self.receiver.recv_timeout(timeout) {
            Ok(msg) => Some(msg),
            Err(RecvTimeoutError::Timeout) => None,
            Err(RecvTimeoutError::Disconnected) => {
                Some(LoadMessage::Failed("fetch worker exited without a result".into()))
            }
        }
    }

    /// Mark the requester as gone without dropping the handle.
    pub fn cancel(&self) {
        self.alive.store(false, Ordering::Release);
    }
}

impl Drop for FetchHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Breed;
    use crate::{DogTableError, Result};
    use std::sync::atomic::AtomicUsize;

    struct Fixed(Vec<DogRecord>);

    impl DogSource for Fixed {
        fn fetch(&self) -> Result<Vec<DogRecord>> {
            Ok(self.0.clone())
        }
    }

    struct Broken;

    impl DogSource for Broken {
        fn fetch(&self) -> Result<Vec<DogRecord>> {
            Err(DogTableError::Status {
                status: 500,
                url: "https://example.test".into(),
            })
        }
    }

    struct Counting(AtomicUsize);

    impl DogSource for Counting {
        fn fetch(&self) -> Result<Vec<DogRecord>> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(Vec::new())
        }
    }

    #[test]
    fn delivers_records() {
        let records = vec![DogRecord::new("a.jpg", vec![Breed::new("Pug")])];
        let handle = spawn_fetch(Arc::new(Fixed(records.clone())));
        match handle.recv_timeout(Duration::from_secs(5)) {
            Some(LoadMessage::Loaded(got)) => assert_eq!(got, records),
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[test]
    fn delivers_failure_as_message() {
        let handle = spawn_fetch(Arc::new(Broken));
        match handle.recv_timeout(Duration::from_secs(5)) {
            Some(LoadMessage::Failed(msg)) => assert!(msg.contains("500")),
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[test]
    fn fetches_exactly_once() {
        let source = Arc::new(Counting(AtomicUsize::new(0)));
        let handle = spawn_fetch(source.clone());
        assert!(matches!(
            handle.recv_timeout(Duration::from_secs(5)),
            Some(LoadMessage::Loaded(_))
        ));
        assert_eq!(source.0.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn closed_requester_receives_nothing() {
        let (tx, rx) = channel();
        let alive = AtomicBool::new(false);
        let delivered = run_fetch(&Fixed(vec![DogRecord::new("a.jpg", vec![])]), &alive, &tx);
        assert!(!delivered);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn dropping_handle_clears_token() {
        let handle = spawn_fetch(Arc::new(Fixed(Vec::new())));
        let token = Arc::clone(&handle.alive);
        assert!(token.load(Ordering::Acquire));
        drop(handle);
        assert!(!token.load(Ordering::Acquire));
    }
}
