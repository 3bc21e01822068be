use std::{
    io,
    sync::{
        Arc, Mutex,
        atomic::{AtomicBool, Ordering},
    },
};

use tokio::sync::Notify;

use crate::{
    connection::{Connection, ConnectionId, Frame},
    error::RelayError,
};

/// In-memory connection that records what it is sent.
pub struct MockConnection {
    id: ConnectionId,
    received: Mutex<Vec<Frame>>,
    failing: AtomicBool,
    stalled: AtomicBool,
    unstalled: Notify,
}

impl MockConnection {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            id: ConnectionId::next(),
            received: Mutex::new(Vec::new()),
            failing: AtomicBool::new(false),
            stalled: AtomicBool::new(false),
            unstalled: Notify::new(),
        })
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Writes on a stalled connection hang until it is unstalled.
    pub fn set_stalled(&self, stalled: bool) {
        self.stalled.store(stalled, Ordering::SeqCst);

        if !stalled {
            self.unstalled.notify_waiters();
        }
    }

    pub fn received(&self) -> Vec<Frame> {
        self.received.lock().unwrap().clone()
    }
}

impl Connection for MockConnection {
    fn id(&self) -> ConnectionId {
        self.id
    }

    async fn send(&self, frame: Frame) -> Result<(), RelayError> {
        loop {
            let unstalled = self.unstalled.notified();

            if !self.stalled.load(Ordering::SeqCst) {
                break;
            }

            unstalled.await;
        }

        if self.failing.load(Ordering::SeqCst) {
            let broken_pipe = io::Error::from(io::ErrorKind::BrokenPipe);
            return Err(RelayError::Transport(axum::Error::new(broken_pipe)));
        }

        self.received.lock().unwrap().push(frame);

        Ok(())
    }
}
