use std::{
    fmt,
    future::Future,
    sync::atomic::{AtomicU64, Ordering},
};

use axum::{
    body::Bytes,
    extract::ws::{Message, WebSocket},
};
use futures::{SinkExt, stream::SplitSink};
use tokio::sync::Mutex;

use crate::error::RelayError;

static NEXT_CONNECTION_ID: AtomicU64 = AtomicU64::new(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(u64);

impl ConnectionId {
    pub fn next() -> Self {
        Self(NEXT_CONNECTION_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "conn-{}", self.0)
    }
}

/// One outbound message. The relay never looks inside `Text` or `Binary`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    Text(String),
    Binary(Vec<u8>),
    Ping,
}

impl From<Frame> for Message {
    fn from(frame: Frame) -> Self {
        match frame {
            Frame::Text(text) => Message::Text(text.into()),
            Frame::Binary(bytes) => Message::Binary(bytes.into()),
            Frame::Ping => Message::Ping(Bytes::new()),
        }
    }
}

/// Write side of a participant's connection, as seen by the registry.
///
/// `id` is the identity used for exclusion and removal; two handles with the
/// same id are the same participant.
pub trait Connection: Send + Sync + 'static {
    fn id(&self) -> ConnectionId;

    fn send(&self, frame: Frame) -> impl Future<Output = Result<(), RelayError>> + Send;
}

pub struct WsConnection {
    id: ConnectionId,
    sink: Mutex<SplitSink<WebSocket, Message>>,
}

impl WsConnection {
    pub fn new(sink: SplitSink<WebSocket, Message>) -> Self {
        Self {
            id: ConnectionId::next(),
            sink: Mutex::new(sink),
        }
    }

    pub async fn close(&self) {
        if let Err(e) = self.sink.lock().await.close().await {
            log::debug!("Error closing {}: {}", self.id, e);
        }
    }
}

impl Connection for WsConnection {
    fn id(&self) -> ConnectionId {
        self.id
    }

    async fn send(&self, frame: Frame) -> Result<(), RelayError> {
        self.sink.lock().await.send(frame.into()).await?;

        Ok(())
    }
}
