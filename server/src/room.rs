use std::sync::Arc;

use crate::connection::{Connection, ConnectionId};

pub struct Participant<C> {
    pub host: bool,
    pub conn: Arc<C>,
}

impl<C: Connection> Participant<C> {
    pub fn new(host: bool, conn: Arc<C>) -> Self {
        Self { host, conn }
    }

    pub fn id(&self) -> ConnectionId {
        self.conn.id()
    }
}
