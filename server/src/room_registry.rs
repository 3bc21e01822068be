use std::{collections::HashMap, sync::Arc, time::Duration};

use log::{info, warn};
use rand::Rng;
use shared::RoomID;
use tokio::sync::RwLock;

use crate::{
    connection::{Connection, ConnectionId, Frame},
    error::RelayError,
    room::Participant,
    room_id::generate_room_id,
};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BroadcastReport {
    pub delivered: usize,
    pub failed: usize,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SweepReport {
    pub pinged: usize,
    pub evicted: usize,
    pub rooms_removed: usize,
}

/// Process-wide table of rooms and their participants.
///
/// Membership changes (create, join, leave, sweep) take the write lock.
/// Broadcast only takes the read lock, so broadcasts run concurrently with
/// each other but never with a membership change.
///
/// A room id maps to a non-empty participant list, except between
/// `create_room` and the first `join`.
pub struct RoomRegistry<C> {
    rooms: RwLock<HashMap<RoomID, Vec<Participant<C>>>>,
    write_timeout: Option<Duration>,
}

impl<C: Connection> RoomRegistry<C> {
    /// `write_timeout` bounds every single outbound write made by
    /// `broadcast` and `sweep`. `None` lets a stalled peer block the caller.
    pub fn new(write_timeout: Option<Duration>) -> Self {
        Self {
            rooms: RwLock::new(HashMap::new()),
            write_timeout,
        }
    }

    pub async fn create_room(&self) -> RoomID {
        let mut rooms = self.rooms.write().await;

        let room_id = insert_unique_room(&mut rooms, &mut rand::rng());
        info!("Created room {}", room_id);

        room_id
    }

    /// Appends a participant. An unknown `room_id` is created on the fly.
    pub async fn join(&self, room_id: &str, host: bool, conn: Arc<C>) {
        let conn_id = conn.id();
        let mut rooms = self.rooms.write().await;

        let participants = rooms.entry(room_id.to_string()).or_default();
        participants.push(Participant::new(host, conn));

        info!(
            "Added participant {} (host: {}) to room {}. Total participants: {}",
            conn_id,
            host,
            room_id,
            participants.len()
        );
    }

    pub async fn leave(&self, room_id: &str, conn_id: ConnectionId) {
        let mut rooms = self.rooms.write().await;

        let Some(participants) = rooms.get_mut(room_id) else {
            return;
        };

        let Some(index) = participants.iter().position(|p| p.id() == conn_id) else {
            return;
        };

        participants.remove(index);

        if participants.is_empty() {
            rooms.remove(room_id);
            info!("Room {} deleted as it became empty", room_id);
        }
    }

    /// Sends `frame` to every participant of `room_id` except `exclude`.
    ///
    /// A failed write is logged and counted; the participant stays in the
    /// room. Dead connections are removed by their handler or by `sweep`.
    pub async fn broadcast(
        &self,
        room_id: &str,
        frame: &Frame,
        exclude: ConnectionId,
    ) -> BroadcastReport {
        let rooms = self.rooms.read().await;
        let mut report = BroadcastReport::default();

        let Some(participants) = rooms.get(room_id) else {
            return report;
        };

        for participant in participants.iter().filter(|p| p.id() != exclude) {
            match self.send_bounded(&participant.conn, frame.clone()).await {
                Ok(()) => report.delivered += 1,
                Err(e) => {
                    report.failed += 1;
                    warn!(
                        "Broadcast error in room {} to {}: {}",
                        room_id,
                        participant.id(),
                        e
                    );
                }
            }
        }

        report
    }

    /// Pings every participant. Participants whose ping fails
    /// are evicted and rooms left without participants are deleted.
    pub async fn sweep(&self) -> SweepReport {
        let mut rooms = self.rooms.write().await;
        let mut report = SweepReport::default();
        let mut emptied = Vec::new();

        for (room_id, participants) in rooms.iter_mut() {
            let mut alive = Vec::with_capacity(participants.len());

            for participant in std::mem::take(participants) {
                report.pinged += 1;

                match self.send_bounded(&participant.conn, Frame::Ping).await {
                    Ok(()) => alive.push(participant),
                    Err(e) => {
                        report.evicted += 1;
                        info!(
                            "Evicting {} (host: {}) from room {}: {}",
                            participant.id(),
                            participant.host,
                            room_id,
                            e
                        );
                    }
                }
            }

            if alive.is_empty() {
                emptied.push(room_id.clone());
            }

            *participants = alive;
        }

        for room_id in emptied {
            rooms.remove(&room_id);
            report.rooms_removed += 1;
            info!("Room {} deleted by liveness sweep", room_id);
        }

        report
    }

    pub async fn room_count(&self) -> usize {
        self.rooms.read().await.len()
    }

    pub async fn contains_room(&self, room_id: &str) -> bool {
        self.rooms.read().await.contains_key(room_id)
    }

    async fn send_bounded(&self, conn: &C, frame: Frame) -> Result<(), RelayError> {
        match self.write_timeout {
            Some(limit) => tokio::time::timeout(limit, conn.send(frame))
                .await
                .map_err(|_| RelayError::Timeout(limit))?,
            None => conn.send(frame).await,
        }
    }
}

fn insert_unique_room<P, R: Rng>(rooms: &mut HashMap<RoomID, Vec<P>>, rng: &mut R) -> RoomID {
    loop {
        let candidate = generate_room_id(rng);

        if rooms.contains_key(&candidate) {
            warn!("Room id {} already taken, drawing another", candidate);
            continue;
        }

        rooms.insert(candidate.clone(), Vec::new());
        return candidate;
    }
}

#[cfg(test)]
impl<C: Connection> RoomRegistry<C> {
    pub async fn participant_count(&self, room_id: &str) -> Option<usize> {
        self.rooms.read().await.get(room_id).map(Vec::len)
    }

    pub async fn member_ids(&self, room_id: &str) -> Vec<ConnectionId> {
        self.rooms
            .read()
            .await
            .get(room_id)
            .map(|participants| participants.iter().map(Participant::id).collect())
            .unwrap_or_default()
    }

    pub async fn host_ids(&self, room_id: &str) -> Vec<ConnectionId> {
        self.rooms
            .read()
            .await
            .get(room_id)
            .map(|participants| {
                participants
                    .iter()
                    .filter(|p| p.host)
                    .map(Participant::id)
                    .collect()
            })
            .unwrap_or_default()
    }
}
