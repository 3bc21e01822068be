use std::{sync::Arc, time::Duration};

use log::{debug, info};
use tokio::{task::JoinHandle, time::interval_at};
use tokio_util::sync::CancellationToken;

use crate::{connection::Connection, room_registry::RoomRegistry};

pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(10 * 60);

/// Periodically pings every participant and drops the ones that no longer
/// answer, along with rooms they leave empty.
pub struct LivenessSweeper<C> {
    registry: Arc<RoomRegistry<C>>,
    interval: Duration,
    shutdown: CancellationToken,
}

impl<C: Connection> LivenessSweeper<C> {
    pub fn new(
        registry: Arc<RoomRegistry<C>>,
        interval: Duration,
        shutdown: CancellationToken,
    ) -> Self {
        Self {
            registry,
            interval,
            shutdown,
        }
    }

    /// The first sweep happens one full interval after spawning.
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(async move {
            let start = tokio::time::Instant::now() + self.interval;
            let mut sweep_interval = interval_at(start, self.interval);

            info!("Liveness sweep running every {:?}", self.interval);

            loop {
                tokio::select! {
                    _ = self.shutdown.cancelled() => {
                        info!("Liveness sweep stopped");
                        return;
                    }

                    _ = sweep_interval.tick() => {
                        let report = self.registry.sweep().await;

                        if report.evicted > 0 || report.rooms_removed > 0 {
                            info!(
                                "Liveness sweep evicted {} of {} participants, removed {} rooms",
                                report.evicted, report.pinged, report.rooms_removed
                            );
                        } else {
                            debug!("Liveness sweep pinged {} participants", report.pinged);
                        }
                    }
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::MockConnection;

    #[tokio::test]
    async fn sweeper_evicts_dead_participants_on_tick() {
        let registry = Arc::new(RoomRegistry::new(Some(Duration::from_millis(50))));
        let room_id = registry.create_room().await;
        let alive = MockConnection::new();
        let dead = MockConnection::new();
        registry.join(&room_id, true, alive.clone()).await;
        registry.join(&room_id, false, dead.clone()).await;
        dead.set_failing(true);

        let shutdown = CancellationToken::new();
        let handle = LivenessSweeper::new(
            Arc::clone(&registry),
            Duration::from_millis(20),
            shutdown.clone(),
        )
        .spawn();

        tokio::time::sleep(Duration::from_millis(150)).await;
        shutdown.cancel();
        handle.await.unwrap();

        assert_eq!(registry.member_ids(&room_id).await, vec![alive.id()]);
        assert!(!alive.received().is_empty());
    }

    #[tokio::test]
    async fn sweeper_waits_a_full_interval_before_first_sweep() {
        let registry = Arc::new(RoomRegistry::new(None));
        let room_id = registry.create_room().await;
        let dead = MockConnection::new();
        registry.join(&room_id, false, dead.clone()).await;
        dead.set_failing(true);

        let shutdown = CancellationToken::new();
        let handle = LivenessSweeper::new(
            Arc::clone(&registry),
            Duration::from_secs(3600),
            shutdown.clone(),
        )
        .spawn();

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(registry.contains_room(&room_id).await);

        shutdown.cancel();
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn cancelled_sweeper_stops_promptly() {
        let registry: Arc<RoomRegistry<MockConnection>> = Arc::new(RoomRegistry::new(None));
        let shutdown = CancellationToken::new();
        let handle = LivenessSweeper::new(registry, DEFAULT_SWEEP_INTERVAL, shutdown.clone()).spawn();

        shutdown.cancel();

        tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .expect("sweeper did not stop")
            .unwrap();
    }
}
