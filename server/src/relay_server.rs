use core::error::Error;
use std::{net::SocketAddr, sync::Arc};

use log::{error, info};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

use crate::{
    config::ServerConfig, liveness_sweeper::LivenessSweeper, room_registry::RoomRegistry,
    routes,
};

pub struct RelayServer {
    listener: TcpListener,
    config: ServerConfig,
}

impl RelayServer {
    pub async fn bind(config: ServerConfig) -> Result<Self, Box<dyn Error + Send + Sync>> {
        Ok(Self {
            listener: TcpListener::bind(&config.addr).await?,
            config,
        })
    }

    pub fn local_addr(&self) -> Result<SocketAddr, Box<dyn Error + Send + Sync>> {
        Ok(self.listener.local_addr()?)
    }

    /// Serves until Ctrl-C. The registry and its sweeper live exactly as long
    /// as this call.
    pub async fn listen(self) -> Result<(), Box<dyn Error + Send + Sync>> {
        let registry = Arc::new(RoomRegistry::new(self.config.write_timeout));
        let shutdown = CancellationToken::new();

        let sweeper = LivenessSweeper::new(
            Arc::clone(&registry),
            self.config.sweep_interval,
            shutdown.clone(),
        )
        .spawn();

        let app = routes::router(registry);

        axum::serve(self.listener, app)
            .with_graceful_shutdown(shutdown_signal(shutdown.clone()))
            .await?;

        shutdown.cancel();
        sweeper.await?;

        return Ok(());
    }
}

async fn shutdown_signal(shutdown: CancellationToken) {
    tokio::select! {
        result = tokio::signal::ctrl_c() => {
            match result {
                Ok(()) => info!("Shutting down"),
                Err(e) => {
                    error!("Error listening for shutdown signal: {}", e);
                    shutdown.cancelled().await;
                }
            }
        }

        _ = shutdown.cancelled() => {}
    }
}
