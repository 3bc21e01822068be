mod config;
mod connection;
mod connection_handler;
mod error;
mod liveness_sweeper;
mod relay_server;
mod room;
mod room_id;
mod room_registry;
mod routes;
#[cfg(test)]
mod test_support;

use clap::Parser;
use log::{error, info};

use crate::{
    config::{Args, ServerConfig},
    relay_server::RelayServer,
};

#[tokio::main]
async fn main() {
    let args = Args::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = ServerConfig::from(args);

    let server = match RelayServer::bind(config).await {
        Ok(relay_server) => relay_server,
        Err(e) => {
            error!("Error binding: {}", e);
            return;
        }
    };

    match server.local_addr() {
        Ok(addr) => info!("Relay server listening on {}", addr),
        Err(e) => error!("Error reading local address: {}", e),
    }

    if let Err(e) = server.listen().await {
        error!("{}", e);
    }
}
