use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket};
use futures::StreamExt;
use log::{info, warn};
use shared::RoomID;

use crate::{
    connection::{Connection, Frame, WsConnection},
    room_registry::RoomRegistry,
};

pub struct ConnectionHandler;

impl ConnectionHandler {
    /// Registers the socket in `room_id` and relays every frame it sends to the
    /// rest of the room until the socket closes or errors.
    pub async fn handle_socket(
        socket: WebSocket,
        room_id: RoomID,
        host: bool,
        registry: Arc<RoomRegistry<WsConnection>>,
    ) {
        let (sink, mut stream) = socket.split();

        let conn = Arc::new(WsConnection::new(sink));
        let conn_id = conn.id();

        info!("{} has connected to room {}", conn_id, room_id);
        registry.join(&room_id, host, Arc::clone(&conn)).await;

        while let Some(result) = stream.next().await {
            let frame = match result {
                Ok(Message::Text(text)) => Frame::Text(text.as_str().to_owned()),
                Ok(Message::Binary(bytes)) => Frame::Binary(bytes.to_vec()),
                Ok(Message::Ping(_)) | Ok(Message::Pong(_)) => continue,
                Ok(Message::Close(_)) => break,
                Err(e) => {
                    warn!("WebSocket read error on {}: {}", conn_id, e);
                    break;
                }
            };

            registry.broadcast(&room_id, &frame, conn_id).await;
        }

        registry.leave(&room_id, conn_id).await;
        conn.close().await;

        info!("{} has disconnected from room {}", conn_id, room_id);
    }
}
