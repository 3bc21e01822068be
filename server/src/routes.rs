use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{
        Query, State,
        ws::{WebSocketUpgrade, rejection::WebSocketUpgradeRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use log::{info, warn};
use serde::Deserialize;
use shared::{
    CREATE_ROOM_PATH, HEALTH_PATH, JOIN_ROOM_PATH,
    http_response::{CreateRoomResponse, ErrorResponse, HealthResponse},
};
use tower_http::cors::CorsLayer;

use crate::{
    connection::WsConnection, connection_handler::ConnectionHandler,
    room_registry::RoomRegistry,
};

pub type SharedRegistry = Arc<RoomRegistry<WsConnection>>;

#[derive(Debug, Deserialize)]
pub struct JoinQuery {
    #[serde(rename = "roomID")]
    room_id: Option<String>,

    host: Option<String>,
}

impl JoinQuery {
    /// Any `host` value other than `true` or `1` joins as a guest.
    fn is_host(&self) -> bool {
        self.host
            .as_deref()
            .is_some_and(|host| host.eq_ignore_ascii_case("true") || host == "1")
    }
}

pub fn router(registry: SharedRegistry) -> Router {
    Router::new()
        .route(CREATE_ROOM_PATH, post(create_room))
        .route(JOIN_ROOM_PATH, get(join_room))
        .route(HEALTH_PATH, get(health))
        .layer(CorsLayer::permissive())
        .with_state(registry)
}

async fn create_room(State(registry): State<SharedRegistry>) -> Json<CreateRoomResponse> {
    Json(CreateRoomResponse {
        room_id: registry.create_room().await,
    })
}

async fn join_room(
    State(registry): State<SharedRegistry>,
    Query(query): Query<JoinQuery>,
    ws: Result<WebSocketUpgrade, WebSocketUpgradeRejection>,
) -> Response {
    let host = query.is_host();

    let room_id = match query.room_id {
        Some(room_id) if !room_id.is_empty() => room_id,
        _ => {
            let body = ErrorResponse {
                error: "roomID is required".to_string(),
            };
            return (StatusCode::BAD_REQUEST, Json(body)).into_response();
        }
    };

    let ws = match ws {
        Ok(ws) => ws,
        Err(rejection) => {
            warn!("WebSocket upgrade error: {}", rejection);
            return rejection.into_response();
        }
    };

    if !registry.contains_room(&room_id).await {
        info!("Joining room {} which was not created first", room_id);
    }

    ws.on_upgrade(move |socket| ConnectionHandler::handle_socket(socket, room_id, host, registry))
}

async fn health(State(registry): State<SharedRegistry>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        rooms: registry.room_count().await,
    })
}
