use core::error::Error;

use shared::{
    CREATE_ROOM_PATH, HOST_QUERY_PARAM, JOIN_ROOM_PATH, ROOM_ID_LENGTH, ROOM_ID_QUERY_PARAM,
    RoomID, http_response::CreateRoomResponse, is_valid_room_id,
};
use tokio_tungstenite::connect_async;

use crate::{call_session::CallSession, cli_display::CliDisplay};

pub struct Client;

impl Client {
    pub async fn run(
        server_addr: &str,
        port: u16,
        room_option: Option<String>,
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        let (room_id, host) = match room_option {
            Some(room_id) => {
                if !is_valid_room_id(&room_id) {
                    return Err(format!(
                        "Room id must be {} letters or digits.",
                        ROOM_ID_LENGTH
                    )
                    .into());
                }

                (room_id, false)
            }
            None => (create_room(&create_url(server_addr, port)).await?, true),
        };

        let (ws_stream, _) = connect_async(join_url(server_addr, port, &room_id, host)).await?;
        CliDisplay::print_joined_message(server_addr, &room_id, host);

        CallSession::run(ws_stream).await?;
        CliDisplay::print_left_room(&room_id);

        return Ok(());
    }
}

async fn create_room(url: &str) -> Result<RoomID, Box<dyn Error + Send + Sync>> {
    let response: CreateRoomResponse = reqwest::Client::new()
        .post(url)
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    Ok(response.room_id)
}

fn create_url(server_addr: &str, port: u16) -> String {
    format!("http://{}:{}{}", server_addr, port, CREATE_ROOM_PATH)
}

fn join_url(server_addr: &str, port: u16, room_id: &str, host: bool) -> String {
    let mut url = format!(
        "ws://{}:{}{}?{}={}",
        server_addr, port, JOIN_ROOM_PATH, ROOM_ID_QUERY_PARAM, room_id
    );

    if host {
        url.push_str(&format!("&{}=true", HOST_QUERY_PARAM));
    }

    url
}
