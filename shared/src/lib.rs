pub mod http_response;

pub const HTTP_PORT: u16 = 8000;

pub const CREATE_ROOM_PATH: &str = "/create";
pub const JOIN_ROOM_PATH: &str = "/join";
pub const HEALTH_PATH: &str = "/health";

pub const ROOM_ID_QUERY_PARAM: &str = "roomID";
pub const HOST_QUERY_PARAM: &str = "host";

pub const ROOM_ID_LENGTH: usize = 8;
pub const ROOM_ID_CHARSET: &[u8] =
    b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ1234567890";

pub type RoomID = String;

pub fn is_valid_room_id(room_id: &str) -> bool {
    room_id.len() == ROOM_ID_LENGTH && room_id.bytes().all(|b| ROOM_ID_CHARSET.contains(&b))
}
