use rand::Rng;
use shared::{ROOM_ID_CHARSET, ROOM_ID_LENGTH, RoomID};

pub fn generate_room_id<R: Rng>(rng: &mut R) -> RoomID {
    (0..ROOM_ID_LENGTH)
        .map(|_| ROOM_ID_CHARSET[rng.random_range(0..ROOM_ID_CHARSET.len())] as char)
        .collect()
}
