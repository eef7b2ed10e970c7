use crate::model::id::RoomId;

pub mod event;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    pub room_id: RoomId,
    pub room_name: String,
    pub capacity: i32,
    pub facilities: String,
    pub price_pence: i64,
}
