use crate::model::id::RoomId;
use derive_new::new;

#[derive(Debug, new)]
pub struct CreateRoom {
    pub room_name: String,
    pub capacity: i32,
    pub facilities: String,
    pub price_pence: i64,
}

#[derive(Debug, new)]
pub struct UpdateRoom {
    pub room_id: RoomId,
    pub room_name: String,
    pub capacity: i32,
    pub facilities: String,
    pub price_pence: i64,
}
