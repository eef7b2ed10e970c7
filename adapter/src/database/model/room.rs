use kernel::model::{id::RoomId, room::Room};

#[derive(sqlx::FromRow)]
pub struct RoomRow {
    pub room_id: RoomId,
    pub room_name: String,
    pub capacity: i32,
    pub facilities: String,
    pub price_pence: i64,
}

impl From<RoomRow> for Room {
    fn from(value: RoomRow) -> Self {
        let RoomRow {
            room_id,
            room_name,
            capacity,
            facilities,
            price_pence,
        } = value;
        Room {
            room_id,
            room_name,
            capacity,
            facilities,
            price_pence,
        }
    }
}
