use derive_new::new;
use garde::Validate;
use kernel::model::{
    id::RoomId,
    room::{
        event::{CreateRoom, UpdateRoom},
        Room,
    },
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoomRequest {
    #[garde(length(min = 1))]
    pub room_name: String,
    #[garde(range(min = 1))]
    pub capacity: i32,
    #[garde(skip)]
    #[serde(default)]
    pub facilities: String,
    #[garde(range(min = 0))]
    pub price_pence: i64,
}

impl From<CreateRoomRequest> for CreateRoom {
    fn from(value: CreateRoomRequest) -> Self {
        let CreateRoomRequest {
            room_name,
            capacity,
            facilities,
            price_pence,
        } = value;
        CreateRoom::new(room_name, capacity, facilities, price_pence)
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRoomRequest {
    #[garde(length(min = 1))]
    pub room_name: String,
    #[garde(range(min = 1))]
    pub capacity: i32,
    #[garde(skip)]
    #[serde(default)]
    pub facilities: String,
    #[garde(range(min = 0))]
    pub price_pence: i64,
}

#[derive(new)]
pub struct UpdateRoomRequestWithId(RoomId, UpdateRoomRequest);

impl From<UpdateRoomRequestWithId> for UpdateRoom {
    fn from(value: UpdateRoomRequestWithId) -> Self {
        let UpdateRoomRequestWithId(
            room_id,
            UpdateRoomRequest {
                room_name,
                capacity,
                facilities,
                price_pence,
            },
        ) = value;
        UpdateRoom::new(room_id, room_name, capacity, facilities, price_pence)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomResponse {
    pub room_id: RoomId,
    pub room_name: String,
    pub capacity: i32,
    pub facilities: String,
    pub price_pence: i64,
}

impl From<Room> for RoomResponse {
    fn from(value: Room) -> Self {
        let Room {
            room_id,
            room_name,
            capacity,
            facilities,
            price_pence,
        } = value;
        Self {
            room_id,
            room_name,
            capacity,
            facilities,
            price_pence,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RoomsResponse {
    pub items: Vec<RoomResponse>,
}

impl From<Vec<Room>> for RoomsResponse {
    fn from(value: Vec<Room>) -> Self {
        Self {
            items: value.into_iter().map(RoomResponse::from).collect(),
        }
    }
}
