use chrono::NaiveDate;

use crate::model::{
    id::{BookingId, RoomId},
    user::BookingOwner,
};

pub mod admission;
pub mod command;
pub mod event;
pub mod status;
pub mod visibility;

pub use status::BookingStatus;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Booking {
    pub booking_id: BookingId,
    pub owner: BookingOwner,
    pub room: BookingRoom,
    pub date: NaiveDate,
    // 受け付けた時刻文字列をそのまま保持する。重複判定もこの文字列で行う
    pub time: String,
    pub status: BookingStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingRoom {
    pub room_id: RoomId,
    pub room_name: String,
}
