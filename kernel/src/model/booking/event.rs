use chrono::NaiveDate;

use crate::model::{
    booking::{admission::AdmittedSlot, BookingStatus},
    id::{BookingId, RoomId, UserId},
};

/// 受付済みの予約枠から作る新規予約。所有者と初期状態は呼び出し側から受け取らない。
#[derive(Debug)]
pub struct CreateBooking {
    pub owned_by: UserId,
    pub room_id: RoomId,
    pub date: NaiveDate,
    pub time: String,
}

impl CreateBooking {
    pub fn new(owned_by: UserId, slot: AdmittedSlot) -> Self {
        let AdmittedSlot {
            room_id,
            date,
            time,
        } = slot;
        Self {
            owned_by,
            room_id,
            date,
            time,
        }
    }

    pub fn initial_status(&self) -> BookingStatus {
        BookingStatus::Pending
    }
}

#[derive(Debug)]
pub struct UpdateBooking {
    pub booking_id: BookingId,
    pub room_id: RoomId,
    pub date: NaiveDate,
    pub time: String,
}

impl UpdateBooking {
    pub fn new(booking_id: BookingId, slot: AdmittedSlot) -> Self {
        let AdmittedSlot {
            room_id,
            date,
            time,
        } = slot;
        Self {
            booking_id,
            room_id,
            date,
            time,
        }
    }
}

#[derive(Debug)]
pub struct UpdateBookingStatus {
    pub booking_id: BookingId,
    pub status: BookingStatus,
}
