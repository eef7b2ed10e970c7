use chrono::NaiveDate;
use kernel::model::{
    booking::{admission::BookingRequest, Booking, BookingStatus},
    id::{BookingId, RoomId, UserId},
};
use serde::{Deserialize, Serialize};

// 日付は文字列で受け取り、読めない値は未選択として受付判定に回す
fn parse_date(value: Option<&str>) -> Option<NaiveDate> {
    value.and_then(|date| NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").ok())
}

// 状態と所有者はリクエストから受け取らない
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    #[serde(default)]
    pub room_id: Option<i64>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub time: String,
}

impl From<CreateBookingRequest> for BookingRequest {
    fn from(value: CreateBookingRequest) -> Self {
        let CreateBookingRequest {
            room_id,
            date,
            time,
        } = value;
        BookingRequest::new(room_id.map(RoomId::new), parse_date(date.as_deref()), time)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBookingRequest {
    #[serde(default)]
    pub room_id: Option<i64>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub time: String,
}

impl From<UpdateBookingRequest> for BookingRequest {
    fn from(value: UpdateBookingRequest) -> Self {
        let UpdateBookingRequest {
            room_id,
            date,
            time,
        } = value;
        BookingRequest::new(room_id.map(RoomId::new), parse_date(date.as_deref()), time)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBookingStatusRequest {
    pub status: BookingStatus,
}

/// 受付で弾かれたときに返す本文。入力値をそのまま返して再入力に使わせる。
#[derive(Debug, Serialize)]
pub struct RejectedBookingResponse<'a, T> {
    pub errors: Vec<String>,
    pub submitted: &'a T,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingResponse {
    pub booking_id: BookingId,
    pub owner_id: UserId,
    pub owner_name: String,
    pub room_id: RoomId,
    pub room_name: String,
    pub date: NaiveDate,
    pub time: String,
    pub status: BookingStatus,
}

impl From<Booking> for BookingResponse {
    fn from(value: Booking) -> Self {
        let Booking {
            booking_id,
            owner,
            room,
            date,
            time,
            status,
        } = value;
        Self {
            booking_id,
            owner_id: owner.owner_id,
            owner_name: owner.owner_name,
            room_id: room.room_id,
            room_name: room.room_name,
            date,
            time,
            status,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BookingsResponse {
    pub items: Vec<BookingResponse>,
}

impl From<Vec<Booking>> for BookingsResponse {
    fn from(value: Vec<Booking>) -> Self {
        Self {
            items: value.into_iter().map(BookingResponse::from).collect(),
        }
    }
}
