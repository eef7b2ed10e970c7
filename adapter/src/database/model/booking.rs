use chrono::NaiveDate;
use kernel::model::{
    booking::{Booking, BookingRoom, BookingStatus},
    id::{BookingId, RoomId, UserId},
    user::BookingOwner,
};
use shared::error::AppError;

// 予約一覧・詳細の取得に使う型。部屋名と所有者名を結合して取得する
#[derive(sqlx::FromRow)]
pub struct BookingRow {
    pub booking_id: BookingId,
    pub user_id: UserId,
    pub user_name: String,
    pub room_id: RoomId,
    pub room_name: String,
    pub booking_date: NaiveDate,
    pub booking_time: String,
    pub status: String,
}

impl TryFrom<BookingRow> for Booking {
    type Error = AppError;

    fn try_from(value: BookingRow) -> Result<Self, Self::Error> {
        let BookingRow {
            booking_id,
            user_id,
            user_name,
            room_id,
            room_name,
            booking_date,
            booking_time,
            status,
        } = value;
        let status = status.parse::<BookingStatus>().map_err(|_| {
            AppError::ConversionEntityError(format!(
                "booking {booking_id} has an unknown status: {status}"
            ))
        })?;
        Ok(Booking {
            booking_id,
            owner: BookingOwner {
                owner_id: user_id,
                owner_name: user_name,
            },
            room: BookingRoom { room_id, room_name },
            date: booking_date,
            time: booking_time,
            status,
        })
    }
}
