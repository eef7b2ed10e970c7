use async_trait::async_trait;
use chrono::NaiveDate;
use shared::error::AppResult;

use crate::model::{
    booking::{
        event::{CreateBooking, UpdateBooking, UpdateBookingStatus},
        visibility::BookingScope,
        Booking,
    },
    id::{BookingId, RoomId},
};

#[async_trait]
pub trait BookingRepository: Send + Sync {
    // 予約日の新しい順に返す
    async fn find_all(&self, scope: BookingScope) -> AppResult<Vec<Booking>>;
    async fn find_by_id(&self, booking_id: BookingId) -> AppResult<Option<Booking>>;
    // 状態を問わず、同じ部屋・日付・時刻の予約があるか。`excluding` の予約は数えない
    async fn exists_for_slot(
        &self,
        room_id: RoomId,
        date: NaiveDate,
        time: &str,
        excluding: Option<BookingId>,
    ) -> AppResult<bool>;
    // 同じ枠への同時登録に負けた場合は枠重複の AdmissionRejected を返す
    async fn create(&self, event: CreateBooking) -> AppResult<Booking>;
    async fn update(&self, event: UpdateBooking) -> AppResult<Booking>;
    async fn update_status(&self, event: UpdateBookingStatus) -> AppResult<Booking>;
    async fn delete(&self, booking_id: BookingId) -> AppResult<()>;
}
