use derive_new::new;

use crate::model::{
    booking::{admission::BookingRequest, BookingStatus},
    id::BookingId,
    principal::Principal,
};

#[derive(Debug, new)]
pub struct ApproveBooking {
    pub booking_id: BookingId,
    pub actor: Principal,
}

#[derive(Debug, new)]
pub struct DenyBooking {
    pub booking_id: BookingId,
    pub actor: Principal,
}

#[derive(Debug, new)]
pub struct SetBookingStatus {
    pub booking_id: BookingId,
    pub status: BookingStatus,
    pub actor: Principal,
}

// 所有者による取り消し
#[derive(Debug, new)]
pub struct CancelBooking {
    pub booking_id: BookingId,
    pub actor: Principal,
}

// スタッフ・管理者による削除
#[derive(Debug, new)]
pub struct DeleteBooking {
    pub booking_id: BookingId,
    pub actor: Principal,
}

#[derive(Debug, new)]
pub struct EditBooking {
    pub booking_id: BookingId,
    pub request: BookingRequest,
    pub actor: Principal,
}
