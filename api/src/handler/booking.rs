use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{Local, NaiveDateTime};
use kernel::model::{
    booking::command::{
        ApproveBooking, CancelBooking, DeleteBooking, DenyBooking, EditBooking, SetBookingStatus,
    },
    id::BookingId,
};
use registry::AppRegistry;
use serde::Serialize;
use shared::error::{AppError, AppResult};

use crate::{
    extractor::AuthorizedUser,
    model::{
        booking::{
            BookingResponse, BookingsResponse, CreateBookingRequest, RejectedBookingResponse,
            UpdateBookingRequest, UpdateBookingStatusRequest,
        },
        room::RoomsResponse,
    },
};

// 予約の日時はサーバーのローカル時刻と比較する
fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// 受付で弾かれた場合は違反内容と入力値を合わせて返す。それ以外はそのまま返す。
pub(crate) fn reject_with_submitted<T: Serialize>(error: AppError, submitted: &T) -> Response {
    match error {
        AppError::AdmissionRejected(errors) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(RejectedBookingResponse { errors, submitted }),
        )
            .into_response(),
        other => other.into_response(),
    }
}

pub async fn show_booking_list(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<BookingsResponse>> {
    registry
        .booking_service()
        .list(&user.principal())
        .await
        .map(BookingsResponse::from)
        .map(Json)
}

pub async fn show_available_rooms(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<RoomsResponse>> {
    registry
        .booking_service()
        .available_rooms(&user.principal())
        .await
        .map(RoomsResponse::from)
        .map(Json)
}

pub async fn show_booking(
    user: AuthorizedUser,
    Path(booking_id): Path<BookingId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<BookingResponse>> {
    registry
        .booking_service()
        .find(&user.principal(), booking_id)
        .await
        .map(BookingResponse::from)
        .map(Json)
}

pub async fn register_booking(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateBookingRequest>,
) -> Response {
    let result = registry
        .booking_service()
        .create(&user.principal(), req.clone().into(), now())
        .await;

    match result {
        Ok(booking) => (StatusCode::CREATED, Json(BookingResponse::from(booking))).into_response(),
        Err(e) => reject_with_submitted(e, &req),
    }
}

pub async fn update_booking(
    user: AuthorizedUser,
    Path(booking_id): Path<BookingId>,
    State(registry): State<AppRegistry>,
    Json(req): Json<UpdateBookingRequest>,
) -> Response {
    let command = EditBooking::new(booking_id, req.clone().into(), user.principal());
    match registry.booking_service().edit(command, now()).await {
        Ok(booking) => Json(BookingResponse::from(booking)).into_response(),
        Err(e) => reject_with_submitted(e, &req),
    }
}

pub async fn cancel_booking(
    user: AuthorizedUser,
    Path(booking_id): Path<BookingId>,
    State(registry): State<AppRegistry>,
) -> AppResult<StatusCode> {
    registry
        .booking_service()
        .cancel(CancelBooking::new(booking_id, user.principal()))
        .await
        .map(|_| StatusCode::NO_CONTENT)
}

pub async fn approve_booking(
    user: AuthorizedUser,
    Path(booking_id): Path<BookingId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<BookingResponse>> {
    registry
        .booking_service()
        .approve(ApproveBooking::new(booking_id, user.principal()))
        .await
        .map(BookingResponse::from)
        .map(Json)
}

pub async fn deny_booking(
    user: AuthorizedUser,
    Path(booking_id): Path<BookingId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<BookingResponse>> {
    registry
        .booking_service()
        .deny(DenyBooking::new(booking_id, user.principal()))
        .await
        .map(BookingResponse::from)
        .map(Json)
}

pub async fn update_booking_status(
    user: AuthorizedUser,
    Path(booking_id): Path<BookingId>,
    State(registry): State<AppRegistry>,
    Json(req): Json<UpdateBookingStatusRequest>,
) -> AppResult<Json<BookingResponse>> {
    registry
        .booking_service()
        .set_status(SetBookingStatus::new(
            booking_id,
            req.status,
            user.principal(),
        ))
        .await
        .map(BookingResponse::from)
        .map(Json)
}

pub async fn delete_booking(
    user: AuthorizedUser,
    Path(booking_id): Path<BookingId>,
    State(registry): State<AppRegistry>,
) -> AppResult<StatusCode> {
    registry
        .booking_service()
        .delete(DeleteBooking::new(booking_id, user.principal()))
        .await
        .map(|_| StatusCode::NO_CONTENT)
}
