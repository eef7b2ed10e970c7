use axum::{
    routing::{get, post, put},
    Router,
};
use registry::AppRegistry;

use crate::handler::booking::{
    approve_booking, cancel_booking, delete_booking, deny_booking, register_booking,
    show_available_rooms, show_booking, show_booking_list, update_booking,
    update_booking_status,
};

pub fn build_booking_routers() -> Router<AppRegistry> {
    let booking_routers = Router::new()
        .route("/", get(show_booking_list).post(register_booking))
        .route("/available-rooms", get(show_available_rooms))
        .route(
            "/{booking_id}",
            get(show_booking).put(update_booking).delete(delete_booking),
        )
        .route("/{booking_id}/cancel", post(cancel_booking))
        .route("/{booking_id}/approve", post(approve_booking))
        .route("/{booking_id}/deny", post(deny_booking))
        .route("/{booking_id}/status", put(update_booking_status));

    Router::new().nest("/bookings", booking_routers)
}
