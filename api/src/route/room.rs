use axum::{routing::get, Router};
use registry::AppRegistry;

use crate::handler::room::{delete_room, register_room, show_room, show_room_list, update_room};

pub fn build_room_routers() -> Router<AppRegistry> {
    let room_routers = Router::new()
        .route("/", get(show_room_list).post(register_room))
        .route(
            "/{room_id}",
            get(show_room).put(update_room).delete(delete_room),
        );

    Router::new().nest("/rooms", room_routers)
}
