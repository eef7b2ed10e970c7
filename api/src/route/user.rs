use axum::{
    routing::{get, put},
    Router,
};
use registry::AppRegistry;

use crate::handler::user::{get_current_user, list_users, register_user, update_user_roles};

pub fn build_user_routers() -> Router<AppRegistry> {
    let user_routers = Router::new()
        .route("/", get(list_users).post(register_user))
        .route("/me", get(get_current_user))
        .route("/{user_id}/roles", put(update_user_roles));

    Router::new().nest("/users", user_routers)
}
