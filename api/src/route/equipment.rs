use axum::{routing::get, Router};
use registry::AppRegistry;

use crate::handler::equipment::{
    delete_equipment, register_equipment, show_equipment, show_equipment_list, update_equipment,
};

pub fn build_equipment_routers() -> Router<AppRegistry> {
    let equipment_routers = Router::new()
        .route("/", get(show_equipment_list).post(register_equipment))
        .route(
            "/{equipment_id}",
            get(show_equipment)
                .put(update_equipment)
                .delete(delete_equipment),
        );

    Router::new().nest("/equipment", equipment_routers)
}
