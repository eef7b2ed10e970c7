use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use garde::Validate;
use kernel::model::{id::RoomId, role::Capability};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

use crate::{
    extractor::AuthorizedUser,
    model::room::{
        CreateRoomRequest, RoomResponse, RoomsResponse, UpdateRoomRequest, UpdateRoomRequestWithId,
    },
};

pub async fn register_room(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateRoomRequest>,
) -> AppResult<(StatusCode, Json<RoomResponse>)> {
    user.principal().require(Capability::Admin)?;
    req.validate()?;

    let room = registry.room_repository().create(req.into()).await?;
    Ok((StatusCode::CREATED, Json(room.into())))
}

pub async fn show_room_list(
    _user: AuthorizedUser,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<RoomsResponse>> {
    registry
        .room_repository()
        .find_all()
        .await
        .map(RoomsResponse::from)
        .map(Json)
}

pub async fn show_room(
    _user: AuthorizedUser,
    Path(room_id): Path<RoomId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<RoomResponse>> {
    registry
        .room_repository()
        .find_by_id(room_id)
        .await
        .and_then(|room| match room {
            Some(room) => Ok(Json(room.into())),
            None => Err(AppError::EntityNotFound(format!(
                "Room {room_id} was not found."
            ))),
        })
}

pub async fn update_room(
    user: AuthorizedUser,
    Path(room_id): Path<RoomId>,
    State(registry): State<AppRegistry>,
    Json(req): Json<UpdateRoomRequest>,
) -> AppResult<Json<RoomResponse>> {
    user.principal().require(Capability::Admin)?;
    req.validate()?;

    registry
        .room_repository()
        .update(UpdateRoomRequestWithId::new(room_id, req).into())
        .await
        .map(RoomResponse::from)
        .map(Json)
}

pub async fn delete_room(
    user: AuthorizedUser,
    Path(room_id): Path<RoomId>,
    State(registry): State<AppRegistry>,
) -> AppResult<StatusCode> {
    user.principal().require(Capability::Admin)?;

    registry
        .room_repository()
        .delete(room_id)
        .await
        .map(|_| StatusCode::NO_CONTENT)
}
