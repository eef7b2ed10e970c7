use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use garde::Validate;
use kernel::model::{id::UserId, role::Capability};
use registry::AppRegistry;
use shared::error::AppResult;

use crate::{
    extractor::AuthorizedUser,
    model::user::{
        CreateUserRequest, UpdateUserRolesRequest, UpdateUserRolesRequestWithUserId,
        UserResponse, UsersResponse,
    },
};

pub async fn register_user(
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    req.validate()?;

    let user = registry.user_repository().create(req.into()).await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

pub async fn get_current_user(user: AuthorizedUser) -> Json<UserResponse> {
    Json(UserResponse::from(user.user))
}

pub async fn list_users(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<UsersResponse>> {
    user.principal().require(Capability::Admin)?;

    let items = registry
        .user_repository()
        .find_all()
        .await?
        .into_iter()
        .map(UserResponse::from)
        .collect();
    Ok(Json(UsersResponse { items }))
}

pub async fn update_user_roles(
    user: AuthorizedUser,
    Path(user_id): Path<UserId>,
    State(registry): State<AppRegistry>,
    Json(req): Json<UpdateUserRolesRequest>,
) -> AppResult<Json<UserResponse>> {
    user.principal().require(Capability::Admin)?;
    req.validate()?;

    let updated = registry
        .user_repository()
        .update_roles(UpdateUserRolesRequestWithUserId::new(user_id, req).into())
        .await?;
    tracing::info!(%user_id, roles = ?updated.roles, "user roles replaced");
    Ok(Json(updated.into()))
}
