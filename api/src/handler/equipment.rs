use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use garde::Validate;
use kernel::model::{id::EquipmentId, role::Capability};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

use crate::{
    extractor::AuthorizedUser,
    model::equipment::{
        CreateEquipmentRequest, EquipmentListResponse, EquipmentResponse, UpdateEquipmentRequest,
        UpdateEquipmentRequestWithId,
    },
};

pub async fn register_equipment(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateEquipmentRequest>,
) -> AppResult<(StatusCode, Json<EquipmentResponse>)> {
    user.principal().require(Capability::Admin)?;
    req.validate()?;

    let equipment = registry.equipment_repository().create(req.into()).await?;
    Ok((StatusCode::CREATED, Json(equipment.into())))
}

pub async fn show_equipment_list(
    _user: AuthorizedUser,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<EquipmentListResponse>> {
    registry
        .equipment_repository()
        .find_all()
        .await
        .map(EquipmentListResponse::from)
        .map(Json)
}

pub async fn show_equipment(
    _user: AuthorizedUser,
    Path(equipment_id): Path<EquipmentId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<EquipmentResponse>> {
    registry
        .equipment_repository()
        .find_by_id(equipment_id)
        .await?
        .map(|equipment| Json(equipment.into()))
        .ok_or_else(|| AppError::EntityNotFound(format!("Equipment {equipment_id} was not found.")))
}

pub async fn update_equipment(
    user: AuthorizedUser,
    Path(equipment_id): Path<EquipmentId>,
    State(registry): State<AppRegistry>,
    Json(req): Json<UpdateEquipmentRequest>,
) -> AppResult<Json<EquipmentResponse>> {
    user.principal().require(Capability::Admin)?;
    req.validate()?;

    registry
        .equipment_repository()
        .update(UpdateEquipmentRequestWithId::new(equipment_id, req).into())
        .await
        .map(EquipmentResponse::from)
        .map(Json)
}

pub async fn delete_equipment(
    user: AuthorizedUser,
    Path(equipment_id): Path<EquipmentId>,
    State(registry): State<AppRegistry>,
) -> AppResult<StatusCode> {
    user.principal().require(Capability::Admin)?;

    registry
        .equipment_repository()
        .delete(equipment_id)
        .await
        .map(|_| StatusCode::NO_CONTENT)
}
