use async_trait::async_trait;
use shared::error::AppResult;

use crate::model::{
    equipment::{
        event::{CreateEquipment, UpdateEquipment},
        Equipment,
    },
    id::EquipmentId,
};

#[async_trait]
pub trait EquipmentRepository: Send + Sync {
    async fn create(&self, event: CreateEquipment) -> AppResult<Equipment>;
    async fn find_all(&self) -> AppResult<Vec<Equipment>>;
    async fn find_by_id(&self, equipment_id: EquipmentId) -> AppResult<Option<Equipment>>;
    async fn update(&self, event: UpdateEquipment) -> AppResult<Equipment>;
    async fn delete(&self, equipment_id: EquipmentId) -> AppResult<()>;
}
