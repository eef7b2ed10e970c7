use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    equipment::{
        event::{CreateEquipment, UpdateEquipment},
        Equipment,
    },
    id::EquipmentId,
};
use kernel::repository::equipment::EquipmentRepository;
use shared::error::{AppError, AppResult};

use crate::database::{model::equipment::EquipmentRow, ConnectionPool};

#[derive(new)]
pub struct EquipmentRepositoryImpl {
    db: ConnectionPool,
}

fn equipment_not_found(equipment_id: EquipmentId) -> AppError {
    AppError::EntityNotFound(format!("Equipment {equipment_id} was not found."))
}

#[async_trait]
impl EquipmentRepository for EquipmentRepositoryImpl {
    async fn create(&self, event: CreateEquipment) -> AppResult<Equipment> {
        sqlx::query_as::<_, EquipmentRow>(
            r#"
                INSERT INTO equipment (equipment_name, availability)
                VALUES ($1, $2)
                RETURNING equipment_id, equipment_name, availability
            "#,
        )
        .bind(event.equipment_name)
        .bind(event.availability)
        .fetch_one(self.db.inner_ref())
        .await
        .map(Equipment::from)
        .map_err(AppError::SpecificOperationError)
    }

    async fn find_all(&self) -> AppResult<Vec<Equipment>> {
        sqlx::query_as::<_, EquipmentRow>(
            r#"
                SELECT equipment_id, equipment_name, availability
                FROM equipment
                ORDER BY equipment_id ASC
            "#,
        )
        .fetch_all(self.db.inner_ref())
        .await
        .map(|rows| rows.into_iter().map(Equipment::from).collect())
        .map_err(AppError::SpecificOperationError)
    }

    async fn find_by_id(&self, equipment_id: EquipmentId) -> AppResult<Option<Equipment>> {
        sqlx::query_as::<_, EquipmentRow>(
            r#"
                SELECT equipment_id, equipment_name, availability
                FROM equipment
                WHERE equipment_id = $1
            "#,
        )
        .bind(equipment_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map(|row| row.map(Equipment::from))
        .map_err(AppError::SpecificOperationError)
    }

    async fn update(&self, event: UpdateEquipment) -> AppResult<Equipment> {
        sqlx::query_as::<_, EquipmentRow>(
            r#"
                UPDATE equipment
                SET equipment_name = $2, availability = $3
                WHERE equipment_id = $1
                RETURNING equipment_id, equipment_name, availability
            "#,
        )
        .bind(event.equipment_id)
        .bind(event.equipment_name)
        .bind(event.availability)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?
        .map(Equipment::from)
        .ok_or_else(|| equipment_not_found(event.equipment_id))
    }

    async fn delete(&self, equipment_id: EquipmentId) -> AppResult<()> {
        let res = sqlx::query("DELETE FROM equipment WHERE equipment_id = $1")
            .bind(equipment_id)
            .execute(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(equipment_not_found(equipment_id));
        }

        Ok(())
    }
}
