use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    id::RoomId,
    room::{
        event::{CreateRoom, UpdateRoom},
        Room,
    },
};
use kernel::repository::room::RoomRepository;
use shared::error::{AppError, AppResult};

use crate::database::{model::room::RoomRow, ConnectionPool};

#[derive(new)]
pub struct RoomRepositoryImpl {
    db: ConnectionPool,
}

fn room_not_found(room_id: RoomId) -> AppError {
    AppError::EntityNotFound(format!("Room {room_id} was not found."))
}

#[async_trait]
impl RoomRepository for RoomRepositoryImpl {
    async fn create(&self, event: CreateRoom) -> AppResult<Room> {
        sqlx::query_as::<_, RoomRow>(
            r#"
                INSERT INTO rooms (room_name, capacity, facilities, price_pence)
                VALUES ($1, $2, $3, $4)
                RETURNING room_id, room_name, capacity, facilities, price_pence
            "#,
        )
        .bind(event.room_name)
        .bind(event.capacity)
        .bind(event.facilities)
        .bind(event.price_pence)
        .fetch_one(self.db.inner_ref())
        .await
        .map(Room::from)
        .map_err(AppError::SpecificOperationError)
    }

    async fn find_all(&self) -> AppResult<Vec<Room>> {
        sqlx::query_as::<_, RoomRow>(
            r#"
                SELECT room_id, room_name, capacity, facilities, price_pence
                FROM rooms
                ORDER BY room_id ASC
            "#,
        )
        .fetch_all(self.db.inner_ref())
        .await
        .map(|rows| rows.into_iter().map(Room::from).collect())
        .map_err(AppError::SpecificOperationError)
    }

    async fn find_by_id(&self, room_id: RoomId) -> AppResult<Option<Room>> {
        sqlx::query_as::<_, RoomRow>(
            r#"
                SELECT room_id, room_name, capacity, facilities, price_pence
                FROM rooms
                WHERE room_id = $1
            "#,
        )
        .bind(room_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map(|row| row.map(Room::from))
        .map_err(AppError::SpecificOperationError)
    }

    // 更新対象の行が消えていれば EntityNotFound を返す
    async fn update(&self, event: UpdateRoom) -> AppResult<Room> {
        sqlx::query_as::<_, RoomRow>(
            r#"
                UPDATE rooms
                SET room_name = $2, capacity = $3, facilities = $4, price_pence = $5
                WHERE room_id = $1
                RETURNING room_id, room_name, capacity, facilities, price_pence
            "#,
        )
        .bind(event.room_id)
        .bind(event.room_name)
        .bind(event.capacity)
        .bind(event.facilities)
        .bind(event.price_pence)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?
        .map(Room::from)
        .ok_or_else(|| room_not_found(event.room_id))
    }

    // 部屋の予約は外部キーの ON DELETE CASCADE で一緒に削除される
    async fn delete(&self, room_id: RoomId) -> AppResult<()> {
        let res = sqlx::query("DELETE FROM rooms WHERE room_id = $1")
            .bind(room_id)
            .execute(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(room_not_found(room_id));
        }

        Ok(())
    }
}
