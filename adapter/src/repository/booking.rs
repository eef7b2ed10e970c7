use async_trait::async_trait;
use chrono::NaiveDate;
use derive_new::new;
use kernel::model::{
    booking::{
        admission::AdmissionViolation,
        event::{CreateBooking, UpdateBooking, UpdateBookingStatus},
        visibility::BookingScope,
        Booking,
    },
    id::{BookingId, RoomId, UserId},
};
use kernel::repository::booking::BookingRepository;
use shared::error::{AppError, AppResult};

use sqlx::PgConnection;

use crate::database::{
    is_foreign_key_violation, is_unique_violation, model::booking::BookingRow,
    set_transaction_serializable, ConnectionPool,
};

const SELECT_BOOKINGS: &str = r#"
    SELECT
    b.booking_id,
    b.user_id,
    u.user_name,
    b.room_id,
    r.room_name,
    b.booking_date,
    b.booking_time,
    b.status
    FROM bookings AS b
    INNER JOIN rooms AS r ON b.room_id = r.room_id
    INNER JOIN users AS u ON b.user_id = u.user_id
"#;

#[derive(new)]
pub struct BookingRepositoryImpl {
    db: ConnectionPool,
}

fn booking_not_found(booking_id: BookingId) -> AppError {
    AppError::EntityNotFound(format!("Booking {booking_id} was not found."))
}

const SLOT_TAKEN: &str = r#"
    SELECT EXISTS (
        SELECT 1
        FROM bookings
        WHERE room_id = $1
          AND booking_date = $2
          AND booking_time = $3
          AND ($4::bigint IS NULL OR booking_id <> $4)
    )
"#;

fn slot_taken_error() -> AppError {
    AppError::AdmissionRejected(vec![AdmissionViolation::SlotTaken.to_string()])
}

// 同じ枠への同時登録で一意制約に負けた場合は受付時の重複と同じエラーにする。
// 書き込みまでに部屋が削除されていた場合は見つからない扱いにする
fn map_write_error(room_id: RoomId) -> impl Fn(sqlx::Error) -> AppError {
    move |e| {
        if is_unique_violation(&e) {
            slot_taken_error()
        } else if is_foreign_key_violation(&e) {
            AppError::EntityNotFound(format!("Room {room_id} was not found."))
        } else {
            AppError::SpecificOperationError(e)
        }
    }
}

async fn slot_taken(
    conn: &mut PgConnection,
    room_id: RoomId,
    date: NaiveDate,
    time: &str,
    excluding: Option<BookingId>,
) -> AppResult<bool> {
    sqlx::query_scalar::<_, bool>(SLOT_TAKEN)
        .bind(room_id)
        .bind(date)
        .bind(time)
        .bind(excluding)
        .fetch_one(conn)
        .await
        .map_err(AppError::SpecificOperationError)
}

#[async_trait]
impl BookingRepository for BookingRepositoryImpl {
    async fn find_all(&self, scope: BookingScope) -> AppResult<Vec<Booking>> {
        let owner: Option<UserId> = match scope {
            BookingScope::All => None,
            BookingScope::OwnedBy(user_id) => Some(user_id),
        };
        let sql = format!(
            "{SELECT_BOOKINGS}
            WHERE ($1::uuid IS NULL OR b.user_id = $1)
            ORDER BY b.booking_date DESC, b.booking_time DESC"
        );

        sqlx::query_as::<_, BookingRow>(&sql)
            .bind(owner)
            .fetch_all(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?
            .into_iter()
            .map(Booking::try_from)
            .collect()
    }

    async fn find_by_id(&self, booking_id: BookingId) -> AppResult<Option<Booking>> {
        let sql = format!("{SELECT_BOOKINGS} WHERE b.booking_id = $1");

        sqlx::query_as::<_, BookingRow>(&sql)
            .bind(booking_id)
            .fetch_optional(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?
            .map(Booking::try_from)
            .transpose()
    }

    async fn exists_for_slot(
        &self,
        room_id: RoomId,
        date: NaiveDate,
        time: &str,
        excluding: Option<BookingId>,
    ) -> AppResult<bool> {
        let mut conn = self
            .db
            .inner_ref()
            .acquire()
            .await
            .map_err(AppError::SpecificOperationError)?;
        slot_taken(&mut conn, room_id, date, time, excluding).await
    }

    // 重複の確認と書き込みを同じ SERIALIZABLE トランザクションで行う
    async fn create(&self, event: CreateBooking) -> AppResult<Booking> {
        let mut tx = self.db.begin().await?;
        set_transaction_serializable(&mut tx).await?;

        if slot_taken(&mut tx, event.room_id, event.date, &event.time, None).await? {
            return Err(slot_taken_error());
        }

        let status = event.initial_status();
        let booking_id = sqlx::query_scalar::<_, BookingId>(
            r#"
                INSERT INTO bookings (user_id, room_id, booking_date, booking_time, status)
                VALUES ($1, $2, $3, $4, $5)
                RETURNING booking_id
            "#,
        )
        .bind(event.owned_by)
        .bind(event.room_id)
        .bind(event.date)
        .bind(event.time)
        .bind(status.as_ref())
        .fetch_one(&mut *tx)
        .await
        .map_err(map_write_error(event.room_id))?;

        let sql = format!("{SELECT_BOOKINGS} WHERE b.booking_id = $1");
        let row = sqlx::query_as::<_, BookingRow>(&sql)
            .bind(booking_id)
            .fetch_one(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;

        tx.commit().await.map_err(map_write_error(event.room_id))?;

        Booking::try_from(row)
    }

    async fn update(&self, event: UpdateBooking) -> AppResult<Booking> {
        let mut tx = self.db.begin().await?;
        set_transaction_serializable(&mut tx).await?;

        if slot_taken(
            &mut tx,
            event.room_id,
            event.date,
            &event.time,
            Some(event.booking_id),
        )
        .await?
        {
            return Err(slot_taken_error());
        }

        let res = sqlx::query(
            r#"
                UPDATE bookings
                SET room_id = $2, booking_date = $3, booking_time = $4
                WHERE booking_id = $1
            "#,
        )
        .bind(event.booking_id)
        .bind(event.room_id)
        .bind(event.date)
        .bind(event.time)
        .execute(&mut *tx)
        .await
        .map_err(map_write_error(event.room_id))?;

        if res.rows_affected() < 1 {
            return Err(booking_not_found(event.booking_id));
        }

        tx.commit().await.map_err(map_write_error(event.room_id))?;

        self.find_by_id(event.booking_id)
            .await?
            .ok_or_else(|| booking_not_found(event.booking_id))
    }

    async fn update_status(&self, event: UpdateBookingStatus) -> AppResult<Booking> {
        let res = sqlx::query(
            r#"
                UPDATE bookings
                SET status = $2
                WHERE booking_id = $1
            "#,
        )
        .bind(event.booking_id)
        .bind(event.status.as_ref())
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(booking_not_found(event.booking_id));
        }

        self.find_by_id(event.booking_id)
            .await?
            .ok_or_else(|| booking_not_found(event.booking_id))
    }

    async fn delete(&self, booking_id: BookingId) -> AppResult<()> {
        let res = sqlx::query("DELETE FROM bookings WHERE booking_id = $1")
            .bind(booking_id)
            .execute(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(booking_not_found(booking_id));
        }

        Ok(())
    }
}
