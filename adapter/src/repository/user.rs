use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    id::UserId,
    role::Role,
    user::{
        event::{CreateUser, UpdateUserRoles},
        User,
    },
};
use kernel::repository::user::UserRepository;
use shared::error::{AppError, AppResult};

use crate::database::{is_unique_violation, model::user::UserRow, ConnectionPool};

const SELECT_USERS: &str = r#"
    SELECT
    u.user_id,
    u.user_name,
    u.email,
    COALESCE(
        array_agg(ur.role::TEXT ORDER BY ur.role) FILTER (WHERE ur.role IS NOT NULL),
        '{}'::TEXT[]
    ) AS roles
    FROM users AS u
    LEFT JOIN user_roles AS ur ON u.user_id = ur.user_id
"#;

#[derive(new)]
pub struct UserRepositoryImpl {
    db: ConnectionPool,
}

pub(crate) fn hash_password(password: &str) -> AppResult<String> {
    bcrypt::hash(password, bcrypt::DEFAULT_COST).map_err(AppError::from)
}

pub(crate) async fn insert_roles(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    user_id: UserId,
    roles: &[Role],
) -> AppResult<()> {
    for role in roles {
        sqlx::query(
            r#"
                INSERT INTO user_roles (user_id, role)
                VALUES ($1, $2)
                ON CONFLICT DO NOTHING
            "#,
        )
        .bind(user_id)
        .bind(role.as_ref())
        .execute(&mut **tx)
        .await
        .map_err(AppError::SpecificOperationError)?;
    }
    Ok(())
}

#[async_trait]
impl UserRepository for UserRepositoryImpl {
    async fn find_current_user(&self, current_user_id: UserId) -> AppResult<Option<User>> {
        let sql = format!("{SELECT_USERS} WHERE u.user_id = $1 GROUP BY u.user_id");

        sqlx::query_as::<_, UserRow>(&sql)
            .bind(current_user_id)
            .fetch_optional(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?
            .map(User::try_from)
            .transpose()
    }

    async fn find_all(&self) -> AppResult<Vec<User>> {
        let sql = format!("{SELECT_USERS} GROUP BY u.user_id ORDER BY u.created_at DESC");

        sqlx::query_as::<_, UserRow>(&sql)
            .fetch_all(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?
            .into_iter()
            .map(User::try_from)
            .collect()
    }

    async fn create(&self, event: CreateUser) -> AppResult<User> {
        let user_id = UserId::new();
        let hashed_password = hash_password(&event.password)?;

        let mut tx = self.db.begin().await?;
        sqlx::query(
            r#"
                INSERT INTO users (user_id, user_name, email, password_hash)
                VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(user_id)
        .bind(&event.user_name)
        .bind(&event.email)
        .bind(hashed_password)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::UnprocessableEntity(format!(
                    "{} is already registered.",
                    event.email
                ))
            } else {
                AppError::SpecificOperationError(e)
            }
        })?;

        insert_roles(&mut tx, user_id, &event.roles).await?;
        tx.commit().await.map_err(AppError::TransactionError)?;

        Ok(User {
            user_id,
            user_name: event.user_name,
            email: event.email,
            roles: event.roles,
        })
    }

    // ロールの集合を丸ごと置き換える
    async fn update_roles(&self, event: UpdateUserRoles) -> AppResult<User> {
        let mut tx = self.db.begin().await?;

        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM users WHERE user_id = $1)",
        )
        .bind(event.user_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;
        if !exists {
            return Err(AppError::EntityNotFound(format!(
                "User {} was not found.",
                event.user_id
            )));
        }

        sqlx::query("DELETE FROM user_roles WHERE user_id = $1")
            .bind(event.user_id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;
        insert_roles(&mut tx, event.user_id, &event.roles).await?;

        tx.commit().await.map_err(AppError::TransactionError)?;

        self.find_current_user(event.user_id)
            .await?
            .ok_or_else(|| AppError::EntityNotFound(format!("User {} was not found.", event.user_id)))
    }
}
