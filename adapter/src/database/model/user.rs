use kernel::model::{id::UserId, role::Role, user::User};
use shared::error::AppError;

#[derive(sqlx::FromRow)]
pub struct UserRow {
    pub user_id: UserId,
    pub user_name: String,
    pub email: String,
    pub roles: Vec<String>,
}

impl TryFrom<UserRow> for User {
    type Error = AppError;

    fn try_from(value: UserRow) -> Result<Self, Self::Error> {
        let UserRow {
            user_id,
            user_name,
            email,
            roles,
        } = value;
        let roles = roles
            .iter()
            .map(|role| {
                role.parse::<Role>().map_err(|_| {
                    AppError::ConversionEntityError(format!(
                        "user {user_id} has an unknown role: {role}"
                    ))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(User {
            user_id,
            user_name,
            email,
            roles,
        })
    }
}

// ログイン時の照合に使う型
#[derive(sqlx::FromRow)]
pub struct UserCredentialRow {
    pub user_id: UserId,
    pub password_hash: String,
}
