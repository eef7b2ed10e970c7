use kernel::model::{role::Role, user::event::CreateUser};
use kernel::repository::user::UserRepository;
use shared::{
    config::SeedConfig,
    error::{AppError, AppResult},
};

use super::ConnectionPool;
use crate::repository::user::UserRepositoryImpl;

pub struct BootstrapAccount {
    pub user_name: &'static str,
    pub email: &'static str,
    pub role: Role,
}

pub const BOOTSTRAP_ACCOUNTS: [BootstrapAccount; 2] = [
    BootstrapAccount {
        user_name: "Administrator",
        email: "admin@citypointhire.com",
        role: Role::Admin,
    },
    BootstrapAccount {
        user_name: "Staff",
        email: "staff@citypointhire.com",
        role: Role::Staff,
    },
];

impl BootstrapAccount {
    fn password<'a>(&self, cfg: &'a SeedConfig) -> &'a str {
        match self.role {
            Role::Admin => &cfg.admin_password,
            _ => &cfg.staff_password,
        }
    }
}

// 既に同じメールアドレスのアカウントがあれば何もしない
pub async fn seed_accounts(db: &ConnectionPool, cfg: &SeedConfig) -> AppResult<usize> {
    let users = UserRepositoryImpl::new(db.clone());
    let mut created = 0;

    for account in &BOOTSTRAP_ACCOUNTS {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM users WHERE email = $1)",
        )
        .bind(account.email)
        .fetch_one(db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;
        if exists {
            tracing::debug!(email = account.email, "bootstrap account already present");
            continue;
        }

        let user = users
            .create(CreateUser::new(
                account.user_name.to_string(),
                account.email.to_string(),
                account.password(cfg).to_string(),
                vec![account.role],
            ))
            .await?;
        tracing::info!(
            user_id = %user.user_id,
            email = account.email,
            role = %account.role,
            "bootstrap account created"
        );
        created += 1;
    }

    Ok(created)
}
