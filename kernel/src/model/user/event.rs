use crate::model::{id::UserId, role::Role};
use derive_new::new;

#[derive(Debug, new)]
pub struct CreateUser {
    pub user_name: String,
    pub email: String,
    pub password: String,
    pub roles: Vec<Role>,
}

#[derive(Debug, new)]
pub struct UpdateUserRoles {
    pub user_id: UserId,
    pub roles: Vec<Role>,
}
