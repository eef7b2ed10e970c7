use crate::model::{id::UserId, principal::Principal, role::Role};

pub mod event;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub user_id: UserId,
    pub user_name: String,
    pub email: String,
    pub roles: Vec<Role>,
}

impl User {
    pub fn principal(&self) -> Principal {
        Principal::new(self.user_id, self.roles.iter().copied())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingOwner {
    pub owner_id: UserId,
    pub owner_name: String,
}
