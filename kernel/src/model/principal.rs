use std::collections::BTreeSet;

use shared::error::{AppError, AppResult};

use crate::model::{
    id::UserId,
    role::{Capability, Role},
};

/// リクエストごとに確定する操作主体。認証済みユーザーの ID とロールの集合を持つ。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    user_id: UserId,
    roles: BTreeSet<Role>,
}

impl Principal {
    pub fn new(user_id: UserId, roles: impl IntoIterator<Item = Role>) -> Self {
        Self {
            user_id,
            roles: roles.into_iter().collect(),
        }
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn has(&self, capability: Capability) -> bool {
        self.roles.iter().any(|role| role.grants(capability))
    }

    pub fn require(&self, capability: Capability) -> AppResult<()> {
        if self.has(capability) {
            Ok(())
        } else {
            Err(AppError::ForbiddenOperation)
        }
    }

    pub fn owns(&self, owner: UserId) -> bool {
        self.user_id == owner
    }
}
