use crate::model::{auth::AccessToken, id::UserId};

pub struct CreateToken {
    pub user_id: UserId,
    pub access_token: AccessToken,
}

impl CreateToken {
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            access_token: AccessToken::new(),
        }
    }
}
