use derive_new::new;
use garde::Validate;
use kernel::model::{
    id::UserId,
    role::Role,
    user::{
        event::{CreateUser, UpdateUserRoles},
        User,
    },
};
use serde::{Deserialize, Serialize};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UsersResponse {
    pub items: Vec<UserResponse>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub user_id: UserId,
    pub user_name: String,
    pub email: String,
    pub roles: Vec<Role>,
}

impl From<User> for UserResponse {
    fn from(value: User) -> Self {
        let User {
            user_id,
            user_name,
            email,
            roles,
        } = value;
        Self {
            user_id,
            user_name,
            email,
            roles,
        }
    }
}

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    #[garde(length(min = 1))]
    user_name: String,
    #[garde(email)]
    email: String,
    #[garde(length(min = 8))]
    password: String,
}

// 自己登録では一般ユーザーのロールのみを付与する
impl From<CreateUserRequest> for CreateUser {
    fn from(value: CreateUserRequest) -> Self {
        let CreateUserRequest {
            user_name,
            email,
            password,
        } = value;
        CreateUser::new(user_name, email, password, vec![Role::User])
    }
}

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRolesRequest {
    #[garde(length(min = 1))]
    roles: Vec<Role>,
}

#[derive(new)]
pub struct UpdateUserRolesRequestWithUserId(UserId, UpdateUserRolesRequest);

impl From<UpdateUserRolesRequestWithUserId> for UpdateUserRoles {
    fn from(value: UpdateUserRolesRequestWithUserId) -> Self {
        let UpdateUserRolesRequestWithUserId(user_id, UpdateUserRolesRequest { roles }) = value;
        UpdateUserRoles::new(user_id, roles)
    }
}
