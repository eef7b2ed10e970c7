use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    EnumString,
    AsRefStr,
    Display,
    EnumIter,
)]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    Admin,
    Staff,
    User,
}

/// 操作に必要な権限。
///
/// `Staff` はスタッフと管理者の双方が持ち、`Admin` は管理者のみが持つ。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    Admin,
    Staff,
}

impl Role {
    pub fn grants(self, capability: Capability) -> bool {
        matches!(
            (self, capability),
            (Role::Admin, _) | (Role::Staff, Capability::Staff)
        )
    }
}
