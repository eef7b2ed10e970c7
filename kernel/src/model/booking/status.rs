use serde::{Deserialize, Serialize};
use shared::error::{AppError, AppResult};
use strum::{AsRefStr, Display, EnumString};

#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    EnumString,
    AsRefStr,
    Display,
)]
pub enum BookingStatus {
    #[default]
    Pending,
    Approved,
    Denied,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Changed(BookingStatus),
    Unchanged,
}

impl BookingStatus {
    /// Pending からは Approved / Denied へ遷移できる。現在と同じ状態の指定は何もしない。
    /// それ以外（Approved と Denied の相互遷移、Pending への差し戻し）は受け付けない。
    pub fn transition_to(self, target: BookingStatus) -> AppResult<Transition> {
        match (self, target) {
            (BookingStatus::Pending, BookingStatus::Approved | BookingStatus::Denied) => {
                Ok(Transition::Changed(target))
            }
            (current, target) if current == target => Ok(Transition::Unchanged),
            (current, target) => Err(AppError::UnprocessableEntity(format!(
                "A booking cannot move from {current} to {target}."
            ))),
        }
    }
}
