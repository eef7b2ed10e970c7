use shared::error::{AppError, AppResult};

use crate::model::{
    booking::{Booking, BookingStatus},
    id::UserId,
    principal::Principal,
    role::Capability,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingScope {
    All,
    OwnedBy(UserId),
}

impl BookingScope {
    pub fn for_principal(principal: &Principal) -> Self {
        if principal.has(Capability::Staff) {
            Self::All
        } else {
            Self::OwnedBy(principal.user_id())
        }
    }
}

/// 他人の予約への参照・操作は絞り込まずに拒否する。
pub fn ensure_can_access(principal: &Principal, booking: &Booking) -> AppResult<()> {
    if principal.has(Capability::Staff) || principal.owns(booking.owner.owner_id) {
        Ok(())
    } else {
        Err(AppError::ForbiddenOperation)
    }
}

/// 所有者が編集できるのは Pending の間だけ。スタッフ・管理者は常に編集できる。
pub fn ensure_can_edit(principal: &Principal, booking: &Booking) -> AppResult<()> {
    ensure_can_access(principal, booking)?;
    if principal.has(Capability::Staff) || booking.status == BookingStatus::Pending {
        Ok(())
    } else {
        Err(AppError::UnprocessableEntity(format!(
            "Booking {} is {} and can no longer be edited.",
            booking.booking_id, booking.status
        )))
    }
}
