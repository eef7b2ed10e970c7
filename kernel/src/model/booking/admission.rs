//! 予約の受付判定。
//!
//! 日付と時刻を一つの日時にまとめて過去でないかを確かめ、同じ部屋・日付・時刻の
//! 予約が既にないかを確かめる。違反はすべて集めてまとめて返す。

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use shared::error::AppError;
use thiserror::Error;

use crate::model::id::RoomId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingRequest {
    pub room_id: Option<RoomId>,
    pub date: Option<NaiveDate>,
    pub time: String,
}

impl BookingRequest {
    /// ID 0 は部屋が未選択として扱う。
    pub fn new(
        room_id: Option<RoomId>,
        date: Option<NaiveDate>,
        time: impl Into<String>,
    ) -> Self {
        Self {
            room_id: room_id.filter(|id| id.raw() > 0),
            date,
            time: time.into().trim().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AdmissionViolation {
    #[error("You must select a room.")]
    RoomNotSelected,
    #[error("Please select a date.")]
    DateMissing,
    #[error("Please select a time.")]
    TimeMissing,
    #[error("'{0}' is not a valid time of day.")]
    MalformedTime(String),
    #[error("You cannot book a room in the past.")]
    InThePast,
    #[error("This room is already booked for the selected date and time.")]
    SlotTaken,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdmissionViolations(pub Vec<AdmissionViolation>);

impl AdmissionViolations {
    pub fn contains(&self, violation: &AdmissionViolation) -> bool {
        self.0.contains(violation)
    }
}

impl From<AdmissionViolations> for AppError {
    fn from(value: AdmissionViolations) -> Self {
        AppError::AdmissionRejected(value.0.iter().map(ToString::to_string).collect())
    }
}

/// 受付を通過した予約枠
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdmittedSlot {
    pub room_id: RoomId,
    pub date: NaiveDate,
    pub time: String,
}

pub fn parse_time_of_day(value: &str) -> Option<NaiveTime> {
    ["%H:%M", "%H:%M:%S"]
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(value, format).ok())
}

pub fn admit(
    request: &BookingRequest,
    now: NaiveDateTime,
    slot_taken: bool,
) -> Result<AdmittedSlot, AdmissionViolations> {
    let mut violations = Vec::new();

    if request.room_id.is_none() {
        violations.push(AdmissionViolation::RoomNotSelected);
    }

    if request.date.is_none() {
        violations.push(AdmissionViolation::DateMissing);
    }

    if request.time.is_empty() {
        violations.push(AdmissionViolation::TimeMissing);
    } else {
        match (parse_time_of_day(&request.time), request.date) {
            (None, _) => {
                violations.push(AdmissionViolation::MalformedTime(request.time.clone()))
            }
            // 日付がなければ過去かどうかは判定しない
            (Some(time), Some(date)) if date.and_time(time) < now => {
                violations.push(AdmissionViolation::InThePast)
            }
            _ => {}
        }
    }

    if slot_taken {
        violations.push(AdmissionViolation::SlotTaken);
    }

    match (request.room_id, request.date) {
        (Some(room_id), Some(date)) if violations.is_empty() => Ok(AdmittedSlot {
            room_id,
            date,
            time: request.time.clone(),
        }),
        _ => Err(AdmissionViolations(violations)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn now() -> NaiveDateTime {
        date(2025, 1, 9).and_hms_opt(12, 0, 0).unwrap()
    }

    #[test]
    fn free_future_slot_is_admitted() {
        let request = BookingRequest::new(Some(RoomId::new(1)), Some(date(2025, 1, 10)), "09:00");
        let slot = admit(&request, now(), false).unwrap();
        assert_eq!(slot.room_id, RoomId::new(1));
        assert_eq!(slot.time, "09:00");
    }

    #[test]
    fn taken_slot_is_rejected() {
        let request = BookingRequest::new(Some(RoomId::new(1)), Some(date(2025, 1, 10)), "09:00");
        let violations = admit(&request, now(), true).unwrap_err();
        assert_eq!(violations.0, vec![AdmissionViolation::SlotTaken]);
    }

    #[test]
    fn yesterday_is_in_the_past() {
        let request = BookingRequest::new(Some(RoomId::new(1)), Some(date(2025, 1, 8)), "13:00");
        let violations = admit(&request, now(), false).unwrap_err();
        assert_eq!(violations.0, vec![AdmissionViolation::InThePast]);
    }

    #[test]
    fn earlier_today_is_in_the_past() {
        let request = BookingRequest::new(Some(RoomId::new(1)), Some(date(2025, 1, 9)), "11:59");
        assert!(admit(&request, now(), false)
            .unwrap_err()
            .contains(&AdmissionViolation::InThePast));
    }

    #[test]
    fn the_current_minute_is_not_in_the_past() {
        let request = BookingRequest::new(Some(RoomId::new(1)), Some(date(2025, 1, 9)), "12:00");
        assert!(admit(&request, now(), false).is_ok());
    }

    #[test]
    fn every_violation_is_reported() {
        let request = BookingRequest::new(None, Some(date(2025, 1, 1)), "08:00");
        let violations = admit(&request, now(), true).unwrap_err();
        assert_eq!(
            violations.0,
            vec![
                AdmissionViolation::RoomNotSelected,
                AdmissionViolation::InThePast,
                AdmissionViolation::SlotTaken,
            ]
        );
    }

    #[test]
    fn zero_room_id_means_no_room() {
        let request = BookingRequest::new(Some(RoomId::new(0)), Some(date(2025, 1, 10)), "09:00");
        assert_eq!(request.room_id, None);
        assert!(admit(&request, now(), false)
            .unwrap_err()
            .contains(&AdmissionViolation::RoomNotSelected));
    }

    #[test]
    fn malformed_time_is_a_violation() {
        let request = BookingRequest::new(Some(RoomId::new(1)), Some(date(2025, 1, 10)), "nine-ish");
        assert_eq!(
            admit(&request, now(), false).unwrap_err().0,
            vec![AdmissionViolation::MalformedTime("nine-ish".into())]
        );

        let request = BookingRequest::new(Some(RoomId::new(1)), Some(date(2025, 1, 10)), "25:00");
        assert!(admit(&request, now(), false).is_err());
    }

    #[test]
    fn blank_time_asks_for_a_time() {
        let request = BookingRequest::new(Some(RoomId::new(1)), Some(date(2025, 1, 10)), "   ");
        assert_eq!(
            admit(&request, now(), false).unwrap_err().0,
            vec![AdmissionViolation::TimeMissing]
        );
    }

    #[test]
    fn missing_date_is_reported_with_the_other_violations() {
        let request = BookingRequest::new(Some(RoomId::new(0)), None, "");
        assert_eq!(
            admit(&request, now(), false).unwrap_err().0,
            vec![
                AdmissionViolation::RoomNotSelected,
                AdmissionViolation::DateMissing,
                AdmissionViolation::TimeMissing,
            ]
        );

        let request = BookingRequest::new(Some(RoomId::new(1)), None, "08:00");
        assert_eq!(
            admit(&request, now(), false).unwrap_err().0,
            vec![AdmissionViolation::DateMissing]
        );
    }

    #[test]
    fn seconds_are_accepted() {
        assert_eq!(
            parse_time_of_day("10:30:15"),
            NaiveTime::from_hms_opt(10, 30, 15)
        );
    }

    #[test]
    fn violations_become_rejection_messages() {
        let err = AppError::from(AdmissionViolations(vec![
            AdmissionViolation::RoomNotSelected,
            AdmissionViolation::SlotTaken,
        ]));
        let AppError::AdmissionRejected(messages) = err else {
            panic!("unexpected error variant");
        };
        assert_eq!(
            messages,
            vec![
                "You must select a room.".to_string(),
                "This room is already booked for the selected date and time.".to_string(),
            ]
        );
    }
}
