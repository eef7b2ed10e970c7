use std::{collections::HashSet, sync::Arc};

use chrono::NaiveDateTime;
use derive_new::new;
use shared::error::{AppError, AppResult};

use crate::{
    model::{
        booking::{
            admission::{self, AdmittedSlot, BookingRequest},
            command::{
                ApproveBooking, CancelBooking, DeleteBooking, DenyBooking, EditBooking,
                SetBookingStatus,
            },
            event::{CreateBooking, UpdateBooking, UpdateBookingStatus},
            status::Transition,
            visibility::{ensure_can_access, ensure_can_edit, BookingScope},
            Booking, BookingStatus,
        },
        id::{BookingId, RoomId},
        principal::Principal,
        role::Capability,
        room::Room,
    },
    repository::{booking::BookingRepository, room::RoomRepository},
};

/// 予約の受付・状態遷移・参照制御をまとめて扱う。
///
/// 永続化はリポジトリに任せ、ここでは判定と呼び出し順序だけを持つ。
/// 現在時刻は呼び出し側から受け取る。
#[derive(new)]
pub struct BookingService {
    booking_repository: Arc<dyn BookingRepository>,
    room_repository: Arc<dyn RoomRepository>,
}

impl BookingService {
    pub async fn list(&self, principal: &Principal) -> AppResult<Vec<Booking>> {
        self.booking_repository
            .find_all(BookingScope::for_principal(principal))
            .await
    }

    // 呼び出したユーザーがまだ予約していない部屋の一覧
    pub async fn available_rooms(&self, principal: &Principal) -> AppResult<Vec<Room>> {
        let booked: HashSet<RoomId> = self
            .booking_repository
            .find_all(BookingScope::OwnedBy(principal.user_id()))
            .await?
            .into_iter()
            .map(|booking| booking.room.room_id)
            .collect();

        Ok(self
            .room_repository
            .find_all()
            .await?
            .into_iter()
            .filter(|room| !booked.contains(&room.room_id))
            .collect())
    }

    pub async fn find(&self, principal: &Principal, booking_id: BookingId) -> AppResult<Booking> {
        let booking = self.load(booking_id).await?;
        ensure_can_access(principal, &booking)?;
        Ok(booking)
    }

    pub async fn create(
        &self,
        principal: &Principal,
        request: BookingRequest,
        now: NaiveDateTime,
    ) -> AppResult<Booking> {
        let slot = self.admit(&request, now, None).await?;
        let booking = self
            .booking_repository
            .create(CreateBooking::new(principal.user_id(), slot))
            .await?;

        tracing::info!(
            booking_id = %booking.booking_id,
            room_id = %booking.room.room_id,
            owner = %booking.owner.owner_id,
            "booking admitted"
        );
        Ok(booking)
    }

    pub async fn edit(&self, command: EditBooking, now: NaiveDateTime) -> AppResult<Booking> {
        let EditBooking {
            booking_id,
            request,
            actor,
        } = command;

        let booking = self.load(booking_id).await?;
        ensure_can_edit(&actor, &booking)?;

        let slot = self.admit(&request, now, Some(booking_id)).await?;
        self.booking_repository
            .update(UpdateBooking::new(booking_id, slot))
            .await
    }

    pub async fn approve(&self, command: ApproveBooking) -> AppResult<Booking> {
        self.decide(command.booking_id, BookingStatus::Approved, &command.actor)
            .await
    }

    pub async fn deny(&self, command: DenyBooking) -> AppResult<Booking> {
        self.decide(command.booking_id, BookingStatus::Denied, &command.actor)
            .await
    }

    pub async fn set_status(&self, command: SetBookingStatus) -> AppResult<Booking> {
        self.decide(command.booking_id, command.status, &command.actor)
            .await
    }

    // 所有者は状態を問わず自分の予約を取り消せる
    pub async fn cancel(&self, command: CancelBooking) -> AppResult<()> {
        let booking = self.load(command.booking_id).await?;
        ensure_can_access(&command.actor, &booking)?;
        self.booking_repository.delete(command.booking_id).await?;

        tracing::info!(booking_id = %command.booking_id, "booking cancelled");
        Ok(())
    }

    pub async fn delete(&self, command: DeleteBooking) -> AppResult<()> {
        command.actor.require(Capability::Staff)?;
        self.booking_repository.delete(command.booking_id).await?;

        tracing::info!(booking_id = %command.booking_id, "booking deleted");
        Ok(())
    }

    // 権限の確認は存在確認より先に行う
    async fn decide(
        &self,
        booking_id: BookingId,
        target: BookingStatus,
        actor: &Principal,
    ) -> AppResult<Booking> {
        actor.require(Capability::Staff)?;
        let booking = self.load(booking_id).await?;

        match booking.status.transition_to(target)? {
            Transition::Unchanged => Ok(booking),
            Transition::Changed(status) => {
                let updated = self
                    .booking_repository
                    .update_status(UpdateBookingStatus { booking_id, status })
                    .await?;
                tracing::info!(%booking_id, %status, "booking status changed");
                Ok(updated)
            }
        }
    }

    async fn admit(
        &self,
        request: &BookingRequest,
        now: NaiveDateTime,
        excluding: Option<BookingId>,
    ) -> AppResult<AdmittedSlot> {
        if let Some(room_id) = request.room_id {
            if self.room_repository.find_by_id(room_id).await?.is_none() {
                return Err(AppError::EntityNotFound(format!(
                    "Room {room_id} was not found."
                )));
            }
        }

        let slot_taken = match (request.room_id, request.date) {
            (Some(room_id), Some(date)) => {
                self.booking_repository
                    .exists_for_slot(room_id, date, &request.time, excluding)
                    .await?
            }
            _ => false,
        };

        admission::admit(request, now, slot_taken).map_err(|violations| {
            tracing::debug!(?violations, "booking rejected");
            AppError::from(violations)
        })
    }

    async fn load(&self, booking_id: BookingId) -> AppResult<Booking> {
        self.booking_repository
            .find_by_id(booking_id)
            .await?
            .ok_or_else(|| AppError::EntityNotFound(format!("Booking {booking_id} was not found.")))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use chrono::NaiveDate;

    use super::*;
    use crate::model::{
        booking::BookingRoom,
        id::UserId,
        role::Role,
        room::event::{CreateRoom, UpdateRoom},
        user::BookingOwner,
    };

    const CONFLICT: &str = "This room is already booked for the selected date and time.";
    const PAST: &str = "You cannot book a room in the past.";

    #[derive(Default)]
    struct InMemoryStore {
        rooms: Mutex<Vec<Room>>,
        bookings: Mutex<Vec<Booking>>,
    }

    impl InMemoryStore {
        fn with_room(room_id: i64, room_name: &str, capacity: i32) -> Arc<Self> {
            let store = Self::default();
            store.rooms.lock().unwrap().push(Room {
                room_id: RoomId::new(room_id),
                room_name: room_name.into(),
                capacity,
                facilities: "4K Display, Video Conferencing, Whiteboard".into(),
                price_pence: 4500,
            });
            Arc::new(store)
        }

        fn not_found(booking_id: BookingId) -> AppError {
            AppError::EntityNotFound(format!("Booking {booking_id} was not found."))
        }
    }

    #[async_trait]
    impl RoomRepository for InMemoryStore {
        async fn create(&self, event: CreateRoom) -> AppResult<Room> {
            let mut rooms = self.rooms.lock().unwrap();
            let room = Room {
                room_id: RoomId::new(rooms.len() as i64 + 1),
                room_name: event.room_name,
                capacity: event.capacity,
                facilities: event.facilities,
                price_pence: event.price_pence,
            };
            rooms.push(room.clone());
            Ok(room)
        }

        async fn find_all(&self) -> AppResult<Vec<Room>> {
            Ok(self.rooms.lock().unwrap().clone())
        }

        async fn find_by_id(&self, room_id: RoomId) -> AppResult<Option<Room>> {
            Ok(self
                .rooms
                .lock()
                .unwrap()
                .iter()
                .find(|room| room.room_id == room_id)
                .cloned())
        }

        async fn update(&self, _event: UpdateRoom) -> AppResult<Room> {
            unimplemented!()
        }

        async fn delete(&self, _room_id: RoomId) -> AppResult<()> {
            unimplemented!()
        }
    }

    #[async_trait]
    impl BookingRepository for InMemoryStore {
        async fn find_all(&self, scope: BookingScope) -> AppResult<Vec<Booking>> {
            let mut bookings: Vec<Booking> = self
                .bookings
                .lock()
                .unwrap()
                .iter()
                .filter(|booking| match scope {
                    BookingScope::All => true,
                    BookingScope::OwnedBy(owner) => booking.owner.owner_id == owner,
                })
                .cloned()
                .collect();
            bookings.sort_by(|a, b| b.date.cmp(&a.date));
            Ok(bookings)
        }

        async fn find_by_id(&self, booking_id: BookingId) -> AppResult<Option<Booking>> {
            Ok(self
                .bookings
                .lock()
                .unwrap()
                .iter()
                .find(|booking| booking.booking_id == booking_id)
                .cloned())
        }

        async fn exists_for_slot(
            &self,
            room_id: RoomId,
            date: NaiveDate,
            time: &str,
            excluding: Option<BookingId>,
        ) -> AppResult<bool> {
            Ok(self.bookings.lock().unwrap().iter().any(|booking| {
                booking.room.room_id == room_id
                    && booking.date == date
                    && booking.time == time
                    && Some(booking.booking_id) != excluding
            }))
        }

        async fn create(&self, event: CreateBooking) -> AppResult<Booking> {
            let room_name = RoomRepository::find_by_id(self, event.room_id)
                .await?
                .map(|room| room.room_name)
                .unwrap_or_default();
            let status = event.initial_status();
            let mut bookings = self.bookings.lock().unwrap();
            let booking = Booking {
                booking_id: BookingId::new(bookings.len() as i64 + 1),
                owner: BookingOwner {
                    owner_id: event.owned_by,
                    owner_name: "user".into(),
                },
                room: BookingRoom {
                    room_id: event.room_id,
                    room_name,
                },
                date: event.date,
                time: event.time,
                status,
            };
            bookings.push(booking.clone());
            Ok(booking)
        }

        async fn update(&self, event: UpdateBooking) -> AppResult<Booking> {
            let mut bookings = self.bookings.lock().unwrap();
            let booking = bookings
                .iter_mut()
                .find(|booking| booking.booking_id == event.booking_id)
                .ok_or_else(|| Self::not_found(event.booking_id))?;
            booking.room.room_id = event.room_id;
            booking.date = event.date;
            booking.time = event.time;
            Ok(booking.clone())
        }

        async fn update_status(&self, event: UpdateBookingStatus) -> AppResult<Booking> {
            let mut bookings = self.bookings.lock().unwrap();
            let booking = bookings
                .iter_mut()
                .find(|booking| booking.booking_id == event.booking_id)
                .ok_or_else(|| Self::not_found(event.booking_id))?;
            booking.status = event.status;
            Ok(booking.clone())
        }

        async fn delete(&self, booking_id: BookingId) -> AppResult<()> {
            let mut bookings = self.bookings.lock().unwrap();
            let before = bookings.len();
            bookings.retain(|booking| booking.booking_id != booking_id);
            if bookings.len() == before {
                return Err(Self::not_found(booking_id));
            }
            Ok(())
        }
    }

    fn service(store: &Arc<InMemoryStore>) -> BookingService {
        BookingService::new(store.clone(), store.clone())
    }

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, 9)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn jan_10(time: &str) -> BookingRequest {
        BookingRequest::new(
            Some(RoomId::new(1)),
            NaiveDate::from_ymd_opt(2025, 1, 10),
            time,
        )
    }

    fn user() -> Principal {
        Principal::new(UserId::new(), [Role::User])
    }

    fn staff() -> Principal {
        Principal::new(UserId::new(), [Role::Staff])
    }

    fn rejection(err: AppError) -> Vec<String> {
        match err {
            AppError::AdmissionRejected(messages) => messages,
            other => panic!("expected an admission rejection, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn same_slot_is_rejected_and_next_hour_is_accepted() -> anyhow::Result<()> {
        let store = InMemoryStore::with_room(1, "Executive Boardroom", 8);
        let service = service(&store);
        let alice = user();
        let bob = user();

        let first = service.create(&alice, jan_10("09:00"), now()).await?;
        assert_eq!(first.status, BookingStatus::Pending);
        assert_eq!(first.owner.owner_id, alice.user_id());

        let err = service
            .create(&bob, jan_10("09:00"), now())
            .await
            .unwrap_err();
        assert_eq!(rejection(err), vec![CONFLICT.to_string()]);

        let second = service.create(&bob, jan_10("10:00"), now()).await?;
        assert_eq!(second.status, BookingStatus::Pending);
        assert_eq!(second.owner.owner_id, bob.user_id());
        Ok(())
    }

    #[tokio::test]
    async fn denied_bookings_still_hold_their_slot() -> anyhow::Result<()> {
        let store = InMemoryStore::with_room(1, "Executive Boardroom", 8);
        let service = service(&store);

        let booking = service.create(&user(), jan_10("09:00"), now()).await?;
        service
            .deny(DenyBooking::new(booking.booking_id, staff()))
            .await?;

        let err = service
            .create(&user(), jan_10("09:00"), now())
            .await
            .unwrap_err();
        assert_eq!(rejection(err), vec![CONFLICT.to_string()]);
        Ok(())
    }

    #[tokio::test]
    async fn yesterday_is_rejected_with_every_violation() -> anyhow::Result<()> {
        let store = InMemoryStore::with_room(1, "Executive Boardroom", 8);
        let service = service(&store);
        let yesterday = BookingRequest::new(
            Some(RoomId::new(1)),
            NaiveDate::from_ymd_opt(2025, 1, 8),
            "09:00",
        );

        let err = service
            .create(&user(), yesterday.clone(), now())
            .await
            .unwrap_err();
        assert_eq!(rejection(err), vec![PAST.to_string()]);

        // 過去日時の枠が既に埋まっていても、過去である旨は必ず含まれる
        store.bookings.lock().unwrap().push(Booking {
            booking_id: BookingId::new(99),
            owner: BookingOwner {
                owner_id: UserId::new(),
                owner_name: "someone".into(),
            },
            room: BookingRoom {
                room_id: RoomId::new(1),
                room_name: "Executive Boardroom".into(),
            },
            date: yesterday.date.unwrap(),
            time: yesterday.time.clone(),
            status: BookingStatus::Approved,
        });
        let err = service
            .create(&user(), yesterday, now())
            .await
            .unwrap_err();
        assert_eq!(rejection(err), vec![PAST.to_string(), CONFLICT.to_string()]);
        Ok(())
    }

    #[tokio::test]
    async fn unknown_room_is_not_found() {
        let store = InMemoryStore::with_room(1, "Executive Boardroom", 8);
        let request = BookingRequest::new(
            Some(RoomId::new(42)),
            NaiveDate::from_ymd_opt(2025, 1, 10),
            "09:00",
        );
        let err = service(&store)
            .create(&user(), request, now())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::EntityNotFound(_)));
    }

    #[tokio::test]
    async fn missing_room_is_a_validation_error() {
        let store = InMemoryStore::with_room(1, "Executive Boardroom", 8);
        let request = BookingRequest::new(
            None,
            NaiveDate::from_ymd_opt(2025, 1, 10),
            "09:00",
        );
        let err = service(&store)
            .create(&user(), request, now())
            .await
            .unwrap_err();
        assert_eq!(rejection(err), vec!["You must select a room.".to_string()]);
    }

    #[tokio::test]
    async fn missing_date_is_collected_with_other_violations() {
        let store = InMemoryStore::with_room(1, "Executive Boardroom", 8);
        let request = BookingRequest::new(Some(RoomId::new(0)), None, "");
        let err = service(&store)
            .create(&user(), request, now())
            .await
            .unwrap_err();
        assert_eq!(
            rejection(err),
            vec![
                "You must select a room.".to_string(),
                "Please select a date.".to_string(),
                "Please select a time.".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn plain_users_only_reach_their_own_bookings() -> anyhow::Result<()> {
        let store = InMemoryStore::with_room(1, "Executive Boardroom", 8);
        let service = service(&store);
        let alice = user();
        let mallory = user();

        let booking = service.create(&alice, jan_10("09:00"), now()).await?;
        let id = booking.booking_id;

        assert_eq!(service.find(&alice, id).await?, booking);
        assert!(matches!(
            service.find(&mallory, id).await,
            Err(AppError::ForbiddenOperation)
        ));
        assert!(matches!(
            service
                .edit(EditBooking::new(id, jan_10("11:00"), mallory.clone()), now())
                .await,
            Err(AppError::ForbiddenOperation)
        ));
        assert!(matches!(
            service.cancel(CancelBooking::new(id, mallory.clone())).await,
            Err(AppError::ForbiddenOperation)
        ));

        assert!(service.list(&mallory).await?.is_empty());
        assert_eq!(service.list(&alice).await?.len(), 1);
        assert_eq!(service.list(&staff()).await?.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn only_staff_decide_bookings() -> anyhow::Result<()> {
        let store = InMemoryStore::with_room(1, "Executive Boardroom", 8);
        let service = service(&store);
        let alice = user();
        let booking = service.create(&alice, jan_10("09:00"), now()).await?;

        assert!(matches!(
            service
                .approve(ApproveBooking::new(booking.booking_id, alice.clone()))
                .await,
            Err(AppError::ForbiddenOperation)
        ));
        assert!(matches!(
            service
                .deny(DenyBooking::new(booking.booking_id, alice.clone()))
                .await,
            Err(AppError::ForbiddenOperation)
        ));
        // 存在しない予約でも一般ユーザーには forbidden を返す
        assert!(matches!(
            service
                .approve(ApproveBooking::new(BookingId::new(404), alice))
                .await,
            Err(AppError::ForbiddenOperation)
        ));
        assert!(matches!(
            service
                .approve(ApproveBooking::new(BookingId::new(404), staff()))
                .await,
            Err(AppError::EntityNotFound(_))
        ));
        Ok(())
    }

    #[tokio::test]
    async fn approve_then_owner_cancels() -> anyhow::Result<()> {
        let store = InMemoryStore::with_room(1, "Executive Boardroom", 8);
        let service = service(&store);
        let alice = user();
        let booking = service.create(&alice, jan_10("09:00"), now()).await?;

        let approved = service
            .approve(ApproveBooking::new(booking.booking_id, staff()))
            .await?;
        assert_eq!(approved.status, BookingStatus::Approved);

        service
            .cancel(CancelBooking::new(booking.booking_id, alice.clone()))
            .await?;
        assert!(service.list(&alice).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn approving_twice_is_idempotent() -> anyhow::Result<()> {
        let store = InMemoryStore::with_room(1, "Executive Boardroom", 8);
        let service = service(&store);
        let booking = service.create(&user(), jan_10("09:00"), now()).await?;

        service
            .approve(ApproveBooking::new(booking.booking_id, staff()))
            .await?;
        let again = service
            .approve(ApproveBooking::new(booking.booking_id, staff()))
            .await?;
        assert_eq!(again.status, BookingStatus::Approved);

        assert!(matches!(
            service
                .deny(DenyBooking::new(booking.booking_id, staff()))
                .await,
            Err(AppError::UnprocessableEntity(_))
        ));
        assert!(matches!(
            service
                .set_status(SetBookingStatus::new(
                    booking.booking_id,
                    BookingStatus::Pending,
                    staff()
                ))
                .await,
            Err(AppError::UnprocessableEntity(_))
        ));
        Ok(())
    }

    #[tokio::test]
    async fn owners_edit_pending_bookings_only() -> anyhow::Result<()> {
        let store = InMemoryStore::with_room(1, "Executive Boardroom", 8);
        let service = service(&store);
        let alice = user();
        let booking = service.create(&alice, jan_10("09:00"), now()).await?;
        service.create(&user(), jan_10("10:00"), now()).await?;

        // 自分自身の枠は重複として数えない
        let same = service
            .edit(
                EditBooking::new(booking.booking_id, jan_10("09:00"), alice.clone()),
                now(),
            )
            .await?;
        assert_eq!(same.time, "09:00");

        let err = service
            .edit(
                EditBooking::new(booking.booking_id, jan_10("10:00"), alice.clone()),
                now(),
            )
            .await
            .unwrap_err();
        assert_eq!(rejection(err), vec![CONFLICT.to_string()]);

        let moved = service
            .edit(
                EditBooking::new(booking.booking_id, jan_10("11:00"), alice.clone()),
                now(),
            )
            .await?;
        assert_eq!(moved.time, "11:00");
        assert_eq!(moved.status, BookingStatus::Pending);

        service
            .approve(ApproveBooking::new(booking.booking_id, staff()))
            .await?;
        assert!(matches!(
            service
                .edit(
                    EditBooking::new(booking.booking_id, jan_10("12:00"), alice),
                    now()
                )
                .await,
            Err(AppError::UnprocessableEntity(_))
        ));
        let by_staff = service
            .edit(
                EditBooking::new(booking.booking_id, jan_10("12:00"), staff()),
                now(),
            )
            .await?;
        assert_eq!(by_staff.status, BookingStatus::Approved);
        Ok(())
    }

    #[tokio::test]
    async fn deletion_is_for_staff() -> anyhow::Result<()> {
        let store = InMemoryStore::with_room(1, "Executive Boardroom", 8);
        let service = service(&store);
        let alice = user();
        let booking = service.create(&alice, jan_10("09:00"), now()).await?;

        assert!(matches!(
            service
                .delete(DeleteBooking::new(booking.booking_id, alice))
                .await,
            Err(AppError::ForbiddenOperation)
        ));
        service
            .delete(DeleteBooking::new(booking.booking_id, staff()))
            .await?;
        assert!(matches!(
            service
                .delete(DeleteBooking::new(booking.booking_id, staff()))
                .await,
            Err(AppError::EntityNotFound(_))
        ));
        Ok(())
    }

    #[tokio::test]
    async fn available_rooms_skip_the_callers_bookings() -> anyhow::Result<()> {
        let store = InMemoryStore::with_room(1, "Executive Boardroom", 8);
        RoomRepository::create(
            store.as_ref(),
            CreateRoom::new("Training Suite".into(), 40, "Projector".into(), 6500),
        )
        .await?;
        let service = service(&store);
        let alice = user();
        service.create(&alice, jan_10("09:00"), now()).await?;

        let rooms = service.available_rooms(&alice).await?;
        assert_eq!(rooms.len(), 1);
        assert_eq!(rooms[0].room_name, "Training Suite");
        assert_eq!(service.available_rooms(&user()).await?.len(), 2);
        Ok(())
    }
}
