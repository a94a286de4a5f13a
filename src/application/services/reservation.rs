//! Reservation lifecycle service
//!
//! Owns the reservation state machine and the coupled slot status.
//! Availability, overlap check and the writes run atomically in the
//! repository layer; this service validates input, computes the ticket
//! and publishes side-effect events after the transition lands.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::info;

use crate::domain::pricing::Ticket;
use crate::domain::reservation::{NewReservation, Reservation, ReservationStatus};
use crate::domain::vehicle::VehicleType;
use crate::domain::{DomainError, DomainResult, RepositoryProvider};
use crate::notifications::events::{
    Event, ReservationAcknowledgedEvent, ReservationClosedEvent, ReservationRequestedEvent,
};
use crate::notifications::SharedEventBus;

pub struct ReservationService {
    repos: Arc<dyn RepositoryProvider>,
    event_bus: SharedEventBus,
}

impl ReservationService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, event_bus: SharedEventBus) -> Self {
        Self { repos, event_bus }
    }

    /// Create a `pending` reservation on an available slot.
    ///
    /// The slot transitions to `reserved` in the same database
    /// transaction as the insert. Admins are notified best-effort.
    pub async fn create(
        &self,
        user_id: &str,
        slot_id: i32,
        vehicle_id: i32,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
    ) -> DomainResult<Reservation> {
        if start_time >= end_time {
            return Err(DomainError::Validation(
                "End time must be after start time".to_string(),
            ));
        }

        let reservation = self
            .repos
            .reservations()
            .create_pending(NewReservation {
                user_id: user_id.to_string(),
                slot_id,
                vehicle_id,
                start_time,
                end_time,
            })
            .await?;

        info!(
            reservation_id = reservation.id,
            slot_id, user_id, "Reservation created"
        );

        self.event_bus
            .publish(Event::ReservationRequested(ReservationRequestedEvent {
                reservation_id: reservation.id,
                user_id: reservation.user_id.clone(),
                slot_id: reservation.slot_id,
                timestamp: Utc::now(),
            }));

        Ok(reservation)
    }

    /// Acknowledge a reservation (admin operation at the HTTP layer).
    ///
    /// Transitions to `active`, computes the ticket from the stored
    /// interval and the vehicle's rate class, and persists the total.
    /// A missing vehicle bills at the default rate class.
    pub async fn acknowledge(&self, id: i32) -> DomainResult<(Reservation, Ticket)> {
        let reservation = self
            .repos
            .reservations()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Reservation", "id", id))?;

        let vehicle_type = self
            .repos
            .vehicles()
            .find_by_id(reservation.vehicle_id)
            .await?
            .map(|v| v.vehicle_type)
            .unwrap_or(VehicleType::Car);

        let ticket = Ticket::compute(vehicle_type, reservation.start_time, reservation.end_time);

        let updated = self
            .repos
            .reservations()
            .mark_acknowledged(id, ticket.total_price)
            .await?;

        info!(
            reservation_id = id,
            total_price = ticket.total_price,
            duration_hours = ticket.duration_hours,
            "Reservation acknowledged"
        );

        self.event_bus.publish(Event::ReservationAcknowledged(
            ReservationAcknowledgedEvent {
                reservation_id: updated.id,
                user_id: updated.user_id.clone(),
                slot_id: updated.slot_id,
                start_time: updated.start_time,
                end_time: updated.end_time,
                ticket: ticket.clone(),
                timestamp: Utc::now(),
            },
        ));

        Ok((updated, ticket))
    }

    /// Revoke a reservation (admin operation at the HTTP layer).
    /// Releases the slot if it is still `reserved`.
    pub async fn revoke(&self, id: i32) -> DomainResult<Reservation> {
        let updated = self
            .repos
            .reservations()
            .close(id, ReservationStatus::Revoked)
            .await?;

        info!(reservation_id = id, "Reservation revoked");

        self.event_bus
            .publish(Event::ReservationRevoked(ReservationClosedEvent {
                reservation_id: updated.id,
                user_id: updated.user_id.clone(),
                timestamp: Utc::now(),
            }));

        Ok(updated)
    }

    /// Cancel an owned reservation. The lookup is ownership-scoped, so a
    /// foreign reservation id reports NotFound rather than Forbidden.
    /// Releases the slot if it is still `reserved`.
    pub async fn cancel(&self, id: i32, user_id: &str) -> DomainResult<Reservation> {
        let owned = self
            .repos
            .reservations()
            .find_owned(id, user_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Reservation", "id", id))?;

        let updated = self
            .repos
            .reservations()
            .close(owned.id, ReservationStatus::Cancelled)
            .await?;

        info!(reservation_id = id, user_id, "Reservation cancelled");

        self.event_bus
            .publish(Event::ReservationCancelled(ReservationClosedEvent {
                reservation_id: updated.id,
                user_id: updated.user_id.clone(),
                timestamp: Utc::now(),
            }));

        Ok(updated)
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::TimeZone;
    use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, NotSet, Set};
    use sea_orm_migration::MigratorTrait;

    use super::*;
    use crate::domain::slot::SlotStatus;
    use crate::infrastructure::database::entities::{parking_slot, user, vehicle};
    use crate::infrastructure::database::migrator::Migrator;
    use crate::infrastructure::database::repositories::SeaOrmRepositoryProvider;
    use crate::notifications::create_event_bus;

    async fn setup() -> (DatabaseConnection, ReservationService) {
        let db = sea_orm::Database::connect("sqlite::memory:").await.unwrap();
        Migrator::up(&db, None).await.unwrap();

        let now = Utc::now();
        user::ActiveModel {
            id: Set("u-1".to_string()),
            email: Set("owner@example.com".to_string()),
            password_hash: Set("x".to_string()),
            first_name: Set("Olya".to_string()),
            last_name: Set("Driver".to_string()),
            role: Set(user::UserRole::User),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&db)
        .await
        .unwrap();

        parking_slot::ActiveModel {
            id: NotSet,
            slot_number: Set("A1-01".to_string()),
            floor: Set(1),
            slot_type: Set("standard".to_string()),
            status: Set("available".to_string()),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&db)
        .await
        .unwrap();

        vehicle::ActiveModel {
            id: NotSet,
            user_id: Set("u-1".to_string()),
            vehicle_type: Set("car".to_string()),
            license_plate: Set("01A111AA".to_string()),
            brand: Set(Some("Chevrolet".to_string())),
            model: Set(Some("Cobalt".to_string())),
            color: Set(Some("white".to_string())),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&db)
        .await
        .unwrap();

        let repos = Arc::new(SeaOrmRepositoryProvider::new(db.clone()));
        let service = ReservationService::new(repos, create_event_bus());
        (db, service)
    }

    fn at(hour: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, hour, min, 0).unwrap()
    }

    async fn slot_status(db: &DatabaseConnection, id: i32) -> String {
        parking_slot::Entity::find_by_id(id)
            .one(db)
            .await
            .unwrap()
            .unwrap()
            .status
    }

    async fn release_slot(db: &DatabaseConnection, id: i32) {
        let slot = parking_slot::Entity::find_by_id(id)
            .one(db)
            .await
            .unwrap()
            .unwrap();
        let mut active: parking_slot::ActiveModel = slot.into();
        active.status = Set("available".to_string());
        active.update(db).await.unwrap();
    }

    #[tokio::test]
    async fn create_rejects_inverted_interval() {
        let (_db, service) = setup().await;
        let err = service
            .create("u-1", 1, 1, at(12, 0), at(10, 0))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn create_rejects_empty_interval() {
        let (_db, service) = setup().await;
        let err = service
            .create("u-1", 1, 1, at(10, 0), at(10, 0))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn create_on_missing_slot_is_not_found() {
        let (_db, service) = setup().await;
        let err = service
            .create("u-1", 999, 1, at(10, 0), at(12, 0))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn create_reserves_the_slot() {
        let (db, service) = setup().await;
        let reservation = service
            .create("u-1", 1, 1, at(10, 0), at(12, 0))
            .await
            .unwrap();

        assert_eq!(reservation.status, ReservationStatus::Pending);
        assert_eq!(reservation.total_price, None);
        assert_eq!(slot_status(&db, 1).await, "reserved");
    }

    #[tokio::test]
    async fn create_on_unavailable_slot_conflicts() {
        let (_db, service) = setup().await;
        service
            .create("u-1", 1, 1, at(10, 0), at(12, 0))
            .await
            .unwrap();

        // slot is now reserved; a second booking fails regardless of interval
        let err = service
            .create("u-1", 1, 1, at(14, 0), at(16, 0))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn create_rejects_overlap_with_active_reservation() {
        let (db, service) = setup().await;
        let first = service
            .create("u-1", 1, 1, at(10, 0), at(12, 0))
            .await
            .unwrap();
        service.acknowledge(first.id).await.unwrap();
        // put the slot back on the market so the overlap check itself is
        // what rejects the second booking
        release_slot(&db, 1).await;

        let err = service
            .create("u-1", 1, 1, at(11, 0), at(13, 0))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn create_allows_touching_interval_after_active_reservation() {
        let (db, service) = setup().await;
        let first = service
            .create("u-1", 1, 1, at(10, 0), at(12, 0))
            .await
            .unwrap();
        service.acknowledge(first.id).await.unwrap();
        release_slot(&db, 1).await;

        // [12:00, 14:00) touches [10:00, 12:00) but does not overlap
        let second = service
            .create("u-1", 1, 1, at(12, 0), at(14, 0))
            .await
            .unwrap();
        assert_eq!(second.status, ReservationStatus::Pending);
    }

    #[tokio::test]
    async fn acknowledge_prices_the_ticket() {
        let (_db, service) = setup().await;
        let reservation = service
            .create("u-1", 1, 1, at(10, 0), at(12, 30))
            .await
            .unwrap();

        let (updated, ticket) = service.acknowledge(reservation.id).await.unwrap();
        assert_eq!(updated.status, ReservationStatus::Active);
        assert_eq!(ticket.duration_hours, 3);
        assert_eq!(ticket.vehicle_type, "car");
        assert_eq!(ticket.price_per_hour, 800);
        assert_eq!(ticket.total_price, 2400);
        assert_eq!(updated.total_price, Some(2400));
    }

    #[tokio::test]
    async fn acknowledge_missing_reservation_is_not_found() {
        let (_db, service) = setup().await;
        let err = service.acknowledge(42).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn cancel_by_non_owner_is_not_found() {
        let (_db, service) = setup().await;
        let reservation = service
            .create("u-1", 1, 1, at(10, 0), at(12, 0))
            .await
            .unwrap();

        let err = service
            .cancel(reservation.id, "somebody-else")
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn cancel_releases_the_slot() {
        let (db, service) = setup().await;
        let reservation = service
            .create("u-1", 1, 1, at(10, 0), at(12, 0))
            .await
            .unwrap();
        assert_eq!(slot_status(&db, 1).await, "reserved");

        let updated = service.cancel(reservation.id, "u-1").await.unwrap();
        assert_eq!(updated.status, ReservationStatus::Cancelled);
        assert_eq!(slot_status(&db, 1).await, "available");
    }

    #[tokio::test]
    async fn revoke_releases_the_slot() {
        let (db, service) = setup().await;
        let reservation = service
            .create("u-1", 1, 1, at(10, 0), at(12, 0))
            .await
            .unwrap();

        let updated = service.revoke(reservation.id).await.unwrap();
        assert_eq!(updated.status, ReservationStatus::Revoked);
        assert_eq!(slot_status(&db, 1).await, "available");
    }

    #[tokio::test]
    async fn close_leaves_occupied_slot_alone() {
        let (db, service) = setup().await;
        let reservation = service
            .create("u-1", 1, 1, at(10, 0), at(12, 0))
            .await
            .unwrap();

        // vehicle drove in before the cancellation
        let slot = parking_slot::Entity::find_by_id(1)
            .one(&db)
            .await
            .unwrap()
            .unwrap();
        let mut active: parking_slot::ActiveModel = slot.into();
        active.status = Set(SlotStatus::Occupied.as_str().to_string());
        active.update(&db).await.unwrap();

        service.cancel(reservation.id, "u-1").await.unwrap();
        assert_eq!(slot_status(&db, 1).await, "occupied");
    }
}
