//! Reservation repository interface

use async_trait::async_trait;

use super::model::{NewReservation, Reservation, ReservationStatus};
use crate::domain::DomainResult;

#[async_trait]
pub trait ReservationRepository: Send + Sync {
    /// Atomically create a pending reservation.
    ///
    /// Runs inside one database transaction: the slot must exist and be
    /// `available`, and no `active` reservation on the slot may intersect
    /// the requested half-open interval. On success the reservation is
    /// inserted in `pending` state and the slot transitions to `reserved`.
    async fn create_pending(&self, new: NewReservation) -> DomainResult<Reservation>;

    /// Find reservation by ID
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Reservation>>;

    /// Ownership-scoped lookup: `None` for both missing and foreign
    /// reservations, so callers cannot distinguish the two.
    async fn find_owned(&self, id: i32, user_id: &str) -> DomainResult<Option<Reservation>>;

    /// Transition to `active` and persist the computed price
    async fn mark_acknowledged(&self, id: i32, total_price: i64) -> DomainResult<Reservation>;

    /// Terminal transition (`cancelled` or `revoked`). Releases the slot
    /// back to `available` when it is still `reserved`, in the same
    /// transaction.
    async fn close(&self, id: i32, status: ReservationStatus) -> DomainResult<Reservation>;
}
