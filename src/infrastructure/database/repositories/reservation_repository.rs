//! SeaORM implementation of ReservationRepository
//!
//! The check-then-act sequences (availability + overlap check + insert +
//! slot transition; terminal transition + slot release) each run inside
//! one database transaction, so concurrent callers cannot interleave
//! between the check and the writes.

use async_trait::async_trait;
use chrono::Utc;
use log::debug;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, QueryFilter, Set,
    TransactionTrait,
};

use crate::domain::reservation::{
    NewReservation, Reservation, ReservationRepository, ReservationStatus,
};
use crate::domain::slot::SlotStatus;
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::{parking_slot, reservation};

use super::slot_repository::db_err;

pub struct SeaOrmReservationRepository {
    db: DatabaseConnection,
}

impl SeaOrmReservationRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

pub(crate) fn model_to_domain(m: reservation::Model) -> Reservation {
    Reservation {
        id: m.id,
        user_id: m.user_id,
        slot_id: m.slot_id,
        vehicle_id: m.vehicle_id,
        start_time: m.start_time,
        end_time: m.end_time,
        status: ReservationStatus::parse(&m.status),
        total_price: m.total_price,
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

// ── ReservationRepository impl ──────────────────────────────────

#[async_trait]
impl ReservationRepository for SeaOrmReservationRepository {
    async fn create_pending(&self, new: NewReservation) -> DomainResult<Reservation> {
        debug!(
            "Creating reservation: slot={} user={} [{} .. {})",
            new.slot_id, new.user_id, new.start_time, new.end_time
        );

        let txn = self.db.begin().await.map_err(db_err)?;

        let slot = parking_slot::Entity::find_by_id(new.slot_id)
            .one(&txn)
            .await
            .map_err(db_err)?
            .ok_or_else(|| DomainError::not_found("ParkingSlot", "id", new.slot_id))?;

        if SlotStatus::parse(&slot.status) != SlotStatus::Available {
            return Err(DomainError::Conflict(
                "Parking slot is not available".to_string(),
            ));
        }

        // Half-open interval intersection: s < end AND e > start
        let overlapping = reservation::Entity::find()
            .filter(reservation::Column::SlotId.eq(new.slot_id))
            .filter(reservation::Column::Status.eq(ReservationStatus::Active.as_str()))
            .filter(reservation::Column::StartTime.lt(new.end_time))
            .filter(reservation::Column::EndTime.gt(new.start_time))
            .one(&txn)
            .await
            .map_err(db_err)?;

        if overlapping.is_some() {
            return Err(DomainError::Conflict(
                "Slot already reserved for this time".to_string(),
            ));
        }

        let now = Utc::now();
        let inserted = reservation::ActiveModel {
            id: NotSet,
            user_id: Set(new.user_id),
            slot_id: Set(new.slot_id),
            vehicle_id: Set(new.vehicle_id),
            start_time: Set(new.start_time),
            end_time: Set(new.end_time),
            status: Set(ReservationStatus::Pending.as_str().to_string()),
            total_price: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&txn)
        .await
        .map_err(db_err)?;

        let mut slot_active: parking_slot::ActiveModel = slot.into();
        slot_active.status = Set(SlotStatus::Reserved.as_str().to_string());
        slot_active.updated_at = Set(now);
        slot_active.update(&txn).await.map_err(db_err)?;

        txn.commit().await.map_err(db_err)?;
        Ok(model_to_domain(inserted))
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Reservation>> {
        let model = reservation::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_owned(&self, id: i32, user_id: &str) -> DomainResult<Option<Reservation>> {
        let model = reservation::Entity::find_by_id(id)
            .filter(reservation::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn mark_acknowledged(&self, id: i32, total_price: i64) -> DomainResult<Reservation> {
        debug!("Acknowledging reservation {} at price {}", id, total_price);

        let existing = reservation::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?
            .ok_or_else(|| DomainError::not_found("Reservation", "id", id))?;

        let mut active: reservation::ActiveModel = existing.into();
        active.status = Set(ReservationStatus::Active.as_str().to_string());
        active.total_price = Set(Some(total_price));
        active.updated_at = Set(Utc::now());
        let updated = active.update(&self.db).await.map_err(db_err)?;
        Ok(model_to_domain(updated))
    }

    async fn close(&self, id: i32, status: ReservationStatus) -> DomainResult<Reservation> {
        debug!("Closing reservation {} as {}", id, status);

        let txn = self.db.begin().await.map_err(db_err)?;

        let existing = reservation::Entity::find_by_id(id)
            .one(&txn)
            .await
            .map_err(db_err)?
            .ok_or_else(|| DomainError::not_found("Reservation", "id", id))?;

        let slot_id = existing.slot_id;
        let now = Utc::now();

        let mut active: reservation::ActiveModel = existing.into();
        active.status = Set(status.as_str().to_string());
        active.updated_at = Set(now);
        let updated = active.update(&txn).await.map_err(db_err)?;

        // Release the slot back to the pool, but only if it is still held
        // by a reservation; an occupied slot is left alone.
        let slot = parking_slot::Entity::find_by_id(slot_id)
            .one(&txn)
            .await
            .map_err(db_err)?;
        if let Some(slot) = slot {
            if SlotStatus::parse(&slot.status) == SlotStatus::Reserved {
                let mut slot_active: parking_slot::ActiveModel = slot.into();
                slot_active.status = Set(SlotStatus::Available.as_str().to_string());
                slot_active.updated_at = Set(now);
                slot_active.update(&txn).await.map_err(db_err)?;
            }
        }

        txn.commit().await.map_err(db_err)?;
        Ok(model_to_domain(updated))
    }
}
