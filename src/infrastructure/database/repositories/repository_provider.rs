//! SeaORM implementation of RepositoryProvider

use sea_orm::DatabaseConnection;

use crate::domain::payment::PaymentRepository;
use crate::domain::repositories::RepositoryProvider;
use crate::domain::reservation::ReservationRepository;
use crate::domain::slot::SlotRepository;
use crate::domain::vehicle::VehicleRepository;

use super::payment_repository::SeaOrmPaymentRepository;
use super::reservation_repository::SeaOrmReservationRepository;
use super::slot_repository::SeaOrmSlotRepository;
use super::vehicle_repository::SeaOrmVehicleRepository;

/// Unified repository provider backed by SeaORM.
///
/// Holds one connection pool and exposes per-aggregate repository accessors.
///
/// ```ignore
/// let repos = SeaOrmRepositoryProvider::new(db.clone());
/// let slot = repos.slots().find_by_id(3).await?;
/// ```
pub struct SeaOrmRepositoryProvider {
    slots: SeaOrmSlotRepository,
    vehicles: SeaOrmVehicleRepository,
    reservations: SeaOrmReservationRepository,
    payments: SeaOrmPaymentRepository,
}

impl SeaOrmRepositoryProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            slots: SeaOrmSlotRepository::new(db.clone()),
            vehicles: SeaOrmVehicleRepository::new(db.clone()),
            reservations: SeaOrmReservationRepository::new(db.clone()),
            payments: SeaOrmPaymentRepository::new(db),
        }
    }
}

impl RepositoryProvider for SeaOrmRepositoryProvider {
    fn slots(&self) -> &dyn SlotRepository {
        &self.slots
    }

    fn vehicles(&self) -> &dyn VehicleRepository {
        &self.vehicles
    }

    fn reservations(&self) -> &dyn ReservationRepository {
        &self.reservations
    }

    fn payments(&self) -> &dyn PaymentRepository {
        &self.payments
    }
}
