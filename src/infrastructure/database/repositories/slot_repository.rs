//! SeaORM implementation of SlotRepository

use async_trait::async_trait;
use sea_orm::{DatabaseConnection, EntityTrait};

use crate::domain::slot::{ParkingSlot, SlotRepository, SlotStatus};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::parking_slot;

pub struct SeaOrmSlotRepository {
    db: DatabaseConnection,
}

impl SeaOrmSlotRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

pub(crate) fn model_to_domain(m: parking_slot::Model) -> ParkingSlot {
    ParkingSlot {
        id: m.id,
        slot_number: m.slot_number,
        floor: m.floor,
        slot_type: m.slot_type,
        status: SlotStatus::parse(&m.status),
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

pub(crate) fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::Database(e.to_string())
}

#[async_trait]
impl SlotRepository for SeaOrmSlotRepository {
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<ParkingSlot>> {
        let model = parking_slot::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }
}
