//! SeaORM implementation of VehicleRepository

use async_trait::async_trait;
use sea_orm::{DatabaseConnection, EntityTrait};

use crate::domain::vehicle::{Vehicle, VehicleRepository, VehicleType};
use crate::domain::DomainResult;
use crate::infrastructure::database::entities::vehicle;

use super::slot_repository::db_err;

pub struct SeaOrmVehicleRepository {
    db: DatabaseConnection,
}

impl SeaOrmVehicleRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

pub(crate) fn model_to_domain(m: vehicle::Model) -> Vehicle {
    Vehicle {
        id: m.id,
        user_id: m.user_id,
        vehicle_type: VehicleType::parse(&m.vehicle_type),
        license_plate: m.license_plate,
        brand: m.brand,
        model: m.model,
        color: m.color,
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

#[async_trait]
impl VehicleRepository for SeaOrmVehicleRepository {
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Vehicle>> {
        let model = vehicle::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }
}
