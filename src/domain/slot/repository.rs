//! Parking slot repository interface

use async_trait::async_trait;

use super::model::ParkingSlot;
use crate::domain::DomainResult;

#[async_trait]
pub trait SlotRepository: Send + Sync {
    /// Find slot by ID
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<ParkingSlot>>;
}
