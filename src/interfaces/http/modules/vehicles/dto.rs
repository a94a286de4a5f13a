//! Vehicle DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::infrastructure::database::entities::vehicle;

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateVehicleRequest {
    /// car, motorcycle, bus or truck
    #[serde(rename = "type")]
    #[validate(length(min = 1, max = 20, message = "vehicle type is required"))]
    pub vehicle_type: String,
    #[validate(length(min = 1, max = 20, message = "license plate is required"))]
    pub license_plate: String,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub color: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateVehicleRequest {
    #[serde(rename = "type")]
    pub vehicle_type: Option<String>,
    pub license_plate: Option<String>,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub color: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VehicleDto {
    pub id: i32,
    pub user_id: String,
    #[serde(rename = "type")]
    pub vehicle_type: String,
    pub license_plate: String,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub color: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl VehicleDto {
    pub fn from_model(m: vehicle::Model) -> Self {
        Self {
            id: m.id,
            user_id: m.user_id,
            vehicle_type: m.vehicle_type,
            license_plate: m.license_plate,
            brand: m.brand,
            model: m.model,
            color: m.color,
            created_at: m.created_at,
        }
    }
}
