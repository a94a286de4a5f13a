//! Parking slot DTOs

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::infrastructure::database::entities::parking_slot;

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateSlotRequest {
    #[validate(length(min = 1, max = 20, message = "slot number is required"))]
    pub slot_number: String,
    pub floor: i32,
    /// standard, compact, handicap, ...
    #[serde(rename = "type", default = "default_slot_type")]
    pub slot_type: String,
}

fn default_slot_type() -> String {
    "standard".to_string()
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSlotRequest {
    pub slot_number: Option<String>,
    pub floor: Option<i32>,
    #[serde(rename = "type")]
    pub slot_type: Option<String>,
    /// available, reserved, occupied or maintenance
    pub status: Option<String>,
}

/// Filters for the slot listing
#[derive(Debug, Deserialize, IntoParams)]
pub struct SlotFilter {
    /// Filter by status
    pub status: Option<String>,
    /// Substring match on the slot number
    pub search: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SlotDto {
    pub id: i32,
    pub slot_number: String,
    pub floor: i32,
    #[serde(rename = "type")]
    pub slot_type: String,
    pub status: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl SlotDto {
    pub fn from_model(m: parking_slot::Model) -> Self {
        Self {
            id: m.id,
            slot_number: m.slot_number,
            floor: m.floor,
            slot_type: m.slot_type,
            status: m.status,
            created_at: m.created_at,
        }
    }
}
