//! Reservation DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::domain::pricing::Ticket;
use crate::domain::reservation::Reservation;
use crate::infrastructure::database::entities::{parking_slot, user, vehicle};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateReservationRequest {
    #[validate(range(min = 1, message = "slotId is required"))]
    pub slot_id: i32,
    #[validate(range(min = 1, message = "vehicleId is required"))]
    pub vehicle_id: i32,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

/// Filters for reservation listings
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ReservationFilter {
    /// Filter by status
    pub status: Option<String>,
    /// Inclusive lower bound on startTime (admin listing)
    pub start_date: Option<DateTime<Utc>>,
    /// Inclusive upper bound on startTime (admin listing)
    pub end_date: Option<DateTime<Utc>>,
}

/// Slot attributes embedded in reservation responses
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SlotSummary {
    pub slot_number: String,
    pub floor: i32,
    #[serde(rename = "type")]
    pub slot_type: String,
    pub status: String,
}

impl SlotSummary {
    pub fn from_model(m: &parking_slot::Model) -> Self {
        Self {
            slot_number: m.slot_number.clone(),
            floor: m.floor,
            slot_type: m.slot_type.clone(),
            status: m.status.clone(),
        }
    }
}

/// Vehicle attributes embedded in reservation responses
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VehicleSummary {
    #[serde(rename = "type")]
    pub vehicle_type: String,
    pub license_plate: String,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub color: Option<String>,
}

impl VehicleSummary {
    pub fn from_model(m: &vehicle::Model) -> Self {
        Self {
            vehicle_type: m.vehicle_type.clone(),
            license_plate: m.license_plate.clone(),
            brand: m.brand.clone(),
            model: m.model.clone(),
            color: m.color.clone(),
        }
    }
}

/// Owner attributes embedded in admin listings
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl UserSummary {
    pub fn from_model(m: &user::Model) -> Self {
        Self {
            first_name: m.first_name.clone(),
            last_name: m.last_name.clone(),
            email: m.email.clone(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReservationDto {
    pub id: i32,
    pub user_id: String,
    pub slot_id: i32,
    pub vehicle_id: i32,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub status: String,
    pub total_price: Option<i64>,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slot: Option<SlotSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vehicle: Option<VehicleSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserSummary>,
}

impl ReservationDto {
    pub fn from_domain(r: Reservation) -> Self {
        Self {
            id: r.id,
            user_id: r.user_id,
            slot_id: r.slot_id,
            vehicle_id: r.vehicle_id,
            start_time: r.start_time,
            end_time: r.end_time,
            status: r.status.as_str().to_string(),
            total_price: r.total_price,
            created_at: r.created_at,
            slot: None,
            vehicle: None,
            user: None,
        }
    }
}

/// Pricing summary computed at acknowledgement time
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TicketDto {
    pub duration_hours: i64,
    pub vehicle_type: String,
    pub price_per_hour: i64,
    pub total_price: i64,
}

impl From<Ticket> for TicketDto {
    fn from(t: Ticket) -> Self {
        Self {
            duration_hours: t.duration_hours,
            vehicle_type: t.vehicle_type,
            price_per_hour: t.price_per_hour,
            total_price: t.total_price,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AcknowledgeResponse {
    pub message: String,
    pub reservation: ReservationDto,
    pub ticket: TicketDto,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ReservationActionResponse {
    pub message: String,
    pub reservation: ReservationDto,
}
