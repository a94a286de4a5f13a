//! Analytics DTOs

use serde::Serialize;
use utoipa::ToSchema;

/// Dashboard aggregate counts and occupancy
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_users: u64,
    pub total_vehicles: u64,
    pub total_reservations: u64,
    /// Sum of completed payment amounts, smallest currency unit
    pub total_revenue: i64,
    /// Active reservations over total slots, e.g. "33.33%"
    pub occupancy_rate: String,
}
