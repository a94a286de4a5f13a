//! Analytics API handlers (admin-only)
//!
//! Stateless aggregate reads over the entities.

use axum::extract::State;
use axum::Json;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter};

use super::dto::DashboardStats;
use crate::domain::payment::PaymentStatus;
use crate::domain::reservation::ReservationStatus;
use crate::infrastructure::database::entities::{
    parking_slot, payment, reservation, user, vehicle,
};
use crate::interfaces::http::common::ApiResult;
use crate::interfaces::http::middleware::AdminUser;

#[derive(Clone)]
pub struct AnalyticsState {
    pub db: DatabaseConnection,
}

/// Occupancy as a percentage string with two decimals; "0%" for an
/// empty lot, guarding the division.
fn occupancy_rate(occupied: u64, total_slots: u64) -> String {
    if total_slots == 0 {
        return "0%".to_string();
    }
    format!("{:.2}%", (occupied as f64 / total_slots as f64) * 100.0)
}

#[utoipa::path(
    get,
    path = "/api/analytics/dashboard",
    tag = "Analytics",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Dashboard statistics", body = DashboardStats),
        (status = 403, description = "Admin only")
    )
)]
pub async fn dashboard_stats(
    State(state): State<AnalyticsState>,
    AdminUser(_admin): AdminUser,
) -> ApiResult<Json<DashboardStats>> {
    let db = &state.db;

    let total_users = user::Entity::find().count(db).await?;
    let total_vehicles = vehicle::Entity::find().count(db).await?;
    let total_reservations = reservation::Entity::find().count(db).await?;
    let total_slots = parking_slot::Entity::find().count(db).await?;

    let completed: Vec<payment::Model> = payment::Entity::find()
        .filter(payment::Column::Status.eq(PaymentStatus::Completed.as_str()))
        .all(db)
        .await?;
    let total_revenue: i64 = completed.iter().map(|p| p.amount).sum();

    let occupied = reservation::Entity::find()
        .filter(reservation::Column::Status.eq(ReservationStatus::Active.as_str()))
        .count(db)
        .await?;

    Ok(Json(DashboardStats {
        total_users,
        total_vehicles,
        total_reservations,
        total_revenue,
        occupancy_rate: occupancy_rate(occupied, total_slots),
    }))
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_lot_is_zero_percent() {
        assert_eq!(occupancy_rate(0, 0), "0%");
        assert_eq!(occupancy_rate(5, 0), "0%");
    }

    #[test]
    fn rate_has_two_decimals() {
        assert_eq!(occupancy_rate(1, 3), "33.33%");
        assert_eq!(occupancy_rate(1, 2), "50.00%");
        assert_eq!(occupancy_rate(3, 3), "100.00%");
        assert_eq!(occupancy_rate(0, 10), "0.00%");
    }
}
