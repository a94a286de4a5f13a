//! Parking price computation
//!
//! Fixed per-vehicle-type hourly rates; duration is billed in whole
//! hours, rounded up.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::vehicle::VehicleType;

/// Hourly rate in smallest currency unit
pub fn hourly_rate(vehicle_type: VehicleType) -> i64 {
    match vehicle_type {
        VehicleType::Motorcycle => 500,
        VehicleType::Bus => 1000,
        VehicleType::Car => 800,
        VehicleType::Truck => 1500,
    }
}

/// Billable duration: `ceil((end - start) / 1h)`, never below 1 for a
/// non-empty interval.
pub fn billable_hours(start: DateTime<Utc>, end: DateTime<Utc>) -> i64 {
    let secs = (end - start).num_seconds().max(0);
    (secs + 3599) / 3600
}

/// Pricing summary produced at acknowledgement time
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    pub duration_hours: i64,
    pub vehicle_type: String,
    pub price_per_hour: i64,
    pub total_price: i64,
}

impl Ticket {
    pub fn compute(vehicle_type: VehicleType, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        let duration_hours = billable_hours(start, end);
        let price_per_hour = hourly_rate(vehicle_type);
        Self {
            duration_hours,
            vehicle_type: vehicle_type.as_str().to_string(),
            price_per_hour,
            total_price: duration_hours * price_per_hour,
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(hour: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, hour, min, 0).unwrap()
    }

    #[test]
    fn rates_per_vehicle_type() {
        assert_eq!(hourly_rate(VehicleType::Motorcycle), 500);
        assert_eq!(hourly_rate(VehicleType::Car), 800);
        assert_eq!(hourly_rate(VehicleType::Bus), 1000);
        assert_eq!(hourly_rate(VehicleType::Truck), 1500);
    }

    #[test]
    fn unknown_vehicle_type_bills_at_car_rate() {
        assert_eq!(hourly_rate(VehicleType::parse("segway")), 800);
    }

    #[test]
    fn partial_hours_round_up() {
        assert_eq!(billable_hours(at(10, 0), at(12, 0)), 2);
        assert_eq!(billable_hours(at(10, 0), at(12, 30)), 3);
        assert_eq!(billable_hours(at(10, 0), at(10, 1)), 1);
    }

    #[test]
    fn ticket_for_car_two_and_a_half_hours() {
        // start 10:00, end 12:30 → 3 billable hours × 800
        let ticket = Ticket::compute(VehicleType::Car, at(10, 0), at(12, 30));
        assert_eq!(ticket.duration_hours, 3);
        assert_eq!(ticket.price_per_hour, 800);
        assert_eq!(ticket.total_price, 2400);
        assert_eq!(ticket.vehicle_type, "car");
    }

    #[test]
    fn ticket_is_deterministic() {
        let a = Ticket::compute(VehicleType::Truck, at(8, 0), at(9, 15));
        let b = Ticket::compute(VehicleType::Truck, at(8, 0), at(9, 15));
        assert_eq!(a.total_price, b.total_price);
        assert_eq!(a.total_price, 2 * 1500);
    }
}
