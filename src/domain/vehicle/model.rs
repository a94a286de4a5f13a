//! Vehicle domain entity

use chrono::{DateTime, Utc};

/// Vehicle category, drives the hourly parking rate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VehicleType {
    Car,
    Motorcycle,
    Bus,
    Truck,
}

impl VehicleType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Car => "car",
            Self::Motorcycle => "motorcycle",
            Self::Bus => "bus",
            Self::Truck => "truck",
        }
    }

    /// Unknown values fall back to `Car` (the default rate class).
    pub fn parse(s: &str) -> Self {
        match s {
            "motorcycle" => Self::Motorcycle,
            "bus" => Self::Bus,
            "truck" => Self::Truck,
            _ => Self::Car,
        }
    }
}

impl std::fmt::Display for VehicleType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A registered vehicle, owned by a user.
///
/// Read-only from the reservation lifecycle's perspective: only the type
/// matters there, for pricing.
#[derive(Debug, Clone)]
pub struct Vehicle {
    pub id: i32,
    pub user_id: String,
    pub vehicle_type: VehicleType,
    pub license_plate: String,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub color: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_roundtrip() {
        for t in &[
            VehicleType::Car,
            VehicleType::Motorcycle,
            VehicleType::Bus,
            VehicleType::Truck,
        ] {
            assert_eq!(&VehicleType::parse(t.as_str()), t);
        }
    }

    #[test]
    fn unknown_type_defaults_to_car() {
        assert_eq!(VehicleType::parse("hovercraft"), VehicleType::Car);
        assert_eq!(VehicleType::parse(""), VehicleType::Car);
    }
}
