//! Parking slot domain entity

use chrono::{DateTime, Utc};

/// Parking slot status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotStatus {
    /// Free and bookable
    Available,
    /// Held by a reservation
    Reserved,
    /// A vehicle is parked on it
    Occupied,
    /// Taken out of service
    Maintenance,
}

impl SlotStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Reserved => "reserved",
            Self::Occupied => "occupied",
            Self::Maintenance => "maintenance",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s {
            "available" => Self::Available,
            "reserved" => Self::Reserved,
            "occupied" => Self::Occupied,
            // unknown values render the slot unbookable rather than free
            _ => Self::Maintenance,
        }
    }
}

impl std::fmt::Display for SlotStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A physical parking space
#[derive(Debug, Clone)]
pub struct ParkingSlot {
    pub id: i32,
    /// Human-readable slot label, unique per lot (e.g. "B2-14")
    pub slot_number: String,
    pub floor: i32,
    /// Slot category (e.g. "standard", "compact", "handicap")
    pub slot_type: String,
    pub status: SlotStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ParkingSlot {
    pub fn is_available(&self) -> bool {
        self.status == SlotStatus::Available
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_roundtrip() {
        for status in &[
            SlotStatus::Available,
            SlotStatus::Reserved,
            SlotStatus::Occupied,
            SlotStatus::Maintenance,
        ] {
            assert_eq!(&SlotStatus::parse(status.as_str()), status);
        }
    }

    #[test]
    fn unknown_status_is_maintenance() {
        assert_eq!(SlotStatus::parse("???"), SlotStatus::Maintenance);
    }

    #[test]
    fn only_available_slots_are_bookable() {
        let mut slot = ParkingSlot {
            id: 1,
            slot_number: "A1-01".into(),
            floor: 1,
            slot_type: "standard".into(),
            status: SlotStatus::Available,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert!(slot.is_available());
        slot.status = SlotStatus::Reserved;
        assert!(!slot.is_available());
    }
}
