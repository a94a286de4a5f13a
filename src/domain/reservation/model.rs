//! Reservation domain entity
//!
//! A reservation binds a user, a vehicle and a parking slot to a
//! `[start_time, end_time)` interval. Transitions are one-way:
//! `pending` → `active` (admin acknowledgement) → `paid`, or out to
//! `cancelled` (owner) / `revoked` (admin).

use chrono::{DateTime, Utc};

/// Reservation lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReservationStatus {
    /// Created, waiting for admin acknowledgement
    Pending,
    /// Acknowledged by an admin, priced
    Active,
    /// A completed payment exists
    Paid,
    /// Cancelled by the owning user
    Cancelled,
    /// Revoked by an admin
    Revoked,
}

impl ReservationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Active => "active",
            Self::Paid => "paid",
            Self::Cancelled => "cancelled",
            Self::Revoked => "revoked",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s {
            "pending" => Self::Pending,
            "active" => Self::Active,
            "paid" => Self::Paid,
            "revoked" => Self::Revoked,
            _ => Self::Cancelled,
        }
    }
}

impl std::fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Half-open interval intersection: `[s1, e1)` and `[s2, e2)` collide
/// iff `s1 < e2 && e1 > s2`. Touching intervals do not overlap.
pub fn overlaps(
    s1: DateTime<Utc>,
    e1: DateTime<Utc>,
    s2: DateTime<Utc>,
    e2: DateTime<Utc>,
) -> bool {
    s1 < e2 && e1 > s2
}

/// A slot booking with a lifecycle status
#[derive(Debug, Clone)]
pub struct Reservation {
    pub id: i32,
    pub user_id: String,
    pub slot_id: i32,
    pub vehicle_id: i32,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub status: ReservationStatus,
    /// Set at acknowledgement time, in smallest currency unit
    pub total_price: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Reservation {
    /// Whether this reservation blocks other bookings on its slot
    pub fn is_active(&self) -> bool {
        self.status == ReservationStatus::Active
    }

    /// Terminal states: no further transition is allowed
    pub fn is_closed(&self) -> bool {
        matches!(
            self.status,
            ReservationStatus::Cancelled | ReservationStatus::Revoked
        )
    }
}

/// Input for creating a reservation
#[derive(Debug, Clone)]
pub struct NewReservation {
    pub user_id: String,
    pub slot_id: i32,
    pub vehicle_id: i32,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
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
    fn status_roundtrip() {
        for status in &[
            ReservationStatus::Pending,
            ReservationStatus::Active,
            ReservationStatus::Paid,
            ReservationStatus::Cancelled,
            ReservationStatus::Revoked,
        ] {
            assert_eq!(&ReservationStatus::parse(status.as_str()), status);
        }
    }

    #[test]
    fn unknown_status_is_cancelled() {
        assert_eq!(
            ReservationStatus::parse("garbage"),
            ReservationStatus::Cancelled
        );
    }

    #[test]
    fn intervals_overlap_when_intersecting() {
        assert!(overlaps(at(10, 0), at(12, 0), at(11, 0), at(13, 0)));
        assert!(overlaps(at(11, 0), at(13, 0), at(10, 0), at(12, 0)));
        // full containment
        assert!(overlaps(at(10, 0), at(14, 0), at(11, 0), at(12, 0)));
        assert!(overlaps(at(11, 0), at(12, 0), at(10, 0), at(14, 0)));
        // identical
        assert!(overlaps(at(10, 0), at(12, 0), at(10, 0), at(12, 0)));
    }

    #[test]
    fn touching_intervals_do_not_overlap() {
        assert!(!overlaps(at(10, 0), at(12, 0), at(12, 0), at(14, 0)));
        assert!(!overlaps(at(12, 0), at(14, 0), at(10, 0), at(12, 0)));
    }

    #[test]
    fn disjoint_intervals_do_not_overlap() {
        assert!(!overlaps(at(8, 0), at(9, 0), at(10, 0), at(11, 0)));
    }

    #[test]
    fn closed_states() {
        let mut r = Reservation {
            id: 1,
            user_id: "u1".into(),
            slot_id: 1,
            vehicle_id: 1,
            start_time: at(10, 0),
            end_time: at(12, 0),
            status: ReservationStatus::Pending,
            total_price: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert!(!r.is_closed());
        r.status = ReservationStatus::Cancelled;
        assert!(r.is_closed());
        r.status = ReservationStatus::Revoked;
        assert!(r.is_closed());
        r.status = ReservationStatus::Paid;
        assert!(!r.is_closed());
    }
}
