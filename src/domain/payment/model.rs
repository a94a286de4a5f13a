//! Payment domain entity
//!
//! One row per payment attempt; a reservation may accumulate several
//! attempts but only one `completed` payment is meaningful.

use chrono::{DateTime, Utc};

/// Payment attempt status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentStatus {
    Pending,
    Completed,
    Failed,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s {
            "pending" => Self::Pending,
            "completed" => Self::Completed,
            _ => Self::Failed,
        }
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A payment attempt against a reservation
#[derive(Debug, Clone)]
pub struct Payment {
    pub id: i32,
    pub user_id: String,
    pub reservation_id: i32,
    /// Amount in smallest currency unit
    pub amount: i64,
    pub status: PaymentStatus,
    /// Gateway transaction reference, set once the attempt completes
    pub transaction_id: Option<String>,
    pub payment_method: String,
    pub payment_date: DateTime<Utc>,
}

impl Payment {
    pub fn is_completed(&self) -> bool {
        self.status == PaymentStatus::Completed
    }
}

/// Input for creating a payment attempt
#[derive(Debug, Clone)]
pub struct NewPayment {
    pub user_id: String,
    pub reservation_id: i32,
    pub amount: i64,
    pub payment_method: String,
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_roundtrip() {
        for status in &[
            PaymentStatus::Pending,
            PaymentStatus::Completed,
            PaymentStatus::Failed,
        ] {
            assert_eq!(&PaymentStatus::parse(status.as_str()), status);
        }
    }

    #[test]
    fn unknown_status_is_failed() {
        assert_eq!(PaymentStatus::parse("refunded"), PaymentStatus::Failed);
    }
}
