//! Payment DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::domain::payment::Payment;
use crate::infrastructure::database::entities::{payment, reservation, user};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InitiatePaymentRequest {
    #[validate(range(min = 1, message = "reservationId is required"))]
    pub reservation_id: i32,
    #[validate(length(min = 1, max = 50, message = "payment method is required"))]
    pub payment_method: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VerifyPaymentRequest {
    #[validate(length(min = 1, message = "transactionId is required"))]
    pub transaction_id: String,
}

/// Filters for payment listings
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct PaymentFilter {
    /// Filter by status
    pub status: Option<String>,
    /// Exact transaction id match
    pub search: Option<String>,
    /// Inclusive lower bound on paymentDate
    pub start_date: Option<DateTime<Utc>>,
    /// Inclusive upper bound on paymentDate
    pub end_date: Option<DateTime<Utc>>,
}

/// Reservation attributes embedded in payment responses
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReservationSummary {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub status: String,
}

impl ReservationSummary {
    pub fn from_model(m: &reservation::Model) -> Self {
        Self {
            start_time: m.start_time,
            end_time: m.end_time,
            status: m.status.clone(),
        }
    }
}

/// Payer attributes embedded in admin listings
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PayerSummary {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl PayerSummary {
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
pub struct PaymentDto {
    pub id: i32,
    pub user_id: String,
    pub reservation_id: i32,
    pub amount: i64,
    pub status: String,
    pub transaction_id: Option<String>,
    pub payment_method: String,
    pub payment_date: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reservation: Option<ReservationSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<PayerSummary>,
}

impl PaymentDto {
    pub fn from_domain(p: Payment) -> Self {
        Self {
            id: p.id,
            user_id: p.user_id,
            reservation_id: p.reservation_id,
            amount: p.amount,
            status: p.status.as_str().to_string(),
            transaction_id: p.transaction_id,
            payment_method: p.payment_method,
            payment_date: p.payment_date,
            reservation: None,
            user: None,
        }
    }

    pub fn from_model(m: payment::Model) -> Self {
        Self {
            id: m.id,
            user_id: m.user_id,
            reservation_id: m.reservation_id,
            amount: m.amount,
            status: m.status,
            transaction_id: m.transaction_id,
            payment_method: m.payment_method,
            payment_date: m.payment_date,
            reservation: None,
            user: None,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct InitiatePaymentResponse {
    pub message: String,
    pub payment: PaymentDto,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct VerifyPaymentResponse {
    pub payment: PaymentDto,
}
