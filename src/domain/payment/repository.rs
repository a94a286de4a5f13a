//! Payment repository interface

use async_trait::async_trait;

use super::model::{NewPayment, Payment};
use crate::domain::DomainResult;

#[async_trait]
pub trait PaymentRepository: Send + Sync {
    /// Insert a `pending` payment attempt
    async fn create_pending(&self, new: NewPayment) -> DomainResult<Payment>;

    /// Atomically mark the payment `completed` with the gateway
    /// transaction id and transition the reservation to `paid`.
    async fn complete(
        &self,
        payment_id: i32,
        transaction_id: &str,
        reservation_id: i32,
    ) -> DomainResult<Payment>;

    /// Mark the payment attempt `failed`; the reservation is untouched.
    async fn mark_failed(&self, payment_id: i32) -> DomainResult<Payment>;

    /// Look up a payment by gateway transaction id
    async fn find_by_transaction_id(&self, transaction_id: &str)
        -> DomainResult<Option<Payment>>;
}
