//! Payment gateway capability
//!
//! The processor is polymorphic over anything that can answer
//! `{success, transaction_id}` for a charge attempt.

use async_trait::async_trait;
use rand::Rng;

use crate::domain::DomainResult;

/// Result of a gateway charge attempt
#[derive(Debug, Clone)]
pub struct GatewayOutcome {
    pub success: bool,
    pub transaction_id: String,
}

#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Charge `amount` (smallest currency unit) via `payment_method`.
    async fn charge(&self, amount: i64, payment_method: &str) -> DomainResult<GatewayOutcome>;
}

/// Synchronous stand-in gateway: always approves and mints a
/// pseudo-random transaction reference.
pub struct MockPaymentGateway;

#[async_trait]
impl PaymentGateway for MockPaymentGateway {
    async fn charge(&self, _amount: i64, _payment_method: &str) -> DomainResult<GatewayOutcome> {
        let n: u32 = rand::thread_rng().gen_range(0..1_000_000_000);
        Ok(GatewayOutcome {
            success: true,
            transaction_id: format!("TXN-{}", n),
        })
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn mock_gateway_approves_with_reference() {
        let outcome = MockPaymentGateway.charge(2400, "card").await.unwrap();
        assert!(outcome.success);
        assert!(outcome.transaction_id.starts_with("TXN-"));
    }
}
