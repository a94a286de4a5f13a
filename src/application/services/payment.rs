//! Payment processor service
//!
//! Attempt-based flow: every initiation inserts a `pending` payment row,
//! the gateway decides its fate, and on approval the payment completion
//! and the reservation's `paid` transition land in one transaction.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use crate::domain::payment::{NewPayment, Payment, PaymentGateway};
use crate::domain::reservation::ReservationStatus;
use crate::domain::{DomainError, DomainResult, RepositoryProvider};
use crate::notifications::events::{Event, PaymentEvent};
use crate::notifications::SharedEventBus;

pub struct PaymentService {
    repos: Arc<dyn RepositoryProvider>,
    gateway: Arc<dyn PaymentGateway>,
    event_bus: SharedEventBus,
}

impl PaymentService {
    pub fn new(
        repos: Arc<dyn RepositoryProvider>,
        gateway: Arc<dyn PaymentGateway>,
        event_bus: SharedEventBus,
    ) -> Self {
        Self {
            repos,
            gateway,
            event_bus,
        }
    }

    /// Initiate a payment attempt for a reservation.
    ///
    /// The reservation must exist, must not be `paid` already, and must
    /// carry an acknowledged price. On gateway approval the payment is
    /// `completed` and the reservation transitions to `paid` atomically;
    /// on decline the payment is `failed` and the reservation untouched.
    pub async fn initiate(
        &self,
        user_id: &str,
        reservation_id: i32,
        payment_method: &str,
    ) -> DomainResult<Payment> {
        let reservation = self
            .repos
            .reservations()
            .find_by_id(reservation_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Reservation", "id", reservation_id))?;

        if reservation.status == ReservationStatus::Paid {
            return Err(DomainError::Validation(
                "Reservation already paid".to_string(),
            ));
        }

        let amount = reservation.total_price.ok_or_else(|| {
            DomainError::Validation("Reservation has not been priced yet".to_string())
        })?;

        let payment = self
            .repos
            .payments()
            .create_pending(NewPayment {
                user_id: user_id.to_string(),
                reservation_id: reservation.id,
                amount,
                payment_method: payment_method.to_string(),
            })
            .await?;

        let outcome = self.gateway.charge(amount, payment_method).await?;

        if outcome.success {
            let completed = self
                .repos
                .payments()
                .complete(payment.id, &outcome.transaction_id, reservation.id)
                .await?;

            info!(
                payment_id = completed.id,
                reservation_id,
                amount,
                transaction_id = %outcome.transaction_id,
                "Payment completed"
            );

            self.event_bus
                .publish(Event::PaymentCompleted(PaymentEvent {
                    payment_id: completed.id,
                    reservation_id,
                    user_id: completed.user_id.clone(),
                    amount,
                    transaction_id: completed.transaction_id.clone(),
                    timestamp: Utc::now(),
                }));

            Ok(completed)
        } else {
            let failed = self.repos.payments().mark_failed(payment.id).await?;

            info!(payment_id = failed.id, reservation_id, "Payment declined");

            self.event_bus.publish(Event::PaymentFailed(PaymentEvent {
                payment_id: failed.id,
                reservation_id,
                user_id: failed.user_id.clone(),
                amount,
                transaction_id: None,
                timestamp: Utc::now(),
            }));

            Ok(failed)
        }
    }

    /// Look up a payment by gateway transaction id. Read-only.
    pub async fn verify(&self, transaction_id: &str) -> DomainResult<Payment> {
        self.repos
            .payments()
            .find_by_transaction_id(transaction_id)
            .await?
            .ok_or_else(|| {
                DomainError::not_found("Payment", "transaction_id", transaction_id)
            })
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use chrono::{DateTime, TimeZone};
    use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, NotSet, PaginatorTrait, Set};
    use sea_orm_migration::MigratorTrait;

    use super::*;
    use crate::application::services::reservation::ReservationService;
    use crate::domain::payment::{GatewayOutcome, MockPaymentGateway, PaymentStatus};
    use crate::infrastructure::database::entities::{parking_slot, payment, user, vehicle};
    use crate::infrastructure::database::migrator::Migrator;
    use crate::infrastructure::database::repositories::SeaOrmRepositoryProvider;
    use crate::notifications::create_event_bus;

    struct DecliningGateway;

    #[async_trait]
    impl PaymentGateway for DecliningGateway {
        async fn charge(&self, _amount: i64, _method: &str) -> DomainResult<GatewayOutcome> {
            Ok(GatewayOutcome {
                success: false,
                transaction_id: String::new(),
            })
        }
    }

    struct Fixture {
        db: DatabaseConnection,
        reservations: ReservationService,
        repos: Arc<SeaOrmRepositoryProvider>,
    }

    async fn setup() -> Fixture {
        let db = sea_orm::Database::connect("sqlite::memory:").await.unwrap();
        Migrator::up(&db, None).await.unwrap();

        let now = Utc::now();
        user::ActiveModel {
            id: Set("u-1".to_string()),
            email: Set("owner@example.com".to_string()),
            password_hash: Set("x".to_string()),
            first_name: Set("Olya".to_string()),
            last_name: Set("Driver".to_string()),
            role: Set(user::UserRole::User),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&db)
        .await
        .unwrap();

        parking_slot::ActiveModel {
            id: NotSet,
            slot_number: Set("B2-14".to_string()),
            floor: Set(2),
            slot_type: Set("standard".to_string()),
            status: Set("available".to_string()),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&db)
        .await
        .unwrap();

        vehicle::ActiveModel {
            id: NotSet,
            user_id: Set("u-1".to_string()),
            vehicle_type: Set("car".to_string()),
            license_plate: Set("01B222BB".to_string()),
            brand: Set(None),
            model: Set(None),
            color: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&db)
        .await
        .unwrap();

        let repos = Arc::new(SeaOrmRepositoryProvider::new(db.clone()));
        let reservations = ReservationService::new(repos.clone(), create_event_bus());
        Fixture {
            db,
            reservations,
            repos,
        }
    }

    fn payments_with(
        repos: Arc<SeaOrmRepositoryProvider>,
        gateway: Arc<dyn PaymentGateway>,
    ) -> PaymentService {
        PaymentService::new(repos, gateway, create_event_bus())
    }

    fn at(hour: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, hour, min, 0).unwrap()
    }

    #[tokio::test]
    async fn initiate_on_missing_reservation_is_not_found() {
        let fx = setup().await;
        let service = payments_with(fx.repos.clone(), Arc::new(MockPaymentGateway));
        let err = service.initiate("u-1", 404, "card").await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn initiate_on_unpriced_reservation_is_rejected() {
        let fx = setup().await;
        let reservation = fx
            .reservations
            .create("u-1", 1, 1, at(10, 0), at(12, 0))
            .await
            .unwrap();

        let service = payments_with(fx.repos.clone(), Arc::new(MockPaymentGateway));
        let err = service
            .initiate("u-1", reservation.id, "card")
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
        // no payment row was written
        assert_eq!(payment::Entity::find().count(&fx.db).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn full_flow_create_acknowledge_pay() {
        let fx = setup().await;
        let reservation = fx
            .reservations
            .create("u-1", 1, 1, at(10, 0), at(12, 30))
            .await
            .unwrap();
        fx.reservations.acknowledge(reservation.id).await.unwrap();

        let service = payments_with(fx.repos.clone(), Arc::new(MockPaymentGateway));
        let paid = service.initiate("u-1", reservation.id, "card").await.unwrap();

        assert_eq!(paid.status, PaymentStatus::Completed);
        assert_eq!(paid.amount, 2400);
        let txn_id = paid.transaction_id.clone().unwrap();
        assert!(txn_id.starts_with("TXN-"));

        let stored = fx
            .repos
            .reservations()
            .find_by_id(reservation.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.status, ReservationStatus::Paid);

        // verify is read-only and finds the payment by its reference
        let verified = service.verify(&txn_id).await.unwrap();
        assert_eq!(verified.id, paid.id);
        assert_eq!(verified.status, PaymentStatus::Completed);
    }

    #[tokio::test]
    async fn initiate_on_paid_reservation_is_rejected() {
        let fx = setup().await;
        let reservation = fx
            .reservations
            .create("u-1", 1, 1, at(10, 0), at(12, 0))
            .await
            .unwrap();
        fx.reservations.acknowledge(reservation.id).await.unwrap();

        let service = payments_with(fx.repos.clone(), Arc::new(MockPaymentGateway));
        service.initiate("u-1", reservation.id, "card").await.unwrap();

        let err = service
            .initiate("u-1", reservation.id, "card")
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
        // only the original completed attempt exists
        assert_eq!(payment::Entity::find().count(&fx.db).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn declined_payment_leaves_reservation_untouched() {
        let fx = setup().await;
        let reservation = fx
            .reservations
            .create("u-1", 1, 1, at(10, 0), at(12, 0))
            .await
            .unwrap();
        fx.reservations.acknowledge(reservation.id).await.unwrap();

        let service = payments_with(fx.repos.clone(), Arc::new(DecliningGateway));
        let failed = service.initiate("u-1", reservation.id, "card").await.unwrap();

        assert_eq!(failed.status, PaymentStatus::Failed);
        assert_eq!(failed.transaction_id, None);

        let stored = fx
            .repos
            .reservations()
            .find_by_id(reservation.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.status, ReservationStatus::Active);
    }

    #[tokio::test]
    async fn verify_unknown_transaction_is_not_found() {
        let fx = setup().await;
        let service = payments_with(fx.repos.clone(), Arc::new(MockPaymentGateway));
        let err = service.verify("TXN-does-not-exist").await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
        assert_eq!(payment::Entity::find().count(&fx.db).await.unwrap(), 0);
    }
}
