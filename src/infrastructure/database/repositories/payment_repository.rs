//! SeaORM implementation of PaymentRepository

use async_trait::async_trait;
use chrono::Utc;
use log::debug;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, QueryFilter, Set,
    TransactionTrait,
};

use crate::domain::payment::{NewPayment, Payment, PaymentRepository, PaymentStatus};
use crate::domain::reservation::ReservationStatus;
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::{payment, reservation};

use super::slot_repository::db_err;

pub struct SeaOrmPaymentRepository {
    db: DatabaseConnection,
}

impl SeaOrmPaymentRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

pub(crate) fn model_to_domain(m: payment::Model) -> Payment {
    Payment {
        id: m.id,
        user_id: m.user_id,
        reservation_id: m.reservation_id,
        amount: m.amount,
        status: PaymentStatus::parse(&m.status),
        transaction_id: m.transaction_id,
        payment_method: m.payment_method,
        payment_date: m.payment_date,
    }
}

#[async_trait]
impl PaymentRepository for SeaOrmPaymentRepository {
    async fn create_pending(&self, new: NewPayment) -> DomainResult<Payment> {
        debug!(
            "Creating payment attempt: reservation={} amount={}",
            new.reservation_id, new.amount
        );

        let inserted = payment::ActiveModel {
            id: NotSet,
            user_id: Set(new.user_id),
            reservation_id: Set(new.reservation_id),
            amount: Set(new.amount),
            status: Set(PaymentStatus::Pending.as_str().to_string()),
            transaction_id: Set(None),
            payment_method: Set(new.payment_method),
            payment_date: Set(Utc::now()),
        }
        .insert(&self.db)
        .await
        .map_err(db_err)?;

        Ok(model_to_domain(inserted))
    }

    async fn complete(
        &self,
        payment_id: i32,
        transaction_id: &str,
        reservation_id: i32,
    ) -> DomainResult<Payment> {
        debug!(
            "Completing payment {} for reservation {}",
            payment_id, reservation_id
        );

        let txn = self.db.begin().await.map_err(db_err)?;

        let existing = payment::Entity::find_by_id(payment_id)
            .one(&txn)
            .await
            .map_err(db_err)?
            .ok_or_else(|| DomainError::not_found("Payment", "id", payment_id))?;

        let mut active: payment::ActiveModel = existing.into();
        active.status = Set(PaymentStatus::Completed.as_str().to_string());
        active.transaction_id = Set(Some(transaction_id.to_string()));
        let updated = active.update(&txn).await.map_err(db_err)?;

        let res = reservation::Entity::find_by_id(reservation_id)
            .one(&txn)
            .await
            .map_err(db_err)?
            .ok_or_else(|| DomainError::not_found("Reservation", "id", reservation_id))?;

        let mut res_active: reservation::ActiveModel = res.into();
        res_active.status = Set(ReservationStatus::Paid.as_str().to_string());
        res_active.updated_at = Set(Utc::now());
        res_active.update(&txn).await.map_err(db_err)?;

        txn.commit().await.map_err(db_err)?;
        Ok(model_to_domain(updated))
    }

    async fn mark_failed(&self, payment_id: i32) -> DomainResult<Payment> {
        debug!("Marking payment {} failed", payment_id);

        let existing = payment::Entity::find_by_id(payment_id)
            .one(&self.db)
            .await
            .map_err(db_err)?
            .ok_or_else(|| DomainError::not_found("Payment", "id", payment_id))?;

        let mut active: payment::ActiveModel = existing.into();
        active.status = Set(PaymentStatus::Failed.as_str().to_string());
        let updated = active.update(&self.db).await.map_err(db_err)?;
        Ok(model_to_domain(updated))
    }

    async fn find_by_transaction_id(
        &self,
        transaction_id: &str,
    ) -> DomainResult<Option<Payment>> {
        let model = payment::Entity::find()
            .filter(payment::Column::TransactionId.eq(transaction_id))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }
}
