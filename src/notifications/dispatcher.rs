//! Side-effect dispatcher
//!
//! Subscribes to the event bus and performs the deliveries a state
//! transition implies: notification rows, the ticket email, audit log
//! rows. Every failure is logged and swallowed; the request that
//! published the event has already returned by the time delivery runs.

use std::sync::Arc;

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, QueryFilter, Set};
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::{audit_log, notification, parking_slot, user};
use crate::notifications::event_bus::SharedEventBus;
use crate::notifications::events::{
    Event, PaymentEvent, ReservationAcknowledgedEvent, ReservationClosedEvent,
    ReservationRequestedEvent,
};
use crate::notifications::mailer::Mailer;

const RESERVATIONS_TABLE: &str = "reservations";
const PAYMENTS_TABLE: &str = "payments";

pub struct SideEffectDispatcher {
    db: DatabaseConnection,
    mailer: Arc<dyn Mailer>,
    event_bus: SharedEventBus,
}

impl SideEffectDispatcher {
    pub fn new(db: DatabaseConnection, mailer: Arc<dyn Mailer>, event_bus: SharedEventBus) -> Self {
        Self {
            db,
            mailer,
            event_bus,
        }
    }

    /// Spawn the dispatcher loop. Runs until the event bus is dropped.
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut subscriber = self.event_bus.subscribe();
            info!("Side-effect dispatcher started");
            while let Some(message) = subscriber.recv().await {
                let event_type = message.event.event_type();
                if let Err(e) = self.handle(&message.event).await {
                    warn!("Side effect delivery failed for {}: {}", event_type, e);
                }
            }
            info!("Side-effect dispatcher stopped");
        })
    }

    async fn handle(&self, event: &Event) -> DomainResult<()> {
        match event {
            Event::ReservationRequested(e) => self.on_reservation_requested(e).await,
            Event::ReservationAcknowledged(e) => self.on_reservation_acknowledged(e).await,
            Event::ReservationCancelled(e) => {
                self.notify(
                    &e.user_id,
                    "Your reservation was successfully cancelled!",
                    "reservation",
                )
                .await?;
                self.audit(e, "cancel").await
            }
            Event::ReservationRevoked(e) => {
                self.notify(
                    &e.user_id,
                    "Your reservation was revoked by admin.",
                    "reservation",
                )
                .await?;
                self.audit(e, "revoke").await
            }
            Event::PaymentCompleted(e) => self.on_payment(e, true).await,
            Event::PaymentFailed(e) => self.on_payment(e, false).await,
        }
    }

    async fn on_reservation_requested(&self, e: &ReservationRequestedEvent) -> DomainResult<()> {
        // Every admin gets a notification about the pending request
        let admins = user::Entity::find()
            .filter(user::Column::Role.eq(user::UserRole::Admin))
            .all(&self.db)
            .await
            .map_err(db_err)?;

        for admin in admins {
            self.notify(
                &admin.id,
                &format!("New reservation request from user #{}", e.user_id),
                "reservation",
            )
            .await?;
        }

        self.append_audit(
            Some(&e.user_id),
            RESERVATIONS_TABLE,
            Some(e.reservation_id.to_string()),
            "create",
            Some(format!("{{\"slotId\":{}}}", e.slot_id)),
        )
        .await
    }

    async fn on_reservation_acknowledged(
        &self,
        e: &ReservationAcknowledgedEvent,
    ) -> DomainResult<()> {
        self.notify(
            &e.user_id,
            "Your reservation was acknowledged by admin.",
            "reservation",
        )
        .await?;

        // Ticket email to the owner; best-effort like everything here
        let owner = user::Entity::find_by_id(&e.user_id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        let slot = parking_slot::Entity::find_by_id(e.slot_id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        if let Some(owner) = owner {
            let slot_number = slot.map(|s| s.slot_number).unwrap_or_default();
            let body = format!(
                "Hello {},\n\n\
                 Your parking reservation has been approved!\n\n\
                 Slot: {}\n\
                 Vehicle type: {}\n\
                 Duration: {} hour(s)\n\
                 Price per hour: {}\n\
                 Total price: {}\n\n\
                 Start: {}\n\
                 End: {}\n\n\
                 Thank you for using our service!",
                owner.first_name,
                slot_number,
                e.ticket.vehicle_type,
                e.ticket.duration_hours,
                e.ticket.price_per_hour,
                e.ticket.total_price,
                e.start_time.to_rfc3339(),
                e.end_time.to_rfc3339(),
            );
            self.mailer
                .send(&owner.email, "Your Parking Ticket", &body)
                .await?;
        }

        self.append_audit(
            Some(&e.user_id),
            RESERVATIONS_TABLE,
            Some(e.reservation_id.to_string()),
            "acknowledge",
            Some(format!("{{\"totalPrice\":{}}}", e.ticket.total_price)),
        )
        .await
    }

    async fn on_payment(&self, e: &PaymentEvent, completed: bool) -> DomainResult<()> {
        if completed {
            self.notify(
                &e.user_id,
                &format!("Payment for reservation #{} completed.", e.reservation_id),
                "payment",
            )
            .await?;
        }

        self.append_audit(
            Some(&e.user_id),
            PAYMENTS_TABLE,
            Some(e.payment_id.to_string()),
            if completed { "complete" } else { "fail" },
            e.transaction_id
                .as_ref()
                .map(|t| format!("{{\"transactionId\":\"{}\"}}", t)),
        )
        .await
    }

    // ── Delivery primitives ────────────────────────────────────

    async fn notify(&self, user_id: &str, message: &str, kind: &str) -> DomainResult<()> {
        notification::ActiveModel {
            id: NotSet,
            user_id: Set(user_id.to_string()),
            message: Set(message.to_string()),
            kind: Set(kind.to_string()),
            is_read: Set(false),
            created_at: Set(Utc::now()),
        }
        .insert(&self.db)
        .await
        .map_err(db_err)?;
        Ok(())
    }

    async fn audit(&self, e: &ReservationClosedEvent, action: &str) -> DomainResult<()> {
        self.append_audit(
            Some(&e.user_id),
            RESERVATIONS_TABLE,
            Some(e.reservation_id.to_string()),
            action,
            None,
        )
        .await
    }

    async fn append_audit(
        &self,
        user_id: Option<&str>,
        table_name: &str,
        record_id: Option<String>,
        action: &str,
        details: Option<String>,
    ) -> DomainResult<()> {
        audit_log::ActiveModel {
            id: NotSet,
            user_id: Set(user_id.map(String::from)),
            table_name: Set(table_name.to_string()),
            record_id: Set(record_id),
            action: Set(action.to_string()),
            details: Set(details),
            timestamp: Set(Utc::now()),
        }
        .insert(&self.db)
        .await
        .map_err(db_err)?;
        Ok(())
    }
}

fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::Database(e.to_string())
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::Utc;
    use sea_orm::{Database, EntityTrait, PaginatorTrait, Set};
    use sea_orm_migration::MigratorTrait;

    use super::*;
    use crate::infrastructure::database::migrator::Migrator;
    use crate::notifications::event_bus::create_event_bus;
    use crate::notifications::mailer::LogMailer;

    async fn setup_db() -> DatabaseConnection {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        Migrator::up(&db, None).await.unwrap();
        db
    }

    async fn insert_user(db: &DatabaseConnection, id: &str, role: user::UserRole) {
        user::ActiveModel {
            id: Set(id.to_string()),
            email: Set(format!("{}@example.com", id)),
            password_hash: Set("x".to_string()),
            first_name: Set("Test".to_string()),
            last_name: Set("User".to_string()),
            role: Set(role),
            is_active: Set(true),
            created_at: Set(Utc::now()),
            updated_at: Set(Utc::now()),
        }
        .insert(db)
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn requested_event_notifies_all_admins_and_audits() {
        let db = setup_db().await;
        insert_user(&db, "admin-1", user::UserRole::Admin).await;
        insert_user(&db, "admin-2", user::UserRole::Admin).await;
        insert_user(&db, "u-1", user::UserRole::User).await;

        let dispatcher =
            SideEffectDispatcher::new(db.clone(), Arc::new(LogMailer), create_event_bus());

        dispatcher
            .handle(&Event::ReservationRequested(ReservationRequestedEvent {
                reservation_id: 7,
                user_id: "u-1".to_string(),
                slot_id: 3,
                timestamp: Utc::now(),
            }))
            .await
            .unwrap();

        let notifications = notification::Entity::find().all(&db).await.unwrap();
        assert_eq!(notifications.len(), 2);
        assert!(notifications.iter().all(|n| n.kind == "reservation"));
        assert!(notifications
            .iter()
            .any(|n| n.user_id == "admin-1" && !n.is_read));

        let audits = audit_log::Entity::find().all(&db).await.unwrap();
        assert_eq!(audits.len(), 1);
        assert_eq!(audits[0].action, "create");
        assert_eq!(audits[0].table_name, "reservations");
        assert_eq!(audits[0].record_id.as_deref(), Some("7"));
    }

    #[tokio::test]
    async fn cancelled_event_notifies_owner() {
        let db = setup_db().await;
        insert_user(&db, "u-1", user::UserRole::User).await;

        let dispatcher =
            SideEffectDispatcher::new(db.clone(), Arc::new(LogMailer), create_event_bus());

        dispatcher
            .handle(&Event::ReservationCancelled(ReservationClosedEvent {
                reservation_id: 4,
                user_id: "u-1".to_string(),
                timestamp: Utc::now(),
            }))
            .await
            .unwrap();

        let notifications = notification::Entity::find().all(&db).await.unwrap();
        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0].user_id, "u-1");
        assert_eq!(
            notifications[0].message,
            "Your reservation was successfully cancelled!"
        );
        assert_eq!(audit_log::Entity::find().count(&db).await.unwrap(), 1);
    }
}
