//! Side-effect events
//!
//! Defines the intents the core services emit after a state transition.
//! The dispatcher turns them into notification rows, emails and audit
//! log entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::pricing::Ticket;

/// Event types for side-effect dispatch
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum Event {
    /// A reservation was created and awaits acknowledgement
    ReservationRequested(ReservationRequestedEvent),
    /// An admin acknowledged a reservation and a ticket was priced
    ReservationAcknowledged(ReservationAcknowledgedEvent),
    /// The owner cancelled their reservation
    ReservationCancelled(ReservationClosedEvent),
    /// An admin revoked a reservation
    ReservationRevoked(ReservationClosedEvent),
    /// A payment attempt completed successfully
    PaymentCompleted(PaymentEvent),
    /// A payment attempt was declined by the gateway
    PaymentFailed(PaymentEvent),
}

impl Event {
    /// Get the event type name
    pub fn event_type(&self) -> &'static str {
        match self {
            Event::ReservationRequested(_) => "reservation_requested",
            Event::ReservationAcknowledged(_) => "reservation_acknowledged",
            Event::ReservationCancelled(_) => "reservation_cancelled",
            Event::ReservationRevoked(_) => "reservation_revoked",
            Event::PaymentCompleted(_) => "payment_completed",
            Event::PaymentFailed(_) => "payment_failed",
        }
    }

    /// The user the event concerns (the reservation/payment owner)
    pub fn user_id(&self) -> &str {
        match self {
            Event::ReservationRequested(e) => &e.user_id,
            Event::ReservationAcknowledged(e) => &e.user_id,
            Event::ReservationCancelled(e) => &e.user_id,
            Event::ReservationRevoked(e) => &e.user_id,
            Event::PaymentCompleted(e) => &e.user_id,
            Event::PaymentFailed(e) => &e.user_id,
        }
    }
}

/// Reservation created event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservationRequestedEvent {
    pub reservation_id: i32,
    pub user_id: String,
    pub slot_id: i32,
    pub timestamp: DateTime<Utc>,
}

/// Reservation acknowledged event, carries the priced ticket
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservationAcknowledgedEvent {
    pub reservation_id: i32,
    pub user_id: String,
    pub slot_id: i32,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub ticket: Ticket,
    pub timestamp: DateTime<Utc>,
}

/// Terminal reservation transition (cancelled or revoked)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservationClosedEvent {
    pub reservation_id: i32,
    pub user_id: String,
    pub timestamp: DateTime<Utc>,
}

/// Payment attempt outcome event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentEvent {
    pub payment_id: i32,
    pub reservation_id: i32,
    pub user_id: String,
    pub amount: i64,
    pub transaction_id: Option<String>,
    pub timestamp: DateTime<Utc>,
}

/// Wrapper for sending events with metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventMessage {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    #[serde(flatten)]
    pub event: Event,
}

impl EventMessage {
    pub fn new(event: Event) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            event,
        }
    }
}
