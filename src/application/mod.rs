//! Application layer - use-case services

pub mod services;

pub use services::{PaymentService, ReservationService};
