//! # ParkPoint
//!
//! REST backend for a parking vehicle management system: users, vehicles,
//! parking slots, reservations, payments, notifications and audit logs.
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: Core business entities, status types and repository traits
//! - **application**: Use-case services (reservation lifecycle, payments)
//! - **infrastructure**: External concerns (database, crypto)
//! - **notifications**: Event bus + side-effect dispatcher (notifications,
//!   ticket emails, audit trail)
//! - **interfaces**: REST API with Swagger documentation

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod notifications;

pub use config::{default_config_path, AppConfig};

// Re-export database types for easy access
pub use infrastructure::{init_database, DatabaseConfig, SeaOrmRepositoryProvider};

// Re-export API router
pub use interfaces::http::create_api_router;

// Re-export notifications
pub use notifications::{create_event_bus, Event, EventBus, SharedEventBus};
