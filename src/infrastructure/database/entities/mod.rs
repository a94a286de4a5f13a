//! Database entities module

pub mod audit_log;
pub mod notification;
pub mod parking_slot;
pub mod payment;
pub mod reservation;
pub mod user;
pub mod vehicle;

pub use audit_log::Entity as AuditLog;
pub use notification::Entity as Notification;
pub use parking_slot::Entity as ParkingSlot;
pub use payment::Entity as Payment;
pub use reservation::Entity as Reservation;
pub use user::Entity as User;
pub use vehicle::Entity as Vehicle;
