//! Domain layer - entities, status types and repository traits

pub mod error;
pub mod payment;
pub mod pricing;
pub mod repositories;
pub mod reservation;
pub mod slot;
pub mod vehicle;

// Re-export commonly used types
pub use error::{DomainError, DomainResult};
pub use payment::{
    GatewayOutcome, MockPaymentGateway, NewPayment, Payment, PaymentGateway, PaymentRepository,
    PaymentStatus,
};
pub use pricing::Ticket;
pub use repositories::RepositoryProvider;
pub use reservation::{
    NewReservation, Reservation, ReservationRepository, ReservationStatus,
};
pub use slot::{ParkingSlot, SlotRepository, SlotStatus};
pub use vehicle::{Vehicle, VehicleRepository, VehicleType};
