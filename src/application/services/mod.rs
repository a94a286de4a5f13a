//! Use-case services over the repository provider

pub mod payment;
pub mod reservation;

pub use payment::PaymentService;
pub use reservation::ReservationService;
