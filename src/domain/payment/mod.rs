//! Payment aggregate

pub mod gateway;
pub mod model;
pub mod repository;

pub use gateway::{GatewayOutcome, MockPaymentGateway, PaymentGateway};
pub use model::{NewPayment, Payment, PaymentStatus};
pub use repository::PaymentRepository;
