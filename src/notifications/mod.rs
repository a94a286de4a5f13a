//! Side-effect dispatch
//!
//! Core services publish typed events on the bus; the dispatcher task
//! consumes them and owns delivery (notification rows, ticket emails,
//! audit rows). Delivery failures are logged and never reach the
//! request that produced the event.

pub mod dispatcher;
pub mod event_bus;
pub mod events;
pub mod mailer;

pub use dispatcher::SideEffectDispatcher;
pub use event_bus::{create_event_bus, EventBus, EventSubscriber, SharedEventBus};
pub use events::{Event, EventMessage};
pub use mailer::{LogMailer, Mailer, SmtpMailer};
