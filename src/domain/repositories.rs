//! Unified repository access
//!
//! Services depend on this trait instead of individual repository
//! implementations, so storage can be swapped wholesale in tests.

use crate::domain::payment::PaymentRepository;
use crate::domain::reservation::ReservationRepository;
use crate::domain::slot::SlotRepository;
use crate::domain::vehicle::VehicleRepository;

/// Per-aggregate repository accessors behind one provider.
pub trait RepositoryProvider: Send + Sync {
    fn slots(&self) -> &dyn SlotRepository;

    fn vehicles(&self) -> &dyn VehicleRepository;

    fn reservations(&self) -> &dyn ReservationRepository;

    fn payments(&self) -> &dyn PaymentRepository;
}
