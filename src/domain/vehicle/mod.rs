//! Vehicle aggregate

pub mod model;
pub mod repository;

pub use model::{Vehicle, VehicleType};
pub use repository::VehicleRepository;
