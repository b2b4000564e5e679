//! Domain types: vehicles, the routing instance, and instance errors.

mod error;
mod types;

pub use error::InstanceError;
pub use types::{Instance, Vehicle, VehicleId};
