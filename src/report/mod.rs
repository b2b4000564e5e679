//! Result presentation: route extraction from a solved assignment,
//! post-solve verification, console report and verification-file export.

pub mod export;
pub mod routes;
pub mod verify;

pub use routes::{extract_routes, VehicleRoute};
pub use verify::{verify_solution, Verification};
