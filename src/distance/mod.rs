//! Geographic distance computation and the pairwise distance matrix.

pub mod haversine;
pub mod matrix;

pub use haversine::haversine_km;
pub use matrix::DistanceMatrix;
