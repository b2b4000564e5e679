use std::fmt;

/// Configuration errors found while assembling or validating an instance.
///
/// All of these are fatal: the model builder refuses to emit a partial model
/// when any of them is present.
#[derive(Debug, Clone, PartialEq)]
pub enum InstanceError {
    /// num_clients must be at least 1.
    NoClients,
    /// The distance matrix does not cover all (num_clients + 1)^2 pairs.
    DistanceMatrixDimension { expected: usize, found: usize },
    /// A distance entry is negative or not finite.
    BadDistance { from: usize, to: usize, value: f64 },
    /// A demand entry is missing for the given client.
    MissingDemand { client: usize },
    /// A demand entry is negative or not finite.
    BadDemand { client: usize, value: f64 },
    /// No vehicles were supplied.
    NoVehicles,
    /// A vehicle has a non-positive capacity.
    BadCapacity { vehicle: usize, value: f64 },
    /// A vehicle has a non-positive range.
    BadRange { vehicle: usize, value: f64 },
    /// fuel_efficiency must be strictly positive.
    BadFuelEfficiency { value: f64 },
    /// fuel_price must be strictly positive.
    BadFuelPrice { value: f64 },
    /// A required row is missing from the parameter table.
    MissingParameter { name: &'static str },
}

impl fmt::Display for InstanceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InstanceError::NoClients => write!(f, "instance has no clients"),
            InstanceError::DistanceMatrixDimension { expected, found } => write!(
                f,
                "distance matrix covers {} nodes, instance needs {}",
                found, expected
            ),
            InstanceError::BadDistance { from, to, value } => {
                write!(f, "distance ({}, {}) is invalid: {}", from, to, value)
            }
            InstanceError::MissingDemand { client } => {
                write!(f, "no demand entry for client {}", client)
            }
            InstanceError::BadDemand { client, value } => {
                write!(f, "demand for client {} is invalid: {}", client, value)
            }
            InstanceError::NoVehicles => write!(f, "instance has no vehicles"),
            InstanceError::BadCapacity { vehicle, value } => {
                write!(f, "capacity for vehicle {} must be positive, got {}", vehicle, value)
            }
            InstanceError::BadRange { vehicle, value } => {
                write!(f, "range for vehicle {} must be positive, got {}", vehicle, value)
            }
            InstanceError::BadFuelEfficiency { value } => {
                write!(f, "fuel efficiency must be positive, got {}", value)
            }
            InstanceError::BadFuelPrice { value } => {
                write!(f, "fuel price must be positive, got {}", value)
            }
            InstanceError::MissingParameter { name } => {
                write!(f, "parameter table has no '{}' row", name)
            }
        }
    }
}

impl std::error::Error for InstanceError {}
