use tracing::debug;

use crate::distance::DistanceMatrix;
use crate::domain::InstanceError;

pub type VehicleId = usize;

/// A vehicle with a carrying capacity and a maximum total route distance.
///
/// Vehicles are independent resources; no ordering between them is assumed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vehicle {
    pub id: VehicleId,
    pub capacity: f64,
    pub range: f64,
}

/// A complete, immutable CVRP instance.
///
/// Node 0 is the depot; nodes `1..=num_clients` are clients. The distance
/// matrix is total over every ordered node pair, `demands[c - 1]` is the
/// demand of client `c`, and the depot never carries a demand entry.
#[derive(Debug, Clone)]
pub struct Instance {
    distances: DistanceMatrix,
    demands: Vec<f64>,
    vehicles: Vec<Vehicle>,
    num_clients: usize,
    fuel_efficiency: f64,
    fuel_price: f64,
}

impl Instance {
    pub fn new(
        distances: DistanceMatrix,
        demands: Vec<f64>,
        vehicles: Vec<Vehicle>,
        fuel_efficiency: f64,
        fuel_price: f64,
    ) -> Self {
        let num_clients = demands.len();
        Self {
            distances,
            demands,
            vehicles,
            num_clients,
            fuel_efficiency,
            fuel_price,
        }
    }

    pub fn num_clients(&self) -> usize {
        self.num_clients
    }

    /// Number of nodes including the depot.
    pub fn num_nodes(&self) -> usize {
        self.num_clients + 1
    }

    /// All node ids, depot first.
    pub fn nodes(&self) -> impl Iterator<Item = usize> + Clone {
        0..=self.num_clients
    }

    /// Client node ids only.
    pub fn clients(&self) -> impl Iterator<Item = usize> + Clone {
        1..=self.num_clients
    }

    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    pub fn distance(&self, from: usize, to: usize) -> f64 {
        self.distances.get(from, to)
    }

    pub fn distances(&self) -> &DistanceMatrix {
        &self.distances
    }

    /// Demand of client `c` (c in 1..=num_clients).
    pub fn demand(&self, c: usize) -> f64 {
        self.demands[c - 1]
    }

    pub fn fuel_efficiency(&self) -> f64 {
        self.fuel_efficiency
    }

    pub fn fuel_price(&self) -> f64 {
        self.fuel_price
    }

    /// Checks instance completeness before any model assembly.
    ///
    /// A failing instance never reaches the model builder proper: the build
    /// aborts here and no partially-built model is returned.
    pub fn validate(&self) -> Result<(), InstanceError> {
        if self.num_clients == 0 {
            return Err(InstanceError::NoClients);
        }

        if self.distances.size() != self.num_nodes() {
            return Err(InstanceError::DistanceMatrixDimension {
                expected: self.num_nodes(),
                found: self.distances.size(),
            });
        }
        for i in self.nodes() {
            for j in self.nodes() {
                let d = self.distances.get(i, j);
                if !d.is_finite() || d < 0.0 {
                    return Err(InstanceError::BadDistance {
                        from: i,
                        to: j,
                        value: d,
                    });
                }
            }
        }

        for c in self.clients() {
            match self.demands.get(c - 1) {
                None => return Err(InstanceError::MissingDemand { client: c }),
                Some(&d) if !d.is_finite() || d < 0.0 => {
                    return Err(InstanceError::BadDemand { client: c, value: d })
                }
                Some(_) => {}
            }
        }

        if self.vehicles.is_empty() {
            return Err(InstanceError::NoVehicles);
        }
        for v in &self.vehicles {
            if !v.capacity.is_finite() || v.capacity <= 0.0 {
                return Err(InstanceError::BadCapacity {
                    vehicle: v.id,
                    value: v.capacity,
                });
            }
            if !v.range.is_finite() || v.range <= 0.0 {
                return Err(InstanceError::BadRange {
                    vehicle: v.id,
                    value: v.range,
                });
            }
        }

        if !self.fuel_efficiency.is_finite() || self.fuel_efficiency <= 0.0 {
            return Err(InstanceError::BadFuelEfficiency {
                value: self.fuel_efficiency,
            });
        }
        if !self.fuel_price.is_finite() || self.fuel_price <= 0.0 {
            return Err(InstanceError::BadFuelPrice {
                value: self.fuel_price,
            });
        }

        debug!(
            "Instance validated: {} clients, {} vehicles",
            self.num_clients,
            self.vehicles.len()
        );
        Ok(())
    }
}
