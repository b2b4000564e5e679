use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::info;

use crate::distance::DistanceMatrix;
use crate::domain::{Instance, Vehicle};

// Fixture geography: a box around central Bogotá.
const CENTER_LAT: f64 = 4.60;
const CENTER_LON: f64 = -74.08;
const SPREAD_DEG: f64 = 0.15;

/// Generates a reproducible random instance for demos and tests.
///
/// Clients are scattered around a fixed urban center, demands fall in
/// [1, 10], and the fleet is sized so total capacity exceeds total demand
/// (the generated instance is meant to be solvable, not adversarial).
pub fn generate_random_instance(num_clients: usize, num_vehicles: usize, seed: u64) -> Instance {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let mut points = Vec::with_capacity(num_clients + 1);
    points.push((CENTER_LAT, CENTER_LON)); // depot
    for _ in 0..num_clients {
        points.push((
            CENTER_LAT + rng.gen_range(-SPREAD_DEG..SPREAD_DEG),
            CENTER_LON + rng.gen_range(-SPREAD_DEG..SPREAD_DEG),
        ));
    }

    let demands: Vec<f64> = (0..num_clients)
        .map(|_| rng.gen_range(1.0..=10.0))
        .collect();
    let total_demand: f64 = demands.iter().sum();

    let per_vehicle = (total_demand / num_vehicles as f64) * 1.5;
    let vehicles: Vec<Vehicle> = (1..=num_vehicles)
        .map(|id| Vehicle {
            id,
            capacity: per_vehicle.ceil(),
            range: rng.gen_range(200.0..500.0),
        })
        .collect();

    info!(
        "Generated fixture instance: {} clients (total demand {:.1}), {} vehicles of capacity {:.1}",
        num_clients,
        total_demand,
        num_vehicles,
        per_vehicle.ceil()
    );

    Instance::new(
        DistanceMatrix::from_coordinates(&points),
        demands,
        vehicles,
        12.0, // km per unit of fuel
        2.5,  // price per unit of fuel
    )
}
