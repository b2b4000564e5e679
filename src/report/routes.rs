use tracing::warn;

use crate::config::constant::DEPOT;
use crate::domain::{Instance, VehicleId};
use crate::model::CvrpModel;
use crate::solver::Assignment;

/// One vehicle's route as an ordered node sequence.
///
/// A used vehicle's sequence starts and ends at the depot; an unused
/// vehicle has an empty sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct VehicleRoute {
    pub vehicle: VehicleId,
    pub nodes: Vec<usize>,
}

impl VehicleRoute {
    pub fn is_used(&self) -> bool {
        !self.nodes.is_empty()
    }

    /// Clients on this route, in visiting order.
    pub fn clients(&self) -> impl Iterator<Item = usize> + '_ {
        self.nodes.iter().copied().filter(|&n| n != DEPOT)
    }

    pub fn total_load(&self, instance: &Instance) -> f64 {
        self.clients().map(|c| instance.demand(c)).sum()
    }

    pub fn total_distance(&self, instance: &Instance) -> f64 {
        self.nodes
            .windows(2)
            .map(|leg| instance.distance(leg[0], leg[1]))
            .sum()
    }
}

fn next_node(
    cm: &CvrpModel,
    instance: &Instance,
    assignment: &Assignment,
    v: usize,
    from: usize,
) -> Option<usize> {
    instance
        .nodes()
        .filter(|&j| j != from)
        .find(|&j| assignment.is_one(cm.x(v, from, j)))
}

/// Walks the selected arcs of every vehicle, depot outward, and returns the
/// per-vehicle routes. Self-loop arcs are ignored; a walk that fails to
/// return to the depot (malformed assignment) is cut off and logged.
pub fn extract_routes(
    cm: &CvrpModel,
    instance: &Instance,
    assignment: &Assignment,
) -> Vec<VehicleRoute> {
    let mut routes = Vec::with_capacity(instance.vehicles().len());

    for (v, vehicle) in instance.vehicles().iter().enumerate() {
        let mut nodes = Vec::new();

        if let Some(first) = next_node(cm, instance, assignment, v, DEPOT) {
            nodes.push(DEPOT);
            nodes.push(first);
            let mut current = first;
            // A simple route revisits no client, so num_nodes legs suffice.
            for _ in 0..instance.num_nodes() {
                match next_node(cm, instance, assignment, v, current) {
                    Some(next) => {
                        nodes.push(next);
                        current = next;
                        if next == DEPOT {
                            break;
                        }
                    }
                    None => break,
                }
            }
            if current != DEPOT {
                warn!(
                    "Vehicle {} route never returned to the depot: {:?}",
                    vehicle.id, nodes
                );
            }
        }

        routes.push(VehicleRoute {
            vehicle: vehicle.id,
            nodes,
        });
    }

    routes
}
