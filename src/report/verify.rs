use crate::config::constant::FEASIBILITY_EPS;
use crate::domain::Instance;
use crate::model::CvrpModel;
use crate::solver::Assignment;

/// Result of checking a solved assignment against the routing rules.
#[derive(Debug, Clone, Default)]
pub struct Verification {
    pub violations: Vec<String>,
}

impl Verification {
    pub fn is_ok(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Re-checks a solver assignment against the instance: unique arrival and
/// departure per client, load windows for carga, load accumulation along
/// client-to-client arcs, and capacity/range per vehicle.
///
/// This is independent of the constraint records in the model, so it also
/// catches a builder that encoded the wrong algebra.
pub fn verify_solution(
    instance: &Instance,
    cm: &CvrpModel,
    assignment: &Assignment,
) -> Verification {
    let eps = FEASIBILITY_EPS;
    let mut report = Verification::default();
    let num_vehicles = instance.vehicles().len();

    // Unique arrival / departure across the whole fleet.
    for c in instance.clients() {
        let inbound: usize = (0..num_vehicles)
            .flat_map(|v| {
                instance
                    .nodes()
                    .filter(move |&i| i != c)
                    .map(move |i| (v, i))
            })
            .filter(|&(v, i)| assignment.is_one(cm.x(v, i, c)))
            .count();
        if inbound != 1 {
            report.violations
                .push(format!("client {} has {} inbound arcs", c, inbound));
        }

        let outbound: usize = (0..num_vehicles)
            .flat_map(|v| {
                instance
                    .nodes()
                    .filter(move |&j| j != c)
                    .map(move |j| (v, j))
            })
            .filter(|&(v, j)| assignment.is_one(cm.x(v, c, j)))
            .count();
        if outbound != 1 {
            report.violations
                .push(format!("client {} has {} outbound arcs", c, outbound));
        }
    }

    for (v, vehicle) in instance.vehicles().iter().enumerate() {
        // carga windows: pinned to 0 when unvisited, within
        // [demand, capacity] when visited.
        for c in instance.clients() {
            let visited = instance
                .nodes()
                .filter(|&i| i != c)
                .any(|i| assignment.is_one(cm.x(v, i, c)));
            let load = assignment.value(cm.carga(v, c));

            if visited {
                if load < instance.demand(c) - eps || load > vehicle.capacity + eps {
                    report.violations.push(format!(
                        "vehicle {} at client {}: load {} outside [{}, {}]",
                        vehicle.id,
                        c,
                        load,
                        instance.demand(c),
                        vehicle.capacity
                    ));
                }
            } else if load.abs() > eps {
                report.violations.push(format!(
                    "vehicle {} never visits client {} but carries load {}",
                    vehicle.id, c, load
                ));
            }
        }

        // Load accumulation along selected client-to-client arcs.
        for i in instance.clients() {
            for j in instance.clients().filter(|&j| j != i) {
                if assignment.is_one(cm.x(v, i, j)) {
                    let li = assignment.value(cm.carga(v, i));
                    let lj = assignment.value(cm.carga(v, j));
                    if lj < li + instance.demand(j) - eps {
                        report.violations.push(format!(
                            "vehicle {} arc ({}, {}): load {} -> {} skips demand {}",
                            vehicle.id,
                            i,
                            j,
                            li,
                            lj,
                            instance.demand(j)
                        ));
                    }
                }
            }
        }

        // Range: total distance over all selected arcs of this vehicle.
        let total_distance: f64 = instance
            .nodes()
            .flat_map(|i| instance.nodes().map(move |j| (i, j)))
            .filter(|&(i, j)| assignment.is_one(cm.x(v, i, j)))
            .map(|(i, j)| instance.distance(i, j))
            .sum();
        if total_distance > vehicle.range + eps {
            report.violations.push(format!(
                "vehicle {} travels {} beyond range {}",
                vehicle.id, total_distance, vehicle.range
            ));
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::DistanceMatrix;
    use crate::domain::Vehicle;
    use crate::model::build_model;

    fn instance_2x1() -> Instance {
        let dm = DistanceMatrix::from_data(
            3,
            vec![0.0, 4.0, 6.0, 4.0, 0.0, 3.0, 6.0, 3.0, 0.0],
        )
        .unwrap();
        Instance::new(
            dm,
            vec![5.0, 7.0],
            vec![Vehicle {
                id: 1,
                capacity: 20.0,
                range: 100.0,
            }],
            12.0,
            2.5,
        )
    }

    #[test]
    fn accepts_a_proper_route() {
        let inst = instance_2x1();
        let cm = build_model(&inst).unwrap();
        let mut values = vec![0.0; cm.model().num_variables()];
        values[cm.x(0, 0, 1).index()] = 1.0;
        values[cm.x(0, 1, 2).index()] = 1.0;
        values[cm.x(0, 2, 0).index()] = 1.0;
        values[cm.carga(0, 1).index()] = 5.0;
        values[cm.carga(0, 2).index()] = 12.0;
        let a = Assignment::from_values(values);

        let report = verify_solution(&inst, &cm, &a);
        assert!(report.is_ok(), "violations: {:?}", report.violations);
    }

    #[test]
    fn flags_unvisited_client() {
        let inst = instance_2x1();
        let cm = build_model(&inst).unwrap();
        let mut values = vec![0.0; cm.model().num_variables()];
        values[cm.x(0, 0, 1).index()] = 1.0;
        values[cm.x(0, 1, 0).index()] = 1.0;
        values[cm.carga(0, 1).index()] = 5.0;
        let a = Assignment::from_values(values);

        let report = verify_solution(&inst, &cm, &a);
        assert!(report
            .violations
            .iter()
            .any(|m| m.contains("client 2 has 0 inbound")));
    }

    #[test]
    fn flags_phantom_load_on_unused_vehicle() {
        let inst = Instance::new(
            instance_2x1().distances().clone(),
            vec![5.0, 7.0],
            vec![
                Vehicle {
                    id: 1,
                    capacity: 20.0,
                    range: 100.0,
                },
                Vehicle {
                    id: 2,
                    capacity: 15.0,
                    range: 80.0,
                },
            ],
            12.0,
            2.5,
        );
        let cm = build_model(&inst).unwrap();
        let mut values = vec![0.0; cm.model().num_variables()];
        values[cm.x(0, 0, 1).index()] = 1.0;
        values[cm.x(0, 1, 2).index()] = 1.0;
        values[cm.x(0, 2, 0).index()] = 1.0;
        values[cm.carga(0, 1).index()] = 5.0;
        values[cm.carga(0, 2).index()] = 12.0;
        // Load on a vehicle/client pair that is never visited.
        values[cm.carga(1, 1).index()] = 3.0;
        let a = Assignment::from_values(values);

        let report = verify_solution(&inst, &cm, &a);
        assert!(report
            .violations
            .iter()
            .any(|m| m.contains("never visits client 1")));
    }

    #[test]
    fn flags_load_that_skips_demand() {
        let inst = instance_2x1();
        let cm = build_model(&inst).unwrap();
        let mut values = vec![0.0; cm.model().num_variables()];
        values[cm.x(0, 0, 1).index()] = 1.0;
        values[cm.x(0, 1, 2).index()] = 1.0;
        values[cm.x(0, 2, 0).index()] = 1.0;
        values[cm.carga(0, 1).index()] = 5.0;
        values[cm.carga(0, 2).index()] = 8.0; // needs >= 5 + 7
        let a = Assignment::from_values(values);

        let report = verify_solution(&inst, &cm, &a);
        assert!(report
            .violations
            .iter()
            .any(|m| m.contains("skips demand")));
    }
}
