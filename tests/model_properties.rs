//! End-to-end properties of the CVRP formulation, checked with a tiny
//! exhaustive reference solver: binaries by bit enumeration, load variables
//! on an integer grid. Only usable for toy instances, which is exactly what
//! these scenarios are.

use std::time::Instant;

use cvrp_milp::distance::DistanceMatrix;
use cvrp_milp::domain::{Instance, Vehicle};
use cvrp_milp::model::{build_model, Model, VarType};
use cvrp_milp::report::{extract_routes, verify_solution};
use cvrp_milp::solver::{Assignment, MilpSolver, SolveOptions, SolveOutcome};

struct ExhaustiveSolver {
    /// Upper end of the integer grid for every continuous variable.
    max_load: usize,
}

impl ExhaustiveSolver {
    fn new(max_load: usize) -> Self {
        Self { max_load }
    }
}

impl MilpSolver for ExhaustiveSolver {
    fn solve(&self, model: &Model, options: &SolveOptions) -> anyhow::Result<SolveOutcome> {
        let start = Instant::now();
        let eps = options.feasibility_eps;

        let bin_idx: Vec<usize> = model
            .variables()
            .iter()
            .enumerate()
            .filter(|(_, v)| v.vtype == VarType::Binary)
            .map(|(i, _)| i)
            .collect();
        let cont_idx: Vec<usize> = model
            .variables()
            .iter()
            .enumerate()
            .filter(|(_, v)| v.vtype == VarType::Continuous)
            .map(|(i, _)| i)
            .collect();
        assert!(bin_idx.len() <= 24, "instance too large for enumeration");

        let mut best: Option<(Vec<f64>, f64)> = None;

        for combo in 0u64..(1u64 << bin_idx.len()) {
            if let Some(limit) = options.time_limit {
                if start.elapsed() >= limit {
                    return Ok(SolveOutcome::TimedOut);
                }
            }

            let mut values = vec![0.0; model.num_variables()];
            for (k, &vi) in bin_idx.iter().enumerate() {
                if (combo >> k) & 1 == 1 {
                    values[vi] = 1.0;
                }
            }

            // Constraints over binaries alone cannot be repaired by any
            // choice of load values; skip the whole grid for this combo.
            let binary_only_violation = model.constraints().iter().any(|c| {
                !c.satisfied(&values, eps)
                    && c.lhs
                        .terms()
                        .iter()
                        .all(|&(_, var)| model.variable(var).vtype == VarType::Binary)
            });
            if binary_only_violation {
                continue;
            }

            let mut grid = vec![0usize; cont_idx.len()];
            loop {
                for (k, &vi) in cont_idx.iter().enumerate() {
                    values[vi] = grid[k] as f64;
                }

                if model.is_feasible(&values, eps) {
                    let obj = model.objective_value(&values);
                    if best.as_ref().map_or(true, |(_, b)| obj < b - 1e-9) {
                        best = Some((values.clone(), obj));
                    }
                }

                // Odometer increment over the load grid.
                let mut pos = 0;
                loop {
                    if pos == grid.len() {
                        break;
                    }
                    grid[pos] += 1;
                    if grid[pos] <= self.max_load {
                        break;
                    }
                    grid[pos] = 0;
                    pos += 1;
                }
                if pos == grid.len() {
                    break;
                }
            }
        }

        Ok(match best {
            Some((values, objective)) => SolveOutcome::Optimal {
                assignment: Assignment::from_values(values),
                objective,
            },
            None => SolveOutcome::Infeasible,
        })
    }
}

fn single_client_instance(demand: f64, capacity: f64) -> Instance {
    let dm = DistanceMatrix::from_data(2, vec![0.0, 10.0, 10.0, 0.0]).unwrap();
    Instance::new(
        dm,
        vec![demand],
        vec![Vehicle {
            id: 1,
            capacity,
            range: 100.0,
        }],
        10.0, // km per fuel unit
        3.0,  // price per fuel unit
    )
}

#[test]
fn scenario_single_client_round_trip_is_optimal() {
    let inst = single_client_instance(5.0, 10.0);
    let cvrp = build_model(&inst).unwrap();

    let outcome = ExhaustiveSolver::new(10)
        .solve(cvrp.model(), &SolveOptions::default())
        .unwrap();

    let (assignment, objective) = match outcome {
        SolveOutcome::Optimal {
            assignment,
            objective,
        } => (assignment, objective),
        other => panic!("expected an optimal outcome, got {:?}", other),
    };

    // Each leg costs 10 km + 15 minutes + 1 fuel unit at price 3.
    let expected = 2.0 * (10.0 + (10.0 / 40.0) * 60.0 + (10.0 / 10.0) * 3.0);
    assert!((objective - expected).abs() < 1e-9, "objective {}", objective);
    assert!(
        (cvrp.model().objective_value(assignment.values()) - objective).abs() < 1e-12,
        "objective must re-evaluate to the same value"
    );

    assert!(assignment.is_one(cvrp.x(0, 0, 1)));
    assert!(assignment.is_one(cvrp.x(0, 1, 0)));
    assert_eq!(assignment.value(cvrp.carga(0, 1)), 5.0);

    let routes = extract_routes(&cvrp, &inst, &assignment);
    assert_eq!(routes[0].nodes, vec![0, 1, 0]);
    assert!(verify_solution(&inst, &cvrp, &assignment).is_ok());
}

#[test]
fn scenario_oversized_demand_is_infeasible_not_a_crash() {
    // One client demanding more than the only vehicle can carry: the model
    // builds fine, the solve reports infeasibility.
    let inst = single_client_instance(15.0, 10.0);
    let cvrp = build_model(&inst).unwrap();

    let outcome = ExhaustiveSolver::new(20)
        .solve(cvrp.model(), &SolveOptions::default())
        .unwrap();
    assert_eq!(outcome, SolveOutcome::Infeasible);
}

#[test]
fn scenario_out_of_range_client_is_infeasible() {
    let dm = DistanceMatrix::from_data(2, vec![0.0, 80.0, 80.0, 0.0]).unwrap();
    let inst = Instance::new(
        dm,
        vec![5.0],
        vec![Vehicle {
            id: 1,
            capacity: 10.0,
            range: 100.0, // round trip needs 160
        }],
        10.0,
        3.0,
    );
    let cvrp = build_model(&inst).unwrap();

    let outcome = ExhaustiveSolver::new(10)
        .solve(cvrp.model(), &SolveOptions::default())
        .unwrap();
    assert_eq!(outcome, SolveOutcome::Infeasible);
}

#[test]
fn timeout_is_reported_as_its_own_outcome() {
    let inst = single_client_instance(5.0, 10.0);
    let cvrp = build_model(&inst).unwrap();

    let options = SolveOptions {
        time_limit: Some(std::time::Duration::ZERO),
        ..SolveOptions::default()
    };
    let outcome = ExhaustiveSolver::new(10)
        .solve(cvrp.model(), &options)
        .unwrap();
    assert_eq!(outcome, SolveOutcome::TimedOut);
}

#[test]
fn two_clients_one_vehicle_tours_both() {
    let dm =
        DistanceMatrix::from_data(3, vec![0.0, 4.0, 6.0, 4.0, 0.0, 3.0, 6.0, 3.0, 0.0]).unwrap();
    let inst = Instance::new(
        dm,
        vec![5.0, 7.0],
        vec![Vehicle {
            id: 1,
            capacity: 20.0,
            range: 100.0,
        }],
        10.0,
        3.0,
    );
    let cvrp = build_model(&inst).unwrap();

    let outcome = ExhaustiveSolver::new(12)
        .solve(cvrp.model(), &SolveOptions::default())
        .unwrap();

    let assignment = match outcome {
        SolveOutcome::Optimal { assignment, .. } => assignment,
        other => panic!("expected an optimal outcome, got {:?}", other),
    };

    let routes = extract_routes(&cvrp, &inst, &assignment);
    // Single vehicle must chain both clients in one tour (4 + 3 + 6 = 13 km
    // beats two separate round trips at 8 + 12 = 20 km).
    let tour = &routes[0].nodes;
    assert!(
        *tour == vec![0, 1, 2, 0] || *tour == vec![0, 2, 1, 0],
        "unexpected tour {:?}",
        tour
    );
    assert!(verify_solution(&inst, &cvrp, &assignment).is_ok());
}

#[test]
fn co_located_clients_still_visited_exactly_once() {
    // Both clients sit on the depot: all distances zero. The formulation
    // must not divide by zero and must still route every client.
    let inst = Instance::new(
        DistanceMatrix::new(3),
        vec![5.0, 7.0],
        vec![Vehicle {
            id: 1,
            capacity: 20.0,
            range: 100.0,
        }],
        10.0,
        3.0,
    );
    let cvrp = build_model(&inst).unwrap();

    let outcome = ExhaustiveSolver::new(12)
        .solve(cvrp.model(), &SolveOptions::default())
        .unwrap();

    let (assignment, objective) = match outcome {
        SolveOutcome::Optimal {
            assignment,
            objective,
        } => (assignment, objective),
        other => panic!("expected an optimal outcome, got {:?}", other),
    };
    assert_eq!(objective, 0.0);
    assert!(verify_solution(&inst, &cvrp, &assignment).is_ok());
}
