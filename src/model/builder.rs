//! CVRP model builder: variables, objective, and the constraint families,
//! assembled in one pass from a validated instance.

use itertools::Itertools;
use tracing::info;

use crate::config::constant::{DEPOT, SPEED_KMH};
use crate::domain::{Instance, InstanceError};
use crate::model::linear::{LinExpr, Model, Sense, VarId};

/// The assembled MILP together with the variable index maps.
///
/// `x(v, i, j)` addresses the arc-selection binary for the v-th vehicle of
/// the fleet (fleet position, not external id) traversing arc (i, j);
/// `carga(v, c)` the onboard load right after client `c`. The x block is
/// dense over all ordered node pairs including i == j, matching the declared
/// variable space of the formulation: self-loops are never explicitly
/// forbidden, only suppressed by the flow constraints and zero diagonal
/// distances.
#[derive(Debug, Clone)]
pub struct CvrpModel {
    model: Model,
    x: Vec<VarId>,
    carga: Vec<VarId>,
    num_nodes: usize,
    num_vehicles: usize,
}

impl CvrpModel {
    pub fn model(&self) -> &Model {
        &self.model
    }

    pub fn into_model(self) -> Model {
        self.model
    }

    pub fn num_vehicles(&self) -> usize {
        self.num_vehicles
    }

    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    fn x_index(&self, v: usize, i: usize, j: usize) -> usize {
        debug_assert!(v < self.num_vehicles);
        debug_assert!(i < self.num_nodes);
        debug_assert!(j < self.num_nodes);
        v * self.num_nodes * self.num_nodes + i * self.num_nodes + j
    }

    /// Arc-selection variable x[v,i,j].
    pub fn x(&self, v: usize, i: usize, j: usize) -> VarId {
        self.x[self.x_index(v, i, j)]
    }

    fn carga_index(&self, v: usize, c: usize) -> usize {
        debug_assert!(v < self.num_vehicles);
        debug_assert!(c >= 1 && c < self.num_nodes);
        v * (self.num_nodes - 1) + (c - 1)
    }

    /// Load variable carga[v,c], clients only.
    pub fn carga(&self, v: usize, c: usize) -> VarId {
        self.carga[self.carga_index(v, c)]
    }
}

/// Builds the complete CVRP MILP from a validated instance.
///
/// Fails with a configuration error before any constraint assembly when the
/// instance is incomplete; no partial model is ever returned. The build is a
/// pure function of the instance: two calls produce structurally identical
/// models.
pub fn build_model(instance: &Instance) -> Result<CvrpModel, InstanceError> {
    instance.validate()?;

    let mut cm = declare_variables(instance);
    assemble_objective(instance, &mut cm);

    add_unique_arrival(instance, &mut cm);
    add_unique_departure(instance, &mut cm);
    add_depot_departure_cap(instance, &mut cm);
    add_depot_return_cap(instance, &mut cm);
    add_flow_balance(instance, &mut cm);
    add_load_lower_link(instance, &mut cm);
    add_load_upper_link(instance, &mut cm);
    add_mtz(instance, &mut cm);
    add_load_ceiling(instance, &mut cm);
    add_range_limit(instance, &mut cm);

    info!(
        "Built CVRP model: {} variables, {} constraints",
        cm.model.num_variables(),
        cm.model.num_constraints()
    );
    Ok(cm)
}

fn declare_variables(instance: &Instance) -> CvrpModel {
    let num_nodes = instance.num_nodes();
    let num_vehicles = instance.vehicles().len();
    let mut model = Model::new();

    let mut x = Vec::with_capacity(num_vehicles * num_nodes * num_nodes);
    for vehicle in instance.vehicles() {
        for i in instance.nodes() {
            for j in instance.nodes() {
                x.push(model.add_binary(format!("x_{}_{}_{}", vehicle.id, i, j)));
            }
        }
    }

    let mut carga = Vec::with_capacity(num_vehicles * (num_nodes - 1));
    for vehicle in instance.vehicles() {
        for c in instance.clients() {
            carga.push(model.add_continuous(
                format!("carga_{}_{}", vehicle.id, c),
                0.0,
                f64::INFINITY,
            ));
        }
    }

    let cm = CvrpModel {
        model,
        x,
        carga,
        num_nodes,
        num_vehicles,
    };
    debug_assert_eq!(
        cm.x.len() + cm.carga.len(),
        cm.model.num_variables()
    );
    cm
}

/// Arc cost: distance + time in minutes at the fixed speed + fuel cost.
///
/// The three terms live in different units (km, minutes, currency) and are
/// summed without normalization; this scalarization is part of the model's
/// observable behavior and is reproduced as-is.
pub fn arc_cost(instance: &Instance, i: usize, j: usize) -> f64 {
    let d = instance.distance(i, j);
    d + (d / SPEED_KMH) * 60.0 + (d / instance.fuel_efficiency()) * instance.fuel_price()
}

fn assemble_objective(instance: &Instance, cm: &mut CvrpModel) {
    let mut obj = LinExpr::new();
    for v in 0..cm.num_vehicles {
        for i in instance.nodes() {
            for j in instance.nodes() {
                obj.add_term(arc_cost(instance, i, j), cm.x(v, i, j));
            }
        }
    }
    cm.model.set_objective(obj);
}

/// Every client is entered exactly once, over all vehicles.
fn add_unique_arrival(instance: &Instance, cm: &mut CvrpModel) {
    for c in instance.clients() {
        let mut lhs = LinExpr::new();
        for v in 0..cm.num_vehicles {
            for i in instance.nodes().filter(|&i| i != c) {
                lhs.add_term(1.0, cm.x(v, i, c));
            }
        }
        cm.model
            .add_constr(format!("unique_arrival_{}", c), lhs, Sense::Eq, 1.0);
    }
}

/// Every client is left exactly once, over all vehicles.
fn add_unique_departure(instance: &Instance, cm: &mut CvrpModel) {
    for c in instance.clients() {
        let mut lhs = LinExpr::new();
        for v in 0..cm.num_vehicles {
            for j in instance.nodes().filter(|&j| j != c) {
                lhs.add_term(1.0, cm.x(v, c, j));
            }
        }
        cm.model
            .add_constr(format!("unique_departure_{}", c), lhs, Sense::Eq, 1.0);
    }
}

/// A vehicle leaves the depot at most once.
fn add_depot_departure_cap(instance: &Instance, cm: &mut CvrpModel) {
    for (v, vehicle) in instance.vehicles().iter().enumerate() {
        let mut lhs = LinExpr::new();
        for j in instance.clients() {
            lhs.add_term(1.0, cm.x(v, DEPOT, j));
        }
        cm.model.add_constr(
            format!("depot_departure_{}", vehicle.id),
            lhs,
            Sense::Le,
            1.0,
        );
    }
}

/// A vehicle returns to the depot at most once.
fn add_depot_return_cap(instance: &Instance, cm: &mut CvrpModel) {
    for (v, vehicle) in instance.vehicles().iter().enumerate() {
        let mut lhs = LinExpr::new();
        for i in instance.clients() {
            lhs.add_term(1.0, cm.x(v, i, DEPOT));
        }
        cm.model.add_constr(
            format!("depot_return_{}", vehicle.id),
            lhs,
            Sense::Le,
            1.0,
        );
    }
}

/// Per vehicle and client, arcs in minus arcs out is zero.
fn add_flow_balance(instance: &Instance, cm: &mut CvrpModel) {
    for (v, vehicle) in instance.vehicles().iter().enumerate() {
        for c in instance.clients() {
            let mut lhs = LinExpr::new();
            for i in instance.nodes().filter(|&i| i != c) {
                lhs.add_term(1.0, cm.x(v, i, c));
            }
            for j in instance.nodes().filter(|&j| j != c) {
                lhs.add_term(-1.0, cm.x(v, c, j));
            }
            cm.model.add_constr(
                format!("flow_balance_{}_{}", vehicle.id, c),
                lhs,
                Sense::Eq,
                0.0,
            );
        }
    }
}

/// Carga[v,c] >= demand[c] when v enters c.
fn add_load_lower_link(instance: &Instance, cm: &mut CvrpModel) {
    for (v, vehicle) in instance.vehicles().iter().enumerate() {
        for c in instance.clients() {
            let mut lhs = LinExpr::new();
            lhs.add_term(1.0, cm.carga(v, c));
            for i in instance.nodes().filter(|&i| i != c) {
                lhs.add_term(-instance.demand(c), cm.x(v, i, c));
            }
            cm.model.add_constr(
                format!("load_lower_link_{}_{}", vehicle.id, c),
                lhs,
                Sense::Ge,
                0.0,
            );
        }
    }
}

/// Carga[v,c] = 0 when v skips c; big-M is the vehicle capacity.
fn add_load_upper_link(instance: &Instance, cm: &mut CvrpModel) {
    for (v, vehicle) in instance.vehicles().iter().enumerate() {
        for c in instance.clients() {
            let mut lhs = LinExpr::new();
            lhs.add_term(1.0, cm.carga(v, c));
            for i in instance.nodes().filter(|&i| i != c) {
                lhs.add_term(-vehicle.capacity, cm.x(v, i, c));
            }
            cm.model.add_constr(
                format!("load_upper_link_{}_{}", vehicle.id, c),
                lhs,
                Sense::Le,
                0.0,
            );
        }
    }
}

/// Load-based MTZ subtour elimination over ordered client pairs.
///
/// carga[v,i] − carga[v,j] + Q_v·x[v,i,j] ≤ Q_v − demand[j]; with
/// x[v,i,j] = 1 this collapses to carga[v,j] ≥ carga[v,i] + demand[j], so
/// load strictly accumulates along any route and no depot-free cycle can
/// close. The big-M here is the same capacity constant as in the load
/// upper-link; a looser bound would change solver tightness.
fn add_mtz(instance: &Instance, cm: &mut CvrpModel) {
    for (v, vehicle) in instance.vehicles().iter().enumerate() {
        for (i, j) in instance
            .clients()
            .cartesian_product(instance.clients())
            .filter(|&(i, j)| i != j)
        {
            let mut lhs = LinExpr::new();
            lhs.add_term(1.0, cm.carga(v, i));
            lhs.add_term(-1.0, cm.carga(v, j));
            lhs.add_term(vehicle.capacity, cm.x(v, i, j));
            cm.model.add_constr(
                format!("mtz_{}_{}_{}", vehicle.id, i, j),
                lhs,
                Sense::Le,
                vehicle.capacity - instance.demand(j),
            );
        }
    }
}

/// Explicit carga ≤ capacity bound, kept for solver tightness even
/// though the upper link already implies it.
fn add_load_ceiling(instance: &Instance, cm: &mut CvrpModel) {
    for (v, vehicle) in instance.vehicles().iter().enumerate() {
        for c in instance.clients() {
            let mut lhs = LinExpr::new();
            lhs.add_term(1.0, cm.carga(v, c));
            cm.model.add_constr(
                format!("load_ceiling_{}_{}", vehicle.id, c),
                lhs,
                Sense::Le,
                vehicle.capacity,
            );
        }
    }
}

/// Total selected-arc distance per vehicle within its range.
fn add_range_limit(instance: &Instance, cm: &mut CvrpModel) {
    for (v, vehicle) in instance.vehicles().iter().enumerate() {
        let mut lhs = LinExpr::new();
        for i in instance.nodes() {
            for j in instance.nodes() {
                lhs.add_term(instance.distance(i, j), cm.x(v, i, j));
            }
        }
        cm.model.add_constr(
            format!("range_limit_{}", vehicle.id),
            lhs,
            Sense::Le,
            vehicle.range,
        );
    }
}
