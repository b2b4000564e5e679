//! MILP model construction.
//!
//! [`linear`] is a generic, solver-agnostic container for variables, linear
//! constraints and a minimization objective. [`builder`] fills one with the
//! CVRP formulation: arc-selection binaries x[v,i,j], onboard-load
//! continuous variables carga[v,c], the composite distance/time/fuel
//! objective, and the routing constraint families. [`lp`] serializes the
//! result
//! in LP format for hand-off to an external solver.

pub mod builder;
pub mod linear;
pub mod lp;

pub use builder::{arc_cost, build_model, CvrpModel};
pub use linear::{Constraint, LinExpr, Model, Sense, VarId, VarType, Variable};
