//! CVRP-to-MILP formulation library.
//!
//! Takes a routing instance (client demands, vehicle capacities and ranges,
//! a full pairwise distance table) and produces a mixed-integer linear
//! program: arc-selection binaries, onboard-load continuous variables, a
//! composite distance/time/fuel objective, and the constraint system that
//! makes every feasible assignment a set of depot-rooted routes.
//!
//! The MILP solving engine itself is external; [`solver`] only defines the
//! hand-off boundary (options, outcomes, the solver trait) and [`model::lp`]
//! writes the model in LP format for any external solver.

pub mod config;
pub mod distance;
pub mod domain;
pub mod fixtures;
pub mod ingest;
pub mod model;
pub mod report;
pub mod solver;
