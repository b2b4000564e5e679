//! Solver boundary.
//!
//! The crate builds models; it does not solve them. This module fixes the
//! contract an external MILP engine has to meet: it gets the whole model,
//! may run up to a time limit, and must answer with one of three distinct
//! outcomes — an optimal assignment, proven infeasibility, or a timeout.
//! "No solution found in time" and "no solution exists" are never collapsed
//! into one case.

use std::time::Duration;

use crate::config::constant::FEASIBILITY_EPS;
use crate::model::{Model, VarId};

/// Options handed to the solving engine.
#[derive(Debug, Clone)]
pub struct SolveOptions {
    /// Wall-clock budget; `None` means run to completion.
    pub time_limit: Option<Duration>,
    /// Tolerance for feasibility and integrality checks.
    pub feasibility_eps: f64,
}

impl Default for SolveOptions {
    fn default() -> Self {
        Self {
            time_limit: None,
            feasibility_eps: FEASIBILITY_EPS,
        }
    }
}

/// A complete variable assignment, dense over the model's `VarId` space.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    values: Vec<f64>,
}

impl Assignment {
    pub fn from_values(values: Vec<f64>) -> Self {
        Self { values }
    }

    pub fn value(&self, var: VarId) -> f64 {
        self.values[var.index()]
    }

    /// Reads a binary variable, rounding away solver noise.
    pub fn is_one(&self, var: VarId) -> bool {
        self.value(var) > 0.5
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Terminal outcome of one solve call.
#[derive(Debug, Clone, PartialEq)]
pub enum SolveOutcome {
    /// A provably optimal assignment together with its objective value.
    Optimal {
        assignment: Assignment,
        objective: f64,
    },
    /// No assignment satisfies the constraint system.
    Infeasible,
    /// The time budget ran out before either of the above was established.
    TimedOut,
}

/// The opaque solve oracle: model in, outcome out.
pub trait MilpSolver {
    fn solve(&self, model: &Model, options: &SolveOptions) -> anyhow::Result<SolveOutcome>;
}
