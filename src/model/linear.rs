//! Generic MILP container, independent of any solver's API shape.

/// Handle into a model's variable table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VarId(pub(crate) usize);

impl VarId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarType {
    Binary,
    Continuous,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    pub name: String,
    pub vtype: VarType,
    pub lower: f64,
    pub upper: f64,
}

/// A linear expression as a list of (coefficient, variable) terms.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinExpr {
    terms: Vec<(f64, VarId)>,
}

impl LinExpr {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_term(&mut self, coeff: f64, var: VarId) {
        self.terms.push((coeff, var));
    }

    pub fn terms(&self) -> &[(f64, VarId)] {
        &self.terms
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Value of the expression under a dense assignment indexed by `VarId`.
    pub fn value(&self, assignment: &[f64]) -> f64 {
        self.terms
            .iter()
            .map(|&(coeff, var)| coeff * assignment[var.0])
            .sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sense {
    Le,
    Ge,
    Eq,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Constraint {
    pub name: String,
    pub lhs: LinExpr,
    pub sense: Sense,
    pub rhs: f64,
}

impl Constraint {
    /// Whether the constraint holds under the assignment, within `eps`.
    pub fn satisfied(&self, assignment: &[f64], eps: f64) -> bool {
        let lhs = self.lhs.value(assignment);
        match self.sense {
            Sense::Le => lhs <= self.rhs + eps,
            Sense::Ge => lhs >= self.rhs - eps,
            Sense::Eq => (lhs - self.rhs).abs() <= eps,
        }
    }
}

/// A minimization MILP: variable table, constraint list, objective.
///
/// The container only accumulates the algebra; solving is someone else's
/// job. Everything is addressable by [`VarId`] so an assignment can be a
/// plain dense vector.
#[derive(Debug, Clone, Default)]
pub struct Model {
    variables: Vec<Variable>,
    constraints: Vec<Constraint>,
    objective: LinExpr,
}

impl Model {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_var(&mut self, name: String, vtype: VarType, lower: f64, upper: f64) -> VarId {
        let id = VarId(self.variables.len());
        self.variables.push(Variable {
            name,
            vtype,
            lower,
            upper,
        });
        id
    }

    pub fn add_binary(&mut self, name: String) -> VarId {
        self.add_var(name, VarType::Binary, 0.0, 1.0)
    }

    pub fn add_continuous(&mut self, name: String, lower: f64, upper: f64) -> VarId {
        self.add_var(name, VarType::Continuous, lower, upper)
    }

    pub fn add_constr(&mut self, name: String, lhs: LinExpr, sense: Sense, rhs: f64) {
        self.constraints.push(Constraint {
            name,
            lhs,
            sense,
            rhs,
        });
    }

    pub fn set_objective(&mut self, objective: LinExpr) {
        self.objective = objective;
    }

    pub fn objective(&self) -> &LinExpr {
        &self.objective
    }

    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    pub fn variable(&self, id: VarId) -> &Variable {
        &self.variables[id.0]
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    pub fn num_variables(&self) -> usize {
        self.variables.len()
    }

    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    /// Number of constraints whose name starts with `prefix`.
    pub fn count_constraints_with_prefix(&self, prefix: &str) -> usize {
        self.constraints
            .iter()
            .filter(|c| c.name.starts_with(prefix))
            .count()
    }

    /// Objective value under a dense assignment.
    pub fn objective_value(&self, assignment: &[f64]) -> f64 {
        self.objective.value(assignment)
    }

    /// Names of all constraints the assignment violates, plus variable-domain
    /// violations (bounds and integrality).
    pub fn violations(&self, assignment: &[f64], eps: f64) -> Vec<String> {
        let mut out = Vec::new();

        for (idx, var) in self.variables.iter().enumerate() {
            let value = assignment[idx];
            if value < var.lower - eps || value > var.upper + eps {
                out.push(format!("bounds of {}", var.name));
            }
            if var.vtype == VarType::Binary && (value - value.round()).abs() > eps {
                out.push(format!("integrality of {}", var.name));
            }
        }

        for c in &self.constraints {
            if !c.satisfied(assignment, eps) {
                out.push(c.name.clone());
            }
        }

        out
    }

    /// Whether the assignment satisfies every bound, integrality requirement
    /// and constraint within `eps`.
    pub fn is_feasible(&self, assignment: &[f64], eps: f64) -> bool {
        self.violations(assignment, eps).is_empty()
    }
}
