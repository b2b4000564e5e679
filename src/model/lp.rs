//! LP-format serialization: the hand-off format of the solver boundary.
//!
//! Any MILP solver that reads CPLEX LP files (and takes a time limit on its
//! own side) can consume the output.

use std::io::{self, Write};

use crate::model::linear::{LinExpr, Model, Sense, VarType};

fn write_expr<W: Write>(w: &mut W, model: &Model, expr: &LinExpr) -> io::Result<()> {
    let mut first = true;
    for &(coeff, var) in expr.terms() {
        let name = &model.variable(var).name;
        if first {
            if coeff == 1.0 {
                write!(w, "{}", name)?;
            } else if coeff == -1.0 {
                write!(w, "- {}", name)?;
            } else {
                write!(w, "{} {}", coeff, name)?;
            }
            first = false;
        } else if coeff < 0.0 {
            if coeff == -1.0 {
                write!(w, " - {}", name)?;
            } else {
                write!(w, " - {} {}", -coeff, name)?;
            }
        } else if coeff == 1.0 {
            write!(w, " + {}", name)?;
        } else {
            write!(w, " + {} {}", coeff, name)?;
        }
    }
    if first {
        write!(w, "0")?;
    }
    Ok(())
}

/// Writes the model as a CPLEX-style LP file.
pub fn write_lp<W: Write>(w: &mut W, model: &Model, name: &str) -> io::Result<()> {
    writeln!(w, "\\ {}", name)?;
    writeln!(w, "Minimize")?;
    write!(w, " obj: ")?;
    write_expr(w, model, model.objective())?;
    writeln!(w)?;

    writeln!(w, "Subject To")?;
    for c in model.constraints() {
        write!(w, " {}: ", c.name)?;
        write_expr(w, model, &c.lhs)?;
        let op = match c.sense {
            Sense::Le => "<=",
            Sense::Ge => ">=",
            Sense::Eq => "=",
        };
        writeln!(w, " {} {}", op, c.rhs)?;
    }

    // Continuous variables default to [0, +inf) in LP format; only
    // non-default bounds need a Bounds section.
    let mut bounds_lines = Vec::new();
    for var in model.variables() {
        if var.vtype == VarType::Continuous && (var.lower != 0.0 || var.upper.is_finite()) {
            if var.upper.is_finite() {
                bounds_lines.push(format!(" {} <= {} <= {}", var.lower, var.name, var.upper));
            } else {
                bounds_lines.push(format!(" {} >= {}", var.name, var.lower));
            }
        }
    }
    if !bounds_lines.is_empty() {
        writeln!(w, "Bounds")?;
        for line in bounds_lines {
            writeln!(w, "{}", line)?;
        }
    }

    let binaries: Vec<&str> = model
        .variables()
        .iter()
        .filter(|v| v.vtype == VarType::Binary)
        .map(|v| v.name.as_str())
        .collect();
    if !binaries.is_empty() {
        writeln!(w, "Binary")?;
        for name in binaries {
            writeln!(w, " {}", name)?;
        }
    }

    writeln!(w, "End")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::linear::{LinExpr, Model, Sense};

    fn render(model: &Model) -> String {
        let mut buf = Vec::new();
        write_lp(&mut buf, model, "test model").unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn sections_and_signs() {
        let mut m = Model::new();
        let x = m.add_binary("x_1_0_1".to_string());
        let y = m.add_continuous("carga_1_1".to_string(), 0.0, f64::INFINITY);

        let mut obj = LinExpr::new();
        obj.add_term(2.5, x);
        obj.add_term(1.0, y);
        m.set_objective(obj);

        let mut lhs = LinExpr::new();
        lhs.add_term(1.0, y);
        lhs.add_term(-10.0, x);
        m.add_constr("load_upper_link_1_1".to_string(), lhs, Sense::Le, 0.0);

        let text = render(&m);
        assert!(text.contains("Minimize"));
        assert!(text.contains(" obj: 2.5 x_1_0_1 + carga_1_1"));
        assert!(text.contains("Subject To"));
        assert!(text.contains(" load_upper_link_1_1: carga_1_1 - 10 x_1_0_1 <= 0"));
        assert!(text.contains("Binary\n x_1_0_1"));
        assert!(text.trim_end().ends_with("End"));
    }

    #[test]
    fn default_continuous_bounds_are_omitted() {
        let mut m = Model::new();
        let y = m.add_continuous("carga_1_1".to_string(), 0.0, f64::INFINITY);
        let mut obj = LinExpr::new();
        obj.add_term(1.0, y);
        m.set_objective(obj);

        let text = render(&m);
        assert!(!text.contains("Bounds"));
    }

    #[test]
    fn finite_upper_bound_is_written() {
        let mut m = Model::new();
        m.add_continuous("carga_1_1".to_string(), 0.0, 20.0);
        m.set_objective(LinExpr::new());

        let text = render(&m);
        assert!(text.contains("Bounds\n 0 <= carga_1_1 <= 20"));
    }

    #[test]
    fn empty_expression_renders_zero() {
        let mut m = Model::new();
        m.set_objective(LinExpr::new());
        let text = render(&m);
        assert!(text.contains(" obj: 0"));
    }
}
