//! The closed operand set accepted wherever an expression side is expected.

use crate::expr::core::{LinExpr, format_number};
use crate::ids::VarId;

#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    Expr(LinExpr),
    Var(VarId),
    Const(f64),
}

impl Operand {
    /// Promote to a linear expression.
    pub fn into_expr(self) -> LinExpr {
        match self {
            Operand::Expr(expr) => expr,
            Operand::Var(var) => LinExpr::var(var),
            Operand::Const(value) => LinExpr::from_constant(value),
        }
    }

    pub fn render(&self, label: &dyn Fn(VarId) -> String) -> String {
        match self {
            Operand::Expr(expr) => expr.render(label),
            Operand::Var(var) => label(*var),
            Operand::Const(value) => format_number(*value),
        }
    }
}

impl From<LinExpr> for Operand {
    fn from(expr: LinExpr) -> Self {
        Operand::Expr(expr)
    }
}

impl From<&LinExpr> for Operand {
    fn from(expr: &LinExpr) -> Self {
        Operand::Expr(expr.clone())
    }
}

impl From<VarId> for Operand {
    fn from(var: VarId) -> Self {
        Operand::Var(var)
    }
}

impl From<f64> for Operand {
    fn from(value: f64) -> Self {
        Operand::Const(value)
    }
}

impl From<i32> for Operand {
    fn from(value: i32) -> Self {
        Operand::Const(f64::from(value))
    }
}

impl std::fmt::Display for Operand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.render(&|var| format!("v{}", var.inner())))
    }
}
