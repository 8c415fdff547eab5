//! Core expression type: linear terms + constant.
//!
//! A `LinExpr` is a value. Every operation returns a new expression and
//! leaves its operands untouched. Duplicate variables are kept as separate
//! terms; engines merge them when the expression is lowered.

use crate::expr::error::ExprError;
use crate::expr::operand::Operand;
use crate::ids::VarId;

/// One `coeff * var` product.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Term {
    coeff: f64,
    var: VarId,
}

impl Term {
    pub fn new(coeff: f64, var: VarId) -> Self {
        Self { coeff, var }
    }

    pub fn coeff(self) -> f64 {
        self.coeff
    }

    pub fn var(self) -> VarId {
        self.var
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinExpr {
    terms: Vec<Term>,
    constant: f64,
}

impl LinExpr {
    // ── Constructors ────────────────────────────────────────

    /// Expression from terms and constant.
    pub fn new(terms: Vec<Term>, constant: f64) -> Self {
        Self { terms, constant }
    }

    /// Just a constant, no variable terms.
    pub fn from_constant(constant: f64) -> Self {
        Self {
            terms: Vec::new(),
            constant,
        }
    }

    /// Single term: coeff * var.
    pub fn term(var: VarId, coeff: f64) -> Self {
        Self {
            terms: vec![Term::new(coeff, var)],
            constant: 0.0,
        }
    }

    /// Single variable with coefficient 1.0.
    pub fn var(var: VarId) -> Self {
        Self::term(var, 1.0)
    }

    /// From raw `(var, coeff)` pairs, no constant.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (VarId, f64)>) -> Self {
        Self {
            terms: pairs
                .into_iter()
                .map(|(var, coeff)| Term::new(coeff, var))
                .collect(),
            constant: 0.0,
        }
    }

    // ── Accessors ───────────────────────────────────────────

    pub fn constant(&self) -> f64 {
        self.constant
    }

    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    pub fn is_constant(&self) -> bool {
        self.terms.is_empty()
    }

    /// Consume and return (terms, constant).
    pub fn into_parts(self) -> (Vec<Term>, f64) {
        (self.terms, self.constant)
    }

    // ── Operations ──────────────────────────────────────────

    /// Sum with any operand. Terms are concatenated, constants added.
    pub fn add(&self, other: impl Into<Operand>) -> Self {
        let other = other.into().into_expr();
        let mut terms = Vec::with_capacity(self.terms.len() + other.terms.len());
        terms.extend_from_slice(&self.terms);
        terms.extend(other.terms);
        Self {
            terms,
            constant: self.constant + other.constant,
        }
    }

    pub fn subtract(&self, other: impl Into<Operand>) -> Self {
        self.add(other.into().into_expr().negate())
    }

    pub fn negate(&self) -> Self {
        self.multiply(-1.0)
    }

    /// Scale all terms and the constant. Scaling by zero drops every term.
    pub fn multiply(&self, by: f64) -> Self {
        if by == 0.0 {
            return Self::from_constant(self.constant * by);
        }
        Self {
            terms: self
                .terms
                .iter()
                .map(|t| Term::new(t.coeff * by, t.var))
                .collect(),
            constant: self.constant * by,
        }
    }

    /// Product with an operand that is only known at runtime.
    ///
    /// Fails with `NonLinear` unless the operand is a number.
    pub fn try_multiply(&self, other: impl Into<Operand>) -> Result<Self, ExprError> {
        match other.into() {
            Operand::Const(by) => Ok(self.multiply(by)),
            Operand::Var(_) | Operand::Expr(_) => Err(ExprError::NonLinear),
        }
    }

    /// Human-readable rendering with caller-supplied variable labels.
    ///
    /// Unit coefficients print as the bare label; a nonzero constant is
    /// appended as a trailing `+ c` term.
    pub fn render(&self, label: &dyn Fn(VarId) -> String) -> String {
        if self.terms.is_empty() {
            return format_number(self.constant);
        }
        let mut parts: Vec<String> = self
            .terms
            .iter()
            .map(|t| {
                if t.coeff == 1.0 {
                    label(t.var)
                } else {
                    format!("{} {}", format_number(t.coeff), label(t.var))
                }
            })
            .collect();
        if self.constant != 0.0 {
            parts.push(format_number(self.constant));
        }
        parts.join(" + ")
    }
}

pub(crate) fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}

impl From<VarId> for LinExpr {
    fn from(var: VarId) -> Self {
        LinExpr::var(var)
    }
}

impl From<f64> for LinExpr {
    fn from(constant: f64) -> Self {
        LinExpr::from_constant(constant)
    }
}

impl std::fmt::Display for LinExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.render(&|var| format!("v{}", var.inner())))
    }
}

impl std::iter::Sum for LinExpr {
    fn sum<I: Iterator<Item = LinExpr>>(iter: I) -> Self {
        iter.fold(LinExpr::default(), |acc, expr| LinExpr::add(&acc, expr))
    }
}

impl std::iter::Sum<VarId> for LinExpr {
    fn sum<I: Iterator<Item = VarId>>(iter: I) -> Self {
        LinExpr::from_pairs(iter.map(|var| (var, 1.0)))
    }
}
