//! Constraint expressions: lhs, comparison sense and rhs.
//!
//! Building a relation never rearranges its sides. The engine adapter decides
//! how to split a constant-bearing lhs when the constraint is materialized.

use crate::expr::core::LinExpr;
use crate::expr::error::ExprError;
use crate::expr::operand::Operand;
use crate::ids::VarId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstrSense {
    LessEqual,
    GreaterEqual,
    Equal,
}

impl ConstrSense {
    /// Parse a relational token or a single-character engine code.
    pub fn parse(token: &str) -> Result<Self, ExprError> {
        match token {
            "=" | "==" | "===" => Ok(ConstrSense::Equal),
            "<" | "<=" => Ok(ConstrSense::LessEqual),
            ">" | ">=" => Ok(ConstrSense::GreaterEqual),
            other => Err(ExprError::InvalidSense(other.to_string())),
        }
    }

    pub fn from_code(code: char) -> Option<Self> {
        match code {
            '=' => Some(ConstrSense::Equal),
            '<' => Some(ConstrSense::LessEqual),
            '>' => Some(ConstrSense::GreaterEqual),
            _ => None,
        }
    }

    /// Engine sense character.
    pub fn code(self) -> char {
        match self {
            ConstrSense::LessEqual => '<',
            ConstrSense::GreaterEqual => '>',
            ConstrSense::Equal => '=',
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ConstrSense::LessEqual => "<=",
            ConstrSense::GreaterEqual => ">=",
            ConstrSense::Equal => "=",
        }
    }
}

impl std::str::FromStr for ConstrSense {
    type Err = ExprError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ConstrSense::parse(s)
    }
}

impl std::fmt::Display for ConstrSense {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConstrExpr {
    lhs: Operand,
    sense: ConstrSense,
    rhs: Operand,
}

impl ConstrExpr {
    /// Relation between two operands. A numeric lhs is promoted to a
    /// constant expression; the rhs keeps whatever form it was given.
    pub fn new(lhs: impl Into<Operand>, sense: ConstrSense, rhs: impl Into<Operand>) -> Self {
        let lhs = match lhs.into() {
            Operand::Const(value) => Operand::Expr(LinExpr::from_constant(value)),
            other => other,
        };
        Self {
            lhs,
            sense,
            rhs: rhs.into(),
        }
    }

    /// Like `new`, with the sense given as a token.
    pub fn parse(
        lhs: impl Into<Operand>,
        sense: &str,
        rhs: impl Into<Operand>,
    ) -> Result<Self, ExprError> {
        Ok(Self::new(lhs, ConstrSense::parse(sense)?, rhs))
    }

    pub fn lhs(&self) -> &Operand {
        &self.lhs
    }

    pub fn sense(&self) -> ConstrSense {
        self.sense
    }

    pub fn rhs(&self) -> &Operand {
        &self.rhs
    }

    pub fn into_parts(self) -> (Operand, ConstrSense, Operand) {
        (self.lhs, self.sense, self.rhs)
    }

    pub fn render(&self, label: &dyn Fn(VarId) -> String) -> String {
        format!(
            "{} {} {}",
            self.lhs.render(label),
            self.sense,
            self.rhs.render(label)
        )
    }
}

impl std::fmt::Display for ConstrExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.render(&|var| format!("v{}", var.inner())))
    }
}

macro_rules! impl_relations {
    ($($ty:ty),+) => {
        $(
            impl $ty {
                pub fn less_equal(&self, rhs: impl Into<Operand>) -> ConstrExpr {
                    ConstrExpr::new(self.clone(), ConstrSense::LessEqual, rhs)
                }

                pub fn greater_equal(&self, rhs: impl Into<Operand>) -> ConstrExpr {
                    ConstrExpr::new(self.clone(), ConstrSense::GreaterEqual, rhs)
                }

                pub fn equal(&self, rhs: impl Into<Operand>) -> ConstrExpr {
                    ConstrExpr::new(self.clone(), ConstrSense::Equal, rhs)
                }
            }
        )+
    };
}

impl_relations!(LinExpr, VarId);
