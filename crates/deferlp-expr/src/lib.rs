//! Pure, engine-agnostic algebra for linear models.
//!
//! Expressions and constraints built here never touch a solver; they only
//! reference variables and constraints through the ids handed out by a model.

pub mod expr;
pub mod ids;

pub use expr::{ConstrExpr, ConstrSense, ExprError, LinExpr, Operand, Term};
pub use ids::{ConstrId, VarId};
