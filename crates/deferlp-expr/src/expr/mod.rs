//! Expression types for optimization modeling.
//!
//! - `core`       — Term and LinExpr: terms + constant
//! - `operand`    — the closed {number, variable, expression} operand set
//! - `ops`        — operator overloads over that set
//! - `constraint` — ConstrExpr: lhs, sense, rhs
//! - `error`      — expression construction errors

pub mod constraint;
pub mod core;
pub mod error;
pub mod operand;
mod ops;

pub use constraint::{ConstrExpr, ConstrSense};
pub use core::{LinExpr, Term};
pub use error::ExprError;
pub use operand::Operand;
