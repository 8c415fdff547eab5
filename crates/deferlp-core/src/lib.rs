//! deferlp core: deferred-binding variables, constraints and models.
//!
//! Variables and constraints are declared against a [`Model`] as plain
//! values and only bound to engine handles when [`Model::update`] runs
//! (implicitly before `write`, `optimize` and `compute_iis`).

pub mod attributes;
pub mod binding;
pub mod cancel;
pub mod config;
pub mod constraint;
pub mod env;
pub mod logging;
mod lowering;
pub mod model;
pub mod types;
pub mod variable;

pub use attributes::{AttrRow, AttrScalar, AttrSpec, AttributeTable, Tables, lookup_attr, tables};
pub use binding::{BindState, Binding, PendingAttrs};
pub use cancel::CancelToken;
pub use config::SolverConfig;
pub use constraint::Constraint;
pub use env::{Env, cast_param_value, param_by_name};
pub use logging::{LoggingError, enable_logging};
pub use model::{ConstrAttrs, Entity, ErrorKind, Model, ModelAttrs, ModelError, VarAttrs};
pub use types::{Bounds, ObjSense, VarType, normalize_bound};
pub use variable::Variable;

pub use deferlp_engine::{
    AttrValue, ENGINE_INFINITY, EngineError, EngineErrorKind, EngineModel, ParamInfo, ParamValue,
    Session, StatusCode, Terminate,
};
pub use deferlp_expr::{
    ConstrExpr, ConstrId, ConstrSense, ExprError, LinExpr, Operand, Term, VarId,
};
