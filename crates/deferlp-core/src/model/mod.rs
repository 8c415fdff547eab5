//! Model module for declaring and materializing optimization models.
//!
//! A [`Model`] owns its variables and constraints. Declarations are pure
//! in-memory records until [`Model::update`] materializes them against the
//! engine model created from the attached [`Env`].
//!
//! # Module Organization
//!
//! - [`error`]: Model error types
//! - [`builder`]: Declaring variables, constraints and the objective
//! - [`naming`]: Name prefix and duplicate-suffix policy
//! - [`sync`]: The update protocol and lazy engine creation
//! - [`solve`]: Write, optimize, IIS and status queries
//! - [`views`]: Generated attribute accessors

mod builder;
mod error;
mod naming;
mod solve;
mod sync;
pub mod views;

use crate::cancel::CancelToken;
use crate::constraint::Constraint;
use crate::env::Env;
use crate::types::ObjSense;
use crate::variable::Variable;
use deferlp_engine::EngineModel;
use deferlp_expr::{ConstrId, LinExpr, VarId};
use std::collections::HashMap;

pub use error::{Entity, ErrorKind, ModelError};
pub use views::{ConstrAttrs, ModelAttrs, VarAttrs};

/// A deferred-binding builder for linear and mixed-integer programs.
///
/// Declaration order is preserved: `vars()` and `constrs()` iterate in the
/// order entities were added, which is also the order they are
/// materialized in.
pub struct Model {
    pub(crate) vars: Vec<Variable>,
    pub(crate) constrs: Vec<Constraint>,
    pub(crate) pending_vars: Vec<VarId>,
    pub(crate) pending_constrs: Vec<ConstrId>,
    pub(crate) objective: Option<LinExpr>,
    pub(crate) objective_dirty: bool,
    pub(crate) sense: ObjSense,
    pub(crate) env: Option<Env>,
    pub(crate) engine: Option<Box<dyn EngineModel>>,
    pub(crate) name_counters: HashMap<String, u32>,
    var_name_prefix: String,
    cancel: CancelToken,
}

impl Model {
    /// Create a new empty model with no session.
    pub fn new() -> Self {
        Self {
            vars: Vec::new(),
            constrs: Vec::new(),
            pending_vars: Vec::new(),
            pending_constrs: Vec::new(),
            objective: None,
            objective_dirty: false,
            sense: ObjSense::default(),
            env: None,
            engine: None,
            name_counters: HashMap::new(),
            var_name_prefix: String::new(),
            cancel: CancelToken::new(),
        }
    }

    /// Create a model bound to `env`.
    pub fn with_env(env: Env) -> Self {
        Self {
            env: Some(env),
            ..Self::new()
        }
    }

    /// Prefix prepended to every named variable.
    pub fn with_var_name_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.var_name_prefix = prefix.into();
        self
    }

    pub fn var_name_prefix(&self) -> &str {
        &self.var_name_prefix
    }

    pub fn var(&self, id: VarId) -> Result<&Variable, ModelError> {
        self.vars
            .get(id.index())
            .ok_or(ModelError::InvalidVariableId(id))
    }

    pub fn constr(&self, id: ConstrId) -> Result<&Constraint, ModelError> {
        self.constrs
            .get(id.index())
            .ok_or(ModelError::InvalidConstraintId(id))
    }

    pub(crate) fn var_mut(&mut self, id: VarId) -> Result<&mut Variable, ModelError> {
        self.vars
            .get_mut(id.index())
            .ok_or(ModelError::InvalidVariableId(id))
    }

    pub(crate) fn constr_mut(&mut self, id: ConstrId) -> Result<&mut Constraint, ModelError> {
        self.constrs
            .get_mut(id.index())
            .ok_or(ModelError::InvalidConstraintId(id))
    }

    /// Variables in declaration order.
    pub fn vars(&self) -> &[Variable] {
        &self.vars
    }

    /// Constraints in declaration order.
    pub fn constrs(&self) -> &[Constraint] {
        &self.constrs
    }

    pub fn num_declared_vars(&self) -> usize {
        self.vars.len()
    }

    pub fn num_declared_constrs(&self) -> usize {
        self.constrs.len()
    }

    /// Entities declared since the last [`Model::update`].
    pub fn pending_vars(&self) -> &[VarId] {
        &self.pending_vars
    }

    pub fn pending_constrs(&self) -> &[ConstrId] {
        &self.pending_constrs
    }

    pub fn objective(&self) -> Option<&LinExpr> {
        self.objective.as_ref()
    }

    pub fn sense(&self) -> ObjSense {
        self.sense
    }

    pub fn env(&self) -> Option<&Env> {
        self.env.as_ref()
    }

    /// Whether the engine model has been created.
    pub fn is_materialized(&self) -> bool {
        self.engine.is_some()
    }

    /// A token that interrupts the running `optimize`/`compute_iis` call.
    ///
    /// Clones share state, so the token can be handed to another thread
    /// before the solve starts.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }
}

impl Default for Model {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Model")
            .field("vars", &self.vars.len())
            .field("constrs", &self.constrs.len())
            .field("pending_vars", &self.pending_vars.len())
            .field("pending_constrs", &self.pending_constrs.len())
            .field("sense", &self.sense)
            .field("has_env", &self.env.is_some())
            .field("materialized", &self.engine.is_some())
            .finish()
    }
}

/// Reborrow the engine slot for setters that push through when bound.
pub(crate) fn engine_mut(slot: &mut Option<Box<dyn EngineModel>>) -> Option<&mut dyn EngineModel> {
    match slot {
        Some(engine) => Some(engine.as_mut()),
        None => None,
    }
}
