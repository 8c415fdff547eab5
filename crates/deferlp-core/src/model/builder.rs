//! Model builder methods for declaring variables, constraints, and objectives.

use crate::attributes::lookup_attr;
use crate::constraint::Constraint;
use crate::env::{Env, cast_param_value, param_by_name};
use crate::model::{Model, ModelError, engine_mut};
use crate::types::{Bounds, ObjSense, VarType};
use crate::variable::Variable;
use deferlp_engine::AttrValue;
use deferlp_expr::{ConstrExpr, ConstrId, ConstrSense, LinExpr, Operand, VarId};
use serde_json::Value;

impl Model {
    /// Declare a variable.
    ///
    /// A given name is prefixed and deduplicated; an unnamed variable gets
    /// the engine's default name once materialized. The variable joins the
    /// pending queue until the next [`Model::update`].
    pub fn add_var(
        &mut self,
        bounds: impl Into<Bounds>,
        obj: f64,
        kind: VarType,
        name: Option<&str>,
    ) -> Result<VarId, ModelError> {
        let name = name.map(|name| self.claim_var_name(name)).transpose()?;
        let id = VarId::new(self.next_index(self.vars.len())?);
        let var = Variable::new(id, bounds.into(), obj, kind, name);
        tracing::trace!(
            component = "model",
            operation = "add_var",
            status = "success",
            index = id.inner(),
            kind = kind.as_str(),
            name = var.name().unwrap_or(""),
            "Declared variable"
        );
        self.vars.push(var);
        self.pending_vars.push(id);
        Ok(id)
    }

    /// Declare a `[0, 1]` binary variable.
    pub fn add_binary_var(&mut self, obj: f64, name: Option<&str>) -> Result<VarId, ModelError> {
        self.add_var(Bounds::binary(), obj, VarType::Binary, name)
    }

    pub fn add_integer_var(
        &mut self,
        bounds: impl Into<Bounds>,
        obj: f64,
        name: Option<&str>,
    ) -> Result<VarId, ModelError> {
        self.add_var(bounds, obj, VarType::Integer, name)
    }

    pub fn add_continuous_var(
        &mut self,
        bounds: impl Into<Bounds>,
        obj: f64,
        name: Option<&str>,
    ) -> Result<VarId, ModelError> {
        self.add_var(bounds, obj, VarType::Continuous, name)
    }

    /// Declare a pre-built constraint.
    ///
    /// Every variable it references must belong to this model. A non-empty
    /// name is deduplicated.
    pub fn add_constr(
        &mut self,
        constr: ConstrExpr,
        name: Option<&str>,
    ) -> Result<ConstrId, ModelError> {
        self.ensure_operand_vars(constr.lhs())?;
        self.ensure_operand_vars(constr.rhs())?;
        let name = match name {
            Some(name) if !name.is_empty() => Some(self.claim_constr_name(name)?),
            _ => None,
        };
        let id = ConstrId::new(self.next_index(self.constrs.len())?);
        let constraint = Constraint::new(id, constr, name);
        tracing::trace!(
            component = "model",
            operation = "add_constr",
            status = "success",
            index = id.inner(),
            sense = constraint.sense().as_str(),
            name = constraint.name().unwrap_or(""),
            "Declared constraint"
        );
        self.constrs.push(constraint);
        self.pending_constrs.push(id);
        Ok(id)
    }

    /// Declare a constraint from a raw `(lhs, sense, rhs)` triple.
    pub fn add_constr_parts(
        &mut self,
        lhs: impl Into<Operand>,
        sense: &str,
        rhs: impl Into<Operand>,
        name: Option<&str>,
    ) -> Result<ConstrId, ModelError> {
        let constr = ConstrExpr::parse(lhs, sense, rhs)?;
        self.add_constr(constr, name)
    }

    /// Store the objective; it reaches the engine on the next update.
    pub fn set_objective(
        &mut self,
        expr: impl Into<LinExpr>,
        sense: Option<ObjSense>,
    ) -> Result<(), ModelError> {
        let expr = expr.into();
        for term in expr.terms() {
            self.var(term.var())?;
        }
        tracing::debug!(
            component = "model",
            operation = "set_objective",
            status = "success",
            terms = expr.terms().len(),
            "Set objective function"
        );
        self.objective = Some(expr);
        self.objective_dirty = true;
        if let Some(sense) = sense {
            self.set_sense(sense)?;
        }
        Ok(())
    }

    /// Set the optimization sense, pushing `ModelSense` if the engine model exists.
    pub fn set_sense(&mut self, sense: ObjSense) -> Result<(), ModelError> {
        self.sense = sense;
        if let Some(engine) = self.engine.as_mut() {
            engine.set_model_attr(lookup_attr("ModelSense")?, &AttrValue::Int(sense.code()))?;
        }
        tracing::debug!(
            component = "model",
            operation = "set_sense",
            status = "success",
            sense = sense.as_str(),
            "Set optimization sense"
        );
        Ok(())
    }

    /// Attach the session. Sessions are not reassignable.
    pub fn set_env(&mut self, env: Env) -> Result<(), ModelError> {
        if self.env.is_some() {
            tracing::warn!(
                component = "model",
                operation = "set_env",
                status = "error",
                "Session already attached"
            );
            return Err(ModelError::SessionAlreadySet);
        }
        crate::attributes::tables()?;
        self.env = Some(env);
        Ok(())
    }

    /// Set an engine parameter on this model only.
    ///
    /// The engine model takes a copy of the session's parameters when it is
    /// created, so this creates it if needed. The session value is left
    /// unchanged.
    pub fn set_param(&mut self, name: &str, value: impl Into<Value>) -> Result<(), ModelError> {
        let param = param_by_name(name)?;
        let cast = cast_param_value(param, &value.into())?;
        let engine = self.ensure_engine()?;
        engine.set_param(param, cast.clone()).inspect_err(|err| {
            tracing::warn!(
                component = "model",
                operation = "set_param",
                status = "error",
                param = param.name(),
                error_code = err.code(),
                "Engine rejected model parameter"
            );
        })?;
        tracing::debug!(
            component = "model",
            operation = "set_param",
            status = "success",
            param = param.name(),
            value = %cast,
            "Set model parameter"
        );
        Ok(())
    }

    pub fn set_var_lb(&mut self, id: VarId, lb: f64) -> Result<(), ModelError> {
        let var = self.vars.get_mut(id.index()).ok_or(ModelError::InvalidVariableId(id))?;
        var.set_lb(engine_mut(&mut self.engine), lb)
    }

    pub fn set_var_ub(&mut self, id: VarId, ub: f64) -> Result<(), ModelError> {
        let var = self.vars.get_mut(id.index()).ok_or(ModelError::InvalidVariableId(id))?;
        var.set_ub(engine_mut(&mut self.engine), ub)
    }

    pub fn set_var_obj(&mut self, id: VarId, obj: f64) -> Result<(), ModelError> {
        let var = self.vars.get_mut(id.index()).ok_or(ModelError::InvalidVariableId(id))?;
        var.set_obj(engine_mut(&mut self.engine), obj)
    }

    pub fn set_var_kind(&mut self, id: VarId, kind: VarType) -> Result<(), ModelError> {
        let var = self.vars.get_mut(id.index()).ok_or(ModelError::InvalidVariableId(id))?;
        var.set_kind(engine_mut(&mut self.engine), kind)
    }

    /// Rename a variable. Renames are taken verbatim, without prefix or
    /// deduplication.
    pub fn set_var_name(&mut self, id: VarId, name: &str) -> Result<(), ModelError> {
        let var = self.vars.get_mut(id.index()).ok_or(ModelError::InvalidVariableId(id))?;
        var.set_name(engine_mut(&mut self.engine), name.to_string())
    }

    /// Change a variable's type. Returns whether anything changed.
    pub fn convert_var(&mut self, id: VarId, kind: VarType) -> Result<bool, ModelError> {
        if self.var(id)?.kind() == kind {
            return Ok(false);
        }
        self.set_var_kind(id, kind)?;
        Ok(true)
    }

    pub fn set_constr_sense(&mut self, id: ConstrId, sense: ConstrSense) -> Result<(), ModelError> {
        let constr = self
            .constrs
            .get_mut(id.index())
            .ok_or(ModelError::InvalidConstraintId(id))?;
        constr.set_sense(engine_mut(&mut self.engine), sense)
    }

    pub fn set_constr_name(&mut self, id: ConstrId, name: &str) -> Result<(), ModelError> {
        let constr = self
            .constrs
            .get_mut(id.index())
            .ok_or(ModelError::InvalidConstraintId(id))?;
        constr.set_name(engine_mut(&mut self.engine), name.to_string())
    }

    /// `None` until the variable is materialized.
    pub fn var_in_iis(&self, id: VarId) -> Result<Option<bool>, ModelError> {
        self.var(id)?.in_iis(self.engine.as_deref())
    }

    pub fn constr_in_iis(&self, id: ConstrId) -> Result<Option<bool>, ModelError> {
        self.constr(id)?.in_iis(self.engine.as_deref())
    }

    /// Render an expression with variable names, falling back to `v<n>`.
    pub fn format_expr(&self, expr: &LinExpr) -> String {
        expr.render(&|id| self.label(id))
    }

    /// Render a constraint as `lhs sense rhs`.
    pub fn format_constr(&self, id: ConstrId) -> Result<String, ModelError> {
        let constr = self.constr(id)?;
        let label = |var: VarId| self.label(var);
        Ok(format!(
            "{} {} {}",
            constr.lhs().render(&label),
            constr.sense().as_str(),
            constr.rhs().render(&label)
        ))
    }

    fn label(&self, id: VarId) -> String {
        match self.vars.get(id.index()).and_then(Variable::name) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => format!("v{}", id.inner()),
        }
    }

    fn ensure_operand_vars(&self, operand: &Operand) -> Result<(), ModelError> {
        match operand {
            Operand::Expr(expr) => expr
                .terms()
                .iter()
                .try_for_each(|term| self.var(term.var()).map(|_| ())),
            Operand::Var(var) => self.var(*var).map(|_| ()),
            Operand::Const(_) => Ok(()),
        }
    }

    fn next_index(&self, len: usize) -> Result<u32, ModelError> {
        u32::try_from(len).map_err(|_| ModelError::Invariant {
            reason: format!("entity count {len} exceeds the id space"),
        })
    }
}
