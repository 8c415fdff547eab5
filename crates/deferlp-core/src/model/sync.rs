//! The update protocol.
//!
//! Each entity class goes through materialize, barrier, sync and clear as
//! full passes, so that no attribute is read from a handle before the
//! engine has made it addressable.

use crate::attributes::lookup_attr;
use crate::lowering::lower_expr;
use crate::model::{Entity, Model, ModelError};
use crate::variable::Variable;
use deferlp_engine::{AttrValue, EngineModel, VarHandle};
use deferlp_expr::VarId;
use std::time::Instant;

fn resolve_var(vars: &[Variable], id: VarId) -> Result<VarHandle, ModelError> {
    let var = vars.get(id.index()).ok_or(ModelError::InvalidVariableId(id))?;
    var.handle().map_err(|_| ModelError::NotYetMaterialized {
        entity: Entity::Variable,
        index: id.inner(),
    })
}

impl Model {
    /// The engine model, created from the attached session on first use.
    pub(crate) fn ensure_engine(&mut self) -> Result<&mut Box<dyn EngineModel>, ModelError> {
        if self.engine.is_none() {
            let env = self.env.as_ref().ok_or_else(|| {
                tracing::warn!(
                    component = "model",
                    operation = "create_engine",
                    status = "error",
                    "No session attached"
                );
                ModelError::SessionMissing
            })?;
            let mut engine = env.session().new_model("")?;
            engine.set_model_attr(
                lookup_attr("ModelSense")?,
                &AttrValue::Int(self.sense.code()),
            )?;
            tracing::debug!(
                component = "model",
                operation = "create_engine",
                status = "success",
                sense = self.sense.as_str(),
                "Created engine model"
            );
            self.engine = Some(engine);
        }
        self.engine.as_mut().ok_or_else(|| ModelError::Invariant {
            reason: "engine model missing after creation".to_string(),
        })
    }

    /// Materialize pending entities and push the objective.
    ///
    /// A no-op when nothing is pending, so calling it twice in a row makes
    /// no engine calls the second time.
    pub fn update(&mut self) -> Result<(), ModelError> {
        if self.pending_vars.is_empty() && self.pending_constrs.is_empty() && !self.objective_dirty
        {
            return Ok(());
        }
        let started = Instant::now();
        self.ensure_engine()?;

        let vars = self.update_vars().inspect_err(|err| warn_update(err, "variables"))?;
        let constrs = self
            .update_constrs()
            .inspect_err(|err| warn_update(err, "constraints"))?;
        let objective = self
            .update_objective()
            .inspect_err(|err| warn_update(err, "objective"))?;

        tracing::debug!(
            component = "model",
            operation = "update",
            status = "success",
            vars,
            constrs,
            objective,
            duration_ms = started.elapsed().as_secs_f64() * 1000.0,
            "Synchronized model with engine"
        );
        Ok(())
    }

    fn update_vars(&mut self) -> Result<usize, ModelError> {
        if self.pending_vars.is_empty() {
            return Ok(0);
        }
        let engine = self.engine.as_mut().ok_or(ModelError::SessionMissing)?;
        for &id in &self.pending_vars {
            let var = self
                .vars
                .get_mut(id.index())
                .ok_or(ModelError::InvalidVariableId(id))?;
            // Bound entries survive from an update that failed part way.
            if !var.is_materialized() {
                var.materialize(engine.as_mut())?;
            }
        }
        engine.update()?;
        for &id in &self.pending_vars {
            let var = self
                .vars
                .get_mut(id.index())
                .ok_or(ModelError::InvalidVariableId(id))?;
            var.sync_after_materialize(engine.as_mut())?;
        }
        let count = self.pending_vars.len();
        self.pending_vars.clear();
        Ok(count)
    }

    fn update_constrs(&mut self) -> Result<usize, ModelError> {
        if self.pending_constrs.is_empty() {
            return Ok(0);
        }
        let engine = self.engine.as_mut().ok_or(ModelError::SessionMissing)?;
        let vars = &self.vars;
        let resolve = |id: VarId| resolve_var(vars, id);
        for &id in &self.pending_constrs {
            let constr = self
                .constrs
                .get_mut(id.index())
                .ok_or(ModelError::InvalidConstraintId(id))?;
            if !constr.is_materialized() {
                constr.materialize(engine.as_mut(), &resolve)?;
            }
        }
        engine.update()?;
        for &id in &self.pending_constrs {
            let constr = self
                .constrs
                .get_mut(id.index())
                .ok_or(ModelError::InvalidConstraintId(id))?;
            constr.sync_after_materialize(engine.as_mut())?;
        }
        let count = self.pending_constrs.len();
        self.pending_constrs.clear();
        Ok(count)
    }

    fn update_objective(&mut self) -> Result<bool, ModelError> {
        if !self.objective_dirty {
            return Ok(false);
        }
        let Some(objective) = self.objective.as_ref() else {
            self.objective_dirty = false;
            return Ok(false);
        };
        let vars = &self.vars;
        let native = lower_expr(objective, &|id| resolve_var(vars, id))?;
        let engine = self.engine.as_mut().ok_or(ModelError::SessionMissing)?;
        engine.set_objective(&native)?;
        self.objective_dirty = false;
        Ok(true)
    }
}

fn warn_update(err: &ModelError, phase: &'static str) {
    tracing::warn!(
        component = "model",
        operation = "update",
        status = "error",
        phase,
        error_code = err.code(),
        "Update failed"
    );
}
