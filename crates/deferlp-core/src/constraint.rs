//! Linear constraints.

use crate::attributes::{AttrRow, lookup_attr, tables};
use crate::binding::Binding;
use crate::lowering::{ResolveVar, lower_operand, lower_rhs};
use crate::model::{Entity, ModelError};
use crate::variable::unbound_engine;
use deferlp_engine::{AttrValue, ConstrHandle, EngineModel};
use deferlp_expr::{ConstrExpr, ConstrId, ConstrSense, Operand, VarId};

/// A `(lhs, sense, rhs)` relation owned by one model.
#[derive(Debug, Clone, PartialEq)]
pub struct Constraint {
    id: ConstrId,
    lhs: Operand,
    sense: ConstrSense,
    rhs: Operand,
    name: Option<String>,
    pub(crate) binding: Binding<ConstrHandle>,
}

impl Constraint {
    pub(crate) fn new(id: ConstrId, expr: ConstrExpr, name: Option<String>) -> Self {
        let (lhs, sense, rhs) = expr.into_parts();
        Self {
            id,
            lhs,
            sense,
            rhs,
            name,
            binding: Binding::default(),
        }
    }

    pub fn id(&self) -> ConstrId {
        self.id
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

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn is_materialized(&self) -> bool {
        self.binding.is_bound()
    }

    pub fn handle(&self) -> Result<ConstrHandle, ModelError> {
        self.binding
            .handle()
            .ok_or(ModelError::NotYetMaterialized {
                entity: Entity::Constraint,
                index: self.id.inner(),
            })
    }

    /// Variables referenced on either side, in order of appearance.
    pub fn variables(&self) -> Vec<VarId> {
        [&self.lhs, &self.rhs]
            .into_iter()
            .flat_map(|side| match side {
                Operand::Expr(expr) => expr.terms().iter().map(|t| t.var()).collect(),
                Operand::Var(var) => vec![*var],
                Operand::Const(_) => Vec::new(),
            })
            .collect()
    }

    pub(crate) fn set_sense(
        &mut self,
        engine: Option<&mut dyn EngineModel>,
        sense: ConstrSense,
    ) -> Result<(), ModelError> {
        self.sense = sense;
        self.push(engine, "Sense", AttrValue::Char(sense.code()))
    }

    pub(crate) fn set_name(
        &mut self,
        engine: Option<&mut dyn EngineModel>,
        name: String,
    ) -> Result<(), ModelError> {
        let value = AttrValue::Str(name.clone());
        self.name = Some(name);
        self.push(engine, "ConstrName", value)
    }

    fn push(
        &self,
        engine: Option<&mut dyn EngineModel>,
        engine_name: &str,
        value: AttrValue,
    ) -> Result<(), ModelError> {
        let Some(handle) = self.binding.handle() else {
            return Ok(());
        };
        let engine = engine.ok_or_else(|| unbound_engine(Entity::Constraint, self.id.inner()))?;
        engine.set_constr_attr(handle, lookup_attr(engine_name)?, &value)?;
        Ok(())
    }

    /// Allocate the native row. Every referenced variable must already be
    /// materialized.
    pub fn materialize(
        &mut self,
        engine: &mut dyn EngineModel,
        resolve: ResolveVar<'_>,
    ) -> Result<ConstrHandle, ModelError> {
        if self.binding.is_bound() {
            return Err(ModelError::AlreadyMaterialized {
                entity: Entity::Constraint,
                index: self.id.inner(),
            });
        }
        let lhs = lower_operand(&self.lhs, resolve)?;
        let rhs = lower_rhs(&self.rhs, resolve)?;
        let handle = engine.add_constr(&lhs, self.sense.code(), &rhs, self.name.as_deref())?;
        self.binding
            .bind(handle)
            .map_err(|_| ModelError::AlreadyMaterialized {
                entity: Entity::Constraint,
                index: self.id.inner(),
            })?;
        tracing::trace!(
            component = "constraint",
            operation = "materialize",
            status = "success",
            index = self.id.inner(),
            handle = handle.index(),
            terms = lhs.terms().len(),
            "Allocated native row"
        );
        Ok(handle)
    }

    /// Pull the engine's name back, then flush pending attributes.
    pub fn sync_after_materialize(
        &mut self,
        engine: &mut dyn EngineModel,
    ) -> Result<(), ModelError> {
        let handle = self.handle()?;
        let name_attr = lookup_attr("ConstrName")?;
        match engine.get_constr_attr(handle, name_attr)? {
            AttrValue::Str(name) => self.name = Some(name),
            other => {
                return Err(ModelError::attr_type_mismatch(
                    "ConstrName",
                    name_attr.ty(),
                    other.ty(),
                ));
            }
        }
        let flushed = self
            .binding
            .flush(|h, attr, value| engine.set_constr_attr(h, attr, value))?;
        tracing::trace!(
            component = "constraint",
            operation = "sync",
            status = "success",
            index = self.id.inner(),
            flushed,
            "Synchronized constraint"
        );
        Ok(())
    }

    pub(crate) fn read_attr(
        &self,
        engine: Option<&dyn EngineModel>,
        row: &AttrRow,
    ) -> Result<Option<AttrValue>, ModelError> {
        self.binding
            .read::<ModelError>(row, |handle, attr| match engine {
                Some(engine) => Ok(engine.get_constr_attr(handle, attr)?),
                None => Err(unbound_engine(Entity::Constraint, self.id.inner())),
            })
    }

    pub(crate) fn write_attr(
        &mut self,
        engine: Option<&mut dyn EngineModel>,
        row: &AttrRow,
        value: AttrValue,
    ) -> Result<(), ModelError> {
        if !row.settable() {
            return Err(ModelError::AttributeNotSettable {
                name: row.attr().name(),
            });
        }
        let index = self.id.inner();
        self.binding
            .write::<ModelError>(row, value, |handle, attr, value| match engine {
                Some(engine) => Ok(engine.set_constr_attr(handle, attr, value)?),
                None => Err(unbound_engine(Entity::Constraint, index)),
            })
    }

    /// `IISConstr > 0`; `None` while unbound.
    pub(crate) fn in_iis(
        &self,
        engine: Option<&dyn EngineModel>,
    ) -> Result<Option<bool>, ModelError> {
        let row = tables()?.constr.row("iis_constr")?;
        Ok(self
            .read_attr(engine, row)?
            .map(|value| value.as_f64().is_some_and(|v| v > 0.0)))
    }
}
