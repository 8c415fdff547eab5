//! Decision variables.

use crate::attributes::{AttrRow, tables};
use crate::binding::Binding;
use crate::model::{Entity, ModelError};
use crate::types::{Bounds, VarType, normalize_bound};
use deferlp_engine::{AttrValue, EngineModel, VarHandle};
use deferlp_expr::{LinExpr, VarId};

/// A named decision variable owned by one model.
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    id: VarId,
    lb: f64,
    ub: f64,
    obj: f64,
    kind: VarType,
    name: Option<String>,
    pub(crate) binding: Binding<VarHandle>,
}

impl Variable {
    pub(crate) fn new(
        id: VarId,
        bounds: Bounds,
        obj: f64,
        kind: VarType,
        name: Option<String>,
    ) -> Self {
        Self {
            id,
            lb: normalize_bound(bounds.lower),
            ub: normalize_bound(bounds.upper),
            obj,
            kind,
            name,
            binding: Binding::default(),
        }
    }

    pub fn id(&self) -> VarId {
        self.id
    }

    pub fn lb(&self) -> f64 {
        self.lb
    }

    pub fn ub(&self) -> f64 {
        self.ub
    }

    pub fn obj(&self) -> f64 {
        self.obj
    }

    pub fn kind(&self) -> VarType {
        self.kind
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn is_binary(&self) -> bool {
        self.kind == VarType::Binary
    }

    pub fn is_continuous(&self) -> bool {
        self.kind == VarType::Continuous
    }

    pub fn is_integer(&self) -> bool {
        self.kind == VarType::Integer
    }

    pub fn is_materialized(&self) -> bool {
        self.binding.is_bound()
    }

    /// Native handle; fails until the owning model has run `update`.
    pub fn handle(&self) -> Result<VarHandle, ModelError> {
        self.binding
            .handle()
            .ok_or(ModelError::NotYetMaterialized {
                entity: Entity::Variable,
                index: self.id.inner(),
            })
    }

    pub fn to_lin_expr(&self) -> LinExpr {
        LinExpr::var(self.id)
    }

    pub(crate) fn set_lb(
        &mut self,
        engine: Option<&mut dyn EngineModel>,
        lb: f64,
    ) -> Result<(), ModelError> {
        self.lb = normalize_bound(lb);
        self.push(engine, "LB", AttrValue::Double(self.lb))
    }

    pub(crate) fn set_ub(
        &mut self,
        engine: Option<&mut dyn EngineModel>,
        ub: f64,
    ) -> Result<(), ModelError> {
        self.ub = normalize_bound(ub);
        self.push(engine, "UB", AttrValue::Double(self.ub))
    }

    pub(crate) fn set_obj(
        &mut self,
        engine: Option<&mut dyn EngineModel>,
        obj: f64,
    ) -> Result<(), ModelError> {
        self.obj = obj;
        self.push(engine, "Obj", AttrValue::Double(obj))
    }

    pub(crate) fn set_kind(
        &mut self,
        engine: Option<&mut dyn EngineModel>,
        kind: VarType,
    ) -> Result<(), ModelError> {
        self.kind = kind;
        self.push(engine, "VType", AttrValue::Char(kind.code()))
    }

    pub(crate) fn set_name(
        &mut self,
        engine: Option<&mut dyn EngineModel>,
        name: String,
    ) -> Result<(), ModelError> {
        let value = AttrValue::Str(name.clone());
        self.name = Some(name);
        self.push(engine, "VarName", value)
    }

    /// Push a core field to the engine when bound.
    fn push(
        &self,
        engine: Option<&mut dyn EngineModel>,
        engine_name: &str,
        value: AttrValue,
    ) -> Result<(), ModelError> {
        let Some(handle) = self.binding.handle() else {
            return Ok(());
        };
        let engine = engine.ok_or_else(|| unbound_engine(Entity::Variable, self.id.inner()))?;
        let attr = crate::attributes::lookup_attr(engine_name)?;
        engine.set_var_attr(handle, attr, &value)?;
        Ok(())
    }

    /// Allocate the native column. Fails if already materialized, keeping
    /// the first handle.
    pub fn materialize(&mut self, engine: &mut dyn EngineModel) -> Result<VarHandle, ModelError> {
        if self.binding.is_bound() {
            return Err(ModelError::AlreadyMaterialized {
                entity: Entity::Variable,
                index: self.id.inner(),
            });
        }
        let handle = engine.add_var(
            self.lb,
            self.ub,
            self.obj,
            self.kind.code(),
            self.name.as_deref(),
        )?;
        self.binding
            .bind(handle)
            .map_err(|_| ModelError::AlreadyMaterialized {
                entity: Entity::Variable,
                index: self.id.inner(),
            })?;
        tracing::trace!(
            component = "variable",
            operation = "materialize",
            status = "success",
            index = self.id.inner(),
            handle = handle.index(),
            "Allocated native column"
        );
        Ok(handle)
    }

    /// Pull the engine's name back, then flush pending attributes.
    ///
    /// Only valid after the engine's structural-update barrier.
    pub fn sync_after_materialize(
        &mut self,
        engine: &mut dyn EngineModel,
    ) -> Result<(), ModelError> {
        let handle = self.handle()?;
        let name_attr = crate::attributes::lookup_attr("VarName")?;
        let name = engine.get_var_attr(handle, name_attr)?;
        match name {
            AttrValue::Str(name) => self.name = Some(name),
            other => {
                return Err(ModelError::attr_type_mismatch(
                    "VarName",
                    name_attr.ty(),
                    other.ty(),
                ));
            }
        }
        let flushed = self
            .binding
            .flush(|h, attr, value| engine.set_var_attr(h, attr, value))?;
        tracing::trace!(
            component = "variable",
            operation = "sync",
            status = "success",
            index = self.id.inner(),
            flushed,
            "Synchronized variable"
        );
        Ok(())
    }

    pub(crate) fn read_attr(
        &self,
        engine: Option<&dyn EngineModel>,
        row: &AttrRow,
    ) -> Result<Option<AttrValue>, ModelError> {
        self.binding.read::<ModelError>(row, |handle, attr| match engine {
            Some(engine) => Ok(engine.get_var_attr(handle, attr)?),
            None => Err(unbound_engine(Entity::Variable, self.id.inner())),
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
        self.binding.write::<ModelError>(row, value, |handle, attr, value| match engine {
            Some(engine) => Ok(engine.set_var_attr(handle, attr, value)?),
            None => Err(unbound_engine(Entity::Variable, index)),
        })
    }

    /// `IISLB > 0 || IISUB > 0`; `None` while unbound.
    pub(crate) fn in_iis(
        &self,
        engine: Option<&dyn EngineModel>,
    ) -> Result<Option<bool>, ModelError> {
        let table = &tables()?.var;
        let lb = self.read_attr(engine, table.row("iis_lb")?)?;
        let ub = self.read_attr(engine, table.row("iis_ub")?)?;
        Ok(match (lb, ub) {
            (Some(lb), Some(ub)) => Some(
                lb.as_f64().is_some_and(|v| v > 0.0) || ub.as_f64().is_some_and(|v| v > 0.0),
            ),
            _ => None,
        })
    }
}

pub(crate) fn unbound_engine(entity: Entity, index: u32) -> ModelError {
    ModelError::Invariant {
        reason: format!("{} {index} is bound but the model has no engine", entity.as_str()),
    }
}

impl std::fmt::Display for Variable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.name.as_deref().unwrap_or(""), self.kind.code())
    }
}
