//! Generated attribute accessors.
//!
//! Each table below is the single declaration of an entity's attributes:
//! the engine name, the accessor, its Rust type, and (for settable rows) a
//! setter. The same table feeds the registry in [`crate::attributes`] and
//! expands into typed methods on the view types.
//!
//! Variable and constraint views follow the bind-aware policy: before
//! materialization a settable attribute reads back its pending value and a
//! read-only one reads as `None`. Model attributes always go through the
//! engine model, creating it on first access.

use crate::attributes::{AttrScalar, AttrSpec, coerce_value, tables};
use crate::model::{Model, ModelError, engine_mut};
use deferlp_engine::AttrValue;
use deferlp_expr::{ConstrId, VarId};

macro_rules! attribute_table {
    (@settable) => {
        false
    };
    (@settable $setter:ident) => {
        true
    };
    (
        $specs:ident for $view:ident {
            $( $engine:literal => $getter:ident: $ty:ty $(, $setter:ident)?; )*
        }
    ) => {
        pub(crate) const $specs: &[AttrSpec] = &[
            $(
                AttrSpec::new(
                    $engine,
                    stringify!($getter),
                    attribute_table!(@settable $($setter)?),
                ),
            )*
        ];

        impl $view<'_> {
            $(
                #[doc = concat!("The `", $engine, "` attribute.")]
                pub fn $getter(&self) -> Result<Option<$ty>, ModelError> {
                    self.typed(stringify!($getter))
                }

                $(
                    #[doc = concat!("Set the `", $engine, "` attribute.")]
                    pub fn $setter(&mut self, value: $ty) -> Result<(), ModelError> {
                        self.set(stringify!($getter), AttrScalar::into_attr_value(value))
                    }
                )?
            )*
        }
    };
}

/// Attribute access for one variable.
pub struct VarAttrs<'m> {
    model: &'m mut Model,
    id: VarId,
}

/// Attribute access for one constraint.
pub struct ConstrAttrs<'m> {
    model: &'m mut Model,
    id: ConstrId,
}

/// Attribute access for the engine model itself.
pub struct ModelAttrs<'m> {
    model: &'m mut Model,
}

impl Model {
    pub fn var_attrs(&mut self, id: VarId) -> Result<VarAttrs<'_>, ModelError> {
        self.var(id)?;
        Ok(VarAttrs { model: self, id })
    }

    pub fn constr_attrs(&mut self, id: ConstrId) -> Result<ConstrAttrs<'_>, ModelError> {
        self.constr(id)?;
        Ok(ConstrAttrs { model: self, id })
    }

    /// Model-level attributes. Creates the engine model if needed, so this
    /// fails with `SessionMissing` before a session is attached.
    pub fn attrs(&mut self) -> Result<ModelAttrs<'_>, ModelError> {
        self.ensure_engine()?;
        Ok(ModelAttrs { model: self })
    }
}

fn typed_value<T: AttrScalar>(
    accessor: &str,
    value: Option<AttrValue>,
) -> Result<Option<T>, ModelError> {
    value
        .map(|value| T::from_attr_value(accessor, value))
        .transpose()
}

impl VarAttrs<'_> {
    pub fn id(&self) -> VarId {
        self.id
    }

    /// Read by accessor name, e.g. `"x"` or `"start"`.
    pub fn get(&self, accessor: &str) -> Result<Option<AttrValue>, ModelError> {
        let row = tables()?.var.row(accessor)?;
        self.model
            .var(self.id)?
            .read_attr(self.model.engine.as_deref(), row)
    }

    /// Write by accessor name. Read-only rows are rejected.
    pub fn set(&mut self, accessor: &str, value: AttrValue) -> Result<(), ModelError> {
        let row = tables()?.var.row(accessor)?;
        let value = coerce_value(row, value)?;
        let model = &mut *self.model;
        let var = model
            .vars
            .get_mut(self.id.index())
            .ok_or(ModelError::InvalidVariableId(self.id))?;
        var.write_attr(engine_mut(&mut model.engine), row, value)
    }

    fn typed<T: AttrScalar>(&self, accessor: &str) -> Result<Option<T>, ModelError> {
        typed_value(accessor, self.get(accessor)?)
    }
}

impl ConstrAttrs<'_> {
    pub fn id(&self) -> ConstrId {
        self.id
    }

    pub fn get(&self, accessor: &str) -> Result<Option<AttrValue>, ModelError> {
        let row = tables()?.constr.row(accessor)?;
        self.model
            .constr(self.id)?
            .read_attr(self.model.engine.as_deref(), row)
    }

    pub fn set(&mut self, accessor: &str, value: AttrValue) -> Result<(), ModelError> {
        let row = tables()?.constr.row(accessor)?;
        let value = coerce_value(row, value)?;
        let model = &mut *self.model;
        let constr = model
            .constrs
            .get_mut(self.id.index())
            .ok_or(ModelError::InvalidConstraintId(self.id))?;
        constr.write_attr(engine_mut(&mut model.engine), row, value)
    }

    fn typed<T: AttrScalar>(&self, accessor: &str) -> Result<Option<T>, ModelError> {
        typed_value(accessor, self.get(accessor)?)
    }
}

impl ModelAttrs<'_> {
    /// Live read; `Some` whenever the engine answers.
    pub fn get(&self, accessor: &str) -> Result<Option<AttrValue>, ModelError> {
        let row = tables()?.model.row(accessor)?;
        let engine = self
            .model
            .engine
            .as_deref()
            .ok_or(ModelError::SessionMissing)?;
        Ok(Some(engine.get_model_attr(row.attr())?))
    }

    pub fn set(&mut self, accessor: &str, value: AttrValue) -> Result<(), ModelError> {
        let row = tables()?.model.row(accessor)?;
        if !row.settable() {
            return Err(ModelError::AttributeNotSettable {
                name: row.attr().name(),
            });
        }
        let value = coerce_value(row, value)?;
        let engine = self
            .model
            .engine
            .as_mut()
            .ok_or(ModelError::SessionMissing)?;
        engine.set_model_attr(row.attr(), &value)?;
        Ok(())
    }

    fn typed<T: AttrScalar>(&self, accessor: &str) -> Result<Option<T>, ModelError> {
        typed_value(accessor, self.get(accessor)?)
    }
}

attribute_table! {
    VAR_ATTR_SPECS for VarAttrs {
        "X" => x: f64;
        "Xn" => xn: f64;
        "RC" => rc: f64;
        "Start" => start: f64, set_start;
        "BranchPriority" => branch_priority: i32, set_branch_priority;
        "VBasis" => v_basis: i32, set_v_basis;
        "PStart" => p_start: f64, set_p_start;
        "IISLB" => iis_lb: i32;
        "IISUB" => iis_ub: i32;
        "SAObjLow" => sa_obj_low: f64;
        "SAObjUp" => sa_obj_up: f64;
        "SALBLow" => sa_lb_low: f64;
        "SALBUp" => sa_lb_up: f64;
        "SAUBLow" => sa_ub_low: f64;
        "SAUBUp" => sa_ub_up: f64;
        "UnbdRay" => unbd_ray: f64;
    }
}

attribute_table! {
    CONSTR_ATTR_SPECS for ConstrAttrs {
        "Pi" => pi: f64;
        "Slack" => slack: f64;
        "CBasis" => c_basis: i32, set_c_basis;
        "DStart" => d_start: f64, set_d_start;
        "IISConstr" => iis_constr: i32;
        "SARHSLow" => sa_rhs_low: f64;
        "SARHSUp" => sa_rhs_up: f64;
        "FarkasDual" => farkas_dual: f64;
    }
}

attribute_table! {
    MODEL_ATTR_SPECS for ModelAttrs {
        "NumConstrs" => num_constrs: i32;
        "NumVars" => num_vars: i32;
        "NumSOS" => num_sos: i32;
        "NumQConstrs" => num_q_constrs: i32;
        "NumNZs" => num_nzs: i32;
        "NumQNZs" => num_q_nzs: i32;
        "NumQCNZs" => num_qc_nzs: i32;
        "NumIntVars" => num_int_vars: i32;
        "NumBinVars" => num_bin_vars: i32;
        "ModelName" => model_name: String, set_model_name;
        "ObjCon" => obj_con: f64, set_obj_con;
        "ObjVal" => obj_val: f64;
        "ObjBound" => obj_bound: f64;
        "Runtime" => runtime: f64;
        "SolCount" => sol_count: i32;
        "IterCount" => iter_count: f64;
        "BarIterCount" => bar_iter_count: i32;
        "NodeCount" => node_count: f64;
        "IsMIP" => is_mip: bool;
        "IsQP" => is_qp: bool;
        "IsQCP" => is_qcp: bool;
        "IISMinimal" => iis_minimal: i32;
        "MaxCoeff" => max_coeff: f64;
        "MinCoeff" => min_coeff: f64;
        "MaxBound" => max_bound: f64;
        "MinBound" => min_bound: f64;
        "MaxObjCoeff" => max_obj_coeff: f64;
        "MinObjCoeff" => min_obj_coeff: f64;
        "MaxRHS" => max_rhs: f64;
        "MinRHS" => min_rhs: f64;
        "Kappa" => kappa: f64;
        "KappaExact" => kappa_exact: f64;
        "FarkasProof" => farkas_proof: f64;
    }
}
