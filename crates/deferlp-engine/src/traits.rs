//! Engine traits for abstraction over different solver backends.

use crate::{
    Attr, AttrValue, ConstrHandle, EngineError, NativeLinExpr, NativeRhs, Param, ParamInfo,
    ParamValue, VarHandle,
};
use std::path::Path;
use std::sync::Arc;

/// Asks an in-progress engine call to stop.
///
/// Implementations must be callable from any thread while the owning model
/// is busy inside `optimize` or `compute_iis`.
pub trait Terminate: Send + Sync {
    fn terminate(&self);
}

/// A live engine context: parameters, diagnostics and model creation.
///
/// Sessions are shared between every model created from them, so all
/// methods take `&self`.
pub trait Session: Send + Sync {
    /// Create an empty engine model. Its parameters start as a copy of the
    /// session's parameters.
    fn new_model(&self, name: &str) -> Result<Box<dyn EngineModel>, EngineError>;

    fn get_param(&self, param: Param) -> Result<ParamValue, EngineError>;

    /// Set a parameter. The value's storage class must match the parameter.
    fn set_param(&self, param: Param, value: ParamValue) -> Result<(), EngineError>;

    fn param_info(&self, param: Param) -> Result<ParamInfo, EngineError>;

    /// Restore every parameter to its default.
    fn reset_params(&self) -> Result<(), EngineError>;

    fn read_params(&self, path: &Path) -> Result<(), EngineError>;

    fn write_params(&self, path: &Path) -> Result<(), EngineError>;

    /// Text of the most recent error, empty if none.
    fn error_message(&self) -> String;

    /// Emit a message through the session's log.
    fn message(&self, text: &str);

    /// Release engine resources. The session is unusable afterwards.
    fn dispose(&self);
}

/// A native model owned by exactly one logical model.
///
/// New columns and rows only become addressable for attribute I/O after
/// `update` (the structural-update barrier).
pub trait EngineModel: Send {
    /// Allocate a column. `vtype` is the engine type code (`C`, `B`, `I`, `S`, `N`).
    fn add_var(
        &mut self,
        lb: f64,
        ub: f64,
        obj: f64,
        vtype: char,
        name: Option<&str>,
    ) -> Result<VarHandle, EngineError>;

    /// Allocate a row `lhs sense rhs`. `sense` is `<`, `>` or `=`.
    fn add_constr(
        &mut self,
        lhs: &NativeLinExpr,
        sense: char,
        rhs: &NativeRhs,
        name: Option<&str>,
    ) -> Result<ConstrHandle, EngineError>;

    /// Cross the structural-update barrier.
    fn update(&mut self) -> Result<(), EngineError>;

    fn get_var_attr(&self, var: VarHandle, attr: Attr) -> Result<AttrValue, EngineError>;

    fn set_var_attr(
        &mut self,
        var: VarHandle,
        attr: Attr,
        value: &AttrValue,
    ) -> Result<(), EngineError>;

    fn get_constr_attr(&self, constr: ConstrHandle, attr: Attr) -> Result<AttrValue, EngineError>;

    fn set_constr_attr(
        &mut self,
        constr: ConstrHandle,
        attr: Attr,
        value: &AttrValue,
    ) -> Result<(), EngineError>;

    fn get_model_attr(&self, attr: Attr) -> Result<AttrValue, EngineError>;

    fn set_model_attr(&mut self, attr: Attr, value: &AttrValue) -> Result<(), EngineError>;

    /// Replace the objective. The constant becomes `ObjCon`.
    fn set_objective(&mut self, expr: &NativeLinExpr) -> Result<(), EngineError>;

    /// Parameters private to this model.
    fn set_param(&mut self, param: Param, value: ParamValue) -> Result<(), EngineError>;

    fn optimize(&mut self) -> Result<(), EngineError>;

    /// Compute an irreducible inconsistent subsystem. Results are reported
    /// through the `IISLB`, `IISUB`, `IISConstr` and `IISMinimal` attributes.
    fn compute_iis(&mut self) -> Result<(), EngineError>;

    /// Persist the model. The format is chosen by the engine from the path.
    fn write(&mut self, path: &Path) -> Result<(), EngineError>;

    /// A handle that stops the running `optimize` or `compute_iis`.
    fn terminator(&self) -> Arc<dyn Terminate>;
}
