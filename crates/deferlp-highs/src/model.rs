//! HiGHS engine model.
//!
//! Columns and rows live here and are lowered to a fresh HiGHS problem for
//! every solve. Newly added columns and rows stay invisible to attribute I/O
//! until [`EngineModel::update`] commits them.

use crate::iis::{self, Iis};
use crate::lp;
use crate::params::ParamStore;
use crate::problem::{Column, Row, is_infinite};
use crate::session::SessionState;
use crate::solve::{self, Outcome};
use deferlp_engine::{
    Attr, AttrValue, ConstrHandle, EngineError, EngineModel, NativeLinExpr, NativeRhs,
    Param, ParamValue, StatusCode, Terminate, VarHandle,
};
use std::fs;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, trace, warn};

#[derive(Debug, Default)]
struct TerminatorState {
    open: bool,
    requested: bool,
}

/// Termination flag shared with whoever wants to stop a running call.
///
/// Requests are accepted from the moment the terminator is handed out for a
/// call until that call returns; anything outside that window is dropped.
/// A request is checked before a solve starts and between IIS feasibility
/// checks. One that lands while HiGHS is solving marks the finished solve
/// interrupted.
#[derive(Debug, Default)]
pub struct HighsTerminator {
    state: Mutex<TerminatorState>,
}

impl HighsTerminator {
    fn lock(&self) -> MutexGuard<'_, TerminatorState> {
        match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    pub fn is_requested(&self) -> bool {
        self.lock().requested
    }

    fn open(&self) {
        let mut state = self.lock();
        state.open = true;
        state.requested = false;
    }

    fn take(&self) -> bool {
        std::mem::take(&mut self.lock().requested)
    }

    /// Stop accepting requests; returns one still pending.
    fn close(&self) -> bool {
        let mut state = self.lock();
        state.open = false;
        std::mem::take(&mut state.requested)
    }
}

impl Terminate for HighsTerminator {
    fn terminate(&self) {
        let mut state = self.lock();
        if state.open {
            state.requested = true;
            debug!(
                component = "engine",
                operation = "terminate",
                status = "success",
                "Termination requested"
            );
        } else {
            debug!(
                component = "engine",
                operation = "terminate",
                status = "warn",
                "No call in progress, termination dropped"
            );
        }
    }
}

/// A HiGHS-backed [`EngineModel`].
#[derive(Debug)]
pub struct HighsModel {
    name: String,
    columns: Vec<Column>,
    rows: Vec<Row>,
    committed_cols: usize,
    committed_rows: usize,
    sense: i32,
    obj_con: f64,
    params: ParamStore,
    session: Arc<SessionState>,
    terminator: Arc<HighsTerminator>,
    outcome: Option<Outcome>,
    iis: Option<Iis>,
    modified: bool,
}

fn data_not_available(what: &str) -> EngineError {
    EngineError::new(
        EngineError::DATA_NOT_AVAILABLE,
        format!("{what} is not available"),
    )
}

fn unknown_attribute(attr: Attr) -> EngineError {
    EngineError::new(
        EngineError::UNKNOWN_ATTRIBUTE,
        format!("unknown attribute {}", attr.name()),
    )
}

fn read_only(attr: Attr) -> EngineError {
    EngineError::new(
        EngineError::INVALID_ARGUMENT,
        format!("attribute {} cannot be set", attr.name()),
    )
}

fn type_mismatch(attr: Attr, value: &AttrValue) -> EngineError {
    EngineError::new(
        EngineError::INVALID_ARGUMENT,
        format!(
            "attribute {} holds {} values, got {}",
            attr.name(),
            attr.ty().as_str(),
            value.ty().as_str()
        ),
    )
}

fn as_double(attr: Attr, value: &AttrValue) -> Result<f64, EngineError> {
    match value {
        AttrValue::Double(v) => Ok(*v),
        other => Err(type_mismatch(attr, other)),
    }
}

fn as_int(attr: Attr, value: &AttrValue) -> Result<i32, EngineError> {
    match value {
        AttrValue::Int(v) => Ok(*v),
        other => Err(type_mismatch(attr, other)),
    }
}

fn as_char(attr: Attr, value: &AttrValue) -> Result<char, EngineError> {
    match value {
        AttrValue::Char(c) => Ok(*c),
        other => Err(type_mismatch(attr, other)),
    }
}

fn as_string(attr: Attr, value: &AttrValue) -> Result<String, EngineError> {
    match value {
        AttrValue::Str(s) => Ok(s.clone()),
        other => Err(type_mismatch(attr, other)),
    }
}

fn check_vtype(vtype: char) -> Result<char, EngineError> {
    match vtype {
        'C' | 'B' | 'I' | 'S' | 'N' => Ok(vtype),
        other => Err(EngineError::new(
            EngineError::INVALID_ARGUMENT,
            format!("invalid variable type {other:?}"),
        )),
    }
}

fn check_sense(sense: char) -> Result<char, EngineError> {
    match sense {
        '<' | '>' | '=' => Ok(sense),
        other => Err(EngineError::new(
            EngineError::INVALID_ARGUMENT,
            format!("invalid constraint sense {other:?}"),
        )),
    }
}

/// Smallest and largest nonzero finite magnitude, `(0, 0)` when none.
fn magnitude_range(values: impl Iterator<Item = f64>) -> (f64, f64) {
    values
        .map(f64::abs)
        .filter(|v| *v > 0.0 && !is_infinite(*v))
        .fold(None, |range: Option<(f64, f64)>, v| match range {
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            None => Some((v, v)),
        })
        .unwrap_or((0.0, 0.0))
}

impl HighsModel {
    pub(crate) fn new(name: &str, params: ParamStore, session: Arc<SessionState>) -> Self {
        Self {
            name: name.to_string(),
            columns: Vec::new(),
            rows: Vec::new(),
            committed_cols: 0,
            committed_rows: 0,
            sense: 1,
            obj_con: 0.0,
            params,
            session,
            terminator: Arc::new(HighsTerminator::default()),
            outcome: None,
            iis: None,
            modified: false,
        }
    }

    fn solve_model(&mut self) -> Result<(), EngineError> {
        self.update()?;
        self.reject_semi_columns()
            .map_err(|err| self.fail("optimize", err))?;
        self.iis = None;
        if self.terminator.take() {
            debug!(
                component = "engine",
                operation = "optimize",
                status = "warn",
                "Solve skipped after termination request"
            );
            self.outcome = Some(Outcome::interrupted());
            return Ok(());
        }
        let outcome = solve::run(
            &self.columns,
            &self.rows,
            self.sense,
            self.obj_con,
            &self.params,
        );
        self.outcome = Some(outcome);
        Ok(())
    }

    /// Close the termination window. A request that arrived while HiGHS
    /// was solving turns the finished solve into an interrupted one; the
    /// solution it found stays readable.
    fn finish_solve(&mut self, result: Result<(), EngineError>) -> Result<(), EngineError> {
        let late = self.terminator.close();
        if !late || result.is_err() {
            return result;
        }
        if let Some(outcome) = self.outcome.as_mut() {
            debug!(
                component = "engine",
                operation = "optimize",
                status = "warn",
                solved_status = outcome.status.name(),
                "Termination requested during solve"
            );
            outcome.status = StatusCode::Interrupted;
        }
        result
    }

    /// Log and remember a failure before handing it back.
    fn fail(&self, operation: &'static str, err: EngineError) -> EngineError {
        warn!(
            component = "engine",
            operation,
            status = "error",
            code = err.code(),
            error = %err,
            "Engine call failed"
        );
        self.session.record(err)
    }

    fn col_index(&self, handle: VarHandle) -> Result<usize, EngineError> {
        let index = handle.index();
        if index < self.committed_cols {
            Ok(index)
        } else if index < self.columns.len() {
            Err(EngineError::new(
                EngineError::NOT_IN_MODEL,
                format!("column {index} is not in the model until update"),
            ))
        } else {
            Err(EngineError::new(
                EngineError::INDEX_OUT_OF_RANGE,
                format!("column {index} does not exist"),
            ))
        }
    }

    fn row_index(&self, handle: ConstrHandle) -> Result<usize, EngineError> {
        let index = handle.index();
        if index < self.committed_rows {
            Ok(index)
        } else if index < self.rows.len() {
            Err(EngineError::new(
                EngineError::NOT_IN_MODEL,
                format!("row {index} is not in the model until update"),
            ))
        } else {
            Err(EngineError::new(
                EngineError::INDEX_OUT_OF_RANGE,
                format!("row {index} does not exist"),
            ))
        }
    }

    fn status(&self) -> StatusCode {
        self.outcome
            .as_ref()
            .map_or(StatusCode::Loaded, |outcome| outcome.status)
    }

    fn primal(&self) -> Result<&solve::Primal, EngineError> {
        self.outcome
            .as_ref()
            .and_then(|outcome| outcome.primal.as_ref())
            .ok_or_else(|| data_not_available("solution"))
    }

    fn iis_result(&self) -> Result<&Iis, EngineError> {
        self.iis.as_ref().ok_or_else(|| data_not_available("IIS"))
    }

    fn reject_semi_columns(&self) -> Result<(), EngineError> {
        match self.columns.iter().find(|c| matches!(c.vtype, 'S' | 'N')) {
            Some(column) => Err(EngineError::new(
                EngineError::NOT_SUPPORTED,
                format!(
                    "semi-continuous column {} is not supported by HiGHS",
                    column.name
                ),
            )),
            None => Ok(()),
        }
    }

    fn lower_row(
        &self,
        lhs: &NativeLinExpr,
        rhs: &NativeRhs,
    ) -> Result<(Vec<(usize, f64)>, f64), EngineError> {
        let mut combined = lhs.clone();
        let rhs_value = match rhs {
            NativeRhs::Const(value) => *value,
            NativeRhs::Expr(expr) => {
                for &(coeff, var) in expr.terms() {
                    combined.add_term(-coeff, var);
                }
                expr.constant()
            }
        };
        let mut terms = Vec::with_capacity(combined.terms().len());
        for (var, coeff) in combined.merged_terms() {
            let index = self.col_index(var)?;
            if coeff != 0.0 {
                terms.push((index, coeff));
            }
        }
        Ok((terms, rhs_value - lhs.constant()))
    }

    fn var_attr(&self, index: usize, attr: Attr) -> Result<AttrValue, EngineError> {
        let column = &self.columns[index];
        let value = match attr.name() {
            "LB" => AttrValue::Double(column.lb),
            "UB" => AttrValue::Double(column.ub),
            "Obj" => AttrValue::Double(column.obj),
            "VType" => AttrValue::Char(column.vtype),
            "VarName" => AttrValue::Str(column.name.clone()),
            "X" | "Xn" => AttrValue::Double(self.primal()?.x[index]),
            "RC" => {
                let rc = self.primal()?.rc.as_ref().ok_or_else(|| {
                    EngineError::new(EngineError::NOT_FOR_MIP, "reduced costs are LP-only")
                })?;
                AttrValue::Double(rc[index])
            }
            "Start" => AttrValue::Double(column.start),
            "PStart" => AttrValue::Double(column.pstart),
            "BranchPriority" => AttrValue::Int(column.branch_priority),
            "VBasis" => AttrValue::Int(column.vbasis.ok_or_else(|| data_not_available("VBasis"))?),
            "IISLB" => AttrValue::Int(i32::from(self.iis_result()?.lb[index])),
            "IISUB" => AttrValue::Int(i32::from(self.iis_result()?.ub[index])),
            "SAObjLow" | "SAObjUp" | "SALBLow" | "SALBUp" | "SAUBLow" | "SAUBUp" | "UnbdRay" => {
                return Err(data_not_available(attr.name()));
            }
            _ => return Err(unknown_attribute(attr)),
        };
        Ok(value)
    }

    fn store_var_attr(
        &mut self,
        index: usize,
        attr: Attr,
        value: &AttrValue,
    ) -> Result<(), EngineError> {
        let column = &mut self.columns[index];
        match attr.name() {
            "LB" => column.lb = as_double(attr, value)?,
            "UB" => column.ub = as_double(attr, value)?,
            "Obj" => column.obj = as_double(attr, value)?,
            "VType" => column.vtype = check_vtype(as_char(attr, value)?)?,
            "VarName" => {
                column.name = as_string(attr, value)?;
                return Ok(());
            }
            "Start" => {
                column.start = as_double(attr, value)?;
                return Ok(());
            }
            "PStart" => {
                column.pstart = as_double(attr, value)?;
                return Ok(());
            }
            "BranchPriority" => {
                column.branch_priority = as_int(attr, value)?;
                return Ok(());
            }
            "VBasis" => {
                column.vbasis = Some(as_int(attr, value)?);
                return Ok(());
            }
            name if deferlp_engine::attrs::resolve(name).is_some() => return Err(read_only(attr)),
            _ => return Err(unknown_attribute(attr)),
        }
        self.modified = true;
        Ok(())
    }

    fn constr_attr(&self, index: usize, attr: Attr) -> Result<AttrValue, EngineError> {
        let row = &self.rows[index];
        let value = match attr.name() {
            "RHS" => AttrValue::Double(row.rhs),
            "Sense" => AttrValue::Char(row.sense),
            "ConstrName" => AttrValue::Str(row.name.clone()),
            "Pi" => {
                let pi = self.primal()?.pi.as_ref().ok_or_else(|| {
                    EngineError::new(EngineError::NOT_FOR_MIP, "duals are LP-only")
                })?;
                AttrValue::Double(pi[index])
            }
            "Slack" => AttrValue::Double(row.rhs - row.activity(&self.primal()?.x)),
            "CBasis" => AttrValue::Int(row.cbasis.ok_or_else(|| data_not_available("CBasis"))?),
            "DStart" => AttrValue::Double(row.dstart),
            "IISConstr" => AttrValue::Int(i32::from(self.iis_result()?.rows[index])),
            "SARHSLow" | "SARHSUp" | "FarkasDual" => {
                return Err(data_not_available(attr.name()));
            }
            _ => return Err(unknown_attribute(attr)),
        };
        Ok(value)
    }

    fn store_constr_attr(
        &mut self,
        index: usize,
        attr: Attr,
        value: &AttrValue,
    ) -> Result<(), EngineError> {
        let row = &mut self.rows[index];
        match attr.name() {
            "RHS" => row.rhs = as_double(attr, value)?,
            "Sense" => row.sense = check_sense(as_char(attr, value)?)?,
            "ConstrName" => {
                row.name = as_string(attr, value)?;
                return Ok(());
            }
            "CBasis" => {
                row.cbasis = Some(as_int(attr, value)?);
                return Ok(());
            }
            "DStart" => {
                row.dstart = as_double(attr, value)?;
                return Ok(());
            }
            name if deferlp_engine::attrs::resolve(name).is_some() => return Err(read_only(attr)),
            _ => return Err(unknown_attribute(attr)),
        }
        self.modified = true;
        Ok(())
    }

    fn model_attr(&self, attr: Attr) -> Result<AttrValue, EngineError> {
        let columns = &self.columns[..self.committed_cols];
        let rows = &self.rows[..self.committed_rows];
        let count = |n: usize| AttrValue::Int(i32::try_from(n).unwrap_or(i32::MAX));
        let outcome = || self.outcome.as_ref().ok_or_else(|| data_not_available(attr.name()));
        let value = match attr.name() {
            "ModelName" => AttrValue::Str(self.name.clone()),
            "ModelSense" => AttrValue::Int(self.sense),
            "ObjCon" => AttrValue::Double(self.obj_con),
            "NumVars" => count(columns.len()),
            "NumConstrs" => count(rows.len()),
            "NumNZs" => count(rows.iter().map(|row| row.terms.len()).sum()),
            "NumIntVars" => count(columns.iter().filter(|c| c.vtype != 'C').count()),
            "NumBinVars" => count(columns.iter().filter(|c| c.vtype == 'B').count()),
            "NumSOS" | "NumQConstrs" | "NumQNZs" | "NumQCNZs" | "IsQP" | "IsQCP" => {
                AttrValue::Int(0)
            }
            "IsMIP" => AttrValue::Int(i32::from(columns.iter().any(|c| c.vtype != 'C'))),
            "Status" => AttrValue::Int(self.status().code()),
            "SolCount" => AttrValue::Int(i32::from(self.primal().is_ok())),
            "ObjVal" => AttrValue::Double(self.primal()?.obj_val),
            "ObjBound" => match outcome()?.obj_bound {
                Some(bound) => AttrValue::Double(bound),
                None if self.status() == StatusCode::Optimal => {
                    AttrValue::Double(self.primal()?.obj_val)
                }
                None => return Err(data_not_available(attr.name())),
            },
            "MIPGap" => match outcome()?.mip_gap {
                Some(gap) => AttrValue::Double(gap),
                None => return Err(data_not_available("MIPGap of a continuous model")),
            },
            "Runtime" => AttrValue::Double(outcome()?.runtime),
            "IterCount" => AttrValue::Double(outcome()?.iter_count),
            "BarIterCount" => AttrValue::Int(outcome()?.bar_iter_count),
            "NodeCount" => AttrValue::Double(outcome()?.node_count),
            "IISMinimal" => AttrValue::Int(i32::from(self.iis_result()?.minimal)),
            "MaxCoeff" | "MinCoeff" => {
                let (lo, hi) = magnitude_range(
                    rows.iter()
                        .flat_map(|row| row.terms.iter().map(|&(_, coeff)| coeff)),
                );
                AttrValue::Double(if attr.name() == "MaxCoeff" { hi } else { lo })
            }
            "MaxBound" | "MinBound" => {
                let (lo, hi) = magnitude_range(columns.iter().flat_map(|c| [c.lb, c.ub]));
                AttrValue::Double(if attr.name() == "MaxBound" { hi } else { lo })
            }
            "MaxObjCoeff" | "MinObjCoeff" => {
                let (lo, hi) = magnitude_range(columns.iter().map(|c| c.obj));
                AttrValue::Double(if attr.name() == "MaxObjCoeff" { hi } else { lo })
            }
            "MaxRHS" | "MinRHS" => {
                let (lo, hi) = magnitude_range(rows.iter().map(|row| row.rhs));
                AttrValue::Double(if attr.name() == "MaxRHS" { hi } else { lo })
            }
            "Kappa" | "KappaExact" | "FarkasProof" => {
                return Err(data_not_available(attr.name()));
            }
            _ => return Err(unknown_attribute(attr)),
        };
        Ok(value)
    }

    fn store_model_attr(&mut self, attr: Attr, value: &AttrValue) -> Result<(), EngineError> {
        match attr.name() {
            "ModelName" => {
                self.name = as_string(attr, value)?;
                return Ok(());
            }
            "ModelSense" => match as_int(attr, value)? {
                sense @ (1 | -1) => self.sense = sense,
                other => {
                    return Err(EngineError::new(
                        EngineError::INVALID_ARGUMENT,
                        format!("invalid model sense {other}"),
                    ));
                }
            },
            "ObjCon" => self.obj_con = as_double(attr, value)?,
            name if deferlp_engine::attrs::resolve(name).is_some() => return Err(read_only(attr)),
            _ => return Err(unknown_attribute(attr)),
        }
        self.modified = true;
        Ok(())
    }

    fn write_file(&self, path: &Path) -> Result<(), EngineError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        let rendered = match extension.as_str() {
            "lp" => lp::render_lp(&self.name, &self.columns, &self.rows, self.sense, self.obj_con),
            "sol" => {
                let primal = self.primal()?;
                lp::render_sol(&self.name, &self.columns, &primal.x, primal.obj_val)
            }
            "prm" => return self.params.write_file(path),
            _ => {
                return Err(EngineError::new(
                    EngineError::FILE_WRITE,
                    format!("unsupported file type for {}", path.display()),
                ));
            }
        };
        let text = rendered.map_err(|err| {
            EngineError::new(
                EngineError::FILE_WRITE,
                format!("cannot render {}: {err}", path.display()),
            )
        })?;
        fs::write(path, text).map_err(|err| {
            EngineError::new(
                EngineError::FILE_WRITE,
                format!("cannot write {}: {err}", path.display()),
            )
        })
    }
}

impl EngineModel for HighsModel {
    fn add_var(
        &mut self,
        lb: f64,
        ub: f64,
        obj: f64,
        vtype: char,
        name: Option<&str>,
    ) -> Result<VarHandle, EngineError> {
        let vtype = check_vtype(vtype).map_err(|err| self.fail("add_var", err))?;
        let index = self.columns.len();
        let name = match name {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => format!("C{index}"),
        };
        trace!(
            component = "engine",
            operation = "add_var",
            status = "success",
            index,
            lb,
            ub,
            obj,
            vtype = %vtype,
            "Adding column"
        );
        self.columns.push(Column::new(lb, ub, obj, vtype, name));
        self.modified = true;
        Ok(VarHandle::new(index))
    }

    fn add_constr(
        &mut self,
        lhs: &NativeLinExpr,
        sense: char,
        rhs: &NativeRhs,
        name: Option<&str>,
    ) -> Result<ConstrHandle, EngineError> {
        let sense = check_sense(sense).map_err(|err| self.fail("add_constr", err))?;
        let (terms, rhs) = self
            .lower_row(lhs, rhs)
            .map_err(|err| self.fail("add_constr", err))?;
        let index = self.rows.len();
        let name = match name {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => format!("R{index}"),
        };
        trace!(
            component = "engine",
            operation = "add_constr",
            status = "success",
            index,
            num_coeffs = terms.len(),
            sense = %sense,
            rhs,
            "Adding row"
        );
        self.rows.push(Row::new(terms, sense, rhs, name));
        self.modified = true;
        Ok(ConstrHandle::new(index))
    }

    fn update(&mut self) -> Result<(), EngineError> {
        let new_cols = self.columns.len() - self.committed_cols;
        let new_rows = self.rows.len() - self.committed_rows;
        self.committed_cols = self.columns.len();
        self.committed_rows = self.rows.len();
        if self.modified {
            self.outcome = None;
            self.iis = None;
            self.modified = false;
        }
        trace!(
            component = "engine",
            operation = "update",
            status = "success",
            new_cols,
            new_rows,
            "Committed pending columns and rows"
        );
        Ok(())
    }

    fn get_var_attr(&self, var: VarHandle, attr: Attr) -> Result<AttrValue, EngineError> {
        self.col_index(var)
            .and_then(|index| self.var_attr(index, attr))
            .map_err(|err| self.session.record(err))
    }

    fn set_var_attr(
        &mut self,
        var: VarHandle,
        attr: Attr,
        value: &AttrValue,
    ) -> Result<(), EngineError> {
        let result = self
            .col_index(var)
            .and_then(|index| self.store_var_attr(index, attr, value));
        result.map_err(|err| self.fail("set_var_attr", err))
    }

    fn get_constr_attr(&self, constr: ConstrHandle, attr: Attr) -> Result<AttrValue, EngineError> {
        self.row_index(constr)
            .and_then(|index| self.constr_attr(index, attr))
            .map_err(|err| self.session.record(err))
    }

    fn set_constr_attr(
        &mut self,
        constr: ConstrHandle,
        attr: Attr,
        value: &AttrValue,
    ) -> Result<(), EngineError> {
        let result = self
            .row_index(constr)
            .and_then(|index| self.store_constr_attr(index, attr, value));
        result.map_err(|err| self.fail("set_constr_attr", err))
    }

    fn get_model_attr(&self, attr: Attr) -> Result<AttrValue, EngineError> {
        self.model_attr(attr)
            .map_err(|err| self.session.record(err))
    }

    fn set_model_attr(&mut self, attr: Attr, value: &AttrValue) -> Result<(), EngineError> {
        let result = self.store_model_attr(attr, value);
        result.map_err(|err| self.fail("set_model_attr", err))
    }

    fn set_objective(&mut self, expr: &NativeLinExpr) -> Result<(), EngineError> {
        let mut costs = vec![0.0; self.columns.len()];
        for (var, coeff) in expr.merged_terms() {
            let index = self
                .col_index(var)
                .map_err(|err| self.fail("set_objective", err))?;
            costs[index] = coeff;
        }
        for (column, cost) in self.columns.iter_mut().zip(costs) {
            column.obj = cost;
        }
        self.obj_con = expr.constant();
        self.modified = true;
        debug!(
            component = "engine",
            operation = "set_objective",
            status = "success",
            num_terms = expr.terms().len(),
            constant = self.obj_con,
            "Replaced objective"
        );
        Ok(())
    }

    fn set_param(&mut self, param: Param, value: ParamValue) -> Result<(), EngineError> {
        let result = self.params.set(param, value);
        result.map_err(|err| self.fail("set_param", err))
    }

    fn optimize(&mut self) -> Result<(), EngineError> {
        let result = self.solve_model();
        self.finish_solve(result)
    }

    fn compute_iis(&mut self) -> Result<(), EngineError> {
        self.update()?;
        self.reject_semi_columns()
            .map_err(|err| self.fail("compute_iis", err))?;
        let terminator = Arc::clone(&self.terminator);
        let result = iis::deletion_filter(&self.columns, &self.rows, &self.params, || {
            terminator.take()
        });
        terminator.close();
        match result {
            Ok(found) => {
                self.iis = Some(found);
                Ok(())
            }
            Err(err) => Err(self.fail("compute_iis", err)),
        }
    }

    fn write(&mut self, path: &Path) -> Result<(), EngineError> {
        self.update()?;
        self.write_file(path)
            .map_err(|err| self.fail("write", err))?;
        debug!(
            component = "engine",
            operation = "write",
            status = "success",
            path = %path.display(),
            "Wrote model file"
        );
        Ok(())
    }

    fn terminator(&self) -> Arc<dyn Terminate> {
        self.terminator.open();
        self.terminator.clone()
    }
}
