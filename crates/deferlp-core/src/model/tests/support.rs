//! A recording in-memory engine.

use crate::env::Env;
use deferlp_engine::params;
use deferlp_engine::{
    Attr, AttrValue, ConstrHandle, EngineError, EngineModel, NativeLinExpr, NativeRhs, Param,
    ParamInfo, ParamValue, Session, StatusCode, Terminate, VarHandle,
};
use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

type Hook = Arc<dyn Fn() + Send + Sync>;

#[derive(Default)]
struct Shared {
    calls: Vec<String>,
    params: HashMap<&'static str, ParamValue>,
    on_optimize: Option<Hook>,
}

/// Call log shared by a session and every model it creates.
#[derive(Clone, Default)]
pub(super) struct Recorder(Arc<Mutex<Shared>>);

impl Recorder {
    fn lock(&self) -> MutexGuard<'_, Shared> {
        self.0.lock().expect("recorder lock")
    }

    fn record(&self, call: impl Into<String>) {
        self.lock().calls.push(call.into());
    }

    pub(super) fn calls(&self) -> Vec<String> {
        self.lock().calls.clone()
    }

    pub(super) fn clear(&self) {
        self.lock().calls.clear();
    }

    pub(super) fn count(&self, call: &str) -> usize {
        self.lock().calls.iter().filter(|c| c.as_str() == call).count()
    }

    /// Run `hook` inside every subsequent `optimize`.
    pub(super) fn on_optimize(&self, hook: impl Fn() + Send + Sync + 'static) {
        self.lock().on_optimize = Some(Arc::new(hook));
    }
}

pub(super) fn recording_env() -> (Env, Recorder) {
    let recorder = Recorder::default();
    let env = Env::from_session(FakeSession {
        recorder: recorder.clone(),
    });
    (env, recorder)
}

fn not_available(what: &str) -> EngineError {
    EngineError::new(EngineError::DATA_NOT_AVAILABLE, format!("{what} not available"))
}

struct FakeSession {
    recorder: Recorder,
}

impl Session for FakeSession {
    fn new_model(&self, _name: &str) -> Result<Box<dyn EngineModel>, EngineError> {
        self.recorder.record("new_model");
        Ok(Box::new(FakeModel::new(self.recorder.clone())))
    }

    fn get_param(&self, param: Param) -> Result<ParamValue, EngineError> {
        if let Some(value) = self.recorder.lock().params.get(param.name()) {
            return Ok(value.clone());
        }
        params::definition(param)
            .map(|(ns, def)| ns.default_value(def))
            .ok_or_else(|| EngineError::new(EngineError::UNKNOWN_PARAMETER, param.name()))
    }

    fn set_param(&self, param: Param, value: ParamValue) -> Result<(), EngineError> {
        self.recorder.record(format!("set_param {}", param.name()));
        self.recorder.lock().params.insert(param.name(), value);
        Ok(())
    }

    fn param_info(&self, param: Param) -> Result<ParamInfo, EngineError> {
        let current = self.get_param(param)?;
        let (ns, def) = params::definition(param)
            .ok_or_else(|| EngineError::new(EngineError::UNKNOWN_PARAMETER, param.name()))?;
        let (min, max) = ns.range(def);
        Ok(ParamInfo {
            param,
            current,
            min,
            max,
            default: ns.default_value(def),
        })
    }

    fn reset_params(&self) -> Result<(), EngineError> {
        self.recorder.record("reset_params");
        self.recorder.lock().params.clear();
        Ok(())
    }

    fn read_params(&self, path: &Path) -> Result<(), EngineError> {
        self.recorder.record(format!("read_params {}", path.display()));
        Ok(())
    }

    fn write_params(&self, path: &Path) -> Result<(), EngineError> {
        self.recorder.record(format!("write_params {}", path.display()));
        Ok(())
    }

    fn error_message(&self) -> String {
        String::new()
    }

    fn message(&self, text: &str) {
        self.recorder.record(format!("message {text}"));
    }

    fn dispose(&self) {
        self.recorder.record("dispose");
    }
}

struct Column {
    lb: f64,
    ub: f64,
    obj: f64,
    vtype: char,
    name: String,
    attrs: HashMap<&'static str, AttrValue>,
}

struct Row {
    sense: char,
    name: String,
    attrs: HashMap<&'static str, AttrValue>,
}

struct Stop(AtomicBool);

impl Terminate for Stop {
    fn terminate(&self) {
        self.0.store(true, Ordering::SeqCst);
    }
}

struct FakeModel {
    recorder: Recorder,
    cols: Vec<Column>,
    rows: Vec<Row>,
    committed_cols: usize,
    committed_rows: usize,
    attrs: HashMap<&'static str, AttrValue>,
    stop: Arc<Stop>,
}

impl FakeModel {
    fn new(recorder: Recorder) -> Self {
        let mut attrs = HashMap::new();
        attrs.insert("Status", AttrValue::Int(StatusCode::Loaded.code()));
        attrs.insert("ModelName", AttrValue::Str(String::new()));
        attrs.insert("ObjCon", AttrValue::Double(0.0));
        Self {
            recorder,
            cols: Vec::new(),
            rows: Vec::new(),
            committed_cols: 0,
            committed_rows: 0,
            attrs,
            stop: Arc::new(Stop(AtomicBool::new(false))),
        }
    }

    fn column(&self, var: VarHandle) -> Result<&Column, EngineError> {
        self.cols
            .get(var.index())
            .filter(|_| var.index() < self.committed_cols)
            .ok_or_else(|| EngineError::new(EngineError::NOT_IN_MODEL, "column not in model"))
    }

    fn row(&self, constr: ConstrHandle) -> Result<&Row, EngineError> {
        self.rows
            .get(constr.index())
            .filter(|_| constr.index() < self.committed_rows)
            .ok_or_else(|| EngineError::new(EngineError::NOT_IN_MODEL, "row not in model"))
    }

    fn set_status(&mut self, status: StatusCode) {
        self.attrs.insert("Status", AttrValue::Int(status.code()));
    }
}

impl EngineModel for FakeModel {
    fn add_var(
        &mut self,
        lb: f64,
        ub: f64,
        obj: f64,
        vtype: char,
        name: Option<&str>,
    ) -> Result<VarHandle, EngineError> {
        let index = self.cols.len();
        self.recorder
            .record(format!("add_var {}", name.unwrap_or("")).trim_end().to_string());
        self.cols.push(Column {
            lb,
            ub,
            obj,
            vtype,
            name: name.map_or_else(|| format!("C{index}"), str::to_string),
            attrs: HashMap::new(),
        });
        Ok(VarHandle::new(index))
    }

    fn add_constr(
        &mut self,
        lhs: &NativeLinExpr,
        sense: char,
        _rhs: &NativeRhs,
        name: Option<&str>,
    ) -> Result<ConstrHandle, EngineError> {
        if let Some((_, var)) = lhs.terms().iter().find(|(_, v)| v.index() >= self.cols.len()) {
            return Err(EngineError::new(
                EngineError::INDEX_OUT_OF_RANGE,
                format!("column {} does not exist", var.index()),
            ));
        }
        let index = self.rows.len();
        self.recorder
            .record(format!("add_constr {}", name.unwrap_or("")).trim_end().to_string());
        self.rows.push(Row {
            sense,
            name: name.map_or_else(|| format!("R{index}"), str::to_string),
            attrs: HashMap::new(),
        });
        Ok(ConstrHandle::new(index))
    }

    fn update(&mut self) -> Result<(), EngineError> {
        self.recorder.record("update");
        self.committed_cols = self.cols.len();
        self.committed_rows = self.rows.len();
        Ok(())
    }

    fn get_var_attr(&self, var: VarHandle, attr: Attr) -> Result<AttrValue, EngineError> {
        let col = self.column(var)?;
        match attr.name() {
            "VarName" => Ok(AttrValue::Str(col.name.clone())),
            "LB" => Ok(AttrValue::Double(col.lb)),
            "UB" => Ok(AttrValue::Double(col.ub)),
            "Obj" => Ok(AttrValue::Double(col.obj)),
            "VType" => Ok(AttrValue::Char(col.vtype)),
            name => col.attrs.get(name).cloned().ok_or_else(|| not_available(name)),
        }
    }

    fn set_var_attr(
        &mut self,
        var: VarHandle,
        attr: Attr,
        value: &AttrValue,
    ) -> Result<(), EngineError> {
        self.column(var)?;
        self.recorder.record(format!("set_var_attr {}", attr.name()));
        let col = &mut self.cols[var.index()];
        match (attr.name(), value) {
            ("VarName", AttrValue::Str(name)) => col.name = name.clone(),
            ("LB", AttrValue::Double(v)) => col.lb = *v,
            ("UB", AttrValue::Double(v)) => col.ub = *v,
            ("Obj", AttrValue::Double(v)) => col.obj = *v,
            ("VType", AttrValue::Char(c)) => col.vtype = *c,
            (name, value) => {
                col.attrs.insert(name, value.clone());
            }
        }
        Ok(())
    }

    fn get_constr_attr(&self, constr: ConstrHandle, attr: Attr) -> Result<AttrValue, EngineError> {
        let row = self.row(constr)?;
        match attr.name() {
            "ConstrName" => Ok(AttrValue::Str(row.name.clone())),
            "Sense" => Ok(AttrValue::Char(row.sense)),
            name => row.attrs.get(name).cloned().ok_or_else(|| not_available(name)),
        }
    }

    fn set_constr_attr(
        &mut self,
        constr: ConstrHandle,
        attr: Attr,
        value: &AttrValue,
    ) -> Result<(), EngineError> {
        self.row(constr)?;
        self.recorder.record(format!("set_constr_attr {}", attr.name()));
        let row = &mut self.rows[constr.index()];
        match (attr.name(), value) {
            ("ConstrName", AttrValue::Str(name)) => row.name = name.clone(),
            ("Sense", AttrValue::Char(c)) => row.sense = *c,
            (name, value) => {
                row.attrs.insert(name, value.clone());
            }
        }
        Ok(())
    }

    fn get_model_attr(&self, attr: Attr) -> Result<AttrValue, EngineError> {
        let count = |n: usize| AttrValue::Int(i32::try_from(n).unwrap_or(i32::MAX));
        match attr.name() {
            "NumVars" => Ok(count(self.committed_cols)),
            "NumConstrs" => Ok(count(self.committed_rows)),
            "IsMIP" => Ok(AttrValue::Int(i32::from(
                self.cols[..self.committed_cols].iter().any(|c| c.vtype != 'C'),
            ))),
            name => self.attrs.get(name).cloned().ok_or_else(|| not_available(name)),
        }
    }

    fn set_model_attr(&mut self, attr: Attr, value: &AttrValue) -> Result<(), EngineError> {
        self.recorder.record(format!("set_model_attr {}", attr.name()));
        self.attrs.insert(attr.name(), value.clone());
        Ok(())
    }

    fn set_objective(&mut self, expr: &NativeLinExpr) -> Result<(), EngineError> {
        self.recorder.record("set_objective");
        for col in &mut self.cols {
            col.obj = 0.0;
        }
        for (var, coeff) in expr.merged_terms() {
            let col = self.cols.get_mut(var.index()).ok_or_else(|| {
                EngineError::new(EngineError::INDEX_OUT_OF_RANGE, "objective column")
            })?;
            col.obj = coeff;
        }
        self.attrs.insert("ObjCon", AttrValue::Double(expr.constant()));
        Ok(())
    }

    fn set_param(&mut self, param: Param, _value: ParamValue) -> Result<(), EngineError> {
        self.recorder.record(format!("model_set_param {}", param.name()));
        Ok(())
    }

    fn optimize(&mut self) -> Result<(), EngineError> {
        self.recorder.record("optimize");
        let hook = self.recorder.lock().on_optimize.clone();
        if let Some(hook) = hook {
            hook();
        }
        if self.stop.0.swap(false, Ordering::SeqCst) {
            self.set_status(StatusCode::Interrupted);
            return Ok(());
        }
        for col in &mut self.cols[..self.committed_cols] {
            let x = col.lb.max(0.0).min(col.ub);
            col.attrs.insert("X", AttrValue::Double(x));
        }
        self.set_status(StatusCode::Optimal);
        Ok(())
    }

    fn compute_iis(&mut self) -> Result<(), EngineError> {
        self.recorder.record("compute_iis");
        for row in &mut self.rows[..self.committed_rows] {
            row.attrs.insert("IISConstr", AttrValue::Int(1));
        }
        for col in &mut self.cols[..self.committed_cols] {
            col.attrs.insert("IISLB", AttrValue::Int(0));
            col.attrs.insert("IISUB", AttrValue::Int(0));
        }
        self.attrs.insert("IISMinimal", AttrValue::Int(1));
        Ok(())
    }

    fn write(&mut self, path: &Path) -> Result<(), EngineError> {
        self.recorder.record(format!("write {}", path.display()));
        Ok(())
    }

    fn terminator(&self) -> Arc<dyn Terminate> {
        self.stop.clone()
    }
}
