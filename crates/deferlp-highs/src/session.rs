//! HiGHS session: shared parameters, diagnostics and model creation.

use crate::model::HighsModel;
use crate::params::ParamStore;
use deferlp_engine::{EngineError, EngineModel, Param, ParamInfo, ParamValue, Session};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, info, warn};

/// State shared by a session and every model created from it.
#[derive(Debug, Default)]
pub(crate) struct SessionState {
    params: Mutex<ParamStore>,
    last_error: Mutex<String>,
    disposed: AtomicBool,
}

impl SessionState {
    fn params(&self) -> MutexGuard<'_, ParamStore> {
        match self.params.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Remember the failure as the session's most recent error.
    pub(crate) fn record(&self, err: EngineError) -> EngineError {
        let mut last = match self.last_error.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        *last = err.message().to_string();
        err
    }

    fn last_error(&self) -> String {
        match self.last_error.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn ensure_live(&self) -> Result<(), EngineError> {
        if self.disposed.load(Ordering::Acquire) {
            return Err(self.record(EngineError::new(
                EngineError::INVALID_ARGUMENT,
                "session has been disposed",
            )));
        }
        Ok(())
    }
}

/// A HiGHS-backed [`Session`].
///
/// Cloning shares the session state.
#[derive(Debug, Clone, Default)]
pub struct HighsSession {
    state: Arc<SessionState>,
}

impl HighsSession {
    pub fn new() -> Self {
        let version = crate::ffi::highs_version().unwrap_or_else(|| "unknown".to_string());
        debug!(
            component = "session",
            operation = "init",
            status = "success",
            solver = "highs",
            solver_version = %version,
            "Created HiGHS session"
        );
        Self::default()
    }

    pub fn is_disposed(&self) -> bool {
        self.state.disposed.load(Ordering::Acquire)
    }

    fn guarded<T>(
        &self,
        operation: &'static str,
        call: impl FnOnce(&mut ParamStore) -> Result<T, EngineError>,
    ) -> Result<T, EngineError> {
        self.state.ensure_live()?;
        let mut store = self.state.params();
        call(&mut *store).map_err(|err| {
            warn!(
                component = "session",
                operation,
                status = "error",
                code = err.code(),
                error = %err,
                "Session call failed"
            );
            self.state.record(err)
        })
    }
}

impl Session for HighsSession {
    fn new_model(&self, name: &str) -> Result<Box<dyn EngineModel>, EngineError> {
        self.state.ensure_live()?;
        let params = self.state.params().clone();
        let model = HighsModel::new(name, params, Arc::clone(&self.state));
        debug!(
            component = "session",
            operation = "new_model",
            status = "success",
            name,
            "Created engine model"
        );
        Ok(Box::new(model))
    }

    fn get_param(&self, param: Param) -> Result<ParamValue, EngineError> {
        self.guarded("get_param", |store| store.get(param))
    }

    fn set_param(&self, param: Param, value: ParamValue) -> Result<(), EngineError> {
        self.guarded("set_param", |store| store.set(param, value))
    }

    fn param_info(&self, param: Param) -> Result<ParamInfo, EngineError> {
        self.guarded("param_info", |store| store.info(param))
    }

    fn reset_params(&self) -> Result<(), EngineError> {
        self.guarded("reset_params", |store| {
            store.reset();
            Ok(())
        })
    }

    fn read_params(&self, path: &Path) -> Result<(), EngineError> {
        self.guarded("read_params", |store| store.read_file(path).map(|_| ()))
    }

    fn write_params(&self, path: &Path) -> Result<(), EngineError> {
        self.guarded("write_params", |store| store.write_file(path))
    }

    fn error_message(&self) -> String {
        self.state.last_error()
    }

    fn message(&self, text: &str) {
        info!(
            component = "session",
            operation = "message",
            status = "success",
            "{text}"
        );
    }

    fn dispose(&self) {
        if !self.state.disposed.swap(true, Ordering::AcqRel) {
            debug!(
                component = "session",
                operation = "dispose",
                status = "success",
                "Disposed HiGHS session"
            );
        }
    }
}
