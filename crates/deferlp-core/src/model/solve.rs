//! Write, optimize, IIS and status queries.

use crate::attributes::{AttrScalar, lookup_attr};
use crate::cancel::CancelToken;
use crate::model::{Model, ModelError};
use deferlp_engine::{EngineError, StatusCode};
use std::collections::HashMap;
use std::path::Path;
use std::sync::OnceLock;
use std::time::Instant;

static STATUS_NAMES: OnceLock<HashMap<i32, &'static str>> = OnceLock::new();

fn status_names() -> &'static HashMap<i32, &'static str> {
    STATUS_NAMES.get_or_init(|| {
        StatusCode::ALL
            .iter()
            .map(|status| (status.code(), status.name()))
            .collect()
    })
}

impl Model {
    /// Update, then let the engine persist the model to `path`.
    ///
    /// The format is chosen by the engine, usually from the extension.
    pub fn write(&mut self, path: impl AsRef<Path>) -> Result<(), ModelError> {
        let path = path.as_ref();
        self.update()?;
        let engine = self.ensure_engine()?;
        engine.write(path).inspect_err(|err| {
            tracing::warn!(
                component = "model",
                operation = "write",
                status = "error",
                path = %path.display(),
                error_code = err.code(),
                "Engine write failed"
            );
        })?;
        tracing::debug!(
            component = "model",
            operation = "write",
            status = "success",
            path = %path.display(),
            "Wrote model"
        );
        Ok(())
    }

    /// Update, then solve. Cancellable through [`Model::cancel_token`].
    pub fn optimize(&mut self) -> Result<(), ModelError> {
        let token = self.cancel_token();
        self.optimize_with(&token)
    }

    /// Update, then solve with `token` armed for the duration of the call.
    pub fn optimize_with(&mut self, token: &CancelToken) -> Result<(), ModelError> {
        self.update()?;
        self.cancellable("optimize", token, |engine| engine.optimize())
    }

    /// Compute an irreducible inconsistent subsystem.
    pub fn compute_iis(&mut self) -> Result<(), ModelError> {
        let token = self.cancel_token();
        self.compute_iis_with(&token)
    }

    pub fn compute_iis_with(&mut self, token: &CancelToken) -> Result<(), ModelError> {
        self.update()?;
        self.cancellable("compute_iis", token, |engine| engine.compute_iis())
    }

    fn cancellable(
        &mut self,
        operation: &'static str,
        token: &CancelToken,
        call: impl FnOnce(&mut dyn deferlp_engine::EngineModel) -> Result<(), EngineError>,
    ) -> Result<(), ModelError> {
        let engine = self.ensure_engine()?;
        let started = Instant::now();
        let result = {
            let _guard = token.install(engine.terminator());
            call(engine.as_mut())
        };
        let duration_ms = started.elapsed().as_secs_f64() * 1000.0;
        match &result {
            Ok(()) => tracing::debug!(
                component = "model",
                operation,
                status = "success",
                duration_ms,
                "Engine call finished"
            ),
            Err(err) => tracing::warn!(
                component = "model",
                operation,
                status = "error",
                error_code = err.code(),
                duration_ms,
                "Engine call failed"
            ),
        }
        result.map_err(ModelError::from)
    }

    /// The raw `Status` attribute, read live.
    pub fn status_code(&mut self) -> Result<i32, ModelError> {
        let attr = lookup_attr("Status")?;
        let engine = self.ensure_engine()?;
        i32::from_attr_value("Status", engine.get_model_attr(attr)?)
    }

    /// Lowercase status name such as `"optimal"`; `None` for a code the
    /// status enumeration does not know.
    pub fn status(&mut self) -> Result<Option<&'static str>, ModelError> {
        let code = self.status_code()?;
        Ok(status_names().get(&code).copied())
    }
}

macro_rules! status_predicates {
    ($($method:ident => $status:ident),* $(,)?) => {
        impl Model {
            $(
                #[doc = concat!("Whether the live status is `", stringify!($status), "`.")]
                pub fn $method(&mut self) -> Result<bool, ModelError> {
                    Ok(self.status_code()? == StatusCode::$status.code())
                }
            )*
        }
    };
}

status_predicates! {
    status_loaded => Loaded,
    status_optimal => Optimal,
    status_infeasible => Infeasible,
    status_inf_or_unbd => InfOrUnbd,
    status_unbounded => Unbounded,
    status_cutoff => Cutoff,
    status_iteration_limit => IterationLimit,
    status_node_limit => NodeLimit,
    status_time_limit => TimeLimit,
    status_solution_limit => SolutionLimit,
    status_interrupted => Interrupted,
    status_numeric => Numeric,
    status_suboptimal => Suboptimal,
    status_inprogress => InProgress,
    status_user_obj_limit => UserObjLimit,
}

#[cfg(test)]
mod tests {
    use super::status_names;

    #[test]
    fn status_names_cover_every_code() {
        let names = status_names();
        assert_eq!(names.len(), 15);
        assert_eq!(names.get(&2), Some(&"optimal"));
        assert_eq!(names.get(&4), Some(&"inf_or_unbd"));
        assert!(!names.contains_key(&0));
    }
}
