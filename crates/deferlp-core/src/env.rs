//! Session wrapper with symbolic parameter access.

use crate::model::ModelError;
use deferlp_engine::{Param, ParamInfo, ParamType, ParamValue, Session, params};
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, OnceLock};

static PARAM_INDEX: OnceLock<HashMap<&'static str, Param>> = OnceLock::new();

/// Resolve a symbolic parameter name across the double, int and string
/// namespaces.
pub fn param_by_name(name: &str) -> Result<Param, ModelError> {
    PARAM_INDEX
        .get_or_init(|| {
            params::NAMESPACES
                .iter()
                .flat_map(|ns| ns.defs().iter().map(move |def| Param::new(def.name, ns.ty())))
                .map(|param| (param.name(), param))
                .collect()
        })
        .get(name)
        .copied()
        .ok_or_else(|| ModelError::UnknownParameter {
            name: name.to_string(),
        })
}

/// Cast a loosely typed value to the parameter's storage class.
///
/// Numbers and numeric strings become doubles or ints; any scalar becomes a
/// string for string parameters. `null`, arrays, objects and non-numeric
/// strings for numeric parameters are rejected.
pub fn cast_param_value(param: Param, value: &Value) -> Result<ParamValue, ModelError> {
    let invalid = || ModelError::InvalidParameterValue {
        name: param.name().to_string(),
        value: value.to_string(),
    };
    match param.ty() {
        ParamType::Double => match value {
            Value::Number(n) => n.as_f64().map(ParamValue::Double).ok_or_else(invalid),
            Value::String(s) => s
                .trim()
                .parse::<f64>()
                .map(ParamValue::Double)
                .map_err(|_| invalid()),
            Value::Bool(b) => Ok(ParamValue::Double(if *b { 1.0 } else { 0.0 })),
            Value::Null | Value::Array(_) | Value::Object(_) => Err(invalid()),
        },
        ParamType::Int => {
            let truncated = match value {
                Value::Number(n) => n
                    .as_i64()
                    .or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
                Value::String(s) => {
                    let s = s.trim();
                    s.parse::<i64>()
                        .ok()
                        .or_else(|| s.parse::<f64>().ok().map(|f| f.trunc() as i64))
                }
                Value::Bool(b) => Some(i64::from(*b)),
                Value::Null | Value::Array(_) | Value::Object(_) => None,
            };
            truncated
                .and_then(|v| i32::try_from(v).ok())
                .map(ParamValue::Int)
                .ok_or_else(invalid)
        }
        ParamType::String => match value {
            Value::String(s) => Ok(ParamValue::Str(s.clone())),
            Value::Number(n) => Ok(ParamValue::Str(n.to_string())),
            Value::Bool(b) => Ok(ParamValue::Str(b.to_string())),
            Value::Null | Value::Array(_) | Value::Object(_) => Err(invalid()),
        },
    }
}

/// A shared handle to an engine session.
///
/// Cloning shares the session. Disposal is explicit; dropping an `Env`
/// never disposes the session.
#[derive(Clone)]
pub struct Env {
    session: Arc<dyn Session>,
}

impl Env {
    pub fn new(session: Arc<dyn Session>) -> Self {
        Self { session }
    }

    pub fn from_session(session: impl Session + 'static) -> Self {
        Self::new(Arc::new(session))
    }

    pub fn session(&self) -> &Arc<dyn Session> {
        &self.session
    }

    pub fn get(&self, name: &str) -> Result<ParamValue, ModelError> {
        let param = param_by_name(name)?;
        Ok(self.session.get_param(param)?)
    }

    pub fn set(&self, name: &str, value: impl Into<Value>) -> Result<(), ModelError> {
        let value = value.into();
        let param = param_by_name(name)?;
        let cast = cast_param_value(param, &value)?;
        self.session.set_param(param, cast.clone())?;
        tracing::debug!(
            component = "env",
            operation = "set_param",
            status = "success",
            param = param.name(),
            value = %cast,
            "Set engine parameter"
        );
        Ok(())
    }

    /// Set several parameters, stopping at the first failure.
    pub fn set_all<I, K, V>(&self, entries: I) -> Result<(), ModelError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Value>,
    {
        for (name, value) in entries {
            self.set(name.as_ref(), value)?;
        }
        Ok(())
    }

    pub fn param_info(&self, name: &str) -> Result<ParamInfo, ModelError> {
        let param = param_by_name(name)?;
        Ok(self.session.param_info(param)?)
    }

    pub fn reset_params(&self) -> Result<(), ModelError> {
        Ok(self.session.reset_params()?)
    }

    pub fn read_params(&self, path: impl AsRef<Path>) -> Result<(), ModelError> {
        Ok(self.session.read_params(path.as_ref())?)
    }

    pub fn write_params(&self, path: impl AsRef<Path>) -> Result<(), ModelError> {
        Ok(self.session.write_params(path.as_ref())?)
    }

    pub fn error_message(&self) -> String {
        self.session.error_message()
    }

    pub fn message(&self, text: &str) {
        self.session.message(text);
    }

    pub fn dispose(&self) {
        self.session.dispose();
    }
}

impl std::fmt::Debug for Env {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Env").finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::{cast_param_value, param_by_name};
    use deferlp_engine::{ParamType, ParamValue};
    use serde_json::{Value, json};

    #[test]
    fn resolves_across_namespaces() {
        assert_eq!(param_by_name("TimeLimit").map(|p| p.ty()), Ok(ParamType::Double));
        assert_eq!(param_by_name("Threads").map(|p| p.ty()), Ok(ParamType::Int));
        assert_eq!(param_by_name("LogFile").map(|p| p.ty()), Ok(ParamType::String));
        assert_eq!(
            param_by_name("Bogus").map_err(|e| e.code()),
            Err("PARAMETER_UNKNOWN")
        );
    }

    #[test]
    fn casts_to_double() {
        let param = param_by_name("MIPGap").expect("param");
        assert_eq!(cast_param_value(param, &json!(0.01)), Ok(ParamValue::Double(0.01)));
        assert_eq!(cast_param_value(param, &json!(1)), Ok(ParamValue::Double(1.0)));
        assert_eq!(cast_param_value(param, &json!(" 0.5 ")), Ok(ParamValue::Double(0.5)));
        assert!(cast_param_value(param, &json!("lots")).is_err());
    }

    #[test]
    fn casts_to_int_by_truncation() {
        let param = param_by_name("Threads").expect("param");
        assert_eq!(cast_param_value(param, &json!(4)), Ok(ParamValue::Int(4)));
        assert_eq!(cast_param_value(param, &json!(2.9)), Ok(ParamValue::Int(2)));
        assert_eq!(cast_param_value(param, &json!("8")), Ok(ParamValue::Int(8)));
        assert_eq!(cast_param_value(param, &json!(true)), Ok(ParamValue::Int(1)));
    }

    #[test]
    fn casts_scalars_to_string() {
        let param = param_by_name("LogFile").expect("param");
        assert_eq!(
            cast_param_value(param, &json!("solve.log")),
            Ok(ParamValue::Str("solve.log".into()))
        );
        assert_eq!(cast_param_value(param, &json!(3)), Ok(ParamValue::Str("3".into())));
    }

    #[test]
    fn null_is_an_invalid_value() {
        let param = param_by_name("TimeLimit").expect("param");
        let err = cast_param_value(param, &Value::Null).unwrap_err();
        assert_eq!(err.code(), "PARAMETER_INVALID_VALUE");
    }
}
