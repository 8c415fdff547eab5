//! Parameter storage and `Name value` parameter files.

use deferlp_engine::{EngineError, Param, ParamInfo, ParamType, ParamValue, params};
use std::collections::HashMap;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Current values of every known parameter.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ParamStore {
    values: HashMap<Param, ParamValue>,
}

impl Default for ParamStore {
    fn default() -> Self {
        let values = params::NAMESPACES
            .iter()
            .flat_map(|ns| {
                ns.defs()
                    .iter()
                    .map(move |def| (Param::new(def.name, ns.ty()), ns.default_value(def)))
            })
            .collect();
        Self { values }
    }
}

impl ParamStore {
    pub(crate) fn get(&self, param: Param) -> Result<ParamValue, EngineError> {
        self.values
            .get(&param)
            .cloned()
            .ok_or_else(|| unknown_param(param.name()))
    }

    /// Store a value after checking its storage class and range.
    pub(crate) fn set(&mut self, param: Param, value: ParamValue) -> Result<(), EngineError> {
        let (ns, def) =
            params::definition(param).ok_or_else(|| unknown_param(param.name()))?;
        let value = match (param.ty(), value) {
            (ParamType::Double, ParamValue::Int(v)) => ParamValue::Double(f64::from(v)),
            (_, value) => value,
        };
        if value.ty() != param.ty() {
            return Err(EngineError::new(
                EngineError::INVALID_ARGUMENT,
                format!(
                    "parameter {} expects a {} value, got {}",
                    param.name(),
                    param.ty().as_str(),
                    value.ty().as_str()
                ),
            ));
        }
        if let (Some(v), ParamType::Double | ParamType::Int) = (value.as_f64(), ns.ty()) {
            if v < def.min || v > def.max {
                return Err(EngineError::new(
                    EngineError::VALUE_OUT_OF_RANGE,
                    format!(
                        "value {v} for parameter {} outside [{}, {}]",
                        param.name(),
                        def.min,
                        def.max
                    ),
                ));
            }
        }
        self.values.insert(param, value);
        Ok(())
    }

    pub(crate) fn info(&self, param: Param) -> Result<ParamInfo, EngineError> {
        let (ns, def) =
            params::definition(param).ok_or_else(|| unknown_param(param.name()))?;
        let (min, max) = ns.range(def);
        Ok(ParamInfo {
            param,
            current: self.get(param)?,
            min,
            max,
            default: ns.default_value(def),
        })
    }

    pub(crate) fn reset(&mut self) {
        *self = Self::default();
    }

    pub(crate) fn double(&self, name: &'static str) -> f64 {
        self.values
            .get(&Param::new(name, ParamType::Double))
            .and_then(ParamValue::as_f64)
            .unwrap_or_default()
    }

    pub(crate) fn int(&self, name: &'static str) -> i32 {
        self.values
            .get(&Param::new(name, ParamType::Int))
            .and_then(ParamValue::as_i32)
            .unwrap_or_default()
    }

    pub(crate) fn string(&self, name: &'static str) -> &str {
        self.values
            .get(&Param::new(name, ParamType::String))
            .and_then(ParamValue::as_str)
            .unwrap_or_default()
    }

    /// Parameters that differ from their defaults, in namespace order.
    pub(crate) fn changed(&self) -> Vec<(Param, ParamValue)> {
        params::NAMESPACES
            .iter()
            .flat_map(|ns| ns.defs().iter().map(move |def| (ns, def)))
            .filter_map(|(ns, def)| {
                let param = Param::new(def.name, ns.ty());
                let current = self.values.get(&param)?;
                (*current != ns.default_value(def)).then(|| (param, current.clone()))
            })
            .collect()
    }

    /// Render the changed parameters as a parameter file.
    pub(crate) fn render(&self) -> String {
        let mut out = String::from("# Parameter settings\n");
        for (param, value) in self.changed() {
            let _ = writeln!(out, "{}  {}", param.name(), value);
        }
        out
    }

    pub(crate) fn write_file(&self, path: &Path) -> Result<(), EngineError> {
        fs::write(path, self.render()).map_err(|err| {
            EngineError::new(
                EngineError::FILE_WRITE,
                format!("cannot write parameter file {}: {err}", path.display()),
            )
        })?;
        debug!(
            component = "params",
            operation = "write",
            status = "success",
            path = %path.display(),
            "Wrote parameter file"
        );
        Ok(())
    }

    /// Apply a parameter file. Nothing is applied if any line is invalid.
    pub(crate) fn read_file(&mut self, path: &Path) -> Result<usize, EngineError> {
        let text = fs::read_to_string(path).map_err(|err| {
            EngineError::new(
                EngineError::FILE_READ,
                format!("cannot read parameter file {}: {err}", path.display()),
            )
        })?;
        let entries = parse(&text).inspect_err(|err| {
            warn!(
                component = "params",
                operation = "read",
                status = "error",
                path = %path.display(),
                error = %err,
                "Rejected parameter file"
            );
        })?;
        let mut staged = self.clone();
        for (param, value) in &entries {
            staged.set(*param, value.clone())?;
        }
        *self = staged;
        debug!(
            component = "params",
            operation = "read",
            status = "success",
            path = %path.display(),
            count = entries.len(),
            "Applied parameter file"
        );
        Ok(entries.len())
    }
}

/// Parse `Name value` lines. Names match case-insensitively; `#` starts a
/// comment.
pub(crate) fn parse(text: &str) -> Result<Vec<(Param, ParamValue)>, EngineError> {
    let mut entries = Vec::new();
    for (lineno, raw) in text.lines().enumerate() {
        let line = raw.split('#').next().unwrap_or_default().trim();
        if line.is_empty() {
            continue;
        }
        let (name, value) = line
            .split_once(char::is_whitespace)
            .map(|(name, value)| (name, value.trim()))
            .ok_or_else(|| {
                EngineError::new(
                    EngineError::FILE_READ,
                    format!("line {}: expected `Name value`", lineno + 1),
                )
            })?;
        let param = lookup_ignore_case(name).ok_or_else(|| unknown_param(name))?;
        let parsed = match param.ty() {
            ParamType::Double => value.parse::<f64>().ok().map(ParamValue::Double),
            ParamType::Int => value.parse::<i32>().ok().map(ParamValue::Int),
            ParamType::String => Some(ParamValue::Str(value.to_string())),
        };
        let parsed = parsed.ok_or_else(|| {
            EngineError::new(
                EngineError::FILE_READ,
                format!(
                    "line {}: cannot parse {value:?} as {} for {}",
                    lineno + 1,
                    param.ty().as_str(),
                    param.name()
                ),
            )
        })?;
        entries.push((param, parsed));
    }
    Ok(entries)
}

fn lookup_ignore_case(name: &str) -> Option<Param> {
    params::NAMESPACES.iter().find_map(|ns| {
        ns.defs()
            .iter()
            .find(|def| def.name.eq_ignore_ascii_case(name))
            .map(|def| Param::new(def.name, ns.ty()))
    })
}

fn unknown_param(name: &str) -> EngineError {
    EngineError::new(
        EngineError::UNKNOWN_PARAMETER,
        format!("unknown parameter {name}"),
    )
}
