//! Solver configuration types.

use crate::env::Env;
use crate::model::ModelError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Configuration options for solver behavior.
///
/// Typed fields cover the common knobs; `params` carries any other engine
/// parameter by its symbolic name. Everything is applied through an [`Env`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SolverConfig {
    /// Time limit in seconds. `None` means no limit.
    pub time_limit: Option<f64>,
    /// Relative MIP gap tolerance. `None` uses solver default.
    pub mip_gap: Option<f64>,
    /// Verbosity level; 0 silences engine output. `None` uses solver default.
    pub verbosity: Option<u32>,
    /// Enable/disable presolve. `None` uses solver default.
    pub presolve: Option<bool>,
    /// Number of threads to use. `None` uses solver default.
    pub threads: Option<u32>,
    /// Feasibility tolerance. `None` uses solver default.
    pub tolerance: Option<f64>,
    /// Log solver output to console. `None` uses solver default.
    pub log_to_console: Option<bool>,
    /// Additional engine parameters by symbolic name.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub params: BTreeMap<String, Value>,
}

impl SolverConfig {
    /// Create a new configuration with all defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON document such as `{"time_limit": 10, "params": {"Seed": 3}}`.
    pub fn from_json_str(json: &str) -> Result<Self, ModelError> {
        serde_json::from_str(json).map_err(|err| ModelError::InvalidConfig {
            reason: err.to_string(),
        })
    }

    /// Set the time limit in seconds.
    pub fn with_time_limit(mut self, seconds: f64) -> Self {
        self.time_limit = Some(seconds);
        self
    }

    /// Set the relative MIP gap tolerance.
    pub fn with_mip_gap(mut self, gap: f64) -> Self {
        self.mip_gap = Some(gap);
        self
    }

    /// Set the verbosity level.
    pub fn with_verbosity(mut self, level: u32) -> Self {
        self.verbosity = Some(level);
        self
    }

    /// Enable or disable presolve.
    pub fn with_presolve(mut self, enabled: bool) -> Self {
        self.presolve = Some(enabled);
        self
    }

    /// Set the number of threads.
    pub fn with_threads(mut self, count: u32) -> Self {
        self.threads = Some(count);
        self
    }

    /// Set the feasibility tolerance.
    pub fn with_tolerance(mut self, tol: f64) -> Self {
        self.tolerance = Some(tol);
        self
    }

    /// Enable or disable console logging.
    pub fn with_log_to_console(mut self, enabled: bool) -> Self {
        self.log_to_console = Some(enabled);
        self
    }

    /// Set any engine parameter by symbolic name.
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    /// Check if this configuration is completely empty (all defaults).
    pub fn is_empty(&self) -> bool {
        self.time_limit.is_none()
            && self.mip_gap.is_none()
            && self.verbosity.is_none()
            && self.presolve.is_none()
            && self.threads.is_none()
            && self.tolerance.is_none()
            && self.log_to_console.is_none()
            && self.params.is_empty()
    }

    /// Engine parameter assignments in application order: typed fields
    /// first, then `params` in name order.
    pub fn entries(&self) -> Vec<(String, Value)> {
        let mut entries: Vec<(String, Value)> = Vec::new();
        if let Some(seconds) = self.time_limit {
            entries.push(("TimeLimit".into(), Value::from(seconds)));
        }
        if let Some(gap) = self.mip_gap {
            entries.push(("MIPGap".into(), Value::from(gap)));
        }
        if let Some(level) = self.verbosity {
            entries.push(("OutputFlag".into(), Value::from(i32::from(level > 0))));
        }
        if let Some(enabled) = self.presolve {
            entries.push(("Presolve".into(), Value::from(if enabled { -1 } else { 0 })));
        }
        if let Some(count) = self.threads {
            entries.push(("Threads".into(), Value::from(count)));
        }
        if let Some(tol) = self.tolerance {
            entries.push(("FeasibilityTol".into(), Value::from(tol)));
        }
        if let Some(enabled) = self.log_to_console {
            entries.push(("LogToConsole".into(), Value::from(i32::from(enabled))));
        }
        entries.extend(self.params.iter().map(|(k, v)| (k.clone(), v.clone())));
        entries
    }

    /// Apply every entry to the session behind `env`.
    pub fn apply(&self, env: &Env) -> Result<(), ModelError> {
        let entries = self.entries();
        let applied = entries.len();
        env.set_all(entries).inspect_err(|err| {
            tracing::warn!(
                component = "config",
                operation = "apply",
                status = "error",
                error_code = err.code(),
                "Failed to apply solver config"
            );
        })?;
        tracing::debug!(
            component = "config",
            operation = "apply",
            status = "success",
            applied,
            "Applied solver config"
        );
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_config_new_is_empty() {
        let config = SolverConfig::new();
        assert!(config.is_empty());
        assert!(config.entries().is_empty());
    }

    #[test]
    fn test_config_builder_pattern() {
        let config = SolverConfig::new()
            .with_time_limit(60.0)
            .with_mip_gap(0.01)
            .with_verbosity(1)
            .with_presolve(true)
            .with_threads(4)
            .with_tolerance(1e-6)
            .with_log_to_console(false);

        assert!(!config.is_empty());
        assert_eq!(config.time_limit, Some(60.0));
        assert_eq!(config.mip_gap, Some(0.01));
        assert_eq!(config.verbosity, Some(1));
        assert_eq!(config.presolve, Some(true));
        assert_eq!(config.threads, Some(4));
        assert_eq!(config.tolerance, Some(1e-6));
        assert_eq!(config.log_to_console, Some(false));
    }

    #[test]
    fn test_entries_use_engine_names() {
        let config = SolverConfig::new()
            .with_time_limit(5.0)
            .with_presolve(false)
            .with_verbosity(0)
            .with_param("Seed", 7);
        let names: Vec<String> = config.entries().into_iter().map(|(k, _)| k).collect();
        assert_eq!(names, vec!["TimeLimit", "OutputFlag", "Presolve", "Seed"]);
        let entries = config.entries();
        assert_eq!(entries[1].1, Value::from(0));
        assert_eq!(entries[2].1, Value::from(0));
    }

    #[test]
    fn test_config_from_json() {
        let config = SolverConfig::from_json_str(
            r#"{"time_limit": 10.5, "threads": 2, "params": {"MIPFocus": 1}}"#,
        )
        .expect("valid config");
        assert_eq!(config.time_limit, Some(10.5));
        assert_eq!(config.threads, Some(2));
        assert_eq!(config.params.get("MIPFocus"), Some(&Value::from(1)));
    }

    #[test]
    fn test_config_rejects_unknown_fields() {
        let err = SolverConfig::from_json_str(r#"{"timelimit": 1}"#).unwrap_err();
        assert_eq!(err.code(), "CONFIG_INVALID");
    }

    #[test]
    fn test_config_json_roundtrip() {
        let config = SolverConfig::new().with_mip_gap(0.05).with_param("LogFile", "x.log");
        let text = serde_json::to_string(&config).expect("serialize");
        assert_eq!(SolverConfig::from_json_str(&text), Ok(config));
    }
}
