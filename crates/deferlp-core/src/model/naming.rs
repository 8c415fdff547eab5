//! Name prefix and duplicate-suffix policy.

use crate::model::{Model, ModelError};

/// `\w+` over ASCII.
fn is_identifier(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

impl Model {
    /// Prefix and dedupe a variable name.
    pub(crate) fn claim_var_name(&mut self, name: &str) -> Result<String, ModelError> {
        let prefixed = format!("{}{name}", self.var_name_prefix());
        self.claim_name(prefixed)
    }

    /// Dedupe a constraint name. Constraint names are never prefixed.
    pub(crate) fn claim_constr_name(&mut self, name: &str) -> Result<String, ModelError> {
        self.claim_name(name.to_string())
    }

    /// Validate `name`, then suffix it with `_s<n>` if it was seen before.
    ///
    /// The counter is keyed by the candidate itself, so the first use
    /// stays unmodified and later uses count up from `_s1`.
    fn claim_name(&mut self, name: String) -> Result<String, ModelError> {
        let prefix = self.var_name_prefix();
        let stem = name.strip_prefix(prefix).unwrap_or(&name);
        if !is_identifier(stem) && !is_identifier(&name) {
            tracing::warn!(
                component = "model",
                operation = "claim_name",
                status = "error",
                name = %name,
                "Rejected malformed name"
            );
            return Err(ModelError::InvalidName { name });
        }

        let claimed = match self.name_counters.get_mut(&name) {
            Some(counter) => {
                *counter += 1;
                format!("{name}_s{counter}")
            }
            None => {
                self.name_counters.insert(name.clone(), 0);
                name
            }
        };
        Ok(claimed)
    }
}
