use serde::{Deserialize, Serialize};

use crate::value::ParamValue;

/// One fully specified assignment of a candidate value to every parameter,
/// in axis declaration order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Configuration {
    entries: Vec<(String, ParamValue)>,
}

impl Configuration {
    /// The default configuration: no overrides, the model uses its built-in
    /// defaults everywhere. Used as the baseline.
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn from_entries(entries: Vec<(String, ParamValue)>) -> Self {
        Self { entries }
    }

    /// The assigned value for `name`, if the parameter is part of this
    /// configuration.
    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    /// The override for `name`. Returns `None` both when the parameter is
    /// absent and when its candidate is the unset value, so model code has a
    /// single "use my default" path.
    pub fn override_for(&self, name: &str) -> Option<&ParamValue> {
        self.get(name).filter(|v| !v.is_unset())
    }

    pub fn entries(&self) -> &[(String, ParamValue)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl std::fmt::Display for Configuration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.entries.is_empty() {
            return write!(f, "default");
        }
        for (i, (name, value)) in self.entries.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{name}={value}")?;
        }
        Ok(())
    }
}
