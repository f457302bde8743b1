use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::errors::InvalidInput;
use crate::value::ParamValue;

/// A single parameter dimension: a name and its ordered candidate values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamAxis {
    pub name: String,
    pub values: Vec<ParamValue>,
}

/// The full parameter space: an ordered list of axes.
///
/// Axis order is enumeration order — the last-declared axis varies fastest,
/// matching nested-loop semantics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamSpace {
    pub axes: Vec<ParamAxis>,
}

impl ParamSpace {
    pub fn new() -> Self {
        Self { axes: Vec::new() }
    }

    pub fn add_values(mut self, name: impl Into<String>, values: Vec<ParamValue>) -> Self {
        self.axes.push(ParamAxis {
            name: name.into(),
            values,
        });
        self
    }

    pub fn add_ints(self, name: impl Into<String>, values: impl IntoIterator<Item = i64>) -> Self {
        let values = values.into_iter().map(ParamValue::Int).collect();
        self.add_values(name, values)
    }

    pub fn add_floats(
        self,
        name: impl Into<String>,
        values: impl IntoIterator<Item = f64>,
    ) -> Self {
        let values = values.into_iter().map(ParamValue::Float).collect();
        self.add_values(name, values)
    }

    /// Number of axes.
    pub fn len(&self) -> usize {
        self.axes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.axes.is_empty()
    }

    /// Total number of grid points (`None` if the product overflows).
    pub fn grid_size(&self) -> Option<usize> {
        let mut total: usize = 1;
        for axis in &self.axes {
            total = total.checked_mul(axis.values.len())?;
        }
        Some(total)
    }

    /// Check the space invariants: at least one axis, every axis non-empty,
    /// axis names unique, grid size representable.
    pub fn validate(&self) -> Result<(), InvalidInput> {
        if self.axes.is_empty() {
            return Err(InvalidInput::EmptySpace);
        }
        let mut seen = HashSet::new();
        for axis in &self.axes {
            if axis.values.is_empty() {
                return Err(InvalidInput::EmptyAxis {
                    name: axis.name.clone(),
                });
            }
            if !seen.insert(axis.name.as_str()) {
                return Err(InvalidInput::DuplicateName {
                    name: axis.name.clone(),
                });
            }
        }
        if self.grid_size().is_none() {
            return Err(InvalidInput::GridOverflow);
        }
        Ok(())
    }
}

impl Default for ParamSpace {
    fn default() -> Self {
        Self::new()
    }
}
