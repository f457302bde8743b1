//! Lazy grid enumeration over a parameter space.

use sg_types::{Configuration, InvalidInput, ParamSpace, SweepResult};

/// Exhaustive grid over a validated parameter space.
#[derive(Debug, Clone)]
pub struct Grid {
    space: ParamSpace,
    size: usize,
}

impl Grid {
    /// Validate the space and build a grid over it.
    pub fn new(space: ParamSpace) -> SweepResult<Self> {
        space.validate()?;
        let size = space.grid_size().ok_or(InvalidInput::GridOverflow)?;
        Ok(Self { space, size })
    }

    pub fn space(&self) -> &ParamSpace {
        &self.space
    }

    /// Total number of grid points.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Lazy enumeration of every configuration. Restartable: each call
    /// starts a fresh pass in the same deterministic order.
    pub fn iter(&self) -> GridIter<'_> {
        GridIter {
            space: &self.space,
            cursor: vec![0; self.space.axes.len()],
            remaining: self.size,
        }
    }
}

/// Mixed-radix cursor over the Cartesian product. The last-declared axis
/// varies fastest, matching nested-loop enumeration order.
#[derive(Debug, Clone)]
pub struct GridIter<'a> {
    space: &'a ParamSpace,
    cursor: Vec<usize>,
    remaining: usize,
}

impl Iterator for GridIter<'_> {
    type Item = Configuration;

    fn next(&mut self) -> Option<Configuration> {
        if self.remaining == 0 {
            return None;
        }

        let entries = self
            .space
            .axes
            .iter()
            .zip(&self.cursor)
            .map(|(axis, &i)| (axis.name.clone(), axis.values[i].clone()))
            .collect();

        // advance the rightmost digit, carrying leftward
        for (digit, axis) in self.cursor.iter_mut().zip(self.space.axes.iter()).rev() {
            *digit += 1;
            if *digit < axis.values.len() {
                break;
            }
            *digit = 0;
        }

        self.remaining -= 1;
        Some(Configuration::from_entries(entries))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for GridIter<'_> {}
