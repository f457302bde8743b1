//! # sg-evaluator
//!
//! Grid sweep evaluation and selection for SweepGrid.
//!
//! Enumerates every configuration in a parameter space's Cartesian product,
//! scores each one against a fixed dataset, and selects the best. Provides
//! lazy grid enumeration, sequential and parallel sweep execution, and
//! report ranking/export helpers.

mod grid;
mod report;
mod sweep;

pub use grid::{Grid, GridIter};
pub use report::{top_k, write_json, SweepSummary};
pub use sweep::{
    run_sweep, ObjectiveDirection, ScoreRecord, Scorer, SweepConfig, SweepId, SweepReport, Tunable,
};
