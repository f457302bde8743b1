//! Sweep execution: configure a model for every grid point, score it against
//! a fixed dataset, and select the best configuration.

use chrono::{DateTime, Utc};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use sg_types::{BoxError, Configuration, InvalidInput, ParamSpace, SweepError, SweepResult};

use crate::grid::Grid;

/// Unique sweep run identifier.
pub type SweepId = Uuid;

/// Whether the sweep maximizes or minimizes the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObjectiveDirection {
    Maximize,
    Minimize,
}

impl Default for ObjectiveDirection {
    fn default() -> Self {
        Self::Maximize
    }
}

impl ObjectiveDirection {
    fn improves(self, candidate: f64, incumbent: f64) -> bool {
        match self {
            Self::Maximize => candidate > incumbent,
            Self::Minimize => candidate < incumbent,
        }
    }
}

/// A model that can produce a configured instance for a grid point.
///
/// `configure` must return a fresh instance: the sweep may evaluate
/// configurations on multiple threads, and workers never share a configured
/// model. Parameters absent from the configuration (or set to the unset
/// candidate) keep the model's built-in defaults.
pub trait Tunable {
    type Configured;

    fn configure(&self, configuration: &Configuration) -> Result<Self::Configured, BoxError>;
}

/// Scores a configured model against a fixed dataset. Higher is better under
/// [`ObjectiveDirection::Maximize`].
pub trait Scorer<M, D> {
    fn score(&self, model: &M, data: &D) -> Result<f64, BoxError>;
}

impl<M, D, F> Scorer<M, D> for F
where
    F: Fn(&M, &D) -> Result<f64, BoxError>,
{
    fn score(&self, model: &M, data: &D) -> Result<f64, BoxError> {
        self(model, data)
    }
}

/// Top-level configuration for a sweep run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepConfig {
    pub id: SweepId,
    pub name: String,
    pub description: String,

    /// Direction of optimization.
    pub direction: ObjectiveDirection,

    /// Evaluate configurations across the rayon thread pool instead of
    /// sequentially.
    pub parallel: bool,

    /// Score the default (empty) configuration before the sweep.
    pub baseline: bool,

    pub created_at: DateTime<Utc>,
}

impl SweepConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            description: String::new(),
            direction: ObjectiveDirection::Maximize,
            parallel: false,
            baseline: true,
            created_at: Utc::now(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_direction(mut self, direction: ObjectiveDirection) -> Self {
        self.direction = direction;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_baseline(mut self, baseline: bool) -> Self {
        self.baseline = baseline;
        self
    }
}

/// Score for one evaluated configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreRecord {
    /// Position in enumeration order, 0-indexed.
    pub trial_number: usize,
    pub configuration: Configuration,
    pub score: f64,
}

/// Outcome of a completed sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepReport {
    pub id: SweepId,
    pub name: String,
    pub direction: ObjectiveDirection,

    /// Every evaluated configuration, in enumeration order.
    pub records: Vec<ScoreRecord>,

    /// The winning record. Ties keep the first in enumeration order.
    pub best: ScoreRecord,

    /// Score of the default configuration, when the sweep computed one.
    pub baseline: Option<f64>,

    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl SweepReport {
    /// Best-score improvement over the baseline, if one was recorded.
    pub fn improvement(&self) -> Option<f64> {
        self.baseline.map(|baseline| match self.direction {
            ObjectiveDirection::Maximize => self.best.score - baseline,
            ObjectiveDirection::Minimize => baseline - self.best.score,
        })
    }
}

/// Evaluate every configuration in the grid and select the best.
///
/// Space violations surface as `InvalidInput` before any scoring call. A
/// failing configuration aborts the whole sweep; the error carries the
/// offending configuration.
pub fn run_sweep<M, S, D>(
    config: &SweepConfig,
    space: &ParamSpace,
    model: &M,
    scorer: &S,
    data: &D,
) -> SweepResult<SweepReport>
where
    M: Tunable + Sync,
    S: Scorer<M::Configured, D> + Sync,
    D: Sync,
{
    let grid = Grid::new(space.clone())?;
    let started_at = Utc::now();

    info!(
        "Starting sweep '{}' over {} configurations",
        config.name,
        grid.size()
    );

    let baseline = if config.baseline {
        let score = evaluate(model, scorer, data, &Configuration::empty())?;
        info!("Baseline score (default configuration): {score}");
        Some(score)
    } else {
        None
    };

    let records = if config.parallel {
        evaluate_parallel(&grid, model, scorer, data)?
    } else {
        evaluate_sequential(&grid, model, scorer, data, config.direction)?
    };

    let best = select_best(&records, config.direction)?;
    let finished_at = Utc::now();

    info!(
        "Sweep '{}' complete: best score {} at [{}]",
        config.name, best.score, best.configuration
    );

    Ok(SweepReport {
        id: config.id,
        name: config.name.clone(),
        direction: config.direction,
        records,
        best,
        baseline,
        started_at,
        finished_at,
    })
}

/// Configure a fresh instance and score it. Failures of either step carry
/// the configuration; a non-finite score counts as a failure.
fn evaluate<M, S, D>(
    model: &M,
    scorer: &S,
    data: &D,
    configuration: &Configuration,
) -> SweepResult<f64>
where
    M: Tunable,
    S: Scorer<M::Configured, D>,
{
    let configured = model
        .configure(configuration)
        .map_err(|source| SweepError::Evaluation {
            configuration: configuration.clone(),
            source,
        })?;
    let score = scorer
        .score(&configured, data)
        .map_err(|source| SweepError::Evaluation {
            configuration: configuration.clone(),
            source,
        })?;
    if !score.is_finite() {
        return Err(SweepError::Evaluation {
            configuration: configuration.clone(),
            source: format!("scorer returned a non-finite score: {score}").into(),
        });
    }
    Ok(score)
}

fn evaluate_sequential<M, S, D>(
    grid: &Grid,
    model: &M,
    scorer: &S,
    data: &D,
    direction: ObjectiveDirection,
) -> SweepResult<Vec<ScoreRecord>>
where
    M: Tunable,
    S: Scorer<M::Configured, D>,
{
    let total = grid.size();
    let mut records = Vec::with_capacity(total);
    let mut best: Option<f64> = None;

    for (trial_number, configuration) in grid.iter().enumerate() {
        let score = evaluate(model, scorer, data, &configuration)?;
        debug!(
            "Trial {}/{}: [{}] scored {}",
            trial_number + 1,
            total,
            configuration,
            score
        );
        if best.map_or(true, |incumbent| direction.improves(score, incumbent)) {
            best = Some(score);
            info!(
                "Trial {}/{}: new best score {} at [{}]",
                trial_number + 1,
                total,
                score,
                configuration
            );
        }
        records.push(ScoreRecord {
            trial_number,
            configuration,
            score,
        });
    }

    Ok(records)
}

fn evaluate_parallel<M, S, D>(
    grid: &Grid,
    model: &M,
    scorer: &S,
    data: &D,
) -> SweepResult<Vec<ScoreRecord>>
where
    M: Tunable + Sync,
    S: Scorer<M::Configured, D> + Sync,
    D: Sync,
{
    let configurations: Vec<Configuration> = grid.iter().collect();
    let outcomes: Vec<(usize, Configuration, SweepResult<f64>)> = configurations
        .into_par_iter()
        .enumerate()
        .map(|(trial_number, configuration)| {
            let outcome = evaluate(model, scorer, data, &configuration);
            (trial_number, configuration, outcome)
        })
        .collect();

    // collect() on an indexed iterator preserves enumeration order, so the
    // first error seen here is the lowest trial number regardless of which
    // worker failed first
    let mut records = Vec::with_capacity(outcomes.len());
    for (trial_number, configuration, outcome) in outcomes {
        let score = outcome?;
        records.push(ScoreRecord {
            trial_number,
            configuration,
            score,
        });
    }
    Ok(records)
}

/// Stable argmax (argmin under `Minimize`): only a strictly better score
/// replaces the incumbent, so ties keep the earliest record.
fn select_best(records: &[ScoreRecord], direction: ObjectiveDirection) -> SweepResult<ScoreRecord> {
    let mut best: Option<&ScoreRecord> = None;
    for record in records {
        let replace = match best {
            None => true,
            Some(incumbent) => direction.improves(record.score, incumbent.score),
        };
        if replace {
            best = Some(record);
        }
    }
    best.cloned()
        .ok_or_else(|| InvalidInput::EmptySpace.into())
}
