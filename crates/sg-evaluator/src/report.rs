//! Ranking and export helpers for sweep reports.

use std::cmp::Ordering;
use std::fmt;
use std::fs;
use std::path::Path;

use tracing::info;

use sg_types::SweepResult;

use crate::sweep::{ObjectiveDirection, ScoreRecord, SweepReport};

/// The top `k` records ranked best-first. Equal scores keep enumeration
/// order (the sort is stable).
pub fn top_k(report: &SweepReport, k: usize) -> Vec<&ScoreRecord> {
    let mut ranked: Vec<&ScoreRecord> = report.records.iter().collect();
    ranked.sort_by(|a, b| match report.direction {
        ObjectiveDirection::Maximize => {
            b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal)
        }
        ObjectiveDirection::Minimize => {
            a.score.partial_cmp(&b.score).unwrap_or(Ordering::Equal)
        }
    });
    ranked.truncate(k);
    ranked
}

/// Write the full report as pretty-printed JSON.
pub fn write_json(report: &SweepReport, path: impl AsRef<Path>) -> SweepResult<()> {
    let json = serde_json::to_string_pretty(report)?;
    fs::write(path.as_ref(), json)?;
    info!("Wrote sweep report to {}", path.as_ref().display());
    Ok(())
}

/// Human-readable sweep summary: best record, baseline comparison, and a
/// short leaderboard.
pub struct SweepSummary<'a> {
    report: &'a SweepReport,
    top: usize,
}

impl<'a> SweepSummary<'a> {
    pub fn new(report: &'a SweepReport) -> Self {
        Self { report, top: 5 }
    }

    /// Number of leaderboard rows to print.
    pub fn with_top(mut self, top: usize) -> Self {
        self.top = top;
        self
    }
}

impl fmt::Display for SweepSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.report;
        writeln!(
            f,
            "Sweep '{}': {} configurations evaluated",
            report.name,
            report.records.len()
        )?;
        if let Some(baseline) = report.baseline {
            writeln!(f, "Baseline (default configuration): {baseline:.6}")?;
        }
        writeln!(
            f,
            "Best (trial {}): {:.6}  [{}]",
            report.best.trial_number, report.best.score, report.best.configuration
        )?;
        if let Some(improvement) = report.improvement() {
            writeln!(f, "Improvement over baseline: {improvement:+.6}")?;
        }
        for (rank, record) in top_k(report, self.top).iter().enumerate() {
            writeln!(
                f,
                "  #{} trial {:>3}  {:.6}  [{}]",
                rank + 1,
                record.trial_number,
                record.score,
                record.configuration
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sweep::{run_sweep, SweepConfig, Tunable};
    use sg_types::{BoxError, Configuration, ParamSpace, ParamValue};

    struct StubModel;

    impl Tunable for StubModel {
        type Configured = Configuration;

        fn configure(&self, configuration: &Configuration) -> Result<Configuration, BoxError> {
            Ok(configuration.clone())
        }
    }

    fn x_scorer(config: &Configuration, _: &()) -> Result<f64, BoxError> {
        // 1 -> 0.1, 2 -> 0.2, 3 -> 0.2, 4 -> 0.4
        let x = config.get("x").and_then(ParamValue::as_int).unwrap_or(0);
        Ok(match x {
            3 => 0.2,
            v => v as f64 / 10.0,
        })
    }

    fn sample_report() -> SweepReport {
        let config = SweepConfig::new("sample").with_baseline(false);
        let space = ParamSpace::new().add_ints("x", [1, 2, 3, 4]);
        run_sweep(&config, &space, &StubModel, &x_scorer, &()).unwrap()
    }

    #[test]
    fn top_k_ranks_best_first_and_keeps_tie_order() {
        let report = sample_report();
        let top = top_k(&report, 3);

        assert_eq!(top.len(), 3);
        assert_eq!(top[0].score, 0.4);
        // 0.2 tie: trial 1 (x=2) ranks ahead of trial 2 (x=3)
        assert_eq!(top[1].trial_number, 1);
        assert_eq!(top[2].trial_number, 2);
    }

    #[test]
    fn top_k_caps_at_record_count() {
        let report = sample_report();
        assert_eq!(top_k(&report, 100).len(), 4);
    }

    #[test]
    fn summary_displays_best_and_leaderboard() {
        let report = sample_report();
        let text = SweepSummary::new(&report).with_top(2).to_string();

        assert!(text.contains("4 configurations evaluated"));
        assert!(text.contains("Best (trial 3)"));
        assert!(text.contains("x=4"));
        assert!(!text.contains("Baseline"));
    }

    #[test]
    fn write_json_round_trips() {
        let report = sample_report();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");

        write_json(&report, &path).unwrap();

        let json = std::fs::read_to_string(&path).unwrap();
        let back: SweepReport = serde_json::from_str(&json).unwrap();
        assert_eq!(report, back);
    }
}
