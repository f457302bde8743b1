use sg_evaluator::{run_sweep, write_json, SweepConfig, SweepSummary, Tunable};
use sg_types::{BoxError, Configuration, ParamSpace, ParamValue};

/// Toy model: a line y = slope * x + intercept with two tunable parameters.
struct LineModel;

struct FittedLine {
    slope: f64,
    intercept: f64,
}

impl Tunable for LineModel {
    type Configured = FittedLine;

    fn configure(&self, configuration: &Configuration) -> Result<FittedLine, BoxError> {
        let slope = match configuration.override_for("slope") {
            Some(v) => v.as_float().ok_or("slope must be a float")?,
            None => 1.0,
        };
        let intercept = match configuration.override_for("intercept") {
            Some(v) => v.as_float().ok_or("intercept must be a float")?,
            None => 0.0,
        };
        Ok(FittedLine { slope, intercept })
    }
}

/// Negative mean squared error against the dataset, so higher is better.
fn score_line(model: &FittedLine, data: &Vec<(f64, f64)>) -> Result<f64, BoxError> {
    if data.is_empty() {
        return Err("empty dataset".into());
    }
    let sse: f64 = data
        .iter()
        .map(|(x, y)| {
            let predicted = model.slope * x + model.intercept;
            (predicted - y).powi(2)
        })
        .sum();
    Ok(-(sse / data.len() as f64))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    println!("SweepGrid Basic Sweep Example");

    // Samples of the true line y = 2x - 1
    let data: Vec<(f64, f64)> = (0..20)
        .map(|i| {
            let x = i as f64 / 2.0;
            (x, 2.0 * x - 1.0)
        })
        .collect();
    println!("Generated {} data points", data.len());

    // Candidate grid: 4 slopes x 3 intercepts (one of them "keep the default")
    let space = ParamSpace::new()
        .add_floats("slope", [0.5, 1.0, 2.0, 3.0])
        .add_values(
            "intercept",
            vec![
                ParamValue::unset(),
                ParamValue::Float(-1.0),
                ParamValue::Float(1.0),
            ],
        );
    println!(
        "Parameter space has {} configurations",
        space.grid_size().unwrap_or(0)
    );

    let config = SweepConfig::new("line-fit")
        .with_description("fit a line to sampled points by grid search");
    let report = run_sweep(&config, &space, &LineModel, &score_line, &data)?;

    print!("{}", SweepSummary::new(&report).with_top(3));

    let out = std::env::temp_dir().join("basic_sweep_report.json");
    write_json(&report, &out)?;
    println!("Report written to {}", out.display());

    Ok(())
}
