use std::path::PathBuf;

use datagames_engine::regression::{DEFAULT_TRIAL_SIZE, FitResult, RegressionTrial};
use serde::Serialize;

use crate::{command::GlobalArgs, util::Output};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct RegressArg {
    /// Number of points in the trial
    #[clap(long, default_value_t = DEFAULT_TRIAL_SIZE)]
    count: usize,
    /// Output file path (stdout if omitted)
    #[clap(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct RegressReport {
    trial: RegressionTrial,
    fit: FitResult,
}

pub(crate) fn run(global: &GlobalArgs, arg: &RegressArg) -> anyhow::Result<()> {
    let RegressArg { count, output } = arg;

    let trial = global.regression_generator().generate(*count);
    let fit = trial.fit()?;
    eprintln!(
        "Fitted slope {:.2}, intercept {:.2}, R² {:.3}",
        fit.slope, fit.intercept, fit.r2
    );
    Output::save_json(&RegressReport { trial, fit }, output.clone())
}
