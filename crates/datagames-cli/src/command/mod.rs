use std::path::PathBuf;

use clap::{Parser, Subcommand};
use datagames_engine::{RegressionDataGenerator, Seed};

use self::{figures::FiguresArg, play::PlayArg, regress::RegressArg, sample::SampleArg};
use crate::logging;

mod figures;
mod play;
mod regress;
mod sample;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    #[clap(flatten)]
    global: GlobalArgs,
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct GlobalArgs {
    /// Seed as 32 hex digits (samples default to a seed derived from 314,
    /// regression trials to a fresh random seed)
    #[clap(long, global = true)]
    seed: Option<Seed>,
    /// Custom figure set for the figure game (JSON, see the `figures` mode)
    #[clap(long, global = true)]
    figures: Option<PathBuf>,
    /// Write logs to this file instead of stderr
    #[clap(long, global = true)]
    log_file: Option<PathBuf>,
    /// Raise the log level (-v: info, -vv: debug, -vvv: trace)
    #[clap(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl GlobalArgs {
    /// Returns the seed for the distribution game.
    pub(crate) fn sample_seed(&self) -> Seed {
        self.seed.unwrap_or_default()
    }

    /// Returns a generator for the R² game, reproducible only when a seed was given.
    pub(crate) fn regression_generator(&self) -> RegressionDataGenerator {
        self.seed
            .map_or_else(RegressionDataGenerator::new, RegressionDataGenerator::with_seed)
    }
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Play the games in the terminal
    Play(#[clap(flatten)] PlayArg),
    /// Print a sample set with its statistics and histogram as JSON
    Sample(#[clap(flatten)] SampleArg),
    /// Generate and fit one regression trial and print it as JSON
    Regress(#[clap(flatten)] RegressArg),
    /// Print the built-in figure set as JSON
    Figures(#[clap(flatten)] FiguresArg),
}

pub fn run() -> anyhow::Result<()> {
    let CommandArgs { global, mode } = CommandArgs::parse();
    let mode = mode.unwrap_or(Mode::Play(PlayArg::default()));

    // The TUI owns the terminal, so without a log file there is nowhere to log to.
    let log_to_terminal = !matches!(mode, Mode::Play(_));
    if log_to_terminal || global.log_file.is_some() {
        logging::init(global.verbose, global.log_file.as_deref())?;
    }
    tracing::debug!(?mode, "starting");

    match mode {
        Mode::Play(arg) => play::run(&global, &arg)?,
        Mode::Sample(arg) => sample::run(&global, &arg)?,
        Mode::Regress(arg) => regress::run(&global, &arg)?,
        Mode::Figures(arg) => figures::run(&arg)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_command_definition_is_valid() {
        CommandArgs::command().debug_assert();
    }

    #[test]
    fn test_default_mode_is_play() {
        let args = CommandArgs::try_parse_from(["datagames"]).unwrap();
        assert!(args.mode.is_none());
        assert_eq!(args.global.sample_seed(), Seed::default());
    }

    #[test]
    fn test_global_options_after_subcommand() {
        let args = CommandArgs::try_parse_from([
            "datagames",
            "sample",
            "--family",
            "2",
            "--seed",
            "000102030405060708090a0b0c0d0e0f",
            "-vv",
        ])
        .unwrap();
        assert_eq!(args.global.verbose, 2);
        assert_eq!(
            args.global.sample_seed().to_string(),
            "000102030405060708090a0b0c0d0e0f"
        );
        assert!(matches!(args.mode, Some(Mode::Sample(_))));
    }

    #[test]
    fn test_malformed_seed_is_rejected() {
        let result = CommandArgs::try_parse_from(["datagames", "--seed", "xyz"]);
        assert!(result.is_err());
    }
}
