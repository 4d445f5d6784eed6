//! Game engines for the datagames statistical guessing games.
//!
//! The crate holds the pure game logic; rendering, input handling and session
//! lifetime are left to a host (see the `datagames-cli` crate).
//!
//! - [`distribution`] - Distribution families, memoised seeded sampling and densities
//! - [`GuessDistributionEngine`] - Judges guesses of which family produced a sample set
//! - [`regression`] - Synthetic noisy-line trials, least-squares fits and the R² game
//! - [`ScoreBoard`] - Participant guesses and closest-guess winner selection
//! - [`reveal`] - Step-by-step disclosure of a figure's properties
//!
//! # Sessions
//!
//! Every engine is a plain value owned by the host. One host session owns one
//! instance of each engine it uses; nothing is shared through globals. The
//! only process-wide input is the [`Seed`] the host passes to
//! [`DistributionCatalog::new`] at start-up.
//!
//! # Example
//!
//! ```
//! use datagames_engine::{
//!     DistributionCatalog, GuessDistributionEngine, RegressionDataGenerator, RegressionGame,
//!     RevealStateMachine, Seed,
//! };
//!
//! let seed = Seed::default();
//!
//! let mut distributions = GuessDistributionEngine::new(DistributionCatalog::new(seed));
//! let eval = distributions.evaluate_guess(5, 1000, "gamma").unwrap();
//! assert!(eval.correct());
//!
//! let mut r_squared = RegressionGame::new(RegressionDataGenerator::with_seed(seed));
//! let (_, fit) = r_squared.generate_data().unwrap();
//! r_squared.add_guess("Ada", 0.5).unwrap();
//! let summary = r_squared.determine_winner().unwrap();
//! assert_eq!(summary.fit, fit);
//!
//! let mut figures = RevealStateMachine::default();
//! figures.select_figure(1).unwrap();
//! assert!(!figures.reveal_next().exhausted);
//! ```

pub use datagames_stats::regression::FitError;

pub use self::{
    distribution::{
        DistributionCatalog, Family, SampleCache, SampleSet, UnknownFamilyError,
    },
    guess::*,
    regression::{
        FitResult, RegressionDataGenerator, RegressionGame, RegressionTrial, RoundSummary,
    },
    reveal::{
        Figure, FigureState, Reveal, RevealPhase, RevealStateMachine, RevealStep, Tick, Trace,
        TraceKind, UnknownFigureError,
    },
    score_board::*,
    seed::*,
};

pub mod distribution;
mod guess;
pub mod regression;
pub mod reveal;
mod score_board;
mod seed;

/// Bounds of the sample-count slider in the distribution game.
pub mod sample_count {
    /// Smallest selectable sample count.
    pub const MIN: usize = 100;
    /// Largest selectable sample count.
    pub const MAX: usize = 10_000;
    /// Slider increment.
    pub const STEP: usize = 100;
    /// Initial sample count.
    pub const DEFAULT: usize = 100;

    /// Moves `count` by `steps` slider increments, staying within bounds.
    ///
    /// ```
    /// use datagames_engine::sample_count;
    ///
    /// assert_eq!(sample_count::step(100, 3), 400);
    /// assert_eq!(sample_count::step(100, -1), 100);
    /// assert_eq!(sample_count::step(9_950, 1), 10_000);
    /// ```
    #[must_use]
    pub fn step(count: usize, steps: isize) -> usize {
        let delta = STEP.saturating_mul(steps.unsigned_abs());
        let moved = if steps >= 0 {
            count.saturating_add(delta)
        } else {
            count.saturating_sub(delta)
        };
        moved.clamp(MIN, MAX)
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_huge_steps_clamp_to_bounds() {
            assert_eq!(step(DEFAULT, isize::MAX), MAX);
            assert_eq!(step(DEFAULT, isize::MIN), MIN);
            assert_eq!(step(MAX, -1), MAX - STEP);
        }
    }
}
