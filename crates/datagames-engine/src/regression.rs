use datagames_stats::regression::{FitError, LinearFit};
use rand::{Rng, SeedableRng as _};
use rand_pcg::Pcg32;
use serde::Serialize;

use crate::{Guess, OutOfRangeError, ScoreBoard, Seed};

/// Number of points in a trial of the R² game.
pub const DEFAULT_TRIAL_SIZE: usize = 20;
/// Upper bound (exclusive) of the x positions in a trial.
pub const X_MAX: f64 = 5.0;
/// Upper bound (exclusive) of the additive noise.
pub const NOISE_MAX: f64 = 2.0;
/// Number of points [`RegressionGame::fit_line`] samples the fitted line at.
pub const FIT_LINE_POINTS: usize = 50;

/// A synthetic noisy linear dataset.
///
/// Immutable once generated; a new trial replaces it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegressionTrial {
    x: Vec<f64>,
    y: Vec<f64>,
    true_slope: f64,
    true_intercept: f64,
}

impl RegressionTrial {
    #[must_use]
    pub fn x(&self) -> &[f64] {
        &self.x
    }

    #[must_use]
    pub fn y(&self) -> &[f64] {
        &self.y
    }

    /// Returns the `(x, y)` pairs of the trial.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.x.iter().copied().zip(self.y.iter().copied())
    }

    /// The slope the data was generated with.
    #[must_use]
    pub fn true_slope(&self) -> f64 {
        self.true_slope
    }

    /// The intercept the data was generated with (always zero).
    #[must_use]
    pub fn true_intercept(&self) -> f64 {
        self.true_intercept
    }

    /// Fits a least-squares line to this trial.
    pub fn fit(&self) -> Result<FitResult, FitError> {
        fit(&self.x, &self.y)
    }
}

/// Least-squares fit of a trial.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FitResult {
    pub slope: f64,
    pub intercept: f64,
    pub r2: f64,
}

impl FitResult {
    /// Evaluates the fitted line at `x`.
    #[must_use]
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

impl From<LinearFit> for FitResult {
    fn from(fit: LinearFit) -> Self {
        Self {
            slope: fit.slope,
            intercept: fit.intercept,
            r2: fit.r2,
        }
    }
}

/// Fits `y = slope * x + intercept` by ordinary least squares.
///
/// Requires at least two points of equal-length input and at least two
/// distinct x values.
///
/// ```
/// use datagames_engine::{FitError, regression};
///
/// let fit = regression::fit(&[0.0, 1.0, 2.0, 3.0, 4.0], &[0.0, 1.0, 2.0, 3.0, 4.0]).unwrap();
/// assert!((fit.r2 - 1.0).abs() < 1e-12);
/// assert_eq!(regression::fit(&[1.0, 1.0], &[0.0, 1.0]), Err(FitError::DegenerateInput));
/// ```
pub fn fit(xs: &[f64], ys: &[f64]) -> Result<FitResult, FitError> {
    LinearFit::fit(xs, ys).map(FitResult::from)
}

/// Generates synthetic noisy linear data.
///
/// Each trial draws a slope uniformly from `[-1, 1]`, fixes the intercept at
/// zero, and draws every x uniformly from `[0, 5)` and additive noise
/// uniformly from `[0, 2)`. Trials are never cached: each call is a fresh,
/// independent draw.
#[derive(Debug, Clone)]
pub struct RegressionDataGenerator {
    rng: Pcg32,
}

impl Default for RegressionDataGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl RegressionDataGenerator {
    /// Creates a generator seeded from the thread-local random source.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rng: Pcg32::from_rng(&mut rand::rng()),
        }
    }

    /// Like [`Self::new`], but reproducible.
    #[must_use]
    pub fn with_seed(seed: Seed) -> Self {
        Self { rng: seed.rng() }
    }

    /// Draws a new trial with `count` points.
    pub fn generate(&mut self, count: usize) -> RegressionTrial {
        let true_slope = self.rng.random_range(-1.0..=1.0);
        let true_intercept = 0.0;
        let x = (0..count)
            .map(|_| self.rng.random_range(0.0..X_MAX))
            .collect::<Vec<f64>>();
        let y = x
            .iter()
            .map(|&x| true_slope * x + true_intercept + self.rng.random_range(0.0..NOISE_MAX))
            .collect();
        tracing::debug!(count, true_slope, "generated regression trial");
        RegressionTrial {
            x,
            y,
            true_slope,
            true_intercept,
        }
    }
}

/// Result of ending a round of the R² game.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoundSummary {
    /// The closest guess, if anyone guessed.
    pub winner: Option<Guess>,
    pub fit: FitResult,
    pub true_slope: f64,
    pub true_intercept: f64,
}

/// Per-session state of the "guess R²" game.
///
/// Holds the current trial and its fit, and the guesses made for it.
/// Generating new data replaces the trial and clears every guess.
///
/// # Example
///
/// ```
/// use datagames_engine::{RegressionDataGenerator, RegressionGame, Seed};
///
/// let mut game = RegressionGame::new(RegressionDataGenerator::with_seed(Seed::default()));
/// assert!(game.determine_winner().is_none());
///
/// game.generate_data().unwrap();
/// game.add_guess("Ada", 0.4).unwrap();
/// game.add_guess("Bob", 0.9).unwrap();
///
/// let summary = game.determine_winner().unwrap();
/// assert!(summary.winner.is_some());
/// ```
#[derive(Debug, Clone)]
pub struct RegressionGame {
    generator: RegressionDataGenerator,
    trial_size: usize,
    current: Option<(RegressionTrial, FitResult)>,
    score_board: ScoreBoard,
}

impl Default for RegressionGame {
    fn default() -> Self {
        Self::new(RegressionDataGenerator::new())
    }
}

impl RegressionGame {
    #[must_use]
    pub fn new(generator: RegressionDataGenerator) -> Self {
        Self::with_trial_size(generator, DEFAULT_TRIAL_SIZE)
    }

    #[must_use]
    pub fn with_trial_size(generator: RegressionDataGenerator, trial_size: usize) -> Self {
        Self {
            generator,
            trial_size,
            current: None,
            score_board: ScoreBoard::new(),
        }
    }

    /// Replaces the trial with a freshly generated one and clears all guesses.
    ///
    /// If the new trial cannot be fitted the previous trial and guesses are kept.
    pub fn generate_data(&mut self) -> Result<(&RegressionTrial, FitResult), FitError> {
        let trial = self.generator.generate(self.trial_size);
        let fit = trial.fit()?;
        self.score_board.clear();
        tracing::info!(points = self.trial_size, r2 = fit.r2, "new regression round");
        let (trial, fit) = self.current.insert((trial, fit));
        Ok((&*trial, *fit))
    }

    /// Returns the current trial, or `None` before the first generation.
    #[must_use]
    pub fn trial(&self) -> Option<&RegressionTrial> {
        self.current.as_ref().map(|(trial, _)| trial)
    }

    /// Returns the fit of the current trial, or `None` before the first generation.
    #[must_use]
    pub fn fit(&self) -> Option<FitResult> {
        self.current.as_ref().map(|(_, fit)| *fit)
    }

    #[must_use]
    pub fn score_board(&self) -> &ScoreBoard {
        &self.score_board
    }

    pub fn add_guess<S>(&mut self, name: S, value: f64) -> Result<(), OutOfRangeError>
    where
        S: Into<String>,
    {
        self.score_board.add_guess(name, value)
    }

    pub fn clear_guesses(&mut self) {
        self.score_board.clear();
    }

    /// Picks the guess closest to the fitted R² and reports the fitted and
    /// true parameters.
    ///
    /// Returns `None` before the first trial has been generated.
    #[must_use]
    pub fn determine_winner(&self) -> Option<RoundSummary> {
        let (trial, fit) = self.current.as_ref()?;
        Some(RoundSummary {
            winner: self.score_board.determine_winner(fit.r2).cloned(),
            fit: *fit,
            true_slope: trial.true_slope,
            true_intercept: trial.true_intercept,
        })
    }

    /// Samples the fitted line at evenly spaced x positions over `[0, 5]`.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn fit_line(&self) -> Option<Vec<(f64, f64)>> {
        let fit = self.fit()?;
        let step = X_MAX / (FIT_LINE_POINTS - 1) as f64;
        Some(
            (0..FIT_LINE_POINTS)
                .map(|i| {
                    let x = step * i as f64;
                    (x, fit.predict(x))
                })
                .collect(),
        )
    }
}
