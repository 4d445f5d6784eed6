use datagames_stats::histogram::DensityHistogram;
use serde::Serialize;

use crate::{DistributionCatalog, Family, SampleSet, UnknownFamilyError};

/// Outcome of comparing a guess against the hidden family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, derive_more::IsVariant)]
#[serde(rename_all = "snake_case")]
pub enum GuessOutcome {
    /// The guess was empty after trimming; nothing was judged.
    NoGuess,
    /// The guess names the family.
    Correct,
    /// The guess names something else.
    Incorrect,
}

/// Everything the host needs to render one round of the distribution game.
#[derive(Debug, Clone, Serialize)]
pub struct GuessEvaluation {
    /// The sample set to draw as a histogram.
    pub samples: SampleSet,
    /// How the guess compared against the family name.
    pub outcome: GuessOutcome,
    /// Plain-text feedback for the player.
    pub message: String,
}

impl GuessEvaluation {
    /// Returns whether the guess was correct.
    #[must_use]
    pub fn correct(&self) -> bool {
        self.outcome.is_correct()
    }

    /// Returns whether the host should overlay the family density on the histogram.
    #[must_use]
    pub fn reveal_density(&self) -> bool {
        self.outcome.is_correct()
    }
}

/// Engine for the "guess the distribution" game.
///
/// Wraps a [`DistributionCatalog`] and judges guesses against the display name
/// of the selected family. The engine never draws anything itself: it hands
/// back the samples and a flag telling the host whether the density overlay
/// may be shown.
///
/// # Example
///
/// ```
/// use datagames_engine::{DistributionCatalog, GuessDistributionEngine, GuessOutcome};
///
/// let mut engine = GuessDistributionEngine::new(DistributionCatalog::default());
///
/// let eval = engine.evaluate_guess(3, 100, "  POWER ").unwrap();
/// assert_eq!(eval.outcome, GuessOutcome::Correct);
/// assert!(eval.reveal_density());
///
/// let eval = engine.evaluate_guess(3, 100, "").unwrap();
/// assert_eq!(eval.outcome, GuessOutcome::NoGuess);
/// ```
#[derive(Debug, Clone, Default)]
pub struct GuessDistributionEngine {
    catalog: DistributionCatalog,
}

impl GuessDistributionEngine {
    #[must_use]
    pub fn new(catalog: DistributionCatalog) -> Self {
        Self { catalog }
    }

    #[must_use]
    pub fn catalog(&self) -> &DistributionCatalog {
        &self.catalog
    }

    /// Fetches the (memoised) samples for `(key, count)` and judges `guess_text`.
    pub fn evaluate_guess(
        &mut self,
        key: u8,
        count: usize,
        guess_text: &str,
    ) -> Result<GuessEvaluation, UnknownFamilyError> {
        let family = Family::from_key(key)?;
        let samples = self.catalog.sample_family(family, count);
        let guess = guess_text.trim();

        let (outcome, message) = if guess.is_empty() {
            (
                GuessOutcome::NoGuess,
                "Please write a guess in the box above!".to_owned(),
            )
        } else if family.matches_name(guess) {
            (
                GuessOutcome::Correct,
                format!("Congratulations! You guessed {guess} distribution, which is correct!"),
            )
        } else {
            (
                GuessOutcome::Incorrect,
                format!(
                    "You guessed {guess} distribution, which is incorrect :(. Please guess again!"
                ),
            )
        };
        tracing::debug!(%family, count, ?outcome, "evaluated distribution guess");

        Ok(GuessEvaluation {
            samples,
            outcome,
            message,
        })
    }

    /// Evaluates the density of family `key` at the bin edges of `histogram`.
    ///
    /// The returned `(x, density)` points line up with the histogram so the
    /// host can draw the density on top of it once the guess is correct.
    pub fn density_overlay(
        &self,
        key: u8,
        histogram: &DensityHistogram,
    ) -> Result<Vec<(f64, f64)>, UnknownFamilyError> {
        let edges = histogram.edges();
        let densities = self.catalog.density(key, &edges)?;
        Ok(edges.into_iter().zip(densities).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_name_in_any_case_with_whitespace_is_correct() {
        let mut engine = GuessDistributionEngine::default();
        for family in Family::ALL {
            for text in [
                family.name().to_owned(),
                format!("   {}\n", family.name().to_uppercase()),
                format!("\t{}  ", family.name().to_lowercase()),
            ] {
                let eval = engine.evaluate_guess(family.key(), 200, &text).unwrap();
                assert!(eval.correct(), "{text:?}");
                assert!(eval.reveal_density());
                assert!(eval.message.contains("correct!"));
            }
        }
    }

    #[test]
    fn test_blank_guess_is_not_incorrect() {
        let mut engine = GuessDistributionEngine::default();
        for text in ["", "   ", "\t\n"] {
            let eval = engine.evaluate_guess(1, 100, text).unwrap();
            assert_eq!(eval.outcome, GuessOutcome::NoGuess);
            assert!(!eval.correct());
            assert!(!eval.reveal_density());
            assert_eq!(eval.message, "Please write a guess in the box above!");
        }
    }

    #[test]
    fn test_wrong_guess_keeps_overlay_hidden() {
        let mut engine = GuessDistributionEngine::default();
        let eval = engine.evaluate_guess(5, 100, " cauchy ").unwrap();
        assert_eq!(eval.outcome, GuessOutcome::Incorrect);
        assert!(!eval.reveal_density());
        assert_eq!(
            eval.message,
            "You guessed cauchy distribution, which is incorrect :(. Please guess again!"
        );
    }

    #[test]
    fn test_samples_come_from_the_cache() {
        let mut engine = GuessDistributionEngine::default();
        let first = engine.evaluate_guess(4, 300, "normal").unwrap();
        let second = engine.evaluate_guess(4, 300, "uniform").unwrap();
        assert_eq!(first.samples, second.samples);
        assert_eq!(engine.catalog().cached_entries(), 1);
    }

    #[test]
    fn test_unknown_family() {
        let mut engine = GuessDistributionEngine::default();
        assert!(engine.evaluate_guess(7, 100, "normal").is_err());
    }

    #[test]
    fn test_density_overlay_follows_bin_edges() {
        let mut engine = GuessDistributionEngine::default();
        let eval = engine.evaluate_guess(4, 1000, "").unwrap();
        let histogram = DensityHistogram::new(&eval.samples, 100);
        let overlay = engine.density_overlay(4, &histogram).unwrap();
        assert_eq!(overlay.len(), 101);
        assert!(overlay.iter().all(|&(_, y)| (y - 0.2).abs() < 1e-12));
        assert!(engine.density_overlay(0, &histogram).is_err());
    }
}
