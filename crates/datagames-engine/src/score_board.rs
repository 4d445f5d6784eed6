use serde::{Deserialize, Serialize};

/// One participant's guess of R².
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Guess {
    pub name: String,
    pub value: f64,
}

/// Error returned when a guess lies outside `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, derive_more::Display, derive_more::Error)]
#[display("guess {value} is outside the range [0, 1]")]
pub struct OutOfRangeError {
    pub value: f64,
}

/// Ordered, append-only list of guesses for one regression trial.
///
/// Names are not validated: empty or whitespace-only names are stored as given.
///
/// # Example
///
/// ```
/// use datagames_engine::ScoreBoard;
///
/// let mut board = ScoreBoard::new();
/// board.add_guess("A", 0.9).unwrap();
/// board.add_guess("B", 0.5).unwrap();
///
/// let winner = board.determine_winner(0.52).unwrap();
/// assert_eq!(winner.name, "B");
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScoreBoard {
    guesses: Vec<Guess>,
}

impl ScoreBoard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a guess. `value` must lie in `[0, 1]`.
    pub fn add_guess<S>(&mut self, name: S, value: f64) -> Result<(), OutOfRangeError>
    where
        S: Into<String>,
    {
        if !(0.0..=1.0).contains(&value) {
            return Err(OutOfRangeError { value });
        }
        self.guesses.push(Guess {
            name: name.into(),
            value,
        });
        Ok(())
    }

    /// Removes every guess.
    pub fn clear(&mut self) {
        self.guesses.clear();
    }

    /// Returns the guesses in submission order.
    #[must_use]
    pub fn guesses(&self) -> &[Guess] {
        &self.guesses
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.guesses.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.guesses.is_empty()
    }

    /// Returns the guess closest to `true_r2`.
    ///
    /// Ties go to the guess submitted first. Returns `None` when no guesses
    /// have been made.
    #[must_use]
    pub fn determine_winner(&self, true_r2: f64) -> Option<&Guess> {
        let mut best: Option<(&Guess, f64)> = None;
        for guess in &self.guesses {
            let distance = (guess.value - true_r2).abs();
            if best.is_none_or(|(_, best_distance)| distance < best_distance) {
                best = Some((guess, distance));
            }
        }
        best.map(|(guess, _)| guess)
    }
}
