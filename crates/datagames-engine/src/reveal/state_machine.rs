use super::{Figure, FigureState, RevealStep, builtin_figures};

/// Error returned when a figure index is out of range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("unknown figure index {index} (there are {count} figures)")]
pub struct UnknownFigureError {
    pub index: usize,
    pub count: usize,
}

/// Where the machine is in its reveal sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum RevealPhase {
    /// No figure is loaded; the figure state is empty.
    Unselected,
    /// A figure is loaded and `cursor` of its steps have been revealed.
    Revealing { cursor: usize },
    /// Every step of the loaded figure has been revealed.
    Exhausted,
}

/// Result of one [`RevealStateMachine::reveal_next`] call.
#[derive(Debug, Clone, Copy)]
pub struct Reveal<'a> {
    /// The accumulated figure state after the call.
    pub figure: &'a FigureState,
    /// The step applied by this call, `None` when nothing was left to reveal.
    pub step: Option<RevealStep>,
    /// Whether the call found every step already revealed.
    pub exhausted: bool,
}

/// Progressive disclosure of a figure's properties.
///
/// # States
///
/// ```text
/// Unselected ──select_figure──▶ Revealing(0) ──reveal_next──▶ … ──▶ Revealing(5)
///     ▲                                                                 │
///     │ reset                                                 reveal_next
///     │                                                                 ▼
///     └──────────────────────────────────────────────────────────── Exhausted
/// ```
///
/// `select_figure` restarts from `Revealing(0)` from any state. After
/// `reset`, the next `reveal_next` reloads the most recently selected figure
/// (the first figure if none was ever selected).
///
/// # Example
///
/// ```
/// use datagames_engine::{RevealStateMachine, RevealStep};
///
/// let mut machine = RevealStateMachine::default();
/// machine.select_figure(0).unwrap();
///
/// let reveal = machine.reveal_next();
/// assert_eq!(reveal.step, Some(RevealStep::Trace));
/// assert!(!reveal.exhausted);
/// ```
#[derive(Debug, Clone)]
pub struct RevealStateMachine {
    figures: Vec<Figure>,
    selected: Option<usize>,
    last_selected: usize,
    cursor: usize,
    state: FigureState,
}

impl Default for RevealStateMachine {
    fn default() -> Self {
        Self::new(builtin_figures())
    }
}

impl RevealStateMachine {
    /// Creates a machine over `figures`, with nothing selected.
    #[must_use]
    pub fn new(figures: Vec<Figure>) -> Self {
        Self {
            figures,
            selected: None,
            last_selected: 0,
            cursor: 0,
            state: FigureState::default(),
        }
    }

    #[must_use]
    pub fn figures(&self) -> &[Figure] {
        &self.figures
    }

    /// Returns the index of the loaded figure, if any.
    #[must_use]
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Returns the properties revealed so far.
    #[must_use]
    pub fn state(&self) -> &FigureState {
        &self.state
    }

    #[must_use]
    pub fn phase(&self) -> RevealPhase {
        match self.selected {
            None => RevealPhase::Unselected,
            Some(_) if self.cursor >= RevealStep::ORDER.len() => RevealPhase::Exhausted,
            Some(_) => RevealPhase::Revealing {
                cursor: self.cursor,
            },
        }
    }

    /// Loads figure `index` with nothing revealed.
    pub fn select_figure(&mut self, index: usize) -> Result<(), UnknownFigureError> {
        if index >= self.figures.len() {
            return Err(UnknownFigureError {
                index,
                count: self.figures.len(),
            });
        }
        self.selected = Some(index);
        self.last_selected = index;
        self.cursor = 0;
        self.state = FigureState::default();
        tracing::debug!(index, "selected figure");
        Ok(())
    }

    /// Reveals the next property of the loaded figure.
    ///
    /// Once every property is revealed the call changes nothing and reports
    /// `exhausted`. With no figure loaded, the most recently selected figure
    /// is loaded first; if there are no figures at all the call reports
    /// `exhausted`.
    pub fn reveal_next(&mut self) -> Reveal<'_> {
        if self.selected.is_none() && self.select_figure(self.last_selected).is_err() {
            return Reveal {
                figure: &self.state,
                step: None,
                exhausted: true,
            };
        }
        let Some(figure) = self.selected.and_then(|index| self.figures.get(index)) else {
            return Reveal {
                figure: &self.state,
                step: None,
                exhausted: true,
            };
        };

        let Some(&step) = RevealStep::ORDER.get(self.cursor) else {
            tracing::debug!("no more properties to reveal");
            return Reveal {
                figure: &self.state,
                step: None,
                exhausted: true,
            };
        };
        self.state.apply(step, figure);
        self.cursor += 1;
        tracing::debug!(%step, cursor = self.cursor, "revealed figure property");
        Reveal {
            figure: &self.state,
            step: Some(step),
            exhausted: false,
        }
    }

    /// Discards the loaded figure and everything revealed.
    pub fn reset(&mut self) {
        self.selected = None;
        self.cursor = 0;
        self.state = FigureState::default();
    }
}
