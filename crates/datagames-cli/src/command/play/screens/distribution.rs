use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use datagames_engine::{
    Family, GuessDistributionEngine, GuessEvaluation, GuessOutcome, UnknownFamilyError,
    sample_count,
};
use datagames_stats::{descriptive::DescriptiveStats, histogram::DensityHistogram};
use datagames_tui::{Screen, ScreenTransition};
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
    style::Style,
    text::{Line, Span},
    widgets::{Block as BlockWidget, LineGauge, Paragraph},
};

use crate::ui::widgets::{
    HistogramChart, KeyBinding, KeyBindingDisplay, TextField, TextInput, style,
};

/// Number of histogram bins the samples are drawn with.
const HISTOGRAM_BINS: usize = 100;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Action {
    PrevFamily,
    NextFamily,
    MoreSamples(isize),
    FewerSamples(isize),
    Submit,
    Back,
}

impl Action {
    fn from_key_event(event: &KeyEvent) -> Option<Self> {
        let ctrl = event.modifiers.contains(KeyModifiers::CONTROL);
        match event.code {
            KeyCode::Up => Some(Self::PrevFamily),
            KeyCode::Down => Some(Self::NextFamily),
            KeyCode::PageUp => Some(Self::MoreSamples(1)),
            KeyCode::PageDown => Some(Self::FewerSamples(1)),
            KeyCode::Right if ctrl => Some(Self::MoreSamples(10)),
            KeyCode::Left if ctrl => Some(Self::FewerSamples(10)),
            KeyCode::Enter => Some(Self::Submit),
            KeyCode::Esc => Some(Self::Back),
            _ => None,
        }
    }

    fn bindings() -> &'static [KeyBinding<'static>] {
        &[
            (&["↑", "↓"], "Distribution"),
            (&["PgUp", "PgDn"], "Samples ±100"),
            (&["C-→", "C-←"], "Samples ±1000"),
            (&["Enter"], "Guess"),
            (&["Esc"], "Back"),
        ]
    }
}

/// What is on screen for the current family, count and guess.
#[derive(Debug)]
struct Round {
    evaluation: GuessEvaluation,
    stats: Option<DescriptiveStats>,
    histogram: DensityHistogram,
    overlay: Option<Vec<(f64, f64)>>,
}

impl Round {
    fn evaluate(
        engine: &mut GuessDistributionEngine,
        family: Family,
        count: usize,
        guess: &str,
    ) -> Result<Self, UnknownFamilyError> {
        let evaluation = engine.evaluate_guess(family.key(), count, guess)?;
        let histogram = DensityHistogram::new(&evaluation.samples, HISTOGRAM_BINS);
        let overlay = if evaluation.reveal_density() {
            Some(engine.density_overlay(family.key(), &histogram)?)
        } else {
            None
        };
        Ok(Self {
            stats: DescriptiveStats::new(evaluation.samples.iter().copied()),
            evaluation,
            histogram,
            overlay,
        })
    }
}

/// "Guess the distribution": pick a secret family, vary the sample count and
/// name the family.
#[derive(Debug)]
pub struct DistributionScreen {
    engine: GuessDistributionEngine,
    family: Family,
    count: usize,
    input: TextInput,
    submitted: String,
    round: Result<Round, UnknownFamilyError>,
}

impl DistributionScreen {
    pub fn new(mut engine: GuessDistributionEngine) -> Self {
        let family = Family::Normal;
        let count = sample_count::DEFAULT;
        let round = Round::evaluate(&mut engine, family, count, "");
        Self {
            engine,
            family,
            count,
            input: TextInput::new(),
            submitted: String::new(),
            round,
        }
    }

    fn refresh(&mut self) {
        self.round = Round::evaluate(&mut self.engine, self.family, self.count, &self.submitted);
        if let Err(err) = &self.round {
            tracing::warn!(%err, "failed to evaluate distribution round");
        }
    }

    fn select_family(&mut self, offset: usize) {
        let len = Family::ALL.len();
        let index = Family::ALL
            .iter()
            .position(|&family| family == self.family)
            .unwrap_or(0);
        self.family = Family::ALL[(index + offset) % len];
        self.refresh();
    }

    fn step_count(&mut self, steps: isize) {
        let count = sample_count::step(self.count, steps);
        if count != self.count {
            self.count = count;
            self.refresh();
        }
    }

    #[expect(clippy::cast_precision_loss)]
    fn count_ratio(&self) -> f64 {
        (self.count - sample_count::MIN) as f64
            / (sample_count::MAX - sample_count::MIN) as f64
    }
}

impl Screen for DistributionScreen {
    fn on_close(&mut self) {
        tracing::debug!(
            cached_sets = self.engine.catalog().cached_entries(),
            "closing distribution game"
        );
    }

    fn handle_event(&mut self, event: &Event) -> ScreenTransition {
        let Some(event) = event.as_key_event() else {
            return ScreenTransition::Stay;
        };
        if let Some(action) = Action::from_key_event(&event) {
            let len = Family::ALL.len();
            match action {
                Action::PrevFamily => self.select_family(len - 1),
                Action::NextFamily => self.select_family(1),
                Action::MoreSamples(steps) => self.step_count(steps),
                Action::FewerSamples(steps) => self.step_count(-steps),
                Action::Submit => {
                    self.submitted = self.input.value().to_owned();
                    self.refresh();
                }
                Action::Back => return ScreenTransition::Pop,
            }
        } else if event.code == KeyCode::Char('c')
            && event.modifiers.contains(KeyModifiers::CONTROL)
        {
            return ScreenTransition::Exit;
        } else {
            self.input.handle_key(&event);
        }
        ScreenTransition::Stay
    }

    fn draw(&self, frame: &mut Frame) {
        let [
            selector_area,
            gauge_area,
            main_area,
            input_area,
            message_area,
            help_area,
        ] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(frame.area());
        let [chart_area, stats_area] =
            Layout::horizontal([Constraint::Fill(1), Constraint::Length(24)]).areas(main_area);

        let mut radio = vec![];
        for family in Family::ALL {
            let (mark, style) = if family == self.family {
                ("(•)", style::SELECTED)
            } else {
                ("( )", Style::new())
            };
            radio.push(Span::styled(format!(" {mark} {} ", family.key()), style));
        }
        let selector = Paragraph::new(Line::from(radio).centered()).block(
            BlockWidget::bordered()
                .title("Guess the Distribution!")
                .title_bottom("Select one of the five secret distributions"),
        );

        let gauge = LineGauge::default()
            .filled_style(style::SAMPLES)
            .label(format!("Samples: {:>6}", self.count))
            .ratio(self.count_ratio());

        frame.render_widget(selector, selector_area);
        frame.render_widget(gauge, gauge_area);

        let message = match &self.round {
            Ok(round) => {
                let title = format!(
                    "{} samples (requested {})",
                    round.evaluation.samples.len(),
                    self.count
                );
                let chart = HistogramChart::new(&round.histogram, &title)
                    .density(round.overlay.as_deref());
                frame.render_widget(chart, chart_area);
                frame.render_widget(stats_panel(round.stats.as_ref()), stats_area);

                let message_style = match round.evaluation.outcome {
                    GuessOutcome::NoGuess => style::HELP,
                    GuessOutcome::Correct => style::SUCCESS,
                    GuessOutcome::Incorrect => style::FAILURE,
                };
                Line::styled(round.evaluation.message.as_str(), message_style)
            }
            Err(err) => Line::styled(err.to_string(), style::FAILURE),
        };

        let field = TextField::new(
            &self.input,
            "Input the name of the distribution you think it is:",
        )
        .focused(true);
        frame.render_widget(field, input_area);
        frame.render_widget(message.centered(), message_area);
        frame.render_widget(KeyBindingDisplay::new(Action::bindings()), help_area);
    }
}

fn stats_panel(stats: Option<&DescriptiveStats>) -> Paragraph<'static> {
    let lines = match stats {
        Some(stats) => vec![
            Line::raw(format!(" N:      {:>10}", stats.count)),
            Line::raw(format!(" Mean:   {:>10.3}", stats.mean)),
            Line::raw(format!(" Median: {:>10.3}", stats.median)),
            Line::raw(format!(" StdDev: {:>10.3}", stats.std_dev)),
            Line::raw(format!(" Min:    {:>10.3}", stats.min)),
            Line::raw(format!(" Max:    {:>10.3}", stats.max)),
        ],
        None => vec![Line::styled(" No samples", style::HELP)],
    };
    Paragraph::new(lines).block(BlockWidget::bordered().title("Statistics"))
}

#[cfg(test)]
mod tests {
    use datagames_engine::DistributionCatalog;

    use super::*;
    use crate::command::play::screens::test_util::{key, type_str};

    fn screen() -> DistributionScreen {
        DistributionScreen::new(GuessDistributionEngine::new(DistributionCatalog::default()))
    }

    fn round(screen: &DistributionScreen) -> &Round {
        screen.round.as_ref().unwrap()
    }

    #[test]
    fn test_starts_without_guess() {
        let screen = screen();
        let round = round(&screen);
        assert_eq!(round.evaluation.outcome, GuessOutcome::NoGuess);
        assert_eq!(round.evaluation.samples.len(), sample_count::DEFAULT);
        assert!(round.overlay.is_none());
    }

    #[test]
    fn test_correct_guess_reveals_density() {
        let mut screen = screen();
        for event in type_str("Normal") {
            screen.handle_event(&event);
        }
        screen.handle_event(&key(KeyCode::Enter));
        let round = round(&screen);
        assert_eq!(round.evaluation.outcome, GuessOutcome::Correct);
        assert_eq!(round.overlay.as_ref().unwrap().len(), HISTOGRAM_BINS + 1);
    }

    #[test]
    fn test_guess_is_judged_against_new_family() {
        let mut screen = screen();
        for event in type_str("normal") {
            screen.handle_event(&event);
        }
        screen.handle_event(&key(KeyCode::Enter));
        screen.handle_event(&key(KeyCode::Down));
        assert_eq!(screen.family, Family::Lorentz);
        assert_eq!(round(&screen).evaluation.outcome, GuessOutcome::Incorrect);

        screen.handle_event(&key(KeyCode::Up));
        screen.handle_event(&key(KeyCode::Up));
        assert_eq!(screen.family, Family::Gamma);
    }

    #[test]
    fn test_typing_does_not_submit() {
        let mut screen = screen();
        for event in type_str("gamma") {
            screen.handle_event(&event);
        }
        assert_eq!(screen.input.value(), "gamma");
        assert_eq!(round(&screen).evaluation.outcome, GuessOutcome::NoGuess);
    }

    #[test]
    fn test_sample_count_stays_in_bounds() {
        let mut screen = screen();
        screen.handle_event(&key(KeyCode::PageDown));
        assert_eq!(screen.count, sample_count::MIN);
        screen.handle_event(&key(KeyCode::PageUp));
        assert_eq!(screen.count, 200);
        assert_eq!(round(&screen).evaluation.samples.len(), 200);
    }

    #[test]
    fn test_escape_goes_back() {
        let mut screen = screen();
        assert!(matches!(
            screen.handle_event(&key(KeyCode::Esc)),
            ScreenTransition::Pop
        ));
    }
}
