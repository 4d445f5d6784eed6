use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use datagames_engine::{RegressionGame, RoundSummary};
use datagames_tui::{Screen, ScreenTransition};
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block as BlockWidget, Paragraph, Row, Table},
};

use crate::ui::widgets::{
    KeyBinding, KeyBindingDisplay, RegressionChart, TextField, TextInput, style,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Action {
    SwitchField,
    AddGuess,
    Generate,
    ClearGuesses,
    DetermineWinner,
    Back,
    Exit,
}

impl Action {
    fn from_key_event(event: &KeyEvent) -> Option<Self> {
        if event.modifiers.contains(KeyModifiers::CONTROL) {
            return match event.code {
                KeyCode::Char('g') => Some(Self::Generate),
                KeyCode::Char('x') => Some(Self::ClearGuesses),
                KeyCode::Char('w') => Some(Self::DetermineWinner),
                KeyCode::Char('c') => Some(Self::Exit),
                _ => None,
            };
        }
        match event.code {
            KeyCode::Tab | KeyCode::BackTab => Some(Self::SwitchField),
            KeyCode::Enter => Some(Self::AddGuess),
            KeyCode::Esc => Some(Self::Back),
            _ => None,
        }
    }

    fn bindings() -> &'static [KeyBinding<'static>] {
        &[
            (&["C-g"], "Generate data"),
            (&["Tab"], "Switch field"),
            (&["Enter"], "Add guess"),
            (&["C-x"], "Clear guesses"),
            (&["C-w"], "Determine winner"),
            (&["Esc"], "Back"),
        ]
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Field {
    Name,
    Guess,
}

#[derive(Debug, Clone, PartialEq)]
enum Status {
    Info(String),
    Error(String),
}

/// "Guess R²": participants enter guesses for the R² of the fitted line and
/// the closest one wins.
#[derive(Debug)]
pub struct RSquaredScreen {
    game: RegressionGame,
    name: TextInput,
    guess: TextInput,
    focus: Field,
    status: Status,
    summary: Option<RoundSummary>,
}

impl RSquaredScreen {
    pub fn new(game: RegressionGame) -> Self {
        Self {
            game,
            name: TextInput::new(),
            guess: TextInput::new(),
            focus: Field::Name,
            status: Status::Info("Press Ctrl-g to generate data!".to_owned()),
            summary: None,
        }
    }

    fn focused_input(&mut self) -> &mut TextInput {
        match self.focus {
            Field::Name => &mut self.name,
            Field::Guess => &mut self.guess,
        }
    }

    fn generate(&mut self) {
        self.summary = None;
        self.status = match self.game.generate_data() {
            Ok((trial, _)) => Status::Info(format!("Generated {} new points", trial.x().len())),
            Err(err) => {
                tracing::warn!(%err, "failed to fit regression trial");
                Status::Error(format!("Could not fit the new data: {err}"))
            }
        };
    }

    fn add_guess(&mut self) {
        let name = self.name.value().trim().to_owned();
        let Ok(value) = self.guess.value().trim().parse::<f64>() else {
            self.status = Status::Error("Your guess must be a number between 0 and 1".to_owned());
            self.focus = Field::Guess;
            return;
        };
        match self.game.add_guess(name.as_str(), value) {
            Ok(()) => {
                self.status = Status::Info(format!("Added {value} for {name}"));
                self.summary = None;
                self.name.clear();
                self.guess.clear();
                self.focus = Field::Name;
            }
            Err(err) => self.status = Status::Error(err.to_string()),
        }
    }

    fn determine_winner(&mut self) {
        self.summary = self.game.determine_winner();
        if let Some(summary) = &self.summary {
            tracing::info!(
                winner = summary.winner.as_ref().map(|guess| guess.name.as_str()),
                r2 = summary.fit.r2,
                "determined winner"
            );
        } else {
            self.status = Status::Error("Generate data before determining a winner".to_owned());
        }
    }
}

impl Screen for RSquaredScreen {
    fn on_close(&mut self) {
        tracing::debug!(
            guesses = self.game.score_board().guesses().len(),
            "closing R² game"
        );
    }

    fn handle_event(&mut self, event: &Event) -> ScreenTransition {
        let Some(event) = event.as_key_event() else {
            return ScreenTransition::Stay;
        };
        let Some(action) = Action::from_key_event(&event) else {
            self.focused_input().handle_key(&event);
            return ScreenTransition::Stay;
        };
        match action {
            Action::SwitchField => {
                self.focus = match self.focus {
                    Field::Name => Field::Guess,
                    Field::Guess => Field::Name,
                };
            }
            Action::AddGuess => self.add_guess(),
            Action::Generate => self.generate(),
            Action::ClearGuesses => {
                self.game.clear_guesses();
                self.summary = None;
                self.status = Status::Info("Cleared all guesses".to_owned());
            }
            Action::DetermineWinner => self.determine_winner(),
            Action::Back => return ScreenTransition::Pop,
            Action::Exit => return ScreenTransition::Exit,
        }
        ScreenTransition::Stay
    }

    fn draw(&self, frame: &mut Frame) {
        let [main_area, input_area, status_area, help_area] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(frame.area());
        let [chart_area, side_area] =
            Layout::horizontal([Constraint::Fill(1), Constraint::Length(40)]).areas(main_area);
        let [table_area, summary_area] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(9)]).areas(side_area);
        let [name_area, guess_area] =
            Layout::horizontal([Constraint::Fill(2), Constraint::Fill(1)]).areas(input_area);

        let points = self
            .game
            .trial()
            .map(|trial| trial.points().collect::<Vec<_>>())
            .unwrap_or_default();
        let fit_line = self.game.fit_line().unwrap_or_default();
        frame.render_widget(RegressionChart::new(&points, &fit_line), chart_area);

        let rows = self
            .game
            .score_board()
            .guesses()
            .iter()
            .map(|guess| Row::new([guess.name.clone(), format!("{:.3}", guess.value)]));
        let table = Table::new(rows, [Constraint::Fill(1), Constraint::Length(8)])
            .header(Row::new(["Name", "Guess"]).style(style::SELECTED))
            .block(BlockWidget::bordered().title("Guess R-squared!"));
        frame.render_widget(table, table_area);
        frame.render_widget(summary_panel(self.summary.as_ref()), summary_area);

        let name = TextField::new(&self.name, "Your Name:").focused(self.focus == Field::Name);
        let guess =
            TextField::new(&self.guess, "Your guess:").focused(self.focus == Field::Guess);
        frame.render_widget(name, name_area);
        frame.render_widget(guess, guess_area);

        let status = match &self.status {
            Status::Info(text) => Line::styled(text.as_str(), style::HELP),
            Status::Error(text) => Line::styled(text.as_str(), style::FAILURE),
        };
        frame.render_widget(status.centered(), status_area);
        frame.render_widget(KeyBindingDisplay::new(Action::bindings()), help_area);
    }
}

fn summary_panel(summary: Option<&RoundSummary>) -> Paragraph<'static> {
    let block = BlockWidget::bordered().title("Result");
    let Some(summary) = summary else {
        let hint = Line::styled(" Press Ctrl-w when everyone has guessed", style::HELP);
        return Paragraph::new(hint).block(block);
    };
    let winner = match &summary.winner {
        Some(guess) => Line::styled(
            format!(" The winner is: {}, with a guess of {}!", guess.name, guess.value),
            style::SUCCESS,
        ),
        None => Line::styled(" Nobody guessed this round", style::HELP),
    };
    let heading = Style::new().add_modifier(Modifier::BOLD);
    Paragraph::new(vec![
        winner,
        Line::styled(format!(" Value of R-squared {:.2}", summary.fit.r2), heading),
        Line::styled(" Fitted parameters:", heading),
        Line::raw(format!("  - Slope: {:.2}", summary.fit.slope)),
        Line::raw(format!("  - Intercept: {:.2}", summary.fit.intercept)),
        Line::styled(" Actual parameters:", heading),
        Line::raw(format!("  - Slope: {:.2}", summary.true_slope)),
        Line::raw(format!("  - Intercept: {:.2}", summary.true_intercept)),
    ])
    .block(block)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::play::screens::test_util::{config, ctrl, key, type_str};

    fn screen() -> RSquaredScreen {
        RSquaredScreen::new(config().regression_game())
    }

    fn enter_guess(screen: &mut RSquaredScreen, name: &str, value: &str) {
        for event in type_str(name) {
            screen.handle_event(&event);
        }
        screen.handle_event(&key(KeyCode::Tab));
        for event in type_str(value) {
            screen.handle_event(&event);
        }
        screen.handle_event(&key(KeyCode::Enter));
    }

    #[test]
    fn test_winner_requires_data() {
        let mut screen = screen();
        screen.handle_event(&ctrl('w'));
        assert!(screen.summary.is_none());
        assert!(matches!(screen.status, Status::Error(_)));
    }

    #[test]
    fn test_full_round() {
        let mut screen = screen();
        screen.handle_event(&ctrl('g'));
        assert!(screen.game.trial().is_some());

        enter_guess(&mut screen, "Ada", "0.25");
        enter_guess(&mut screen, "Bob", "0.75");
        assert_eq!(screen.game.score_board().len(), 2);
        assert_eq!(screen.focus, Field::Name);
        assert_eq!(screen.name.value(), "");

        screen.handle_event(&ctrl('w'));
        let summary = screen.summary.as_ref().unwrap();
        let winner = summary.winner.as_ref().unwrap();
        let r2 = summary.fit.r2;
        let expected = if (0.25 - r2).abs() <= (0.75 - r2).abs() {
            "Ada"
        } else {
            "Bob"
        };
        assert_eq!(winner.name, expected);
    }

    #[test]
    fn test_invalid_guesses_are_reported() {
        let mut screen = screen();
        enter_guess(&mut screen, "Ada", "lots");
        assert!(matches!(screen.status, Status::Error(_)));
        assert_eq!(screen.focus, Field::Guess);
        assert!(screen.game.score_board().is_empty());

        screen.guess.clear();
        for event in type_str("1.5") {
            screen.handle_event(&event);
        }
        screen.handle_event(&key(KeyCode::Enter));
        assert!(matches!(screen.status, Status::Error(_)));
        assert!(screen.game.score_board().is_empty());
    }

    #[test]
    fn test_generating_clears_guesses() {
        let mut screen = screen();
        screen.handle_event(&ctrl('g'));
        enter_guess(&mut screen, "Ada", "0.5");
        screen.handle_event(&ctrl('g'));
        assert!(screen.game.score_board().is_empty());
    }

    #[test]
    fn test_clear_guesses() {
        let mut screen = screen();
        enter_guess(&mut screen, "Ada", "0.5");
        assert_eq!(screen.game.score_board().len(), 1);
        screen.handle_event(&ctrl('x'));
        assert!(screen.game.score_board().is_empty());
    }
}
