use crossterm::event::{Event, KeyCode, KeyEvent};
use datagames_tui::{Screen, ScreenTransition};
use ratatui::{
    Frame,
    layout::{Constraint, HorizontalAlignment, Layout},
    text::{Line, Text},
    widgets::{Block as BlockWidget, List, ListItem, ListState, Padding, Paragraph, Wrap},
};

use super::{DistributionScreen, FigureScreen, RSquaredScreen};
use crate::{
    command::play::GameConfig,
    ui::widgets::{KeyBinding, KeyBindingDisplay, style},
};

/// The games offered on the front page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Game {
    Distribution,
    RSquared,
    Figure,
}

impl Game {
    const ALL: [Self; 3] = [Self::Distribution, Self::RSquared, Self::Figure];

    fn title(self) -> &'static str {
        match self {
            Self::Distribution => "Guess the Distribution",
            Self::RSquared => "Guess R-squared",
            Self::Figure => "Guess the Figure",
        }
    }

    fn description(self) -> &'static str {
        match self {
            Self::Distribution => {
                "Can you guess which distribution the samples shown are drawn from?"
            }
            Self::RSquared => {
                "What is the R-squared value of the straight line fitted to the datapoints?"
            }
            Self::Figure => "Properties of a chart are revealed one by one. What does it show?",
        }
    }

    /// Creates a fresh screen for this game.
    pub fn open(self, config: &GameConfig) -> Box<dyn Screen> {
        tracing::info!(game = self.title(), "opening game");
        match self {
            Self::Distribution => Box::new(DistributionScreen::new(config.distribution_engine())),
            Self::RSquared => Box::new(RSquaredScreen::new(config.regression_game())),
            Self::Figure => Box::new(FigureScreen::new(config.reveal_machine())),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Action {
    Prev,
    Next,
    Open,
    Quit,
}

impl Action {
    fn from_key_event(event: &KeyEvent) -> Option<Self> {
        match event.code {
            KeyCode::Char('k') | KeyCode::Up => Some(Self::Prev),
            KeyCode::Char('j') | KeyCode::Down => Some(Self::Next),
            KeyCode::Enter => Some(Self::Open),
            KeyCode::Char('q') | KeyCode::Esc => Some(Self::Quit),
            _ => None,
        }
    }

    fn bindings() -> &'static [KeyBinding<'static>] {
        &[
            (&["k", "↑"], "Prev"),
            (&["j", "↓"], "Next"),
            (&["Enter"], "Play"),
            (&["q", "Esc"], "Quit"),
        ]
    }
}

/// Game picker shown at start-up.
#[derive(Debug)]
pub struct FrontPageScreen {
    config: GameConfig,
    selected: usize,
}

impl FrontPageScreen {
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            selected: 0,
        }
    }
}

impl Screen for FrontPageScreen {
    fn on_active(&mut self) {
        tracing::debug!(selected = Game::ALL[self.selected].title(), "showing front page");
    }

    fn handle_event(&mut self, event: &Event) -> ScreenTransition {
        if let Some(event) = event.as_key_event()
            && let Some(action) = Action::from_key_event(&event)
        {
            let len = Game::ALL.len();
            match action {
                Action::Prev => self.selected = (self.selected + len - 1) % len,
                Action::Next => self.selected = (self.selected + 1) % len,
                Action::Open => {
                    return ScreenTransition::Push(Game::ALL[self.selected].open(&self.config));
                }
                Action::Quit => return ScreenTransition::Exit,
            }
        }
        ScreenTransition::Stay
    }

    fn draw(&self, frame: &mut Frame) {
        let viewport = frame
            .area()
            .centered(Constraint::Max(90), Constraint::Max(20));
        let [intro_area, list_area, help_area] = Layout::vertical([
            Constraint::Length(4),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .areas(viewport);

        let intro = Paragraph::new(vec![
            Line::from("To get started, pick the game you want to play. Your options are:"),
            Line::from("Have fun!").style(style::HELP),
        ])
        .wrap(Wrap { trim: true })
        .block(
            BlockWidget::bordered()
                .title("Datagames!")
                .title_alignment(HorizontalAlignment::Center)
                .padding(Padding::horizontal(1)),
        );

        let items = Game::ALL
            .iter()
            .map(|game| {
                ListItem::new(Text::from(vec![
                    Line::from(game.title()),
                    Line::from(format!("  {}", game.description())).style(style::HELP),
                ]))
            })
            .collect::<Vec<_>>();
        let list = List::new(items)
            .block(BlockWidget::bordered().title("Games"))
            .highlight_style(style::SELECTED)
            .highlight_symbol(">> ");
        let mut list_state = ListState::default();
        list_state.select(Some(self.selected));

        frame.render_widget(intro, intro_area);
        frame.render_stateful_widget(list, list_area, &mut list_state);
        frame.render_widget(KeyBindingDisplay::new(Action::bindings()), help_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::play::screens::test_util::{config, key};

    #[test]
    fn test_selection_wraps_around() {
        let mut screen = FrontPageScreen::new(config());
        screen.handle_event(&key(KeyCode::Up));
        assert_eq!(screen.selected, Game::ALL.len() - 1);
        screen.handle_event(&key(KeyCode::Down));
        assert_eq!(screen.selected, 0);
    }

    #[test]
    fn test_enter_pushes_selected_game() {
        let mut screen = FrontPageScreen::new(config());
        screen.handle_event(&key(KeyCode::Down));
        match screen.handle_event(&key(KeyCode::Enter)) {
            ScreenTransition::Push(game) => {
                assert!(format!("{game:?}").starts_with("RSquaredScreen"));
            }
            other => panic!("expected a pushed screen, got {other:?}"),
        }
    }

    #[test]
    fn test_quit_exits() {
        let mut screen = FrontPageScreen::new(config());
        assert!(matches!(
            screen.handle_event(&key(KeyCode::Char('q'))),
            ScreenTransition::Exit
        ));
    }
}
