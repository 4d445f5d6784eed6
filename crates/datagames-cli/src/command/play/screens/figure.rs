use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use datagames_engine::reveal::{RevealPhase, RevealStateMachine, RevealStep};
use datagames_tui::{Screen, ScreenTransition};
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
    style::Style,
    text::{Line, Span},
    widgets::{Block as BlockWidget, Paragraph},
};

use crate::ui::widgets::{FigureChart, KeyBinding, KeyBindingDisplay, style};

const PROMPT: &str = "Given the information available can you guess what the figure is showing?";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Action {
    PrevFigure,
    NextFigure,
    Reveal,
    Reset,
    Back,
    Exit,
}

impl Action {
    fn from_key_event(event: &KeyEvent) -> Option<Self> {
        match event.code {
            KeyCode::Char('c') if event.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Self::Exit)
            }
            KeyCode::Char('h') | KeyCode::Left => Some(Self::PrevFigure),
            KeyCode::Char('l') | KeyCode::Right => Some(Self::NextFigure),
            KeyCode::Char(' ') | KeyCode::Enter => Some(Self::Reveal),
            KeyCode::Char('r') => Some(Self::Reset),
            KeyCode::Char('q') | KeyCode::Esc => Some(Self::Back),
            _ => None,
        }
    }

    fn bindings() -> &'static [KeyBinding<'static>] {
        &[
            (&["h", "←"], "Prev figure"),
            (&["l", "→"], "Next figure"),
            (&["Space"], "Reveal property"),
            (&["r"], "Reset state"),
            (&["q", "Esc"], "Back"),
        ]
    }
}

/// "Guess the figure": reveal a chart's properties one at a time.
#[derive(Debug)]
pub struct FigureScreen {
    machine: RevealStateMachine,
    choice: usize,
    message: Option<String>,
}

impl FigureScreen {
    pub fn new(machine: RevealStateMachine) -> Self {
        Self {
            machine,
            choice: 0,
            message: None,
        }
    }

    fn choose(&mut self, offset: usize) {
        let len = self.machine.figures().len();
        if len == 0 {
            return;
        }
        self.choice = (self.choice + offset) % len;
        self.message = match self.machine.select_figure(self.choice) {
            Ok(()) => None,
            Err(err) => Some(err.to_string()),
        };
    }

    fn reveal(&mut self) {
        let reveal = self.machine.reveal_next();
        self.message = match reveal.step {
            Some(step) => Some(format!("Revealed the {step}")),
            None if reveal.exhausted => Some("No more properties to display".to_owned()),
            None => None,
        };
    }
}

impl Screen for FigureScreen {
    fn on_close(&mut self) {
        tracing::debug!(phase = ?self.machine.phase(), "closing figure game");
    }

    fn handle_event(&mut self, event: &Event) -> ScreenTransition {
        if let Some(event) = event.as_key_event()
            && let Some(action) = Action::from_key_event(&event)
        {
            let len = self.machine.figures().len();
            match action {
                Action::PrevFigure => self.choose(len.saturating_sub(1)),
                Action::NextFigure => self.choose(1),
                Action::Reveal => self.reveal(),
                Action::Reset => {
                    self.machine.reset();
                    self.message = None;
                }
                Action::Back => return ScreenTransition::Pop,
                Action::Exit => return ScreenTransition::Exit,
            }
        }
        ScreenTransition::Stay
    }

    fn draw(&self, frame: &mut Frame) {
        let [selector_area, chart_area, progress_area, message_area, help_area] =
            Layout::vertical([
                Constraint::Length(3),
                Constraint::Fill(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .areas(frame.area());

        let mut radio = vec![];
        for index in 0..self.machine.figures().len() {
            let (mark, style) = if index == self.choice {
                ("(•)", style::SELECTED)
            } else {
                ("( )", Style::new())
            };
            radio.push(Span::styled(format!(" {mark} {index} "), style));
        }
        let selector = Paragraph::new(Line::from(radio).centered()).block(
            BlockWidget::bordered()
                .title("Guess the Figure!")
                .title_bottom(PROMPT),
        );

        let revealed = self.machine.state().applied();
        let progress = match self.machine.phase() {
            RevealPhase::Unselected => "Nothing revealed yet".to_owned(),
            RevealPhase::Revealing { cursor } => {
                format!("{cursor}/{} properties revealed", RevealStep::ORDER.len())
            }
            RevealPhase::Exhausted => "Every property revealed".to_owned(),
        };
        let progress = if revealed.is_empty() {
            progress
        } else {
            let names = revealed
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ");
            format!("{progress}: {names}")
        };

        frame.render_widget(selector, selector_area);
        frame.render_widget(FigureChart::new(self.machine.state()), chart_area);
        frame.render_widget(Line::styled(progress, style::HELP).centered(), progress_area);
        if let Some(message) = &self.message {
            frame.render_widget(Line::raw(message.as_str()).centered(), message_area);
        }
        frame.render_widget(KeyBindingDisplay::new(Action::bindings()), help_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::play::screens::test_util::{config, key};

    fn screen() -> FigureScreen {
        FigureScreen::new(config().reveal_machine())
    }

    #[test]
    fn test_reveal_all_then_exhausted() {
        let mut screen = screen();
        for step in RevealStep::ORDER {
            screen.handle_event(&key(KeyCode::Char(' ')));
            assert!(screen.machine.state().is_applied(step));
        }
        assert!(screen.machine.phase().is_exhausted());

        let before = screen.machine.state().clone();
        screen.handle_event(&key(KeyCode::Char(' ')));
        assert_eq!(screen.machine.state(), &before);
        assert_eq!(
            screen.message.as_deref(),
            Some("No more properties to display")
        );
    }

    #[test]
    fn test_choosing_figure_restarts_reveal() {
        let mut screen = screen();
        screen.handle_event(&key(KeyCode::Enter));
        screen.handle_event(&key(KeyCode::Right));
        assert_eq!(screen.choice, 1);
        assert_eq!(screen.machine.selected(), Some(1));
        assert!(screen.machine.state().is_empty());

        screen.handle_event(&key(KeyCode::Enter));
        let trace = screen.machine.state().trace.as_ref().unwrap();
        assert_eq!(trace, &screen.machine.figures()[1].trace);
    }

    #[test]
    fn test_choice_wraps_backwards() {
        let mut screen = screen();
        screen.handle_event(&key(KeyCode::Left));
        assert_eq!(screen.choice, screen.machine.figures().len() - 1);
    }

    #[test]
    fn test_reset_empties_figure() {
        let mut screen = screen();
        screen.handle_event(&key(KeyCode::Right));
        screen.handle_event(&key(KeyCode::Enter));
        screen.handle_event(&key(KeyCode::Char('r')));
        assert!(screen.machine.state().is_empty());
        assert!(screen.machine.phase().is_unselected());

        screen.handle_event(&key(KeyCode::Enter));
        assert_eq!(screen.machine.selected(), Some(1));
    }
}
