use std::fmt;

use crossterm::event::{Event, KeyEventKind};
use ratatui::Frame;

use crate::App;

/// Individual screen in the application.
///
/// # Lifecycle
///
/// ```text
/// Create
///   ↓
/// on_active() ←──────────┐
///   ↓                     │ Child screen pops
/// (Foreground) ─ Push ─▶ (Background)
///   ↓
/// on_close()  ← Pop or Exit
///   ↓
/// Drop
/// ```
///
/// ```rust
/// use crossterm::event::Event;
/// use datagames_tui::{Screen, ScreenTransition};
/// use ratatui::Frame;
///
/// #[derive(Debug)]
/// struct MyScreen {}
///
/// impl Screen for MyScreen {
///     fn handle_event(&mut self, _event: &Event) -> ScreenTransition {
///         ScreenTransition::Pop
///     }
///     fn draw(&self, _frame: &mut Frame) {}
/// }
/// ```
pub trait Screen: fmt::Debug {
    /// Called when this screen becomes the foreground screen.
    ///
    /// This is called on start-up for the initial screen, when this screen
    /// is pushed, and when a child screen pops back to it.
    fn on_active(&mut self) {}

    /// Called when this screen is removed from the stack (Pop or Exit).
    ///
    /// Not called when another screen is pushed on top.
    fn on_close(&mut self) {}

    /// Handles terminal events and returns transition.
    ///
    /// [`ScreenStack`] forwards only key presses, never releases or repeats.
    fn handle_event(&mut self, event: &Event) -> ScreenTransition;

    /// Renders the screen.
    fn draw(&self, frame: &mut Frame);
}

/// Screen transition result from event handling.
#[derive(Debug)]
pub enum ScreenTransition {
    /// Stay in the current screen.
    Stay,

    /// Push a new screen on top of the current one.
    Push(Box<dyn Screen>),

    /// Pop the current screen and return to the previous one.
    Pop,

    /// Exit the application.
    Exit,
}

/// Screen stack manager that implements App.
#[derive(Debug)]
pub struct ScreenStack {
    screens: Vec<Box<dyn Screen>>,
    should_exit: bool,
}

impl ScreenStack {
    /// Creates a new screen stack with an initial screen.
    #[must_use]
    pub fn new(initial: Box<dyn Screen>) -> Self {
        Self {
            screens: vec![initial],
            should_exit: false,
        }
    }

    fn apply_transition(&mut self, transition: ScreenTransition) {
        match transition {
            ScreenTransition::Stay => {}

            ScreenTransition::Push(mut new_screen) => {
                new_screen.on_active();
                self.screens.push(new_screen);
            }

            ScreenTransition::Pop => {
                if let Some(mut old_screen) = self.screens.pop() {
                    old_screen.on_close();
                }
                if let Some(prev_screen) = self.screens.last_mut() {
                    prev_screen.on_active();
                }
            }

            ScreenTransition::Exit => {
                while let Some(mut screen) = self.screens.pop() {
                    screen.on_close();
                }
                self.should_exit = true;
            }
        }
    }
}

impl App for ScreenStack {
    fn init(&mut self) {
        if let Some(screen) = self.screens.last_mut() {
            screen.on_active();
        }
    }

    fn should_exit(&self) -> bool {
        self.should_exit || self.screens.is_empty()
    }

    fn handle_event(&mut self, event: Event) {
        // terminals with keyboard enhancement also report releases
        if let Event::Key(key_event) = &event
            && key_event.kind != KeyEventKind::Press
        {
            return;
        }
        if let Some(current) = self.screens.last_mut() {
            let transition = current.handle_event(&event);
            self.apply_transition(transition);
        }
    }

    fn draw(&self, frame: &mut Frame) {
        if let Some(current) = self.screens.last() {
            current.draw(frame);
        }
    }
}
