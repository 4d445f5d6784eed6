use std::io;

use crossterm::event;

use crate::event::TuiEvent;

/// Event loop state.
///
/// Every terminal event marks the screen dirty; the next call to
/// [`EventLoop::next`] then yields a render before blocking on input again.
#[derive(Debug)]
pub(super) struct EventLoop {
    dirty: bool,
}

impl Default for EventLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl EventLoop {
    pub fn new() -> Self {
        // Initial render is required on startup
        Self { dirty: true }
    }

    /// Returns the next event, blocking until terminal input arrives when
    /// nothing needs to be redrawn.
    pub(super) fn next(&mut self) -> io::Result<TuiEvent> {
        self.next_with(event::read)
    }

    fn next_with<F>(&mut self, read: F) -> io::Result<TuiEvent>
    where
        F: FnOnce() -> io::Result<event::Event>,
    {
        if self.dirty {
            self.dirty = false;
            return Ok(TuiEvent::Render);
        }
        let event = read()?;
        self.dirty = true;
        Ok(event.into())
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};

    use super::*;

    fn key() -> io::Result<Event> {
        Ok(Event::Key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE)))
    }

    #[test]
    fn test_first_event_is_render() {
        let mut events = EventLoop::new();
        assert!(events.next_with(key).unwrap().is_render());
    }

    #[test]
    fn test_input_is_followed_by_render() {
        let mut events = EventLoop::new();
        events.next_with(key).unwrap();
        assert!(events.next_with(key).unwrap().is_crossterm());
        assert!(events.next_with(key).unwrap().is_render());
        assert!(events.next_with(key).unwrap().is_crossterm());
    }

    #[test]
    fn test_read_error_is_propagated() {
        let mut events = EventLoop::new();
        events.next_with(key).unwrap();
        let result = events.next_with(|| Err(io::Error::other("closed")));
        assert!(result.is_err());
    }
}
