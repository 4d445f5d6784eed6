use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    prelude::{Buffer, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block as BlockWidget, Paragraph, Widget},
};

/// Editable single-line text buffer.
///
/// The cursor is a character index, so multi-byte input is edited by
/// character rather than by byte.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    value: String,
    cursor: usize,
}

impl TextInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    fn char_count(&self) -> usize {
        self.value.chars().count()
    }

    fn byte_index(&self, cursor: usize) -> usize {
        self.value
            .char_indices()
            .nth(cursor)
            .map_or(self.value.len(), |(i, _)| i)
    }

    /// Applies an editing key; returns whether the key was consumed.
    ///
    /// Keys held with Ctrl or Alt are left to the caller.
    pub fn handle_key(&mut self, event: &KeyEvent) -> bool {
        if event
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
        {
            return false;
        }
        match event.code {
            KeyCode::Char(ch) => {
                let at = self.byte_index(self.cursor);
                self.value.insert(at, ch);
                self.cursor += 1;
            }
            KeyCode::Backspace if self.cursor > 0 => {
                self.cursor -= 1;
                let at = self.byte_index(self.cursor);
                self.value.remove(at);
            }
            KeyCode::Delete if self.cursor < self.char_count() => {
                let at = self.byte_index(self.cursor);
                self.value.remove(at);
            }
            KeyCode::Left => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Right => self.cursor = usize::min(self.cursor + 1, self.char_count()),
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor = self.char_count(),
            KeyCode::Backspace | KeyCode::Delete => {}
            _ => return false,
        }
        true
    }
}

/// Bordered rendering of a [`TextInput`], with the cursor shown when focused.
#[derive(Debug)]
pub struct TextField<'a> {
    input: &'a TextInput,
    title: &'a str,
    focused: bool,
}

impl<'a> TextField<'a> {
    pub fn new(input: &'a TextInput, title: &'a str) -> Self {
        Self {
            input,
            title,
            focused: false,
        }
    }

    pub fn focused(self, focused: bool) -> Self {
        Self { focused, ..self }
    }
}

const CURSOR_STYLE: Style = Style::new().add_modifier(Modifier::REVERSED);

impl Widget for TextField<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let border_style = if self.focused {
            Style::new().fg(Color::Yellow)
        } else {
            Style::new().fg(Color::DarkGray)
        };
        let block = BlockWidget::bordered()
            .title(self.title)
            .border_style(border_style);

        let value = self.input.value();
        let line = if self.focused {
            let at = self.input.byte_index(self.input.cursor);
            let (before, rest) = value.split_at(at);
            let mut rest = rest.chars();
            let under = rest.next().map_or_else(|| " ".to_owned(), String::from);
            Line::from(vec![
                Span::raw(before),
                Span::styled(under, CURSOR_STYLE),
                Span::raw(rest.as_str()),
            ])
        } else {
            Line::raw(value)
        };

        Paragraph::new(line).block(block).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(input: &mut TextInput, code: KeyCode) -> bool {
        input.handle_key(&KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn type_str(input: &mut TextInput, text: &str) {
        for ch in text.chars() {
            press(input, KeyCode::Char(ch));
        }
    }

    #[test]
    fn test_typing_appends() {
        let mut input = TextInput::new();
        type_str(&mut input, "gamma");
        assert_eq!(input.value(), "gamma");
    }

    #[test]
    fn test_edit_in_the_middle() {
        let mut input = TextInput::new();
        type_str(&mut input, "nrmal");
        press(&mut input, KeyCode::Home);
        press(&mut input, KeyCode::Right);
        type_str(&mut input, "o");
        assert_eq!(input.value(), "normal");

        press(&mut input, KeyCode::End);
        press(&mut input, KeyCode::Backspace);
        assert_eq!(input.value(), "norma");

        press(&mut input, KeyCode::Home);
        press(&mut input, KeyCode::Delete);
        assert_eq!(input.value(), "orma");
    }

    #[test]
    fn test_multibyte_characters() {
        let mut input = TextInput::new();
        type_str(&mut input, "Ødegård");
        press(&mut input, KeyCode::Left);
        press(&mut input, KeyCode::Backspace);
        assert_eq!(input.value(), "Ødegåd");
    }

    #[test]
    fn test_boundaries_are_noops() {
        let mut input = TextInput::new();
        assert!(press(&mut input, KeyCode::Backspace));
        assert!(press(&mut input, KeyCode::Delete));
        assert!(press(&mut input, KeyCode::Left));
        assert_eq!(input, TextInput::new());
    }

    #[test]
    fn test_control_keys_are_not_consumed() {
        let mut input = TextInput::new();
        let event = KeyEvent::new(KeyCode::Char('g'), KeyModifiers::CONTROL);
        assert!(!input.handle_key(&event));
        assert!(!press(&mut input, KeyCode::Enter));
        assert_eq!(input.value(), "");
    }

    #[test]
    fn test_clear() {
        let mut input = TextInput::new();
        type_str(&mut input, "0.5");
        input.clear();
        type_str(&mut input, "1");
        assert_eq!(input.value(), "1");
    }
}
