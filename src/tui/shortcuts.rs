//! Centralized keyboard shortcuts.
//!
//! | Action        | Keys                       |
//! |---------------|----------------------------|
//! | Send          | Enter                      |
//! | Newline       | Shift+Enter, Alt+Enter     |
//! | Scroll        | ↑ ↓ PageUp PageDown        |
//! | Cancel        | Esc (while waiting)        |
//! | Clear         | Ctrl+L                     |
//! | Quit          | Ctrl+C                     |

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Detected shortcut.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    /// Abort the in-flight request (Esc)
    Cancel,
    /// Clear the conversation (Ctrl+L)
    Clear,
    /// Quit (Ctrl+C)
    Quit,
}

impl Shortcut {
    /// Returns the shortcut if the key matches.
    pub fn match_key(key: &KeyEvent) -> Option<Shortcut> {
        if key.kind != KeyEventKind::Press {
            return None;
        }
        match (key.code, key.modifiers) {
            (KeyCode::Esc, _) => Some(Shortcut::Cancel),
            (KeyCode::Char('c'), m) if m.contains(KeyModifiers::CONTROL) => Some(Shortcut::Quit),
            (KeyCode::Char('l'), m) if m.contains(KeyModifiers::CONTROL) => Some(Shortcut::Clear),
            _ => None,
        }
    }
}

/// Labels for the bottom bar.
pub mod labels {
    use ratatui::style::{Color, Style};
    use ratatui::text::{Line, Span};

    fn hint(key: &'static str, action: &'static str) -> [Span<'static>; 2] {
        [
            Span::styled(key, Style::default().fg(Color::Gray)),
            Span::styled(format!(" {}  ", action), Style::default().fg(Color::DarkGray)),
        ]
    }

    /// Shortcuts shown on the bottom bar. `loading` swaps send for cancel.
    pub fn bottom_bar(loading: bool) -> Line<'static> {
        let mut spans = Vec::new();
        if loading {
            spans.extend(hint("Esc", "cancel"));
        } else {
            spans.extend(hint("Enter", "send"));
            spans.extend(hint("Shift+Enter", "newline"));
            spans.extend(hint("Ctrl+L", "clear"));
        }
        spans.extend(hint("Ctrl+C", "quit"));
        Line::from(spans)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::text::Line;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn ctrl_c_quits() {
        assert_eq!(
            Shortcut::match_key(&key(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Shortcut::Quit)
        );
    }

    #[test]
    fn esc_cancels() {
        assert_eq!(
            Shortcut::match_key(&key(KeyCode::Esc, KeyModifiers::NONE)),
            Some(Shortcut::Cancel)
        );
    }

    #[test]
    fn plain_letters_are_not_shortcuts() {
        assert_eq!(
            Shortcut::match_key(&key(KeyCode::Char('l'), KeyModifiers::NONE)),
            None
        );
    }

    #[test]
    fn bottom_bar_mentions_cancel_only_while_loading() {
        let text = |l: Line<'static>| {
            l.spans
                .iter()
                .map(|s| s.content.to_string())
                .collect::<String>()
        };
        assert!(text(labels::bottom_bar(true)).contains("cancel"));
        assert!(!text(labels::bottom_bar(false)).contains("cancel"));
    }
}
