//! TUI constants: colors, timing, and fixed texts.

use ratatui::style::Color;

/// Accent green color (#98FB98).
pub(super) const ACCENT: Color = Color::Rgb(152, 251, 152);

/// Secondary accent, soft cyan (#7EC8E3).
pub(super) const ACCENT_SECONDARY: Color = Color::Rgb(126, 200, 227);

/// Event poll timeout in milliseconds (main loop, when nothing is animating).
pub(crate) const EVENT_POLL_TIMEOUT_MS: u64 = 100;

/// Scroll amount for arrow keys and mouse wheel.
pub(crate) const SCROLL_LINES_SMALL: usize = 3;

/// Scroll amount for PageUp/PageDown.
pub(crate) const SCROLL_LINES_PAGE: usize = 10;

/// Input textarea height including block borders.
pub(crate) const INPUT_LINES: u16 = 5;

/// Minimalist logo when idle (single character).
pub(super) const LOGO_IDLE: &str = "◆";

/// Spinner frames for "thinking" animation (braille pattern, 4 frames).
pub(super) const LOGO_THINKING: &[&str] = &["⠋", "⠙", "⠹", "⠸"];

/// Typing indicator frames for a pending answer.
pub(super) const TYPING_DOTS: &[&str] = &["·  ", "·· ", "···", " ··", "  ·", "   "];

/// Cursor glyph drawn after a message that is still being revealed.
pub(super) const REVEAL_CURSOR: &str = "▌";

pub(super) const WELCOME_TEXT: &str = "Welcome! Ask me anything about Elite Quality Index.";

pub(super) const INPUT_PLACEHOLDER: &str = "Ask me about Elite Quality Index...";

pub(super) const LOADING_PLACEHOLDER: &str = "Waiting for the answer... (Esc to cancel)";
