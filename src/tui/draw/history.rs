//! Chat history: message blocks, typing indicator, and scrollbar.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, Wrap};

use crate::core::chat_log::{Message, MessageState, Role};

use super::super::app::App;
use super::super::constants::{
    ACCENT, ACCENT_SECONDARY, REVEAL_CURSOR, TYPING_DOTS, WELCOME_TEXT,
};
use super::super::text::wrap_message;

/// Leading text of the failure messages shown in place of an answer.
const ERROR_PREFIXES: &[&str] = &[
    "Network error.",
    "Server error:",
    "Something went wrong.",
    "Request cancelled.",
];

fn is_error_text(text: &str) -> bool {
    ERROR_PREFIXES.iter().any(|p| text.starts_with(p))
}

/// Repeat a character to fill width (approximate; chars may have different display widths).
fn repeat_char(c: char, n: usize) -> String {
    std::iter::repeat_n(c, n).collect()
}

/// Parameters for rendering a message block.
struct MessageBlockParams<'a> {
    message: &'a Message,
    content_width: usize,
    wrap_width: usize,
    show_timestamp: bool,
    /// Animation phase in milliseconds (typing indicator).
    phase_ms: u128,
}

/// Add a message block with borders and separator.
fn add_message_block(lines: &mut Vec<Line<'static>>, p: MessageBlockParams<'_>) {
    let is_user = p.message.role == Role::User;
    let border_style = Style::default().fg(if is_user {
        Color::DarkGray
    } else {
        ACCENT_SECONDARY
    });
    let label = if is_user { "You" } else { "EQx" };

    // Top border: "┌─ Label ───...──┐" or "┌─ Label 14:32 ───...──┐"
    let top_label = if p.show_timestamp {
        format!("┌─ {} {} ", label, p.message.created_at.format("%H:%M"))
    } else {
        format!("┌─ {} ", label)
    };
    let top_trail_len = p.wrap_width.saturating_sub(top_label.chars().count() + 1);
    lines.push(Line::from(Span::styled(
        format!("{}{}┐", top_label, repeat_char('─', top_trail_len)),
        border_style,
    )));

    match p.message.state {
        MessageState::Pending => {
            let frame = (p.phase_ms / 150) as usize % TYPING_DOTS.len();
            lines.push(Line::from(vec![
                Span::styled("│ ", border_style),
                Span::styled(
                    format!("  {}", TYPING_DOTS[frame]),
                    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
                ),
            ]));
        }
        MessageState::Revealing | MessageState::Done => {
            let text_style = if !is_user && is_error_text(&p.message.text) {
                Style::default().fg(Color::Red)
            } else {
                Style::default()
            };
            let mut body = wrap_message(&p.message.text, p.content_width);
            if p.message.state == MessageState::Revealing {
                match body.last_mut() {
                    Some(last) if last.chars().count() < p.content_width => {
                        last.push_str(REVEAL_CURSOR)
                    }
                    _ => body.push(REVEAL_CURSOR.to_string()),
                }
            }
            for chunk in body {
                lines.push(Line::from(vec![
                    Span::styled("│ ", border_style),
                    Span::raw("  "),
                    Span::styled(chunk, text_style),
                ]));
            }
        }
    }

    let bottom_line = format!("└{}┘", repeat_char('─', p.wrap_width.saturating_sub(2)));
    lines.push(Line::from(Span::styled(bottom_line, border_style)));
    lines.push(Line::from(""));
}

/// Build every history line for the current log.
fn history_lines(app: &App, wrap_width: usize) -> Vec<Line<'static>> {
    let content_width = wrap_width.saturating_sub(5).max(1);
    let phase_ms = app.started_at.elapsed().as_millis();
    let mut lines = Vec::new();
    for message in app.log.messages() {
        add_message_block(
            &mut lines,
            MessageBlockParams {
                message,
                content_width,
                wrap_width,
                show_timestamp: app.show_timestamps,
                phase_ms,
            },
        );
    }
    lines
}

pub(crate) fn draw_welcome(f: &mut Frame, area: Rect) {
    let top_pad = area.height.saturating_sub(1) / 2;
    let mut lines: Vec<Line> = (0..top_pad).map(|_| Line::from("")).collect();
    lines.push(Line::from(Span::styled(
        WELCOME_TEXT,
        Style::default().fg(ACCENT_SECONDARY),
    )));
    f.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        area,
    );
}

pub(crate) fn draw_history(f: &mut Frame, app: &mut App, history_area: Rect) {
    let history_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(history_area);
    let text_area = history_chunks[0];
    let scrollbar_area = history_chunks[1];

    let lines = history_lines(app, text_area.width as usize);

    let total_lines = lines.len();
    let visible = text_area.height as usize;
    let max_scroll = total_lines.saturating_sub(visible.max(1));
    app.last_max_scroll = max_scroll;
    let scroll_pos = app.scroll_line().min(max_scroll);
    let visible_lines: Vec<Line> = lines.into_iter().skip(scroll_pos).take(visible).collect();

    f.render_widget(Paragraph::new(visible_lines), text_area);

    let mut scrollbar_state = ScrollbarState::default()
        .position(scroll_pos)
        .content_length(max_scroll + 1);
    let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
        .thumb_symbol("█")
        .thumb_style(Style::default().fg(ACCENT_SECONDARY))
        .track_symbol(Some("│"));
    f.render_stateful_widget(scrollbar, scrollbar_area, &mut scrollbar_state);
}
