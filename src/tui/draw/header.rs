//! Header: logo, title, endpoint mode.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::core::app::DISPLAY_TITLE;

use super::super::app::App;
use super::super::constants::{LOGO_IDLE, LOGO_THINKING};

/// Width for the endpoint label on the right.
const ENDPOINT_HEADER_WIDTH: u16 = 16;

/// Spinner while waiting or revealing, diamond otherwise.
fn logo_symbol(app: &App) -> &'static str {
    if app.is_loading() || app.is_revealing() {
        let phase = app.started_at.elapsed().as_millis() as usize;
        LOGO_THINKING[(phase / 80) % LOGO_THINKING.len()]
    } else {
        LOGO_IDLE
    }
}

pub(crate) fn draw_header(f: &mut Frame, app: &App, area: Rect, accent: Color) {
    let header_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(4),
            Constraint::Min(0),
            Constraint::Length(ENDPOINT_HEADER_WIDTH),
        ])
        .split(area);

    let logo_line = Line::from(Span::styled(
        format!("{} ", logo_symbol(app)),
        Style::default().fg(accent),
    ));
    f.render_widget(Paragraph::new(logo_line), header_chunks[0]);

    let title = Line::from(Span::styled(
        DISPLAY_TITLE,
        Style::default().fg(accent).add_modifier(Modifier::BOLD),
    ));
    f.render_widget(
        Paragraph::new(title).alignment(Alignment::Center),
        header_chunks[1],
    );

    let endpoint_line = Line::from(Span::styled(
        format!("{} ", app.endpoint_mode),
        Style::default().fg(Color::DarkGray),
    ));
    f.render_widget(
        Paragraph::new(endpoint_line).alignment(Alignment::Right),
        header_chunks[2],
    );
}
