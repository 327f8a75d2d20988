//! Input block and bottom bar.

use ratatui::Frame;
use ratatui::layout::{Alignment, Position, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use super::super::app::App;
use super::super::constants::{ACCENT, INPUT_PLACEHOLDER, LOADING_PLACEHOLDER};
use super::super::shortcuts;

/// Hard-wrap `input` to `width` columns and locate the cursor (row, col).
///
/// Newlines start a new row; long rows break at exactly `width` chars so cursor math stays exact.
fn layout_input(input: &str, cursor: usize, width: usize) -> (Vec<String>, (usize, usize)) {
    let width = width.max(1);
    let mut rows = vec![String::new()];
    let mut col = 0;
    let mut cursor_pos = (0, 0);
    for (idx, c) in input.char_indices() {
        if idx == cursor {
            cursor_pos = (rows.len() - 1, col);
        }
        if c == '\n' {
            rows.push(String::new());
            col = 0;
            continue;
        }
        if col == width {
            rows.push(String::new());
            col = 0;
            if idx == cursor {
                cursor_pos = (rows.len() - 1, 0);
            }
        }
        if let Some(row) = rows.last_mut() {
            row.push(c);
        }
        col += 1;
    }
    if cursor >= input.len() {
        cursor_pos = if col == width {
            rows.push(String::new());
            (rows.len() - 1, 0)
        } else {
            (rows.len() - 1, col)
        };
    }
    (rows, cursor_pos)
}

pub(crate) fn draw_input_block(f: &mut Frame, app: &App, input_area: Rect) {
    let loading = app.is_loading();
    let border_style = if loading {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(ACCENT)
    };
    let input_block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style);
    let inner = input_block.inner(input_area);

    if app.input.is_empty() {
        let placeholder = if loading {
            LOADING_PLACEHOLDER
        } else {
            INPUT_PLACEHOLDER
        };
        let para = Paragraph::new(Line::from(Span::styled(
            placeholder,
            Style::default().fg(Color::DarkGray),
        )))
        .block(input_block);
        f.render_widget(para, input_area);
        if !loading {
            f.set_cursor_position(Position::new(inner.x, inner.y));
        }
        return;
    }

    let (rows, (cursor_row, cursor_col)) =
        layout_input(&app.input, app.input_cursor, inner.width as usize);
    let inner_height = (inner.height as usize).max(1);
    let scroll_y = cursor_row.saturating_sub(inner_height - 1);
    let text_style = if loading {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(Color::White)
    };
    let lines: Vec<Line> = rows
        .into_iter()
        .skip(scroll_y)
        .take(inner_height)
        .map(|r| Line::from(Span::styled(r, text_style)))
        .collect();
    f.render_widget(Paragraph::new(lines).block(input_block), input_area);

    if !loading {
        let cx = inner.x + (cursor_col as u16).min(inner.width.saturating_sub(1));
        let cy = inner.y + (cursor_row - scroll_y) as u16;
        f.set_cursor_position(Position::new(cx, cy));
    }
}

/// Draw the bottom bar with keyboard shortcuts.
pub(crate) fn draw_bottom_bar(f: &mut Frame, app: &App, area: Rect) {
    let shortcuts = shortcuts::labels::bottom_bar(app.is_loading());
    f.render_widget(Paragraph::new(shortcuts).alignment(Alignment::Right), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_at_end_of_single_row() {
        let (rows, cursor) = layout_input("hello", 5, 10);
        assert_eq!(rows, vec!["hello"]);
        assert_eq!(cursor, (0, 5));
    }

    #[test]
    fn long_input_breaks_at_width() {
        let (rows, cursor) = layout_input("abcdef", 2, 4);
        assert_eq!(rows, vec!["abcd", "ef"]);
        assert_eq!(cursor, (0, 2));
    }

    #[test]
    fn cursor_after_full_row_moves_to_next_row() {
        let (rows, cursor) = layout_input("abcd", 4, 4);
        assert_eq!(rows, vec!["abcd", ""]);
        assert_eq!(cursor, (1, 0));
    }

    #[test]
    fn newline_starts_a_row() {
        let (rows, cursor) = layout_input("ab\ncd", 4, 10);
        assert_eq!(rows, vec!["ab", "cd"]);
        assert_eq!(cursor, (1, 1));
    }

    #[test]
    fn multibyte_chars_count_as_one_column() {
        let input = "héé";
        let (rows, cursor) = layout_input(input, input.len(), 2);
        assert_eq!(rows, vec!["hé", "é"]);
        assert_eq!(cursor, (1, 1));
    }
}
