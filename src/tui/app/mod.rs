//! TUI application state: message log, input, scroll, in-flight reveal.

use std::time::{Duration, Instant};

use crate::core::chat_log::{ChatLog, MessageId, TickOutcome};
use crate::core::config::EndpointMode;
use crate::core::dispatch::DispatchError;
use crate::core::reveal::{Reveal, RevealTicker};

/// Scroll position: either a specific line index, or "at bottom" (follow new content).
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ScrollPosition {
    Line(usize),
    Bottom,
}

impl Default for ScrollPosition {
    fn default() -> Self {
        Self::Bottom
    }
}

/// A reveal animation and the clock that drives it.
struct ActiveReveal {
    reveal: Reveal,
    ticker: RevealTicker,
}

pub struct App {
    pub(crate) log: ChatLog,
    /// User input in the text field.
    pub(crate) input: String,
    /// Cursor position in the input (byte index, always on a char boundary).
    pub(crate) input_cursor: usize,
    pub(crate) scroll: ScrollPosition,
    pub(crate) last_max_scroll: usize,
    /// Endpoint mode shown in the header.
    pub(crate) endpoint_mode: EndpointMode,
    /// Whether to show timestamps next to message labels (from EQX_CHAT_SHOW_TIMESTAMPS).
    pub(crate) show_timestamps: bool,
    /// Placeholder waiting for the in-flight request, if any.
    pub(crate) pending: Option<MessageId>,
    reveal: Option<ActiveReveal>,
    reveal_interval: Duration,
    /// Start of the UI; phase reference for spinners.
    pub(crate) started_at: Instant,
}

impl App {
    pub fn new(endpoint_mode: EndpointMode, reveal_interval: Duration, show_timestamps: bool) -> Self {
        Self {
            log: ChatLog::new(),
            input: String::new(),
            input_cursor: 0,
            scroll: ScrollPosition::default(),
            last_max_scroll: 0,
            endpoint_mode,
            show_timestamps,
            pending: None,
            reveal: None,
            reveal_interval,
            started_at: Instant::now(),
        }
    }

    /// True while a request is in flight; the send control is disabled.
    pub(crate) fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    pub(crate) fn is_revealing(&self) -> bool {
        self.reveal.is_some()
    }

    /// Submit the input: append the user message and a placeholder.
    ///
    /// Returns the placeholder id and the question to dispatch, or `None` when the
    /// input is blank or a request is already in flight (log unchanged).
    pub(crate) fn submit_input(&mut self) -> Option<(MessageId, String)> {
        if self.is_loading() {
            return None;
        }
        let question = self.input.trim().to_string();
        self.log.apply_user_message(&question)?;
        let placeholder = self.log.push_placeholder();
        self.input.clear();
        self.input_cursor = 0;
        self.pending = Some(placeholder);
        self.scroll = ScrollPosition::Bottom;
        Some((placeholder, question))
    }

    /// Feed the request outcome into the placeholder and start revealing it.
    pub(crate) fn receive_answer(
        &mut self,
        placeholder: MessageId,
        result: Result<String, DispatchError>,
        now: Instant,
    ) {
        if self.pending == Some(placeholder) {
            self.pending = None;
        }
        let text = match result {
            Ok(answer) => answer,
            Err(e) => {
                log::warn!("Request failed: {}", e);
                e.user_message()
            }
        };
        if let Some(reveal) = self.log.apply_answer(placeholder, text) {
            self.reveal = Some(ActiveReveal {
                reveal,
                ticker: RevealTicker::new(self.reveal_interval, now),
            });
        }
    }

    /// Apply every reveal tick due at `now`.
    pub(crate) fn tick(&mut self, now: Instant) {
        let Some(active) = self.reveal.as_mut() else {
            return;
        };
        let due = active.ticker.due_ticks(now);
        for _ in 0..due {
            match self.log.apply_tick(&mut active.reveal) {
                TickOutcome::Advanced => {}
                TickOutcome::Finished | TickOutcome::Stale => {
                    self.reveal = None;
                    return;
                }
            }
        }
        // Text may already be complete; settle without waiting for another tick.
        if active.reveal.is_finished() {
            self.log.apply_tick(&mut active.reveal);
            self.reveal = None;
        }
    }

    /// Time until the next reveal tick, if an animation is running.
    pub(crate) fn until_next_tick(&self, now: Instant) -> Option<Duration> {
        self.reveal.as_ref().map(|a| a.ticker.until_next(now))
    }

    /// Reset to an empty conversation. Ignored while a request is in flight.
    pub(crate) fn clear_conversation(&mut self) {
        if self.is_loading() {
            return;
        }
        self.log.clear();
        self.reveal = None;
        self.scroll = ScrollPosition::default();
        self.last_max_scroll = 0;
    }

    pub(crate) fn insert_char(&mut self, c: char) {
        self.input.insert(self.input_cursor, c);
        self.input_cursor += c.len_utf8();
    }

    pub(crate) fn backspace(&mut self) {
        if let Some((idx, _)) = self.input[..self.input_cursor].char_indices().next_back() {
            self.input.remove(idx);
            self.input_cursor = idx;
        }
    }

    pub(crate) fn cursor_left(&mut self) {
        if let Some((idx, _)) = self.input[..self.input_cursor].char_indices().next_back() {
            self.input_cursor = idx;
        }
    }

    pub(crate) fn cursor_right(&mut self) {
        if let Some(c) = self.input[self.input_cursor..].chars().next() {
            self.input_cursor += c.len_utf8();
        }
    }

    pub(crate) fn cursor_home(&mut self) {
        self.input_cursor = 0;
    }

    pub(crate) fn cursor_end(&mut self) {
        self.input_cursor = self.input.len();
    }

    /// Must be called before scroll_up/scroll_down when at bottom.
    pub(crate) fn materialize_scroll(&mut self) {
        if self.scroll == ScrollPosition::Bottom {
            self.scroll = ScrollPosition::Line(self.last_max_scroll);
        }
    }

    pub(crate) fn scroll_down(&mut self, n: usize) {
        self.materialize_scroll();
        if let ScrollPosition::Line(pos) = self.scroll {
            let next = (pos + n).min(self.last_max_scroll);
            self.scroll = if next >= self.last_max_scroll {
                ScrollPosition::Bottom
            } else {
                ScrollPosition::Line(next)
            };
        }
    }

    pub(crate) fn scroll_up(&mut self, n: usize) {
        self.materialize_scroll();
        if let ScrollPosition::Line(pos) = self.scroll {
            self.scroll = ScrollPosition::Line(pos.saturating_sub(n));
        }
    }

    /// Resolve scroll position to a concrete line index.
    pub(crate) fn scroll_line(&self) -> usize {
        match self.scroll {
            ScrollPosition::Line(n) => n.min(self.last_max_scroll),
            ScrollPosition::Bottom => self.last_max_scroll,
        }
    }
}
