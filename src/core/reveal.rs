//! Character-by-character reveal of a finished answer.
//!
//! A [`Reveal`] is a finite iterator of growing prefixes bound to one message id.
//! It is advanced by an external scheduler ([`RevealTicker`]); the chat log decides
//! whether each frame may still be applied.

use std::iter::FusedIterator;
use std::time::{Duration, Instant};

use super::chat_log::MessageId;

/// Default delay between two revealed characters.
pub const DEFAULT_REVEAL_INTERVAL_MS: u64 = 30;

/// Upper bound on ticks applied in one scheduler pass (after a long stall).
const MAX_CATCH_UP_TICKS: u32 = 64;

#[derive(Debug, Clone)]
pub struct Reveal {
    target: MessageId,
    text: String,
    /// Byte offset of the end of each character; `ends[k - 1]` closes the k-char prefix.
    ends: Vec<usize>,
    cursor: usize,
    cancelled: bool,
}

impl Reveal {
    pub fn new(target: MessageId, text: impl Into<String>) -> Self {
        let text = text.into();
        let ends = text
            .char_indices()
            .map(|(i, c)| i + c.len_utf8())
            .collect();
        Self {
            target,
            text,
            ends,
            cursor: 0,
            cancelled: false,
        }
    }

    pub fn target(&self) -> MessageId {
        self.target
    }

    pub fn is_finished(&self) -> bool {
        self.cancelled || self.cursor >= self.ends.len()
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    /// Stop the animation; every further call to `next` returns `None`.
    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    /// Currently revealed prefix.
    pub fn revealed(&self) -> &str {
        match self.cursor {
            0 => "",
            k => &self.text[..self.ends[k - 1]],
        }
    }

    /// Advance by one character and borrow the new prefix.
    pub fn advance(&mut self) -> Option<&str> {
        if self.is_finished() {
            return None;
        }
        self.cursor += 1;
        Some(self.revealed())
    }
}

impl Iterator for Reveal {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        self.advance().map(str::to_string)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = if self.is_finished() {
            0
        } else {
            self.ends.len() - self.cursor
        };
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Reveal {}

impl FusedIterator for Reveal {}

/// Turns wall-clock time into reveal ticks at a fixed cadence.
#[derive(Debug, Clone)]
pub struct RevealTicker {
    interval: Duration,
    last_tick: Instant,
}

impl RevealTicker {
    pub fn new(interval: Duration, now: Instant) -> Self {
        Self {
            interval: interval.max(Duration::from_millis(1)),
            last_tick: now,
        }
    }

    /// Number of ticks due at `now` (capped), and consume them.
    pub fn due_ticks(&mut self, now: Instant) -> u32 {
        let elapsed = now.saturating_duration_since(self.last_tick);
        let due = (elapsed.as_nanos() / self.interval.as_nanos()).min(MAX_CATCH_UP_TICKS as u128)
            as u32;
        if due > 0 {
            self.last_tick += self.interval * due;
            if now.saturating_duration_since(self.last_tick) > self.interval {
                // Dropped ticks beyond the catch-up cap; resync.
                self.last_tick = now;
            }
        }
        due
    }

    /// Time left until the next tick is due.
    pub fn until_next(&self, now: Instant) -> Duration {
        (self.last_tick + self.interval).saturating_duration_since(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(n: u64) -> MessageId {
        MessageId::from_raw(n)
    }

    #[test]
    fn reveals_one_character_per_frame() {
        let frames: Vec<String> = Reveal::new(id(1), "Paris").collect();
        assert_eq!(frames, vec!["P", "Pa", "Par", "Pari", "Paris"]);
    }

    #[test]
    fn each_frame_is_a_strict_prefix_of_the_next() {
        let s = "héllo wörld 👋";
        let frames: Vec<String> = Reveal::new(id(1), s).collect();
        assert_eq!(frames.len(), s.chars().count());
        assert_eq!(frames.last().map(String::as_str), Some(s));
        for pair in frames.windows(2) {
            assert!(pair[1].starts_with(&pair[0]));
            assert!(pair[1].len() > pair[0].len());
        }
    }

    #[test]
    fn empty_text_has_no_frames() {
        let mut r = Reveal::new(id(1), "");
        assert!(r.is_finished());
        assert_eq!(r.next(), None);
    }

    #[test]
    fn iterator_is_fused_after_completion() {
        let mut r = Reveal::new(id(1), "ab");
        assert_eq!(r.len(), 2);
        r.by_ref().for_each(drop);
        assert_eq!(r.next(), None);
        assert_eq!(r.next(), None);
        assert_eq!(r.revealed(), "ab");
    }

    #[test]
    fn cancel_stops_frames() {
        let mut r = Reveal::new(id(1), "abc");
        assert_eq!(r.next().as_deref(), Some("a"));
        r.cancel();
        assert!(r.is_finished());
        assert_eq!(r.next(), None);
        assert_eq!(r.revealed(), "a");
    }

    #[test]
    fn size_hint_tracks_remaining() {
        let mut r = Reveal::new(id(1), "abc");
        assert_eq!(r.size_hint(), (3, Some(3)));
        r.next();
        assert_eq!(r.size_hint(), (2, Some(2)));
    }

    #[test]
    fn ticker_counts_elapsed_intervals() {
        let start = Instant::now();
        let mut t = RevealTicker::new(Duration::from_millis(30), start);
        assert_eq!(t.due_ticks(start + Duration::from_millis(10)), 0);
        assert_eq!(t.due_ticks(start + Duration::from_millis(30)), 1);
        assert_eq!(t.due_ticks(start + Duration::from_millis(95)), 2);
        assert_eq!(
            t.until_next(start + Duration::from_millis(95)),
            Duration::from_millis(25)
        );
    }

    #[test]
    fn ticker_caps_catch_up() {
        let start = Instant::now();
        let mut t = RevealTicker::new(Duration::from_millis(1), start);
        assert_eq!(
            t.due_ticks(start + Duration::from_secs(10)),
            MAX_CATCH_UP_TICKS
        );
        assert_eq!(t.due_ticks(start + Duration::from_secs(10)), 0);
    }
}
