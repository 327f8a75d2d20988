//! Event handlers for the TUI: keyboard and mouse.

mod request_spawn;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind};
use std::sync::Arc;
use std::sync::mpsc;
use tokio::runtime::Runtime;
use tokio_util::sync::CancellationToken;

use crate::core::chat_log::MessageId;
use crate::core::dispatch::{ChatbotClient, DispatchError};

use super::app::App;
use super::constants;
use super::shortcuts::Shortcut;

/// A request in flight for one placeholder message.
pub struct PendingRequest {
    pub placeholder: MessageId,
    pub result_rx: mpsc::Receiver<Result<String, DispatchError>>,
    /// Token to cancel the in-flight request.
    pub cancel_token: CancellationToken,
}

/// Result of handling an event: continue the loop or exit.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum HandleResult {
    Continue,
    Break,
}

/// Context for key event handling. Bundles mutable state to reduce parameter count.
pub struct HandleKeyContext<'a> {
    pub app: &'a mut App,
    pub client: &'a ChatbotClient,
    pub pending: &'a mut Option<PendingRequest>,
    pub rt: &'a Arc<Runtime>,
}

/// Handle a mouse event (wheel scrolling).
pub fn handle_mouse(mouse: MouseEvent, app: &mut App) -> HandleResult {
    match mouse.kind {
        MouseEventKind::ScrollUp => app.scroll_up(constants::SCROLL_LINES_SMALL),
        MouseEventKind::ScrollDown => app.scroll_down(constants::SCROLL_LINES_SMALL),
        _ => {}
    }
    HandleResult::Continue
}

/// Handle a key event. Returns HandleResult::Break to exit the main loop.
pub fn handle_key(key: KeyEvent, ctx: HandleKeyContext<'_>) -> HandleResult {
    let HandleKeyContext {
        app,
        client,
        pending,
        rt,
    } = ctx;

    if key.kind != KeyEventKind::Press {
        return HandleResult::Continue;
    }

    if let Some(shortcut) = Shortcut::match_key(&key) {
        match shortcut {
            Shortcut::Quit => return HandleResult::Break,
            Shortcut::Cancel => {
                if let Some(p) = pending.as_ref() {
                    log::info!("Cancelling request for message {}", p.placeholder.as_u64());
                    p.cancel_token.cancel();
                }
            }
            Shortcut::Clear => app.clear_conversation(),
        }
        return HandleResult::Continue;
    }

    match (key.code, key.modifiers) {
        (KeyCode::Enter, mods) if mods.intersects(KeyModifiers::SHIFT | KeyModifiers::ALT) => {
            if !app.is_loading() {
                app.insert_char('\n');
            }
        }
        (KeyCode::Enter, _) => {
            if pending.is_none()
                && let Some((placeholder, question)) = app.submit_input()
            {
                log::info!("Dispatching question for message {}", placeholder.as_u64());
                *pending = Some(request_spawn::spawn_request(
                    rt,
                    client.clone(),
                    placeholder,
                    question,
                ));
            }
        }
        (KeyCode::Backspace, _) => app.backspace(),
        (KeyCode::Left, _) => app.cursor_left(),
        (KeyCode::Right, _) => app.cursor_right(),
        (KeyCode::Home, _) => app.cursor_home(),
        (KeyCode::End, _) => app.cursor_end(),
        (KeyCode::Up, _) => app.scroll_up(constants::SCROLL_LINES_SMALL),
        (KeyCode::Down, _) => app.scroll_down(constants::SCROLL_LINES_SMALL),
        (KeyCode::PageUp, _) => app.scroll_up(constants::SCROLL_LINES_PAGE),
        (KeyCode::PageDown, _) => app.scroll_down(constants::SCROLL_LINES_PAGE),
        (KeyCode::Char(c), mods) => {
            // Ignore Ctrl/Alt+key: not text input. Typing is disabled while loading.
            if !mods.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) && !app.is_loading() {
                app.insert_char(c);
            }
        }
        _ => {}
    }
    HandleResult::Continue
}
