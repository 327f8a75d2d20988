//! TUI (Text User Interface) to chat with the EQx assistant.

mod app;
mod constants;
mod draw;
mod handlers;
mod shortcuts;
mod text;

use app::App;

use crossterm::event::{self, Event};
use crossterm::execute;
use std::io;
use std::sync::Arc;
use std::sync::mpsc::TryRecvError;
use std::time::{Duration, Instant};

use tokio::runtime::Runtime;

use crate::core::config::Config;
use crate::core::dispatch::{ChatbotClient, DispatchError};

use handlers::{HandleResult, PendingRequest};

use draw::draw;

/// Guard that restores terminal state on drop (including on panic).
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        use crossterm::terminal::{LeaveAlternateScreen, disable_raw_mode};
        let _ = disable_raw_mode();
        let _ = execute!(std::io::stdout(), crossterm::event::DisableMouseCapture);
        let _ = execute!(std::io::stdout(), LeaveAlternateScreen);
    }
}

/// Move a finished request's result into the app.
fn poll_pending(app: &mut App, pending: &mut Option<PendingRequest>) {
    let Some(request) = pending.as_ref() else {
        return;
    };
    let result = match request.result_rx.try_recv() {
        Ok(result) => result,
        Err(TryRecvError::Empty) => return,
        Err(TryRecvError::Disconnected) => {
            log::error!("Request thread exited without a result");
            Err(DispatchError::Network("request thread exited".to_string()))
        }
    };
    app.receive_answer(request.placeholder, result, Instant::now());
    *pending = None;
}

/// Run the TUI loop. Uses a dedicated Tokio runtime for the chatbot calls.
pub fn run(config: Arc<Config>) -> io::Result<()> {
    use crossterm::terminal::{Clear, ClearType, EnterAlternateScreen, enable_raw_mode};
    use ratatui::Terminal;
    use ratatui::backend::CrosstermBackend;

    let _guard = TerminalGuard;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    execute!(stdout, Clear(ClearType::All))?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let rt = Arc::new(
        Runtime::new().map_err(|e| io::Error::other(format!("Failed to create runtime: {}", e)))?,
    );

    let client = ChatbotClient::new(config.chatbot_endpoint());
    log::info!("Chat endpoint: {}", client.endpoint());

    let mut app = App::new(
        config.endpoint_mode,
        config.reveal_interval,
        config.show_timestamps,
    );
    let mut pending: Option<PendingRequest> = None;

    // Enable mouse events for wheel scrolling
    execute!(io::stdout(), crossterm::event::EnableMouseCapture)?;

    loop {
        poll_pending(&mut app, &mut pending);
        app.tick(Instant::now());

        terminal.draw(|f| draw(f, &mut app, f.area()))?;

        let idle = Duration::from_millis(constants::EVENT_POLL_TIMEOUT_MS);
        let timeout = app
            .until_next_tick(Instant::now())
            .map_or(idle, |t| t.min(idle));

        if event::poll(timeout)? {
            match event::read()? {
                Event::Mouse(mouse) => {
                    let _ = handlers::handle_mouse(mouse, &mut app);
                }
                Event::Key(key) => {
                    let result = handlers::handle_key(
                        key,
                        handlers::HandleKeyContext {
                            app: &mut app,
                            client: &client,
                            pending: &mut pending,
                            rt: &rt,
                        },
                    );
                    if result == HandleResult::Break {
                        if let Some(p) = pending.take() {
                            p.cancel_token.cancel();
                        }
                        break;
                    }
                }
                _ => {}
            }
        }
    }

    terminal.show_cursor()?;
    Ok(())
}
