//! Application run modes: logger init, single prompt, proxy server, TUI launch.

use std::io::{self, Write};
use std::net::SocketAddr;
use std::sync::Arc;

use crate::cli::Args;
use crate::core;
use crate::core::config::Config;
use crate::core::dispatch::ChatbotClient;
use crate::core::reveal::Reveal;
use crate::core::chat_log::MessageId;
use crate::proxy::{self, ProxyState};

/// Initialize env_logger. In TUI mode, writes to file to avoid corrupting the display.
pub fn init_logger(args: &Args) {
    let log_level = args.log_level();
    let mut logger =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level));

    if args.is_tui()
        && let Some(path) = core::paths::log_file()
        && let Ok(file) = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
    {
        logger.target(env_logger::Target::Pipe(Box::new(file)));
    }
    let _ = logger.try_init();
}

/// Run single prompt mode: ask once, reveal the answer on stdout.
pub async fn run_single_prompt(
    args: &Args,
    config: &Config,
) -> Result<(), Box<dyn std::error::Error>> {
    let Some(prompt_arg) = args.prompt.as_ref() else {
        return Err("no prompt given".into());
    };
    let prompt = if prompt_arg == "-" {
        std::io::read_to_string(std::io::stdin())?
    } else {
        prompt_arg.clone()
    };
    let prompt = prompt.trim();
    if prompt.is_empty() {
        eprintln!("Error: empty prompt");
        std::process::exit(1);
    }

    let client = ChatbotClient::new(config.chatbot_endpoint());
    let (text, failed) = match client.fetch_answer(prompt).await {
        Ok(answer) => (answer, false),
        Err(e) => {
            log::warn!("Request failed: {}", e);
            (e.user_message(), true)
        }
    };

    if args.no_reveal {
        println!("{}", text);
    } else {
        reveal_to_stdout(&text, config).await?;
    }

    if failed {
        std::process::exit(1);
    }
    Ok(())
}

/// Print `text` one character per tick.
async fn reveal_to_stdout(text: &str, config: &Config) -> io::Result<()> {
    let mut stdout = io::stdout();
    let mut reveal = Reveal::new(MessageId::from_raw(0), text);
    let mut interval = tokio::time::interval(config.reveal_interval);
    let mut shown = 0;
    while let Some(prefix) = reveal.advance() {
        interval.tick().await;
        stdout.write_all(prefix[shown..].as_bytes())?;
        stdout.flush()?;
        shown = prefix.len();
    }
    writeln!(stdout)?;
    Ok(())
}

/// Run the relay proxy until Ctrl-C.
pub async fn run_proxy(
    config: &Config,
    bind: Option<SocketAddr>,
) -> Result<(), Box<dyn std::error::Error>> {
    let addr = bind.unwrap_or(config.bind);
    let state = Arc::new(ProxyState {
        upstream: ChatbotClient::new(config.upstream_endpoint()),
    });
    proxy::serve(addr, state).await?;
    Ok(())
}

/// Print resolved endpoints and settings.
pub fn print_config(config: &Config) {
    println!("{} {}", core::app::NAME, core::app::VERSION);
    println!("  endpoint mode:   {}", config.endpoint_mode);
    println!("  chat endpoint:   {}", config.chatbot_endpoint());
    println!("  upstream route:  {}", config.upstream_endpoint());
    println!("  proxy url:       {}", config.proxy_url);
    println!("  proxy bind:      {}", config.bind);
    println!("  reveal interval: {} ms", config.reveal_interval.as_millis());
    println!("  timestamps:      {}", config.show_timestamps);
    match core::paths::cache_dir() {
        Some(dir) => println!(
            "  log file (TUI):  {}",
            dir.join(format!("{}.log", core::app::NAME)).display()
        ),
        None => println!("  log file (TUI):  (no cache directory)"),
    }
}

/// Launch the TUI in a blocking thread. Returns on panic or IO error.
pub async fn launch_tui(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let config = Arc::new(config);
    let join_result: Result<io::Result<()>, tokio::task::JoinError> =
        tokio::task::spawn_blocking(move || crate::tui::run(config)).await;

    match join_result {
        Ok(io_result) => io_result?,
        Err(join_err) => {
            if let Ok(panic) = join_err.try_into_panic() {
                let msg = if let Some(s) = panic.downcast_ref::<&str>() {
                    s.to_string()
                } else if let Some(s) = panic.downcast_ref::<String>() {
                    s.clone()
                } else {
                    format!("{:?}", panic)
                };
                eprintln!("TUI panic: {}", msg);
            }
            return Err(
                Box::new(io::Error::other("TUI thread panicked")) as Box<dyn std::error::Error>
            );
        }
    }
    Ok(())
}
