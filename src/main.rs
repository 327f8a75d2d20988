//! # eqx-chat - EQx chatbot client
//!
//! Entry point for the terminal chat client and its relay proxy.
//!
//! ## Modes
//! - Interactive terminal UI (default)
//! - Single question with `-p` / `--prompt`
//! - Relay proxy server with `serve`

mod cli;
mod core;
mod proxy;
mod run;
mod tui;

#[cfg(test)]
mod test_support;

use clap::{CommandFactory, Parser};
use dotenv::dotenv;

use cli::{Args, Commands};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file
    dotenv().ok();

    let args = Args::parse();
    run::init_logger(&args);

    if let Some(Commands::Completions { shell }) = &args.command {
        let mut cmd = Args::command();
        cli::generate(*shell, &mut cmd, core::app::NAME, &mut std::io::stdout());
        return Ok(());
    }

    // Print user-friendly message; exit uses Display not Debug
    let mut config = core::config::load().unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });
    if let Some(mode) = args.endpoint {
        config.endpoint_mode = mode;
    }

    match &args.command {
        Some(Commands::Serve { bind }) => return run::run_proxy(&config, *bind).await,
        Some(Commands::Config) => {
            run::print_config(&config);
            return Ok(());
        }
        Some(Commands::Completions { .. }) | None => {}
    }

    if args.prompt.is_some() {
        return run::run_single_prompt(&args, &config).await;
    }

    run::launch_tui(config).await
}
