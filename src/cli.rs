//! CLI definitions: argument parsing, subcommands, and help text.

use std::net::SocketAddr;

use clap::{ArgAction, Parser, Subcommand};
use clap_complete::Shell;

use crate::core::config::EndpointMode;

pub use clap_complete::generate;

const AFTER_HELP: &str = "\
EXAMPLES:
  eqx-chat                          Launch interactive TUI
  eqx-chat -p \"what is EQx?\"        Ask one question, reveal the answer on stdout
  eqx-chat -p - < question.txt      Read the question from stdin
  eqx-chat --endpoint proxy         Send questions through the relay proxy
  eqx-chat serve --bind 0.0.0.0:80  Run the relay proxy (GET /api/proxy)
  eqx-chat config                   Show resolved endpoints and settings
  eqx-chat completions bash         Generate bash completions
";

/// Command-line arguments for the application.
#[derive(Parser)]
#[command(
    author,
    version,
    about = "Terminal chat client and relay proxy for the EQx chatbot",
    after_help = AFTER_HELP
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Ask a single question then exit (without opening the TUI)
    #[arg(
        short = 'p',
        long,
        help = "Ask one question and print the answer (use '-' to read from stdin)"
    )]
    pub prompt: Option<String>,

    /// Print the answer at once instead of revealing it character by character
    #[arg(long, help = "In prompt mode, print the answer without the reveal animation")]
    pub no_reveal: bool,

    /// Override EQX_CHAT_ENDPOINT
    #[arg(long, value_enum, help = "Call the chatbot directly or through the proxy")]
    pub endpoint: Option<EndpointMode>,

    /// Increase log verbosity (use multiple times for debug)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Reduce log output (errors only)
    #[arg(short = 'q', long = "quiet", global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the relay proxy server
    Serve {
        /// Address to bind (overrides EQX_CHAT_BIND)
        #[arg(long)]
        bind: Option<SocketAddr>,
    },
    /// Show resolved endpoints and settings
    Config,
    /// Generate shell completion script
    Completions {
        /// Shell to generate completions for (bash, zsh, fish, powershell, elvish)
        #[arg(value_parser = clap::value_parser!(Shell))]
        shell: Shell,
    },
}

impl Args {
    /// Log level based on -v/-q flags: error, warn, info, or debug.
    pub fn log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else if self.verbose >= 2 {
            "debug"
        } else if self.verbose >= 1 {
            "info"
        } else {
            "warn"
        }
    }

    /// True when no prompt and no subcommand: the TUI owns the terminal.
    pub fn is_tui(&self) -> bool {
        self.prompt.is_none() && self.command.is_none()
    }
}
