use clap::{Parser, Subcommand};
use clap_complete::Shell;

use intake_api::DEFAULT_BASE_URL;
use intake_types::{DEFAULT_HISTORY_TURNS, GREETING_CHAR_INTERVAL_MS, GREETING_INITIAL_DELAY_MS};

/// CLI arguments for the intake client
#[derive(Parser, Debug)]
#[command(name = "intake")]
#[command(about = "Medical intake chat - describe your symptoms to the AI doctor")]
#[command(version = "0.1.0")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Base URL of the diagnosis service
    #[arg(long, value_name = "URL", env = "INTAKE_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Number of trailing turns sent as history with each message
    #[arg(long, value_name = "N", env = "INTAKE_HISTORY_TURNS", default_value_t = DEFAULT_HISTORY_TURNS)]
    pub history_turns: usize,

    /// Request timeout in seconds (0 disables the timeout)
    #[arg(long, value_name = "SECS", env = "INTAKE_TIMEOUT_SECS", default_value_t = 60)]
    pub timeout_secs: u64,

    /// Delay before the greeting starts, in milliseconds
    #[arg(long, value_name = "MS", env = "INTAKE_GREETING_DELAY_MS", default_value_t = GREETING_INITIAL_DELAY_MS)]
    pub greeting_delay_ms: u64,

    /// Delay between greeting characters, in milliseconds
    #[arg(long, value_name = "MS", env = "INTAKE_GREETING_INTERVAL_MS", default_value_t = GREETING_CHAR_INTERVAL_MS)]
    pub greeting_interval_ms: u64,

    /// Print replies as plain text instead of formatted markdown
    #[arg(long)]
    pub no_markdown: bool,

    /// Enable verbose debug output (shows HTTP requests, responses, headers, etc.)
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Look up an appointment by its id
    Lookup {
        /// Appointment id (예약번호)
        id: String,
    },
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}
