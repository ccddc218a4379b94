use std::time::Duration;

use crate::cli::Cli;
use intake_api::{normalize_base_url, ClientOptions};
use intake_chat::{GreetingSchedule, SessionConfig};

/// Runtime settings resolved from flags, environment and `.env`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntakeConfig {
    pub base_url: String,
    pub history_turns: usize,
    /// `None` when the timeout is disabled
    pub timeout: Option<Duration>,
    pub greeting_delay: Duration,
    pub greeting_interval: Duration,
    pub markdown: bool,
    pub verbose: bool,
}

impl IntakeConfig {
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            base_url: normalize_base_url(&cli.base_url),
            history_turns: cli.history_turns,
            timeout: (cli.timeout_secs > 0).then(|| Duration::from_secs(cli.timeout_secs)),
            greeting_delay: Duration::from_millis(cli.greeting_delay_ms),
            greeting_interval: Duration::from_millis(cli.greeting_interval_ms),
            markdown: !cli.no_markdown,
            verbose: cli.verbose,
        }
    }

    pub fn client_options(&self) -> ClientOptions {
        ClientOptions::new(&self.base_url)
            .with_timeout(self.timeout)
            .with_verbose(self.verbose)
    }

    pub fn session_config(&self, greeting_text: impl Into<String>) -> SessionConfig {
        SessionConfig {
            history_turns: self.history_turns,
            greeting_text: greeting_text.into(),
            greeting_schedule: GreetingSchedule::new(self.greeting_delay, self.greeting_interval),
        }
    }
}
