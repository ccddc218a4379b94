use anyhow::{Context, Result};
use colored::Colorize;
use futures::StreamExt;
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, ExternalPrinter};
use std::io::{self, Write};
use std::sync::mpsc as std_mpsc;
use std::thread;
use tokio::sync::{mpsc, oneshot};

use crate::config::IntakeConfig;
use crate::render::{plain_text, render_terminal};
use intake_api::{ExchangeClient, HttpExchangeClient};
use intake_chat::{
    ExchangeOutcome, GreetingStep, SessionController, SessionEvent, SubmitRejected, TYPING_INDICATOR,
};
use intake_types::{Role, SessionStatus, WELCOME_MESSAGE};

/// What the prompt thread read
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    Line(String),
    /// Ctrl-C at the prompt
    Interrupted,
    Eof,
    Failed(String),
}

type Printer = Box<dyn ExternalPrinter + Send>;

/// Rustyline prompt on its own thread so lines arrive while the greeting is typed out.
///
/// After each line the thread waits for [`LineReader::ready`] before prompting again.
struct LineReader {
    events: mpsc::UnboundedReceiver<InputEvent>,
    ready: std_mpsc::Sender<()>,
}

impl LineReader {
    fn spawn(prompt: String) -> (Self, oneshot::Receiver<Option<Printer>>) {
        let (event_tx, events) = mpsc::unbounded_channel();
        let (ready, ready_rx) = std_mpsc::channel();
        let (printer_tx, printer_rx) = oneshot::channel();

        thread::spawn(move || read_lines(prompt, event_tx, ready_rx, printer_tx));

        (Self { events, ready }, printer_rx)
    }

    fn ready(&self) {
        let _ = self.ready.send(());
    }
}

fn read_lines(
    prompt: String,
    events: mpsc::UnboundedSender<InputEvent>,
    ready: std_mpsc::Receiver<()>,
    printer: oneshot::Sender<Option<Printer>>,
) {
    let mut rl = match DefaultEditor::new() {
        Ok(rl) => rl,
        Err(e) => {
            let _ = printer.send(None);
            let _ = events.send(InputEvent::Failed(e.to_string()));
            return;
        }
    };

    let external = match rl.create_external_printer() {
        Ok(p) => Some(Box::new(p) as Printer),
        Err(e) => {
            log::debug!("external printer unavailable: {}", e);
            None
        }
    };
    let _ = printer.send(external);

    loop {
        match rl.readline(&prompt) {
            Ok(line) => {
                let entry = line.trim().to_string();
                if !entry.is_empty() {
                    let _ = rl.add_history_entry(entry);
                }
                if events.send(InputEvent::Line(line)).is_err() || ready.recv().is_err() {
                    break;
                }
            }
            Err(ReadlineError::Interrupted) => {
                if events.send(InputEvent::Interrupted).is_err() {
                    break;
                }
            }
            Err(ReadlineError::Eof) => {
                let _ = events.send(InputEvent::Eof);
                break;
            }
            Err(e) => {
                let _ = events.send(InputEvent::Failed(e.to_string()));
                break;
            }
        }
    }
}

// Text printed while the prompt is up goes above it.
fn prompt_output(printer: Option<Printer>) -> Box<dyn FnMut(&str)> {
    match printer {
        Some(mut printer) => Box::new(move |text: &str| {
            let _ = printer.print(text.to_string());
        }),
        None => Box::new(|text: &str| {
            print!("{}", text);
            let _ = io::stdout().flush();
        }),
    }
}

/// Run the interactive intake conversation
pub async fn run_repl_mode(config: &IntakeConfig) -> Result<()> {
    println!("{}", "🩺 CPX 의료 상담".bright_cyan().bold());
    println!("{}", format!("Diagnosis service: {}", config.base_url).bright_black());
    println!(
        "{}",
        "Type 'exit' or 'quit' to exit, '/reset' to start over\n".bright_black()
    );

    let client = HttpExchangeClient::with_options(&config.client_options())
        .context("Failed to build HTTP client")?;
    let mut session =
        SessionController::with_config(client, config.session_config(plain_text(WELCOME_MESSAGE)));

    let markdown = config.markdown;
    session.subscribe(move |event| print_event(event, markdown));

    let (mut reader, printer) = LineReader::spawn(format!("{} ", "환자:".bright_green().bold()));
    let mut output = prompt_output(printer.await.ok().flatten());

    let mut next = reveal_until_input(&mut session, &mut reader.events, output.as_mut()).await;

    loop {
        let event = match next.take() {
            Some(event) => event,
            None => match reader.events.recv().await {
                Some(event) => event,
                None => break,
            },
        };

        match event {
            InputEvent::Line(line) => {
                let command = line.trim();

                if command == "exit" || command == "quit" {
                    println!("{}", "Goodbye!".bright_cyan());
                    break;
                }

                if command == "/reset" {
                    session.reset();
                    reader.ready();
                    next = reveal_until_input(&mut session, &mut reader.events, output.as_mut()).await;
                    continue;
                }

                submit_line(&mut session, &line).await;
                reader.ready();
            }
            InputEvent::Interrupted => output("^C\n"),
            InputEvent::Eof => {
                println!("{}", "Goodbye!".bright_cyan());
                break;
            }
            InputEvent::Failed(e) => {
                eprintln!("{} {}", "Error:".bright_red().bold(), e);
                break;
            }
        }
    }

    Ok(())
}

async fn submit_line<C: ExchangeClient>(session: &mut SessionController<C>, line: &str) {
    match session.submit(line).await {
        Ok(ExchangeOutcome::Failed) => {
            eprintln!(
                "{} {}",
                "❌".bright_red(),
                "응답을 받지 못했습니다. 잠시 후 다시 시도해 주세요.".bright_red()
            );
        }
        Ok(_) | Err(SubmitRejected::Empty) => {}
        Err(e) => log::warn!("Submission rejected: {}", e),
    }
}

fn print_event(event: &SessionEvent, markdown: bool) {
    match event {
        SessionEvent::TurnAppended { turn, .. } if turn.role == Role::Assistant => {
            let body = if markdown {
                render_terminal(&turn.content)
            } else {
                turn.content.clone()
            };
            println!("{}\n{}\n", turn.role.label().bright_cyan().bold(), body);
        }
        SessionEvent::StatusChanged(SessionStatus::AwaitingReply) => {
            println!("{}", TYPING_INDICATOR.bright_black().italic());
        }
        SessionEvent::Reset => {
            println!("{}", "대화를 새로 시작합니다.".bright_black());
        }
        _ => {}
    }
}

/// Type the greeting out line by line while input keeps flowing.
///
/// Ctrl-C shows the rest at once. Any other input stops the greeting and is
/// returned for the caller to handle; a line then supersedes the greeting.
async fn reveal_until_input<C: ExchangeClient>(
    session: &mut SessionController<C>,
    events: &mut mpsc::UnboundedReceiver<InputEvent>,
    out: &mut dyn FnMut(&str),
) -> Option<InputEvent> {
    let total = session.greeting()?.total_length();

    let streamer = session.greeting_streamer();
    let mut steps = streamer.steps();
    let mut printed = 0;
    let mut pending = String::new();

    out(&format!("{}\n", Role::Assistant.label().bright_cyan().bold()));

    let superseded = loop {
        let step = tokio::select! {
            step = steps.next() => step,
            event = events.recv() => match event {
                Some(InputEvent::Interrupted) => {
                    streamer.cancel();
                    Some(GreetingStep { revealed: total, complete: true })
                }
                other => {
                    streamer.cancel();
                    break Some(other.unwrap_or(InputEvent::Eof));
                }
            },
        };

        let Some(step) = step else { break None };
        if session.apply_greeting_step(step) {
            if let Some(reveal) = session.greeting() {
                pending.push_str(unprinted(reveal.revealed_text(), printed));
                printed = reveal.revealed_prefix_length();
            }
            while let Some(end) = pending.find('\n') {
                let line: String = pending.drain(..=end).collect();
                out(&line);
            }
        }
        if step.complete {
            break None;
        }
    };

    if !pending.is_empty() {
        pending.push('\n');
        out(&pending);
    }
    out("\n");
    superseded
}

// Part of `revealed` past the first `printed` characters.
fn unprinted(revealed: &str, printed: usize) -> &str {
    match revealed.char_indices().nth(printed) {
        Some((byte, _)) => &revealed[byte..],
        None => "",
    }
}
