use thiserror::Error;

use crate::context::ContextWindow;
use crate::greeting::{GreetingReveal, GreetingSchedule, GreetingStep, GreetingStreamer};
use crate::store::MessageStore;
use crate::view::ChatView;
use intake_api::{ExchangeClient, ExchangeError};
use intake_types::{ChatReply, Role, SessionStatus, Turn, DEFAULT_HISTORY_TURNS, WELCOME_MESSAGE};

/// Settings for one intake session
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub history_turns: usize,
    pub greeting_text: String,
    pub greeting_schedule: GreetingSchedule,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            history_turns: DEFAULT_HISTORY_TURNS,
            greeting_text: WELCOME_MESSAGE.to_string(),
            greeting_schedule: GreetingSchedule::default(),
        }
    }
}

/// Why a submission was not accepted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SubmitRejected {
    #[error("message is empty")]
    Empty,
    #[error("still waiting for the previous reply")]
    AwaitingReply,
}

/// Observable change of session state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// A turn was appended; presenters re-render and scroll to it
    TurnAppended { index: usize, turn: Turn },
    /// `AwaitingReply` shows the typing indicator, `Idle` hides it
    StatusChanged(SessionStatus),
    NeedMoreInfoChanged(bool),
    GreetingAdvanced(GreetingStep),
    /// History was discarded and the greeting starts over
    Reset,
}

/// Result of reconciling an exchange with the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExchangeOutcome {
    Replied { appended: usize, need_more_info: bool },
    Failed,
    /// The exchange no longer belongs to this session
    Discarded,
}

/// An accepted submission whose request has not been answered yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingExchange {
    ticket: u64,
    pub message: String,
    /// History as it stood before `message` was appended
    pub history: Vec<Turn>,
}

impl PendingExchange {
    pub fn ticket(&self) -> u64 {
        self.ticket
    }

    /// Send the request. The session does not need to be borrowed meanwhile.
    pub async fn dispatch<C: ExchangeClient + ?Sized>(self, client: &C) -> CompletedExchange {
        let result = client.exchange(&self.message, &self.history).await;
        self.complete(result)
    }

    pub fn complete(self, result: Result<ChatReply, ExchangeError>) -> CompletedExchange {
        CompletedExchange {
            ticket: self.ticket,
            result,
        }
    }
}

/// Answer (or failure) for a [`PendingExchange`]
#[derive(Debug)]
pub struct CompletedExchange {
    ticket: u64,
    result: Result<ChatReply, ExchangeError>,
}

type Listener = Box<dyn FnMut(&SessionEvent) + Send>;

/// State machine of one intake conversation.
///
/// Cycles between `Idle` and `AwaitingReply` for as long as it lives. The
/// patient's turn is appended before the request goes out and the request
/// carries the history that preceded it. Every failure ends back in `Idle`.
pub struct SessionController<C> {
    client: C,
    store: MessageStore,
    status: SessionStatus,
    need_more_info: bool,
    window: ContextWindow,
    greeting: GreetingReveal,
    schedule: GreetingSchedule,
    pending: Option<u64>,
    next_ticket: u64,
    listeners: Vec<Listener>,
}

impl<C: ExchangeClient> SessionController<C> {
    pub fn new(client: C) -> Self {
        Self::with_config(client, SessionConfig::default())
    }

    pub fn with_config(client: C, config: SessionConfig) -> Self {
        Self {
            client,
            store: MessageStore::new(),
            status: SessionStatus::Idle,
            need_more_info: false,
            window: ContextWindow::new(config.history_turns),
            greeting: GreetingReveal::new(config.greeting_text),
            schedule: config.greeting_schedule,
            pending: None,
            next_ticket: 0,
            listeners: Vec::new(),
        }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Register a callback for every [`SessionEvent`]
    pub fn subscribe<F>(&mut self, listener: F)
    where
        F: FnMut(&SessionEvent) + Send + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn need_more_info(&self) -> bool {
        self.need_more_info
    }

    pub fn store(&self) -> &MessageStore {
        &self.store
    }

    /// Snapshot of the conversation
    pub fn conversation(&self) -> Vec<Turn> {
        self.store.all()
    }

    /// History that would accompany a submission made right now
    pub fn context_window(&self) -> Vec<Turn> {
        self.window.build(self.store.turns())
    }

    /// The greeting, while it is still relevant
    pub fn greeting(&self) -> Option<&GreetingReveal> {
        if self.store.is_empty() {
            Some(&self.greeting)
        } else {
            None
        }
    }

    /// Streamer for the greeting from its current start
    pub fn greeting_streamer(&self) -> GreetingStreamer {
        GreetingStreamer::for_length(self.greeting.total_length(), self.schedule)
    }

    /// Advance the greeting. Returns false once the conversation has started or
    /// when the step does not move the reveal forward.
    pub fn apply_greeting_step(&mut self, step: GreetingStep) -> bool {
        if !self.store.is_empty() {
            return false;
        }
        if !self.greeting.apply(step) {
            return false;
        }
        self.emit(SessionEvent::GreetingAdvanced(step));
        true
    }

    /// Accept `text` as the next patient turn.
    ///
    /// On success the turn is already in the conversation and the session is
    /// `AwaitingReply`; the returned exchange must be sent and handed back to
    /// [`resolve`](Self::resolve).
    pub fn begin_submit(&mut self, text: &str) -> Result<PendingExchange, SubmitRejected> {
        if self.status.is_awaiting() {
            log::debug!("submission ignored while awaiting a reply");
            return Err(SubmitRejected::AwaitingReply);
        }
        if text.trim().is_empty() {
            return Err(SubmitRejected::Empty);
        }

        let history = self.window.build(self.store.turns());
        self.append(Turn::patient(text));
        self.set_status(SessionStatus::AwaitingReply);

        let ticket = self.next_ticket;
        self.next_ticket += 1;
        self.pending = Some(ticket);

        log::debug!(
            "exchange #{} started with {} history turns",
            ticket,
            history.len()
        );

        Ok(PendingExchange {
            ticket,
            message: text.to_string(),
            history,
        })
    }

    /// Fold the outcome of an exchange into the session
    pub fn resolve(&mut self, completed: CompletedExchange) -> ExchangeOutcome {
        if self.pending != Some(completed.ticket) {
            log::warn!(
                "discarding reply for exchange #{} (outstanding: {:?})",
                completed.ticket,
                self.pending
            );
            return ExchangeOutcome::Discarded;
        }
        self.pending = None;

        let outcome = match completed.result {
            Ok(reply) => {
                let appended = reply.messages.len();
                for message in reply.messages {
                    self.append(Turn::assistant(message));
                }
                if self.need_more_info != reply.need_more_info {
                    self.need_more_info = reply.need_more_info;
                    self.emit(SessionEvent::NeedMoreInfoChanged(reply.need_more_info));
                }
                ExchangeOutcome::Replied {
                    appended,
                    need_more_info: reply.need_more_info,
                }
            }
            Err(e) => {
                log::warn!("exchange #{} failed, no reply appended: {}", completed.ticket, e);
                ExchangeOutcome::Failed
            }
        };

        self.set_status(SessionStatus::Idle);
        outcome
    }

    /// Submit and wait for the reply in one call
    pub async fn submit(&mut self, text: &str) -> Result<ExchangeOutcome, SubmitRejected> {
        let pending = self.begin_submit(text)?;
        let completed = pending.dispatch(&self.client).await;
        Ok(self.resolve(completed))
    }

    /// Start over with an empty conversation; any outstanding exchange is orphaned
    pub fn reset(&mut self) {
        self.store = MessageStore::new();
        self.pending = None;
        self.need_more_info = false;
        self.greeting.restart();
        self.emit(SessionEvent::Reset);
        self.set_status(SessionStatus::Idle);
    }

    /// Render-ready snapshot
    pub fn view(&self, markdown: bool) -> ChatView {
        ChatView::build(
            self.store.turns(),
            self.greeting(),
            self.status,
            self.need_more_info,
            markdown,
        )
    }

    fn append(&mut self, turn: Turn) {
        let role = turn.role;
        let index = self.store.append(turn.clone());
        if role == Role::Patient {
            log::debug!("patient turn #{} appended", index);
        }
        self.emit(SessionEvent::TurnAppended { index, turn });
    }

    fn set_status(&mut self, status: SessionStatus) {
        if self.status != status {
            self.status = status;
            self.emit(SessionEvent::StatusChanged(status));
        }
    }

    fn emit(&mut self, event: SessionEvent) {
        for listener in self.listeners.iter_mut() {
            listener(&event);
        }
    }
}
