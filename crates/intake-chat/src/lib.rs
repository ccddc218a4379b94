//! Conversation management for the intake widget
//!
//! This crate provides the message store, the bounded history sent with each
//! exchange, the typed-out greeting, and the session state machine that ties
//! them to an [`intake_api::ExchangeClient`].

pub mod context;
pub mod greeting;
pub mod markdown;
pub mod session;
pub mod store;
pub mod view;

#[cfg(test)]
mod test_support;

// Re-export commonly used types
pub use context::ContextWindow;
pub use greeting::{GreetingReveal, GreetingSchedule, GreetingStep, GreetingStreamer};
pub use session::{
    CompletedExchange, ExchangeOutcome, PendingExchange, SessionConfig, SessionController,
    SessionEvent, SubmitRejected,
};
pub use store::MessageStore;
pub use view::{ChatView, GreetingView, TurnView, TYPING_INDICATOR};
