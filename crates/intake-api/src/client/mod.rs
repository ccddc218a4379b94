use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

use intake_types::{ChatReply, Turn};

pub mod http;

pub use http::HttpExchangeClient;

/// Failure of a single chat exchange.
///
/// Callers that only care whether replies arrived can treat every variant the
/// same way; the split exists for operator logs.
#[derive(Debug, Error)]
pub enum ExchangeError {
    #[error("chat endpoint returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed chat response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("chat request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Exchange client trait - one patient message in, reply segments out
#[async_trait]
pub trait ExchangeClient: Send + Sync {
    /// Send `message` together with the preceding `history` and wait for the reply.
    ///
    /// No retries are attempted.
    async fn exchange(&self, message: &str, history: &[Turn]) -> Result<ChatReply, ExchangeError>;
}

#[async_trait]
impl<T: ExchangeClient + ?Sized> ExchangeClient for Arc<T> {
    async fn exchange(&self, message: &str, history: &[Turn]) -> Result<ChatReply, ExchangeError> {
        (**self).exchange(message, history).await
    }
}
