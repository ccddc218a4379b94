use async_trait::async_trait;
use std::time::Duration;

use reqwest::header::{ACCEPT, CONTENT_TYPE};

use crate::client::{ExchangeClient, ExchangeError};
use crate::config::ClientOptions;
use intake_logging::{log_request, log_response};
use intake_types::{ChatReply, ChatRequest, Turn};

/// Chat client for the diagnosis service's JSON endpoint
pub struct HttpExchangeClient {
    base_url: String,
    client: reqwest::Client,
    timeout: Option<Duration>,
    verbose: bool,
}

impl HttpExchangeClient {
    /// Client with default options, including the default request timeout
    pub fn new(base_url: impl AsRef<str>) -> Self {
        let options = ClientOptions::new(base_url);
        match Self::with_options(&options) {
            Ok(client) => client,
            Err(e) => {
                log::warn!("Falling back to an HTTP client without timeout: {}", e);
                Self {
                    base_url: options.base_url,
                    client: reqwest::Client::new(),
                    timeout: None,
                    verbose: options.verbose,
                }
            }
        }
    }

    pub fn with_options(options: &ClientOptions) -> Result<Self, reqwest::Error> {
        Ok(Self {
            base_url: options.base_url.clone(),
            client: options.build_http_client()?,
            timeout: options.timeout,
            verbose: options.verbose,
        })
    }

    /// Deadline applied to each request, if any
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub fn chat_url(&self) -> String {
        format!("{}/chat", self.base_url)
    }

    async fn send(&self, request: &ChatRequest) -> Result<ChatReply, ExchangeError> {
        let url = self.chat_url();
        log_request(&url, request, self.verbose);

        let response = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        log_response(&url, status, &body, self.verbose);

        if !status.is_success() {
            return Err(ExchangeError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let reply: ChatReply = serde_json::from_str(&body)?;
        Ok(reply)
    }
}

#[async_trait]
impl ExchangeClient for HttpExchangeClient {
    async fn exchange(&self, message: &str, history: &[Turn]) -> Result<ChatReply, ExchangeError> {
        let request = ChatRequest {
            message: message.to_string(),
            history: history.to_vec(),
        };

        match self.send(&request).await {
            Ok(reply) => {
                log::debug!(
                    "chat reply: {} segments, need_more_info={}",
                    reply.messages.len(),
                    reply.need_more_info
                );
                Ok(reply)
            }
            Err(e) => {
                log::error!("Error while processing chat: {}", e);
                Err(e)
            }
        }
    }
}
