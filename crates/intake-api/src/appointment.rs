use reqwest::header::ACCEPT;
use reqwest::StatusCode;
use std::time::Duration;
use thiserror::Error;

use crate::config::ClientOptions;
use intake_logging::log_response;
use intake_types::Appointment;

/// Failure of an appointment lookup
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("appointment id is empty")]
    EmptyId,

    #[error("appointment {0} not found")]
    NotFound(String),

    #[error("appointment service returned {0}")]
    Status(u16),

    #[error("malformed appointment record: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("appointment request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

impl LookupError {
    /// Message shown to the patient in place of the record
    pub fn user_message(&self) -> &'static str {
        match self {
            LookupError::EmptyId => "예약번호를 입력해주세요.",
            LookupError::NotFound(_) => "예약을 찾을 수 없습니다. 예약번호를 다시 확인해주세요.",
            LookupError::Status(_) | LookupError::Decode(_) => "예약 조회 중 오류가 발생했습니다.",
            LookupError::Transport(_) => "네트워크 오류가 발생했습니다.",
        }
    }
}

/// Read-only client for `GET /appointments/{id}`
pub struct AppointmentClient {
    base_url: String,
    client: reqwest::Client,
    timeout: Option<Duration>,
    verbose: bool,
}

impl AppointmentClient {
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

    pub fn appointment_url(&self, id: &str) -> String {
        format!("{}/appointments/{}", self.base_url, id)
    }

    /// Fetch one appointment; `id` is trimmed first and must not be empty
    pub async fn lookup(&self, id: &str) -> Result<Appointment, LookupError> {
        let id = id.trim();
        if id.is_empty() {
            return Err(LookupError::EmptyId);
        }

        let url = self.appointment_url(id);
        log::debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| {
                log::error!("Appointment lookup failed: {}", e);
                LookupError::Transport(e)
            })?;

        let status = response.status();
        let body = response.text().await?;
        log_response(&url, status, &body, self.verbose);

        if status == StatusCode::NOT_FOUND {
            return Err(LookupError::NotFound(id.to_string()));
        }
        if !status.is_success() {
            log::warn!("Appointment lookup for {} returned {}", id, status);
            return Err(LookupError::Status(status.as_u16()));
        }

        Ok(serde_json::from_str(&body)?)
    }
}
