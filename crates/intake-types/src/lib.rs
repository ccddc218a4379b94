//! Core types and structures for the intake client
//!
//! This crate provides the conversation and wire types shared by all intake crates.

use serde::{Deserialize, Deserializer, Serialize};

pub mod appointment;

pub use appointment::{format_korean_time, Appointment, AppointmentStatus};

// ============================================================================
// Constants
// ============================================================================

/// Number of trailing turns sent as history with each exchange (7 patient + 7 assistant)
pub const DEFAULT_HISTORY_TURNS: usize = 14;

/// Delay before the greeting starts revealing, in milliseconds
pub const GREETING_INITIAL_DELAY_MS: u64 = 1000;

/// Delay between two revealed greeting characters, in milliseconds
pub const GREETING_CHAR_INTERVAL_MS: u64 = 30;

/// Welcome text revealed while the conversation is still empty
pub const WELCOME_MESSAGE: &str = "안녕하세요! CPX 의료 상담 AI입니다. 🩺

증상을 자세히 말씀해 주시면 정확한 진단과 치료 가이드를 드려요.

**도움이 되는 정보:**
• 언제부터, 어디가, 어떻게 아픈지
• 언제 더 심해지거나 완화되는지  
• 동반 증상(열/구토/어지럼 등)
• 복용약물이나 기존 질환

무엇이든 편하게 물어보세요! 💬";

// ============================================================================
// Conversation Types
// ============================================================================

/// Author of a turn.
///
/// On the wire the patient is `"User"` and the assistant is `"System"`, which is
/// what the diagnosis service has always received from the widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "User", alias = "user")]
    Patient,
    #[serde(rename = "System", alias = "system", alias = "assistant", alias = "Assistant")]
    Assistant,
}

impl Role {
    /// Header shown above a turn
    pub fn label(&self) -> &'static str {
        match self {
            Role::Patient => "👤 환자",
            Role::Assistant => "🩺 AI 의사",
        }
    }

    /// CSS-style class name used by presenters
    pub fn css_class(&self) -> &'static str {
        match self {
            Role::Patient => "user",
            Role::Assistant => "agent",
        }
    }
}

/// One immutable entry of the conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub content: String,
}

impl Turn {
    pub fn patient(content: impl Into<String>) -> Self {
        Self {
            role: Role::Patient,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Whether the session is waiting on the diagnosis service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SessionStatus {
    #[default]
    Idle,
    AwaitingReply,
}

impl SessionStatus {
    pub fn is_awaiting(&self) -> bool {
        matches!(self, SessionStatus::AwaitingReply)
    }
}

// ============================================================================
// Wire Types
// ============================================================================

/// Helper function to deserialize a missing or null value as its default
pub fn deserialize_null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Body of the outbound chat request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    pub history: Vec<Turn>,
}

/// Body of the inbound chat response
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ChatReply {
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub messages: Vec<String>,
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub need_more_info: bool,
}
