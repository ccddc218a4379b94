use crate::greeting::GreetingReveal;
use crate::markdown::render_message_content;
use intake_types::{Role, SessionStatus, Turn};

/// Text of the typing indicator shown while a reply is pending
pub const TYPING_INDICATOR: &str = "진단 중입니다...";

/// A turn ready to be drawn
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnView {
    pub role: Role,
    pub header: &'static str,
    pub class: &'static str,
    pub content: String,
    pub html: String,
}

/// The greeting as currently revealed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GreetingView {
    pub header: &'static str,
    pub text: String,
    pub html: String,
    /// Draw a cursor after the text
    pub streaming: bool,
}

/// Everything a presenter needs to draw the chat
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatView {
    pub turns: Vec<TurnView>,
    /// Present only while the conversation is empty
    pub greeting: Option<GreetingView>,
    pub typing: bool,
    pub input_enabled: bool,
    pub need_more_info: bool,
}

impl ChatView {
    pub fn build(
        turns: &[Turn],
        greeting: Option<&GreetingReveal>,
        status: SessionStatus,
        need_more_info: bool,
        markdown: bool,
    ) -> Self {
        let turns = turns
            .iter()
            .map(|turn| TurnView {
                role: turn.role,
                header: turn.role.label(),
                class: turn.role.css_class(),
                content: turn.content.clone(),
                html: render_message_content(&turn.content, markdown),
            })
            .collect();

        let greeting = greeting.map(|reveal| {
            let text = reveal.revealed_text().to_string();
            GreetingView {
                header: Role::Assistant.label(),
                html: render_message_content(&text, markdown),
                text,
                streaming: !reveal.is_complete(),
            }
        });

        Self {
            turns,
            greeting,
            typing: status.is_awaiting(),
            input_enabled: !status.is_awaiting(),
            need_more_info,
        }
    }

    /// Index of the turn to scroll to
    pub fn latest_index(&self) -> Option<usize> {
        self.turns.len().checked_sub(1)
    }
}
