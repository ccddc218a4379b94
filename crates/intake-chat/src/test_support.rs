use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

use intake_api::{ExchangeClient, ExchangeError};
use intake_types::{ChatReply, Turn};

/// What a scripted exchange should return
pub enum Scripted {
    Reply(Vec<&'static str>, bool),
    Fail,
}

/// Exchange client that replays canned results and records every call
#[derive(Default)]
pub struct ScriptedClient {
    script: Mutex<VecDeque<Scripted>>,
    calls: Mutex<Vec<(String, Vec<Turn>)>>,
}

impl ScriptedClient {
    pub fn new(script: Vec<Scripted>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<(String, Vec<Turn>)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn push(&self, scripted: Scripted) {
        self.script.lock().unwrap().push_back(scripted);
    }
}

pub fn decode_failure() -> ExchangeError {
    ExchangeError::from(serde_json::from_str::<ChatReply>("not json").unwrap_err())
}

#[async_trait]
impl ExchangeClient for ScriptedClient {
    async fn exchange(&self, message: &str, history: &[Turn]) -> Result<ChatReply, ExchangeError> {
        self.calls
            .lock()
            .unwrap()
            .push((message.to_string(), history.to_vec()));

        let next = self.script.lock().unwrap().pop_front();
        match next {
            Some(Scripted::Reply(messages, need_more_info)) => Ok(ChatReply {
                messages: messages.into_iter().map(String::from).collect(),
                need_more_info,
            }),
            Some(Scripted::Fail) => Err(decode_failure()),
            None => Ok(ChatReply::default()),
        }
    }
}
