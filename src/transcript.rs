// src/transcript.rs

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Who a message came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

/// One chat message. Never mutated after creation; never individually
/// deleted, only bulk-cleared with the transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub content: String,
    pub sender: Sender,
    pub timestamp: DateTime<Local>,
}

impl Message {
    pub fn from_user(content: impl Into<String>) -> Self {
        Self::stamped(content.into(), Sender::User, 0)
    }

    /// Bot and synthesized error messages offset the id by one so a reply
    /// landing in the same millisecond as its query still gets a unique id.
    pub fn from_bot(content: impl Into<String>) -> Self {
        Self::stamped(content.into(), Sender::Bot, 1)
    }

    fn stamped(content: String, sender: Sender, id_offset: i64) -> Self {
        let now = Local::now();
        Self {
            id: (now.timestamp_millis() + id_offset).to_string(),
            content,
            sender,
            timestamp: now,
        }
    }
}

/// The ordered history of exchanged messages. Append-only, except for an
/// explicit full clear; insertion order is chronological order is display
/// order.
#[derive(Debug, Default)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_messages(messages: Vec<Message>) -> Self {
        Self { messages }
    }

    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
