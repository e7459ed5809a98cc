use crate::assessment::AssessmentResult;
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    pub id: u64,
    pub role: ChatRole,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

/// Per-session state: the latest assessment result and the chat transcript.
///
/// Owned by exactly one UI session; nothing here survives a restart. The
/// server wraps it in a mutex only because axum handlers share the one demo
/// session.
#[derive(Debug, Default)]
pub struct SessionState {
    assessment_result: Option<AssessmentResult>,
    chat_history: Vec<ChatMessage>,
    next_message_id: u64,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn assessment_result(&self) -> Option<&AssessmentResult> {
        self.assessment_result.as_ref()
    }

    /// Replaces the stored result wholesale; `None` clears it on restart.
    pub fn set_assessment_result(&mut self, result: Option<AssessmentResult>) {
        self.assessment_result = result;
    }

    pub fn add_chat_message(&mut self, role: ChatRole, content: impl Into<String>) -> &ChatMessage {
        self.next_message_id += 1;
        self.chat_history.push(ChatMessage {
            id: self.next_message_id,
            role,
            content: content.into(),
            timestamp: Utc::now(),
        });
        self.chat_history
            .last()
            .unwrap_or_else(|| unreachable!("message was just pushed"))
    }

    pub fn chat_history(&self) -> &[ChatMessage] {
        &self.chat_history
    }

    pub fn clear_chat_history(&mut self) {
        self.chat_history.clear();
    }
}
