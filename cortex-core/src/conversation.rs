// Copyright 2025 Cortex Contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! Conversation turn types
//!
//! A turn is the atomic record of the conversational channel: one exchange
//! of user/assistant messages together with the semantic hints (intent,
//! entities) attached by the caller and the quality score computed at store
//! time. Turns are immutable once written; the only later mutation is the
//! archival timestamp set when a turn is relocated to the archive log.

use crate::error::{CortexError, CortexResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a conversation turn
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TurnId(pub String);

impl TurnId {
    /// Generate a new unique ID
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Create from an existing string
    pub fn from_string(s: String) -> Self {
        Self(s)
    }
}

impl Default for TurnId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for TurnId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Role of a message participant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// User message (input)
    User,
    /// Assistant message (response)
    Assistant,
}

impl Role {
    /// Get the role as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// A single message within a turn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Role of the message sender
    pub role: Role,
    /// Content of the message
    pub content: String,
    /// When the message was produced
    pub timestamp: DateTime<Utc>,
}

impl Message {
    /// Create a new user message timestamped now
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }

    /// Create a new assistant message timestamped now
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }

    /// Set an explicit timestamp
    pub fn at(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }
}

/// A conversation turn stored in the conversational channel
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationTurn {
    /// Unique turn ID
    pub id: TurnId,
    /// Messages in the turn, ordered by timestamp ascending
    pub messages: Vec<Message>,
    /// Intent tag attached by the caller
    pub intent: Option<String>,
    /// Entities mentioned in the turn
    pub entities: Vec<String>,
    /// Heuristic quality score in [0, 10], computed at store time
    pub quality_score: f64,
    /// Session this turn belongs to
    pub session_id: Option<String>,
    /// When the turn was recorded
    pub created_at: DateTime<Utc>,
    /// Set when the turn is relocated to the archive log
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archived_at: Option<DateTime<Utc>>,
}

impl ConversationTurn {
    /// Create a new empty turn builder
    pub fn new() -> Self {
        Self {
            id: TurnId::new(),
            messages: Vec::new(),
            intent: None,
            entities: Vec::new(),
            quality_score: 0.0,
            session_id: None,
            created_at: Utc::now(),
            archived_at: None,
        }
    }

    /// Append a user message
    pub fn user(mut self, content: impl Into<String>) -> Self {
        self.messages.push(Message::user(content));
        self
    }

    /// Append an assistant message
    pub fn assistant(mut self, content: impl Into<String>) -> Self {
        self.messages.push(Message::assistant(content));
        self
    }

    /// Append a prebuilt message
    pub fn message(mut self, message: Message) -> Self {
        self.messages.push(message);
        self
    }

    /// Set the intent tag
    pub fn intent(mut self, intent: impl Into<String>) -> Self {
        self.intent = Some(intent.into());
        self
    }

    /// Set the entity list
    pub fn entities(mut self, entities: Vec<impl Into<String>>) -> Self {
        self.entities = entities.into_iter().map(|e| e.into()).collect();
        self
    }

    /// Set the session ID
    pub fn session(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }

    /// Set an explicit creation timestamp
    pub fn at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    /// Check the turn is well formed before it reaches the storage layer
    pub fn validate(&self) -> CortexResult<()> {
        if self.messages.is_empty() {
            return Err(CortexError::Validation(
                "turn has no messages".to_string(),
            ));
        }
        if let Some(empty) = self.messages.iter().position(|m| m.content.trim().is_empty()) {
            return Err(CortexError::Validation(format!(
                "message {} has empty content",
                empty
            )));
        }
        Ok(())
    }

    /// Sort messages by timestamp ascending
    pub fn normalize(&mut self) {
        self.messages.sort_by_key(|m| m.timestamp);
    }

    /// Total whitespace-separated word count across all messages
    pub fn word_count(&self) -> usize {
        self.messages
            .iter()
            .map(|m| m.content.split_whitespace().count())
            .sum()
    }

    /// Whether the turn has been relocated to the archive
    pub fn is_archived(&self) -> bool {
        self.archived_at.is_some()
    }
}

impl Default for ConversationTurn {
    fn default() -> Self {
        Self::new()
    }
}

/// Query for retrieving conversation turns
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TurnQuery {
    /// Substring match over intent, entities, and message content
    pub text: Option<String>,
    /// Filter by exact intent tag
    pub intent: Option<String>,
    /// Filter by session
    pub session_id: Option<String>,
    /// Filter by time range (start)
    pub from_time: Option<DateTime<Utc>>,
    /// Filter by time range (end)
    pub to_time: Option<DateTime<Utc>>,
    /// Maximum results to return
    pub limit: Option<usize>,
}

impl TurnQuery {
    /// Create a substring query
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Default::default()
        }
    }

    /// Filter by intent
    pub fn intent(mut self, intent: impl Into<String>) -> Self {
        self.intent = Some(intent.into());
        self
    }

    /// Filter by session
    pub fn session(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }

    /// Filter by time range
    pub fn between(mut self, from: DateTime<Utc>, to: DateTime<Utc>) -> Self {
        self.from_time = Some(from);
        self.to_time = Some(to);
        self
    }

    /// Limit results
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Check whether a turn matches every filter in this query
    pub fn matches(&self, turn: &ConversationTurn) -> bool {
        if let Some(intent) = &self.intent {
            if turn.intent.as_deref() != Some(intent.as_str()) {
                return false;
            }
        }
        if let Some(session_id) = &self.session_id {
            if turn.session_id.as_deref() != Some(session_id.as_str()) {
                return false;
            }
        }
        if let Some(from) = self.from_time {
            if turn.created_at < from {
                return false;
            }
        }
        if let Some(to) = self.to_time {
            if turn.created_at > to {
                return false;
            }
        }
        if let Some(text) = &self.text {
            let needle = text.to_lowercase();
            let in_intent = turn
                .intent
                .as_deref()
                .map(|i| i.to_lowercase().contains(&needle))
                .unwrap_or(false);
            let in_entities = turn
                .entities
                .iter()
                .any(|e| e.to_lowercase().contains(&needle));
            let in_messages = turn
                .messages
                .iter()
                .any(|m| m.content.to_lowercase().contains(&needle));
            if !(in_intent || in_entities || in_messages) {
                return false;
            }
        }
        true
    }
}
