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

//! Deterministic in-memory channel fakes
//!
//! Implement the channel traits with the same validation, scoring, and
//! ordering semantics as the durable stores, minus the disk. Intended for
//! tests and for embedding without persistence.

use crate::channel::{ConversationChannel, ExecutionChannel};
use async_trait::async_trait;
use chrono::Utc;
use cortex_core::{
    ConversationTurn, CortexResult, EventId, ExecutionEvent, TurnId, TurnQuery,
    TurnQualityMetrics,
};
use tokio::sync::RwLock;

/// In-memory conversational channel
#[derive(Debug, Default)]
pub struct InMemoryConversationStore {
    turns: RwLock<Vec<ConversationTurn>>,
    archived: RwLock<Vec<ConversationTurn>>,
}

impl InMemoryConversationStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of archived turns
    pub async fn archived_len(&self) -> usize {
        self.archived.read().await.len()
    }
}

#[async_trait]
impl ConversationChannel for InMemoryConversationStore {
    async fn store(&self, mut turn: ConversationTurn) -> CortexResult<TurnId> {
        turn.validate()?;
        turn.normalize();
        turn.quality_score = TurnQualityMetrics::default().score(&turn.messages).overall;

        let id = turn.id.clone();
        self.turns.write().await.push(turn);
        Ok(id)
    }

    async fn get(&self, id: &TurnId) -> CortexResult<Option<ConversationTurn>> {
        let turns = self.turns.read().await;
        Ok(turns.iter().find(|t| t.id == *id).cloned())
    }

    async fn search(&self, text: &str, limit: usize) -> CortexResult<Vec<ConversationTurn>> {
        self.query(&TurnQuery::text(text).limit(limit)).await
    }

    async fn query(&self, query: &TurnQuery) -> CortexResult<Vec<ConversationTurn>> {
        let turns = self.turns.read().await;
        let limit = query.limit.unwrap_or(usize::MAX);
        Ok(turns
            .iter()
            .rev()
            .filter(|t| query.matches(t))
            .take(limit)
            .cloned()
            .collect())
    }

    async fn recent(&self, limit: usize) -> CortexResult<Vec<ConversationTurn>> {
        let turns = self.turns.read().await;
        Ok(turns.iter().rev().take(limit).cloned().collect())
    }

    async fn archive(&self, id: &TurnId) -> CortexResult<bool> {
        let mut turns = self.turns.write().await;
        let Some(pos) = turns.iter().position(|t| t.id == *id) else {
            return Ok(false);
        };
        let mut turn = turns.remove(pos);
        turn.archived_at = Some(Utc::now());
        self.archived.write().await.push(turn);
        Ok(true)
    }
}

/// In-memory traditional channel
#[derive(Debug, Default)]
pub struct InMemoryExecutionLog {
    events: RwLock<Vec<ExecutionEvent>>,
}

impl InMemoryExecutionLog {
    /// Create an empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of recorded events
    pub async fn len(&self) -> usize {
        self.events.read().await.len()
    }

    /// Whether the log is empty
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl ExecutionChannel for InMemoryExecutionLog {
    async fn append(&self, event: ExecutionEvent) -> CortexResult<EventId> {
        event.validate()?;
        let id = event.id.clone();
        self.events.write().await.push(event);
        Ok(id)
    }

    async fn get(&self, id: &EventId) -> CortexResult<Option<ExecutionEvent>> {
        let events = self.events.read().await;
        Ok(events.iter().find(|e| e.id == *id).cloned())
    }

    async fn recent(&self, limit: usize) -> CortexResult<Vec<ExecutionEvent>> {
        let events = self.events.read().await;
        Ok(events.iter().rev().take(limit).cloned().collect())
    }
}
