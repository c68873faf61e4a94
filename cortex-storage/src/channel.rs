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

//! Channel traits
//!
//! The correlator reads both channels through these interfaces and never
//! touches the backing files directly. The durable stores implement them
//! for production; `mem` provides deterministic in-memory fakes for tests.
//! Callers construct and own the channel handles; there are no process-wide
//! singletons.

use async_trait::async_trait;
use cortex_core::{
    ConversationTurn, CortexResult, EventId, ExecutionEvent, TurnId, TurnQuery,
};

/// Write and read capability of the conversational channel
#[async_trait]
pub trait ConversationChannel: Send + Sync {
    /// Validate, score, and durably record a turn
    async fn store(&self, turn: ConversationTurn) -> CortexResult<TurnId>;

    /// Fetch a turn by ID; absence is `Ok(None)`
    async fn get(&self, id: &TurnId) -> CortexResult<Option<ConversationTurn>>;

    /// Naive substring search over intent, entities, and message content,
    /// returning at most `limit` most-recent matches, newest first
    async fn search(&self, text: &str, limit: usize) -> CortexResult<Vec<ConversationTurn>>;

    /// Filtered retrieval, newest first
    async fn query(&self, query: &TurnQuery) -> CortexResult<Vec<ConversationTurn>>;

    /// The most recent `limit` turns, newest first
    async fn recent(&self, limit: usize) -> CortexResult<Vec<ConversationTurn>>;

    /// Relocate a turn to the archive; returns `false` for an unknown ID
    async fn archive(&self, id: &TurnId) -> CortexResult<bool>;
}

/// Write and read capability of the traditional channel
#[async_trait]
pub trait ExecutionChannel: Send + Sync {
    /// Validate and durably record an event
    async fn append(&self, event: ExecutionEvent) -> CortexResult<EventId>;

    /// Fetch an event by ID; absence is `Ok(None)`
    async fn get(&self, id: &EventId) -> CortexResult<Option<ExecutionEvent>>;

    /// The most recent `limit` events, newest first
    async fn recent(&self, limit: usize) -> CortexResult<Vec<ExecutionEvent>>;
}
