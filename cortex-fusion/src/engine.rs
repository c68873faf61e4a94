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

//! Fusion engine
//!
//! The facade over the two channels. Writes go to the owning channel;
//! narrative queries fetch bounded recent history from both channels and
//! run the correlator over it. The engine holds injected channel handles
//! and owns no data itself; the caller owns channel lifecycle.

use crate::correlator::Correlator;
use cortex_core::{
    ConversationTurn, CortexError, CortexResult, EventId, ExecutionEvent, FusionConfig, TurnId,
    UnifiedNarrative,
};
use cortex_storage::{ConversationChannel, ConversationStore, ExecutionChannel, ExecutionLog};
use std::sync::Arc;
use tracing::info;

/// Facade joining the conversational and traditional channels
pub struct FusionEngine {
    conversations: Arc<dyn ConversationChannel>,
    executions: Arc<dyn ExecutionChannel>,
    config: FusionConfig,
}

impl FusionEngine {
    /// Create an engine over explicitly constructed channels
    pub fn new(
        conversations: Arc<dyn ConversationChannel>,
        executions: Arc<dyn ExecutionChannel>,
        config: FusionConfig,
    ) -> Self {
        Self {
            conversations,
            executions,
            config,
        }
    }

    /// Open an engine over durable channels rooted at `config.data_dir`
    pub async fn open(config: FusionConfig) -> CortexResult<Self> {
        let conversations = ConversationStore::open(&config.data_dir).await?;
        let executions = ExecutionLog::open(&config.data_dir).await?;
        Ok(Self::new(
            Arc::new(conversations),
            Arc::new(executions),
            config,
        ))
    }

    /// Record a conversation turn
    pub async fn store_conversation(&self, turn: ConversationTurn) -> CortexResult<TurnId> {
        self.conversations.store(turn).await
    }

    /// Record an execution event
    pub async fn store_execution(&self, event: ExecutionEvent) -> CortexResult<EventId> {
        self.executions.append(event).await
    }

    /// Correlate recent history from both channels into narratives
    ///
    /// `window_minutes` overrides the configured window; `None` uses the
    /// configured default. A storage failure on either channel propagates
    /// unmodified and no partial result is emitted.
    pub async fn unified_narratives(
        &self,
        window_minutes: Option<i64>,
    ) -> CortexResult<Vec<UnifiedNarrative>> {
        let window = window_minutes.unwrap_or(self.config.window_minutes);
        if window < 0 {
            return Err(CortexError::Validation(format!(
                "window_minutes must be non-negative, got {}",
                window
            )));
        }

        let turns = self.conversations.recent(self.config.recent_turns).await?;
        let events = self.executions.recent(self.config.recent_events).await?;

        let narratives = Correlator::new(window).correlate(&turns, &events);
        info!(
            narratives = narratives.len(),
            window_minutes = window,
            "unified narratives computed"
        );
        Ok(narratives)
    }

    /// The engine's configuration
    pub fn config(&self) -> &FusionConfig {
        &self.config
    }
}
