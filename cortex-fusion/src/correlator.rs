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

//! Time-window correlation of the two channels
//!
//! Pairs recent conversation turns with recent execution events by
//! wall-clock proximity and emits a unified narrative per turn that has at
//! least one related event. The nested comparison is O(N x M) over the
//! bounded recent-history windows; N and M never exceed the configured
//! fetch limits.
//!
//! Pure compute: the correlator owns no data and never writes.

use cortex_core::{
    ConversationTurn, ExecutionEvent, LearningValue, Outcome, TimelineEntry, TimelineKind,
    UnifiedNarrative,
};
use serde_json::json;
use tracing::debug;

/// Correlates conversation turns with execution events by time proximity
#[derive(Debug, Clone)]
pub struct Correlator {
    window_minutes: i64,
}

impl Correlator {
    /// Create a correlator with the given window in minutes
    pub fn new(window_minutes: i64) -> Self {
        Self { window_minutes }
    }

    /// Whether an event falls within the window around a turn
    pub fn related(&self, turn: &ConversationTurn, event: &ExecutionEvent) -> bool {
        let delta_secs = (turn.created_at - event.created_at).num_seconds().abs();
        delta_secs <= self.window_minutes * 60
    }

    /// Join turns and events into narratives
    ///
    /// Turns with no related event produce no narrative. Each narrative's
    /// timeline merges the conversation entry with every related event,
    /// sorted ascending by timestamp.
    pub fn correlate(
        &self,
        turns: &[ConversationTurn],
        events: &[ExecutionEvent],
    ) -> Vec<UnifiedNarrative> {
        let mut narratives = Vec::new();

        for turn in turns {
            let related: Vec<&ExecutionEvent> =
                events.iter().filter(|e| self.related(turn, e)).collect();
            if related.is_empty() {
                continue;
            }
            narratives.push(self.narrative_for(turn, &related));
        }

        debug!(
            turns = turns.len(),
            events = events.len(),
            narratives = narratives.len(),
            window_minutes = self.window_minutes,
            "correlation complete"
        );

        narratives
    }

    fn narrative_for(
        &self,
        turn: &ConversationTurn,
        related: &[&ExecutionEvent],
    ) -> UnifiedNarrative {
        let outcome = Outcome::from_events(related);
        let learning_value = LearningValue::derive(turn.word_count(), related);

        let mut timeline = vec![TimelineEntry {
            timestamp: turn.created_at,
            kind: TimelineKind::Conversation,
            payload: json!({
                "turn_id": turn.id.0,
                "intent": turn.intent,
                "message_count": turn.messages.len(),
                "quality_score": turn.quality_score,
            }),
        }];
        for event in related {
            timeline.push(TimelineEntry {
                timestamp: event.created_at,
                kind: TimelineKind::Execution,
                payload: json!({
                    "event_id": event.id.0,
                    "operation": event.operation,
                    "success": event.success,
                    "duration_ms": event.duration_ms,
                }),
            });
        }
        timeline.sort_by_key(|entry| entry.timestamp);

        let label = turn.intent.as_deref().unwrap_or("conversation");
        let summary = format!(
            "{} correlated with {} execution event(s), outcome {}",
            label,
            related.len(),
            outcome.as_str()
        );

        UnifiedNarrative {
            turn_id: turn.id.clone(),
            event_ids: related.iter().map(|e| e.id.clone()).collect(),
            timeline,
            outcome,
            learning_value,
            summary,
        }
    }
}
