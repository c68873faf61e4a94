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

//! Unified narrative types
//!
//! A narrative is the derived, read-only view the correlator emits for a
//! conversation turn together with the execution events temporally near it.
//! Narratives are computed on demand and never persisted.

use crate::conversation::TurnId;
use crate::event::{EventId, ExecutionEvent};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Outcome of a correlated turn, derived from its related events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// All related events succeeded
    Successful,
    /// Some related events succeeded
    PartiallySuccessful,
    /// No related event succeeded
    Failed,
    /// No related events at all
    ConversationOnly,
}

impl Outcome {
    /// Derive the outcome from the success flags of the related events
    pub fn from_events(events: &[&ExecutionEvent]) -> Self {
        if events.is_empty() {
            return Outcome::ConversationOnly;
        }
        let succeeded = events.iter().filter(|e| e.success).count();
        if succeeded == events.len() {
            Outcome::Successful
        } else if succeeded > 0 {
            Outcome::PartiallySuccessful
        } else {
            Outcome::Failed
        }
    }

    /// Get the outcome as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Successful => "successful",
            Outcome::PartiallySuccessful => "partially_successful",
            Outcome::Failed => "failed",
            Outcome::ConversationOnly => "conversation_only",
        }
    }
}

/// Coarse estimate of how useful a narrative is for future pattern learning
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LearningValue {
    High,
    Medium,
    Low,
}

impl LearningValue {
    /// Derive the learning value from the turn's word count and the related
    /// events. Substantial turns whose every related event succeeded rank
    /// high; any correlation at all ranks medium.
    pub fn derive(word_count: usize, events: &[&ExecutionEvent]) -> Self {
        if !events.is_empty() && word_count > 10 && events.iter().all(|e| e.success) {
            LearningValue::High
        } else if !events.is_empty() {
            LearningValue::Medium
        } else {
            LearningValue::Low
        }
    }

    /// Get the learning value as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            LearningValue::High => "high",
            LearningValue::Medium => "medium",
            LearningValue::Low => "low",
        }
    }
}

/// Kind of a timeline entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimelineKind {
    Conversation,
    Execution,
}

/// One entry on a narrative's merged timeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineEntry {
    /// When the entry occurred
    pub timestamp: DateTime<Utc>,
    /// Which channel it came from
    pub kind: TimelineKind,
    /// Channel-specific payload
    pub payload: Value,
}

/// Derived view joining a conversation turn with its nearby execution events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnifiedNarrative {
    /// Source conversation turn
    pub turn_id: TurnId,
    /// Correlated execution events
    pub event_ids: Vec<EventId>,
    /// Merged timeline, sorted ascending by timestamp
    pub timeline: Vec<TimelineEntry>,
    /// Outcome derived from the related events' success flags
    pub outcome: Outcome,
    /// Learning value estimate
    pub learning_value: LearningValue,
    /// One-line human description of the narrative
    pub summary: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::ExecutionEvent;

    #[test]
    fn test_outcome_derivation() {
        let ok = ExecutionEvent::new("build").success(true);
        let bad = ExecutionEvent::new("test").success(false);

        assert_eq!(Outcome::from_events(&[]), Outcome::ConversationOnly);
        assert_eq!(Outcome::from_events(&[&ok]), Outcome::Successful);
        assert_eq!(Outcome::from_events(&[&ok, &bad]), Outcome::PartiallySuccessful);
        assert_eq!(Outcome::from_events(&[&bad]), Outcome::Failed);
    }

    #[test]
    fn test_learning_value() {
        let ok = ExecutionEvent::new("build").success(true);
        let bad = ExecutionEvent::new("test").success(false);

        assert_eq!(LearningValue::derive(25, &[&ok]), LearningValue::High);
        assert_eq!(LearningValue::derive(25, &[&ok, &bad]), LearningValue::Medium);
        assert_eq!(LearningValue::derive(3, &[&ok]), LearningValue::Medium);
        assert_eq!(LearningValue::derive(25, &[]), LearningValue::Low);
    }

    #[test]
    fn test_outcome_as_str() {
        assert_eq!(Outcome::PartiallySuccessful.as_str(), "partially_successful");
        assert_eq!(LearningValue::High.as_str(), "high");
    }
}
