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

//! Cortex Core
//!
//! Fundamental data structures and types for the dual-channel memory
//! system: conversation turns, execution events, derived narratives, turn
//! quality scoring, configuration, and the shared error taxonomy.
//!
//! ```text
//! ┌──────────────────────┐        ┌──────────────────────┐
//! │ Conversational       │        │ Traditional          │
//! │ channel              │        │ channel              │
//! │ (ConversationTurn)   │        │ (ExecutionEvent)     │
//! └──────────┬───────────┘        └──────────┬───────────┘
//!            │        time-window join       │
//!            └──────────────┬────────────────┘
//!                           ▼
//!                 ┌──────────────────┐
//!                 │ UnifiedNarrative │
//!                 └──────────────────┘
//! ```

pub mod config;
pub mod conversation;
pub mod error;
pub mod event;
pub mod narrative;
pub mod quality;

// Re-exports
pub use config::{
    FusionConfig, DEFAULT_RECENT_EVENTS, DEFAULT_RECENT_TURNS, DEFAULT_WINDOW_MINUTES,
};
pub use conversation::{ConversationTurn, Message, Role, TurnId, TurnQuery};
pub use error::{CortexError, CortexResult};
pub use event::{EventId, ExecutionEvent};
pub use narrative::{
    LearningValue, Outcome, TimelineEntry, TimelineKind, UnifiedNarrative,
};
pub use quality::{DimensionScore, QualityScore, TurnQualityMetrics};
