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

//! Cortex Storage Layer
//!
//! The two durable channels of the dual-channel memory system:
//!
//! - **Conversational channel** ([`ConversationStore`]): conversation turns
//!   with store-time quality scoring, substring search, and archive
//!   relocation
//! - **Traditional channel** ([`ExecutionLog`]): append-only log of
//!   direct-execution events
//!
//! Both persist line-delimited JSON records under a data directory and keep
//! an in-memory index behind a write lock that serializes writers. The
//! [`channel`] traits are the seam the correlator reads through;
//! [`mem`] provides deterministic in-memory fakes of both channels.

pub mod channel;
pub mod conversation;
pub mod event_log;
pub mod mem;

// Re-exports
pub use channel::{ConversationChannel, ExecutionChannel};
pub use conversation::{ConversationStore, StoreStats};
pub use event_log::ExecutionLog;
pub use mem::{InMemoryConversationStore, InMemoryExecutionLog};
