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

//! Execution event types
//!
//! Events are the atomic record of the traditional channel: one direct
//! command or operation execution with its parameters, result, timing, and
//! success flag. Events are append-only and read-only once written.

use crate::error::{CortexError, CortexResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use uuid::Uuid;

/// Unique identifier for an execution event
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EventId(pub String);

impl EventId {
    /// Generate a new unique ID
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Create from an existing string
    pub fn from_string(s: String) -> Self {
        Self(s)
    }
}

impl Default for EventId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for EventId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A direct-execution record stored in the traditional channel
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionEvent {
    /// Unique event ID
    pub id: EventId,
    /// Name of the executed operation
    pub operation: String,
    /// Parameters the operation ran with
    pub parameters: HashMap<String, Value>,
    /// Result payload produced by the operation
    pub result: HashMap<String, Value>,
    /// Execution duration in milliseconds, never negative once stored
    pub duration_ms: i64,
    /// Whether the operation succeeded
    pub success: bool,
    /// Session this event belongs to
    pub session_id: Option<String>,
    /// When the operation completed
    pub created_at: DateTime<Utc>,
}

impl ExecutionEvent {
    /// Create a new event for an operation, timestamped now
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            id: EventId::new(),
            operation: operation.into(),
            parameters: HashMap::new(),
            result: HashMap::new(),
            duration_ms: 0,
            success: true,
            session_id: None,
            created_at: Utc::now(),
        }
    }

    /// Add a parameter
    pub fn parameter(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.parameters.insert(key.into(), value.into());
        self
    }

    /// Add a result entry
    pub fn result_entry(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.result.insert(key.into(), value.into());
        self
    }

    /// Set the execution duration
    pub fn duration_ms(mut self, duration_ms: i64) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    /// Set the success flag
    pub fn success(mut self, success: bool) -> Self {
        self.success = success;
        self
    }

    /// Set the session ID
    pub fn session(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }

    /// Set an explicit completion timestamp
    pub fn at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    /// Check the event is well formed before it reaches the storage layer
    pub fn validate(&self) -> CortexResult<()> {
        if self.operation.trim().is_empty() {
            return Err(CortexError::Validation(
                "operation name is empty".to_string(),
            ));
        }
        if self.duration_ms < 0 {
            return Err(CortexError::Validation(format!(
                "duration_ms must be non-negative, got {}",
                self.duration_ms
            )));
        }
        Ok(())
    }
}
